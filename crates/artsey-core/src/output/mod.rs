// Artsey Output Layer
// Where resolved chords end up: the console, or a recorder

mod console;
mod recording;

use std::io;

use crate::resolver::Emission;

pub use console::ConsoleSink;
pub use recording::RecordingSink;

/// Receives the effects of resolved chords, one at a time and in order.
pub trait OutputSink {
    /// Make an emission observable. Literal text must be visible as soon as
    /// this returns.
    fn emit(&mut self, emission: &Emission) -> io::Result<()>;
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn emit(&mut self, emission: &Emission) -> io::Result<()> {
        (**self).emit(emission)
    }
}

impl<S: OutputSink + ?Sized> OutputSink for Box<S> {
    fn emit(&mut self, emission: &Emission) -> io::Result<()> {
        (**self).emit(emission)
    }
}
