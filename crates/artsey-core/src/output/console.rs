// Artsey Console Output
// Streams literal text and layer notices to a writer, flushing every time

use std::io::{self, Stdout, Write};

use crate::key::SpecialKey;
use crate::output::OutputSink;
use crate::resolver::Emission;

/// Writes emissions to a console stream.
///
/// Literal text is written with no separator and flushed immediately so it
/// appears as each chord resolves. Layer changes are printed on a line of
/// their own as `[Switched to <layer> layer]`.
#[derive(Debug)]
pub struct ConsoleSink<W: Write> {
    out: W,
    line_ending: &'static str,
}

impl ConsoleSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            line_ending: "\n",
        }
    }

    /// Use `\r\n` line endings, for terminals in raw mode
    pub fn raw_mode(mut self, raw: bool) -> Self {
        self.line_ending = if raw { "\r\n" } else { "\n" };
        self
    }

    /// Print the startup banner
    pub fn banner(&mut self, exit_key: SpecialKey) -> io::Result<()> {
        write!(self.out, "Press {} to exit.{}", exit_key, self.line_ending)?;
        self.out.flush()
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputSink for ConsoleSink<W> {
    fn emit(&mut self, emission: &Emission) -> io::Result<()> {
        match emission {
            Emission::Literal(text) if self.line_ending == "\n" => {
                self.out.write_all(text.as_bytes())?;
            }
            Emission::Literal(text) => {
                let translated = text.replace('\n', self.line_ending);
                self.out.write_all(translated.as_bytes())?;
            }
            Emission::LayerSwitched { to, .. } => {
                write!(
                    self.out,
                    "{le}[Switched to {to} layer]{le}",
                    le = self.line_ending,
                    to = to
                )?;
            }
        }
        self.out.flush()
    }
}
