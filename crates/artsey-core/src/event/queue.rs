// Artsey Event Queue
// Bounded channel from input producers to the single resolver consumer

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender};
use std::time::Duration;

use crate::input::KeyEvent;
use crate::output::OutputSink;
use crate::resolver::{ComboResolver, Step};

/// Events buffered between producers and the consumer
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// How often the consumer checks the running flag while idle
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Producer handle. Cheap to clone, one per input source.
#[derive(Debug, Clone)]
pub struct EventSender {
    inner: SyncSender<KeyEvent>,
}

impl EventSender {
    /// Queue an event, blocking while the queue is full.
    ///
    /// Returns false once the consumer has gone away.
    pub fn send(&self, event: KeyEvent) -> bool {
        self.inner.send(event).is_ok()
    }
}

/// Consumer handle
#[derive(Debug)]
pub struct EventReceiver {
    inner: Receiver<KeyEvent>,
}

impl EventReceiver {
    pub fn recv_timeout(&self, timeout: Duration) -> Result<KeyEvent, RecvTimeoutError> {
        self.inner.recv_timeout(timeout)
    }
}

/// Create a bounded event queue
pub fn event_queue(capacity: usize) -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::sync_channel(capacity);
    (EventSender { inner: tx }, EventReceiver { inner: rx })
}

/// Why the dispatch loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The termination key was released
    ExitKey,
    /// The running flag was cleared (signal or Ctrl+C)
    Interrupted,
    /// Every producer hung up
    SourceClosed,
}

/// Owns the resolver and an output sink; applies events one at a time.
pub struct Dispatcher<S: OutputSink> {
    resolver: ComboResolver,
    sink: S,
    poll_interval: Duration,
}

impl<S: OutputSink> Dispatcher<S> {
    pub fn new(resolver: ComboResolver, sink: S) -> Self {
        Self {
            resolver,
            sink,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn resolver(&self) -> &ComboResolver {
        &self.resolver
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Apply one event. Returns `Some` when the loop should stop.
    ///
    /// Sink failures are logged and otherwise ignored; the resolver state has
    /// already moved on.
    pub fn handle(&mut self, event: KeyEvent) -> Option<StopReason> {
        match self.resolver.handle_event(event) {
            Step::Idle => None,
            Step::Emit(emission) => {
                if let Err(e) = self.sink.emit(&emission) {
                    log::warn!("Error writing output: {}", e);
                }
                None
            }
            Step::Terminate => Some(StopReason::ExitKey),
        }
    }

    /// Consume events in arrival order until the exit key, the running flag
    /// or the producers stop it.
    pub fn run(&mut self, events: &EventReceiver, running: &AtomicBool) -> StopReason {
        loop {
            if !running.load(Ordering::SeqCst) {
                return StopReason::Interrupted;
            }
            match events.recv_timeout(self.poll_interval) {
                Ok(event) => {
                    if let Some(reason) = self.handle(event) {
                        return reason;
                    }
                }
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return StopReason::SourceClosed,
            }
        }
    }
}
