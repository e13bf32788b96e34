// Artsey Event Handling
// Input sources feeding a single-consumer queue that drives the resolver

pub mod queue;
#[cfg(feature = "evdev")]
pub mod r#loop;
#[cfg(feature = "terminal")]
pub mod terminal;

pub use queue::{
    event_queue, Dispatcher, EventReceiver, EventSender, StopReason, DEFAULT_POLL_INTERVAL,
    DEFAULT_QUEUE_CAPACITY,
};
#[cfg(feature = "evdev")]
pub use r#loop::{DeviceInfo, DeviceReader};
#[cfg(feature = "terminal")]
pub use terminal::{translate_key_event, TerminalSource};

/// Result type for input source operations
pub type InputResult<T> = Result<T, InputError>;

/// Errors raised by input sources
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal does not report key releases; use a terminal with the kitty keyboard protocol or the evdev backend")]
    ReleaseUnsupported,
}
