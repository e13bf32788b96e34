// Artsey Input Layer
// Key events, scan code translation and device detection

mod device;
mod event;
mod filter;
pub mod keycodes;

pub use device::{is_keyboard, DeviceCapabilities};
pub use event::KeyEvent;
pub use filter::matches_device_filter;
pub use keycodes::{key_code, printable_key, translate_code};
