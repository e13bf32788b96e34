// Artsey Core Library
// ARTSEY chord resolution: layouts, the combo resolver and its input/output glue

pub mod action;
pub mod chord;
pub mod error;
pub mod event;
pub mod grid;
pub mod input;
pub mod key;
pub mod layout;
pub mod output;
pub mod resolver;
pub mod settings;
pub mod state;

pub use action::Action;
pub use chord::Chord;
pub use error::ConfigError;
pub use event::{
    event_queue, Dispatcher, EventReceiver, EventSender, InputError, InputResult, StopReason,
};
pub use grid::{build_position_map, Coordinate, PositionMap, GRID_HEIGHT, GRID_SIZE, GRID_WIDTH};
pub use input::KeyEvent;
pub use key::{parse_keys, Key, KeyInput, SpecialKey};
pub use layout::{
    build_layout_table, load_layout, Hand, Layer, LayoutTable, Output, RawLayout, BASE_LAYER,
    GLOBAL_LAYER,
};
pub use output::{ConsoleSink, OutputSink, RecordingSink};
pub use resolver::{ComboResolver, Emission, Step};
pub use settings::{Backend, Settings, SettingsError};
pub use state::ResolverState;

#[cfg(feature = "evdev")]
pub use event::{DeviceInfo, DeviceReader};

#[cfg(feature = "terminal")]
pub use event::TerminalSource;
