// Artsey Configuration Errors
// Everything that can go wrong before the event loop starts

/// Invalid configuration detected while building the layout table.
///
/// None of these are recoverable: the caller must abort initialization
/// and never enter the event loop.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Eight keys required, got {found}")]
    KeyCount { found: usize },

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid hand '{0}' (expected 'left' or 'right')")]
    InvalidHand(String),

    #[error("Layer '{layer}' references coordinate ({x}, {y}) outside the 4x2 grid")]
    CoordinateOutOfGrid { layer: String, x: i32, y: i32 },

    #[error("Entry '{description}' in layer '{layer}' has no '{hand}' combo")]
    MissingOrientation {
        layer: String,
        description: String,
        hand: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(String),

    #[error("TOML parse error: {0}")]
    TomlParse(String),
}
