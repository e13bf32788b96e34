// Artsey Layout Document
// Serde model of the ARTSEY layout file and orientation selection

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::error::ConfigError;
use crate::grid::Coordinate;
use crate::Chord;

/// Which of the two coordinate sets of a layout entry is used
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Hand {
    Left,
    #[default]
    Right,
}

/// On-disk encoding of a layout document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutFormat {
    Yaml,
    Toml,
}

impl LayoutFormat {
    /// Pick the format from the file extension; anything but `.toml` is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => LayoutFormat::Toml,
            _ => LayoutFormat::Yaml,
        }
    }
}

/// Root of a layout document
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutDocument {
    pub keymap: Vec<KeymapEntry>,
}

/// One chord definition
#[derive(Debug, Clone, Deserialize)]
pub struct KeymapEntry {
    /// Layer this chord belongs to
    pub layer: LayerRef,

    /// Coordinates per orientation (`left`, `right`)
    pub combo: BTreeMap<String, Vec<Coordinate>>,

    /// Output text, or `Layer - <Name>` for a layer switch
    #[serde(deserialize_with = "description_text")]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LayerRef {
    pub layer: String,
}

/// Descriptions such as `1` or `true` are written unquoted in YAML layouts;
/// accept any scalar and keep its text. A null description produces nothing.
fn description_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Integer(i64),
        Float(f64),
        Bool(bool),
    }

    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Text(s)) => s,
        Some(Scalar::Integer(i)) => i.to_string(),
        Some(Scalar::Float(f)) => f.to_string(),
        Some(Scalar::Bool(b)) => b.to_string(),
        None => String::new(),
    })
}

/// Chords of one layer in coordinate space
pub type RawLayer = IndexMap<Chord<Coordinate>, String>;

/// Layer -> chord-of-coordinates -> description, for a single orientation.
///
/// Layers keep document order. Within a layer a repeated chord replaces the
/// earlier description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawLayout {
    layers: IndexMap<String, RawLayer>,
}

impl RawLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a chord, returning the description it replaced
    pub fn insert(
        &mut self,
        layer: impl Into<String>,
        chord: Chord<Coordinate>,
        description: impl Into<String>,
    ) -> Option<String> {
        self.layers
            .entry(layer.into())
            .or_default()
            .insert(chord, description.into())
    }

    pub fn layer(&self, name: &str) -> Option<&RawLayer> {
        self.layers.get(name)
    }

    pub fn layers(&self) -> impl Iterator<Item = (&str, &RawLayer)> {
        self.layers.iter().map(|(name, layer)| (name.as_str(), layer))
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl LayoutDocument {
    /// Read and parse a layout file, choosing the format by extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::parse(&content, LayoutFormat::from_path(path))
    }

    pub fn parse(content: &str, format: LayoutFormat) -> Result<Self, ConfigError> {
        match format {
            LayoutFormat::Yaml => Self::from_yaml(content),
            LayoutFormat::Toml => Self::from_toml(content),
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::YamlParse(e.to_string()))
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::TomlParse(e.to_string()))
    }

    /// Project the document onto one orientation.
    ///
    /// Every entry must define a combo for `hand`.
    pub fn select(&self, hand: Hand) -> Result<RawLayout, ConfigError> {
        let mut raw = RawLayout::new();
        let orientation: &str = hand.as_ref();

        for entry in &self.keymap {
            let coordinates = entry.combo.get(orientation).ok_or_else(|| {
                ConfigError::MissingOrientation {
                    layer: entry.layer.layer.clone(),
                    description: entry.description.clone(),
                    hand: hand.to_string(),
                }
            })?;

            let chord: Chord<Coordinate> = coordinates.iter().copied().collect();
            if let Some(previous) =
                raw.insert(entry.layer.layer.as_str(), chord, entry.description.as_str())
            {
                log::debug!(
                    "Layer '{}': '{}' replaces '{}' for the same combo",
                    entry.layer.layer,
                    entry.description,
                    previous
                );
            }
        }

        Ok(raw)
    }
}

/// Load a layout file and select one orientation
pub fn load_layout<P: AsRef<Path>>(path: P, hand: Hand) -> Result<RawLayout, ConfigError> {
    let document = LayoutDocument::from_path(path.as_ref())?;
    let raw = document.select(hand)?;
    log::info!(
        "Loaded layout {} ({} entries, {} layers, {} hand)",
        path.as_ref().display(),
        document.keymap.len(),
        raw.len(),
        hand
    );
    Ok(raw)
}
