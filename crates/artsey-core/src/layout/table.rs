// Artsey Layout Table
// Per-layer physical chord -> output lookup, built once at startup

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;

use crate::error::ConfigError;
use crate::grid::{Coordinate, PositionMap};
use crate::layout::RawLayout;
use crate::{Chord, Key};

/// Layer active at startup and after toggling a layer off
pub const BASE_LAYER: &str = "Base";
/// Layer consulted before the active one on every resolution
pub const GLOBAL_LAYER: &str = "Global";
/// Description prefix marking a layer switch
pub const LAYER_DIRECTIVE_PREFIX: &str = "Layer - ";

/// Decoded output of a chord
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Output {
    /// Text printed verbatim
    Literal(String),
    /// Switch to (or toggle off) the named layer
    SwitchLayer(String),
}

impl Output {
    /// Decode a layout description.
    ///
    /// Anything starting with `Layer - ` is a switch; the target is the text
    /// after the last occurrence of the prefix, trimmed.
    pub fn classify(description: &str) -> Self {
        if description.starts_with(LAYER_DIRECTIVE_PREFIX) {
            let target = description
                .rsplit(LAYER_DIRECTIVE_PREFIX)
                .next()
                .unwrap_or_default()
                .trim();
            Output::SwitchLayer(target.to_string())
        } else {
            Output::Literal(description.to_string())
        }
    }

    pub fn is_layer_switch(&self) -> bool {
        matches!(self, Output::SwitchLayer(_))
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Literal(text) => write!(f, "{:?}", text),
            Output::SwitchLayer(layer) => write!(f, "{}{}", LAYER_DIRECTIVE_PREFIX, layer),
        }
    }
}

/// Chord -> output mappings of one layer, in physical key space
#[derive(Debug, Clone, Default)]
pub struct Layer {
    name: String,
    mappings: HashMap<Chord<Key>, Output>,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mappings: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, chord: &Chord<Key>) -> Option<&Output> {
        self.mappings.get(chord)
    }

    /// Insert a mapping, returning the output it replaced
    pub fn insert(&mut self, chord: Chord<Key>, output: Output) -> Option<Output> {
        self.mappings.insert(chord, output)
    }

    pub fn mappings(&self) -> &HashMap<Chord<Key>, Output> {
        &self.mappings
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// Layer name -> [`Layer`]. Immutable once built; layers keep document order.
#[derive(Debug, Clone, Default)]
pub struct LayoutTable {
    layers: IndexMap<String, Layer>,
}

impl LayoutTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.get(name)
    }

    /// Lookup in a single layer. Missing layers and chords are both `None`.
    pub fn lookup(&self, layer: &str, chord: &Chord<Key>) -> Option<&Output> {
        self.layers.get(layer).and_then(|l| l.get(chord))
    }

    /// Insert a mapping, creating the layer on first use
    pub fn insert(
        &mut self,
        layer: impl Into<String>,
        chord: Chord<Key>,
        output: Output,
    ) -> Option<Output> {
        let name = layer.into();
        self.layers
            .entry(name.clone())
            .or_insert_with(|| Layer::new(name))
            .insert(chord, output)
    }

    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.values()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Total mappings across all layers
    pub fn mapping_count(&self) -> usize {
        self.layers.values().map(Layer::len).sum()
    }
}

/// Remap every chord of `raw` from grid coordinates to physical keys.
///
/// Coordinates outside the grid are a configuration error. Chords that
/// collapse onto the same physical chord within a layer (possible with
/// duplicate keys) follow last-write-wins. Empty chords can never be
/// entered and are skipped.
pub fn build_layout_table(
    raw: &RawLayout,
    position_map: &PositionMap,
) -> Result<LayoutTable, ConfigError> {
    let mut table = LayoutTable::new();

    for (layer, chords) in raw.layers() {
        for (coordinates, description) in chords {
            if coordinates.is_empty() {
                log::warn!(
                    "Layer '{}': skipping '{}', its combo has no keys",
                    layer,
                    description
                );
                continue;
            }

            let physical = coordinates.try_map(|&coordinate: &Coordinate| {
                position_map
                    .get(coordinate)
                    .ok_or_else(|| ConfigError::CoordinateOutOfGrid {
                        layer: layer.to_string(),
                        x: coordinate.x,
                        y: coordinate.y,
                    })
            })?;

            let output = Output::classify(description);
            if let Some(previous) = table.insert(layer, physical.clone(), output) {
                log::debug!(
                    "Layer '{}': combo {} remapped over {}",
                    layer,
                    physical,
                    previous
                );
            }
        }
    }

    log::debug!(
        "Layout table built: {} layers, {} mappings",
        table.len(),
        table.mapping_count()
    );

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::build_position_map;

    fn keys(s: &str) -> Vec<Key> {
        s.chars().filter_map(Key::new).collect()
    }

    fn key_chord(s: &str) -> Chord<Key> {
        keys(s).into_iter().collect()
    }

    fn coords(points: &[(i32, i32)]) -> Chord<Coordinate> {
        points.iter().map(|&(x, y)| Coordinate::new(x, y)).collect()
    }

    #[test]
    fn test_classify_literal() {
        assert_eq!(Output::classify("x"), Output::Literal("x".to_string()));
        assert_eq!(Output::classify(""), Output::Literal(String::new()));
        assert_eq!(
            Output::classify("Layer -Nums"),
            Output::Literal("Layer -Nums".to_string())
        );
    }

    #[test]
    fn test_classify_layer_switch() {
        assert_eq!(
            Output::classify("Layer - Nums"),
            Output::SwitchLayer("Nums".to_string())
        );
        assert_eq!(
            Output::classify("Layer -   Symbols  "),
            Output::SwitchLayer("Symbols".to_string())
        );
        assert!(Output::classify("Layer - Nav").is_layer_switch());
    }

    #[test]
    fn test_build_layout_table_remaps_coordinates() {
        let position_map = build_position_map(&keys("abcdefgh")).unwrap();
        let mut raw = RawLayout::new();
        raw.insert("Base", coords(&[(0, 0), (1, 0)]), "AB");
        raw.insert("Base", coords(&[(3, 1)]), "H");

        let table = build_layout_table(&raw, &position_map).unwrap();
        assert_eq!(
            table.lookup("Base", &key_chord("ab")),
            Some(&Output::Literal("AB".to_string()))
        );
        assert_eq!(
            table.lookup("Base", &key_chord("h")),
            Some(&Output::Literal("H".to_string()))
        );
        assert_eq!(table.lookup("Base", &key_chord("a")), None);
        assert_eq!(table.lookup("Nums", &key_chord("ab")), None);
    }

    #[test]
    fn test_build_layout_table_rejects_out_of_grid() {
        let position_map = build_position_map(&keys("abcdefgh")).unwrap();
        let mut raw = RawLayout::new();
        raw.insert("Base", coords(&[(0, 0)]), "a");
        raw.insert("Nums", coords(&[(0, 0), (5, 5)]), "oops");

        let result = build_layout_table(&raw, &position_map);
        assert!(matches!(
            result,
            Err(ConfigError::CoordinateOutOfGrid { ref layer, x: 5, y: 5 }) if layer == "Nums"
        ));
    }

    #[test]
    fn test_build_layout_table_decodes_switches() {
        let position_map = build_position_map(&keys("abcdefgh")).unwrap();
        let mut raw = RawLayout::new();
        raw.insert("Global", coords(&[(0, 0), (1, 0)]), "Layer - Nums");

        let table = build_layout_table(&raw, &position_map).unwrap();
        assert_eq!(
            table.lookup(GLOBAL_LAYER, &key_chord("ab")),
            Some(&Output::SwitchLayer("Nums".to_string()))
        );
    }

    #[test]
    fn test_duplicate_keys_collapse_last_write_wins() {
        // 'a' sits at both (0,0) and (1,0)
        let position_map = build_position_map(&keys("aacdefgh")).unwrap();
        let mut raw = RawLayout::new();
        raw.insert("Base", coords(&[(0, 0)]), "first");
        raw.insert("Base", coords(&[(1, 0)]), "second");

        let table = build_layout_table(&raw, &position_map).unwrap();
        let base = table.layer(BASE_LAYER).unwrap();
        assert_eq!(base.len(), 1);
        assert_eq!(
            base.get(&key_chord("a")),
            Some(&Output::Literal("second".to_string()))
        );
    }

    #[test]
    fn test_empty_chord_is_skipped() {
        let position_map = build_position_map(&keys("abcdefgh")).unwrap();
        let mut raw = RawLayout::new();
        raw.insert("Base", Chord::new(), "never");
        raw.insert("Base", coords(&[(2, 0)]), "c");

        let table = build_layout_table(&raw, &position_map).unwrap();
        assert_eq!(table.mapping_count(), 1);
        assert_eq!(table.lookup("Base", &Chord::new()), None);
    }

    #[test]
    fn test_layer_order_follows_document() {
        let position_map = build_position_map(&keys("abcdefgh")).unwrap();
        let mut raw = RawLayout::new();
        raw.insert("Base", coords(&[(0, 0)]), "a");
        raw.insert("Global", coords(&[(0, 0), (1, 0)]), "Layer - Nums");
        raw.insert("Nums", coords(&[(0, 0)]), "1");

        let table = build_layout_table(&raw, &position_map).unwrap();
        let names: Vec<&str> = table.layers().map(Layer::name).collect();
        assert_eq!(names, vec!["Base", "Global", "Nums"]);
    }
}
