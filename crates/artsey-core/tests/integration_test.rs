// Integration tests for the layout pipeline
//
// Layout document -> orientation selection -> position map -> layout table
// -> resolver, through the public API only.

use std::sync::Arc;

use artsey_core::layout::LayoutDocument;
use artsey_core::{
    build_layout_table, build_position_map, parse_keys, Chord, ComboResolver, ConfigError,
    Coordinate, Emission, Hand, Key, KeyEvent, Output, RawLayout, Step,
};

const LAYOUT_YAML: &str = r#"
keymap:
  - layer: {layer: Base}
    combo:
      left: [{x: 3, y: 0}]
      right: [{x: 0, y: 0}]
    description: a
  - layer: {layer: Base}
    combo:
      left: [{x: 3, y: 1}, {x: 0, y: 1}]
      right: [{x: 0, y: 1}, {x: 3, y: 1}]
    description: b
  - layer: {layer: Global}
    combo:
      left: [{x: 3, y: 0}, {x: 3, y: 1}]
      right: [{x: 0, y: 0}, {x: 0, y: 1}]
    description: "Layer -   Nums  "
  - layer: {layer: Nums}
    combo:
      left: [{x: 3, y: 0}]
      right: [{x: 0, y: 0}]
    description: 1
"#;

const LAYOUT_TOML: &str = r#"
[[keymap]]
layer = { layer = "Base" }
description = "a"
combo = { left = [{ x = 3, y = 0 }], right = [{ x = 0, y = 0 }] }

[[keymap]]
layer = { layer = "Global" }
description = "Layer - Nums"
combo = { left = [{ x = 3, y = 0 }, { x = 3, y = 1 }], right = [{ x = 0, y = 0 }, { x = 0, y = 1 }] }
"#;

fn key(c: char) -> Key {
    Key::new(c).unwrap()
}

fn home_row() -> Vec<Key> {
    parse_keys(&["q", "w", "e", "r", "a", "s", "d", "f"]).unwrap()
}

fn tap_chord(resolver: &mut ComboResolver, keys: &str) -> Vec<Step> {
    let mut steps: Vec<Step> = keys
        .chars()
        .map(|c| resolver.handle_event(KeyEvent::press(key(c))))
        .collect();
    steps.extend(keys.chars().map(|c| resolver.handle_event(KeyEvent::release(key(c)))));
    steps.retain(|step| *step != Step::Idle);
    steps
}

#[test]
fn test_yaml_right_hand_pipeline() {
    let raw = LayoutDocument::from_yaml(LAYOUT_YAML)
        .unwrap()
        .select(Hand::Right)
        .unwrap();
    let position_map = build_position_map(&home_row()).unwrap();
    let table = build_layout_table(&raw, &position_map).unwrap();

    let base_b: Chord<Key> = ['a', 'f'].into_iter().map(key).collect();
    assert_eq!(table.lookup("Base", &base_b), Some(&Output::Literal("b".to_string())));
    let global: Chord<Key> = ['q', 'a'].into_iter().map(key).collect();
    assert_eq!(
        table.lookup("Global", &global),
        Some(&Output::SwitchLayer("Nums".to_string()))
    );

    let mut resolver = ComboResolver::new(Arc::new(table));
    assert_eq!(tap_chord(&mut resolver, "q"), vec![Step::Emit(Emission::Literal("a".into()))]);
    assert_eq!(tap_chord(&mut resolver, "fa"), vec![Step::Emit(Emission::Literal("b".into()))]);
    assert_eq!(
        tap_chord(&mut resolver, "qa"),
        vec![Step::Emit(Emission::LayerSwitched {
            from: "Base".into(),
            to: "Nums".into()
        })]
    );
    assert_eq!(tap_chord(&mut resolver, "q"), vec![Step::Emit(Emission::Literal("1".into()))]);
}

#[test]
fn test_left_hand_mirrors_right_hand() {
    let document = LayoutDocument::from_yaml(LAYOUT_YAML).unwrap();
    let left = document.select(Hand::Left).unwrap();

    // The left hand "a" sits at the top right corner
    let position_map = build_position_map(&home_row()).unwrap();
    let table = build_layout_table(&left, &position_map).unwrap();
    assert_eq!(
        table.lookup("Base", &Chord::from_iter([key('r')])),
        Some(&Output::Literal("a".to_string()))
    );
}

#[test]
fn test_toml_document_matches_yaml() {
    let from_toml = LayoutDocument::from_toml(LAYOUT_TOML)
        .unwrap()
        .select(Hand::Right)
        .unwrap();
    let from_yaml = LayoutDocument::from_yaml(LAYOUT_YAML)
        .unwrap()
        .select(Hand::Right)
        .unwrap();

    let position_map = build_position_map(&home_row()).unwrap();
    let toml_table = build_layout_table(&from_toml, &position_map).unwrap();
    let yaml_table = build_layout_table(&from_yaml, &position_map).unwrap();

    let chord: Chord<Key> = ['q', 'a'].into_iter().map(key).collect();
    assert_eq!(toml_table.lookup("Global", &chord), yaml_table.lookup("Global", &chord));
}

#[test]
fn test_remap_two_keys() {
    let keys = parse_keys(&["a", "b", "c", "d", "e", "f", "g", "h"]).unwrap();
    let position_map = build_position_map(&keys).unwrap();

    let mut raw = RawLayout::new();
    raw.insert("Base", [Coordinate::new(0, 0), Coordinate::new(1, 0)].into_iter().collect(), "AB");
    let table = build_layout_table(&raw, &position_map).unwrap();

    let chord: Chord<Key> = ['a', 'b'].into_iter().map(key).collect();
    assert_eq!(table.lookup("Base", &chord), Some(&Output::Literal("AB".to_string())));
}

#[test]
fn test_out_of_grid_layout_is_rejected() {
    let yaml = r#"
keymap:
  - layer: {layer: Base}
    combo:
      right: [{x: 5, y: 5}]
    description: oops
"#;
    let raw = LayoutDocument::from_yaml(yaml)
        .unwrap()
        .select(Hand::Right)
        .unwrap();
    let position_map = build_position_map(&home_row()).unwrap();

    assert!(matches!(
        build_layout_table(&raw, &position_map),
        Err(ConfigError::CoordinateOutOfGrid { x: 5, y: 5, .. })
    ));
}

#[test]
fn test_position_map_needs_exactly_eight_keys() {
    for count in [0, 7, 9] {
        let keys: Vec<Key> = "abcdefghi".chars().take(count).map(key).collect();
        assert!(matches!(
            build_position_map(&keys),
            Err(ConfigError::KeyCount { found }) if found == count
        ));
    }
}

#[test]
fn test_duplicate_keys_merge_positions() {
    // Two grid positions share a key, so their chords collapse
    let keys = parse_keys(&["a", "a", "c", "d", "e", "f", "g", "h"]).unwrap();
    let position_map = build_position_map(&keys).unwrap();

    let mut raw = RawLayout::new();
    raw.insert("Base", [Coordinate::new(0, 0)].into_iter().collect(), "first");
    raw.insert("Base", [Coordinate::new(1, 0)].into_iter().collect(), "second");
    let table = build_layout_table(&raw, &position_map).unwrap();

    assert_eq!(
        table.lookup("Base", &Chord::from_iter([key('a')])),
        Some(&Output::Literal("second".to_string()))
    );
}
