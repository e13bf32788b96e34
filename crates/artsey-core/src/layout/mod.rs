// Artsey Layout
// Layout document loading and the physical chord lookup table

pub mod document;
pub mod table;

pub use document::{load_layout, Hand, KeymapEntry, LayoutDocument, LayoutFormat, RawLayer, RawLayout};
pub use table::{
    build_layout_table, Layer, LayoutTable, Output, BASE_LAYER, GLOBAL_LAYER,
    LAYER_DIRECTIVE_PREFIX,
};
