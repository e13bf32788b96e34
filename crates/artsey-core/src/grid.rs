// Artsey Position Grid
// Maps the 8 user-chosen physical keys onto the fixed 4x2 chord grid

use serde::Deserialize;

use crate::error::ConfigError;
use crate::Key;

/// Columns in the chord grid
pub const GRID_WIDTH: i32 = 4;
/// Rows in the chord grid
pub const GRID_HEIGHT: i32 = 2;
/// Number of positions (and physical keys) on the grid
pub const GRID_SIZE: usize = (GRID_WIDTH * GRID_HEIGHT) as usize;

/// A position on the abstract chord grid.
///
/// Values read from a layout document are not range checked at parse time;
/// use [`Coordinate::in_grid`] or look them up through a [`PositionMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Check if this coordinate lies on the 4x2 grid
    pub fn in_grid(self) -> bool {
        (0..GRID_WIDTH).contains(&self.x) && (0..GRID_HEIGHT).contains(&self.y)
    }

    /// Row-major index, top row left to right then bottom row
    pub fn index(self) -> Option<usize> {
        self.in_grid()
            .then(|| (self.y * GRID_WIDTH + self.x) as usize)
    }

    /// All grid coordinates in row-major order
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..GRID_HEIGHT).flat_map(|y| (0..GRID_WIDTH).map(move |x| Coordinate::new(x, y)))
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Coordinate -> physical key mapping over the whole grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionMap {
    slots: [Key; GRID_SIZE],
}

impl PositionMap {
    /// Physical key at a coordinate, `None` when outside the grid
    pub fn get(&self, coordinate: Coordinate) -> Option<Key> {
        coordinate.index().map(|i| self.slots[i])
    }

    /// All (coordinate, key) pairs in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, Key)> + '_ {
        Coordinate::all().zip(self.slots.iter().copied())
    }

    /// Physical keys in row-major order
    pub fn keys(&self) -> &[Key] {
        &self.slots
    }
}

/// Assign 8 physical keys to the grid: (0,0),(1,0),(2,0),(3,0),(0,1),(1,1),
/// (2,1),(3,1) receive `keys[0..8]` in that order.
///
/// Duplicate keys are accepted; they make two grid positions
/// indistinguishable.
pub fn build_position_map(keys: &[Key]) -> Result<PositionMap, ConfigError> {
    let slots: [Key; GRID_SIZE] = keys
        .try_into()
        .map_err(|_| ConfigError::KeyCount { found: keys.len() })?;
    Ok(PositionMap { slots })
}
