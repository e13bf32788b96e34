// Artsey Resolver State
// Held keys, the accumulating combo and the active layer

use std::collections::HashSet;

use crate::layout::BASE_LAYER;
use crate::{Chord, Key};

/// Mutable state of the combo resolver.
///
/// `combo` is a superset of `pressed` while a chord is being entered and is
/// only cleared by [`ResolverState::take_combo`], right after `pressed`
/// empties.
#[derive(Debug, Clone)]
pub struct ResolverState {
    current_layer: String,
    pressed: HashSet<Key>,
    combo: HashSet<Key>,
}

impl ResolverState {
    pub fn new() -> Self {
        Self {
            current_layer: BASE_LAYER.to_string(),
            pressed: HashSet::new(),
            combo: HashSet::new(),
        }
    }

    pub fn current_layer(&self) -> &str {
        &self.current_layer
    }

    pub fn set_current_layer(&mut self, layer: impl Into<String>) {
        self.current_layer = layer.into();
    }

    pub fn pressed(&self) -> &HashSet<Key> {
        &self.pressed
    }

    pub fn combo(&self) -> &HashSet<Key> {
        &self.combo
    }

    /// Track a key going down. Repeats are absorbed by set semantics.
    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
        self.combo.insert(key);
    }

    /// Stop tracking a key. Returns true when no keys remain held.
    ///
    /// Releasing a key that was never pressed is a no-op.
    pub fn release(&mut self, key: Key) -> bool {
        self.pressed.remove(&key);
        self.pressed.is_empty()
    }

    /// Drain the combo into a chord, leaving it empty
    pub fn take_combo(&mut self) -> Chord<Key> {
        self.combo.drain().collect()
    }

    /// Forget all held keys and the pending combo; the layer is kept
    pub fn clear_keys(&mut self) {
        self.pressed.clear();
        self.combo.clear();
    }
}

impl Default for ResolverState {
    fn default() -> Self {
        Self::new()
    }
}
