// Artsey Combo Resolver
// Press/release state machine resolving chords against the layout table
//
// A chord is resolved exactly once per "all keys down, all keys up" cycle:
// keys accumulate into the combo while held, and the combo is looked up
// (Global layer first, then the active layer) when the last held key is
// released. The combo is cleared after every resolution attempt, matched
// or not, so the resolver always returns to a valid state.

use std::sync::Arc;

use crate::input::KeyEvent;
use crate::key::{KeyInput, SpecialKey};
use crate::layout::{LayoutTable, Output, BASE_LAYER, GLOBAL_LAYER};
use crate::state::ResolverState;
use crate::{Chord, Key};

/// Observable effect of a resolved chord
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// Text to print verbatim
    Literal(String),
    /// The active layer changed
    LayerSwitched { from: String, to: String },
}

/// Outcome of handling one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Nothing observable happened
    Idle,
    /// A chord resolved to an effect
    Emit(Emission),
    /// The termination key was released
    Terminate,
}

/// The combo resolver / layer state machine.
///
/// Owns its state exclusively; the layout table is shared read-only.
#[derive(Debug, Clone)]
pub struct ComboResolver {
    table: Arc<LayoutTable>,
    state: ResolverState,
    exit_key: SpecialKey,
}

impl ComboResolver {
    /// Create a resolver starting on the Base layer, terminating on Escape
    pub fn new(table: Arc<LayoutTable>) -> Self {
        Self {
            table,
            state: ResolverState::new(),
            exit_key: SpecialKey::Escape,
        }
    }

    /// Use a different termination key
    pub fn with_exit_key(mut self, exit_key: SpecialKey) -> Self {
        self.exit_key = exit_key;
        self
    }

    pub fn exit_key(&self) -> SpecialKey {
        self.exit_key
    }

    pub fn table(&self) -> &LayoutTable {
        &self.table
    }

    pub fn state(&self) -> &ResolverState {
        &self.state
    }

    pub fn current_layer(&self) -> &str {
        self.state.current_layer()
    }

    /// Handle one event. Presses and repeats are key-downs.
    pub fn handle_event(&mut self, event: KeyEvent) -> Step {
        log::trace!("Event: {:?} {}", event.input, event.action);
        if event.action.is_pressed() {
            self.key_down(event.input)
        } else {
            self.key_up(event.input)
        }
    }

    /// Track a printable key. Never resolves.
    pub fn key_down(&mut self, input: KeyInput) -> Step {
        if let KeyInput::Printable(key) = input {
            self.state.press(key);
        }
        Step::Idle
    }

    /// Release a key; resolves the combo once nothing is held.
    pub fn key_up(&mut self, input: KeyInput) -> Step {
        let key: Key = match input {
            KeyInput::Special(special) if special == self.exit_key => return Step::Terminate,
            KeyInput::Special(_) => return Step::Idle,
            KeyInput::Printable(key) => key,
        };

        if !self.state.release(key) {
            return Step::Idle;
        }

        let chord = self.state.take_combo();
        match self.resolve_combo(&chord).cloned() {
            Some(output) => self.dispatch(output),
            None => {
                log::trace!(
                    "No mapping for {} in layer '{}'",
                    chord,
                    self.state.current_layer()
                );
                Step::Idle
            }
        }
    }

    /// Look a chord up: the Global layer wins, then the active layer.
    ///
    /// Missing layers and missing chords both resolve to `None`.
    pub fn resolve_combo(&self, chord: &Chord<Key>) -> Option<&Output> {
        self.table
            .lookup(GLOBAL_LAYER, chord)
            .or_else(|| self.table.lookup(self.state.current_layer(), chord))
    }

    fn dispatch(&mut self, output: Output) -> Step {
        match output {
            Output::SwitchLayer(target) => {
                let from = self.state.current_layer().to_string();
                // Switching to the active layer toggles back to Base
                let to = if target == from {
                    BASE_LAYER.to_string()
                } else {
                    target
                };
                if self.table.layer(&to).is_none() {
                    log::debug!("Switched to layer '{}' which has no mappings", to);
                }
                log::debug!("Layer '{}' -> '{}'", from, to);
                self.state.set_current_layer(to.as_str());
                Step::Emit(Emission::LayerSwitched { from, to })
            }
            Output::Literal(text) if text.is_empty() => Step::Idle,
            Output::Literal(text) => Step::Emit(Emission::Literal(text)),
        }
    }
}
