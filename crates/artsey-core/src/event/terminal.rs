// Artsey Terminal Input Source
// Reads key presses and releases from the controlling terminal

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    ModifierKeyCode, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement};

use crate::event::{EventSender, InputError, InputResult};
use crate::input::KeyEvent;
use crate::key::{KeyInput, SpecialKey};
use crate::Action;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Terminal input in raw mode.
///
/// Chords are only resolved on release, so the terminal has to report key
/// releases. That needs the kitty keyboard protocol; terminals without it are
/// rejected when the source is opened.
pub struct TerminalSource {
    active: bool,
}

impl TerminalSource {
    /// Switch the terminal to raw mode with release reporting enabled
    pub fn open() -> InputResult<Self> {
        if !supports_keyboard_enhancement()? {
            return Err(InputError::ReleaseUnsupported);
        }

        enable_raw_mode()?;
        let flags = KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
            | KeyboardEnhancementFlags::REPORT_EVENT_TYPES;
        if let Err(e) = execute!(io::stdout(), PushKeyboardEnhancementFlags(flags)) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }

        log::info!("Reading keys from the terminal");
        Ok(Self { active: true })
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn restore(&mut self) {
        if self.active {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
            let _ = disable_raw_mode();
            self.active = false;
        }
    }

    /// Read terminal events on their own thread until `running` is cleared
    /// or the consumer hangs up. Ctrl+C clears `running`, since raw mode
    /// swallows SIGINT.
    pub fn spawn(self, sender: EventSender, running: Arc<AtomicBool>) -> JoinHandle<InputResult<()>> {
        thread::spawn(move || {
            // Held by the thread so the terminal is restored when it ends
            let _source = self;
            while running.load(Ordering::SeqCst) {
                if !event::poll(POLL_INTERVAL)? {
                    continue;
                }
                let Event::Key(key) = event::read()? else {
                    continue;
                };
                if is_interrupt(&key) {
                    running.store(false, Ordering::SeqCst);
                    break;
                }
                if let Some(key_event) = translate_key_event(&key) {
                    if !sender.send(key_event) {
                        break;
                    }
                }
            }
            Ok(())
        })
    }
}

impl Drop for TerminalSource {
    fn drop(&mut self) {
        self.restore();
    }
}

fn is_interrupt(key: &event::KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}

/// Convert a crossterm key event into a resolver event.
///
/// Keys with no counterpart in [`SpecialKey`] become `Special(Other)`.
pub fn translate_key_event(key: &event::KeyEvent) -> Option<KeyEvent> {
    let action = match key.kind {
        KeyEventKind::Press => Action::Press,
        KeyEventKind::Repeat => Action::Repeat,
        KeyEventKind::Release => Action::Release,
    };

    let input = match key.code {
        KeyCode::Char(c) => KeyInput::from_char(c),
        KeyCode::Esc => SpecialKey::Escape.into(),
        KeyCode::Enter => SpecialKey::Enter.into(),
        KeyCode::Tab | KeyCode::BackTab => SpecialKey::Tab.into(),
        KeyCode::Backspace => SpecialKey::Backspace.into(),
        KeyCode::Delete => SpecialKey::Delete.into(),
        KeyCode::Insert => SpecialKey::Insert.into(),
        KeyCode::Home => SpecialKey::Home.into(),
        KeyCode::End => SpecialKey::End.into(),
        KeyCode::PageUp => SpecialKey::PageUp.into(),
        KeyCode::PageDown => SpecialKey::PageDown.into(),
        KeyCode::Up => SpecialKey::Up.into(),
        KeyCode::Down => SpecialKey::Down.into(),
        KeyCode::Left => SpecialKey::Left.into(),
        KeyCode::Right => SpecialKey::Right.into(),
        KeyCode::CapsLock => SpecialKey::CapsLock.into(),
        KeyCode::Modifier(modifier) => modifier_key(modifier).into(),
        KeyCode::Null => return None,
        _ => SpecialKey::Other.into(),
    };

    Some(KeyEvent::new(input, action))
}

fn modifier_key(modifier: ModifierKeyCode) -> SpecialKey {
    match modifier {
        ModifierKeyCode::LeftShift => SpecialKey::LeftShift,
        ModifierKeyCode::RightShift => SpecialKey::RightShift,
        ModifierKeyCode::LeftControl => SpecialKey::LeftCtrl,
        ModifierKeyCode::RightControl => SpecialKey::RightCtrl,
        ModifierKeyCode::LeftAlt => SpecialKey::LeftAlt,
        ModifierKeyCode::RightAlt => SpecialKey::RightAlt,
        ModifierKeyCode::LeftSuper | ModifierKeyCode::LeftMeta => SpecialKey::LeftMeta,
        ModifierKeyCode::RightSuper | ModifierKeyCode::RightMeta => SpecialKey::RightMeta,
        _ => SpecialKey::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Key;

    fn key_event(code: KeyCode, kind: KeyEventKind) -> event::KeyEvent {
        event::KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    #[test]
    fn test_translate_char() {
        let press = translate_key_event(&key_event(KeyCode::Char('a'), KeyEventKind::Press)).unwrap();
        assert_eq!(press, KeyEvent::press(Key::new('a').unwrap()));

        let release =
            translate_key_event(&key_event(KeyCode::Char('A'), KeyEventKind::Release)).unwrap();
        assert_eq!(release, KeyEvent::release(Key::new('a').unwrap()));

        let repeat = translate_key_event(&key_event(KeyCode::Char(';'), KeyEventKind::Repeat)).unwrap();
        assert_eq!(repeat.action, Action::Repeat);
        assert_eq!(repeat.key(), Key::new(';'));
    }

    #[test]
    fn test_translate_special() {
        let esc = translate_key_event(&key_event(KeyCode::Esc, KeyEventKind::Release)).unwrap();
        assert!(esc.is_release_of(SpecialKey::Escape));

        let space = translate_key_event(&key_event(KeyCode::Char(' '), KeyEventKind::Press)).unwrap();
        assert_eq!(space.input, KeyInput::Special(SpecialKey::Space));

        let f1 = translate_key_event(&key_event(KeyCode::F(1), KeyEventKind::Press)).unwrap();
        assert_eq!(f1.input, KeyInput::Special(SpecialKey::Other));

        assert!(translate_key_event(&key_event(KeyCode::Null, KeyEventKind::Press)).is_none());
    }

    #[test]
    fn test_translate_modifiers() {
        let shift = translate_key_event(&key_event(
            KeyCode::Modifier(ModifierKeyCode::LeftShift),
            KeyEventKind::Press,
        ))
        .unwrap();
        assert_eq!(shift.input, KeyInput::Special(SpecialKey::LeftShift));

        let sup = translate_key_event(&key_event(
            KeyCode::Modifier(ModifierKeyCode::RightSuper),
            KeyEventKind::Release,
        ))
        .unwrap();
        assert_eq!(sup.input, KeyInput::Special(SpecialKey::RightMeta));
    }

    #[test]
    fn test_ctrl_c_is_interrupt() {
        let ctrl_c = event::KeyEvent::new_with_kind(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        );
        assert!(is_interrupt(&ctrl_c));
        assert!(!is_interrupt(&key_event(KeyCode::Char('c'), KeyEventKind::Press)));
    }
}
