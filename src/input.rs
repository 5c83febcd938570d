//! Text input handling
//!
//! Editing is stateless: a [`TextInput`] takes the current value (owned by the
//! search criteria) and a key, and reports the edited value. The criteria stay
//! the single source of truth for what the user typed.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::criteria::POSTAL_CODE_LEN;

/// Longest free-form address accepted from the keyboard
pub const MAX_ADDRESS_CHARS: usize = 120;

/// Characters a field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharFilter {
    /// Any printable character
    Any,
    /// ASCII digits only
    Digits,
}

impl CharFilter {
    fn accepts(self, c: char) -> bool {
        match self {
            Self::Any => !c.is_control(),
            Self::Digits => c.is_ascii_digit(),
        }
    }
}

/// Result of feeding one key to a text input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    /// The value changed
    Changed(String),
    /// User finished editing (Enter)
    Confirm,
    /// User left the field (Esc)
    Cancel,
    /// Key not handled by the field
    Ignored,
}

/// Single-line text field editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextInput {
    filter: CharFilter,
    max_chars: usize,
}

impl TextInput {
    pub const fn new(filter: CharFilter, max_chars: usize) -> Self {
        Self { filter, max_chars }
    }

    /// Free-form address field
    pub const fn address() -> Self {
        Self::new(CharFilter::Any, MAX_ADDRESS_CHARS)
    }

    /// Digits-only pincode field
    pub const fn pincode() -> Self {
        Self::new(CharFilter::Digits, POSTAL_CODE_LEN)
    }

    /// Apply a key to `current`.
    ///
    /// Characters the filter rejects, and characters past the length limit,
    /// are swallowed (`Ignored`) rather than inserted.
    pub fn handle_key(&self, current: &str, key: KeyEvent) -> InputResult {
        match key.code {
            KeyCode::Enter => InputResult::Confirm,
            KeyCode::Esc => InputResult::Cancel,
            KeyCode::Backspace => {
                let mut value = current.to_string();
                if value.pop().is_some() {
                    InputResult::Changed(value)
                } else {
                    InputResult::Ignored
                }
            }
            // Ctrl+U clears the field, like a shell prompt
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if current.is_empty() {
                    InputResult::Ignored
                } else {
                    InputResult::Changed(String::new())
                }
            }
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                InputResult::Ignored
            }
            KeyCode::Char(c) => {
                if !self.filter.accepts(c) || current.chars().count() >= self.max_chars {
                    return InputResult::Ignored;
                }
                let mut value = current.to_string();
                value.push(c);
                InputResult::Changed(value)
            }
            _ => InputResult::Ignored,
        }
    }

    /// Whether `key` is one this field would insert, used to route digits
    /// straight into the pincode field.
    pub fn accepts_key(&self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) => {
                !key.modifiers.contains(KeyModifiers::CONTROL) && self.filter.accepts(c)
            }
            KeyCode::Backspace => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_and_backspace() {
        let input = TextInput::address();
        assert_eq!(
            input.handle_key("Vash", key(KeyCode::Char('i'))),
            InputResult::Changed("Vashi".to_string())
        );
        assert_eq!(
            input.handle_key("Vashi", key(KeyCode::Backspace)),
            InputResult::Changed("Vash".to_string())
        );
        assert_eq!(input.handle_key("", key(KeyCode::Backspace)), InputResult::Ignored);
    }

    #[test]
    fn test_pincode_rejects_letters_and_overflow() {
        let input = TextInput::pincode();
        assert_eq!(input.handle_key("40", key(KeyCode::Char('A'))), InputResult::Ignored);
        assert_eq!(input.handle_key("400001", key(KeyCode::Char('9'))), InputResult::Ignored);
        assert_eq!(
            input.handle_key("40000", key(KeyCode::Char('1'))),
            InputResult::Changed("400001".to_string())
        );
    }

    #[test]
    fn test_enter_and_esc() {
        let input = TextInput::address();
        assert_eq!(input.handle_key("x", key(KeyCode::Enter)), InputResult::Confirm);
        assert_eq!(input.handle_key("x", key(KeyCode::Esc)), InputResult::Cancel);
    }

    #[test]
    fn test_ctrl_u_clears() {
        let input = TextInput::address();
        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(
            input.handle_key("Sector 17", ctrl_u),
            InputResult::Changed(String::new())
        );
        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(input.handle_key("Sector 17", ctrl_a), InputResult::Ignored);
    }

    #[test]
    fn test_accepts_key_routing() {
        let pincode = TextInput::pincode();
        assert!(pincode.accepts_key(&key(KeyCode::Char('4'))));
        assert!(pincode.accepts_key(&key(KeyCode::Backspace)));
        assert!(!pincode.accepts_key(&key(KeyCode::Char('q'))));
    }
}
