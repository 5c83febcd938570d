//! Keybinding system for context-aware keyboard shortcuts
//!
//! One registry per application mode. The same table resolves key presses to
//! actions, fills the navigation bar and builds the help overlay, so the hints
//! on screen can never disagree with what a key actually does.

use crate::app::AppMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    PageUp,
    PageDown,
    Home,
    End,
    Select,
    NextTab,
    PreviousTab,
    SwitchFocus,
    EditAddress,
    TypePincode,
    ClearSelection,
    DetectLocation,
    ConfirmLocation,
    ChooseYes,
    ChooseNo,
    Toggle,
    Confirm,
    Back,
    CycleCategory,
    ChangeLocation,
    FinishInput,
    ClearInput,
    Help,
    Quit,
    QuickExit,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Check a key event against this binding.
    ///
    /// Letters match either case and Shift is ignored for plain bindings,
    /// since terminals disagree on reporting it for symbols like `?`.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let code_matches = match (self.key, event.code) {
            (KeyCode::Char(a), KeyCode::Char(b)) => a.eq_ignore_ascii_case(&b),
            (a, b) => a == b,
        };
        if !code_matches {
            return false;
        }
        if self.modifiers.is_empty() {
            !event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        } else {
            event.modifiers.contains(self.modifiers)
        }
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Mode-specific keybindings
    mode_bindings: HashMap<AppMode, Vec<Keybinding>>,
    /// Global keybindings (available in all modes except text entry)
    global_bindings: Vec<Keybinding>,
    /// Bindings that work even while typing
    always_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            mode_bindings: HashMap::new(),
            global_bindings: Vec::new(),
            always_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    /// Register default keybindings for all modes
    fn register_defaults(&mut self) {
        self.always_bindings = vec![
            Keybinding::with_modifiers(
                KeyCode::Char('x'),
                KeyModifiers::CONTROL,
                KeyAction::QuickExit,
                "Ctrl+X",
                "Quick exit (clears the screen)",
            ),
            Keybinding::new(KeyCode::F(12), KeyAction::QuickExit, "F12", "Quick exit"),
        ];

        self.global_bindings = vec![
            Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
        ];

        // Location
        self.mode_bindings.insert(
            AppMode::Location,
            vec![
                Keybinding::new(KeyCode::Tab, KeyAction::NextTab, "Tab", "Next search mode"),
                Keybinding::new(KeyCode::BackTab, KeyAction::PreviousTab, "S-Tab", "Previous search mode"),
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Navigate up"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Navigate down"),
                Keybinding::new(KeyCode::Left, KeyAction::SwitchFocus, "Left", "Cities list"),
                Keybinding::new(KeyCode::Right, KeyAction::SwitchFocus, "Right", "Region grid"),
                Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Select"),
                Keybinding::new(KeyCode::Char(' '), KeyAction::Select, "Space", "Select"),
                Keybinding::new(KeyCode::Char('e'), KeyAction::EditAddress, "E", "Type an address"),
                Keybinding::new(KeyCode::Char('0'), KeyAction::TypePincode, "0-9", "Type pincode"),
                Keybinding::new(KeyCode::Char('x'), KeyAction::ClearSelection, "X", "Clear selection"),
                Keybinding::new(KeyCode::Char('d'), KeyAction::DetectLocation, "D", "Use my location"),
                Keybinding::new(KeyCode::Char('c'), KeyAction::ConfirmLocation, "C", "Confirm location"),
            ],
        );

        // Address entry
        self.mode_bindings.insert(
            AppMode::AddressInput,
            vec![
                Keybinding::new(KeyCode::Enter, KeyAction::FinishInput, "Enter", "Done"),
                Keybinding::new(KeyCode::Esc, KeyAction::FinishInput, "Esc", "Done"),
                Keybinding::with_modifiers(
                    KeyCode::Char('u'),
                    KeyModifiers::CONTROL,
                    KeyAction::ClearInput,
                    "Ctrl+U",
                    "Clear field",
                ),
            ],
        );

        // Delivery
        self.mode_bindings.insert(
            AppMode::Delivery,
            vec![
                Keybinding::new(KeyCode::Char('y'), KeyAction::ChooseYes, "Y", "Yes, deliver"),
                Keybinding::new(KeyCode::Char('n'), KeyAction::ChooseNo, "N", "No, I can visit"),
                Keybinding::new(KeyCode::Left, KeyAction::Toggle, "Left", "Select yes"),
                Keybinding::new(KeyCode::Right, KeyAction::Toggle, "Right", "Select no"),
                Keybinding::new(KeyCode::Tab, KeyAction::Toggle, "Tab", "Toggle selection"),
                Keybinding::new(KeyCode::Enter, KeyAction::Confirm, "Enter", "Confirm"),
                Keybinding::new(KeyCode::Char('b'), KeyAction::Back, "B", "Back"),
                Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Back"),
            ],
        );

        // Results
        self.mode_bindings.insert(
            AppMode::Results,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous resource"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next resource"),
                Keybinding::new(KeyCode::PageUp, KeyAction::PageUp, "PgUp", "Page up"),
                Keybinding::new(KeyCode::PageDown, KeyAction::PageDown, "PgDn", "Page down"),
                Keybinding::new(KeyCode::Home, KeyAction::Home, "Home", "First resource"),
                Keybinding::new(KeyCode::End, KeyAction::End, "End", "Last resource"),
                Keybinding::new(KeyCode::Char('f'), KeyAction::CycleCategory, "F", "Category filter"),
                Keybinding::new(KeyCode::Tab, KeyAction::CycleCategory, "Tab", "Category filter"),
                Keybinding::new(KeyCode::Char('c'), KeyAction::ChangeLocation, "C", "Change location"),
                Keybinding::new(KeyCode::Char('b'), KeyAction::ChangeLocation, "B", "Change location"),
            ],
        );
    }

    /// Get keybindings for a specific mode (includes global bindings)
    pub fn get_bindings(&self, mode: &AppMode) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();

        if let Some(mode_bindings) = self.mode_bindings.get(mode) {
            bindings.extend(mode_bindings.iter());
        }

        // Plain keys are text while typing an address
        if *mode != AppMode::AddressInput {
            bindings.extend(self.global_bindings.iter());
        }
        bindings.extend(self.always_bindings.iter());

        bindings
    }

    /// Resolve a key press to an action in `mode`
    pub fn action_for(&self, mode: &AppMode, event: &KeyEvent) -> Option<KeyAction> {
        self.get_bindings(mode)
            .into_iter()
            .find(|b| b.action != KeyAction::TypePincode && b.matches(event))
            .map(|b| b.action)
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, mode: &AppMode) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(mode);

        let priority_actions = match mode {
            AppMode::Location => vec![
                KeyAction::NextTab,
                KeyAction::NavigateUp,
                KeyAction::Select,
                KeyAction::DetectLocation,
                KeyAction::ConfirmLocation,
                KeyAction::Help,
                KeyAction::QuickExit,
            ],
            AppMode::AddressInput => vec![
                KeyAction::FinishInput,
                KeyAction::ClearInput,
                KeyAction::QuickExit,
            ],
            AppMode::Delivery => vec![
                KeyAction::ChooseYes,
                KeyAction::ChooseNo,
                KeyAction::Back,
                KeyAction::Help,
                KeyAction::QuickExit,
            ],
            AppMode::Results => vec![
                KeyAction::NavigateUp,
                KeyAction::CycleCategory,
                KeyAction::ChangeLocation,
                KeyAction::Help,
                KeyAction::Quit,
                KeyAction::QuickExit,
            ],
        };

        let mut items: Vec<NavBarItem> = Vec::new();
        for action in priority_actions {
            let Some(binding) = bindings.iter().find(|b| b.action == action) else {
                continue;
            };
            // Up/Down share one item
            if action == KeyAction::NavigateUp {
                items.push(NavBarItem {
                    key_display: "Up/Dn".to_string(),
                    action_label: "Navigate".to_string(),
                });
            } else {
                items.push(NavBarItem {
                    key_display: binding.display.clone(),
                    action_label: binding.description.clone(),
                });
            }
        }

        items
    }

    /// Get full help content for a mode (for help overlay)
    pub fn get_help_content(&self, mode: &AppMode) -> Vec<HelpSection> {
        let groups: [(&str, fn(KeyAction) -> bool); 3] = [
            ("Navigation", |a| {
                matches!(
                    a,
                    KeyAction::NavigateUp
                        | KeyAction::NavigateDown
                        | KeyAction::PageUp
                        | KeyAction::PageDown
                        | KeyAction::Home
                        | KeyAction::End
                        | KeyAction::NextTab
                        | KeyAction::PreviousTab
                        | KeyAction::SwitchFocus
                )
            }),
            ("Actions", |a| {
                !matches!(
                    a,
                    KeyAction::NavigateUp
                        | KeyAction::NavigateDown
                        | KeyAction::PageUp
                        | KeyAction::PageDown
                        | KeyAction::Home
                        | KeyAction::End
                        | KeyAction::NextTab
                        | KeyAction::PreviousTab
                        | KeyAction::SwitchFocus
                        | KeyAction::Help
                        | KeyAction::Quit
                        | KeyAction::QuickExit
                )
            }),
            ("General", |a| {
                matches!(a, KeyAction::Help | KeyAction::Quit | KeyAction::QuickExit)
            }),
        ];

        let bindings = self.get_bindings(mode);
        groups
            .iter()
            .filter_map(|(title, belongs)| {
                let items: Vec<(String, String)> = bindings
                    .iter()
                    .filter(|b| belongs(b.action))
                    .map(|b| (b.display.clone(), b.description.clone()))
                    .collect();
                (!items.is_empty()).then(|| HelpSection {
                    title: title.to_string(),
                    items,
                })
            })
            .collect()
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_every_mode_has_bindings() {
        let ctx = KeybindingContext::new();
        for mode in AppMode::all() {
            assert!(!ctx.get_nav_items(mode).is_empty(), "{:?} has no nav items", mode);
            assert!(!ctx.get_help_content(mode).is_empty(), "{:?} has no help", mode);
        }
    }

    #[test]
    fn test_quick_exit_everywhere() {
        let ctx = KeybindingContext::new();
        let ctrl_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
        for mode in AppMode::all() {
            assert_eq!(ctx.action_for(mode, &ctrl_x), Some(KeyAction::QuickExit));
            assert_eq!(ctx.action_for(mode, &key(KeyCode::F(12))), Some(KeyAction::QuickExit));
        }
    }

    #[test]
    fn test_plain_x_is_not_quick_exit() {
        let ctx = KeybindingContext::new();
        assert_eq!(
            ctx.action_for(&AppMode::Location, &key(KeyCode::Char('x'))),
            Some(KeyAction::ClearSelection)
        );
    }

    #[test]
    fn test_quit_not_available_while_typing() {
        let ctx = KeybindingContext::new();
        assert_eq!(ctx.action_for(&AppMode::AddressInput, &key(KeyCode::Char('q'))), None);
        assert_eq!(
            ctx.action_for(&AppMode::Results, &key(KeyCode::Char('q'))),
            Some(KeyAction::Quit)
        );
    }

    #[test]
    fn test_letters_match_either_case() {
        let ctx = KeybindingContext::new();
        let upper_y = KeyEvent::new(KeyCode::Char('Y'), KeyModifiers::SHIFT);
        assert_eq!(ctx.action_for(&AppMode::Delivery, &upper_y), Some(KeyAction::ChooseYes));
    }

    #[test]
    fn test_pincode_hint_does_not_resolve() {
        let ctx = KeybindingContext::new();
        assert_eq!(ctx.action_for(&AppMode::Location, &key(KeyCode::Char('0'))), None);
    }
}
