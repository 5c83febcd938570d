//! Application state definitions
//!
//! Screen-level state that is not part of the search itself: which list row
//! is highlighted, which button has focus, whether help is open. The search
//! criteria and wizard step live in [`crate::session::Session`].

use crate::wizard_state::WizardStep;

/// Application operating modes (one per keybinding set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppMode {
    /// Location step: tabs, lists, pincode digits
    Location,
    /// Location step with the address field capturing keys
    AddressInput,
    /// Delivery question
    Delivery,
    /// Resource list
    Results,
}

impl AppMode {
    /// Mode for a wizard step; `editing` only matters on the location step
    pub fn for_step(step: WizardStep, editing: bool) -> Self {
        match step {
            WizardStep::Location if editing => Self::AddressInput,
            WizardStep::Location => Self::Location,
            WizardStep::Delivery => Self::Delivery,
            WizardStep::Results => Self::Results,
        }
    }

    /// Name shown in the help overlay
    pub fn label(self) -> &'static str {
        match self {
            Self::Location => "Location",
            Self::AddressInput => "Address Entry",
            Self::Delivery => "Delivery",
            Self::Results => "Resources",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Location, Self::AddressInput, Self::Delivery, Self::Results]
    }
}

/// Which list has focus on the region-map tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationFocus {
    #[default]
    Cities,
    Regions,
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current application mode
    pub mode: AppMode,
    /// Status message for user feedback
    pub status_message: String,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Highlighted row in the city list
    pub city_cursor: usize,
    /// Highlighted cell in the region grid
    pub region_cursor: usize,
    /// Focused list on the region-map tab
    pub location_focus: LocationFocus,
    /// Highlighted delivery button (true = yes)
    pub delivery_cursor: bool,
    /// Highlighted resource card
    pub result_cursor: usize,
}

impl AppState {
    pub fn select_previous_result(&mut self, by: usize) {
        self.result_cursor = self.result_cursor.saturating_sub(by);
    }

    pub fn select_next_result(&mut self, by: usize, count: usize) {
        if count > 0 {
            self.result_cursor = (self.result_cursor + by).min(count - 1);
        }
    }

    /// Keep the card cursor inside a list of `count` cards
    pub fn clamp_result_cursor(&mut self, count: usize) {
        self.result_cursor = self.result_cursor.min(count.saturating_sub(1));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Location,
            status_message: "Choose how to describe your location".to_string(),
            help_visible: false,
            city_cursor: 0,
            region_cursor: 0,
            location_focus: LocationFocus::Cities,
            delivery_cursor: false,
            result_cursor: 0,
        }
    }
}

/// Move a list cursor by `delta` within `len` items, stopping at the ends
pub fn step_cursor(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let target = cursor.saturating_add_signed(delta);
    target.min(len - 1)
}
