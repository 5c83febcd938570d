//! Centralized theme and styling for the TUI
//!
//! Single source of truth for colors, styles and user-facing strings, so the
//! screens never hardcode a color.
//!
//! # Usage
//! ```rust
//! use sakhimap::theme::{Colors, Styles};
//! use ratatui::style::Style;
//!
//! let style = Style::default().fg(Colors::PRIMARY);
//! let title_style = Styles::title();
//! ```

use ratatui::style::{Color, Modifier, Style};

use crate::types::ResourceCategory;

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette for the application
pub struct Colors;

impl Colors {
    // -------------------------------------------------------------------------
    // Base Colors
    // -------------------------------------------------------------------------

    /// Primary dark background for popups
    pub const BG_PRIMARY: Color = Color::Rgb(20, 20, 30);

    /// Default foreground text color
    pub const FG_PRIMARY: Color = Color::White;

    /// Secondary text color
    pub const FG_SECONDARY: Color = Color::Gray;

    /// Disabled/inactive text color
    pub const FG_MUTED: Color = Color::DarkGray;

    // -------------------------------------------------------------------------
    // Accent Colors
    // -------------------------------------------------------------------------

    /// Primary accent (rose, matching the quick exit button)
    pub const PRIMARY: Color = Color::LightMagenta;

    /// Secondary accent for selections
    pub const SECONDARY: Color = Color::Yellow;

    // -------------------------------------------------------------------------
    // Semantic Colors
    // -------------------------------------------------------------------------

    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;
    pub const INFO: Color = Color::LightBlue;

    /// Privacy notice accent
    pub const PRIVACY: Color = Color::LightGreen;

    // -------------------------------------------------------------------------
    // UI Element Colors
    // -------------------------------------------------------------------------

    pub const BORDER_ACTIVE: Color = Color::LightMagenta;
    pub const BORDER_INACTIVE: Color = Color::DarkGray;
    pub const SELECTED_BG: Color = Color::LightMagenta;
    pub const SELECTED_FG: Color = Color::Black;
    pub const NAV_HINT: Color = Color::DarkGray;

    // -------------------------------------------------------------------------
    // Progress Tracker Colors
    // -------------------------------------------------------------------------

    pub const STEP_ACTIVE: Color = Color::LightMagenta;
    pub const STEP_COMPLETE: Color = Color::Green;
    pub const STEP_PENDING: Color = Color::DarkGray;

    // -------------------------------------------------------------------------
    // Category Colors
    // -------------------------------------------------------------------------

    pub const CATEGORY_GOVERNMENT: Color = Color::LightBlue;
    pub const CATEGORY_NGO: Color = Color::LightMagenta;
    pub const CATEGORY_COMMUNITY: Color = Color::LightYellow;
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

/// Pre-built styles for common UI patterns
pub struct Styles;

impl Styles {
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    pub fn text_secondary() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    pub fn text_bold() -> Style {
        Style::default()
            .fg(Colors::FG_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Main title style
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_active() -> Style {
        Style::default().fg(Colors::BORDER_ACTIVE)
    }

    pub fn border_inactive() -> Style {
        Style::default().fg(Colors::BORDER_INACTIVE)
    }

    /// Highlighted row or chip
    pub fn selected() -> Style {
        Style::default()
            .fg(Colors::SELECTED_FG)
            .bg(Colors::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Value that has been chosen (but is not under the cursor)
    pub fn chosen() -> Style {
        Style::default()
            .fg(Colors::SUCCESS)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Colors::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Colors::WARNING)
    }

    pub fn error() -> Style {
        Style::default().fg(Colors::ERROR)
    }

    pub fn info() -> Style {
        Style::default().fg(Colors::INFO)
    }

    /// Active button
    pub fn button_active() -> Style {
        Style::default()
            .fg(Colors::SELECTED_FG)
            .bg(Colors::FG_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn button_inactive() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    /// Button that cannot be pressed yet
    pub fn button_disabled() -> Style {
        Style::default()
            .fg(Colors::FG_MUTED)
            .add_modifier(Modifier::DIM)
    }

    pub fn nav_hint() -> Style {
        Style::default().fg(Colors::NAV_HINT)
    }

    /// Key label in the nav bar and help overlay
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }
}

// =============================================================================
// THEME CONTEXT
// =============================================================================

/// Semantic style lookups
pub struct Theme;

impl Theme {
    /// Style for a progress tracker step
    pub fn step_style(completed: bool, active: bool) -> Style {
        if active {
            Style::default()
                .fg(Colors::STEP_ACTIVE)
                .add_modifier(Modifier::BOLD)
        } else if completed {
            Style::default().fg(Colors::STEP_COMPLETE)
        } else {
            Style::default().fg(Colors::STEP_PENDING)
        }
    }

    /// Accent color for a resource category tag
    pub fn category_color(category: ResourceCategory) -> Color {
        match category {
            ResourceCategory::Government => Colors::CATEGORY_GOVERNMENT,
            ResourceCategory::Ngo => Colors::CATEGORY_NGO,
            ResourceCategory::Community => Colors::CATEGORY_COMMUNITY,
        }
    }
}

// =============================================================================
// UI CONSTANTS
// =============================================================================

/// UI dimension constants
pub struct UiConstants;

impl UiConstants {
    pub const HELP_WIDTH_PCT: u16 = 60;
    pub const HELP_HEIGHT_PCT: u16 = 70;
    pub const HELP_MIN_WIDTH: u16 = 44;
    pub const HELP_MIN_HEIGHT: u16 = 12;

    pub const NAV_BAR_HEIGHT: u16 = 1;
    pub const STATUS_BAR_HEIGHT: u16 = 1;

    /// Title line plus progress tracker
    pub const HEADER_HEIGHT: u16 = 4;

    pub const PRIVACY_HEIGHT: u16 = 3;

    /// Scroll page size (cards)
    pub const PAGE_SCROLL_SIZE: usize = 5;
}

// =============================================================================
// TEXT CONSTANTS
// =============================================================================

/// Common UI text strings
pub struct UiText;

impl UiText {
    pub const APP_TITLE: &'static str = "SakhiMap";
    pub const TAGLINE: &'static str = "Find free food, sanitary and support resources near you";

    pub const PRIVACY_TITLE: &'static str = "Privacy-First Guarantee";
    pub const PRIVACY_BODY: &'static str = "SakhiMap does not track your location automatically \
        or require an account. Nothing you enter is stored; all search data is cleared when you exit.";

    pub const BTN_CONFIRM_LOCATION: &'static str = "[ Confirm Location ]";
    pub const BTN_DETECT: &'static str = "[ Use my location ]";
    pub const BTN_YES: &'static str = "[ Yes, deliver to me ]";
    pub const BTN_NO: &'static str = "[ No, I can visit ]";

    pub const DETECTING: &'static str = "Detecting location...";
    pub const NO_RESULTS: &'static str = "No locations found";
    pub const NO_RESULTS_HINT: &'static str =
        "Try another category or change your location to widen the search.";
    pub const DELIVERY_BANNER: &'static str = "Delivery Enabled: showing only points that deliver";
    pub const ADDRESS_PLACEHOLDER: &'static str = "Type an area, street or landmark";
    pub const PINCODE_PLACEHOLDER: &'static str = "6-digit pincode";
}
