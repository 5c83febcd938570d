//! User interface rendering module
//!
//! - `header` - title, progress tracker, privacy notice, status and nav bars
//! - `screens` - one screen per wizard step

mod header;
pub mod screens;

use crate::app::AppState;
use crate::components::keybindings::KeybindingContext;
use crate::session::Session;
use crate::theme::UiConstants;
use crate::wizard_state::WizardStep;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

pub use header::{progress_tracker, HeaderRenderer};

/// UI renderer for the application
///
/// Lays out the frame and delegates each region to a submodule.
pub struct UiRenderer {
    header: HeaderRenderer,
}

impl Default for UiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl UiRenderer {
    pub fn new() -> Self {
        Self {
            header: HeaderRenderer::new(),
        }
    }

    /// Render the complete UI for the current session
    pub fn render(
        &self,
        f: &mut Frame,
        session: &Session,
        state: &AppState,
        keybinding_ctx: &KeybindingContext,
    ) {
        let step = session.step();
        // The privacy notice belongs to the location step only
        let privacy_height = if step == WizardStep::Location {
            UiConstants::PRIVACY_HEIGHT
        } else {
            0
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(UiConstants::HEADER_HEIGHT),
                Constraint::Min(1), // Main content area
                Constraint::Length(privacy_height),
                Constraint::Length(UiConstants::STATUS_BAR_HEIGHT),
                Constraint::Length(UiConstants::NAV_BAR_HEIGHT),
            ])
            .split(f.area());

        self.header.render_header(f, chunks[0], step);
        self.render_content(f, chunks[1], session, state);

        if privacy_height > 0 {
            header::render_privacy_notice(f, chunks[2]);
        }
        header::render_status_bar(f, chunks[3], &state.status_message, session.notice());
        header::render_nav_bar(f, state.mode, keybinding_ctx, chunks[4]);

        // Help overlay goes on top of everything
        if state.help_visible {
            header::render_help_overlay(f, state.mode, keybinding_ctx);
        }
    }

    fn render_content(&self, f: &mut Frame, area: Rect, session: &Session, state: &AppState) {
        match session.step() {
            WizardStep::Location => screens::render_location_screen(f, area, session, state),
            WizardStep::Delivery => screens::render_delivery_screen(f, area, session, state),
            WizardStep::Results => screens::render_results_screen(f, area, session, state),
        }
    }
}
