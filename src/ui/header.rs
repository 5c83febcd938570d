//! Header and common widget rendering
//!
//! Title, progress tracker, privacy notice, status line, navigation bar and
//! the help overlay hook.

use crate::app::AppMode;
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::KeybindingContext;
use crate::components::nav_bar::NavBar;
use crate::theme::{Colors, Styles, Theme, UiText};
use crate::wizard_state::WizardStep;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Header renderer: app title plus the three-step progress tracker
#[derive(Default)]
pub struct HeaderRenderer;

impl HeaderRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render title and progress tracker for `step`
    pub fn render_header(&self, f: &mut Frame, area: Rect, step: WizardStep) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let lines = vec![
            Line::from(vec![
                Span::styled(UiText::APP_TITLE, Styles::title()),
                Span::styled("  ", Styles::text_muted()),
                Span::styled(UiText::TAGLINE, Styles::text_secondary()),
            ]),
            Line::from(""),
            progress_tracker(step),
        ];

        let header = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Styles::border_inactive()),
            )
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }
}

/// `● 1. Location ─── ○ 2. Delivery ─── ○ 3. Resources`
pub fn progress_tracker(current: WizardStep) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, step) in WizardStep::all_steps().iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" ─── ", Styles::text_muted()));
        }
        let completed = step.order() < current.order();
        let active = *step == current;
        let marker = if completed {
            "✓"
        } else if active {
            "●"
        } else {
            "○"
        };
        spans.push(Span::styled(
            format!("{} {}", marker, step),
            Theme::step_style(completed, active),
        ));
    }
    Line::from(spans)
}

/// Render the privacy guarantee box
pub fn render_privacy_notice(f: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let notice = Paragraph::new(vec![Line::from(vec![
        Span::styled(
            format!("{}: ", UiText::PRIVACY_TITLE),
            Style::default()
                .fg(Colors::PRIVACY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(UiText::PRIVACY_BODY, Style::default().fg(Colors::PRIVACY)),
    ])])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Colors::PRIVACY)),
    )
    .wrap(Wrap { trim: true });
    f.render_widget(notice, area);
}

/// Render the status line. A notice (e.g. failed detection) wins over the
/// regular status message.
pub fn render_status_bar(f: &mut Frame, area: Rect, status: &str, notice: Option<&str>) {
    let line = match notice {
        Some(notice) => Line::from(vec![
            Span::styled(" ! ", Styles::error().add_modifier(Modifier::BOLD)),
            Span::styled(notice.to_string(), Styles::error()),
        ]),
        None => Line::from(Span::styled(format!(" {}", status), Styles::info())),
    };
    f.render_widget(Paragraph::new(line), area);
}

/// Render the navigation bar
pub fn render_nav_bar(f: &mut Frame, mode: AppMode, keybinding_ctx: &KeybindingContext, area: Rect) {
    let nav_items = keybinding_ctx.get_nav_items(&mode);
    NavBar::new(nav_items).render(f, area);
}

/// Render the help overlay
pub fn render_help_overlay(f: &mut Frame, mode: AppMode, keybinding_ctx: &KeybindingContext) {
    let help_overlay = HelpOverlay::new(&mode, keybinding_ctx);
    let area = f.area();
    help_overlay.render(f, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_progress_tracker_markers() {
        assert_eq!(
            text(&progress_tracker(WizardStep::Delivery)),
            "✓ 1. Location ─── ● 2. Delivery ─── ○ 3. Resources"
        );
        assert!(text(&progress_tracker(WizardStep::Location)).starts_with("● 1. Location"));
    }
}
