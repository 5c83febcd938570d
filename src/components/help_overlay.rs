//! Help overlay component
//!
//! Context-sensitive help drawn as a centered popup over the current screen.

use super::keybindings::{HelpSection, KeybindingContext};
use crate::app::AppMode;
use crate::theme::{Colors, Styles, UiConstants, UiText};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Help overlay component
pub struct HelpOverlay {
    content: Vec<Line<'static>>,
}

impl HelpOverlay {
    /// Create a new help overlay for the given mode
    pub fn new(mode: &AppMode, keybinding_ctx: &KeybindingContext) -> Self {
        let sections = keybinding_ctx.get_help_content(mode);
        Self {
            content: Self::build_content(&sections, mode),
        }
    }

    fn build_content(sections: &[HelpSection], mode: &AppMode) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();

        lines.push(Line::from(vec![Span::styled(
            format!("  {} Help  ", UiText::APP_TITLE),
            Styles::title(),
        )]));
        lines.push(Line::from(""));

        lines.push(Line::from(vec![
            Span::styled("Current: ", Styles::text_muted()),
            Span::styled(mode.label(), Style::default().fg(Colors::SECONDARY)),
        ]));
        lines.push(Line::from(""));

        for section in sections {
            lines.push(Line::from(vec![Span::styled(
                format!("  {}  ", section.title),
                Styles::chosen(),
            )]));

            for (key, description) in &section.items {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(format!("{:<10}", key), Styles::key_hint()),
                    Span::styled(description.clone(), Styles::text()),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines
    }

    /// Lines of the overlay body, for tests and plain-text output
    pub fn lines(&self) -> &[Line<'static>] {
        &self.content
    }

    /// Render the help overlay
    pub fn render(&self, f: &mut Frame, parent: Rect) {
        let area = centered_rect(
            UiConstants::HELP_WIDTH_PCT,
            UiConstants::HELP_HEIGHT_PCT,
            parent,
        );
        f.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .title_bottom(Line::from(" Press ? or Esc to close ").alignment(Alignment::Center))
            .border_style(Styles::border_active())
            .style(Style::default().bg(Colors::BG_PRIMARY));

        let body = Paragraph::new(self.content.clone())
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(body, area);
    }
}

/// Rectangle of `percent_x` by `percent_y` of `parent`, centered, never smaller
/// than the help minimums (nor larger than the parent).
pub fn centered_rect(percent_x: u16, percent_y: u16, parent: Rect) -> Rect {
    let width = (parent.width * percent_x / 100)
        .max(UiConstants::HELP_MIN_WIDTH)
        .min(parent.width);
    let height = (parent.height * percent_y / 100)
        .max(UiConstants::HELP_MIN_HEIGHT)
        .min(parent.height);
    Rect {
        x: parent.x + (parent.width - width) / 2,
        y: parent.y + (parent.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_parent() {
        let parent = Rect::new(0, 0, 100, 40);
        let area = centered_rect(60, 70, parent);
        assert_eq!(area.width, 60);
        assert_eq!(area.height, 28);
        assert_eq!(area.x, 20);
        assert_eq!(area.y, 6);

        let tiny = Rect::new(0, 0, 20, 5);
        let area = centered_rect(60, 70, tiny);
        assert_eq!(area, tiny);
    }

    #[test]
    fn test_help_lists_quick_exit() {
        let ctx = KeybindingContext::new();
        let overlay = HelpOverlay::new(&AppMode::Results, &ctx);
        let text: String = overlay
            .lines()
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        assert!(text.contains("Ctrl+X"));
        assert!(text.contains("Change location"));
    }
}
