//! Bottom navigation bar listing the keys that work on the current screen

use super::keybindings::NavBarItem;
use crate::theme::Styles;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub struct NavBar {
    items: Vec<NavBarItem>,
}

impl NavBar {
    pub fn new(items: Vec<NavBarItem>) -> Self {
        Self { items }
    }

    fn line(&self) -> Line<'static> {
        let mut spans = Vec::with_capacity(self.items.len() * 3);
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", Styles::nav_hint()));
            }
            spans.push(Span::styled(format!("[{}]", item.key_display), Styles::key_hint()));
            spans.push(Span::styled(format!(" {}", item.action_label), Styles::nav_hint()));
        }
        Line::from(spans)
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        let bar = Paragraph::new(self.line()).alignment(Alignment::Center);
        f.render_widget(bar, area);
    }
}
