//! # TabBar Component
//!
//! Bottom navigation for the app's four main sections. Purely
//! presentational: the active tab comes in as a prop, and the number keys
//! that select a tab are mapped by [`tab_for_key`].

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::screen::Tab;
use crate::tui::component::Component;

pub struct TabBar {
    pub active: Tab,
}

/// `1`..`4` select the tabs in display order.
pub fn tab_for_key(c: char) -> Option<Tab> {
    let index = c.to_digit(10)?.checked_sub(1)?;
    Tab::ALL.get(index as usize).copied()
}

impl Component for TabBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        for (i, tab) in Tab::ALL.iter().enumerate() {
            let style = if *tab == self.active {
                Style::new()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::new().fg(Color::DarkGray)
            };
            spans.push(Span::styled(format!(" {} {} ", i + 1, tab.label()), style));
            spans.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
