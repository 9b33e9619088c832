//! # Form Component
//!
//! Renders a `core::form::Form` as a column of labelled single-line inputs
//! and turns key presses into edits on it.
//!
//! Used by the dashboard editors and by the app's login screen.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::core::form::Form;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// What the user asked the form to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Submit,
    Cancel,
}

impl EventHandler for Form {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FormEvent> {
        match event {
            TuiEvent::Enter => return Some(FormEvent::Submit),
            TuiEvent::Escape => return Some(FormEvent::Cancel),
            TuiEvent::Char(c) => self.push_char(*c),
            // Fields are single-line
            TuiEvent::Paste(text) => text
                .chars()
                .filter(|c| !c.is_control())
                .for_each(|c| self.push_char(c)),
            TuiEvent::Backspace => self.backspace(),
            TuiEvent::NextField | TuiEvent::Down => self.focus_next(),
            TuiEvent::PrevField | TuiEvent::Up => self.focus_prev(),
            TuiEvent::ForceQuit | TuiEvent::Resize => {}
        }
        None
    }
}

/// Props for rendering a form.
pub struct FormView<'a> {
    pub title: &'a str,
    pub form: &'a Form,
    /// Labels whose values are drawn as bullets.
    pub masked: &'a [&'a str],
}

impl Component for FormView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let label_width = self
            .form
            .fields
            .iter()
            .map(|field| field.label.len())
            .max()
            .unwrap_or(0);

        let lines: Vec<Line> = self
            .form
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let focused = i == self.form.focus;
                let value = if self.masked.contains(&field.label) {
                    "•".repeat(field.value.chars().count())
                } else {
                    field.value.clone()
                };
                let marker = if focused { "> " } else { "  " };
                let value_style = if focused {
                    Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::new()
                };
                let cursor = if focused { "_" } else { "" };
                Line::from(vec![
                    Span::raw(marker),
                    Span::styled(
                        format!("{:<width$} : ", field.label, width = label_width),
                        Style::new().fg(Color::Cyan),
                    ),
                    Span::styled(format!("{value}{cursor}"), value_style),
                ])
            })
            .collect();

        let block = Block::bordered().title(format!(" {} ", self.title));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
