//! Featured trips list. Every trip opens the same package details screen.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState};

use super::ScreenView;
use crate::core::action::Intent;
use crate::core::navigator::Dispatch;
use crate::core::screen::Screen;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

struct Trip {
    title: &'static str,
    meta: &'static str,
    price: &'static str,
}

const TRIPS: [Trip; 3] = [
    Trip {
        title: "Ultimate Skye Adventure",
        meta: "Oct 12 - Oct 17  ·  5 Days",
        price: "$1,499",
    },
    Trip {
        title: "Highlands Explorer",
        meta: "7 Days  ·  4.9 (128 reviews)",
        price: "$1,450",
    },
    Trip {
        title: "Highlands & Islands Explorer",
        meta: "Oct 12 - Oct 19  ·  7 Days",
        price: "$1,580",
    },
];

pub struct ExploreScreen {
    list_state: ListState,
}

impl ExploreScreen {
    pub fn new() -> Self {
        Self {
            list_state: ListState::default().with_selected(Some(0)),
        }
    }

    fn selected(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }
}

impl Component for ExploreScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = TRIPS
            .iter()
            .map(|trip| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        trip.title,
                        Style::new().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(format!("{}  ·  {} per person", trip.meta, trip.price)),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(Block::bordered().title(" Featured Experiences "))
            .highlight_style(Style::new().fg(Color::Yellow))
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

impl ScreenView for ExploreScreen {
    fn screen(&self) -> Screen {
        Screen::Explore
    }

    fn intents(&self) -> Vec<Intent> {
        vec![Intent::OpenTrip]
    }

    fn hints(&self) -> Vec<String> {
        vec!["↑↓ select".to_string(), "Enter open trip".to_string()]
    }

    fn handle_event(&mut self, event: &TuiEvent, dispatch: &Dispatch) {
        match event {
            TuiEvent::Up => self.list_state.select(Some(self.selected().saturating_sub(1))),
            TuiEvent::Down => {
                let next = (self.selected() + 1).min(TRIPS.len() - 1);
                self.list_state.select(Some(next));
            }
            TuiEvent::Enter => dispatch.intent(Intent::OpenTrip),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_selection_is_clamped() {
        let (tx, rx) = mpsc::channel();
        let dispatch = Dispatch::new(tx);
        let mut view = ExploreScreen::new();

        view.handle_event(&TuiEvent::Up, &dispatch);
        assert_eq!(view.selected(), 0);
        for _ in 0..10 {
            view.handle_event(&TuiEvent::Down, &dispatch);
        }
        assert_eq!(view.selected(), TRIPS.len() - 1);
        assert!(rx.try_recv().is_err());
    }
}
