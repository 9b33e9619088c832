use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    /// Ctrl+C, honoured on every screen and page.
    ForceQuit,
    Char(char),
    Paste(String), // Bracketed paste
    Enter,
    Backspace,
    Escape,
    Up,
    Down,
    NextField, // Tab
    PrevField, // Shift+Tab
    Resize,
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> io::Result<Option<TuiEvent>> {
    if event::poll(timeout)? {
        Ok(translate(event::read()?))
    } else {
        Ok(None)
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> io::Result<Option<TuiEvent>> {
    poll_event_timeout(Duration::ZERO)
}

/// Waits up to `timeout` for the first event, then drains everything
/// already queued so one redraw covers the whole batch.
pub fn poll_batch(timeout: Duration) -> io::Result<Vec<TuiEvent>> {
    let mut events: Vec<TuiEvent> = poll_event_timeout(timeout)?.into_iter().collect();
    if !events.is_empty() {
        while let Some(event) = poll_event_immediate()? {
            events.push(event);
        }
    }
    Ok(events)
}

fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => {
            // Release/repeat reports arrive with keyboard enhancement enabled
            if key_event.kind != KeyEventKind::Press {
                return None;
            }
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                (_, KeyCode::Char(c)) => Some(TuiEvent::Char(c)),
                (_, KeyCode::Enter) => Some(TuiEvent::Enter),
                (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
                (_, KeyCode::Esc) => Some(TuiEvent::Escape),
                (_, KeyCode::Up) => Some(TuiEvent::Up),
                (_, KeyCode::Down) => Some(TuiEvent::Down),
                (_, KeyCode::Tab) => Some(TuiEvent::NextField),
                (_, KeyCode::BackTab) => Some(TuiEvent::PrevField),
                _ => None,
            }
        }
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}
