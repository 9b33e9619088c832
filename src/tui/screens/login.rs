//! Email/password login. Credentials are not checked: submitting always
//! logs in.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::ScreenView;
use crate::core::action::Intent;
use crate::core::form::Form;
use crate::core::navigator::Dispatch;
use crate::core::screen::Screen;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::{FormEvent, FormView};
use crate::tui::event::TuiEvent;

const EMAIL: &str = "Email Address";
const PASSWORD: &str = "Password";

pub struct LoginScreen {
    form: Form,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            form: Form::new(&[EMAIL, PASSWORD]),
        }
    }
}

impl Component for LoginScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [header, body] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

        let welcome = vec![
            Line::from(Span::styled(
                "Welcome",
                Style::new().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from("Log in to access your itinerary."),
        ];
        frame.render_widget(Paragraph::new(welcome), header);

        FormView {
            title: "Log in",
            form: &self.form,
            masked: &[PASSWORD],
        }
        .render(frame, body);
    }
}

impl ScreenView for LoginScreen {
    fn screen(&self) -> Screen {
        Screen::Login
    }

    fn intents(&self) -> Vec<Intent> {
        vec![Intent::LogIn]
    }

    fn hints(&self) -> Vec<String> {
        vec!["Tab next field".to_string(), "Enter Log In".to_string()]
    }

    fn handle_event(&mut self, event: &TuiEvent, dispatch: &Dispatch) {
        if self.form.handle_event(event) == Some(FormEvent::Submit) {
            dispatch.intent(Intent::LogIn);
        }
    }

    fn on_enter(&mut self) {
        self.form.set(PASSWORD, "");
        self.form.focus = 0;
    }
}
