//! # App Screens
//!
//! One view per `Screen`, looked up through a [`ScreenRegistry`].
//!
//! Views never change the screen themselves. Each one receives the shared
//! [`Dispatch`] handle and emits `Intent`s; `core::action::route` decides
//! where an intent leads.
//!
//! ```text
//! key press → view.handle_event(event, &dispatch) → Intent
//!                                                    │
//!                     Navigator::apply ◄── NavAction ┘
//! ```

mod explore;
mod info;
mod login;

use log::error;
use std::collections::HashMap;

use crate::core::action::Intent;
use crate::core::navigator::Dispatch;
use crate::core::screen::{NavError, Screen};
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

pub use explore::ExploreScreen;
pub use info::{Choice, InfoScreen};
pub use login::LoginScreen;

/// A rendered screen of the mobile app.
pub trait ScreenView: Component {
    /// The screen this view draws.
    fn screen(&self) -> Screen;

    /// Every intent this view can emit.
    fn intents(&self) -> Vec<Intent>;

    /// Footer hints, e.g. `"Enter open"`.
    fn hints(&self) -> Vec<String>;

    fn handle_event(&mut self, event: &TuiEvent, dispatch: &Dispatch);

    /// Called each time the screen becomes current.
    fn on_enter(&mut self) {}
}

pub struct ScreenRegistry {
    views: HashMap<Screen, Box<dyn ScreenView>>,
}

impl ScreenRegistry {
    pub fn empty() -> Self {
        Self {
            views: HashMap::new(),
        }
    }

    /// Registers `view` under its own screen, replacing any previous view.
    pub fn register(&mut self, view: Box<dyn ScreenView>) {
        self.views.insert(view.screen(), view);
    }

    /// A registry with a view for every screen.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(LoginScreen::new()));
        registry.register(Box::new(ExploreScreen::new()));
        for view in info::standard_screens() {
            registry.register(Box::new(view));
        }
        registry
    }

    pub fn view_mut(&mut self, screen: Screen) -> Result<&mut dyn ScreenView, NavError> {
        match self.views.get_mut(&screen) {
            Some(view) => Ok(view.as_mut()),
            None => {
                error!("No view registered for screen {}", screen);
                Err(NavError::InvalidState(format!(
                    "no view registered for screen '{screen}'"
                )))
            }
        }
    }
}
