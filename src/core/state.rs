//! # Navigation State
//!
//! ```text
//! NavState
//! ├── screen: Screen   // what is rendered
//! └── tab: Tab         // which bottom-nav section is highlighted
//! ```
//!
//! State changes only happen through `reduce(state, action)` in action.rs.
//! The struct is `Copy`, so every transition produces a fresh value and
//! nothing is mutated in place.

use crate::core::screen::{Screen, Tab};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavState {
    pub screen: Screen,
    pub tab: Tab,
}

impl Default for NavState {
    fn default() -> Self {
        Self {
            screen: Screen::Splash,
            tab: Tab::Explore,
        }
    }
}
