//! # Navigation Actions
//!
//! Everything that can move the mobile app between screens becomes a
//! `NavAction`. User taps "Next" on onboarding? That's
//! `NavAction::Intent(Intent::Next)`. Splash timer fires? That's
//! `NavAction::SplashElapsed`.
//!
//! `reduce()` takes the current state and an action and returns the new
//! state. No side effects here. Timers live in the navigator.
//!
//! ```text
//! NavState + NavAction  →  reduce()  →  NavState
//! ```
//!
//! Screens never name the screen they lead to. They emit an `Intent`, and
//! `route()` is the one place that knows the screen graph.

use log::{debug, warn};

use crate::core::screen::{Screen, Tab};
use crate::core::state::NavState;

/// A screen-local user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Next,
    Skip,
    Back,
    GetStarted,
    LogIn,
    OpenTrip,
    SelectDate,
    BookSeat,
    Continue,
    Cancel,
    ConfirmPayment,
    ViewTrip,
    BackToHome,
    LogOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Unconditional jump; any screen may go to any other.
    TransitionTo(Screen),
    SelectTab(Tab),
    Intent(Intent),
    SplashElapsed,
}

/// Resolves an intent raised on `screen` to the next screen.
/// Returns `None` when the screen does not expose that intent.
pub fn route(screen: Screen, intent: Intent) -> Option<Screen> {
    use Intent::*;
    use Screen as S;

    let next = match (screen, intent) {
        (S::Splash, Next) => S::Onboarding1,
        (S::Onboarding1, Next) => S::Onboarding2,
        (S::Onboarding1, Skip) => S::Login,
        (S::Onboarding2, GetStarted) => S::Login,
        (S::Onboarding2, Back) => S::Onboarding1,
        (S::Login, LogIn) => S::Explore,
        (S::Explore, OpenTrip) => S::PackageDetails,
        (S::PackageDetails, Back) => S::Explore,
        (S::PackageDetails, SelectDate) => S::DepartureDetails,
        (S::DepartureDetails, Back) => S::PackageDetails,
        (S::DepartureDetails, BookSeat) => S::TravelerDetails,
        (S::TravelerDetails, Back) => S::DepartureDetails,
        (S::TravelerDetails, Continue) => S::ReviewPay,
        (S::TravelerDetails, Cancel) => S::Explore,
        (S::ReviewPay, Back) => S::TravelerDetails,
        (S::ReviewPay, ConfirmPayment) => S::BookingConfirmation,
        (S::BookingConfirmation, ViewTrip) => S::MyTrips,
        (S::BookingConfirmation, BackToHome) => S::Explore,
        (S::MyTrips, OpenTrip) => S::PackageDetails,
        (S::Profile, LogOut) => S::Login,
        _ => return None,
    };
    Some(next)
}

/// The navigation reducer. Pure: same input, same output.
pub fn reduce(state: NavState, action: NavAction) -> NavState {
    let next = match action {
        NavAction::TransitionTo(screen) => NavState { screen, ..state },
        NavAction::SelectTab(tab) => NavState {
            screen: tab.screen(),
            tab,
        },
        NavAction::Intent(intent) => match route(state.screen, intent) {
            Some(screen) => NavState { screen, ..state },
            None => {
                warn!("Intent {:?} not exposed by screen {}", intent, state.screen);
                state
            }
        },
        NavAction::SplashElapsed if state.screen == Screen::Splash => NavState {
            screen: Screen::Onboarding1,
            ..state
        },
        // Timer outlived the splash screen
        NavAction::SplashElapsed => state,
    };
    debug!("{:?}: {:?} -> {:?}", action, state, next);
    next
}
