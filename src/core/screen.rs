//! # Screens and Tabs
//!
//! The closed set of screens the mobile app can show, and the four
//! bottom-navigation tabs. Each screen has a canonical string tag so it can
//! be named from config files or logs.

use std::fmt;
use std::str::FromStr;

/// A full-viewport screen. Exactly one is current at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Splash,
    Onboarding1,
    Onboarding2,
    Login,
    Explore,
    PackageDetails,
    DepartureDetails,
    TravelerDetails,
    ReviewPay,
    BookingConfirmation,
    MyTrips,
    Updates,
    Profile,
}

impl Screen {
    pub const ALL: [Screen; 13] = [
        Screen::Splash,
        Screen::Onboarding1,
        Screen::Onboarding2,
        Screen::Login,
        Screen::Explore,
        Screen::PackageDetails,
        Screen::DepartureDetails,
        Screen::TravelerDetails,
        Screen::ReviewPay,
        Screen::BookingConfirmation,
        Screen::MyTrips,
        Screen::Updates,
        Screen::Profile,
    ];

    /// Canonical tag, e.g. `"bookingConfirmation"`.
    pub fn tag(self) -> &'static str {
        match self {
            Screen::Splash => "splash",
            Screen::Onboarding1 => "onboarding1",
            Screen::Onboarding2 => "onboarding2",
            Screen::Login => "login",
            Screen::Explore => "explore",
            Screen::PackageDetails => "packageDetails",
            Screen::DepartureDetails => "departureDetails",
            Screen::TravelerDetails => "travelerDetails",
            Screen::ReviewPay => "reviewPay",
            Screen::BookingConfirmation => "bookingConfirmation",
            Screen::MyTrips => "myTrips",
            Screen::Updates => "updates",
            Screen::Profile => "profile",
        }
    }

    /// Main-section screens show the bottom tab bar.
    pub fn shows_tab_bar(self) -> bool {
        matches!(
            self,
            Screen::Explore | Screen::MyTrips | Screen::Updates | Screen::Profile
        )
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Screen {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Screen::ALL
            .into_iter()
            .find(|screen| screen.tag() == s)
            .ok_or_else(|| NavError::InvalidState(format!("unknown screen tag '{s}'")))
    }
}

/// Bottom-navigation section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Explore,
    MyTrips,
    Updates,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Explore, Tab::MyTrips, Tab::Updates, Tab::Profile];

    /// The main screen a tab opens.
    pub fn screen(self) -> Screen {
        match self {
            Tab::Explore => Screen::Explore,
            Tab::MyTrips => Screen::MyTrips,
            Tab::Updates => Screen::Updates,
            Tab::Profile => Screen::Profile,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Explore => "Explore",
            Tab::MyTrips => "My Trips",
            Tab::Updates => "Updates",
            Tab::Profile => "Profile",
        }
    }
}

/// Navigation errors. These are programming errors (a registry or mapping
/// mismatch), not recoverable runtime conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    InvalidState(String),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::InvalidState(msg) => write!(f, "invalid navigation state: {msg}"),
        }
    }
}

impl std::error::Error for NavError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_tag_round_trip() {
        for screen in Screen::ALL {
            assert_eq!(screen.tag().parse::<Screen>(), Ok(screen));
        }
    }

    #[test]
    fn test_unknown_screen_tag_is_invalid_state() {
        let err = "checkout".parse::<Screen>().unwrap_err();
        assert!(matches!(err, NavError::InvalidState(ref msg) if msg.contains("checkout")));
    }

    #[test]
    fn test_tab_screen_lookup() {
        assert_eq!(Tab::Explore.screen(), Screen::Explore);
        assert_eq!(Tab::MyTrips.screen(), Screen::MyTrips);
        assert_eq!(Tab::Updates.screen(), Screen::Updates);
        assert_eq!(Tab::Profile.screen(), Screen::Profile);
    }

    #[test]
    fn test_tab_bar_only_on_main_screens() {
        let with_bar: Vec<Screen> = Screen::ALL
            .into_iter()
            .filter(|s| s.shows_tab_bar())
            .collect();
        assert_eq!(
            with_bar,
            vec![Screen::Explore, Screen::MyTrips, Screen::Updates, Screen::Profile]
        );
        for tab in Tab::ALL {
            assert!(tab.screen().shows_tab_bar());
        }
    }
}
