//! Text screens with a fixed set of keyed choices.
//!
//! Most of the app's screens are a headline, a few lines of copy and one
//! or two buttons. `InfoScreen` covers them all; [`standard_screens`] holds
//! their content.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use super::ScreenView;
use crate::core::action::Intent;
use crate::core::navigator::Dispatch;
use crate::core::screen::Screen;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

/// A button: press `key` to emit `intent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub key: char,
    pub label: &'static str,
    pub intent: Intent,
}

const fn choice(key: char, label: &'static str, intent: Intent) -> Choice {
    Choice { key, label, intent }
}

pub struct InfoScreen {
    screen: Screen,
    headline: &'static str,
    lines: Vec<&'static str>,
    /// The first choice is the primary action, also bound to Enter.
    choices: Vec<Choice>,
}

impl InfoScreen {
    pub fn new(
        screen: Screen,
        headline: &'static str,
        lines: Vec<&'static str>,
        choices: Vec<Choice>,
    ) -> Self {
        Self {
            screen,
            headline,
            lines,
            choices,
        }
    }
}

impl Component for InfoScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut text = vec![
            Line::from(Span::styled(
                self.headline,
                Style::new().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ];
        text.extend(self.lines.iter().map(|line| Line::from(*line)));

        if !self.choices.is_empty() {
            text.push(Line::default());
            let buttons: Vec<Span> = self
                .choices
                .iter()
                .flat_map(|choice| {
                    [
                        Span::styled(
                            format!("[{}] {}", choice.key, choice.label),
                            Style::new().fg(Color::Yellow),
                        ),
                        Span::raw("   "),
                    ]
                })
                .collect();
            text.push(Line::from(buttons));
        }

        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::bordered());
        frame.render_widget(paragraph, area);
    }
}

impl ScreenView for InfoScreen {
    fn screen(&self) -> Screen {
        self.screen
    }

    fn intents(&self) -> Vec<Intent> {
        self.choices.iter().map(|choice| choice.intent).collect()
    }

    fn hints(&self) -> Vec<String> {
        let mut hints: Vec<String> = self
            .choices
            .iter()
            .map(|choice| format!("{} {}", choice.key, choice.label))
            .collect();
        if let Some(primary) = self.choices.first() {
            hints.push(format!("Enter {}", primary.label));
        }
        hints
    }

    fn handle_event(&mut self, event: &TuiEvent, dispatch: &Dispatch) {
        let picked = match event {
            TuiEvent::Char(c) => {
                let c = c.to_ascii_lowercase();
                self.choices.iter().find(|choice| choice.key == c)
            }
            TuiEvent::Enter => self.choices.first(),
            TuiEvent::Escape => self
                .choices
                .iter()
                .find(|choice| choice.intent == Intent::Back),
            _ => None,
        };
        if let Some(choice) = picked {
            dispatch.intent(choice.intent);
        }
    }
}

/// Every screen except Login and Explore.
pub fn standard_screens() -> Vec<InfoScreen> {
    use Intent::*;

    vec![
        InfoScreen::new(
            Screen::Splash,
            "HIGHLAND ESCAPES",
            vec!["Travel Together. Stress Free.", "", "VERSION 1.0"],
            vec![choice('n', "Continue", Next)],
        ),
        InfoScreen::new(
            Screen::Onboarding1,
            "Explore Europe. & Beyond",
            vec![
                "Small-group journeys through Scotland and beyond,",
                "led by local guides who know every glen.",
            ],
            vec![choice('n', "Next", Next), choice('s', "Skip", Skip)],
        ),
        InfoScreen::new(
            Screen::Onboarding2,
            "Expertly Planned Adventures",
            vec![
                "Transport, stays and guides are arranged for you.",
                "Just pack your boots.",
            ],
            vec![choice('g', "Get Started", GetStarted), choice('b', "Back", Back)],
        ),
        InfoScreen::new(
            Screen::PackageDetails,
            "Highlands Explorer",
            vec![
                "SCOTLAND  ·  4.9 (128 reviews)",
                "7 Days  ·  From $1,450 / person",
                "",
                "Itinerary",
                "Day 1  Edinburgh to Pitlochry",
                "Day 2  Cairngorms and Loch Ness",
                "Day 3  Isle of Skye",
            ],
            vec![choice('d', "Select Date", SelectDate), choice('b', "Back", Back)],
        ),
        InfoScreen::new(
            Screen::DepartureDetails,
            "Departure Details",
            vec![
                "Oct 12 - Oct 19, 2024  ·  Only 3 left",
                "",
                "Meeting Point",
                "Edinburgh Waverley Station",
                "",
                "Total Price  $1,450",
            ],
            vec![choice('s', "Book Seat", BookSeat), choice('b', "Back", Back)],
        ),
        InfoScreen::new(
            Screen::TravelerDetails,
            "Traveler Details",
            vec![
                "STEP 1 OF 3  ·  Payment next",
                "",
                "Your Information",
                "Full Name, Email Address, Phone Number",
                "",
                "Emergency Contact",
                "Contact Name, Relation, Emergency Phone",
            ],
            vec![
                choice('c', "Continue to Payment", Continue),
                choice('x', "Cancel", Cancel),
                choice('b', "Back", Back),
            ],
        ),
        InfoScreen::new(
            Screen::ReviewPay,
            "Review & Pay",
            vec![
                "SELECTED TRIP",
                "Highlands & Islands Explorer",
                "Oct 12 - Oct 19, 2024  ·  1 Guest",
                "",
                "Payment Method  •••• 4242",
                "Total  $1,580.00",
            ],
            vec![choice('p', "Confirm Payment", ConfirmPayment), choice('b', "Back", Back)],
        ),
        InfoScreen::new(
            Screen::BookingConfirmation,
            "Booking Confirmed!",
            vec![
                "Booking #HT-2024-7841",
                "",
                "What's Next?",
                "Check Your Email: confirmation and receipt sent to your email",
                "Save the Date: add to calendar and prepare for departure",
                "Trip Documents: detailed itinerary available 2 weeks before",
            ],
            vec![choice('v', "View Trip", ViewTrip), choice('h', "Back to Home", BackToHome)],
        ),
        InfoScreen::new(
            Screen::MyTrips,
            "My Trips",
            vec![
                "Upcoming Departures",
                "Highlands & Islands Explorer  ·  Oct 12 - Oct 19, 2024  ·  Confirmed",
            ],
            vec![choice('o', "Open Trip", OpenTrip)],
        ),
        InfoScreen::new(
            Screen::Updates,
            "Updates",
            vec![
                "New",
                "Your guide for Highlands & Islands Explorer has been assigned.",
                "",
                "Earlier",
                "Payment received for booking #HT-2024-7841.",
            ],
            vec![],
        ),
        InfoScreen::new(
            Screen::Profile,
            "Profile",
            vec!["Signed in as a Highland Escapes traveller."],
            vec![choice('l', "Log Out", LogOut)],
        ),
    ]
}
