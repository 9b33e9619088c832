//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into core actions for both applications:
//!
//! - [`run_app`]: the mobile app shell, driven by the `Navigator`.
//! - [`run_dashboard`]: the package dashboard, driven by
//!   `core::dashboard::update` with REST calls spawned on tokio.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Both loops only draw when something changed: a key press, a resize, or
//! an action arriving from a background task. Between events they sleep
//! in `poll` for up to 250ms so timer and request results are picked up
//! promptly.

mod component;
pub mod components;
pub mod dashboard;
mod event;
pub mod screens;

use log::{debug, error, info, warn};
use std::io;
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{DefaultTerminal, Frame};

use crate::api::{HttpPackageApi, PackageApi};
use crate::core::action::NavAction;
use crate::core::config::ResolvedConfig;
use crate::core::dashboard::{DashboardAction, DashboardState, Effect, update};
use crate::core::navigator::{Dispatch, Navigator};
use crate::core::request::{Request, execute};
use crate::core::screen::{NavError, Screen};
use crate::core::state::NavState;
use crate::tui::component::Component;
use crate::tui::components::{TabBar, tab_for_key};
use crate::tui::event::{TuiEvent, poll_batch};
use crate::tui::screens::{ScreenRegistry, ScreenView};

const POLL_TIMEOUT: Duration = Duration::from_millis(250);

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        // Keyboard enhancement is harmlessly ignored by terminals without it
        execute!(
            stdout(),
            EnableBracketedPaste,
            Hide,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableBracketedPaste,
            Show
        );
    }
}

/// Runs `body` on an initialised terminal and always restores it.
fn with_terminal(body: impl FnOnce(&mut DefaultTerminal) -> io::Result<()>) -> io::Result<()> {
    let mut terminal = ratatui::init();
    let result = match TerminalModeGuard::new() {
        Ok(_guard) => body(&mut terminal),
        Err(e) => Err(e),
    };
    ratatui::restore();
    if let Err(e) = &result {
        error!("Terminal loop failed: {}", e);
    }
    result
}

fn invalid_state(err: NavError) -> io::Error {
    io::Error::other(err)
}

// ============================================================================
// Mobile app shell
// ============================================================================

pub fn run_app(config: ResolvedConfig) -> io::Result<()> {
    let (tx, rx) = mpsc::channel();
    let mut navigator = Navigator::new(Dispatch::new(tx), config.splash_delay);
    let mut registry = ScreenRegistry::standard();

    with_terminal(|terminal| {
        navigator.start();
        app_loop(terminal, &mut navigator, &mut registry, &rx)
    })
}

fn app_loop(
    terminal: &mut DefaultTerminal,
    navigator: &mut Navigator,
    registry: &mut ScreenRegistry,
    rx: &mpsc::Receiver<NavAction>,
) -> io::Result<()> {
    let dispatch = navigator.dispatch();
    let mut needs_redraw = true;

    loop {
        let state = navigator.state();

        if needs_redraw {
            let view = registry.view_mut(state.screen).map_err(invalid_state)?;
            terminal.draw(|f| draw_app(f, state, view))?;
            needs_redraw = false;
        }

        for event in poll_batch(POLL_TIMEOUT)? {
            needs_redraw = true;
            match event {
                TuiEvent::ForceQuit => {
                    info!("Quit requested on {}", navigator.state().screen);
                    return Ok(());
                }
                TuiEvent::Resize => {}
                TuiEvent::Char(c)
                    if navigator.state().screen.shows_tab_bar() && tab_for_key(c).is_some() =>
                {
                    if let Some(tab) = tab_for_key(c) {
                        dispatch.send(NavAction::SelectTab(tab));
                    }
                }
                event => {
                    let view = registry
                        .view_mut(navigator.state().screen)
                        .map_err(invalid_state)?;
                    view.handle_event(&event, &dispatch);
                }
            }
            // Apply right away so the next key goes to the new screen
            drain_nav_actions(navigator, registry, rx)?;
        }

        if drain_nav_actions(navigator, registry, rx)? {
            needs_redraw = true;
        }
    }
}

/// Applies every queued navigation action. Returns true if any arrived.
fn drain_nav_actions(
    navigator: &mut Navigator,
    registry: &mut ScreenRegistry,
    rx: &mpsc::Receiver<NavAction>,
) -> io::Result<bool> {
    let mut applied = false;
    while let Ok(action) = rx.try_recv() {
        applied = true;
        debug!("Event loop received: {:?}", action);
        let before = navigator.state().screen;
        let after = navigator.apply(action).screen;
        if before != after {
            registry.view_mut(after).map_err(invalid_state)?.on_enter();
        }
    }
    Ok(applied)
}

fn draw_app(frame: &mut Frame, state: NavState, view: &mut dyn ScreenView) {
    use Constraint::{Length, Min};
    let tab_height = if state.screen.shows_tab_bar() { 1 } else { 0 };
    let [header, body, tabs, footer] =
        Layout::vertical([Length(1), Min(0), Length(tab_height), Length(1)]).areas(frame.area());

    let title = Line::from(vec![
        Span::styled(
            " Highland Escapes ",
            Style::new().add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ),
        Span::raw(format!("  {}", screen_title(state.screen))),
    ]);
    frame.render_widget(Paragraph::new(title), header);

    view.render(frame, body);

    if state.screen.shows_tab_bar() {
        TabBar { active: state.tab }.render(frame, tabs);
    }

    let mut hints = view.hints();
    if state.screen.shows_tab_bar() {
        hints.push("1-4 tabs".to_string());
    }
    hints.push("Ctrl+C quit".to_string());
    frame.render_widget(
        Paragraph::new(format!(" {}", hints.join("  ·  ")))
            .style(Style::new().fg(Color::DarkGray)),
        footer,
    );
}

fn screen_title(screen: Screen) -> &'static str {
    match screen {
        Screen::Splash => "Welcome",
        Screen::Onboarding1 | Screen::Onboarding2 => "Getting started",
        Screen::Login => "Log in",
        Screen::Explore => "Explore",
        Screen::PackageDetails => "Trip details",
        Screen::DepartureDetails => "Departure",
        Screen::TravelerDetails => "Traveler details",
        Screen::ReviewPay => "Review & pay",
        Screen::BookingConfirmation => "Confirmed",
        Screen::MyTrips => "My trips",
        Screen::Updates => "Updates",
        Screen::Profile => "Profile",
    }
}

// ============================================================================
// Package dashboard
// ============================================================================

pub fn run_dashboard(config: ResolvedConfig) -> io::Result<()> {
    let api: Arc<dyn PackageApi> = Arc::new(HttpPackageApi::new(config.server_url.clone()));
    let mut state = DashboardState::new(config.filter);

    with_terminal(|terminal| dashboard_loop(terminal, &mut state, api, &config.server_url))
}

fn dashboard_loop(
    terminal: &mut DefaultTerminal,
    state: &mut DashboardState,
    api: Arc<dyn PackageApi>,
    server_url: &str,
) -> io::Result<()> {
    // Channel for actions from request tasks
    let (tx, rx) = mpsc::channel();
    let mut needs_redraw = true;

    let effect = update(state, DashboardAction::Started);
    run_effect(effect, &api, &tx);

    loop {
        if needs_redraw {
            terminal.draw(|f| dashboard::draw_dashboard(f, state, server_url))?;
            needs_redraw = false;
        }

        for event in poll_batch(POLL_TIMEOUT)? {
            needs_redraw = true;
            if let Some(action) = dashboard::handle_key(state, &event) {
                debug!("Key mapped to {:?}", action);
                if run_effect(update(state, action), &api, &tx) {
                    return Ok(());
                }
            }
        }

        // Handle request results
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if run_effect(update(state, action), &api, &tx) {
                return Ok(());
            }
        }
    }
}

/// Carries out an effect. Returns true when the dashboard should exit.
fn run_effect(
    effect: Effect,
    api: &Arc<dyn PackageApi>,
    tx: &mpsc::Sender<DashboardAction>,
) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::Request(request) => {
            spawn_request(api.clone(), request, tx.clone());
            false
        }
    }
}

fn spawn_request(api: Arc<dyn PackageApi>, request: Request, tx: mpsc::Sender<DashboardAction>) {
    info!("Spawning request: {:?}", request);
    tokio::spawn(async move {
        let action = execute(api.as_ref(), request).await;
        if tx.send(action).is_err() {
            warn!("Failed to send request result: receiver dropped");
        }
    });
}
