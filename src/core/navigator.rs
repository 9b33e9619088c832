//! # Navigator
//!
//! The navigation controller. Wraps the pure reducer with the one side
//! effect navigation has: the splash auto-advance timer.
//!
//! - Entering `Splash` arms a timer that dispatches `SplashElapsed` once.
//! - Leaving `Splash` cancels the pending timer.
//! - Dropping the navigator cancels it too, so the timer never calls back
//!   into a controller that no longer exists.
//!
//! Screens get a [`Dispatch`] handle instead of the navigator itself.

use log::{debug, info, warn};
use std::sync::mpsc;
use std::time::Duration;
use tokio::task::AbortHandle;

use crate::core::action::{Intent, NavAction, reduce};
use crate::core::screen::{Screen, Tab};
use crate::core::state::NavState;

pub const DEFAULT_SPLASH_DELAY: Duration = Duration::from_millis(3000);

/// The navigation capability handed to every screen.
///
/// Sending never blocks; if the event loop is gone the action is dropped.
#[derive(Clone, Debug)]
pub struct Dispatch {
    tx: mpsc::Sender<NavAction>,
}

impl Dispatch {
    pub fn new(tx: mpsc::Sender<NavAction>) -> Self {
        Self { tx }
    }

    pub fn send(&self, action: NavAction) {
        if self.tx.send(action).is_err() {
            warn!("Dropped {:?}: navigator receiver closed", action);
        }
    }

    pub fn intent(&self, intent: Intent) {
        self.send(NavAction::Intent(intent));
    }
}

/// Aborts the timer task when dropped.
struct SplashTimer {
    handle: AbortHandle,
}

impl SplashTimer {
    fn arm(dispatch: Dispatch, delay: Duration) -> Self {
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debug!("Splash timer elapsed after {:?}", delay);
            dispatch.send(NavAction::SplashElapsed);
        });
        Self {
            handle: task.abort_handle(),
        }
    }
}

impl Drop for SplashTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub struct Navigator {
    state: NavState,
    dispatch: Dispatch,
    splash_delay: Duration,
    splash_timer: Option<SplashTimer>,
}

impl Navigator {
    pub fn new(dispatch: Dispatch, splash_delay: Duration) -> Self {
        Self {
            state: NavState::default(),
            dispatch,
            splash_delay,
            splash_timer: None,
        }
    }

    /// Arms the splash timer if the app is on the splash screen.
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        info!("Navigator starting on {}", self.state.screen);
        self.sync_splash_timer();
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn dispatch(&self) -> Dispatch {
        self.dispatch.clone()
    }

    /// Applies an action and returns the resulting state.
    pub fn apply(&mut self, action: NavAction) -> NavState {
        let previous = self.state;
        self.state = reduce(previous, action);
        if previous.screen != self.state.screen {
            info!("Screen {} -> {}", previous.screen, self.state.screen);
            self.sync_splash_timer();
        }
        self.state
    }

    pub fn transition_to(&mut self, screen: Screen) -> NavState {
        self.apply(NavAction::TransitionTo(screen))
    }

    pub fn select_tab(&mut self, tab: Tab) -> NavState {
        self.apply(NavAction::SelectTab(tab))
    }

    fn sync_splash_timer(&mut self) {
        if self.state.screen == Screen::Splash {
            if self.splash_timer.is_none() {
                let timer = SplashTimer::arm(self.dispatch.clone(), self.splash_delay);
                self.splash_timer = Some(timer);
            }
        } else if self.splash_timer.take().is_some() {
            debug!("Splash timer cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navigator() -> (Navigator, mpsc::Receiver<NavAction>) {
        let (tx, rx) = mpsc::channel();
        (Navigator::new(Dispatch::new(tx), DEFAULT_SPLASH_DELAY), rx)
    }

    fn drain(nav: &mut Navigator, rx: &mpsc::Receiver<NavAction>) -> usize {
        let mut count = 0;
        while let Ok(action) = rx.try_recv() {
            nav.apply(action);
            count += 1;
        }
        count
    }

    #[tokio::test(start_paused = true)]
    async fn test_splash_fires_once_after_delay() {
        let (mut nav, rx) = navigator();
        nav.start();

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.try_recv(), Ok(NavAction::SplashElapsed));
        nav.apply(NavAction::SplashElapsed);
        assert_eq!(nav.state().screen, Screen::Onboarding1);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_splash_never_fires_after_teardown() {
        let (mut nav, rx) = navigator();
        nav.start();
        tokio::time::sleep(Duration::from_millis(1000)).await;
        drop(nav);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaving_splash_cancels_timer() {
        let (mut nav, rx) = navigator();
        nav.start();
        nav.transition_to(Screen::Login);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(drain(&mut nav, &rx), 0);
        assert_eq!(nav.state().screen, Screen::Login);
    }

    #[tokio::test(start_paused = true)]
    async fn test_returning_to_splash_rearms_timer() {
        let (mut nav, rx) = navigator();
        nav.start();
        nav.transition_to(Screen::Profile);
        nav.transition_to(Screen::Splash);

        tokio::time::sleep(Duration::from_millis(3001)).await;
        assert_eq!(drain(&mut nav, &rx), 1);
        assert_eq!(nav.state().screen, Screen::Onboarding1);
    }

    #[tokio::test]
    async fn test_dispatch_intents_are_applied_in_order() {
        let (mut nav, rx) = navigator();
        nav.transition_to(Screen::Onboarding1);
        let dispatch = nav.dispatch();
        dispatch.intent(Intent::Next);
        dispatch.intent(Intent::GetStarted);

        assert_eq!(drain(&mut nav, &rx), 2);
        assert_eq!(nav.state().screen, Screen::Login);
    }

    #[tokio::test]
    async fn test_select_tab_through_navigator() {
        let (mut nav, _rx) = navigator();
        let state = nav.select_tab(Tab::Updates);
        assert_eq!(state.tab, Tab::Updates);
        assert_eq!(state.screen, Screen::Updates);
    }
}
