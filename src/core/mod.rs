//! # Core Application Logic
//!
//! Wanderlust's business logic for both front-ends. It knows nothing about
//! any specific UI technology.
//!
//! ```text
//!                    ┌──────────────────────────────┐
//!                    │            CORE              │
//!                    │                              │
//!                    │  • NavState + reduce()       │
//!                    │  • Navigator (splash timer)  │
//!                    │  • DashboardState + update() │
//!                    │                              │
//!                    │  No UI. Network via Effect.  │
//!                    └──────────────┬───────────────┘
//!                                   │
//!                  ┌────────────────┴────────────────┐
//!                  ▼                                 ▼
//!           ┌────────────┐                    ┌────────────┐
//!           │    TUI     │                    │    API     │
//!           │  Adapter   │                    │ PackageApi │
//!           │ (ratatui)  │                    │ (reqwest)  │
//!           └────────────┘                    └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`screen`]: `Screen` and `Tab`, the closed sets the app moves between
//! - [`state`]: `NavState`, the current screen and tab
//! - [`action`]: `NavAction`, `Intent`, the route table and `reduce()`
//! - [`navigator`]: the controller that owns the splash timer
//! - [`dashboard`]: the package dashboard's state machine
//! - [`request`]: dashboard requests and their async execution
//! - [`form`] / [`editor`]: text forms and their typed payloads
//! - [`config`]: layered configuration

pub mod action;
pub mod config;
pub mod dashboard;
pub mod editor;
pub mod form;
pub mod navigator;
pub mod request;
pub mod screen;
pub mod state;
