//! # TUI Components
//!
//! Reusable pieces shared by the app screens and the dashboard.
//!
//! - `FormView` (stateless): renders a `core::form::Form`. The form itself
//!   implements `EventHandler`, so typing edits core state directly.
//! - `TabBar` (stateless): the app's bottom navigation.
//!
//! Components receive their data as props and keep tests next to the code.

pub mod form_view;
pub mod tab_bar;

pub use form_view::{FormEvent, FormView};
pub use tab_bar::{TabBar, tab_for_key};
