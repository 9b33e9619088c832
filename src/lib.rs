//! Wanderlust library exports for testing

use clap::ValueEnum;

pub mod api;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Which application the binary drives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// The traveller-facing mobile app shell.
    #[default]
    App,
    /// The package admin dashboard.
    Dashboard,
}
