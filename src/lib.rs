pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod ui;
pub mod updater;
pub mod warning;

pub use error::{GitupError, Result};
pub use updater::{UpdateOutcome, UpdateState, Updater};
