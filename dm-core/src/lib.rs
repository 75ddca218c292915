//! Core types and state machines for the drought monitor dashboard.
//!
//! Nothing in this crate touches the DOM; the map UI crate drives these
//! types from Dioxus signals and the CLI drives them from the terminal.

pub mod config;
pub mod crops;
pub mod error;
pub mod export;
pub mod periods;
pub mod region;
pub mod sources;
pub mod time_selector;
pub mod viewport;

pub use error::{DmError, Result};
