//! Headless host for the variable font styles block.
//!
//! Font files stand in for host assets and a JSON file for the host
//! settings store.

pub mod cli;
pub mod io;

pub use io::{FontFile, SettingsFile, TableParser};
