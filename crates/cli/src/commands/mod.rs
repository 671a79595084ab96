//! Subcommand implementations.
//!
//! Each command returns its output as a string; `main` does the printing.

pub mod catalog;
pub mod secret;
pub mod token;
