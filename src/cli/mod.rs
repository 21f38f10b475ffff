//! CLI module
//!
//! Command-line interface over the client.
//!
//! # Commands
//!
//! - `pages` - Walk a cursor-paginated endpoint and print every record
//! - `total` - Print the total a total-aware endpoint reports
//! - `cheers` - Find cheermotes in a message against a saved catalog

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
