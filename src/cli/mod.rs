//! Command-line interface module.

mod args;
pub mod fix;
pub mod rules;

pub use args::{Cli, Commands, FixArgs};
