//! Subcommand implementations.

pub mod fonts;
pub mod info;
pub mod run;
