//! Command handlers for tfd-search
//!
//! Each subcommand has its own module with handler functions.

pub mod configure;
pub mod refresh;
