//! CLI command implementations

pub mod completions;
pub mod config;
pub mod part;
pub mod product;
pub mod shell;
