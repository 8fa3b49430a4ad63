//! CLI module for scrapr - command-line interface.

pub mod commands;

pub use commands::Cli;
