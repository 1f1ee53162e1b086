// Frameworks: configuration loading and the command-line entry point.

pub mod cli;
pub mod config;
