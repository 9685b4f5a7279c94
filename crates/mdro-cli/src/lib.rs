//! CLI library components for MDRO surveillance.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod types;
