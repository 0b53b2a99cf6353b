//! CLI module - Command implementations

pub mod commands;
pub mod config;
