//! Command handlers.

pub mod config;
pub mod exec;
pub mod session;
