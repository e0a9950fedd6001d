//! Core nlterm library (session engine, dialects, providers, config).

pub mod config;
pub mod dialect;
pub mod interrupt;
pub mod providers;
pub mod session;
