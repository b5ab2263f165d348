//! # Tessera Config
//!
//! Layered configuration loading and tracing initialization.

pub mod app_config;
pub mod loader;
pub mod logging;

pub use app_config::*;
pub use loader::*;
pub use logging::*;
