//! # Tessera Core
//!
//! Core types and error definitions for the Tessera HR data-access layer.
//! This crate provides the foundational abstractions shared by the
//! configuration, repository, and service crates.

pub mod error;
pub mod fields;
pub mod id;
pub mod listing;
pub mod result;
pub mod tenant;

pub use error::*;
pub use listing::*;
pub use result::*;
pub use tenant::*;
