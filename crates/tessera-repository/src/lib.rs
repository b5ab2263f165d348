//! # Tessera Repository
//!
//! DAO traits and their MongoDB implementations. Every DAO is scoped to a
//! tenant ([`TenantContext`](tessera_core::TenantContext)) and works on
//! loosely-typed [`Document`](bson::Document) rows.

pub mod dao;
pub mod handle;
pub mod mongo;

pub use dao::*;
pub use handle::*;
pub use mongo::*;
