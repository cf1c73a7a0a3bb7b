//! Domain logic for the stockroom inventory service.
//!
//! Everything in this crate is pure: no database or HTTP types. The `db`
//! and `api` crates build on these rules.

pub mod container_type;
pub mod error;
pub mod hierarchy;
pub mod links;
pub mod metadata;
pub mod patch;
pub mod tags;
pub mod types;
