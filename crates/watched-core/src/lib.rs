//! # Watched Core
//!
//! The engine-independent part of the watched cache: the [`ports::Cache`]
//! contract, the TTL model and the liveness rule shared by every engine.
//! This crate has no storage dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use domain::{CacheEntry, MAX_TTL, Ttl};
pub use error::CacheError;
