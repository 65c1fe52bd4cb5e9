//! MediaMaster Library
//!
//! Exposes the permission, catalog, loading and list-adapter modules so the
//! terminal binary and the integration tests share one implementation.

pub mod adapter;
pub mod loader;
pub mod logic;
pub mod model;
pub mod permissions;
pub mod store;
pub mod utils;

pub use model::types::{ContentUri, MediaCategory, MediaEntry, MediaRow};
