//! App Orchestration Methods
//!
//! This module contains App implementation methods grouped by domain.
//! Each submodule contains methods that orchestrate between:
//! - Model state (pure, in mediamaster::model)
//! - Services (grant table, query service, thumbnail loader)
//! - Handlers (in src/handlers/)
//!
//! Methods are kept as `impl App` but organized by functional domain.

pub(crate) mod navigation;
pub(crate) mod permissions;
pub(crate) mod screen;
pub(crate) mod thumbnails;
