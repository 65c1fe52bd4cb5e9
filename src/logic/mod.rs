//! Business Logic
//!
//! This module contains pure business logic functions that can be unit tested:
//! - file: MIME type detection for the catalog indexer
//! - formatting: File size and date formatting for list rows
//! - grouping: Packing entries into grid and label rows
//! - navigation: Selection movement and the virtualized scroll window
//! - ui: UI timing (toasts, progress spinner)

pub mod file;
pub mod formatting;
pub mod grouping;
pub mod navigation;
pub mod ui;
