//! Background Services
//!
//! - query: runs content loads off the UI thread

pub mod query;

pub use query::{QueryRequest, QueryResponse};
