//! Quote model, ordering and configuration

pub mod config;
pub mod error;
pub mod log;
pub mod quote;
pub mod sort;

// Re-export main types for cleaner imports
pub use error::FetchError;
pub use quote::{QuoteBatch, QuoteProvider, QuoteRecord};
pub use sort::{SortDirection, SortField, SortSpec, sort_quotes};
