//! Terminal presentation: the quote table, setup and shared styling helpers

pub mod quotes;
pub mod setup;
pub mod ui;
