pub mod iex;

pub use iex::{IexOptions, IexProvider};
