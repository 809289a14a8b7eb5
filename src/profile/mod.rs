// Profile aggregation module.
// Derives a single metrics view from a user's public GitHub data.

pub mod aggregate;
pub mod types;

pub use aggregate::aggregate;
pub use types::{ProfileResult, TopRepo};
