// In-process cache module.
// Holds aggregated profiles briefly to avoid redundant GitHub API calls.

pub mod store;

pub use store::TtlCache;
