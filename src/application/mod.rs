//! Application services (use cases).
//!
//! [`fetcher`] rates a single player; [`aggregator`] fans a batch out over
//! fetcher tasks and gathers the results.

pub mod aggregator;
pub mod fetcher;

pub use aggregator::BatchAggregator;
pub use fetcher::StatsFetcher;
