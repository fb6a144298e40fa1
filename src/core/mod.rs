//! Pivot aggregation and summary statistics

pub mod aggregate;
pub mod summary;

pub use aggregate::build_aggregates;
pub use summary::summarize;
