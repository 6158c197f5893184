//! Sales analysis.
//!
//! Aggregation of raw rows into ranked totals, and the insights derived
//! from those totals.

pub mod aggregator;
pub mod insights;

pub use aggregator::*;
pub use insights::*;
