//! Analysis modules.
//!
//! The aggregator is the filtering and statistics pipeline; the other
//! modules derive chart series and streaks from its output.

pub mod aggregator;
pub mod series;
pub mod streak;
pub mod time;

pub use aggregator::*;
