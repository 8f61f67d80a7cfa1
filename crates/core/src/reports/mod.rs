//! Financial report generation.
//!
//! This module turns aggregated transaction data into report views:
//! - Month summary with month-over-month change
//! - Category breakdown for a month
//! - Monthly evolution series
//! - Financial overview
//! - Transaction summary for an arbitrary date range

pub mod error;
pub mod generator;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ReportError;
pub use generator::ReportGenerator;
pub use types::*;
