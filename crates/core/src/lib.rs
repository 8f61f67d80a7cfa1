//! Core business logic for FinTrack.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Domain types, validation rules, and the aggregation engine live here.
//!
//! # Modules
//!
//! - `period` - Budget period windows and calendar months
//! - `aggregation` - The store seam the engine reads transactions through
//! - `budget` - Budget progress tracking
//! - `reports` - Month summaries, category breakdowns, and evolution series
//! - `transaction` - Transaction types, sorting, and validation
//! - `category` - Category defaults and validation
//! - `auth` - Password hashing and user roles

pub mod aggregation;
pub mod auth;
pub mod budget;
pub mod category;
pub mod percent;
pub mod period;
pub mod reports;
pub mod transaction;
