//! SKCC award eligibility and progress tracking.
//!
//! The [`awards`] engine is pure: it takes contact records, an operator
//! profile and an optional roster snapshot and returns progress reports.
//! Everything that touches the outside world (config, CSV import, roster
//! files, caching, logging) lives in the surrounding modules.

pub mod awards;
pub mod cache;
pub mod config;
pub mod error;
pub mod logbook;
pub mod roster;
pub mod telemetry;
