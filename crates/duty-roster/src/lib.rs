//! Duty roster generation for volunteer flying club operations.
//!
//! The core is a constraint-based assignment engine that fills operational
//! roles (duty officer, assistant duty officer, instructor, tow pilot) on
//! weekend dates, balancing hard exclusions, soft preferences, and fairness,
//! and explaining every slot it could not fill.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
