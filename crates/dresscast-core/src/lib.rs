//! Core types, aggregation, and outfit rules for Dresscast
//!
//! This crate holds the deterministic heart of the pipeline: bucketing
//! hourly forecast samples into day periods, mapping period conditions to
//! layered clothing through an ordered rule table, and rendering the daily
//! report text. It performs no I/O; fetching, caching, and mail delivery
//! are separate crates.

pub mod aggregate;
pub mod pipeline;
pub mod report;
pub mod rules;
pub mod thresholds;
pub mod types;

pub use aggregate::*;
pub use pipeline::*;
pub use report::*;
pub use rules::*;
pub use thresholds::*;
pub use types::*;
