//! Pipeline wiring and runtime settings for the `dresscast` binary
//!
//! Lives in a library so integration tests can drive the pipeline with
//! substitute sources and notifiers.

pub mod config;
pub mod pipeline;

pub use config::*;
pub use pipeline::*;
