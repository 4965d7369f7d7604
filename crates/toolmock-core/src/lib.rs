//! # toolmock-core
//!
//! Core types, configuration, and utilities for toolmock.
//!
//! This crate provides shared functionality used across all toolmock crates:
//!
//! - **Task context**: the ambient "which evaluation task is running" state
//! - **Datasets**: canned task records replayed by the mock tools
//! - **Configuration**: Loading, validation, and management of config files
//! - **Types**: Tool definitions, tool results, and resolution outcomes

pub mod config;
pub mod context;
pub mod dataset;
pub mod error;
pub mod paths;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use context::{NullTaskContext, SharedTaskContext, TaskContext, TaskSnapshot};
pub use dataset::{CallRecord, Candidate, TaskDataset, TaskKind, TaskRecord};
pub use error::{ConfigError, DatasetError, Error, Result};
pub use types::*;
