//! Core data structures and utilities for profdump.
//!
//! This crate provides the result data model, the accepted-identifier
//! scope with its derived index dictionaries, and the shared error and
//! logging plumbing used by the persistence layer in `profdump-store`.
//!
//! # Architecture
//! - Closed tagged enum over the result kinds; dispatch is exhaustive
//!   match, never a runtime registry
//! - Scope and dictionaries are built once per run and immutable
//! - All fallible operations return explicit `Result`s; no panics on the
//!   write or read paths

pub mod error;
pub mod logging;
pub mod models;
pub mod run;
pub mod scope;

// Re-export commonly used types
pub use error::{ProfdumpError, Result};
pub use logging::init_logging;
pub use models::{
    BasicStatistic, ColumnCombination, ColumnCondition, ColumnIdentifier, ColumnPermutation,
    ComparisonOperator, ConditionalUniqueColumnCombination, FunctionalDependency,
    InclusionDependency, OrderDependency, OrderType, ProfilingResult, ResultKind,
    UniqueColumnCombination,
};
pub use run::execution_identifier;
pub use scope::{AcceptedScope, IdentifierMappings};
