//! On-disk persistence for profiling results.
//!
//! One run writes one file per result kind, named
//! `<execution_id><kind suffix>`, under a shared output directory. Most
//! kinds are stored as newline-delimited JSON records; functional
//! dependencies under a finite accepted scope use a compact indexed
//! encoding with a one-time dictionary header. [`reader`] inverts both
//! formats exactly.
//!
//! The writer assumes a single driving execution context; see
//! [`writer::ResultWriter`] for the contract.

mod encoder;
pub mod reader;
pub mod writer;

pub use reader::{read_results, read_run};
pub use writer::ResultWriter;
