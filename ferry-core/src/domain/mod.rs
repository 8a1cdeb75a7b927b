//! Core domain types
//!
//! These types are shared between the HTTP client, the sequencer and the CLI.
//! They carry no I/O and no service-specific behaviour beyond mapping the
//! import service's job states onto [`job::JobStatus`].

pub mod blob;
pub mod import;
pub mod job;
