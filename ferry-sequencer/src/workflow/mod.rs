//! Workflows built on the sequencer

pub mod segment_import;

pub use segment_import::{ImportReport, SegmentImport, SegmentImportParams, WorkflowError};
