//! Data Transfer Objects for the import job service
//!
//! Requests are sent as the domain types themselves; this module holds the
//! response shapes and their conversion into domain observations.

pub mod import;
