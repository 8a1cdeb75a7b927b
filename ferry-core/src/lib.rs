//! Ferry Core
//!
//! Core types for the Ferry job sequencer.
//!
//! This crate contains:
//! - Domain types: Jobs, their observed status and results, import requests
//!   and staged payloads
//! - DTOs: Wire shapes exchanged with the remote import job service

pub mod domain;
pub mod dto;
