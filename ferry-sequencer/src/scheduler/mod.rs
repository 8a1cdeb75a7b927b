//! Scheduler layer
//!
//! Drives a single job from submission to a terminal state.

pub mod sequencer;

pub use sequencer::{Sequencer, Sleeper, TokioSleeper};
