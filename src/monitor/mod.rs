//! Sampling loop building blocks.
//!
//! This module provides:
//! - The status update schedule ([`StatusSchedule`])
//! - A single read/evaluate/report step ([`Collector`], [`Tick`])

mod collector;
mod schedule;

#[cfg(test)]
mod collector_tests;

pub use collector::{Collector, Tick};
pub use schedule::StatusSchedule;
