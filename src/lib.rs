//! roomwatch: Server Room Environment Monitor
//!
//! A library for sampling temperature and humidity on a single-board
//! computer and delivering threshold alerts and status updates to a
//! Slack-compatible incoming webhook.
//!
//! The building blocks are:
//! - [`webhook`]: endpoint settings, URL masking and retrying delivery
//! - [`alert`]: thresholds, per-kind cooldown, message formatting and the
//!   [`alert::AlertService`] that ties them together
//! - [`sensor`]: hardware and simulated reading sources
//! - [`monitor`]: the sampling tick and the status update schedule
//! - [`config`]: CLI, environment and TOML configuration

pub mod alert;
pub mod config;
pub mod monitor;
pub mod sensor;
pub mod time;
pub mod webhook;

#[cfg(test)]
mod test_helpers;
