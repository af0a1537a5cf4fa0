//! Core library for the `volley` CLI.
//!
//! This crate provides the internal building blocks used by the binary: CLI
//! argument types, the paced request dispatcher, run metrics, report sinks,
//! and the demo server. The primary user-facing interface is the `volley`
//! command-line application; library APIs may evolve as the CLI grows.
pub mod args;
pub mod error;
pub mod logger;
pub mod metrics;
pub mod report;
pub mod run;
pub mod server;
pub mod shutdown;
pub mod shutdown_handlers;
