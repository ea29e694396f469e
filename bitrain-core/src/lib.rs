// SPDX-License-Identifier: MIT
//
// Bitrain: Binary Stream Sidebar Engine
// Copyright (c) 2025 Bitrain Contributors

//! Bitrain Core Library
//!
//! This crate provides the engine behind the "binary rain" sidebar of the bug-bounty
//! platform front-end, plus the data contracts the platform exchanges.
//!
//! # Architecture
//!
//! The library is organized into modules representing core concerns:
//! - `line`: Fixed-width binary strings and their generation
//! - `buffer`: Fixed-length rolling buffer and immutable snapshots
//! - `generator`: Timer-driven generator publishing snapshots to observers
//! - `emphasis`: Per-render emphasis selection for the presentation layer
//! - `model`: Bug-bounty platform data shapes
//! - `config`: Configuration management with validation
//! - `metrics`: Generator counters and symbol balance monitoring
//! - `error`: Unified error types
//!
//! # Design Principles
//!
//! 1. **Single owner**: only the generator mutates the buffer
//! 2. **Immutable publication**: observers receive whole snapshots, never live views
//! 3. **Scoped timers**: the tick loop is cancelled on every exit path
//! 4. **Injectable randomness**: every random draw takes an explicit source

pub mod buffer;
pub mod config;
pub mod emphasis;
pub mod error;
pub mod generator;
pub mod line;
pub mod metrics;
pub mod model;

pub use buffer::{Snapshot, StreamBuffer};
pub use error::{Error, Result};
pub use generator::{GeneratorHandle, RollingStreamGenerator};
pub use line::StreamLine;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of lines kept in the stream buffer
pub const DEFAULT_BUFFER_LEN: usize = 50;

/// Default width of each stream line, in symbols
pub const DEFAULT_LINE_WIDTH: usize = 6;

/// Default tick period in milliseconds
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Default probability that a rendered line is emphasized
pub const DEFAULT_EMPHASIS_PROBABILITY: f64 = 0.1;

/// Upper bound on line width to keep frames renderable
pub const MAX_LINE_WIDTH: usize = 256;
