// SPDX-License-Identifier: MIT
//
// Bitrain: Binary Stream Sidebar Engine
// Copyright (c) 2025 Bitrain Contributors

//! Bitrain Sidebar - Terminal presentation layer for the binary stream
//!
//! Runs the rolling stream generator and draws every published snapshot to the
//! terminal, highlighting a freshly drawn random subset of lines on each frame.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   snapshot    ┌──────────────┐    frame     ┌──────────────┐
//! │  Generator   │ ─────────────>│   Sidebar    │ ────────────>│   Terminal   │
//! │ (timer task) │    (watch)    │  (emphasis)  │   (stdout)   │              │
//! └──────────────┘               └──────────────┘              └──────────────┘
//! ```
//!
//! # Features
//!
//! - Configuration from YAML file or `BITRAIN_*` environment variables
//! - Per-frame emphasis redraw, reproducible with a fixed seed
//! - Graceful shutdown on SIGINT/SIGTERM or after a fixed number of ticks
//! - JSON structured logging on stderr, metrics summary on exit

mod render;

use anyhow::{Context, Result};
use bitrain_core::{
    config::StreamConfig, emphasis, metrics::GeneratorMetrics, RollingStreamGenerator, Snapshot,
};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use render::Style;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

/// Offset applied to the stream seed so emphasis draws use an independent sequence
const EMPHASIS_SEED_SALT: u64 = 0x5eed_e3a5_1500_0001;

#[derive(Parser, Debug)]
#[command(name = "bitrain-sidebar")]
#[command(about = "Bitrain Sidebar - Animated binary stream for the terminal", long_about = None)]
struct Args {
    /// Path to YAML configuration file (defaults are used if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Load configuration from environment variables instead of file
    #[arg(long, default_value = "false")]
    env_mode: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Stop after this many ticks (0 = run until interrupted)
    #[arg(short, long, default_value = "0")]
    ticks: u64,

    /// Disable ANSI styling
    #[arg(long, default_value = "false")]
    plain: bool,
}

/// Presentation layer state
struct Sidebar {
    config: StreamConfig,
    style: Style,
    max_ticks: u64,
    emphasis_rng: StdRng,
}

impl Sidebar {
    fn new(config: StreamConfig, style: Style, max_ticks: u64) -> Self {
        let emphasis_rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ EMPHASIS_SEED_SALT),
            None => StdRng::from_entropy(),
        };

        Self {
            config,
            style,
            max_ticks,
            emphasis_rng,
        }
    }

    /// Main run loop
    async fn run(mut self) -> Result<()> {
        info!("Bitrain Sidebar v{}", env!("CARGO_PKG_VERSION"));
        info!("Buffer length: {} lines", self.config.buffer_len);
        info!("Line width: {} symbols", self.config.line_width);
        info!("Tick interval: {:?}", self.config.tick_interval());
        info!("Emphasis probability: {}", self.config.emphasis_probability);
        if self.max_ticks > 0 {
            info!("Stopping after {} ticks", self.max_ticks);
        }

        let generator = RollingStreamGenerator::new(self.config.clone())
            .context("Failed to create stream generator")?;
        let mut snapshots = generator.subscribe();
        let metrics = generator.metrics();

        // Dropping the handle on an early return aborts the timer
        let handle = generator.spawn();

        let initial = snapshots.borrow_and_update().clone();
        self.draw(&initial, &metrics)?;

        let shutdown = wait_for_shutdown();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                signal = &mut shutdown => {
                    signal?;
                    info!("Shutdown signal received");
                    break;
                }
                changed = snapshots.changed() => {
                    if changed.is_err() {
                        warn!("Generator stopped publishing unexpectedly");
                        break;
                    }

                    let snapshot = snapshots.borrow_and_update().clone();
                    self.draw(&snapshot, &metrics)?;

                    if self.max_ticks > 0 && snapshot.sequence >= self.max_ticks {
                        info!("Reached {} ticks", snapshot.sequence);
                        break;
                    }
                }
            }
        }

        let last = handle.stop().await.context("Failed to stop stream generator")?;
        info!(
            "Sidebar shut down gracefully (last snapshot #{}, {} lines)",
            last.sequence,
            last.len()
        );
        info!("Final metrics:\n{}", metrics.prometheus_format());

        Ok(())
    }

    /// Render one frame with fresh emphasis draws
    fn draw(&mut self, snapshot: &Snapshot, metrics: &GeneratorMetrics) -> Result<()> {
        let rendered = emphasis::render_pass(
            snapshot,
            &mut self.emphasis_rng,
            self.config.emphasis_probability,
        );
        let frame = render::frame(&rendered, self.style);

        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(frame.as_bytes())
            .context("Failed to write frame")?;
        if self.style == Style::Plain {
            writeln!(stdout).context("Failed to write frame")?;
        }
        stdout.flush().context("Failed to flush frame")?;

        metrics.record_render();
        Ok(())
    }
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn wait_for_shutdown() -> Result<()> {
    #[cfg(unix)]
    {
        use futures::stream::StreamExt;
        use signal_hook::consts::signal::*;
        use signal_hook_tokio::Signals;

        let mut signals =
            Signals::new([SIGINT, SIGTERM]).context("Failed to register signal handlers")?;

        if let Some(signal) = signals.next().await {
            info!("Received signal: {:?}", signal);
        }
    }

    #[cfg(windows)]
    {
        tokio::signal::ctrl_c()
            .await
            .context("Failed to listen for Ctrl+C")?;
        info!("Received Ctrl+C signal");
    }

    Ok(())
}

fn load_config(args: &Args) -> Result<StreamConfig> {
    if args.env_mode {
        info!("Loading configuration from environment variables");
        StreamConfig::from_env().context("Failed to load configuration from environment")
    } else if let Some(path) = &args.config {
        info!("Loading configuration from file: {:?}", path);
        StreamConfig::from_file(path).context("Failed to load configuration from file")
    } else {
        info!("No configuration given, using defaults");
        Ok(StreamConfig::default())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Initialize tracing; stdout carries the frames
    let log_level = args
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = load_config(&args)?;
    let style = if args.plain { Style::Plain } else { Style::Ansi };

    Sidebar::new(config, style, args.ticks).run().await
}
