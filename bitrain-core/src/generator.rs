// SPDX-License-Identifier: MIT
//
// Bitrain: Binary Stream Sidebar Engine
// Copyright (c) 2025 Bitrain Contributors

//! Rolling stream generator
//!
//! Owns the [`StreamBuffer`], rolls it once per tick and publishes a fresh
//! [`Snapshot`] to observers after every change.
//!
//! ```text
//! ┌──────────────┐   tick (T ms)   ┌──────────────┐   watch   ┌──────────────┐
//! │    Timer     │ ───────────────>│  Generator   │ ─────────>│ Presentation │
//! │  (interval)  │                 │  (Buffer)    │ Snapshot  │    layer     │
//! └──────────────┘                 └──────────────┘           └──────────────┘
//! ```
//!
//! The timer loop runs as a tokio task wrapped in a [`GeneratorHandle`]. The
//! handle is the only way to keep the loop alive: `stop()` cancels and joins
//! it, and dropping the handle aborts it.

use crate::buffer::{Snapshot, StreamBuffer};
use crate::config::StreamConfig;
use crate::metrics::GeneratorMetrics;
use crate::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, instrument, warn};

/// Generator of the rolling binary stream
///
/// Construction performs the initial fill and publishes snapshot `0`.
/// Subsequent calls to [`tick`](Self::tick) (directly, or from the timer loop
/// started by [`spawn`](Self::spawn)) roll the buffer and publish again.
pub struct RollingStreamGenerator<R = StdRng> {
    config: StreamConfig,
    rng: R,
    buffer: StreamBuffer,
    sequence: u64,
    metrics: GeneratorMetrics,
    publisher: watch::Sender<Snapshot>,
}

impl RollingStreamGenerator<StdRng> {
    /// Create a generator seeded from `config.seed`, or from OS entropy if unset
    pub fn new(config: StreamConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> RollingStreamGenerator<R> {
    /// Create a generator drawing from the supplied random source
    pub fn with_rng(config: StreamConfig, mut rng: R) -> Result<Self> {
        config.validate()?;

        let buffer = StreamBuffer::filled(&mut rng, config.buffer_len, config.line_width);
        let metrics = GeneratorMetrics::new();
        for line in buffer.iter() {
            metrics.record_line(line);
        }

        let (publisher, _) = watch::channel(buffer.snapshot(0));
        metrics.record_publish();

        debug!(
            "Stream buffer filled with {} lines of width {}",
            buffer.len(),
            buffer.line_width()
        );

        Ok(Self {
            config,
            rng,
            buffer,
            sequence: 0,
            metrics,
            publisher,
        })
    }

    /// Roll the buffer once and publish the result
    ///
    /// Drops the oldest line, appends a freshly generated one and returns the
    /// snapshot that was published.
    pub fn tick(&mut self) -> Snapshot {
        if let Some(rolled) = self.buffer.roll(&mut self.rng) {
            self.metrics.record_line(&rolled.appended);
        }
        self.sequence += 1;
        self.metrics.record_tick();

        let snapshot = self.buffer.snapshot(self.sequence);
        self.publisher.send_replace(snapshot.clone());
        self.metrics.record_publish();

        snapshot
    }

    /// Subscribe to published snapshots
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.publisher.subscribe()
    }

    /// Most recently published snapshot
    pub fn snapshot(&self) -> Snapshot {
        self.publisher.borrow().clone()
    }

    pub fn buffer(&self) -> &StreamBuffer {
        &self.buffer
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub fn metrics(&self) -> GeneratorMetrics {
        self.metrics.clone()
    }
}

impl<R: Rng + Send + 'static> RollingStreamGenerator<R> {
    /// Start the repeating timer on the current tokio runtime
    ///
    /// The first tick fires one full period after this call. Must be called
    /// from within a runtime.
    pub fn spawn(self) -> GeneratorHandle {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let snapshots = self.subscribe();
        let metrics = self.metrics();
        let task = tokio::spawn(self.run(shutdown_rx));

        GeneratorHandle {
            task: Some(task),
            shutdown: Some(shutdown_tx),
            snapshots,
            metrics,
        }
    }

    #[instrument(name = "stream_generator", skip_all)]
    async fn run(mut self, mut shutdown: oneshot::Receiver<()>) -> Snapshot {
        let period = self.config.tick_interval();
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            "Stream generator started ({} lines, {:?} period)",
            self.buffer.len(),
            period
        );

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    let snapshot = self.tick();
                    debug!("Tick #{} published {} lines", snapshot.sequence, snapshot.len());
                }
            }
        }

        info!("Stream generator stopped after {} ticks", self.sequence);
        self.snapshot()
    }
}

/// Scoped owner of a running generator loop
///
/// Dropping the handle aborts the loop, so the timer cannot outlive its owner
/// on any exit path. Call [`stop`](Self::stop) for an orderly shutdown that
/// also returns the final snapshot.
pub struct GeneratorHandle {
    task: Option<JoinHandle<Snapshot>>,
    shutdown: Option<oneshot::Sender<()>>,
    snapshots: watch::Receiver<Snapshot>,
    metrics: GeneratorMetrics,
}

impl GeneratorHandle {
    /// Convenience: build a seeded/entropy generator and start its timer
    pub fn start(config: StreamConfig) -> Result<Self> {
        Ok(RollingStreamGenerator::new(config)?.spawn())
    }

    /// Subscribe to published snapshots
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Most recently published snapshot
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    pub fn metrics(&self) -> GeneratorMetrics {
        self.metrics.clone()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Cancel the timer and wait for the loop to exit
    ///
    /// Returns the last published snapshot, which stays valid for every holder.
    pub async fn stop(mut self) -> Result<Snapshot> {
        if let Some(shutdown) = self.shutdown.take() {
            // Loop already gone if the receiver was dropped
            let _ = shutdown.send(());
        }

        match self.task.take() {
            Some(task) => match task.await {
                Ok(snapshot) => Ok(snapshot),
                Err(e) => {
                    warn!("Generator task ended abnormally: {}", e);
                    Err(e.into())
                }
            },
            None => Ok(self.snapshot()),
        }
    }
}

impl Drop for GeneratorHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            debug!("Generator handle dropped without stop(), aborting timer");
            task.abort();
        }
    }
}
