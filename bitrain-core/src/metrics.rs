// SPDX-License-Identifier: MIT
//
// Bitrain: Binary Stream Sidebar Engine
// Copyright (c) 2025 Bitrain Contributors

//! Metrics collection and reporting

use crate::line::StreamLine;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Generator metrics collector
#[derive(Clone)]
pub struct GeneratorMetrics {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    start_time: Instant,

    // Generation metrics
    ticks_total: AtomicU64,
    lines_generated: AtomicU64,
    symbols_total: AtomicU64,
    ones_total: AtomicU64,

    // Publication metrics
    snapshots_published: AtomicU64,
    render_passes: AtomicU64,
}

impl Default for GeneratorMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorMetrics {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                start_time: Instant::now(),
                ticks_total: AtomicU64::new(0),
                lines_generated: AtomicU64::new(0),
                symbols_total: AtomicU64::new(0),
                ones_total: AtomicU64::new(0),
                snapshots_published: AtomicU64::new(0),
                render_passes: AtomicU64::new(0),
            }),
        }
    }

    // Generation metrics
    pub fn record_tick(&self) {
        self.inner.ticks_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_lines(&self, lines: u64, symbols: u64, ones: u64) {
        self.inner.lines_generated.fetch_add(lines, Ordering::Relaxed);
        self.inner.symbols_total.fetch_add(symbols, Ordering::Relaxed);
        self.inner.ones_total.fetch_add(ones, Ordering::Relaxed);
    }

    /// Record one generated line
    pub fn record_line(&self, line: &StreamLine) {
        self.record_lines(1, line.width() as u64, line.count_ones() as u64);
    }

    pub fn ticks_total(&self) -> u64 {
        self.inner.ticks_total.load(Ordering::Relaxed)
    }

    pub fn lines_generated(&self) -> u64 {
        self.inner.lines_generated.load(Ordering::Relaxed)
    }

    pub fn symbols_total(&self) -> u64 {
        self.inner.symbols_total.load(Ordering::Relaxed)
    }

    pub fn ones_total(&self) -> u64 {
        self.inner.ones_total.load(Ordering::Relaxed)
    }

    // Publication metrics
    pub fn record_publish(&self) {
        self.inner.snapshots_published.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_render(&self) {
        self.inner.render_passes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshots_published(&self) -> u64 {
        self.inner.snapshots_published.load(Ordering::Relaxed)
    }

    pub fn render_passes(&self) -> u64 {
        self.inner.render_passes.load(Ordering::Relaxed)
    }

    // Derived metrics
    pub fn uptime_seconds(&self) -> u64 {
        self.inner.start_time.elapsed().as_secs()
    }

    /// Fraction of generated symbols equal to `1`
    pub fn ones_ratio(&self) -> Option<f64> {
        let symbols = self.symbols_total();
        if symbols == 0 {
            return None;
        }
        Some(self.ones_total() as f64 / symbols as f64)
    }

    /// Generate Prometheus-compatible metrics output
    pub fn prometheus_format(&self) -> String {
        let mut output = String::new();

        output.push_str("# HELP bitrain_ticks_total Total number of generator ticks\n");
        output.push_str("# TYPE bitrain_ticks_total counter\n");
        output.push_str(&format!("bitrain_ticks_total {}\n", self.ticks_total()));

        output.push_str("# HELP bitrain_lines_generated Total stream lines generated\n");
        output.push_str("# TYPE bitrain_lines_generated counter\n");
        output.push_str(&format!("bitrain_lines_generated {}\n", self.lines_generated()));

        output.push_str("# HELP bitrain_snapshots_published Total snapshots published to observers\n");
        output.push_str("# TYPE bitrain_snapshots_published counter\n");
        output.push_str(&format!(
            "bitrain_snapshots_published {}\n",
            self.snapshots_published()
        ));

        output.push_str("# HELP bitrain_render_passes Total render passes performed\n");
        output.push_str("# TYPE bitrain_render_passes counter\n");
        output.push_str(&format!("bitrain_render_passes {}\n", self.render_passes()));

        output.push_str("# HELP bitrain_uptime_seconds Generator uptime in seconds\n");
        output.push_str("# TYPE bitrain_uptime_seconds gauge\n");
        output.push_str(&format!("bitrain_uptime_seconds {}\n", self.uptime_seconds()));

        if let Some(ratio) = self.ones_ratio() {
            output.push_str("# HELP bitrain_ones_ratio Fraction of generated symbols equal to 1\n");
            output.push_str("# TYPE bitrain_ones_ratio gauge\n");
            output.push_str(&format!("bitrain_ones_ratio {:.6}\n", ratio));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics() {
        let metrics = GeneratorMetrics::new();

        metrics.record_tick();
        metrics.record_tick();
        metrics.record_lines(2, 12, 5);
        metrics.record_publish();
        metrics.record_render();

        assert_eq!(metrics.ticks_total(), 2);
        assert_eq!(metrics.lines_generated(), 2);
        assert_eq!(metrics.symbols_total(), 12);
        assert_eq!(metrics.snapshots_published(), 1);
        assert_eq!(metrics.render_passes(), 1);
    }

    #[test]
    fn test_ones_ratio() {
        let metrics = GeneratorMetrics::new();
        assert_eq!(metrics.ones_ratio(), None);

        metrics.record_lines(10, 60, 30);
        assert_eq!(metrics.ones_ratio(), Some(0.5));
    }

    #[test]
    fn test_record_line() {
        let metrics = GeneratorMetrics::new();
        metrics.record_line(&StreamLine::parse("110100").unwrap());

        assert_eq!(metrics.lines_generated(), 1);
        assert_eq!(metrics.symbols_total(), 6);
        assert_eq!(metrics.ones_total(), 3);
    }

    #[test]
    fn test_prometheus_format() {
        let metrics = GeneratorMetrics::new();
        metrics.record_tick();
        metrics.record_lines(1, 6, 3);

        let output = metrics.prometheus_format();
        assert!(output.contains("bitrain_ticks_total 1\n"));
        assert!(output.contains("bitrain_lines_generated 1\n"));
        assert!(output.contains("bitrain_ones_ratio 0.500000\n"));
    }
}
