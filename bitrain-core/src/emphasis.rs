//! Per-render emphasis selection
//!
//! The presentation layer highlights a random subset of lines on every render
//! pass. Selection is redrawn each pass and never stored on the lines, so the
//! highlight pattern flickers independently of the tick rate.

use crate::buffer::Snapshot;
use rand::Rng;

/// A line paired with its emphasis decision for one render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedLine<'a> {
    pub text: &'a str,
    pub emphasized: bool,
}

/// Draw a single emphasis decision with the given probability
///
/// `probability` is clamped to `[0.0, 1.0]`; NaN counts as `0.0`.
pub fn is_emphasized<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    let p = if probability.is_nan() {
        0.0
    } else {
        probability.clamp(0.0, 1.0)
    };
    rng.gen_bool(p)
}

/// Decide emphasis for every line of a snapshot, one independent draw per line
pub fn render_pass<'a, R: Rng + ?Sized>(
    snapshot: &'a Snapshot,
    rng: &mut R,
    probability: f64,
) -> Vec<RenderedLine<'a>> {
    snapshot
        .iter()
        .map(|line| RenderedLine {
            text: line.as_str(),
            emphasized: is_emphasized(rng, probability),
        })
        .collect()
}
