//! Fixed-width binary stream lines
//!
//! A [`StreamLine`] is one row of the sidebar effect: a short string over the
//! alphabet `{0, 1}`. Lines are immutable once generated.

use crate::{Error, Result};
use rand::Rng;
use std::fmt;
use std::sync::Arc;

/// Immutable fixed-width string of binary symbols
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreamLine(Arc<str>);

impl StreamLine {
    /// Generate a line of `width` independent fair-coin symbols
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, width: usize) -> Self {
        let text: String = (0..width)
            .map(|_| if rng.gen_bool(0.5) { '1' } else { '0' })
            .collect();
        Self(text.into())
    }

    /// Parse a line from text, accepting only non-empty strings of `0` and `1`
    pub fn parse(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Err(Error::Validation("Stream line cannot be empty".to_string()));
        }

        if let Some(bad) = text.chars().find(|c| *c != '0' && *c != '1') {
            return Err(Error::Validation(format!(
                "Invalid symbol {:?} in stream line",
                bad
            )));
        }

        Ok(Self(text.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of symbols in the line
    pub fn width(&self) -> usize {
        self.0.len()
    }

    /// Number of `1` symbols in the line
    pub fn count_ones(&self) -> usize {
        self.0.bytes().filter(|b| *b == b'1').count()
    }
}

impl fmt::Display for StreamLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StreamLine {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_reference_width() {
        let mut rng = StdRng::seed_from_u64(7);
        let line = StreamLine::generate(&mut rng, 6);
        assert_eq!(line.width(), 6);
        assert!(line.as_str().chars().all(|c| c == '0' || c == '1'));
    }

    #[test]
    fn test_generate_is_deterministic_for_seed() {
        let a = StreamLine::generate(&mut StdRng::seed_from_u64(99), 32);
        let b = StreamLine::generate(&mut StdRng::seed_from_u64(99), 32);
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse() {
        let line = StreamLine::parse("010011").unwrap();
        assert_eq!(line.to_string(), "010011");
        assert_eq!(line.count_ones(), 3);

        assert!(StreamLine::parse("").is_err());
        assert!(StreamLine::parse("01a011").is_err());
        assert!(StreamLine::parse("01 011").is_err());
    }

    #[test]
    fn test_symbol_balance_converges() {
        let mut rng = StdRng::seed_from_u64(2025);
        let lines = 20_000;
        let width = 6;

        let ones: usize = (0..lines)
            .map(|_| StreamLine::generate(&mut rng, width).count_ones())
            .sum();
        let ratio = ones as f64 / (lines * width) as f64;

        // 120k symbols: standard deviation of the ratio is ~0.0014
        assert!((ratio - 0.5).abs() < 0.01, "ones ratio {} out of tolerance", ratio);
    }

    proptest! {
        #[test]
        fn prop_generated_lines_are_binary(seed in any::<u64>(), width in 1usize..64) {
            let mut rng = StdRng::seed_from_u64(seed);
            let line = StreamLine::generate(&mut rng, width);
            prop_assert_eq!(line.width(), width);
            prop_assert!(line.as_str().bytes().all(|b| b == b'0' || b == b'1'));
            prop_assert!(StreamLine::parse(line.as_str()).is_ok());
        }
    }
}
