//! Fixed-length rolling buffer with FIFO semantics
//!
//! This module implements the stream buffer backing the sidebar: a sequence of
//! [`StreamLine`] values whose length never changes after construction. Each
//! roll drops the oldest line from the front and appends a new one at the back.
//! Observers never see the buffer itself, only immutable [`Snapshot`] copies.

use crate::line::StreamLine;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use rand::Rng;
use std::collections::VecDeque;
use std::sync::Arc;

/// Fixed-length rolling buffer of stream lines
///
/// # Design
///
/// - Single owner: mutated only through `&mut self`, no interior locking
/// - O(1) roll using `VecDeque`
/// - Length and line width are invariant across `roll`
#[derive(Debug, Clone)]
pub struct StreamBuffer {
    lines: VecDeque<StreamLine>,
    line_width: usize,
}

/// Lines exchanged by a single roll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rolled {
    /// Oldest line, removed from the front
    pub evicted: StreamLine,
    /// Freshly generated line, appended at the back
    pub appended: StreamLine,
}

impl StreamBuffer {
    /// Create a buffer populated with `len` freshly generated lines
    pub fn filled<R: Rng + ?Sized>(rng: &mut R, len: usize, line_width: usize) -> Self {
        let lines = (0..len)
            .map(|_| StreamLine::generate(rng, line_width))
            .collect();

        Self { lines, line_width }
    }

    /// Create a buffer from existing lines
    ///
    /// Fails if `lines` is empty or the lines differ in width.
    pub fn from_lines(lines: impl IntoIterator<Item = StreamLine>) -> Result<Self> {
        let lines: VecDeque<StreamLine> = lines.into_iter().collect();

        let line_width = match lines.front() {
            Some(first) => first.width(),
            None => {
                return Err(Error::Validation(
                    "Stream buffer needs at least one line".to_string(),
                ))
            }
        };

        if let Some(odd) = lines.iter().find(|l| l.width() != line_width) {
            return Err(Error::Validation(format!(
                "Line width {} does not match buffer width {}",
                odd.width(),
                line_width
            )));
        }

        Ok(Self { lines, line_width })
    }

    /// Drop the oldest line and append a freshly generated one
    ///
    /// Returns `None` for an empty buffer, which stays empty.
    pub fn roll<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Rolled> {
        let evicted = self.lines.pop_front()?;
        let appended = StreamLine::generate(rng, self.line_width);
        self.lines.push_back(appended.clone());
        Some(Rolled { evicted, appended })
    }

    /// Take an immutable copy tagged with `sequence`
    pub fn snapshot(&self, sequence: u64) -> Snapshot {
        Snapshot {
            sequence,
            generated_at: Utc::now(),
            lines: self.lines.iter().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_width(&self) -> usize {
        self.line_width
    }

    /// Newest line
    pub fn back(&self) -> Option<&StreamLine> {
        self.lines.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StreamLine> {
        self.lines.iter()
    }
}

/// Immutable published view of the stream buffer
///
/// Cloning is cheap: the lines are shared behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// 0 for the initial fill, incremented once per tick
    pub sequence: u64,
    /// UTC time the snapshot was taken
    pub generated_at: DateTime<Utc>,
    lines: Arc<[StreamLine]>,
}

impl Snapshot {
    pub fn lines(&self) -> &[StreamLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StreamLine> {
        self.lines.iter()
    }
}
