use std::{ops::Range, panic, thread};

use serde::Serialize;

use super::{color::*, error::*, palette::*};

#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    pub threads: usize,
}

impl Default for RunConfig {
    fn default() -> RunConfig {
        RunConfig { threads: 1 }
    }
}

/// For every palette slot, the index of the entry closest to that slot's
/// tinted color. Always as long as the palette it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MatchIndex(pub Vec<usize>);

impl MatchIndex {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &usize> {
        self.0.iter()
    }
}

impl Palette {
    /// Blends `tint` over every entry and maps the result back onto the
    /// palette. Slots are independent, so with more than one thread the
    /// palette is split into contiguous chunks.
    pub fn shift(&self, tint: Tint, cfg: RunConfig) -> Result<MatchIndex, ShiftError> {
        if self.is_empty() {
            return Err(ShiftError::EmptyPalette);
        }

        let threads = cfg.threads.max(1).min(self.len());
        if threads == 1 {
            return self.shift_range(tint, 0..self.len()).map(MatchIndex);
        }

        let chunk = self.len().div_ceil(threads);
        thread::scope(|s| -> Result<MatchIndex, ShiftError> {
            let handles: Vec<_> = (0..self.len())
                .step_by(chunk)
                .map(|start| {
                    let end = usize::min(start + chunk, self.len());
                    s.spawn(move || self.shift_range(tint, start..end))
                })
                .collect();

            let mut indices = Vec::with_capacity(self.len());
            for h in handles {
                indices.extend(h.join().unwrap_or_else(|e| panic::resume_unwind(e))?);
            }
            Ok(MatchIndex(indices))
        })
    }

    fn shift_range(&self, tint: Tint, slots: Range<usize>) -> Result<Vec<usize>, ShiftError> {
        self.colors()[slots]
            .iter()
            .map(|&base| self.closest(tint.apply(base)))
            .collect()
    }
}
