//! Byte frequency analysis.
//!
//! A `FrequencyTable` counts every byte value 0-255 of an input in a single
//! pass. Symbols that never occur are not part of the table: `iter` and
//! `distinct` only see counts of at least one.

use crate::bitio::BUFFER_SIZE;
use std::io::{self, Read};

/// Occurrence count for each of the 256 byte values.
///
/// # Invariants
/// - `total()` equals the number of bytes recorded
#[derive(Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self { counts: [0; 256] }
    }

    /// Count every byte of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut table = Self::new();
        table.record(bytes);
        table
    }

    /// Count every byte of `source` in one pass, reading in block-sized chunks.
    pub fn from_reader<R: Read>(mut source: R) -> io::Result<Self> {
        let mut table = Self::new();
        let mut chunk = vec![0u8; BUFFER_SIZE];

        loop {
            let n = match source.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            table.record(&chunk[..n]);
        }

        Ok(table)
    }

    /// Add every byte of `bytes` to the counts.
    pub fn record(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.counts[byte as usize] += 1;
        }
    }

    /// Set the count for one symbol, replacing any previous value.
    pub fn set(&mut self, symbol: u8, count: u64) {
        self.counts[symbol as usize] = count;
    }

    /// Occurrences of `symbol` (zero if absent).
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Sum of all counts, i.e. the length of the analyzed input.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of distinct symbols present.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Present symbols with their counts, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, count) in iter {
            table.set(symbol, count);
        }
        table
    }
}
