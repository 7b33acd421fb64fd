//! Longest-matching-block sequence matcher
//!
//! The matcher finds the longest contiguous run shared by both sequences,
//! then repeats the search on the regions to the left and right of it until
//! no common tokens remain. The gaps between the resulting matching blocks
//! become `delete`, `insert` or `replace` opcodes.
//!
//! A reverse index (token -> ascending positions in `test`) is built once per
//! matcher and shared by every search, so the recursion never rescans `test`
//! to find candidates. Regions are passed as index ranges and processed from
//! an explicit worklist instead of the call stack.

use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Range;

use tracing::trace;

use super::{OpTag, Opcode};

/// A matching block: `source[source_start..][..size] == test[test_start..][..size]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Match {
    pub source_start: usize,
    pub test_start: usize,
    pub size: usize,
}

impl Match {
    pub fn new(source_start: usize, test_start: usize, size: usize) -> Self {
        Self {
            source_start,
            test_start,
            size,
        }
    }

    pub fn source_end(&self) -> usize {
        self.source_start + self.size
    }

    pub fn test_end(&self) -> usize {
        self.test_start + self.size
    }
}

/// Aligns two token sequences
pub struct SequenceMatcher<'a, T> {
    source: &'a [T],
    test: &'a [T],
    /// Positions of each distinct token in `test`, ascending
    test_index: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Hash + Eq> SequenceMatcher<'a, T> {
    pub fn new(source: &'a [T], test: &'a [T]) -> Self {
        let mut test_index: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (j, token) in test.iter().enumerate() {
            test_index.entry(token).or_default().push(j);
        }

        Self {
            source,
            test,
            test_index,
        }
    }

    /// Find the longest run shared by `source[source_range]` and `test[test_range]`
    ///
    /// Among runs of equal length the one starting earliest in `source` wins,
    /// then the one starting earliest in `test`. When the ranges share no
    /// token the result has size zero and sits at the start of both ranges.
    pub fn find_longest_match(&self, source_range: Range<usize>, test_range: Range<usize>) -> Match {
        let mut best = Match::new(source_range.start, test_range.start, 0);

        // lengths[k + 1] = length of the run ending at (i - 1, test_range.start + k);
        // lengths[0] stays zero so runs cannot extend past the range start
        let offset = test_range.start;
        let mut lengths = vec![0usize; test_range.len() + 1];
        let mut next = vec![0usize; test_range.len() + 1];
        let mut touched: Vec<usize> = Vec::new();
        let mut next_touched: Vec<usize> = Vec::new();

        for i in source_range {
            if let Some(positions) = self.test_index.get(&self.source[i]) {
                let first = positions.partition_point(|&j| j < test_range.start);
                for &j in &positions[first..] {
                    if j >= test_range.end {
                        break;
                    }

                    let k = j - offset;
                    let run = lengths[k] + 1;
                    next[k + 1] = run;
                    next_touched.push(k + 1);

                    if run > best.size {
                        best = Match::new(i + 1 - run, j + 1 - run, run);
                    }
                }
            }

            // Only reset the cells the previous row wrote
            for &k in &touched {
                lengths[k] = 0;
            }
            touched.clear();
            std::mem::swap(&mut lengths, &mut next);
            std::mem::swap(&mut touched, &mut next_touched);
        }

        best
    }

    /// All maximal matching blocks in ascending order, adjacent blocks merged
    ///
    /// The list always ends with the sentinel `Match(len(source), len(test), 0)`.
    pub fn matching_blocks(&self) -> Vec<Match> {
        let mut worklist = vec![(0..self.source.len(), 0..self.test.len())];
        let mut blocks = Vec::new();

        while let Some((source_range, test_range)) = worklist.pop() {
            let found = self.find_longest_match(source_range.clone(), test_range.clone());
            trace!(
                source = ?source_range,
                test = ?test_range,
                size = found.size,
                "longest match"
            );

            if found.size == 0 {
                continue;
            }

            if source_range.start < found.source_start && test_range.start < found.test_start {
                worklist.push((
                    source_range.start..found.source_start,
                    test_range.start..found.test_start,
                ));
            }
            if found.source_end() < source_range.end && found.test_end() < test_range.end {
                worklist.push((
                    found.source_end()..source_range.end,
                    found.test_end()..test_range.end,
                ));
            }
            blocks.push(found);
        }

        blocks.sort_unstable();

        let mut merged: Vec<Match> = Vec::with_capacity(blocks.len() + 1);
        for block in blocks {
            match merged.last_mut() {
                Some(last)
                    if last.source_end() == block.source_start
                        && last.test_end() == block.test_start =>
                {
                    last.size += block.size;
                }
                _ => merged.push(block),
            }
        }

        merged.push(Match::new(self.source.len(), self.test.len(), 0));
        merged
    }

    /// Opcodes that turn `source` into `test`
    ///
    /// A gap before a matching block becomes `replace` when both sides have
    /// tokens, otherwise `delete` or `insert`; each non-empty block becomes
    /// `equal`.
    pub fn opcodes(&self) -> Vec<Opcode> {
        let mut opcodes = Vec::new();
        let (mut i, mut j) = (0, 0);

        for block in self.matching_blocks() {
            let tag = match (i < block.source_start, j < block.test_start) {
                (true, true) => Some(OpTag::Replace),
                (true, false) => Some(OpTag::Delete),
                (false, true) => Some(OpTag::Insert),
                (false, false) => None,
            };
            if let Some(tag) = tag {
                opcodes.push(Opcode::new(tag, i, block.source_start, j, block.test_start));
            }

            i = block.source_end();
            j = block.test_end();
            if block.size > 0 {
                opcodes.push(Opcode::new(OpTag::Equal, block.source_start, i, block.test_start, j));
            }
        }

        opcodes
    }

    /// Similarity in `[0, 1]`: twice the matched tokens over the total tokens
    pub fn ratio(&self) -> f64 {
        let total = self.source.len() + self.test.len();
        if total == 0 {
            return 1.0;
        }

        let matched: usize = self.matching_blocks().iter().map(|m| m.size).sum();
        2.0 * matched as f64 / total as f64
    }
}
