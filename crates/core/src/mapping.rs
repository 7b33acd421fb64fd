//! Byte-level mapping between original and normalized text
//!
//! Paragraph normalization trims whitespace and replaces every paragraph
//! boundary with a pilcrow separator. The `CharacterMap` built along the way
//! lets every token of the normalized text point back at the bytes of the
//! original input it came from:
//! - paragraph text maps one-to-one (`Direct`)
//! - separator bytes map to the whole whitespace run they replaced (`Collapsed`)
//! - trimmed whitespace has no normalized counterpart and is simply unmapped

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Represents a span of bytes in text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharSpan {
    /// Start position (inclusive)
    pub start: usize,
    /// End position (exclusive)
    pub end: usize,
}

impl CharSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Slice `text` with this span
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// Where a normalized byte came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharMapping {
    /// One-to-one copy of an original byte
    Direct(usize),

    /// Stands in for a run of original bytes (a paragraph boundary)
    Collapsed(CharSpan),
}

impl CharMapping {
    /// The original bytes covered by this mapping
    pub fn original_span(&self) -> CharSpan {
        match self {
            CharMapping::Direct(pos) => CharSpan::new(*pos, *pos + 1),
            CharMapping::Collapsed(span) => *span,
        }
    }
}

/// Mapping from normalized byte positions to original byte positions
#[derive(Debug, Clone, Default)]
pub struct CharacterMap {
    normalized_to_original: BTreeMap<usize, CharMapping>,

    original_len: usize,
    normalized_len: usize,
}

impl CharacterMap {
    pub fn new(original_len: usize, normalized_len: usize) -> Self {
        Self {
            normalized_to_original: BTreeMap::new(),
            original_len,
            normalized_len,
        }
    }

    /// Create an identity mapping (no transformation)
    pub fn identity(len: usize) -> Self {
        let mut map = Self::new(len, len);
        for i in 0..len {
            map.add_direct_mapping(i, i);
        }
        map
    }

    pub fn add_direct_mapping(&mut self, normalized_pos: usize, original_pos: usize) {
        self.normalized_to_original
            .insert(normalized_pos, CharMapping::Direct(original_pos));
    }

    pub fn add_collapsed_mapping(&mut self, normalized_pos: usize, original_span: CharSpan) {
        self.normalized_to_original
            .insert(normalized_pos, CharMapping::Collapsed(original_span));
    }

    pub fn set_normalized_len(&mut self, len: usize) {
        self.normalized_len = len;
    }

    pub fn normalized_to_original(&self, normalized_pos: usize) -> Option<&CharMapping> {
        self.normalized_to_original.get(&normalized_pos)
    }

    /// Map a span in normalized text to the span(s) it covers in the original
    ///
    /// Overlapping or touching original ranges are merged, so a token that
    /// spans paragraph text and the following boundary yields one span.
    pub fn map_span_to_original(&self, normalized_span: CharSpan) -> Vec<CharSpan> {
        let mut spans: Vec<CharSpan> = Vec::new();

        for norm_pos in normalized_span.start..normalized_span.end {
            let Some(target) = self
                .normalized_to_original(norm_pos)
                .map(CharMapping::original_span)
            else {
                continue;
            };

            match spans.last_mut() {
                Some(last) if target.start <= last.end && target.end >= last.start => {
                    last.start = last.start.min(target.start);
                    last.end = last.end.max(target.end);
                }
                _ => spans.push(target),
            }
        }

        spans
    }

    pub fn original_len(&self) -> usize {
        self.original_len
    }

    pub fn normalized_len(&self) -> usize {
        self.normalized_len
    }
}
