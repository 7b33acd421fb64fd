//! Token alignment
//!
//! Turns two token sequences into an ordered list of [`Opcode`]s using
//! longest-matching-block recursion (see [`SequenceMatcher`]). The opcode list
//! tiles both sequences: ranges are contiguous, start at zero and end at the
//! sequence lengths.

pub mod matcher;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::ops::Range;

pub use matcher::{Match, SequenceMatcher};

/// Kind of edit an opcode describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpTag {
    /// `source[i1..i2] == test[j1..j2]`
    Equal,
    /// `source[i1..i2]` was removed
    Delete,
    /// `test[j1..j2]` was added
    Insert,
    /// `source[i1..i2]` was replaced by `test[j1..j2]`
    Replace,
}

impl OpTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpTag::Equal => "equal",
            OpTag::Delete => "delete",
            OpTag::Insert => "insert",
            OpTag::Replace => "replace",
        }
    }
}

impl fmt::Display for OpTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One edit step: `source[i1..i2]` relates to `test[j1..j2]` as `tag` says
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Opcode {
    pub tag: OpTag,
    pub i1: usize,
    pub i2: usize,
    pub j1: usize,
    pub j2: usize,
}

impl Opcode {
    pub fn new(tag: OpTag, i1: usize, i2: usize, j1: usize, j2: usize) -> Self {
        Self { tag, i1, i2, j1, j2 }
    }

    pub fn source_range(&self) -> Range<usize> {
        self.i1..self.i2
    }

    pub fn test_range(&self) -> Range<usize> {
        self.j1..self.j2
    }

    /// The `(tag, i1, i2, j1, j2)` tuple form
    pub fn as_tuple(&self) -> (&'static str, usize, usize, usize, usize) {
        (self.tag.as_str(), self.i1, self.i2, self.j1, self.j2)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} source[{}..{}] test[{}..{}]",
            self.tag, self.i1, self.i2, self.j1, self.j2
        )
    }
}

/// Align two sequences, returning the opcodes that turn `source` into `test`
///
/// # Example
///
/// ```text
/// align(&["a", "b", "c"], &["a", "x", "c"])
///   == [equal 0..1/0..1, replace 1..2/1..2, equal 2..3/2..3]
/// ```
pub fn align<T: Hash + Eq>(source: &[T], test: &[T]) -> Vec<Opcode> {
    SequenceMatcher::new(source, test).opcodes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<&str> {
        text.split_inclusive(' ').collect()
    }

    #[test]
    fn test_align_replace_in_middle() {
        let ops = align(&words("The cat sat."), &words("The dog sat."));
        assert_eq!(
            ops,
            vec![
                Opcode::new(OpTag::Equal, 0, 1, 0, 1),
                Opcode::new(OpTag::Replace, 1, 2, 1, 2),
                Opcode::new(OpTag::Equal, 2, 3, 2, 3),
            ]
        );
    }

    #[test]
    fn test_align_identical() {
        let seq = words("one two three four");
        assert_eq!(align(&seq, &seq), vec![Opcode::new(OpTag::Equal, 0, 4, 0, 4)]);
    }

    #[test]
    fn test_align_empty_inputs() {
        let empty: Vec<&str> = Vec::new();
        assert!(align(&empty, &empty).is_empty());
        assert_eq!(
            align(&empty, &["Hi"]),
            vec![Opcode::new(OpTag::Insert, 0, 0, 0, 1)]
        );
        assert_eq!(
            align(&["Hi"], &empty),
            vec![Opcode::new(OpTag::Delete, 0, 1, 0, 0)]
        );
    }

    #[test]
    fn test_align_nothing_in_common() {
        assert_eq!(
            align(&["a", "b"], &["c", "d", "e"]),
            vec![Opcode::new(OpTag::Replace, 0, 2, 0, 3)]
        );
    }

    #[test]
    fn test_align_insert_and_delete() {
        assert_eq!(
            align(&["a", "b", "c"], &["a", "c", "d"]),
            vec![
                Opcode::new(OpTag::Equal, 0, 1, 0, 1),
                Opcode::new(OpTag::Delete, 1, 2, 1, 1),
                Opcode::new(OpTag::Equal, 2, 3, 1, 2),
                Opcode::new(OpTag::Insert, 3, 3, 2, 3),
            ]
        );
    }

    #[test]
    fn test_delete_then_insert_become_replace() {
        // The gap between the two shared blocks differs on both sides
        assert_eq!(
            align(&["a", "x", "y", "b"], &["a", "z", "b"]),
            vec![
                Opcode::new(OpTag::Equal, 0, 1, 0, 1),
                Opcode::new(OpTag::Replace, 1, 3, 1, 2),
                Opcode::new(OpTag::Equal, 3, 4, 2, 3),
            ]
        );
    }

    #[test]
    fn test_opcode_tuple_and_display() {
        let op = Opcode::new(OpTag::Replace, 1, 2, 1, 3);
        assert_eq!(op.as_tuple(), ("replace", 1, 2, 1, 3));
        assert_eq!(op.to_string(), "replace source[1..2] test[1..3]");
        assert_eq!(op.source_range(), 1..2);
        assert_eq!(op.test_range(), 1..3);
    }

    #[test]
    fn test_opcode_serializes_lowercase_tag() {
        let json = serde_json::to_string(&Opcode::new(OpTag::Insert, 0, 0, 0, 1)).unwrap();
        assert_eq!(json, r#"{"tag":"insert","i1":0,"i2":0,"j1":0,"j2":1}"#);
    }
}
