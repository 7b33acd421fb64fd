//! Redline result types
//!
//! A [`Redline`] pairs two tokenized [`Chunk`]s with the opcodes aligning
//! them. It is built once by [`assemble`] and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::algorithm::{OpTag, Opcode};
use crate::error::{RedlineError, Result};
use crate::tokenizers::Token;

/// A tokenized unit of a document (the whole text, or one page of it)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    tokens: Vec<Token>,

    /// Where the chunk sits in its document, e.g. a page label
    location: Option<String>,
}

impl Chunk {
    pub fn new(tokens: Vec<Token>, location: Option<String>) -> Self {
        Self { tokens, location }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Token texts in order
    pub fn texts(&self) -> Vec<&str> {
        self.tokens.iter().map(Token::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Concatenated text of the tokens in `range`
    pub fn join(&self, range: Range<usize>) -> String {
        self.tokens[range].iter().map(Token::as_str).collect()
    }

    /// The full tokenized text
    pub fn text(&self) -> String {
        self.join(0..self.tokens.len())
    }
}

/// The aligned diff of one chunk pair
///
/// Deserialization re-checks the opcodes against both chunks, so a loaded
/// redline upholds the same invariants as one built by [`assemble`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRedline")]
pub struct Redline {
    source: Chunk,
    test: Chunk,
    opcodes: Vec<Opcode>,
}

/// Unchecked wire form of a [`Redline`]
#[derive(Deserialize)]
struct RawRedline {
    source: Chunk,
    test: Chunk,
    opcodes: Vec<Opcode>,
}

impl TryFrom<RawRedline> for Redline {
    type Error = RedlineError;

    fn try_from(raw: RawRedline) -> Result<Self> {
        validate_opcodes(&raw.opcodes, &raw.source.texts(), &raw.test.texts())?;
        Ok(Redline {
            source: raw.source,
            test: raw.test,
            opcodes: raw.opcodes,
        })
    }
}

impl Redline {
    pub fn source(&self) -> &Chunk {
        &self.source
    }

    pub fn test(&self) -> &Chunk {
        &self.test
    }

    pub fn opcodes(&self) -> &[Opcode] {
        &self.opcodes
    }

    /// Whether the two chunks differ at all
    pub fn has_changes(&self) -> bool {
        self.opcodes.iter().any(|op| op.tag != OpTag::Equal)
    }

    /// Non-equal opcodes with the source and test text they cover
    pub fn changes(&self) -> impl Iterator<Item = (Opcode, String, String)> + '_ {
        self.opcodes
            .iter()
            .filter(|op| op.tag != OpTag::Equal)
            .map(|op| (*op, self.source_text(op), self.test_text(op)))
    }

    /// Source text covered by `opcode`
    pub fn source_text(&self, opcode: &Opcode) -> String {
        self.source.join(opcode.source_range())
    }

    /// Test text covered by `opcode`
    pub fn test_text(&self, opcode: &Opcode) -> String {
        self.test.join(opcode.test_range())
    }

    /// Similarity in `[0, 1]`: twice the equal tokens over the total tokens
    pub fn ratio(&self) -> f64 {
        let total = self.source.len() + self.test.len();
        if total == 0 {
            return 1.0;
        }

        let matched: usize = self
            .opcodes
            .iter()
            .filter(|op| op.tag == OpTag::Equal)
            .map(|op| op.i2 - op.i1)
            .sum();
        2.0 * matched as f64 / total as f64
    }
}

/// Package two chunks and their alignment into a [`Redline`]
///
/// Debug builds check that `opcodes` tile both chunks.
pub fn assemble(source: Chunk, test: Chunk, opcodes: Vec<Opcode>) -> Redline {
    debug_assert!(
        validate_opcodes(&opcodes, &source.texts(), &test.texts()).is_ok(),
        "opcodes do not tile the chunks: {:?}",
        validate_opcodes(&opcodes, &source.texts(), &test.texts()).err()
    );

    Redline {
        source,
        test,
        opcodes,
    }
}

/// Check that `opcodes` is a complete, contiguous alignment of `source` and `test`
pub fn validate_opcodes<T: PartialEq>(opcodes: &[Opcode], source: &[T], test: &[T]) -> Result<()> {
    let invalid = |index: usize, reason: String| RedlineError::InvalidOpcodes { index, reason };

    let (mut i, mut j) = (0, 0);
    for (index, op) in opcodes.iter().enumerate() {
        if op.i1 != i || op.j1 != j {
            return Err(invalid(
                index,
                format!("{op} does not start at source {i}, test {j}"),
            ));
        }
        if op.i2 < op.i1 || op.j2 < op.j1 || op.i2 > source.len() || op.j2 > test.len() {
            return Err(invalid(index, format!("{op} has an out-of-bounds range")));
        }

        let source_len = op.i2 - op.i1;
        let test_len = op.j2 - op.j1;
        let same = source_len == test_len && source[op.source_range()] == test[op.test_range()];

        let ok = match op.tag {
            OpTag::Equal => source_len > 0 && same,
            OpTag::Delete => source_len > 0 && test_len == 0,
            OpTag::Insert => source_len == 0 && test_len > 0,
            OpTag::Replace => source_len > 0 && test_len > 0 && !same,
        };
        if !ok {
            return Err(invalid(index, format!("{op} does not match its tag")));
        }

        i = op.i2;
        j = op.j2;
    }

    if i != source.len() || j != test.len() {
        return Err(invalid(
            opcodes.len(),
            format!(
                "opcodes end at source {i}, test {j} instead of {}, {}",
                source.len(),
                test.len()
            ),
        ));
    }

    Ok(())
}
