//! # Redlines Core
//!
//! Compares two versions of a text and describes their differences as
//! tracked changes ("redlines"): equal, inserted, deleted and replaced token
//! spans, ready for an external renderer.
//!
//! ## Core Concepts
//!
//! - **Normalizers**: flatten paragraphs into one line with a `¶` token per
//!   boundary, keeping a byte mapping back to the original text
//! - **Tokenizers**: split text into tokens that concatenate back to it
//! - **Alignment**: longest-matching-block recursion producing opcodes
//! - **Processors**: choose how documents are chunked and emit one
//!   [`Redline`] per chunk pair
//!
//! ## Example
//!
//! ```rust
//! use redlines_core::{OpTag, ProcessorConfig, RedlinesProcessor, TokenizerType, WholeDocumentProcessor};
//!
//! let config = ProcessorConfig::default().with_tokenizer(TokenizerType::Pattern);
//! let processor = WholeDocumentProcessor::new(config);
//! let redlines = processor.compare("The cat sat.", "The dog sat.");
//!
//! for (opcode, removed, added) in redlines[0].changes() {
//!     assert_eq!(opcode.tag, OpTag::Replace);
//!     assert_eq!((removed.as_str(), added.as_str()), ("cat ", "dog "));
//! }
//! ```

pub mod algorithm;
pub mod config;
pub mod diff;
pub mod document;
pub mod engine;
pub mod error;
pub mod mapping;
pub mod normalizers;
pub mod tokenizers;

// Re-export main types
pub use algorithm::{align, OpTag, Opcode, SequenceMatcher};
pub use config::{ProcessorConfig, TokenizerType};
pub use diff::{assemble, validate_opcodes, Chunk, Redline};
pub use document::{Document, DocumentInput, PagedDocument, TextDocument};
pub use engine::{PagedDocumentProcessor, RedlinesProcessor, WholeDocumentProcessor};
pub use error::{RedlineError, Result};
pub use normalizers::{normalize_paragraphs, split_paragraphs};
pub use tokenizers::{tokenize_text, Token};

/// Main entry point for comparing two strings as whole documents
///
/// # Arguments
///
/// * `source` - The original text
/// * `test` - The revised text
/// * `config` - Optional configuration (uses default if None)
///
/// # Example
///
/// ```rust
/// use redlines_core::process;
///
/// let redlines = process("Hello\nWorld", "Hello\nWorld\nAgain", None);
/// assert!(redlines[0].has_changes());
/// ```
pub fn process(source: &str, test: &str, config: Option<ProcessorConfig>) -> Vec<Redline> {
    let config = config.unwrap_or_default();
    WholeDocumentProcessor::new(config).compare(source, test)
}
