//! Error types for the redlines engine

use thiserror::Error;

/// Errors raised while configuring the engine or validating its output
#[derive(Debug, Error)]
pub enum RedlineError {
    /// The requested tokenizer strategy does not exist
    #[error("invalid tokenizer choice: {value:?} (expected \"pattern\" or \"linguistic\")")]
    InvalidTokenizer { value: String },

    /// An opcode list does not tile the two token sequences
    #[error("invalid opcode at position {index}: {reason}")]
    InvalidOpcodes { index: usize, reason: String },

    /// A configuration document could not be parsed
    #[error("failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RedlineError>;
