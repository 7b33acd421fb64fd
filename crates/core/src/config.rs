//! Configuration for redlines processors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{RedlineError, Result};

/// Tokenizer strategy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerType {
    /// Regex tokens with trailing whitespace attached (default)
    #[default]
    #[serde(alias = "regex")]
    Pattern,
    /// Word-boundary segmentation with whitespace as separate tokens
    #[serde(alias = "spacy")]
    Linguistic,
}

impl TokenizerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenizerType::Pattern => "pattern",
            TokenizerType::Linguistic => "linguistic",
        }
    }
}

impl fmt::Display for TokenizerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenizerType {
    type Err = RedlineError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pattern" | "regex" => Ok(TokenizerType::Pattern),
            "linguistic" | "spacy" => Ok(TokenizerType::Linguistic),
            _ => Err(RedlineError::InvalidTokenizer {
                value: value.to_string(),
            }),
        }
    }
}

/// Configuration shared by all processors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Tokenizer strategy
    pub tokenizer: TokenizerType,

    /// Replace paragraph boundaries with pilcrow tokens before tokenizing
    pub normalize_paragraphs: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessorConfig {
    pub fn new() -> Self {
        Self {
            tokenizer: TokenizerType::default(),
            normalize_paragraphs: true,
        }
    }

    /// Set the tokenizer strategy
    pub fn with_tokenizer(mut self, tokenizer: TokenizerType) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Enable or disable paragraph normalization
    pub fn with_paragraph_normalization(mut self, enable: bool) -> Self {
        self.normalize_paragraphs = enable;
        self
    }

    /// Load a configuration from JSON; missing fields take their defaults
    ///
    /// ```text
    /// {"tokenizer": "linguistic", "normalize_paragraphs": false}
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProcessorConfig::default();
        assert_eq!(config.tokenizer, TokenizerType::Pattern);
        assert!(config.normalize_paragraphs);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ProcessorConfig::new()
            .with_tokenizer(TokenizerType::Linguistic)
            .with_paragraph_normalization(false);

        assert_eq!(config.tokenizer, TokenizerType::Linguistic);
        assert!(!config.normalize_paragraphs);
    }

    #[test]
    fn test_parse_tokenizer_type() {
        assert_eq!("pattern".parse::<TokenizerType>().unwrap(), TokenizerType::Pattern);
        assert_eq!("REGEX".parse::<TokenizerType>().unwrap(), TokenizerType::Pattern);
        assert_eq!(
            " linguistic ".parse::<TokenizerType>().unwrap(),
            TokenizerType::Linguistic
        );
        assert_eq!("spacy".parse::<TokenizerType>().unwrap(), TokenizerType::Linguistic);
    }

    #[test]
    fn test_invalid_tokenizer_type() {
        let err = "bpe".parse::<TokenizerType>().unwrap_err();
        match &err {
            RedlineError::InvalidTokenizer { value } => assert_eq!(value, "bpe"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("\"bpe\""));
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for choice in [TokenizerType::Pattern, TokenizerType::Linguistic] {
            assert_eq!(choice.to_string().parse::<TokenizerType>().unwrap(), choice);
        }
    }

    #[test]
    fn test_from_json() {
        let config = ProcessorConfig::from_json(r#"{"tokenizer": "spacy"}"#).unwrap();
        assert_eq!(config.tokenizer, TokenizerType::Linguistic);
        assert!(config.normalize_paragraphs);

        let config = ProcessorConfig::from_json("{}").unwrap();
        assert_eq!(config, ProcessorConfig::default());
    }

    #[test]
    fn test_from_json_rejects_unknown_tokenizer() {
        let err = ProcessorConfig::from_json(r#"{"tokenizer": "bpe"}"#).unwrap_err();
        assert!(matches!(err, RedlineError::Config(_)));
    }

    #[test]
    fn test_to_json() {
        let json = ProcessorConfig::new()
            .with_tokenizer(TokenizerType::Linguistic)
            .to_json()
            .unwrap();
        assert_eq!(json, r#"{"tokenizer":"linguistic","normalize_paragraphs":true}"#);
    }
}
