//! Text tokenizers
//!
//! Provides the `Tokenizer` trait and the two strategies the engine ships with:
//!
//! - [`PatternTokenizer`]: words and parentheses, each carrying its trailing
//!   whitespace (`"The cat (sat)."` -> `["The ", "cat ", "(", "sat", ")", "."]`)
//! - [`LinguisticTokenizer`]: Unicode word boundaries plus English clitic rules,
//!   with whitespace emitted as tokens of its own
//!
//! Both strategies tile their input: concatenating the token texts in order
//! gives back the input exactly.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::config::TokenizerType;
use crate::mapping::{CharSpan, CharacterMap};

/// A single token of a chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The token text, trailing whitespace included
    pub text: String,

    /// Byte span in the tokenized (normalized) text
    pub span: CharSpan,

    /// Byte span(s) in the original input
    pub original_spans: Vec<CharSpan>,

    /// Token index in the sequence
    pub index: usize,
}

impl Token {
    pub fn new(text: String, span: CharSpan, original_spans: Vec<CharSpan>, index: usize) -> Self {
        Self {
            text,
            span,
            original_spans,
            index,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Get the start position in the original text
    pub fn original_start(&self) -> Option<usize> {
        self.original_spans.first().map(|s| s.start)
    }

    /// Get the end position in the original text
    pub fn original_end(&self) -> Option<usize> {
        self.original_spans.last().map(|s| s.end)
    }
}

/// Trait for tokenizers that split text into tokens
pub trait Tokenizer: Send + Sync {
    /// Byte spans of the tokens of `text`, in order, with no gaps or overlaps
    fn segment(&self, text: &str) -> Vec<CharSpan>;

    /// Get the name of this tokenizer
    fn name(&self) -> &str;

    /// Clone this tokenizer into a Box
    fn clone_box(&self) -> Box<dyn Tokenizer>;

    /// Tokenize `text`, treating it as its own original
    fn tokenize(&self, text: &str) -> Vec<Token> {
        self.segment(text)
            .into_iter()
            .enumerate()
            .map(|(index, span)| Token::new(span.slice(text).to_string(), span, vec![span], index))
            .collect()
    }

    /// Tokenize normalized `text`, mapping each token back through `map`
    fn tokenize_mapped(&self, text: &str, map: &CharacterMap) -> Vec<Token> {
        self.segment(text)
            .into_iter()
            .enumerate()
            .map(|(index, span)| {
                Token::new(
                    span.slice(text).to_string(),
                    span,
                    map.map_span_to_original(span),
                    index,
                )
            })
            .collect()
    }
}

impl Clone for Box<dyn Tokenizer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Build the tokenizer for a strategy
pub fn tokenizer_for(choice: TokenizerType) -> Box<dyn Tokenizer> {
    match choice {
        TokenizerType::Pattern => Box::new(PatternTokenizer),
        TokenizerType::Linguistic => Box::new(LinguisticTokenizer::new()),
    }
}

/// Tokenize `text` with the given strategy, returning only the token texts
pub fn tokenize_text(text: &str, choice: TokenizerType) -> Vec<String> {
    tokenizer_for(choice)
        .segment(text)
        .into_iter()
        .map(|span| span.slice(text).to_string())
        .collect()
}

// ============================================================================
// Pattern tokenizer
// ============================================================================

/// A run of characters that are neither whitespace nor parentheses, or a
/// single parenthesis or `.?!-`, each followed by any whitespace. The `\s+`
/// alternative only fires for whitespace at the very start of the text, which
/// no other alternative can claim.
static PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:[^()\s]+|[().?!-]|\s+)\s*").expect("static token regex"));

/// Regex tokenizer that attaches trailing whitespace to each token
#[derive(Clone)]
pub struct PatternTokenizer;

impl Tokenizer for PatternTokenizer {
    fn segment(&self, text: &str) -> Vec<CharSpan> {
        PATTERN
            .find_iter(text)
            .map(|m| CharSpan::new(m.start(), m.end()))
            .collect()
    }

    fn name(&self) -> &str {
        "pattern"
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(self.clone())
    }
}

// ============================================================================
// Linguistic tokenizer
// ============================================================================

/// English segmentation rules layered over Unicode word boundaries
struct EnglishRules {
    /// Clitic suffixes split off a word: `don't` -> `do` + `n't`
    clitics: Regex,
}

impl EnglishRules {
    fn new() -> Self {
        Self {
            clitics: Regex::new(r"(?i)^(\w+?)(n['’]t|['’](?:s|re|ve|ll|d|m))$")
                .expect("static clitic regex"),
        }
    }

    /// Split a word segment starting at `start` into one or two spans
    fn split_word(&self, word: &str, start: usize, out: &mut Vec<CharSpan>) {
        match self.clitics.captures(word).and_then(|c| c.get(2)) {
            Some(suffix) => {
                out.push(CharSpan::new(start, start + suffix.start()));
                out.push(CharSpan::new(start + suffix.start(), start + word.len()));
            }
            None => out.push(CharSpan::new(start, start + word.len())),
        }
    }
}

/// Shared rule set, built on first use and never mutated afterwards
static ENGLISH: Lazy<EnglishRules> = Lazy::new(EnglishRules::new);

/// Word and punctuation segmentation with whitespace as separate tokens
///
/// `"Don't stop."` -> `["Do", "n't", " ", "stop", "."]`
#[derive(Clone)]
pub struct LinguisticTokenizer {
    rules: &'static EnglishRules,
}

impl LinguisticTokenizer {
    pub fn new() -> Self {
        Self { rules: &ENGLISH }
    }
}

impl Default for LinguisticTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for LinguisticTokenizer {
    fn segment(&self, text: &str) -> Vec<CharSpan> {
        let mut spans: Vec<CharSpan> = Vec::new();
        let mut last_was_space = false;

        for (start, segment) in text.split_word_bound_indices() {
            let is_space = segment.chars().all(char::is_whitespace);

            if is_space {
                // Consecutive whitespace segments (e.g. "\n" then "  ") form one token
                match spans.last_mut() {
                    Some(last) if last_was_space => last.end = start + segment.len(),
                    _ => spans.push(CharSpan::new(start, start + segment.len())),
                }
            } else {
                self.rules.split_word(segment, start, &mut spans);
            }
            last_was_space = is_space;
        }

        spans
    }

    fn name(&self) -> &str {
        "linguistic"
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(Token::as_str).collect()
    }

    #[test]
    fn test_pattern_tokenizer() {
        let tokens = PatternTokenizer.tokenize("The cat sat.");
        assert_eq!(texts(&tokens), vec!["The ", "cat ", "sat."]);
        assert_eq!(tokens[1].index, 1);
        assert_eq!(tokens[1].span, CharSpan::new(4, 8));
    }

    #[test]
    fn test_pattern_tokenizer_parentheses() {
        let tokens = tokenize_text("call (now) - please", TokenizerType::Pattern);
        assert_eq!(tokens, vec!["call ", "(", "now", ") ", "- ", "please"]);
    }

    #[test]
    fn test_pattern_tokenizer_pilcrow() {
        let tokens = tokenize_text("Hello ¶ World", TokenizerType::Pattern);
        assert_eq!(tokens, vec!["Hello ", "¶ ", "World"]);
    }

    #[test]
    fn test_pattern_tokenizer_keeps_leading_whitespace() {
        let tokens = tokenize_text("  \tlead", TokenizerType::Pattern);
        assert_eq!(tokens, vec!["  \t", "lead"]);
        assert_eq!(tokens.concat(), "  \tlead");
    }

    #[test]
    fn test_pattern_tokenizer_empty() {
        assert!(tokenize_text("", TokenizerType::Pattern).is_empty());
    }

    #[test]
    fn test_linguistic_tokenizer() {
        let tokens = tokenize_text("Hello, world!", TokenizerType::Linguistic);
        assert_eq!(tokens, vec!["Hello", ",", " ", "world", "!"]);
    }

    #[test]
    fn test_linguistic_tokenizer_clitics() {
        let tokens = tokenize_text("Don't stop, it's late.", TokenizerType::Linguistic);
        assert_eq!(
            tokens,
            vec!["Do", "n't", " ", "stop", ",", " ", "it", "'s", " ", "late", "."]
        );
    }

    #[test]
    fn test_linguistic_tokenizer_merges_whitespace() {
        let tokens = tokenize_text("a \n  b", TokenizerType::Linguistic);
        assert_eq!(tokens, vec!["a", " \n  ", "b"]);
    }

    #[test]
    fn test_linguistic_produces_more_tokens() {
        let text = "The cat sat. It's (very) fine.";
        let pattern = tokenize_text(text, TokenizerType::Pattern);
        let linguistic = tokenize_text(text, TokenizerType::Linguistic);
        assert!(linguistic.len() > pattern.len());
        assert_eq!(pattern.concat(), text);
        assert_eq!(linguistic.concat(), text);
    }

    #[test]
    fn test_tokenize_mapped_reports_original_spans() {
        use crate::normalizers::{Normalizer, ParagraphNormalizer};

        let original = "Hello\n\nWorld";
        let (normalized, map) = ParagraphNormalizer.normalize(original);
        let tokens = PatternTokenizer.tokenize_mapped(&normalized, &map);

        assert_eq!(texts(&tokens), vec!["Hello ", "¶ ", "World"]);
        assert_eq!(tokens[0].original_spans, vec![CharSpan::new(0, 7)]);
        assert_eq!(tokens[1].original_spans, vec![CharSpan::new(5, 7)]);
        assert_eq!(tokens[2].original_start(), Some(7));
        assert_eq!(tokens[2].original_end(), Some(12));
    }
}
