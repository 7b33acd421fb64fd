//! Text normalizers
//!
//! Provides the `Normalizer` trait and the paragraph normalizer that turns
//! paragraph boundaries into ordinary tokens. Each normalizer transforms text
//! while maintaining a byte-level mapping back to its input.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::mapping::{CharSpan, CharacterMap};

/// Separator substituted for every paragraph boundary
pub const PARAGRAPH_SEPARATOR: &str = " ¶ ";

/// One or more newlines, each optionally followed by spaces
static PARAGRAPH_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\n *)+").expect("static paragraph regex"));

/// Trait for text normalizers
pub trait Normalizer: Send + Sync {
    /// Normalize the input text
    ///
    /// # Returns
    ///
    /// A tuple of (normalized_text, character_map)
    fn normalize(&self, input: &str) -> (String, CharacterMap);

    /// Get the name of this normalizer
    fn name(&self) -> &str;

    /// Clone this normalizer into a Box
    fn clone_box(&self) -> Box<dyn Normalizer>;
}

impl Clone for Box<dyn Normalizer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Leaves text untouched
#[derive(Clone)]
pub struct Passthrough;

impl Normalizer for Passthrough {
    fn normalize(&self, input: &str) -> (String, CharacterMap) {
        (input.to_string(), CharacterMap::identity(input.len()))
    }

    fn name(&self) -> &str {
        "passthrough"
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

/// Flattens paragraphs into one line joined by [`PARAGRAPH_SEPARATOR`]
///
/// `"Hello\n\n  World"` becomes `"Hello ¶ World"`. Separator bytes map back to
/// the whole whitespace run between the two paragraphs; leading and trailing
/// whitespace of the input is dropped.
#[derive(Clone)]
pub struct ParagraphNormalizer;

impl Normalizer for ParagraphNormalizer {
    fn normalize(&self, input: &str) -> (String, CharacterMap) {
        let spans = paragraph_spans(input);
        let mut normalized = String::with_capacity(input.len());
        let mut map = CharacterMap::new(input.len(), 0);
        let mut prev_end = 0;

        for (index, span) in spans.iter().enumerate() {
            let gap = CharSpan::new(prev_end, span.start);

            // Whitespace before the first paragraph stays unmapped
            if index > 0 {
                for offset in 0..PARAGRAPH_SEPARATOR.len() {
                    map.add_collapsed_mapping(normalized.len() + offset, gap);
                }
                normalized.push_str(PARAGRAPH_SEPARATOR);
            }

            for offset in 0..span.len() {
                map.add_direct_mapping(normalized.len() + offset, span.start + offset);
            }
            normalized.push_str(span.slice(input));
            prev_end = span.end;
        }

        map.set_normalized_len(normalized.len());
        (normalized, map)
    }

    fn name(&self) -> &str {
        "paragraph"
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

/// Splits text into trimmed, non-empty paragraphs
///
/// Any run of newlines (each optionally followed by spaces) is one boundary.
///
/// ```text
/// "Hello\n\n  \nWorld" -> ["Hello", "World"]
/// ```
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    paragraph_spans(text)
        .into_iter()
        .map(|span| span.slice(text))
        .collect()
}

/// Re-joins the paragraphs of `text` with [`PARAGRAPH_SEPARATOR`]
///
/// Zero paragraphs produce an empty string and a single paragraph is returned
/// as-is, without a trailing separator.
pub fn normalize_paragraphs(text: &str) -> String {
    split_paragraphs(text).join(PARAGRAPH_SEPARATOR)
}

/// Byte spans of the trimmed paragraphs of `text`, in order
fn paragraph_spans(text: &str) -> Vec<CharSpan> {
    let mut spans = Vec::new();
    let mut start = 0;

    for boundary in PARAGRAPH_BOUNDARY.find_iter(text) {
        push_trimmed(text, start, boundary.start(), &mut spans);
        start = boundary.end();
    }
    push_trimmed(text, start, text.len(), &mut spans);

    spans
}

fn push_trimmed(text: &str, start: usize, end: usize, spans: &mut Vec<CharSpan>) {
    let segment = &text[start..end];
    let trimmed = segment.trim();
    if trimmed.is_empty() {
        return;
    }

    let leading = segment.len() - segment.trim_start().len();
    let trimmed_start = start + leading;
    spans.push(CharSpan::new(trimmed_start, trimmed_start + trimmed.len()));
}
