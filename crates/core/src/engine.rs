//! Redlines processors
//!
//! A processor turns two documents into one [`Redline`] per compared chunk.
//! Chunking is the only thing processors disagree on: every chunk pair goes
//! through the same steps:
//! 1. Normalize paragraphs (boundaries become pilcrow tokens)
//! 2. Tokenize both texts with the configured strategy
//! 3. Align the token sequences
//! 4. Assemble the redline

use tracing::debug;

use crate::algorithm::align;
use crate::config::ProcessorConfig;
use crate::diff::{assemble, Chunk, Redline};
use crate::document::DocumentInput;
use crate::normalizers::{Normalizer, ParagraphNormalizer, Passthrough};
use crate::tokenizers::{tokenizer_for, Tokenizer};

/// Generates redlines from two documents
///
/// Implementations hold no mutable state, so one processor can serve
/// concurrent calls from several threads.
pub trait RedlinesProcessor: Send + Sync {
    /// Compare `source` against `test`
    fn process(&self, source: DocumentInput<'_>, test: DocumentInput<'_>) -> Vec<Redline>;

    /// Get the name of this processor
    fn name(&self) -> &str;

    /// [`process`](Self::process) for anything convertible into a [`DocumentInput`]
    fn compare<'a, 'b>(
        &self,
        source: impl Into<DocumentInput<'a>>,
        test: impl Into<DocumentInput<'b>>,
    ) -> Vec<Redline>
    where
        Self: Sized,
    {
        self.process(source.into(), test.into())
    }
}

/// Normalizes, tokenizes and aligns chunk pairs
#[derive(Clone)]
struct ChunkComparer {
    normalizer: Box<dyn Normalizer>,
    tokenizer: Box<dyn Tokenizer>,
}

impl ChunkComparer {
    fn new(config: &ProcessorConfig) -> Self {
        let normalizer: Box<dyn Normalizer> = if config.normalize_paragraphs {
            Box::new(ParagraphNormalizer)
        } else {
            Box::new(Passthrough)
        };

        Self {
            normalizer,
            tokenizer: tokenizer_for(config.tokenizer),
        }
    }

    fn chunk(&self, text: &str, location: Option<&str>) -> Chunk {
        let (normalized, map) = self.normalizer.normalize(text);
        let tokens = self.tokenizer.tokenize_mapped(&normalized, &map);
        Chunk::new(tokens, location.map(str::to_string))
    }

    fn compare(
        &self,
        source: &str,
        source_location: Option<&str>,
        test: &str,
        test_location: Option<&str>,
    ) -> Redline {
        let source = self.chunk(source, source_location);
        let test = self.chunk(test, test_location);
        let opcodes = align(&source.texts(), &test.texts());

        debug!(
            normalizer = self.normalizer.name(),
            tokenizer = self.tokenizer.name(),
            source_tokens = source.len(),
            test_tokens = test.len(),
            opcodes = opcodes.len(),
            "aligned chunk"
        );

        assemble(source, test, opcodes)
    }
}

/// Compares two documents as a single chunk each
#[derive(Clone)]
pub struct WholeDocumentProcessor {
    config: ProcessorConfig,
    comparer: ChunkComparer,
}

impl WholeDocumentProcessor {
    pub fn new(config: ProcessorConfig) -> Self {
        let comparer = ChunkComparer::new(&config);
        Self { config, comparer }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }
}

impl Default for WholeDocumentProcessor {
    fn default() -> Self {
        Self::new(ProcessorConfig::default())
    }
}

impl RedlinesProcessor for WholeDocumentProcessor {
    /// Always returns exactly one redline
    fn process(&self, source: DocumentInput<'_>, test: DocumentInput<'_>) -> Vec<Redline> {
        let redline = self.comparer.compare(
            &source.text(),
            source.location(),
            &test.text(),
            test.location(),
        );
        vec![redline]
    }

    fn name(&self) -> &str {
        "whole_document"
    }
}

/// Compares two documents page by page
///
/// Pages are paired by position. When one document has more pages, its
/// surplus pages are compared against empty pages, so they show up as pure
/// insertions or deletions.
#[derive(Clone)]
pub struct PagedDocumentProcessor {
    config: ProcessorConfig,
    comparer: ChunkComparer,
}

impl PagedDocumentProcessor {
    pub fn new(config: ProcessorConfig) -> Self {
        let comparer = ChunkComparer::new(&config);
        Self { config, comparer }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }
}

impl Default for PagedDocumentProcessor {
    fn default() -> Self {
        Self::new(ProcessorConfig::default())
    }
}

impl RedlinesProcessor for PagedDocumentProcessor {
    fn process(&self, source: DocumentInput<'_>, test: DocumentInput<'_>) -> Vec<Redline> {
        let source_pages = source.pages();
        let test_pages = test.pages();
        let page_count = source_pages.len().max(test_pages.len());

        debug!(
            source_pages = source_pages.len(),
            test_pages = test_pages.len(),
            "comparing pages"
        );

        (0..page_count)
            .map(|index| {
                let (source_text, source_location) = source_pages
                    .get(index)
                    .map_or(("", None), |page| (page.text.as_ref(), page.location));
                let (test_text, test_location) = test_pages
                    .get(index)
                    .map_or(("", None), |page| (page.text.as_ref(), page.location));

                self.comparer
                    .compare(source_text, source_location, test_text, test_location)
            })
            .collect()
    }

    fn name(&self) -> &str {
        "paged_document"
    }
}
