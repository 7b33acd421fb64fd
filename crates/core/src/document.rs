//! Document inputs
//!
//! Processors accept either a raw string or anything implementing
//! [`Document`], which adds a location tag and an optional page structure.

use std::borrow::Cow;

/// A text source with optional location metadata
pub trait Document {
    /// The full text of the document
    fn text(&self) -> Cow<'_, str>;

    /// A human-readable location tag, e.g. a file name or page label
    fn location(&self) -> Option<&str> {
        None
    }

    /// The document split into pages; a single page by default
    fn pages(&self) -> Vec<Page<'_>> {
        vec![Page {
            text: self.text(),
            location: self.location(),
        }]
    }
}

/// One page of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    pub text: Cow<'a, str>,
    pub location: Option<&'a str>,
}

impl<'a> Page<'a> {
    pub fn new(text: impl Into<Cow<'a, str>>, location: Option<&'a str>) -> Self {
        Self {
            text: text.into(),
            location,
        }
    }
}

/// A plain text document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextDocument {
    text: String,
    location: Option<String>,
}

impl TextDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            location: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl Document for TextDocument {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }

    fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

/// A document made of labelled pages, e.g. text extracted from a PDF
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagedDocument {
    pages: Vec<TextDocument>,
}

impl PagedDocument {
    pub fn new(pages: Vec<TextDocument>) -> Self {
        Self { pages }
    }

    /// Build from page texts, labelling them `page 1`, `page 2`, ...
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pages = texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| TextDocument::new(text).with_location(format!("page {}", index + 1)))
            .collect();
        Self { pages }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl Document for PagedDocument {
    /// Pages joined by a blank line, so page breaks read as paragraph breaks
    fn text(&self) -> Cow<'_, str> {
        let texts: Vec<&str> = self.pages.iter().map(|p| p.text.as_str()).collect();
        Cow::Owned(texts.join("\n\n"))
    }

    fn pages(&self) -> Vec<Page<'_>> {
        self.pages
            .iter()
            .map(|page| Page::new(page.text.as_str(), page.location()))
            .collect()
    }
}

/// Input accepted by processors: a raw string or a [`Document`]
#[derive(Clone, Copy)]
pub enum DocumentInput<'a> {
    Text(&'a str),
    Document(&'a dyn Document),
}

impl<'a> DocumentInput<'a> {
    pub fn text(&self) -> Cow<'a, str> {
        match *self {
            DocumentInput::Text(text) => Cow::Borrowed(text),
            DocumentInput::Document(document) => document.text(),
        }
    }

    pub fn location(&self) -> Option<&'a str> {
        match *self {
            DocumentInput::Text(_) => None,
            DocumentInput::Document(document) => document.location(),
        }
    }

    pub fn pages(&self) -> Vec<Page<'a>> {
        match *self {
            DocumentInput::Text(text) => vec![Page::new(text, None)],
            DocumentInput::Document(document) => document.pages(),
        }
    }
}

impl<'a> From<&'a str> for DocumentInput<'a> {
    fn from(text: &'a str) -> Self {
        DocumentInput::Text(text)
    }
}

impl<'a> From<&'a String> for DocumentInput<'a> {
    fn from(text: &'a String) -> Self {
        DocumentInput::Text(text)
    }
}

impl<'a> From<&'a TextDocument> for DocumentInput<'a> {
    fn from(document: &'a TextDocument) -> Self {
        DocumentInput::Document(document)
    }
}

impl<'a> From<&'a PagedDocument> for DocumentInput<'a> {
    fn from(document: &'a PagedDocument) -> Self {
        DocumentInput::Document(document)
    }
}

impl<'a> From<&'a dyn Document> for DocumentInput<'a> {
    fn from(document: &'a dyn Document) -> Self {
        DocumentInput::Document(document)
    }
}
