//! Basic usage example of the redlines library

use redlines_core::{
    process, OpTag, PagedDocument, PagedDocumentProcessor, ProcessorConfig, RedlinesProcessor,
    TokenizerType, WholeDocumentProcessor,
};

const LINE: &str = "----------------------------------------";

fn main() {
    println!("=== Redlines Examples ===\n");

    // Example 1: Whole-document comparison with default configuration
    example_simple_redline();

    // Example 2: Linguistic tokenizer
    example_linguistic_tokenizer();

    // Example 3: Page-by-page comparison
    example_paged_documents();
}

fn example_simple_redline() {
    println!("Example 1: Simple Redline");
    println!("{}", LINE);

    let source = "The quick brown fox.\n\nIt jumped over the dog.";
    let test = "The quick red fox.\n\nIt jumped over the lazy dog.\n\nThe end.";

    let redlines = process(source, test, None);
    let redline = &redlines[0];

    println!("Source: {:?}", source);
    println!("Test:   {:?}", test);
    println!("Similarity: {:.2}", redline.ratio());
    println!("\nRendered:");
    println!("  {}", render(redline));
    println!("\n");
}

fn example_linguistic_tokenizer() {
    println!("Example 2: Linguistic Tokenizer");
    println!("{}", LINE);

    let config = ProcessorConfig::default().with_tokenizer(TokenizerType::Linguistic);
    let processor = WholeDocumentProcessor::new(config);
    let redlines = processor.compare("Don't stop now.", "Do not stop now!");

    for (opcode, removed, added) in redlines[0].changes() {
        println!("  {}: {:?} -> {:?}", opcode, removed, added);
    }
    println!("\n");
}

fn example_paged_documents() {
    println!("Example 3: Paged Documents");
    println!("{}", LINE);

    let source = PagedDocument::from_texts(["Terms apply.", "Payment is due monthly."]);
    let test = PagedDocument::from_texts(["Terms apply.", "Payment is due weekly."]);

    let processor = PagedDocumentProcessor::default();
    for redline in processor.compare(&source, &test) {
        let location = redline.source().location().unwrap_or("(none)");
        println!("  {}: {}", location, render(&redline));
    }
    println!("\n");
}

/// Markdown-ish rendering: `~~deleted~~` and `**inserted**`
fn render(redline: &redlines_core::Redline) -> String {
    let mut out = String::new();
    for opcode in redline.opcodes() {
        let removed = redline.source_text(opcode);
        let added = redline.test_text(opcode);
        match opcode.tag {
            OpTag::Equal => out.push_str(&removed),
            OpTag::Delete => out.push_str(&format!("~~{}~~", removed)),
            OpTag::Insert => out.push_str(&format!("**{}**", added)),
            OpTag::Replace => out.push_str(&format!("~~{}~~**{}**", removed, added)),
        }
    }
    out
}
