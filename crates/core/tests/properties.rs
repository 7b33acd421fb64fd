use proptest::prelude::*;
use redlines_core::normalizers::{Normalizer, ParagraphNormalizer};
use redlines_core::tokenizers::{PatternTokenizer, Tokenizer};
use redlines_core::{
    align, normalize_paragraphs, process, tokenize_text, validate_opcodes, OpTag, Opcode,
    ProcessorConfig, TokenizerType,
};

fn small_alphabet() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(vec!["a", "b", "c", "d", " ", "¶"]), 0..40)
        .prop_map(|tokens| tokens.into_iter().map(str::to_string).collect())
}

fn document_text() -> impl Strategy<Value = String> {
    "[a-c (). ?!\\-\n\t']{0,60}"
}

proptest! {
    #[test]
    fn test_pattern_tokens_round_trip(text in ".*") {
        prop_assert_eq!(tokenize_text(&text, TokenizerType::Pattern).concat(), text);
    }

    #[test]
    fn test_linguistic_tokens_round_trip(text in ".*") {
        prop_assert_eq!(tokenize_text(&text, TokenizerType::Linguistic).concat(), text);
    }

    #[test]
    fn test_tokens_round_trip_on_document_text(text in document_text()) {
        prop_assert_eq!(tokenize_text(&text, TokenizerType::Pattern).concat(), text.clone());
        prop_assert_eq!(tokenize_text(&text, TokenizerType::Linguistic).concat(), text);
    }

    #[test]
    fn test_normalized_text_has_no_newlines(text in document_text()) {
        let normalized = normalize_paragraphs(&text);
        prop_assert!(!normalized.contains('\n'));
        prop_assert_eq!(normalized.trim(), normalized.as_str());
    }

    #[test]
    fn test_original_spans_stay_in_bounds(text in document_text()) {
        let (normalized, map) = ParagraphNormalizer.normalize(&text);
        for token in PatternTokenizer.tokenize_mapped(&normalized, &map) {
            prop_assert!(!token.original_spans.is_empty());
            for span in &token.original_spans {
                prop_assert!(span.start < span.end && span.end <= text.len());
            }
        }
    }

    #[test]
    fn test_opcodes_tile_both_sequences(source in small_alphabet(), test in small_alphabet()) {
        let opcodes = align(&source, &test);
        prop_assert!(validate_opcodes(&opcodes, &source, &test).is_ok());
    }

    #[test]
    fn test_equal_opcodes_match(source in small_alphabet(), test in small_alphabet()) {
        for op in align(&source, &test) {
            if op.tag == OpTag::Equal {
                prop_assert_eq!(&source[op.source_range()], &test[op.test_range()]);
            }
        }
    }

    #[test]
    fn test_identical_sequences_are_one_equal(seq in small_alphabet()) {
        let expected = if seq.is_empty() {
            vec![]
        } else {
            vec![Opcode::new(OpTag::Equal, 0, seq.len(), 0, seq.len())]
        };
        prop_assert_eq!(align(&seq, &seq), expected);
    }

    #[test]
    fn test_alignment_is_deterministic(source in small_alphabet(), test in small_alphabet()) {
        prop_assert_eq!(align(&source, &test), align(&source, &test));
    }

    #[test]
    fn test_process_output_is_valid(source in document_text(), test in document_text()) {
        for tokenizer in [TokenizerType::Pattern, TokenizerType::Linguistic] {
            let config = ProcessorConfig::default().with_tokenizer(tokenizer);
            let redlines = process(&source, &test, Some(config));
            prop_assert_eq!(redlines.len(), 1);

            let redline = &redlines[0];
            prop_assert!(validate_opcodes(
                redline.opcodes(),
                &redline.source().texts(),
                &redline.test().texts(),
            ).is_ok());
            prop_assert_eq!(redline.source().text(), normalize_paragraphs(&source));
        }
    }
}
