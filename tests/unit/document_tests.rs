/*!
 * Tests for token estimation and token-budgeted document segmentation
 */

use rand::Rng;
use echomark::document::{Document, estimate_tokens};

/// A line of exactly 15 words, estimating to 10 tokens
const LINE_15_WORDS: &str =
    "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu nu xi omicron";

/// Build a single line of `count` distinct words
fn line_of_words(count: usize) -> String {
    (0..count).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ")
}

/// Test word counting and the fixed scaling ratio
#[test]
fn test_estimateTokens_withWordCounts_shouldScaleAndTruncate() {
    assert_eq!(estimate_tokens(LINE_15_WORDS), 10);
    assert_eq!(estimate_tokens(&line_of_words(143)), 100);

    // Truncation happens on the floating point product, so ten words land
    // just under seven tokens and truncate down to six
    assert_eq!(estimate_tokens(&line_of_words(10)), 6);

    assert_eq!(estimate_tokens("word"), 0);
    assert_eq!(estimate_tokens("two words"), 1);
}

/// Test that only word-like runs count, not punctuation or whitespace
#[test]
fn test_estimateTokens_withPunctuation_shouldCountWordRunsOnly() {
    // "Hello" and "world" are two runs; the comma and bang are not
    assert_eq!(estimate_tokens("Hello, world!"), 1);

    // The apostrophe splits "can't" into two runs
    assert_eq!(estimate_tokens("can't stop"), 2);

    // Digits count as word characters
    assert_eq!(estimate_tokens("version 2 release"), 2);

    assert_eq!(estimate_tokens(""), 0);
    assert_eq!(estimate_tokens("   \n\t  "), 0);
}

/// Test that a document under budget stays in one segment
#[test]
fn test_splitIntoSegments_withSmallDocument_shouldProduceOneSegment() {
    let content = format!("{}\n{}", LINE_15_WORDS, LINE_15_WORDS);
    let document = Document::new(content.clone(), "small".to_string());

    let segments = document.split_into_segments(128);

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].text, content);
    assert_eq!(segments[0].token_estimate, 20);
}

/// Test that lines too heavy to share a budget split into separate segments
#[test]
fn test_splitIntoSegments_withHeavyLines_shouldCloseSegmentBeforeOverflow() {
    // Three lines of 100 estimated tokens each against a budget of 128:
    // no two fit together, so each line becomes its own segment
    let long_line = line_of_words(143);
    let content = vec![long_line.clone(); 3].join("\n");
    let document = Document::new(content, "heavy".to_string());

    let segments = document.split_into_segments(128);

    assert_eq!(segments.len(), 3);
    for segment in &segments {
        assert_eq!(segment.text, long_line);
        assert_eq!(segment.token_estimate, 100);
    }
}

/// Test that a single line over the budget still forms a segment of its own
#[test]
fn test_splitIntoSegments_withOversizedLine_shouldKeepItWhole() {
    let oversized = line_of_words(215); // about 150 tokens
    let document = Document::new(oversized.clone(), "oversized".to_string());

    let segments = document.split_into_segments(128);

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].text, oversized);
    assert!(segments[0].token_estimate > 128, "estimate should exceed the budget");
}

/// Test that an oversized line between normal lines is isolated, not split
#[test]
fn test_splitIntoSegments_withOversizedLineBetweenSmallOnes_shouldIsolateIt() {
    let oversized = line_of_words(215);
    let content = format!("two words\n{}\nthree more words", oversized);
    let document = Document::new(content, "mixed".to_string());

    let segments = document.split_into_segments(4);

    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0].text, "two words");
    assert_eq!(segments[1].text, oversized);
    assert_eq!(segments[2].text, "three more words");
}

/// Test that a pair of lines landing exactly on the budget stays together
#[test]
fn test_splitIntoSegments_withExactBudgetFit_shouldNotSplit() {
    let content = format!("{}\n{}", LINE_15_WORDS, LINE_15_WORDS);
    let document = Document::new(content, "exact".to_string());

    // 10 + 10 tokens against a budget of exactly 20
    let segments = document.split_into_segments(20);
    assert_eq!(segments.len(), 1);

    // One token less and the second line no longer fits
    let segments = document.split_into_segments(19);
    assert_eq!(segments.len(), 2);
}

/// Test that a segment's estimate is the sum the packing used, not a
/// re-estimate of the joined text
#[test]
fn test_splitIntoSegments_tokenEstimate_isTheAccumulatedLineSum() {
    // Two 10-word lines estimate to 6 tokens each; the joined 20-word text
    // would estimate to 13 on its own
    let content = format!("{}\n{}", line_of_words(10), line_of_words(10));
    let document = Document::new(content, "sums".to_string());

    let segments = document.split_into_segments(128);

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].token_estimate, 12);
}

/// Test that blank lines cost nothing and ride along with the open segment
#[test]
fn test_splitIntoSegments_withBlankLines_shouldAttachThemToTheOpenSegment() {
    let content = "two words\n\n\nmore words here";
    let document = Document::new(content.to_string(), "blanks".to_string());

    let segments = document.split_into_segments(1);

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].text, "two words\n\n");
    assert_eq!(segments[1].text, "more words here");
}

/// Test that joining the segment texts reconstructs the document exactly
#[test]
fn test_splitIntoSegments_withTrailingNewline_shouldReconstructExactly() {
    let content = "# Title\n\nSome body words here.\nA closing line.\n";
    let document = Document::new(content.to_string(), "roundtrip".to_string());

    let segments = document.split_into_segments(2);

    let rebuilt = segments.iter()
        .map(|segment| segment.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    assert_eq!(rebuilt, content);
}

/// Test reconstruction over randomized documents and budgets
#[test]
fn test_splitIntoSegments_withRandomDocuments_shouldNeverLoseContent() {
    let mut rng = rand::rng();

    for _ in 0..25 {
        let line_count = rng.random_range(1..40);
        let lines: Vec<String> = (0..line_count)
            .map(|_| line_of_words(rng.random_range(0..12)))
            .collect();
        let content = lines.join("\n");
        if content.is_empty() {
            continue; // empty documents are covered separately
        }
        let budget = rng.random_range(1..20);

        let document = Document::new(content.clone(), "random".to_string());
        let segments = document.split_into_segments(budget);

        let rebuilt = segments.iter()
            .map(|segment| segment.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(rebuilt, content, "lost content with budget {}", budget);

        let rebuilt_lines: usize = segments.iter()
            .map(|segment| segment.text.split('\n').count())
            .sum();
        assert_eq!(rebuilt_lines, content.split('\n').count());

        // Only a segment holding a single oversized line may exceed the budget
        for segment in &segments {
            assert!(
                segment.token_estimate <= budget as usize || !segment.text.contains('\n'),
                "multi-line segment over budget {}: {:?}", budget, segment
            );
        }
    }
}

/// Test that an empty document splits into nothing
#[test]
fn test_splitIntoSegments_withEmptyDocument_shouldReturnNoSegments() {
    let document = Document::new(String::new(), "empty".to_string());

    assert!(document.is_empty());
    assert!(document.split_into_segments(128).is_empty());
}
