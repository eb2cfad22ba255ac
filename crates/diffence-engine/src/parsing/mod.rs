//! # Diff Block Scanning
//!
//! Locates fenced `diff` blocks in raw Markdown. Two strategies produce the
//! same blocks:
//!
//! - **Lines** (`classify` + `builder`): each line is classified on its own,
//!   then a `FenceScanner` state machine pairs opening and closing fences.
//! - **Backtracking** (`cursor` + `backtrack`): a byte cursor tries the fence
//!   grammar at every line start and rewinds on failure, under a step budget.
//!
//! ## Key Invariants
//!
//! - Blocks are ordered and never overlap; diff fences do not nest
//! - An opening fence with no closing fence produces no block
//! - All spans are byte offsets into the rope

pub mod backtrack;
pub mod builder;
pub mod classify;
pub mod cursor;
pub mod fence;
pub mod invariants;
pub mod rope;
pub mod types;

use xi_rope::Rope;

use crate::error::ScanError;
use crate::options::{FormatOptions, ScannerKind};

pub use builder::FenceScanner;
pub use classify::{DiffLineClassifier, LineClass};
pub use fence::{DiffFence, FenceSig};
pub use types::DiffBlock;

use rope::lines_with_spans;

/// Line-state scan. Never fails.
pub fn scan_lines(rope: &Rope) -> Vec<DiffBlock> {
    let classifier = DiffLineClassifier;
    let mut scanner = FenceScanner::new();

    for lr in lines_with_spans(rope) {
        let lc = classifier.classify(&lr);
        scanner.push(&lc);
    }

    scanner.finish()
}

/// Scans with the strategy selected in `opts`.
pub fn scan(rope: &Rope, opts: &FormatOptions) -> Result<Vec<DiffBlock>, ScanError> {
    match opts.scanner {
        ScannerKind::Lines => Ok(scan_lines(rope)),
        ScannerKind::Backtracking => {
            let text = rope.slice_to_cow(..);
            backtrack::scan_backtracking(&text, opts.limits.scan_budget(rope.len()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::parsing::rope::span::Span;
    use rstest::rstest;

    fn both(text: &str) -> Vec<DiffBlock> {
        let rope = Rope::from(text);
        let lines = scan(&rope, &FormatOptions::default()).unwrap();
        let chars = scan(
            &rope,
            &FormatOptions::default().with_scanner(ScannerKind::Backtracking),
        )
        .unwrap();
        assert_eq!(lines, chars, "scanners disagree on {text:?}");
        invariants::check(rope.len(), &lines).unwrap();
        lines
    }

    #[test]
    fn indented_block_records_fence_indent() {
        let text = "- item\n\n  ```diff\n- old\n+ new\n  ```\n";
        let blocks = both(text);

        assert_eq!(
            blocks,
            vec![DiffBlock {
                span: Span::new(8, text.len()),
                body: Span::new(18, 30),
                start_line: 2,
                end_line: 5,
                fence_indent: 2,
            }]
        );
        assert_eq!(&text[blocks[0].body.range()], "- old\n+ new\n");
    }

    #[test]
    fn inner_diff_fence_is_body_text() {
        let text = "```diff\n-a\n```diff\n+b\n```\n";
        let blocks = both(text);

        assert_eq!(blocks.len(), 1);
        assert_eq!(&text[blocks[0].body.range()], "-a\n```diff\n+b\n");
    }

    #[test]
    fn closing_fence_at_eof() {
        let text = "```diff\n-a\n```";
        let blocks = both(text);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].span, Span::new(0, text.len()));
        assert_eq!(blocks[0].end_line, 2);
    }

    #[test]
    fn empty_body() {
        let blocks = both("```diff\n```\n");
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].body.is_empty());
    }

    #[test]
    fn consecutive_blocks_are_ordered() {
        let text = "```diff\n-a\n```\ntext\n   ```diff trailing words\n+b\n   ```\n";
        let blocks = both(text);

        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].span.end <= blocks[1].span.start);
        assert_eq!(blocks[1].fence_indent, 3);
    }

    #[test]
    fn crlf_documents() {
        let text = "```diff\r\n-a\r\n```\r\n";
        let blocks = both(text);

        assert_eq!(blocks.len(), 1);
        assert_eq!(&text[blocks[0].body.range()], "-a\r\n");
    }

    #[rstest]
    #[case::empty("")]
    #[case::plain("# Title\n\nSome text.\n")]
    #[case::other_language("```rust\nfn main() {}\n```\n")]
    #[case::unterminated("```diff\n-a\n+b\n")]
    #[case::stray_close("```\n-a\n```\n")]
    #[case::tab_indented("\t```diff\n-a\n\t```\n")]
    #[case::tab_indented_close("```diff\n-a\n\t```\n")]
    fn no_blocks(#[case] text: &str) {
        assert!(both(text).is_empty());
    }
}
