use xi_rope::{Rope, delta::Builder};

use crate::error::FormatError;
use crate::parsing::{invariants, types::DiffBlock};

/// Splices rewritten bodies into `rope`.
///
/// All replacements are recorded against the original offsets in a single
/// delta, so one splice never moves the span of another. Fence lines and
/// everything outside body spans are copied through untouched.
pub fn assemble(rope: &Rope, edits: &[(DiffBlock, String)]) -> Result<Rope, FormatError> {
    if edits.is_empty() {
        return Ok(rope.clone());
    }

    let blocks: Vec<DiffBlock> = edits.iter().map(|(b, _)| *b).collect();
    invariants::check(rope.len(), &blocks)?;

    let mut builder = Builder::new(rope.len());
    for (block, body) in edits {
        builder.replace(block.body.range(), Rope::from(body.as_str()));
    }
    let delta = builder.build();

    Ok(delta.apply(rope))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{rope::span::Span, scan_lines};
    use pretty_assertions::assert_eq;

    fn text_of(rope: &Rope) -> String {
        rope.slice_to_cow(..).into_owned()
    }

    #[test]
    fn no_edits_returns_the_document() {
        let rope = Rope::from("# Title\n");
        assert_eq!(text_of(&assemble(&rope, &[]).unwrap()), "# Title\n");
    }

    #[test]
    fn replaces_bodies_and_keeps_fences() {
        let text = "a\n  ```diff\n-x\n  ```\nb\n  ```diff\n+y\n  ```\n";
        let rope = Rope::from(text);
        let blocks = scan_lines(&rope);
        assert_eq!(blocks.len(), 2);

        let edits = vec![
            (blocks[0], "  -x\n".to_string()),
            (blocks[1], "  +longer line\n".to_string()),
        ];
        let out = assemble(&rope, &edits).unwrap();

        assert_eq!(
            text_of(&out),
            "a\n  ```diff\n  -x\n  ```\nb\n  ```diff\n  +longer line\n  ```\n"
        );
    }

    #[test]
    fn out_of_bounds_span_is_an_invariant_error() {
        let rope = Rope::from("short");
        let bogus = DiffBlock {
            span: Span::new(0, 50),
            body: Span::new(10, 20),
            start_line: 0,
            end_line: 3,
            fence_indent: 0,
        };

        let err = assemble(&rope, &[(bogus, String::new())]).unwrap_err();
        assert!(matches!(err, FormatError::Invariant(_)));
    }
}
