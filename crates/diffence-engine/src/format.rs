use xi_rope::Rope;

use crate::assemble::assemble;
use crate::error::{FormatError, ValidationError};
use crate::options::FormatOptions;
use crate::parsing::{
    invariants,
    rope::{preview, slice_to_string},
    scan,
};
use crate::rewrite::rewrite_body;

/// What a formatting pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatReport {
    pub blocks_found: usize,
    pub blocks_changed: usize,
    pub lines_changed: usize,
    /// The scanner ran out of budget and the input was returned as is.
    pub passthrough: bool,
}

impl FormatReport {
    pub fn changed(&self) -> bool {
        self.lines_changed > 0
    }
}

/// Reformats every fenced diff block in `text`.
///
/// Returns the complete document or an error, never a partial result. A
/// scanner that gives up is not an error: the text comes back unchanged.
pub fn format_markdown(text: &str, opts: &FormatOptions) -> Result<String, FormatError> {
    format_markdown_with_report(text, opts).map(|(out, _)| out)
}

/// Like [`format_markdown`], also reporting what changed.
pub fn format_markdown_with_report(
    text: &str,
    opts: &FormatOptions,
) -> Result<(String, FormatReport), FormatError> {
    let max = opts.limits.max_document_bytes;
    if text.len() > max {
        return Err(ValidationError::DocumentTooLarge {
            len: text.len(),
            max,
        }
        .into());
    }

    let mut report = FormatReport::default();
    let rope = Rope::from(text);

    let blocks = match scan(&rope, opts).map_err(FormatError::from) {
        Ok(blocks) => blocks,
        Err(e) if e.is_recoverable() => {
            log::warn!("leaving document unchanged: {e}");
            report.passthrough = true;
            return Ok((text.to_string(), report));
        }
        Err(e) => return Err(e),
    };
    invariants::check(rope.len(), &blocks)?;
    report.blocks_found = blocks.len();

    if blocks.is_empty() {
        return Ok((text.to_string(), report));
    }

    let mut edits = Vec::with_capacity(blocks.len());
    for block in &blocks {
        log::debug!(
            "diff block on lines {}..={} indent {}: {:?}",
            block.start_line,
            block.end_line,
            block.fence_indent,
            preview(&rope, block.body, 40)
        );

        let body = slice_to_string(&rope, block.body);
        let rewritten = rewrite_body(&body, block.fence_indent, opts.policy, &opts.limits)?;
        if rewritten.changed_lines > 0 {
            report.blocks_changed += 1;
            report.lines_changed += rewritten.changed_lines;
            edits.push((*block, rewritten.text));
        }
    }

    if edits.is_empty() {
        return Ok((text.to_string(), report));
    }

    let out = assemble(&rope, &edits)?;
    Ok((out.slice_to_cow(..).into_owned(), report))
}
