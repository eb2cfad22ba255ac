//! Re-indentation of diff block bodies.
//!
//! Both policies rewrite line by line and keep every line ending as found.

pub mod body_line;

use crate::error::ValidationError;
use crate::options::{IndentPolicy, Limits};

pub use body_line::{BodyLine, BodyLineKind, body_lines, leading_spaces};

/// Result of rewriting one body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    pub text: String,
    /// Number of lines whose content changed.
    pub changed_lines: usize,
}

/// Rewrites `body` for a block whose opening fence is indented by `fence_indent`.
///
/// Fails before producing any output when `fence_indent` exceeds
/// `limits.max_fence_indent`.
pub fn rewrite_body(
    body: &str,
    fence_indent: usize,
    policy: IndentPolicy,
    limits: &Limits,
) -> Result<Rewritten, ValidationError> {
    if fence_indent > limits.max_fence_indent {
        return Err(ValidationError::FenceIndentTooLarge {
            indent: fence_indent,
            max: limits.max_fence_indent,
        });
    }

    Ok(match policy {
        IndentPolicy::ChangedLines => changed_lines(body, fence_indent),
        IndentPolicy::Baseline => baseline(body, fence_indent),
    })
}

/// Policy A: `" " * n + marker + rest[k..]` for every changed line, everything
/// else untouched. The first space after the marker separates it from the
/// code and stays; only the spaces beyond it can be dropped, at most `n`.
fn changed_lines(body: &str, n: usize) -> Rewritten {
    let indent = " ".repeat(n);
    let mut text = String::with_capacity(body.len());
    let mut changed = 0;

    for line in body_lines(body) {
        if line.kind != BodyLineKind::Changed {
            text.push_str(line.content);
            text.push_str(line.ending);
            continue;
        }

        // `-` and `+` are one byte each, so splitting at 1 is on a char boundary
        let (marker, rest) = line.content.split_at(1);
        let k = n.min(leading_spaces(rest).saturating_sub(1));

        let start = text.len();
        text.push_str(&indent);
        text.push_str(marker);
        text.push_str(&rest[k..]);
        if text[start..] != *line.content {
            changed += 1;
        }
        text.push_str(line.ending);
    }

    Rewritten {
        text,
        changed_lines: changed,
    }
}

/// Policy B: shift all code lines right until the least indented sits at `n`.
fn baseline(body: &str, n: usize) -> Rewritten {
    let min_code_indent = body_lines(body)
        .filter(|l| l.kind.is_code())
        .map(|l| leading_spaces(l.content))
        .min()
        .unwrap_or(0);
    let pad = n.saturating_sub(min_code_indent);

    if pad == 0 {
        return Rewritten {
            text: body.to_string(),
            changed_lines: 0,
        };
    }

    let padding = " ".repeat(pad);
    let mut text = String::with_capacity(body.len());
    let mut changed = 0;

    for line in body_lines(body) {
        if line.kind.is_code() {
            text.push_str(&padding);
            changed += 1;
        }
        text.push_str(line.content);
        text.push_str(line.ending);
    }

    Rewritten {
        text,
        changed_lines: changed,
    }
}
