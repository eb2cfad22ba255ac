use crate::error::FormatError;

use super::types::DiffBlock;

/// Validates scanner output against a document of `len` bytes.
///
/// Checks that:
/// - every block span lies within the document
/// - every body span lies within its block span
/// - blocks are ordered and do not overlap
pub fn check(len: usize, blocks: &[DiffBlock]) -> Result<(), FormatError> {
    let mut prev_end = 0usize;
    for b in blocks {
        if b.span.start > b.span.end || b.span.end > len {
            return Err(FormatError::Invariant(format!(
                "block span out of bounds: {:?} (document len: {len})",
                b.span
            )));
        }
        if b.body.start > b.body.end || !b.span.contains(b.body) {
            return Err(FormatError::Invariant(format!(
                "body span not contained in block span: body {:?}, block {:?}",
                b.body, b.span
            )));
        }
        if b.span.start < prev_end {
            return Err(FormatError::Invariant(format!(
                "block {:?} overlaps or precedes the previous block ending at {prev_end}",
                b.span
            )));
        }
        prev_end = b.span.end;
    }
    Ok(())
}
