use crate::parsing::rope::{lines::LineRef, span::Span};

use super::fence::{DiffFence, FenceSig};

/// Local facts about one line, independent of its neighbours.
#[derive(Debug, Clone)]
pub struct LineClass {
    /// Full byte span of this line in the rope.
    pub line: Span,
    /// 0-based line number.
    pub number: usize,
    /// Set when the line opens or closes a diff fence.
    pub fence_sig: Option<FenceSig>,
}

/// Classifies individual lines for the line scanner.
pub struct DiffLineClassifier;

impl DiffLineClassifier {
    pub fn classify(&self, lr: &LineRef) -> LineClass {
        LineClass {
            line: lr.span,
            number: lr.number,
            fence_sig: DiffFence::sig(lr.content()),
        }
    }
}
