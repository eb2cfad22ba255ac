use crate::parsing::rope::span::Span;

/// A fenced diff block found by a scanner.
///
/// `span` runs from the first byte of the opening fence line (its indentation
/// included) to the end of the closing fence line (its newline included, if
/// any). `body` covers exactly the lines between the two fences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffBlock {
    pub span: Span,
    pub body: Span,
    /// 0-based line of the opening fence.
    pub start_line: usize,
    /// 0-based line of the closing fence.
    pub end_line: usize,
    /// Leading spaces before the opening backticks.
    pub fence_indent: usize,
}
