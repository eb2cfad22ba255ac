use crate::parsing::rope::span::Span;

use super::{classify::LineClass, fence::DiffFence, types::DiffBlock};

#[derive(Debug, Clone, Copy)]
enum ScanState {
    Outside,
    InBlock {
        open: Span,
        start_line: usize,
        fence_indent: usize,
    },
}

/// Line state machine: `Outside` until a `` ```diff `` line, then `InBlock`
/// until a bare `` ``` `` line. Fence-open lines seen while inside a block
/// are body text.
pub struct FenceScanner {
    state: ScanState,
    out: Vec<DiffBlock>,
}

impl FenceScanner {
    pub fn new() -> Self {
        Self {
            state: ScanState::Outside,
            out: vec![],
        }
    }

    pub fn push(&mut self, c: &LineClass) {
        match self.state {
            ScanState::Outside => {
                if let Some(fence_indent) = DiffFence::opens(c.fence_sig) {
                    self.state = ScanState::InBlock {
                        open: c.line,
                        start_line: c.number,
                        fence_indent,
                    };
                }
            }
            ScanState::InBlock {
                open,
                start_line,
                fence_indent,
            } => {
                if DiffFence::closes(c.fence_sig) {
                    self.out.push(DiffBlock {
                        span: Span::new(open.start, c.line.end),
                        body: Span::new(open.end, c.line.start),
                        start_line,
                        end_line: c.number,
                        fence_indent,
                    });
                    self.state = ScanState::Outside;
                }
            }
        }
    }

    pub fn finish(self) -> Vec<DiffBlock> {
        if let ScanState::InBlock { start_line, .. } = self.state {
            // Unterminated fence: left alone as ordinary text
            log::debug!("diff fence opened on line {start_line} is never closed");
        }
        self.out
    }
}

impl Default for FenceScanner {
    fn default() -> Self {
        Self::new()
    }
}
