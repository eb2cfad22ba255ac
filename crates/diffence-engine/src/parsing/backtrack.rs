//! Character-level diff block scanner.
//!
//! ```text
//! Document       → (AnyChar | DiffBlock)*
//! DiffBlock      → DiffBlockStart BodyLine* DiffBlockEnd
//! DiffBlockStart → Spaces "```diff" RestOfLine Newline
//! DiffBlockEnd   → Spaces "```" Blanks CR* (Newline | EOF)
//! ```
//!
//! Fences are only tried at line starts. A failed match restores the cursor
//! and the scan moves on by exactly one byte. Every consumed byte, including
//! bytes later given back by a backtrack, is charged to a step budget; running
//! out yields [`ScanError::LimitExceeded`].

use crate::error::ScanError;
use crate::parsing::rope::span::Span;

use super::{cursor::Cursor, fence::DiffFence, types::DiffBlock};

struct Scanner<'a> {
    cur: Cursor<'a>,
    steps: usize,
    limit: usize,
}

/// Scans `text` for diff blocks, giving up after `limit` steps.
pub fn scan_backtracking(text: &str, limit: usize) -> Result<Vec<DiffBlock>, ScanError> {
    let mut sc = Scanner {
        cur: Cursor::new(text),
        steps: 0,
        limit,
    };
    let mut out = vec![];

    while !sc.cur.eof() {
        if sc.cur.at_line_start()
            && let Some(block) = sc.try_diff_block()?
        {
            out.push(block);
            continue;
        }
        sc.bump()?;
    }

    Ok(out)
}

impl Scanner<'_> {
    fn bump(&mut self) -> Result<Option<u8>, ScanError> {
        self.steps += 1;
        if self.steps > self.limit {
            return Err(ScanError::LimitExceeded {
                steps: self.steps,
                limit: self.limit,
            });
        }
        Ok(self.cur.bump())
    }

    fn bump_n(&mut self, n: usize) -> Result<(), ScanError> {
        for _ in 0..n {
            self.bump()?;
        }
        Ok(())
    }

    fn skip_while(&mut self, pred: impl Fn(u8) -> bool) -> Result<usize, ScanError> {
        let mut n = 0;
        while let Some(b) = self.cur.peek() {
            if !pred(b) {
                break;
            }
            self.bump()?;
            n += 1;
        }
        Ok(n)
    }

    /// Attempts a whole block at the current line start.
    /// On failure the cursor is restored and `None` returned.
    fn try_diff_block(&mut self) -> Result<Option<DiffBlock>, ScanError> {
        let saved = self.cur.clone();
        let start = self.cur.pos();
        let start_line = self.cur.line;

        let Some(fence_indent) = self.try_open()? else {
            self.cur = saved;
            return Ok(None);
        };
        let body_start = self.cur.pos();

        loop {
            if self.cur.eof() {
                // Unterminated: the opening line is plain text after all
                self.cur = saved;
                return Ok(None);
            }

            let line_start = self.cur.pos();
            let line_no = self.cur.line;
            if self.try_close()? {
                return Ok(Some(DiffBlock {
                    span: Span::new(start, self.cur.pos()),
                    body: Span::new(body_start, line_start),
                    start_line,
                    end_line: line_no,
                    fence_indent,
                }));
            }
            self.skip_line()?;
        }
    }

    /// `Spaces "```diff" RestOfLine Newline`. Returns the indent on success.
    fn try_open(&mut self) -> Result<Option<usize>, ScanError> {
        let indent = self.skip_while(|b| b == b' ')?;
        if !self.cur.starts_with(DiffFence::TICKS) {
            return Ok(None);
        }
        self.bump_n(DiffFence::TICKS.len())?;
        if !self.cur.starts_with(DiffFence::LANG) {
            return Ok(None);
        }
        self.bump_n(DiffFence::LANG.len())?;
        self.skip_while(|b| b != b'\n')?;
        if self.cur.peek() != Some(b'\n') {
            return Ok(None);
        }
        self.bump()?;
        Ok(Some(indent))
    }

    /// `Spaces "```" Blanks CR* (Newline | EOF)`. Restores the cursor on failure.
    fn try_close(&mut self) -> Result<bool, ScanError> {
        let saved = self.cur.clone();
        self.skip_while(|b| b == b' ')?;
        if !self.cur.starts_with(DiffFence::TICKS) {
            self.cur = saved;
            return Ok(false);
        }
        self.bump_n(DiffFence::TICKS.len())?;
        self.skip_while(|b| b == b' ' || b == b'\t')?;
        self.skip_while(|b| b == b'\r')?;
        match self.cur.peek() {
            None => Ok(true),
            Some(b'\n') => {
                self.bump()?;
                Ok(true)
            }
            Some(_) => {
                self.cur = saved;
                Ok(false)
            }
        }
    }

    /// Consumes the rest of the current line, newline included.
    fn skip_line(&mut self) -> Result<(), ScanError> {
        while let Some(b) = self.bump()? {
            if b == b'\n' {
                break;
            }
        }
        Ok(())
    }
}
