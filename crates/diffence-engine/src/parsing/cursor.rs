/// A byte cursor over the whole document that tracks the current line.
///
/// Cloning a cursor is how the backtracking scanner saves a position; assigning
/// the clone back restores it.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The document being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
    /// 0-based line of `i`.
    pub line: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0, line: 0 }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// True at offset 0 or right after a `\n`.
    pub fn at_line_start(&self) -> bool {
        self.i == 0 || self.s.as_bytes().get(self.i - 1) == Some(&b'\n')
    }

    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes()[self.i..].starts_with(pat)
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        if b == b'\n' {
            self.line += 1;
        }
        Some(b)
    }
}
