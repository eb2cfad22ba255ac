/// How a diff body line takes part in re-indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyLineKind {
    /// Unified-diff metadata (`diff `, `---`, `+++`, `@@`, `index `).
    Header,
    /// A removed or added line (`-` / `+`).
    Changed,
    /// Anything else with visible content.
    Context,
    /// Empty or whitespace only.
    Blank,
}

/// One body line split from its line ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLine<'a> {
    pub content: &'a str,
    /// `"\n"`, `"\r\n"` or `""` for a final unterminated line.
    pub ending: &'a str,
    pub kind: BodyLineKind,
}

impl BodyLineKind {
    pub const HEADER_PREFIXES: [&'static str; 5] = ["diff ", "---", "+++", "@@", "index "];

    pub fn of(content: &str) -> Self {
        if content.trim().is_empty() {
            BodyLineKind::Blank
        } else if Self::HEADER_PREFIXES.iter().any(|p| content.starts_with(p)) {
            BodyLineKind::Header
        } else if content.starts_with(['-', '+']) {
            BodyLineKind::Changed
        } else {
            BodyLineKind::Context
        }
    }

    /// Whether the line counts toward the baseline indent and gets padded.
    pub fn is_code(self) -> bool {
        matches!(self, BodyLineKind::Changed | BodyLineKind::Context)
    }
}

impl<'a> BodyLine<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let content = raw.trim_end_matches(['\r', '\n']);
        let ending = &raw[content.len()..];
        BodyLine {
            content,
            ending,
            kind: BodyLineKind::of(content),
        }
    }
}

/// Splits a block body into classified lines. Concatenating
/// `content + ending` of every line reproduces `body` exactly.
pub fn body_lines(body: &str) -> impl Iterator<Item = BodyLine<'_>> {
    body.split_inclusive('\n').map(BodyLine::parse)
}

/// Count of leading ASCII spaces.
pub fn leading_spaces(s: &str) -> usize {
    s.bytes().take_while(|&b| b == b' ').count()
}
