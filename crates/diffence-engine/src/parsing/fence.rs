use std::sync::OnceLock;

use regex::Regex;

/// What a single line looks like from the point of view of diff fences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceSig {
    /// `` ```diff `` with `indent` leading spaces. Anything after the tag is ignored.
    Open { indent: usize },
    /// A bare `` ``` `` line, optionally followed by blanks.
    Close,
}

/// Delimiters of a fenced diff block.
pub struct DiffFence;

impl DiffFence {
    pub const TICKS: &'static [u8] = b"```";
    pub const LANG: &'static [u8] = b"diff";

    /// Classifies one line. `line` may still carry its `\n` / `\r\n`.
    pub fn sig(line: &str) -> Option<FenceSig> {
        static OPEN: OnceLock<Regex> = OnceLock::new();
        static CLOSE: OnceLock<Regex> = OnceLock::new();

        let t = line.trim_end_matches(['\r', '\n']);
        let open =
            OPEN.get_or_init(|| Regex::new(r"^( *)```diff").expect("Invalid open fence regex"));
        if let Some(caps) = open.captures(t) {
            let indent = caps.get(1).map_or(0, |m| m.len());
            return Some(FenceSig::Open { indent });
        }

        let close =
            CLOSE.get_or_init(|| Regex::new(r"^ *```[ \t]*$").expect("Invalid close fence regex"));
        close.is_match(t).then_some(FenceSig::Close)
    }

    pub fn opens(sig: Option<FenceSig>) -> Option<usize> {
        match sig {
            Some(FenceSig::Open { indent }) => Some(indent),
            _ => None,
        }
    }

    pub fn closes(sig: Option<FenceSig>) -> bool {
        matches!(sig, Some(FenceSig::Close))
    }
}
