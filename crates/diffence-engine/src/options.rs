use serde::{Deserialize, Serialize};

/// How changed lines inside a diff block are re-indented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndentPolicy {
    /// Only `-`/`+` lines move: `fence_indent` spaces go in front of the
    /// marker and up to as many spaces after it are dropped.
    #[default]
    ChangedLines,
    /// Every non-header, non-blank line is shifted right until the least
    /// indented one sits at `fence_indent`.
    Baseline,
}

/// Which fence scanner locates the diff blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScannerKind {
    /// Line state machine. Linear by construction.
    #[default]
    Lines,
    /// Byte cursor with backtracking, bounded by `scan_budget_factor`.
    Backtracking,
}

/// Resource guards applied to every formatting pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Largest accepted document, in bytes.
    pub max_document_bytes: usize,
    /// Largest accepted opening-fence indentation.
    pub max_fence_indent: usize,
    /// Backtracking scan gives up after `scan_budget_factor * (len + 1)` steps.
    pub scan_budget_factor: usize,
}

impl Limits {
    pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 100 * 1024 * 1024;
    pub const DEFAULT_MAX_FENCE_INDENT: usize = 1000;
    pub const DEFAULT_SCAN_BUDGET_FACTOR: usize = 8;

    /// Step ceiling for a document of `len` bytes.
    pub fn scan_budget(&self, len: usize) -> usize {
        self.scan_budget_factor.saturating_mul(len.saturating_add(1))
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_document_bytes: Self::DEFAULT_MAX_DOCUMENT_BYTES,
            max_fence_indent: Self::DEFAULT_MAX_FENCE_INDENT,
            scan_budget_factor: Self::DEFAULT_SCAN_BUDGET_FACTOR,
        }
    }
}

/// Everything a formatting pass needs besides the text itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatOptions {
    pub policy: IndentPolicy,
    pub scanner: ScannerKind,
    pub limits: Limits,
}

impl FormatOptions {
    pub fn with_policy(mut self, policy: IndentPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_scanner(mut self, scanner: ScannerKind) -> Self {
        self.scanner = scanner;
        self
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = FormatOptions::default();
        assert_eq!(opts.policy, IndentPolicy::ChangedLines);
        assert_eq!(opts.scanner, ScannerKind::Lines);
        assert_eq!(opts.limits.max_fence_indent, 1000);
        assert_eq!(opts.limits.max_document_bytes, 100 * 1024 * 1024);
    }

    #[test]
    fn scan_budget_does_not_overflow() {
        let limits = Limits {
            scan_budget_factor: usize::MAX,
            ..Limits::default()
        };
        assert_eq!(limits.scan_budget(10), usize::MAX);
    }
}
