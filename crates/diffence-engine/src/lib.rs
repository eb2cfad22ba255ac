//! Re-indents fenced `diff` blocks inside Markdown so their changed lines line
//! up with the fence that opens them.
//!
//! ```
//! use diffence_engine::{FormatOptions, format_markdown};
//!
//! let doc = "  ```diff\n- old\n+ new\n  ```\n";
//! let out = format_markdown(doc, &FormatOptions::default()).unwrap();
//! assert_eq!(out, "  ```diff\n  - old\n  + new\n  ```\n");
//! ```

pub mod assemble;
pub mod error;
pub mod format;
pub mod options;
pub mod parsing;
pub mod rewrite;

pub use error::{FormatError, ScanError, ValidationError};
pub use format::{FormatReport, format_markdown, format_markdown_with_report};
pub use options::{FormatOptions, IndentPolicy, Limits, ScannerKind};
pub use parsing::{DiffBlock, scan};
pub use rewrite::{BodyLineKind, rewrite_body};
