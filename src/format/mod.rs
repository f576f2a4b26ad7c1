//! Message formatting: block scanning followed by inline span resolution.

mod block;
mod inline;

use serde::{Deserialize, Serialize};

pub use block::{BlockKind, BlockNode, InlineText, scan_with};
pub use inline::{DEFAULT_MAX_INLINE_LEN, InlineKind, InlineSpan, resolve, resolve_with};

/// What to do with a code fence still open when the text ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FencePolicy {
    /// Emit the accumulated lines as a code block.
    #[default]
    Flush,
    /// Discard them.
    Drop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub unterminated_fence: FencePolicy,
    /// Block texts longer than this (bytes) are left as a single plain span.
    pub max_inline_len: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            unterminated_fence: FencePolicy::Flush,
            max_inline_len: DEFAULT_MAX_INLINE_LEN,
        }
    }
}

/// Scan `text` into blocks with default options.
pub fn scan(text: &str) -> Vec<BlockNode> {
    scan_with(text, &FormatOptions::default())
}

/// Format a message into display blocks. Never fails; unrecognized markup stays literal text.
pub fn format_text(text: &str, opts: &FormatOptions) -> Vec<BlockNode> {
    let blocks = scan_with(text, opts);
    let formatted = blocks
        .iter()
        .filter_map(|b| b.kind.content())
        .flat_map(|c| &c.spans)
        .filter(|s| !s.is_plain())
        .count();
    log::debug!(
        "formatted {} bytes into {} blocks, {} formatted spans",
        text.len(),
        blocks.len(),
        formatted
    );
    blocks
}

/// [`format_text`] with default options.
pub fn format_text_default(text: &str) -> Vec<BlockNode> {
    format_text(text, &FormatOptions::default())
}
