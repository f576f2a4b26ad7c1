//! Block scanning: split message text into headers, list items, quotes, code blocks, and paragraphs.

use serde::Serialize;

use super::inline::{InlineSpan, resolve_with};
use super::{FencePolicy, FormatOptions};

const FENCE: &str = "```";

/// Block text together with its resolved inline spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineText {
    pub text: String,
    pub spans: Vec<InlineSpan>,
}

impl InlineText {
    fn resolve(text: &str, opts: &FormatOptions) -> Self {
        Self {
            text: text.to_string(),
            spans: resolve_with(text, opts.max_inline_len),
        }
    }
}

/// One display block, keyed by the source line it starts on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockNode {
    /// Zero-based source line index (the opening fence for code blocks).
    pub line: usize,
    pub kind: BlockKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    Header { level: u8, content: InlineText },
    Blockquote { content: InlineText },
    /// `ordinal` is the digit string exactly as typed.
    OrderedItem { ordinal: String, content: InlineText },
    UnorderedItem { content: InlineText },
    /// Content lines verbatim; markup inside is never interpreted.
    CodeBlock {
        lang: Option<String>,
        lines: Vec<String>,
    },
    Blank,
    Paragraph { content: InlineText },
}

impl BlockKind {
    /// Inline content for text-carrying blocks; `None` for code blocks and blank lines.
    pub fn content(&self) -> Option<&InlineText> {
        match self {
            BlockKind::Header { content, .. }
            | BlockKind::Blockquote { content }
            | BlockKind::OrderedItem { content, .. }
            | BlockKind::UnorderedItem { content }
            | BlockKind::Paragraph { content } => Some(content),
            BlockKind::CodeBlock { .. } | BlockKind::Blank => None,
        }
    }

    /// Code block lines joined by newline.
    pub fn code(&self) -> Option<String> {
        match self {
            BlockKind::CodeBlock { lines, .. } => Some(lines.join("\n")),
            _ => None,
        }
    }
}

/// Scanner state across lines.
enum State<'a> {
    Normal,
    InFence {
        start: usize,
        lang: Option<String>,
        lines: Vec<&'a str>,
    },
}

/// Scan `text` into blocks. Empty input yields no blocks.
pub fn scan_with(text: &str, opts: &FormatOptions) -> Vec<BlockNode> {
    let mut blocks = Vec::new();
    let mut state = State::Normal;

    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        state = match state {
            State::Normal => {
                if let Some(info) = trimmed.strip_prefix(FENCE) {
                    let info = info.trim();
                    log::debug!("code fence opened at line {}", idx);
                    State::InFence {
                        start: idx,
                        lang: (!info.is_empty()).then(|| info.to_string()),
                        lines: Vec::new(),
                    }
                } else {
                    blocks.push(BlockNode {
                        line: idx,
                        kind: classify(trimmed, opts),
                    });
                    State::Normal
                }
            }
            State::InFence {
                start,
                lang,
                mut lines,
            } => {
                if trimmed.starts_with(FENCE) {
                    log::debug!("code fence from line {} closed at line {}", start, idx);
                    blocks.push(code_block(start, lang, lines));
                    State::Normal
                } else {
                    lines.push(line);
                    State::InFence { start, lang, lines }
                }
            }
        };
    }

    if let State::InFence { start, lang, lines } = state {
        match opts.unterminated_fence {
            FencePolicy::Flush => {
                log::debug!("flushing unterminated code fence opened at line {}", start);
                blocks.push(code_block(start, lang, lines));
            }
            FencePolicy::Drop => {
                log::debug!(
                    "dropping unterminated code fence opened at line {} ({} lines)",
                    start,
                    lines.len()
                );
            }
        }
    }
    blocks
}

fn code_block(start: usize, lang: Option<String>, lines: Vec<&str>) -> BlockNode {
    BlockNode {
        line: start,
        kind: BlockKind::CodeBlock {
            lang,
            lines: lines.into_iter().map(str::to_string).collect(),
        },
    }
}

/// Classify one trimmed line outside a fence. First match wins.
fn classify(line: &str, opts: &FormatOptions) -> BlockKind {
    if line.is_empty() {
        return BlockKind::Blank;
    }
    if let Some((level, rest)) = parse_header_prefix(line) {
        return BlockKind::Header {
            level,
            content: InlineText::resolve(rest, opts),
        };
    }
    if let Some(rest) = line.strip_prefix("> ") {
        return BlockKind::Blockquote {
            content: InlineText::resolve(rest, opts),
        };
    }
    if let Some((ordinal, rest)) = parse_numbered_list_prefix(line) {
        return BlockKind::OrderedItem {
            ordinal: ordinal.to_string(),
            content: InlineText::resolve(rest, opts),
        };
    }
    if let Some(rest) = parse_bullet_prefix(line) {
        return BlockKind::UnorderedItem {
            content: InlineText::resolve(rest, opts),
        };
    }
    BlockKind::Paragraph {
        content: InlineText::resolve(line, opts),
    }
}

/// Parse 1-6 `#`, whitespace, then non-empty content. Returns (level, content).
fn parse_header_prefix(s: &str) -> Option<(u8, &str)> {
    let hashes = s.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let rest = &s[hashes..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let content = rest.trim_start();
    if content.is_empty() {
        return None;
    }
    Some((hashes as u8, content))
}

/// Parse "N. " at start. Returns (digits, rest) or None.
fn parse_numbered_list_prefix(s: &str) -> Option<(&str, &str)> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = s[digits..].strip_prefix(". ")?;
    Some((&s[..digits], rest.trim_start()))
}

/// Parse `-`, `*`, or `•` followed by whitespace. Returns the item text.
fn parse_bullet_prefix(s: &str) -> Option<&str> {
    let rest = s
        .strip_prefix('-')
        .or_else(|| s.strip_prefix('*'))
        .or_else(|| s.strip_prefix('•'))?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim_start())
}
