//! Inline span resolution: links, bold, italic, and code inside one block's text.
//!
//! Each pattern family is scanned on its own, the candidates are pooled and sorted by start offset,
//! then the earliest non-overlapping candidates win. Whatever is left between them is plain text, so
//! the resolved spans always partition the input.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// A contiguous piece of a block's text and how it should be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineSpan {
    pub kind: InlineKind,
    /// Byte range of this span's source (delimiters included) in the resolved text.
    pub range: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum InlineKind {
    Plain(String),
    Link { label: String, url: String },
    Bold(String),
    Italic(String),
    Code(String),
}

impl InlineSpan {
    fn plain(text: &str, range: Range<usize>) -> Self {
        Self {
            kind: InlineKind::Plain(text[range.clone()].to_string()),
            range,
        }
    }

    /// The source slice this span was resolved from.
    pub fn source<'a>(&self, text: &'a str) -> &'a str {
        &text[self.range.clone()]
    }

    /// Displayed content: the inner text for formatted spans, the label for links.
    pub fn content(&self) -> &str {
        match &self.kind {
            InlineKind::Plain(s)
            | InlineKind::Bold(s)
            | InlineKind::Italic(s)
            | InlineKind::Code(s) => s,
            InlineKind::Link { label, .. } => label,
        }
    }

    /// True for literal text between (or instead of) formatted spans.
    pub fn is_plain(&self) -> bool {
        matches!(self.kind, InlineKind::Plain(_))
    }
}

/// Pattern families, in scan order. Ties on start offset keep this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Link,
    BoldTriple,
    BoldDouble,
    Italic,
    Code,
}

const FAMILIES: [Family; 5] = [
    Family::Link,
    Family::BoldTriple,
    Family::BoldDouble,
    Family::Italic,
    Family::Code,
];

impl Family {
    fn pattern(self) -> &'static str {
        match self {
            Family::Link => r"\[([^\]]+)\]\(([^)]+)\)",
            Family::BoldTriple => r"\*\*\*(.+?)\*\*\*",
            Family::BoldDouble => r"\*\*(.+?)\*\*",
            Family::Italic => r"\*([^*]+)\*",
            Family::Code => r"`([^`]+)`",
        }
    }

    /// Italic must not touch a neighbouring `*`, or it would eat the edges of `**bold**`.
    fn needs_isolation(self) -> bool {
        self == Family::Italic
    }
}

static PATTERNS: OnceLock<Vec<(Family, Regex)>> = OnceLock::new();

fn patterns() -> &'static [(Family, Regex)] {
    PATTERNS.get_or_init(|| {
        FAMILIES
            .iter()
            .filter_map(|&family| match Regex::new(family.pattern()) {
                Ok(re) => Some((family, re)),
                Err(e) => {
                    log::error!("inline pattern for {:?} failed to compile: {}", family, e);
                    None
                }
            })
            .collect()
    })
}

/// One occurrence of a family, before overlap resolution.
#[derive(Debug, Clone)]
struct Candidate {
    family: Family,
    range: Range<usize>,
    inner: Range<usize>,
    url: Option<Range<usize>>,
}

impl Candidate {
    fn into_span(self, text: &str) -> InlineSpan {
        let inner = text[self.inner].to_string();
        let kind = match self.family {
            Family::Link => InlineKind::Link {
                label: inner,
                url: self
                    .url
                    .map(|r| text[r].to_string())
                    .unwrap_or_default(),
            },
            Family::BoldTriple | Family::BoldDouble => InlineKind::Bold(inner),
            Family::Italic => InlineKind::Italic(inner),
            Family::Code => InlineKind::Code(inner),
        };
        InlineSpan {
            kind,
            range: self.range,
        }
    }
}

fn touches_asterisk(text: &str, range: &Range<usize>) -> bool {
    text[..range.start].ends_with('*') || text[range.end..].starts_with('*')
}

fn next_char_boundary(text: &str, at: usize) -> usize {
    text[at..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| at + c.len_utf8())
}

/// All non-overlapping occurrences of one family, left to right.
fn scan_family(family: Family, re: &Regex, text: &str, out: &mut Vec<Candidate>) {
    let mut pos = 0;
    while pos <= text.len() {
        let Some(caps) = re.captures_at(text, pos) else {
            break;
        };
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let range = whole.range();
        if family.needs_isolation() && touches_asterisk(text, &range) {
            pos = next_char_boundary(text, range.start);
            continue;
        }
        out.push(Candidate {
            family,
            range: range.clone(),
            inner: inner.range(),
            url: caps.get(2).map(|m| m.range()),
        });
        pos = range.end;
    }
}

/// Keep the earliest candidate of every overlapping group. `candidates` must be sorted by start.
fn keep_leftmost(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut kept: Vec<Candidate> = Vec::with_capacity(candidates.len());
    let mut last_end = 0;
    for c in candidates {
        if c.range.start >= last_end {
            last_end = c.range.end;
            kept.push(c);
        } else {
            log::trace!(
                "dropping {:?} at {:?}: overlaps a kept span ending at {}",
                c.family,
                c.range,
                last_end
            );
        }
    }
    kept
}

/// Default upper bound on the text length the resolver will scan.
pub const DEFAULT_MAX_INLINE_LEN: usize = 16 * 1024;

/// Resolve inline spans in `text` with the default length bound.
pub fn resolve(text: &str) -> Vec<InlineSpan> {
    resolve_with(text, DEFAULT_MAX_INLINE_LEN)
}

/// Resolve inline spans in `text`. Texts longer than `max_len` bytes come back as one plain span.
///
/// Never fails: delimiters that do not form a complete construct stay in the plain text.
/// An empty `text` yields no spans.
pub fn resolve_with(text: &str, max_len: usize) -> Vec<InlineSpan> {
    if text.is_empty() {
        return Vec::new();
    }
    if text.len() > max_len {
        log::debug!(
            "inline text of {} bytes exceeds limit {}; left unformatted",
            text.len(),
            max_len
        );
        return vec![InlineSpan::plain(text, 0..text.len())];
    }

    let mut candidates = Vec::new();
    for (family, re) in patterns() {
        scan_family(*family, re, text, &mut candidates);
    }
    // sort_by_key is stable: equal starts keep family scan order
    candidates.sort_by_key(|c| c.range.start);

    let mut spans = Vec::new();
    let mut cursor = 0;
    for c in keep_leftmost(candidates) {
        if c.range.start > cursor {
            spans.push(InlineSpan::plain(text, cursor..c.range.start));
        }
        cursor = c.range.end;
        spans.push(c.into_span(text));
    }
    if cursor < text.len() {
        spans.push(InlineSpan::plain(text, cursor..text.len()));
    }
    spans
}
