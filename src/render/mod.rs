//! Presentation for a terminal chat view: blocks to styled, wrapped ratatui lines.

pub mod ansi;
pub mod tree;

use std::ops::Range;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use textwrap::WordSeparator;
use textwrap::core::{Fragment, Word, break_words, display_width};
use textwrap::wrap_algorithms::wrap_first_fit;

use crate::format::{BlockKind, BlockNode, InlineKind, InlineSpan};

/// Accent green color (#98FB98).
pub const ACCENT: Color = Color::Rgb(152, 251, 152);

/// Secondary accent, soft cyan (#7EC8E3).
pub const ACCENT_SECONDARY: Color = Color::Rgb(126, 200, 227);

const QUOTE_PREFIX: &str = "│ ";
const BULLET_PREFIX: &str = "• ";
const CODE_INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Wrap width in columns; 0 disables wrapping.
    pub width: usize,
}

/// Render blocks into display lines. Code block lines are never wrapped.
pub fn to_lines(blocks: &[BlockNode], opts: &RenderOptions) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for block in blocks {
        push_block(&mut lines, block, opts.width);
    }
    lines
}

fn push_block(lines: &mut Vec<Line<'static>>, block: &BlockNode, width: usize) {
    match &block.kind {
        BlockKind::Header { level, content } => {
            let base = header_style(*level);
            push_wrapped(lines, None, inline_spans(&content.spans, base), width);
        }
        BlockKind::Blockquote { content } => {
            let prefix = Span::styled(QUOTE_PREFIX, Style::default().fg(Color::DarkGray));
            let base = Style::default().add_modifier(Modifier::ITALIC);
            push_wrapped(lines, Some(prefix), inline_spans(&content.spans, base), width);
        }
        BlockKind::OrderedItem { ordinal, content } => {
            let prefix = Span::styled(format!("{}. ", ordinal), Style::default().fg(ACCENT));
            let spans = inline_spans(&content.spans, Style::default());
            push_wrapped(lines, Some(prefix), spans, width);
        }
        BlockKind::UnorderedItem { content } => {
            let prefix = Span::styled(BULLET_PREFIX, Style::default().fg(ACCENT));
            let spans = inline_spans(&content.spans, Style::default());
            push_wrapped(lines, Some(prefix), spans, width);
        }
        BlockKind::Paragraph { content } => {
            let spans = inline_spans(&content.spans, Style::default());
            push_wrapped(lines, None, spans, width);
        }
        BlockKind::CodeBlock { lang, lines: code } => {
            if let Some(lang) = lang {
                lines.push(Line::from(Span::styled(
                    format!("{}{}", CODE_INDENT, lang),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )));
            }
            let code_style = Style::default().fg(ACCENT_SECONDARY);
            for code_line in code {
                lines.push(Line::from(vec![
                    Span::raw(CODE_INDENT),
                    Span::styled(code_line.clone(), code_style),
                ]));
            }
        }
        BlockKind::Blank => lines.push(Line::default()),
    }
}

fn header_style(level: u8) -> Style {
    let style = Style::default().add_modifier(Modifier::BOLD);
    match level {
        1 => style.fg(ACCENT).add_modifier(Modifier::UNDERLINED),
        2 => style.fg(ACCENT),
        _ => style.fg(ACCENT_SECONDARY),
    }
}

/// Styled spans for resolved inline content. Links show the label, then the URL dimmed.
fn inline_spans(spans: &[InlineSpan], base: Style) -> Vec<Span<'static>> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        match &span.kind {
            InlineKind::Plain(s) => out.push(Span::styled(s.clone(), base)),
            InlineKind::Bold(s) => out.push(Span::styled(
                s.clone(),
                base.add_modifier(Modifier::BOLD),
            )),
            InlineKind::Italic(s) => out.push(Span::styled(
                s.clone(),
                base.add_modifier(Modifier::ITALIC),
            )),
            InlineKind::Code(s) => out.push(Span::styled(s.clone(), base.fg(ACCENT))),
            InlineKind::Link { label, url } => {
                out.push(Span::styled(
                    label.clone(),
                    base.fg(ACCENT).add_modifier(Modifier::UNDERLINED),
                ));
                out.push(Span::styled(
                    format!(" ({})", url),
                    Style::default().fg(Color::DarkGray),
                ));
            }
        }
    }
    out
}

/// Append `piece`, merging into the previous span when the style matches.
fn push_piece(current: &mut Vec<Span<'static>>, piece: &str, style: Style) {
    if let Some(last) = current.last_mut()
        && last.style == style
    {
        last.content.to_mut().push_str(piece);
        return;
    }
    current.push(Span::styled(piece.to_string(), style));
}

/// One wrappable word of the joined line text, with its byte offset.
#[derive(Debug)]
struct Piece<'a> {
    start: usize,
    word: Word<'a>,
}

impl Piece<'_> {
    fn end(&self) -> usize {
        self.start + self.word.word.len()
    }
}

impl Fragment for Piece<'_> {
    fn width(&self) -> f64 {
        Fragment::width(&self.word)
    }

    fn whitespace_width(&self) -> f64 {
        self.word.whitespace_width()
    }

    fn penalty_width(&self) -> f64 {
        self.word.penalty_width()
    }
}

/// Word wrap across styled spans. Continuation lines are indented to the prefix width.
/// Words wider than the line are broken apart.
fn push_wrapped(
    lines: &mut Vec<Line<'static>>,
    prefix: Option<Span<'static>>,
    spans: Vec<Span<'static>>,
    width: usize,
) {
    let indent = prefix.as_ref().map_or(0, |p| display_width(&p.content));
    let mut current: Vec<Span<'static>> = prefix.into_iter().collect();

    if width == 0 || width <= indent {
        current.extend(spans);
        lines.push(Line::from(current));
        return;
    }

    // Wrap the joined text, then cut each row back into the styled spans it covers
    let mut joined = String::new();
    let mut styles = Vec::with_capacity(spans.len());
    for span in &spans {
        styles.push((joined.len(), span.style));
        joined.push_str(&span.content);
    }

    let available = width - indent;
    let words = break_words(WordSeparator::new().find_words(&joined), available);
    let mut start = 0;
    let pieces: Vec<Piece<'_>> = words
        .into_iter()
        .map(|word| {
            let piece = Piece { start, word };
            start += word.word.len() + word.whitespace.len();
            piece
        })
        .collect();

    for (row_idx, row) in wrap_first_fit(&pieces, &[available as f64])
        .into_iter()
        .enumerate()
    {
        if row_idx > 0 {
            finish_line(lines, std::mem::take(&mut current));
            if indent > 0 {
                current.push(Span::raw(" ".repeat(indent)));
            }
        }
        if let (Some(first), Some(last)) = (row.first(), row.last()) {
            push_range(&mut current, &joined, &styles, first.start..last.end());
        }
    }
    finish_line(lines, current);
}

/// Append `joined[range]`, split at the style boundaries in `styles` (sorted by offset).
fn push_range(
    current: &mut Vec<Span<'static>>,
    joined: &str,
    styles: &[(usize, Style)],
    range: Range<usize>,
) {
    for (idx, &(offset, style)) in styles.iter().enumerate() {
        let next = styles.get(idx + 1).map_or(joined.len(), |&(o, _)| o);
        let from = offset.max(range.start);
        let to = next.min(range.end);
        if from < to {
            push_piece(current, &joined[from..to], style);
        }
    }
}

/// Push a wrapped line without the trailing whitespace left at the break, across span boundaries.
fn finish_line(lines: &mut Vec<Line<'static>>, mut spans: Vec<Span<'static>>) {
    while let Some(last) = spans.last_mut() {
        let keep = last.content.trim_end().len();
        if keep > 0 {
            last.content.to_mut().truncate(keep);
            break;
        }
        spans.pop();
    }
    lines.push(Line::from(spans));
}

#[cfg(test)]
mod tests;
