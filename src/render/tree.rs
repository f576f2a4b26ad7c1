//! Indented text dump of the block tree, for debugging markup.

use std::io::{self, Write};

use crate::format::{BlockKind, BlockNode, InlineKind, InlineText};

pub fn write_tree<W: Write>(out: &mut W, blocks: &[BlockNode]) -> io::Result<()> {
    for block in blocks {
        write!(out, "{:>4} ", block.line)?;
        match &block.kind {
            BlockKind::Header { level, content } => {
                writeln!(out, "header h{}", level)?;
                write_inline(out, content)?;
            }
            BlockKind::Blockquote { content } => {
                writeln!(out, "blockquote")?;
                write_inline(out, content)?;
            }
            BlockKind::OrderedItem { ordinal, content } => {
                writeln!(out, "ordered_item {}", ordinal)?;
                write_inline(out, content)?;
            }
            BlockKind::UnorderedItem { content } => {
                writeln!(out, "unordered_item")?;
                write_inline(out, content)?;
            }
            BlockKind::Paragraph { content } => {
                writeln!(out, "paragraph")?;
                write_inline(out, content)?;
            }
            BlockKind::CodeBlock { lang, lines } => {
                writeln!(
                    out,
                    "code_block {} ({} lines)",
                    lang.as_deref().unwrap_or("-"),
                    lines.len()
                )?;
                for line in lines {
                    writeln!(out, "       | {}", line)?;
                }
            }
            BlockKind::Blank => writeln!(out, "blank")?,
        }
    }
    out.flush()
}

fn write_inline<W: Write>(out: &mut W, content: &InlineText) -> io::Result<()> {
    for span in &content.spans {
        let (name, detail) = match &span.kind {
            InlineKind::Plain(s) => ("plain", format!("{:?}", s)),
            InlineKind::Bold(s) => ("bold", format!("{:?}", s)),
            InlineKind::Italic(s) => ("italic", format!("{:?}", s)),
            InlineKind::Code(s) => ("code", format!("{:?}", s)),
            InlineKind::Link { label, url } => ("link", format!("{:?} -> {:?}", label, url)),
        };
        writeln!(
            out,
            "       {:<6} {:>3}..{:<3} {}",
            name, span.range.start, span.range.end, detail
        )?;
    }
    Ok(())
}
