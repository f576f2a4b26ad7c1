use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use textwrap::core::display_width;

use super::{ACCENT, RenderOptions, finish_line, to_lines, tree};
use crate::format::format_text_default;

fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

fn render(text: &str, width: usize) -> Vec<Line<'static>> {
    to_lines(&format_text_default(text), &RenderOptions { width })
}

#[test]
fn to_lines_empty() {
    assert!(render("", 80).is_empty());
}

#[test]
fn to_lines_paragraph_styles_inline_spans() {
    let lines = render("Some **bold** and *italic* text.", 0);
    assert_eq!(lines.len(), 1);
    let spans = &lines[0].spans;
    assert_eq!(line_text(&lines[0]), "Some bold and italic text.");
    let bold = spans
        .iter()
        .find(|s| s.content == "bold")
        .expect("bold span");
    assert!(bold.style.add_modifier.contains(Modifier::BOLD));
    let italic = spans
        .iter()
        .find(|s| s.content == "italic")
        .expect("italic span");
    assert!(italic.style.add_modifier.contains(Modifier::ITALIC));
}

#[test]
fn to_lines_list_prefixes() {
    let lines = render("- one\n007. two", 0);
    assert_eq!(line_text(&lines[0]), "• one");
    assert_eq!(line_text(&lines[1]), "007. two");
    assert_eq!(lines[1].spans[0].style.fg, Some(ACCENT));
}

#[test]
fn to_lines_header_is_bold() {
    let lines = render("## Section", 0);
    assert_eq!(line_text(&lines[0]), "Section");
    assert!(
        lines[0].spans[0]
            .style
            .add_modifier
            .contains(Modifier::BOLD)
    );
}

#[test]
fn to_lines_link_shows_url() {
    let lines = render("See [docs](https://example.com)", 0);
    assert_eq!(line_text(&lines[0]), "See docs (https://example.com)");
    let label = lines[0]
        .spans
        .iter()
        .find(|s| s.content == "docs")
        .expect("label span");
    assert!(label.style.add_modifier.contains(Modifier::UNDERLINED));
}

#[test]
fn to_lines_blank_and_code_verbatim() {
    let lines = render("a\n\n```rust\n**x**  \n```", 0);
    let texts: Vec<String> = lines.iter().map(line_text).collect();
    assert_eq!(texts, ["a", "", "  rust", "  **x**  "]);
}

#[test]
fn to_lines_wraps_paragraph() {
    let lines = render("hello world test", 8);
    let texts: Vec<String> = lines.iter().map(line_text).collect();
    assert_eq!(texts, ["hello", "world", "test"]);
}

#[test]
fn to_lines_wraps_list_item_with_hanging_indent() {
    let lines = render("- alpha beta gamma", 12);
    let texts: Vec<String> = lines.iter().map(line_text).collect();
    assert_eq!(texts, ["• alpha beta", "  gamma"]);
}

#[test]
fn to_lines_wrap_keeps_styles_across_break() {
    let lines = render("**bold words here**", 10);
    assert!(lines.len() > 1);
    for line in &lines {
        for span in &line.spans {
            if !span.content.trim().is_empty() {
                assert!(span.style.add_modifier.contains(Modifier::BOLD));
            }
        }
    }
}

#[test]
fn to_lines_breaks_long_word() {
    let lines = render("supercalifragilistic word", 5);
    let texts: Vec<String> = lines.iter().map(line_text).collect();
    assert_eq!(texts, ["super", "calif", "ragil", "istic", "word"]);
}

#[test]
fn to_lines_breaks_long_word_after_prefix() {
    let lines = render("- aaaaaaaaaaaaaaaaaaaaaaaaa", 10);
    let texts: Vec<String> = lines.iter().map(line_text).collect();
    assert_eq!(texts, ["• aaaaaaaa", "  aaaaaaaa", "  aaaaaaaa", "  a"]);
}

#[test]
fn to_lines_long_url_fits_width() {
    let text = "see https://example.com/a/very/long/path/segment ok";
    let lines = render(text, 20);
    assert!(lines.len() > 1);
    for line in &lines {
        assert!(display_width(&line_text(line)) <= 20, "too wide: {:?}", line_text(line));
    }
    let rebuilt: String = lines.iter().map(line_text).collect::<Vec<_>>().join(" ");
    assert_eq!(rebuilt.replace(' ', ""), text.replace(' ', ""));
}

#[test]
fn to_lines_wraps_at_tabs() {
    let lines = render("alpha\tbeta\tgamma", 8);
    let texts: Vec<String> = lines.iter().map(line_text).collect();
    assert_eq!(texts, ["alpha", "beta", "gamma"]);
}

#[test]
fn finish_line_trims_whitespace_across_spans() {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let italic = Style::default().add_modifier(Modifier::ITALIC);
    let mut lines = Vec::new();
    finish_line(
        &mut lines,
        vec![
            Span::styled("word ", bold),
            Span::raw("  "),
            Span::styled("\t", italic),
        ],
    );
    assert_eq!(lines[0].spans.len(), 1);
    assert_eq!(lines[0].spans[0].content, "word");
    assert_eq!(lines[0].spans[0].style, bold);
}

#[test]
fn to_lines_break_after_styled_space_leaves_no_trailing_space() {
    // the break falls after a plain space between two italic spans
    let lines = render("*aaaa* *bbbb*", 6);
    let texts: Vec<String> = lines.iter().map(line_text).collect();
    assert_eq!(texts, ["aaaa", "bbbb"]);
    for line in &lines {
        let last = line.spans.last().expect("span");
        assert!(!last.content.ends_with(' '));
    }
}

#[test]
fn write_tree_lists_blocks_and_spans() {
    let blocks = format_text_default("# Title\n```\ncode\n```\n> *q*");
    let mut out = Vec::new();
    tree::write_tree(&mut out, &blocks).expect("write");
    let s = String::from_utf8(out).expect("utf8");
    assert!(s.contains("header h1"));
    assert!(s.contains("code_block - (1 lines)"));
    assert!(s.contains("| code"));
    assert!(s.contains("blockquote"));
    assert!(s.contains("italic"));
}
