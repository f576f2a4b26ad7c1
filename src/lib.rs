//! # chatmark
//!
//! Formatting engine for chat messages. Turns text with lightweight markup (headers, emphasis,
//! lists, links, code, blockquotes) into an ordered sequence of typed display blocks.
//!
//! ## Pipeline
//! - [`format::scan_with`] splits the text into blocks, tracking fenced code across lines
//! - [`format::resolve_with`] resolves inline spans inside each block's text
//! - [`render`] paints the blocks for a terminal chat view

pub mod format;
pub mod render;

pub use format::{
    BlockKind, BlockNode, FencePolicy, FormatOptions, InlineKind, InlineSpan, InlineText,
    format_text, format_text_default, resolve, scan,
};
