//! Rich-text block rendering.
//!
//! The CMS stores long-form copy as portable-text blocks: a style string plus
//! inline spans. This module is the stateless projection from those blocks to
//! markup — no state machine, invoked fresh on every render.
//!
//! Tag dispatch is a closed match with an explicit default arm: the four
//! known styles map to headings and paragraphs, everything else (unknown
//! styles, absent styles, future CMS additions) falls back to paragraph
//! rendering. Absent or empty input renders empty markup, never an error.

use maud::{Markup, html};

use crate::types::PortableBlock;

/// Resolved block tag. The wire format carries a free-form style string;
/// this is the closed set the renderer dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    Heading1,
    Heading2,
    Heading3,
    Paragraph,
}

/// Resolve a wire style string. Unknown or missing styles are paragraphs.
pub fn tag_of(style: Option<&str>) -> BlockTag {
    match style {
        Some("h1") => BlockTag::Heading1,
        Some("h2") => BlockTag::Heading2,
        Some("h3") => BlockTag::Heading3,
        Some("normal") => BlockTag::Paragraph,
        _ => BlockTag::Paragraph,
    }
}

/// Per-tag render rules: the CSS class applied to each element kind.
///
/// Sections restyle rich text by swapping the rules, not the renderer — the
/// main service body and the collaboration levels use the same blocks with
/// different classes.
#[derive(Debug, Clone)]
pub struct BlockRules {
    pub h1: &'static str,
    pub h2: &'static str,
    pub h3: &'static str,
    pub paragraph: &'static str,
}

impl Default for BlockRules {
    fn default() -> Self {
        Self {
            h1: "rt-h1",
            h2: "rt-h2",
            h3: "rt-h3",
            paragraph: "rt-p",
        }
    }
}

/// Concatenated text of a block's spans.
fn block_text(block: &PortableBlock) -> String {
    block
        .children
        .iter()
        .map(|span| span.text.as_str())
        .collect()
}

/// Render one block under the given rules.
pub fn render_block(block: &PortableBlock, rules: &BlockRules) -> Markup {
    let text = block_text(block);
    match tag_of(block.style.as_deref()) {
        BlockTag::Heading1 => html! { h1 class=(rules.h1) { (text) } },
        BlockTag::Heading2 => html! { h2 class=(rules.h2) { (text) } },
        BlockTag::Heading3 => html! { h3 class=(rules.h3) { (text) } },
        BlockTag::Paragraph => html! { p class=(rules.paragraph) { (text) } },
    }
}

/// Render a block sequence. `None` (field absent in the CMS) and an empty
/// list both produce empty markup.
pub fn render_blocks(blocks: Option<&[PortableBlock]>, rules: &BlockRules) -> Markup {
    html! {
        @if let Some(blocks) = blocks {
            @for block in blocks {
                (render_block(block, rules))
            }
        }
    }
}
