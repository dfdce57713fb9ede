//! HTML rendering (spec.md §4.4), ported from comrak's `src/html.rs`
//! dispatch-by-node-type writer, collapsed from its `Write`-trait formatter
//! object onto a plain `String` buffer since this crate's renderer is a
//! single synchronous pass with no streaming output target.

use crate::nodes::{Block, Document, Inline, ListType, NodeHeading, NodeList};

/// Renders a parsed document to an HTML string per spec.md §4.4.
pub fn render(document: &Document) -> String {
    let mut out = String::new();
    render_blocks(&document.children, &mut out);
    out
}

fn render_blocks(blocks: &[Block], out: &mut String) {
    for block in blocks {
        render_block(block, out);
    }
}

fn render_block(block: &Block, out: &mut String) {
    match block {
        Block::BlockQuote(children) => {
            out.push_str("<blockquote>\n");
            render_blocks(children, out);
            out.push_str("</blockquote>\n");
        }
        Block::List(list, items) => render_list(list, items, out),
        Block::Item(_) => unreachable!("Item only ever appears as a List's direct child"),
        Block::Paragraph(text) => {
            out.push_str("<p>");
            render_inlines(text.inlines(), out);
            out.push_str("</p>\n");
        }
        Block::Heading(heading, text) => render_heading(heading, text.inlines(), out),
        Block::CodeBlock(code) => render_code_block(code, out),
        Block::ThematicBreak => out.push_str("<hr />\n"),
        Block::HtmlBlock(literal) => out.push_str(literal),
    }
}

fn render_list(list: &NodeList, items: &[Block], out: &mut String) {
    let tag = match list.list_type {
        ListType::Bullet => "ul",
        ListType::Ordered => "ol",
    };
    out.push('<');
    out.push_str(tag);
    if list.list_type == ListType::Ordered && list.start != 1 {
        out.push_str(&format!(" start=\"{}\"", list.start));
    }
    out.push_str(">\n");
    for item in items {
        if let Block::Item(children) = item {
            render_item(children, list.tight, out);
        }
    }
    out.push_str("</");
    out.push_str(tag);
    out.push_str(">\n");
}

/// Renders one list item. In a tight list, a single wrapping paragraph's
/// inlines are emitted directly with no `<p>`; every other child block
/// still renders normally (spec.md §4.2.4 / §4.4).
fn render_item(children: &[Block], tight: bool, out: &mut String) {
    out.push_str("<li>");
    if tight {
        for (i, child) in children.iter().enumerate() {
            match child {
                Block::Paragraph(text) => {
                    if i > 0 {
                        out.push('\n');
                    }
                    render_inlines(text.inlines(), out);
                }
                other => {
                    out.push('\n');
                    render_block(other, out);
                }
            }
        }
    } else {
        out.push('\n');
        render_blocks(children, out);
    }
    out.push_str("</li>\n");
}

fn render_heading(heading: &NodeHeading, inlines: &[Inline], out: &mut String) {
    out.push_str(&format!("<h{}>", heading.level));
    render_inlines(inlines, out);
    out.push_str(&format!("</h{}>\n", heading.level));
}

fn render_code_block(code: &crate::nodes::NodeCodeBlock, out: &mut String) {
    out.push_str("<pre><code");
    if let Some(lang) = code.info.split_whitespace().next() {
        if !lang.is_empty() {
            out.push_str(" class=\"language-");
            escape_html(lang, out);
            out.push('"');
        }
    }
    out.push('>');
    escape_html(&code.literal, out);
    out.push_str("</code></pre>\n");
}

fn render_inlines(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        render_inline(inline, out);
    }
}

fn render_inline(inline: &Inline, out: &mut String) {
    match inline {
        Inline::Text(text) => escape_html(text, out),
        Inline::Emphasis(children) => {
            out.push_str("<em>");
            render_inlines(children, out);
            out.push_str("</em>");
        }
        Inline::Strong(children) => {
            out.push_str("<strong>");
            render_inlines(children, out);
            out.push_str("</strong>");
        }
        Inline::CodeSpan(text) => {
            out.push_str("<code>");
            escape_html(text, out);
            out.push_str("</code>");
        }
        Inline::Link(link, children) => {
            out.push_str("<a href=\"");
            escape_href(&link.url, out);
            out.push('"');
            if let Some(title) = &link.title {
                out.push_str(" title=\"");
                escape_html(title, out);
                out.push('"');
            }
            out.push('>');
            render_inlines(children, out);
            out.push_str("</a>");
        }
        Inline::Image(link, alt) => {
            out.push_str("<img src=\"");
            escape_href(&link.url, out);
            out.push_str("\" alt=\"");
            escape_html(alt, out);
            out.push('"');
            if let Some(title) = &link.title {
                out.push_str(" title=\"");
                escape_html(title, out);
                out.push('"');
            }
            out.push_str(" />");
        }
        Inline::Linebreak => out.push_str("<br />\n"),
        Inline::RawHtml(literal) => out.push_str(literal),
    }
}

/// Escapes `&`, `<`, `>`, `"`, `'` per spec.md §4.4's permissive escaping
/// contract (comrak's `html::escape`).
fn escape_html(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

/// Minimal URL escaping: only `"` is percent-encoded, matching spec.md
/// §4.4/§9's deliberately reduced contract (comrak's `html::escape_href`
/// percent-encodes a much wider character set; this crate's Open Question
/// resolution narrows that to quotes only).
fn escape_href(url: &str, out: &mut String) {
    for c in url.chars() {
        if c == '"' {
            out.push_str("%22");
        } else {
            out.push(c);
        }
    }
}
