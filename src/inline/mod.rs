//! The inline phase: tokenizes a text-bearing leaf's raw buffer, resolves
//! link/image brackets against the document's reference definitions, and
//! runs the delimiter-stack emphasis pass (spec.md §4.3). Ported from
//! comrak's `parser/inlines.rs`, reshaped from an arena of `AstNode`s linked
//! by a `Subject`'s delimiter/bracket stacks onto a plain `Vec<Elem>` with
//! bracket resolution folded into the same left-to-right scan: a link's
//! label is drained out of the vector's tail as soon as its `]` is found,
//! so nested emphasis inside it resolves immediately instead of needing a
//! second interleaved pass.

mod scan;

use crate::ctype::ispunct;
use crate::nodes::{Block, Document, Inline, LeafText, NodeLink, ReferenceDefinition};
use std::collections::HashMap;

/// Walks a parsed document and replaces every text-bearing leaf's raw
/// buffer with resolved inlines (spec.md §4.3). Recurses into container
/// blocks only — `CodeBlock`, `ThematicBreak`, and `HtmlBlock` carry no
/// inline content.
pub fn run_inline_phase(document: &mut Document) {
    let refs = document.reference_definitions.clone();
    for block in &mut document.children {
        run_inline_phase_block(block, &refs);
    }
}

fn run_inline_phase_block(block: &mut Block, refs: &HashMap<String, ReferenceDefinition>) {
    match block {
        Block::BlockQuote(children) | Block::Item(children) => {
            for child in children {
                run_inline_phase_block(child, refs);
            }
        }
        Block::List(_, children) => {
            for child in children {
                run_inline_phase_block(child, refs);
            }
        }
        Block::Paragraph(text) | Block::Heading(_, text) => {
            let raw = text.as_raw().to_string();
            *text = LeafText::Inlines(parse_inlines(&raw, refs));
        }
        Block::CodeBlock(_) | Block::ThematicBreak | Block::HtmlBlock(_) => {}
    }
}

/// An inline element mid-resolution: like [`Inline`], but delimiter runs are
/// still mutable counters rather than resolved Emphasis/Strong nodes.
enum Elem {
    Text(String),
    /// A `[` or `![` bracket opener's literal text. A distinct variant from
    /// `Text` so `push_text`/`push_char` never merge the following text run
    /// into it — `finalize_link` needs this slot to stay exactly the
    /// bracket's own marker text so draining `marker_idx + 1..` captures the
    /// full label/alt content instead of swallowing it into the marker.
    BracketOpen(String),
    CodeSpan(String),
    Autolink { url: String, text: String },
    RawHtml(String),
    Linebreak(bool),
    Delim {
        ch: u8,
        count: usize,
        can_open: bool,
        can_close: bool,
    },
    Link {
        url: String,
        title: Option<String>,
        children: Vec<Elem>,
    },
    Image {
        url: String,
        title: Option<String>,
        children: Vec<Elem>,
    },
    Emphasis(Vec<Elem>),
    Strong(Vec<Elem>),
}

#[derive(Clone)]
struct BracketMarker {
    idx: usize,
    image: bool,
    active: bool,
}

/// Parses a text-bearing leaf's raw buffer into inline nodes.
pub fn parse_inlines(raw: &str, refs: &HashMap<String, ReferenceDefinition>) -> Vec<Inline> {
    let elems = tokenize(raw, refs);
    let resolved = resolve_emphasis(elems);
    elems_to_inlines(resolved)
}

fn tokenize(text: &str, refs: &HashMap<String, ReferenceDefinition>) -> Vec<Elem> {
    let bytes = text.as_bytes();
    let mut out: Vec<Elem> = Vec::new();
    let mut brackets: Vec<BracketMarker> = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                if bytes.get(i + 1) == Some(&b'\n') {
                    out.push(Elem::Linebreak(true));
                    i += 2;
                } else if let Some(&next) = bytes.get(i + 1) {
                    if ispunct(next) {
                        push_char(&mut out, next as char);
                        i += 2;
                    } else {
                        push_char(&mut out, '\\');
                        i += 1;
                    }
                } else {
                    push_char(&mut out, '\\');
                    i += 1;
                }
            }
            b'`' => {
                let run_len = scan::scan_backtick_run(bytes, i);
                match scan::scan_code_span_close(bytes, i + run_len, run_len) {
                    Some((content_start, close_start, close_end)) => {
                        let raw = &text[content_start..close_start];
                        out.push(Elem::CodeSpan(normalize_code_span(raw)));
                        i = close_end;
                    }
                    None => {
                        push_text(&mut out, &"`".repeat(run_len));
                        i += run_len;
                    }
                }
            }
            b'<' => {
                if let Some((body, is_email, end)) = scan::scan_autolink(bytes, i + 1) {
                    let url = if is_email {
                        format!("mailto:{}", body)
                    } else {
                        body.clone()
                    };
                    out.push(Elem::Autolink { url, text: body });
                    i = end;
                } else if let Some(tag_end) = find_inline_tag_end(bytes, i) {
                    let candidate = &text[i..tag_end];
                    if crate::scanners::scan_html_block_start(candidate.as_bytes()).is_some() {
                        out.push(Elem::RawHtml(candidate.to_string()));
                        i = tag_end;
                    } else {
                        push_char(&mut out, '<');
                        i += 1;
                    }
                } else {
                    push_char(&mut out, '<');
                    i += 1;
                }
            }
            b @ (b'*' | b'_') => {
                let run_len = scan::scan_delim_run(bytes, i, b);
                let (can_open, can_close) = scan::flanking(bytes, i, i + run_len, b);
                out.push(Elem::Delim {
                    ch: b,
                    count: run_len,
                    can_open,
                    can_close,
                });
                i += run_len;
            }
            b'!' if bytes.get(i + 1) == Some(&b'[') => {
                out.push(Elem::BracketOpen("![".to_string()));
                brackets.push(BracketMarker {
                    idx: out.len() - 1,
                    image: true,
                    active: true,
                });
                i += 2;
            }
            b'[' => {
                out.push(Elem::BracketOpen("[".to_string()));
                brackets.push(BracketMarker {
                    idx: out.len() - 1,
                    image: false,
                    active: true,
                });
                i += 1;
            }
            b']' => {
                i = resolve_bracket(text, bytes, &mut out, &mut brackets, i, refs);
            }
            b'\n' => {
                let hard = trailing_hard_break(&mut out);
                out.push(Elem::Linebreak(hard));
                i += 1;
                while bytes.get(i) == Some(&b' ') {
                    i += 1;
                }
            }
            _ => {
                let len = utf8_char_len(bytes[i]);
                let end = (i + len).min(bytes.len());
                push_text(&mut out, &text[i..end]);
                i = end;
            }
        }
    }
    out
}

/// A closing bracket: find the nearest active opener and try, in priority
/// order, an inline destination, a full/collapsed reference, then a
/// shortcut reference.
fn resolve_bracket(
    text: &str,
    bytes: &[u8],
    out: &mut Vec<Elem>,
    brackets: &mut Vec<BracketMarker>,
    pos: usize,
    refs: &HashMap<String, ReferenceDefinition>,
) -> usize {
    let marker_pos = match brackets.iter().rposition(|m| m.active) {
        Some(p) => p,
        None => {
            push_char(out, ']');
            return pos + 1;
        }
    };
    let marker = brackets[marker_pos].clone();
    let after = pos + 1;

    if bytes.get(after) == Some(&b'(') {
        if let Some((url, title, end)) = parse_inline_destination(bytes, after + 1) {
            finalize_link(out, brackets, marker_pos, marker.image, url, title);
            return end;
        }
    }

    if bytes.get(after) == Some(&b'[') {
        if let Some((label_end, close_idx)) = find_label_end(bytes, after + 1) {
            let label_raw = &text[after + 1..label_end];
            let label = if label_raw.trim().is_empty() {
                flatten_text(&out[marker.idx + 1..])
            } else {
                label_raw.to_string()
            };
            let key = crate::strings::normalize_label(&label);
            if let Some(def) = refs.get(&key) {
                let (url, title) = (def.url.clone(), def.title.clone());
                finalize_link(out, brackets, marker_pos, marker.image, url, title);
                return close_idx + 1;
            }
        }
    }

    {
        let label = flatten_text(&out[marker.idx + 1..]);
        let key = crate::strings::normalize_label(&label);
        if let Some(def) = refs.get(&key) {
            let (url, title) = (def.url.clone(), def.title.clone());
            finalize_link(out, brackets, marker_pos, marker.image, url, title);
            return after;
        }
    }

    brackets[marker_pos].active = false;
    push_char(out, ']');
    after
}

fn finalize_link(
    out: &mut Vec<Elem>,
    brackets: &mut Vec<BracketMarker>,
    marker_pos: usize,
    is_image: bool,
    url: String,
    title: Option<String>,
) {
    let marker_idx = brackets[marker_pos].idx;
    let children_raw: Vec<Elem> = out.drain(marker_idx + 1..).collect();
    let children = resolve_emphasis(children_raw);
    let node = if is_image {
        Elem::Image { url, title, children }
    } else {
        Elem::Link { url, title, children }
    };
    out[marker_idx] = node;
    brackets.truncate(marker_pos);
    if !is_image {
        for m in brackets.iter_mut() {
            if !m.image {
                m.active = false;
            }
        }
    }
}

fn parse_inline_destination(bytes: &[u8], mut i: usize) -> Option<(String, Option<String>, usize)> {
    i = crate::refdef::skip_spaces_and_at_most_one_newline(bytes, i);
    if bytes.get(i) == Some(&b')') {
        return Some((String::new(), None, i + 1));
    }
    let (url, after_url) = crate::refdef::parse_destination(bytes, i)?;
    let mut j = crate::refdef::skip_spaces_and_at_most_one_newline(bytes, after_url);
    let mut title = None;
    if matches!(bytes.get(j), Some(b'"') | Some(b'\'') | Some(b'(')) {
        if let Some((t, after_title)) = crate::refdef::parse_title(bytes, j) {
            title = Some(t);
            j = crate::refdef::skip_spaces_and_at_most_one_newline(bytes, after_title);
        }
    }
    if bytes.get(j) == Some(&b')') {
        Some((url, title, j + 1))
    } else {
        None
    }
}

/// Finds the end of a `[...]` reference label starting right after its
/// opening `[` (already consumed). Returns the label's end offset and the
/// index of the closing `]`.
fn find_label_end(bytes: &[u8], start: usize) -> Option<(usize, usize)> {
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if i + 1 < bytes.len() => i += 2,
            b']' => return Some((i, i)),
            b'[' => return None,
            _ => i += 1,
        }
    }
    None
}

fn flatten_text(elems: &[Elem]) -> String {
    let mut s = String::new();
    for e in elems {
        match e {
            Elem::Text(t) => s.push_str(t),
            Elem::BracketOpen(t) => s.push_str(t),
            Elem::CodeSpan(t) => s.push_str(t),
            Elem::Autolink { text, .. } => s.push_str(text),
            Elem::RawHtml(_) => {}
            Elem::Linebreak(_) => s.push(' '),
            Elem::Delim { ch, count, .. } => {
                for _ in 0..*count {
                    s.push(*ch as char);
                }
            }
            Elem::Link { children, .. } | Elem::Image { children, .. } => {
                s.push_str(&flatten_text(children))
            }
            Elem::Emphasis(children) | Elem::Strong(children) => s.push_str(&flatten_text(children)),
        }
    }
    s
}

fn push_char(out: &mut Vec<Elem>, c: char) {
    let mut buf = [0u8; 4];
    push_text(out, c.encode_utf8(&mut buf));
}

fn push_text(out: &mut Vec<Elem>, s: &str) {
    if let Some(Elem::Text(last)) = out.last_mut() {
        last.push_str(s);
    } else {
        out.push(Elem::Text(s.to_string()));
    }
}

fn trailing_hard_break(out: &mut [Elem]) -> bool {
    if let Some(Elem::Text(last)) = out.last_mut() {
        let trimmed = last.trim_end_matches(' ');
        let spaces = last.len() - trimmed.len();
        if spaces >= 2 {
            last.truncate(trimmed.len());
            return true;
        }
    }
    false
}

fn normalize_code_span(raw: &str) -> String {
    let collapsed: String = raw
        .split('\n')
        .collect::<Vec<_>>()
        .join(" ");
    if collapsed.starts_with(' ')
        && collapsed.ends_with(' ')
        && collapsed.trim() != ""
    {
        collapsed[1..collapsed.len() - 1].to_string()
    } else {
        collapsed
    }
}

fn utf8_char_len(b: u8) -> usize {
    if b & 0x80 == 0 {
        1
    } else if b & 0xe0 == 0xc0 {
        2
    } else if b & 0xf0 == 0xe0 {
        3
    } else {
        4
    }
}

fn find_inline_tag_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => return None,
            b'>' => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

/// Resolves a self-contained run of [`Elem`]s: a single left-to-right scan
/// where each closing-capable delimiter searches backward for the nearest
/// compatible opener (ported from comrak's `process_emphasis`). Because
/// inner matches always appear before outer ones in stream order for
/// properly nested input, wrapping as soon as a pair is found needs no
/// recursive re-entry — the freshly wrapped node simply becomes one opaque
/// element for any later, outer match.
fn resolve_emphasis(input: Vec<Elem>) -> Vec<Elem> {
    let mut out: Vec<Elem> = Vec::with_capacity(input.len());
    let mut stack: Vec<usize> = Vec::new();

    for elem in input {
        match elem {
            Elem::Delim {
                ch,
                count,
                can_open,
                can_close,
            } => {
                out.push(Elem::Delim {
                    ch,
                    count,
                    can_open,
                    can_close,
                });
                let idx = out.len() - 1;
                if can_close {
                    close_delimiters(&mut out, &mut stack, idx);
                }
                if let Elem::Delim { count, can_open, .. } = &out[idx] {
                    if *count > 0 && *can_open {
                        stack.push(idx);
                    }
                }
            }
            other => out.push(other),
        }
    }

    out
}

fn close_delimiters(out: &mut Vec<Elem>, stack: &mut Vec<usize>, closer_idx: usize) {
    let mut closer_idx = closer_idx;
    loop {
        let (c_ch, c_count, c_can_open) = match &out[closer_idx] {
            Elem::Delim {
                ch,
                count,
                can_open,
                ..
            } if *count > 0 => (*ch, *count, *can_open),
            _ => return,
        };

        let mut found = None;
        for (si, &oi) in stack.iter().enumerate().rev() {
            if let Elem::Delim {
                ch: o_ch,
                count: o_count,
                can_open: o_can_open,
                ..
            } = &out[oi]
            {
                if *o_ch == c_ch && *o_can_open && *o_count > 0 {
                    let odd_match = (c_can_open || *o_can_open)
                        && (o_count + c_count) % 3 == 0
                        && (o_count % 3 != 0 || c_count % 3 != 0);
                    if !odd_match {
                        found = Some((si, oi));
                        break;
                    }
                }
            }
        }

        let (si, opener_idx) = match found {
            Some(v) => v,
            None => return,
        };

        let o_count = match &out[opener_idx] {
            Elem::Delim { count, .. } => *count,
            _ => unreachable!(),
        };
        let use_delims = if o_count >= 2 && c_count >= 2 { 2 } else { 1 };

        if let Elem::Delim { count, .. } = &mut out[opener_idx] {
            *count -= use_delims;
        }
        if let Elem::Delim { count, .. } = &mut out[closer_idx] {
            *count -= use_delims;
        }

        let children: Vec<Elem> = out.drain(opener_idx + 1..closer_idx).collect();
        let removed = children.len();
        let wrapped = if use_delims == 2 {
            Elem::Strong(children)
        } else {
            Elem::Emphasis(children)
        };
        out.insert(opener_idx + 1, wrapped);

        closer_idx = closer_idx - removed + 1;

        stack.truncate(si);
        if let Elem::Delim { count, can_open, .. } = &out[opener_idx] {
            if *count > 0 && *can_open {
                stack.push(opener_idx);
            }
        }
    }
}

fn elems_to_inlines(elems: Vec<Elem>) -> Vec<Inline> {
    let mut out: Vec<Inline> = Vec::with_capacity(elems.len());
    for elem in elems {
        let inline = match elem {
            Elem::Text(t) => Inline::Text(t),
            Elem::BracketOpen(t) => Inline::Text(t),
            Elem::CodeSpan(t) => Inline::CodeSpan(t),
            Elem::Autolink { url, text } => Inline::Link(
                NodeLink { url, title: None },
                vec![Inline::Text(text)],
            ),
            Elem::RawHtml(t) => Inline::RawHtml(t),
            Elem::Linebreak(hard) => {
                if hard {
                    Inline::Linebreak
                } else {
                    Inline::Text("\n".to_string())
                }
            }
            Elem::Delim { ch, count, .. } => Inline::Text((ch as char).to_string().repeat(count)),
            Elem::Link { url, title, children } => {
                Inline::Link(NodeLink { url, title }, elems_to_inlines(children))
            }
            Elem::Image { url, title, children } => {
                let alt = flatten_text(&children);
                Inline::Image(NodeLink { url, title }, alt)
            }
            Elem::Emphasis(children) => Inline::Emphasis(elems_to_inlines(children)),
            Elem::Strong(children) => Inline::Strong(elems_to_inlines(children)),
        };
        merge_push(&mut out, inline);
    }
    out
}

fn merge_push(out: &mut Vec<Inline>, inline: Inline) {
    if let (Inline::Text(new), Some(Inline::Text(last))) = (&inline, out.last_mut()) {
        last.push_str(new);
        return;
    }
    out.push(inline);
}
