//! Line-level pattern scanners (ported from comrak's `scanners.rs`): each
//! function inspects a residual line — after container prefixes have been
//! consumed — and reports whether/how far a particular block-opening
//! pattern matches.

use crate::ctype::{isalpha, isalnum, isdigit, isspace};

/// Scans a thematic break: 3+ of the same `*`, `-` or `_`, separated only by
/// spaces/tabs, filling the rest of the line.
pub fn scan_thematic_break(line: &[u8]) -> bool {
    let mut it = line.iter().copied();
    let first = match it.next() {
        Some(c) if c == b'*' || c == b'-' || c == b'_' => c,
        _ => return false,
    };
    let mut count = 1;
    for c in it {
        if c == first {
            count += 1;
        } else if c == b' ' || c == b'\t' {
            continue;
        } else if isspace(c) {
            break;
        } else {
            return false;
        }
    }
    count >= 3
}

/// Scans an ATX heading opener: 1-6 `#`s followed by a space, tab, or
/// end-of-line. Returns the heading level and the byte offset where the
/// content begins (before stripping trailing `#`s/spaces).
pub fn scan_atx_heading_start(line: &[u8]) -> Option<(u32, usize)> {
    let mut i = 0;
    while i < line.len() && line[i] == b'#' {
        i += 1;
    }
    if i == 0 || i > 6 {
        return None;
    }
    if i == line.len() || isspace(line[i]) {
        Some((i as u32, i))
    } else {
        None
    }
}

/// Strips the ATX heading's content down to its text: leading spaces, then
/// a trailing run of `#`s (only if preceded by a space, or the whole
/// remainder is `#`s) and trailing spaces.
pub fn strip_atx_content(content: &[u8]) -> &[u8] {
    let mut s = content;
    while s.first() == Some(&b' ') || s.first() == Some(&b'\t') {
        s = &s[1..];
    }
    while s.last() == Some(&b' ') || s.last() == Some(&b'\t') {
        s = &s[..s.len() - 1];
    }
    let mut end = s.len();
    let mut hashes = 0;
    while end > 0 && s[end - 1] == b'#' {
        end -= 1;
        hashes += 1;
    }
    if hashes > 0 && (end == 0 || s[end - 1] == b' ' || s[end - 1] == b'\t') {
        s = &s[..end];
        while s.last() == Some(&b' ') || s.last() == Some(&b'\t') {
            s = &s[..s.len() - 1];
        }
    }
    s
}

/// Scans a fenced code block opener: 3+ backticks or tildes. Returns the
/// fence character, its length, and the byte offset of the info string.
pub fn scan_open_code_fence(line: &[u8]) -> Option<(u8, usize, usize)> {
    let c = *line.first()?;
    if c != b'`' && c != b'~' {
        return None;
    }
    let mut i = 0;
    while i < line.len() && line[i] == c {
        i += 1;
    }
    if i < 3 {
        return None;
    }
    // A backtick fence's info string may not itself contain a backtick.
    if c == b'`' && line[i..].contains(&b'`') {
        return None;
    }
    Some((c, i, i))
}

/// Scans a line to see whether it closes a fence opened with `(fence_char,
/// fence_length)`: the same character repeated at least that many times,
/// with only trailing whitespace after.
pub fn scan_close_code_fence(line: &[u8], fence_char: u8, fence_length: usize) -> bool {
    let mut i = 0;
    while i < line.len() && line[i] == fence_char {
        i += 1;
    }
    if i < fence_length {
        return false;
    }
    line[i..].iter().all(|&c| c == b' ' || c == b'\t')
}

/// Scans a setext underline: a run of all `=` or all `-`, optionally
/// followed by trailing spaces/tabs, filling the rest of the line.
pub fn scan_setext_heading_line(line: &[u8]) -> Option<u32> {
    let c = *line.first()?;
    if c != b'=' && c != b'-' {
        return None;
    }
    let mut i = 0;
    while i < line.len() && line[i] == c {
        i += 1;
    }
    if !line[i..].iter().all(|&b| b == b' ' || b == b'\t') {
        return None;
    }
    Some(if c == b'=' { 1 } else { 2 })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlBlockKind {
    Comment,
    ProcessingInstruction,
    Doctype,
    Cdata,
    ScriptLike,
    Generic,
}

const SCRIPT_LIKE_TAGS: [&str; 4] = ["script", "pre", "style", "textarea"];

const BLOCK_TAGS: [&str; 61] = [
    "address", "article", "aside", "base", "basefont", "blockquote", "body", "caption", "center",
    "col", "colgroup", "dd", "details", "dialog", "dir", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "frame", "frameset", "h1", "h2", "h3", "h4", "h5",
    "h6", "head", "header", "hr", "html", "iframe", "legend", "li", "link", "main", "menu",
    "menuitem", "nav", "noframes", "ol", "optgroup", "option", "p", "param", "section", "summary",
    "table", "tbody", "td", "tfoot", "th", "thead", "title", "tr", "track", "ul",
];

/// Recognizes the start of an HTML block per spec.md §4.2's fixed list,
/// returning the kind (which determines the closing condition) and, for
/// `ScriptLike`, the matched tag name (used to look for its closing tag).
pub fn scan_html_block_start(line: &[u8]) -> Option<(HtmlBlockKind, Option<String>)> {
    if line.starts_with(b"<!--") {
        return Some((HtmlBlockKind::Comment, None));
    }
    if line.starts_with(b"<?") {
        return Some((HtmlBlockKind::ProcessingInstruction, None));
    }
    if line.len() >= 9 && line[..9].eq_ignore_ascii_case(b"<!DOCTYPE") {
        return Some((HtmlBlockKind::Doctype, None));
    }
    if line.starts_with(b"<![CDATA[") {
        return Some((HtmlBlockKind::Cdata, None));
    }

    let (rest, closing) = if line.first() == Some(&b'<') {
        if line.get(1) == Some(&b'/') {
            (&line[2..], true)
        } else {
            (&line[1..], false)
        }
    } else {
        return None;
    };

    let tag_end = rest
        .iter()
        .position(|&c| !(isalnum(c) || c == b'-'))
        .unwrap_or(rest.len());
    if tag_end == 0 {
        return None;
    }
    let tag = &rest[..tag_end];
    if !isalpha(tag[0]) {
        return None;
    }
    let tag_lower = String::from_utf8_lossy(tag).to_ascii_lowercase();

    if !closing && SCRIPT_LIKE_TAGS.contains(&tag_lower.as_str()) {
        let after = rest[tag_end..].first().copied();
        if after.is_none() || isspace(after.unwrap()) || after == Some(b'>') {
            return Some((HtmlBlockKind::ScriptLike, Some(tag_lower)));
        }
        return None;
    }

    if BLOCK_TAGS.contains(&tag_lower.as_str()) {
        let after = rest[tag_end..].first().copied();
        let ok = match after {
            None => true,
            Some(b) => isspace(b) || b == b'>' || (b == b'/' && rest.get(tag_end + 1) == Some(&b'>')),
        };
        if ok {
            return Some((HtmlBlockKind::Generic, None));
        }
    }

    None
}

pub fn html_block_end_comment(line: &[u8]) -> bool {
    contains(line, b"-->")
}

pub fn html_block_end_pi(line: &[u8]) -> bool {
    contains(line, b"?>")
}

pub fn html_block_end_cdata(line: &[u8]) -> bool {
    contains(line, b"]]>")
}

pub fn html_block_end_script(line: &[u8], tag: &str) -> bool {
    let needle = format!("</{}", tag);
    let lower = String::from_utf8_lossy(line).to_ascii_lowercase();
    lower.contains(&needle)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window == needle)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarkerKind {
    Bullet(u8),
    Ordered(u8),
}

#[derive(Debug, Clone, Copy)]
pub struct ListMarker {
    pub kind: ListMarkerKind,
    pub start: usize,
    pub width: usize,
}

/// Scans a bullet or ordered list marker at the start of `line`. `width` is
/// the number of bytes the marker itself occupies (not including trailing
/// whitespace).
pub fn scan_list_marker(line: &[u8]) -> Option<ListMarker> {
    if line.is_empty() {
        return None;
    }
    match line[0] {
        b'-' | b'+' | b'*' => {
            let after = line.get(1).copied();
            if after.is_none() || isspace(after.unwrap()) {
                return Some(ListMarker {
                    kind: ListMarkerKind::Bullet(line[0]),
                    start: 0,
                    width: 1,
                });
            }
            None
        }
        c if isdigit(c) => {
            let mut i = 0;
            while i < line.len() && isdigit(line[i]) && i < 9 {
                i += 1;
            }
            let delim = *line.get(i)?;
            if delim != b'.' && delim != b')' {
                return None;
            }
            let after = line.get(i + 1).copied();
            if after.is_none() || isspace(after.unwrap()) {
                let start: usize = std::str::from_utf8(&line[..i]).unwrap().parse().unwrap_or(0);
                return Some(ListMarker {
                    kind: ListMarkerKind::Ordered(delim),
                    start,
                    width: i + 1,
                });
            }
            None
        }
        _ => None,
    }
}
