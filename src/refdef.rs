//! Link reference definition parsing (spec.md §4.2.2): `[label]: url "title"`,
//! stripped from the front of a paragraph's raw text as it closes. Grounded
//! on comrak's `parser/mod.rs` reference-definition handling, re-expressed
//! against this crate's line-joined raw paragraph buffers rather than a
//! line-by-line arena scan.

use crate::nodes::ReferenceDefinition;
use crate::strings;

/// Tries to parse one reference definition from the start of `text`.
/// Returns the normalized label, the definition, and the byte offset in
/// `text` just past it (the caller trims leading blank lines/newlines from
/// there before retrying).
pub fn parse_one(text: &str) -> Option<(String, ReferenceDefinition, usize)> {
    let bytes = text.as_bytes();
    let mut i = strings::leading_spaces(bytes, 3);

    if bytes.get(i) != Some(&b'[') {
        return None;
    }
    i += 1;
    let label_start = i;
    let mut found_close = false;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if i + 1 < bytes.len() => i += 2,
            b']' => {
                found_close = true;
                break;
            }
            b'[' => return None,
            _ => i += 1,
        }
    }
    if !found_close {
        return None;
    }
    let label_raw = &text[label_start..i];
    i += 1; // skip ']'
    if bytes.get(i) != Some(&b':') {
        return None;
    }
    i += 1;
    i = skip_spaces_and_at_most_one_newline(bytes, i);

    let (url, after_url) = parse_destination(bytes, i)?;
    let before_title = after_url;

    let after_space = skip_spaces_and_at_most_one_newline(bytes, after_url);
    let mut title = None;
    let mut end = line_end(bytes, before_title);
    if after_space > after_url || bytes.get(after_url).map_or(false, |&b| b == b' ' || b == b'\t')
    {
        if let Some((t, after_title)) = parse_title(bytes, after_space) {
            let trailing_end = line_end(bytes, after_title);
            if strings::is_blank(&text[after_title..trailing_end]) {
                title = Some(t);
                end = trailing_end;
            }
        }
    }

    if title.is_none() {
        let trailing_end = line_end(bytes, before_title);
        if !strings::is_blank(&text[before_title..trailing_end]) {
            return None;
        }
        end = trailing_end;
    }

    let label = strings::normalize_label(label_raw);
    if label.is_empty() {
        return None;
    }
    Some((label, ReferenceDefinition { url, title }, end))
}

fn line_end(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| b == b'\n')
        .map(|p| from + p)
        .unwrap_or(bytes.len())
}

pub(crate) fn skip_spaces_and_at_most_one_newline(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i) == Some(&b' ') || bytes.get(i) == Some(&b'\t') {
        i += 1;
    }
    if bytes.get(i) == Some(&b'\n') {
        i += 1;
        while bytes.get(i) == Some(&b' ') || bytes.get(i) == Some(&b'\t') {
            i += 1;
        }
    }
    i
}

pub(crate) fn parse_destination(bytes: &[u8], i: usize) -> Option<(String, usize)> {
    if bytes.get(i) == Some(&b'<') {
        let mut j = i + 1;
        while j < bytes.len() {
            match bytes[j] {
                b'\\' if j + 1 < bytes.len() => j += 2,
                b'>' => {
                    let url = String::from_utf8_lossy(&bytes[i + 1..j]).into_owned();
                    return Some((unescape(&url), j + 1));
                }
                b'\n' | b'<' => return None,
                _ => j += 1,
            }
        }
        None
    } else {
        let mut j = i;
        let mut depth = 0i32;
        if bytes.get(j).map_or(true, |&b| b == b' ' || b == b'\t' || b == b'\n') {
            return None;
        }
        while j < bytes.len() {
            match bytes[j] {
                b'\\' if j + 1 < bytes.len() => j += 2,
                b'(' => {
                    depth += 1;
                    j += 1;
                }
                b')' => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    j += 1;
                }
                b if crate::ctype::isspace(b) => break,
                0..=0x1f => return None,
                _ => j += 1,
            }
        }
        if depth != 0 || j == i {
            return None;
        }
        let url = String::from_utf8_lossy(&bytes[i..j]).into_owned();
        Some((unescape(&url), j))
    }
}

pub(crate) fn parse_title(bytes: &[u8], i: usize) -> Option<(String, usize)> {
    let (open, close) = match bytes.get(i) {
        Some(b'"') => (b'"', b'"'),
        Some(b'\'') => (b'\'', b'\''),
        Some(b'(') => (b'(', b')'),
        _ => return None,
    };
    let mut j = i + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' if j + 1 < bytes.len() => j += 2,
            c if c == close => {
                let title = String::from_utf8_lossy(&bytes[i + 1..j]).into_owned();
                return Some((unescape(&title), j + 1));
            }
            _ => j += 1,
        }
    }
    let _ = open;
    None
}

pub(crate) fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                if crate::ctype::ispunct(next as u8) {
                    out.push(next);
                } else {
                    out.push(c);
                    out.push(next);
                }
                continue;
            }
        }
        out.push(c);
    }
    out
}
