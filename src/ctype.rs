//! ASCII character classification used by the block and inline scanners.
//!
//! CommonMark's grammar is defined over ASCII punctuation and whitespace;
//! non-ASCII bytes never participate in these checks (ported from comrak's
//! `ctype.rs`).

pub fn isspace(ch: u8) -> bool {
    matches!(ch, 9 | 11 | 12 | 13 | 32 | 10)
}

pub fn is_space_or_tab(ch: u8) -> bool {
    ch == b' ' || ch == b'\t'
}

pub fn isdigit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

pub fn isalpha(ch: u8) -> bool {
    ch.is_ascii_alphabetic()
}

pub fn isalnum(ch: u8) -> bool {
    ch.is_ascii_alphanumeric()
}

pub fn ispunct(ch: u8) -> bool {
    matches!(
        ch,
        b'!' | b'"'
            | b'#'
            | b'$'
            | b'%'
            | b'&'
            | b'\''
            | b'('
            | b')'
            | b'*'
            | b'+'
            | b','
            | b'-'
            | b'.'
            | b'/'
            | b':'
            | b';'
            | b'<'
            | b'='
            | b'>'
            | b'?'
            | b'@'
            | b'['
            | b'\\'
            | b']'
            | b'^'
            | b'_'
            | b'`'
            | b'{'
            | b'|'
            | b'}'
            | b'~'
    )
}
