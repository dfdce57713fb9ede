//! The block phase: scans input line by line, maintaining a stack of open
//! containers with lazy continuation and fenced-block exclusion, and
//! produces a [`Document`] of raw-text leaves (ported from comrak
//! `parser/mod.rs`'s `Parser`, reshaped from an arena/`RefCell` tree onto a
//! plain `Vec`-backed open-container stack: since at most one container path
//! is ever open at a time, the stack itself *is* the root-to-current path,
//! with no parent pointers needed).

use crate::nodes::{
    Block, Document, FenceInfo, LeafText, ListDelimType, ListType, NodeCodeBlock, NodeHeading,
    NodeList, ReferenceDefinition,
};
use crate::scanners::{self, HtmlBlockKind, ListMarkerKind};
use crate::strings;

/// Maximum number of simultaneously open containers (spec.md §5/§9).
pub(crate) const MAX_NESTING_DEPTH: usize = 1000;

struct OpenBlock {
    kind: OpenKind,
    children: Vec<Block>,
}

impl OpenBlock {
    fn container(kind: OpenKind) -> Self {
        OpenBlock {
            kind,
            children: Vec::new(),
        }
    }

    fn leaf(kind: OpenKind) -> Self {
        OpenBlock {
            kind,
            children: Vec::new(),
        }
    }
}

enum OpenKind {
    Document,
    BlockQuote,
    List(NodeList),
    /// `(marker_offset, padding)`: the content-indent this item requires of
    /// continuation lines, captured when the item's marker was parsed.
    Item(usize, usize),
    Paragraph(String),
    CodeBlockFenced {
        fence: FenceInfo,
        indent: usize,
        info: String,
        literal: String,
    },
    CodeBlockIndented(String),
    HtmlBlock(HtmlBlockKind, Option<String>, String),
}

pub struct Parser {
    stack: Vec<OpenBlock>,
    reference_definitions: std::collections::HashMap<String, ReferenceDefinition>,
    truncated: bool,
}

/// Parses a normalized Markdown document into a [`Document`] of blocks
/// whose text-bearing leaves still hold raw (un-parsed-for-inlines) text.
pub fn parse_blocks(input: &str) -> Document {
    parse_blocks_checked(input).0
}

/// Like [`parse_blocks`], additionally reporting whether the nesting-depth
/// cap (spec.md §5) was hit and later containers were silently dropped.
pub fn parse_blocks_checked(input: &str) -> (Document, bool) {
    let lines = strings::normalize_and_split(input);
    let mut parser = Parser::new();
    for line in &lines {
        parser.feed_line(line.as_bytes());
    }
    let truncated = parser.truncated;
    (parser.finish(), truncated)
}

enum Opened {
    Done,
    Advance(usize),
    None,
}

impl Parser {
    fn new() -> Self {
        Parser {
            stack: vec![OpenBlock::container(OpenKind::Document)],
            reference_definitions: std::collections::HashMap::new(),
            truncated: false,
        }
    }

    /// Pushes a new open container/leaf unless the nesting cap has been
    /// reached, in which case the push is silently dropped and
    /// [`Parser::truncated`] is recorded (spec.md §5/§7 "fails safe").
    fn push_open(&mut self, entry: OpenBlock) {
        if self.stack.len() < MAX_NESTING_DEPTH {
            self.stack.push(entry);
        } else {
            self.truncated = true;
        }
    }

    fn feed_line(&mut self, line: &[u8]) {
        let (matched, mut pos) = self.match_pass_a(line);
        let all_matched = matched == self.stack.len();

        if !all_matched
            && !strings::is_blank(std::str::from_utf8(line).unwrap())
            && matches!(self.stack.last().unwrap().kind, OpenKind::Paragraph(_))
        {
            let residual_blank = strings::is_blank(str_at(line, pos));
            if !residual_blank && self.try_open_one_dry(line, pos) {
                // The residual looks like a genuine new block opener (a
                // heading, fence, rule, ...): not a lazy continuation. Fall
                // through to the normal close-and-reopen path below.
            } else if !residual_blank {
                let start = pos + leading_nonblank_offset(line, pos);
                self.append_to_open_paragraph(str_at(line, start));
                return;
            }
        }

        while self.stack.len() > matched {
            self.close_top();
        }

        let blank = strings::is_blank(str_at(line, pos));

        if blank {
            self.mark_enclosing_list_loose();
        }

        match self.stack.last().map(|o| &o.kind) {
            Some(OpenKind::CodeBlockFenced { fence, .. }) => {
                let (fc, fl) = (fence.char, fence.length);
                let residual = str_at(line, pos).as_bytes();
                let close_indent = strings::leading_spaces(residual, 3);
                if !blank && scanners::scan_close_code_fence(&residual[close_indent..], fc, fl) {
                    self.close_top();
                } else {
                    self.append_fenced_code_line(line, pos);
                }
                return;
            }
            Some(OpenKind::CodeBlockIndented(_)) => {
                self.append_indented_code_line(line, pos, blank);
                return;
            }
            Some(OpenKind::HtmlBlock(kind, tag, _)) => {
                let kind = *kind;
                let tag = tag.clone();
                self.append_html_block_line(line, pos);
                if matches_html_end_condition(kind, tag.as_deref(), str_at(line, pos)) {
                    self.close_top();
                }
                return;
            }
            _ => {}
        }

        if blank {
            return;
        }

        loop {
            match self.try_open_one(line, pos) {
                Opened::Done => return,
                Opened::Advance(new_pos) => {
                    pos = new_pos;
                    if self.top_takes_lines_directly() {
                        self.handle_leaf_opening_line(line, pos);
                        return;
                    }
                }
                Opened::None => break,
            }
        }

        self.add_default_text(line, pos);
    }

    /// Pass A: how far down the stack does this line continue existing
    /// containers? Returns the matched count and the byte offset consumed.
    fn match_pass_a(&mut self, line: &[u8]) -> (usize, usize) {
        let mut pos = 0usize;
        let mut matched = 1; // Document always matches.
        while matched < self.stack.len() {
            let residual = str_at(line, pos);
            match &self.stack[matched].kind {
                OpenKind::Document => unreachable!(),
                OpenKind::BlockQuote => {
                    let indent = strings::leading_spaces(residual.as_bytes(), 3);
                    if indent <= 3 && residual.as_bytes().get(indent) == Some(&b'>') {
                        let mut consumed = indent + 1;
                        if residual.as_bytes().get(consumed).copied().map_or(false, crate::ctype::is_space_or_tab)
                        {
                            consumed += 1;
                        }
                        pos += consumed;
                        matched += 1;
                    } else {
                        break;
                    }
                }
                OpenKind::List(_) => {
                    matched += 1;
                }
                OpenKind::Item(marker_offset, padding) => {
                    let need = marker_offset + padding;
                    let indent = strings::leading_spaces(residual.as_bytes(), need);
                    if strings::is_blank(residual) {
                        matched += 1;
                    } else if indent >= need {
                        pos += need;
                        matched += 1;
                    } else {
                        break;
                    }
                }
                OpenKind::Paragraph(_) => {
                    if strings::is_blank(residual) {
                        break;
                    }
                    matched += 1;
                }
                OpenKind::CodeBlockFenced { .. } => {
                    matched += 1;
                }
                OpenKind::CodeBlockIndented(_) => {
                    let indent = strings::leading_spaces(residual.as_bytes(), 4);
                    if strings::is_blank(residual) || indent >= 4 {
                        matched += 1;
                    } else {
                        break;
                    }
                }
                OpenKind::HtmlBlock(kind, ..) => {
                    let closes_on_blank =
                        matches!(kind, HtmlBlockKind::Doctype | HtmlBlockKind::Generic);
                    if closes_on_blank && strings::is_blank(residual) {
                        break;
                    }
                    matched += 1;
                }
            }
        }
        (matched, pos)
    }

    fn mark_enclosing_list_loose(&mut self) {
        let item_pos = self
            .stack
            .iter()
            .rposition(|o| matches!(o.kind, OpenKind::Item(..)));
        if let Some(item_pos) = item_pos {
            if let Some(list_pos) = (0..item_pos)
                .rev()
                .find(|&i| matches!(self.stack[i].kind, OpenKind::List(_)))
            {
                if let OpenKind::List(nl) = &mut self.stack[list_pos].kind {
                    nl.tight = false;
                }
            }
        }
    }

    fn top_takes_lines_directly(&self) -> bool {
        matches!(
            self.stack.last().map(|o| &o.kind),
            Some(OpenKind::CodeBlockFenced { .. })
                | Some(OpenKind::CodeBlockIndented(_))
                | Some(OpenKind::HtmlBlock(..))
        )
    }

    fn handle_leaf_opening_line(&mut self, line: &[u8], pos: usize) {
        match self.stack.last().map(|o| &o.kind) {
            Some(OpenKind::CodeBlockIndented(_)) => {
                self.append_indented_code_line(line, pos, false);
            }
            Some(OpenKind::HtmlBlock(kind, tag, _)) => {
                let kind = *kind;
                let tag = tag.clone();
                self.append_html_block_line(line, pos);
                if matches_html_end_condition(kind, tag.as_deref(), str_at(line, pos)) {
                    self.close_top();
                }
            }
            // Fenced code's opening line is the fence marker + info string;
            // nothing further to append from the same line.
            _ => {}
        }
    }

    /// A read-only check of whether the residual at `pos` would open a new
    /// block, used to decide whether an unmatched-ancestor line is a lazy
    /// paragraph continuation or a genuine interrupting construct.
    fn try_open_one_dry(&self, line: &[u8], pos: usize) -> bool {
        let residual = str_at(line, pos).as_bytes();
        let indent = strings::leading_spaces(residual, 4);
        let indented = indent >= 4;
        if !indented {
            if scanners::scan_thematic_break(&residual[indent..]) {
                return true;
            }
            if scanners::scan_atx_heading_start(&residual[indent..]).is_some() {
                return true;
            }
            if scanners::scan_open_code_fence(&residual[indent..]).is_some() {
                return true;
            }
            if indent <= 3 && residual.get(indent) == Some(&b'>') {
                return true;
            }
            if scanners::scan_list_marker(&residual[indent..]).is_some() {
                return true;
            }
            if scanners::scan_html_block_start(&residual[indent..]).is_some() {
                return true;
            }
        }
        false
    }

    fn try_open_one(&mut self, line: &[u8], pos: usize) -> Opened {
        let residual = str_at(line, pos).as_bytes();
        let indent = strings::leading_spaces(residual, 4);
        let indented = indent >= 4;

        if !indented {
            if let OpenKind::Paragraph(text) = &self.stack.last().unwrap().kind {
                if !strings::is_blank(text) {
                    if let Some(level) = scanners::scan_setext_heading_line(&residual[indent..]) {
                        let text = self.pop_open_paragraph_text();
                        self.push_finished_block(Block::Heading(
                            NodeHeading {
                                level,
                                setext: true,
                            },
                            LeafText::Raw(text),
                        ));
                        return Opened::Done;
                    }
                }
            }
        }

        if !indented && scanners::scan_thematic_break(&residual[indent..]) {
            self.close_if_paragraph();
            self.push_finished_block(Block::ThematicBreak);
            return Opened::Done;
        }

        if !indented {
            if let Some((level, _)) = scanners::scan_atx_heading_start(&residual[indent..]) {
                self.close_if_paragraph();
                let content = scanners::strip_atx_content(&residual[indent + level as usize..]);
                let text = String::from_utf8_lossy(content).into_owned();
                self.push_finished_block(Block::Heading(
                    NodeHeading {
                        level,
                        setext: false,
                    },
                    LeafText::Raw(text),
                ));
                return Opened::Done;
            }
        }

        if !indented {
            if let Some((ch, len, info_off)) = scanners::scan_open_code_fence(&residual[indent..])
            {
                self.close_if_paragraph();
                let info = unescape_fence_info(&residual[indent + info_off..]);
                self.push_open(OpenBlock::leaf(OpenKind::CodeBlockFenced {
                    fence: FenceInfo { char: ch, length: len },
                    indent,
                    info,
                    literal: String::new(),
                }));
                return Opened::Advance(line.len());
            }
        }

        if indent <= 3 && residual.get(indent) == Some(&b'>') {
            self.close_if_paragraph();
            let mut consumed = indent + 1;
            if residual.get(consumed).copied().map_or(false, crate::ctype::is_space_or_tab) {
                consumed += 1;
            }
            self.push_open(OpenBlock::container(OpenKind::BlockQuote));
            return Opened::Advance(pos + consumed);
        }

        if !indented {
            if let Some(marker) = scanners::scan_list_marker(&residual[indent..]) {
                self.close_if_paragraph();
                let after_marker = indent + marker.width;
                let content_indent = strings::leading_spaces(&residual[after_marker..], 5);
                let rest_blank = strings::is_blank(
                    std::str::from_utf8(&residual[after_marker + content_indent..]).unwrap_or(""),
                );
                let padding = if rest_blank || content_indent == 0 {
                    1
                } else if content_indent >= 5 {
                    1
                } else {
                    content_indent
                };
                self.open_list_item(marker, indent, padding);
                let advance = if rest_blank {
                    after_marker
                } else {
                    after_marker + padding
                };
                return Opened::Advance(pos + advance);
            }
        }

        if indented && !matches!(self.stack.last().unwrap().kind, OpenKind::Paragraph(_)) {
            self.push_open(OpenBlock::leaf(OpenKind::CodeBlockIndented(String::new())));
            return Opened::Advance(pos + 4);
        }

        if !indented {
            if let Some((kind, tag)) = scanners::scan_html_block_start(&residual[indent..]) {
                self.close_if_paragraph();
                self.push_open(OpenBlock::leaf(OpenKind::HtmlBlock(kind, tag, String::new())));
                return Opened::Advance(pos);
            }
        }

        Opened::None
    }

    fn open_list_item(&mut self, marker: scanners::ListMarker, marker_offset: usize, padding: usize) {
        let (list_type, bullet_char, delimiter, start) = match marker.kind {
            ListMarkerKind::Bullet(c) => (ListType::Bullet, c, ListDelimType::Period, 1),
            ListMarkerKind::Ordered(d) => (
                ListType::Ordered,
                0,
                if d == b'.' {
                    ListDelimType::Period
                } else {
                    ListDelimType::Paren
                },
                marker.start,
            ),
        };

        let reuse = match self.stack.last().map(|o| &o.kind) {
            Some(OpenKind::List(nl)) => {
                nl.list_type == list_type && nl.bullet_char == bullet_char && nl.delimiter == delimiter
            }
            _ => false,
        };

        if !reuse {
            if matches!(self.stack.last().map(|o| &o.kind), Some(OpenKind::List(_))) {
                self.close_top();
            }
            self.push_open(OpenBlock::container(OpenKind::List(NodeList {
                list_type,
                start,
                delimiter,
                bullet_char,
                tight: true,
            })));
        }
        self.push_open(OpenBlock::container(OpenKind::Item(marker_offset, padding)));
    }

    fn close_if_paragraph(&mut self) {
        if matches!(self.stack.last().map(|o| &o.kind), Some(OpenKind::Paragraph(_))) {
            self.close_top();
        }
    }

    fn pop_open_paragraph_text(&mut self) -> String {
        match self.stack.pop().map(|o| o.kind) {
            Some(OpenKind::Paragraph(text)) => text,
            _ => unreachable!("pop_open_paragraph_text called with no open paragraph"),
        }
    }

    fn push_finished_block(&mut self, block: Block) {
        self.stack.last_mut().unwrap().children.push(block);
    }

    fn append_to_open_paragraph(&mut self, text: &str) {
        if let OpenKind::Paragraph(buf) = &mut self.stack.last_mut().unwrap().kind {
            if !buf.is_empty() {
                buf.push('\n');
            }
            buf.push_str(text);
        }
    }

    fn append_fenced_code_line(&mut self, line: &[u8], pos: usize) {
        let indent = match &self.stack.last().unwrap().kind {
            OpenKind::CodeBlockFenced { indent, .. } => *indent,
            _ => unreachable!(),
        };
        let residual = str_at(line, pos);
        let strip = strings::leading_spaces(residual.as_bytes(), indent);
        if let OpenKind::CodeBlockFenced { literal, .. } = &mut self.stack.last_mut().unwrap().kind {
            literal.push_str(&residual[strip..]);
            literal.push('\n');
        }
    }

    fn append_indented_code_line(&mut self, line: &[u8], pos: usize, blank: bool) {
        let residual = str_at(line, pos);
        let content = if blank {
            ""
        } else {
            let strip = strings::leading_spaces(residual.as_bytes(), 4);
            &residual[strip..]
        };
        if let OpenKind::CodeBlockIndented(literal) = &mut self.stack.last_mut().unwrap().kind {
            literal.push_str(content);
            literal.push('\n');
        }
    }

    fn append_html_block_line(&mut self, line: &[u8], pos: usize) {
        let residual = str_at(line, pos).to_string();
        if let OpenKind::HtmlBlock(_, _, literal) = &mut self.stack.last_mut().unwrap().kind {
            literal.push_str(&residual);
            literal.push('\n');
        }
    }

    fn add_default_text(&mut self, line: &[u8], pos: usize) {
        let residual = str_at(line, pos);
        let start = leading_nonblank_offset(line, pos);
        let text = &residual[start..];
        match &self.stack.last().unwrap().kind {
            OpenKind::Paragraph(_) => self.append_to_open_paragraph(text),
            _ => {
                self.push_open(OpenBlock::leaf(OpenKind::Paragraph(text.to_string())));
            }
        }
    }

    fn close_top(&mut self) {
        let entry = self.stack.pop().expect("stack must retain Document");
        if let Some(block) = self.finish_entry(entry) {
            match self.stack.last_mut() {
                Some(parent) => parent.children.push(block),
                None => unreachable!("Document must remain on the stack"),
            }
        }
    }

    fn finish_entry(&mut self, entry: OpenBlock) -> Option<Block> {
        match entry.kind {
            OpenKind::Document => unreachable!(),
            OpenKind::BlockQuote => Some(Block::BlockQuote(entry.children)),
            OpenKind::List(nl) => Some(Block::List(nl, entry.children)),
            OpenKind::Item(..) => Some(Block::Item(entry.children)),
            OpenKind::Paragraph(text) => self
                .extract_reference_definitions(text)
                .map(|t| Block::Paragraph(LeafText::Raw(t))),
            OpenKind::CodeBlockFenced { fence, info, literal, .. } => {
                Some(Block::CodeBlock(NodeCodeBlock {
                    info,
                    literal,
                    fence: Some(fence),
                }))
            }
            OpenKind::CodeBlockIndented(mut literal) => {
                remove_trailing_blank_lines(&mut literal);
                literal.push('\n');
                Some(Block::CodeBlock(NodeCodeBlock {
                    info: String::new(),
                    literal,
                    fence: None,
                }))
            }
            OpenKind::HtmlBlock(_, _, literal) => Some(Block::HtmlBlock(literal)),
        }
    }

    /// Strips a prefix of reference-definition lines from `text` (spec.md
    /// §4.2.2), inserting each into [`Self::reference_definitions`]. Returns
    /// the remaining paragraph text, or `None` if nothing remains.
    fn extract_reference_definitions(&mut self, mut text: String) -> Option<String> {
        loop {
            match crate::refdef::parse_one(&text) {
                Some((label, def, rest_start)) => {
                    self.reference_definitions
                        .entry(label)
                        .or_insert(def);
                    text = text[rest_start..].trim_start_matches('\n').to_string();
                }
                None => break,
            }
        }
        if strings::is_blank(&text) {
            None
        } else {
            Some(text)
        }
    }

    fn finish(mut self) -> Document {
        while self.stack.len() > 1 {
            self.close_top();
        }
        let root = self.stack.pop().unwrap();
        Document {
            children: root.children,
            reference_definitions: self.reference_definitions,
        }
    }
}

fn str_at(line: &[u8], pos: usize) -> &str {
    std::str::from_utf8(&line[pos.min(line.len())..]).unwrap()
}

fn leading_nonblank_offset(line: &[u8], pos: usize) -> usize {
    strings::leading_spaces(&line[pos.min(line.len())..], line.len())
}

fn unescape_fence_info(bytes: &[u8]) -> String {
    let s = std::str::from_utf8(bytes).unwrap_or("");
    strings::trim(s).to_string()
}

fn remove_trailing_blank_lines(s: &mut String) {
    while s.ends_with('\n') {
        let trimmed = s.trim_end_matches('\n');
        if trimmed.rsplit('\n').next().map_or(true, |l| l.is_empty()) {
            s.truncate(trimmed.len());
        } else {
            break;
        }
    }
    while s.ends_with('\n') {
        s.pop();
    }
}

fn matches_html_end_condition(kind: HtmlBlockKind, tag: Option<&str>, line: &str) -> bool {
    let bytes = line.as_bytes();
    match kind {
        HtmlBlockKind::Comment => scanners::html_block_end_comment(bytes),
        HtmlBlockKind::ProcessingInstruction => scanners::html_block_end_pi(bytes),
        HtmlBlockKind::Cdata => scanners::html_block_end_cdata(bytes),
        HtmlBlockKind::ScriptLike => scanners::html_block_end_script(bytes, tag.unwrap_or("")),
        HtmlBlockKind::Doctype | HtmlBlockKind::Generic => false,
    }
}
