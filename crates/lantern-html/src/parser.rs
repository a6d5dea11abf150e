//! Character-level HTML parser.
//!
//! A single pass over the input builds the tree directly: no separate token
//! stream. The machine has three modes -- outside a tag (accumulating
//! text), inside an opening tag, inside a closing tag -- and a comment
//! skip. Malformed input never fails; the parser always returns a tree,
//! possibly partial.
//!
//! Deliberately lenient:
//! - a closing tag pops the insertion point to its parent without checking
//!   that the name matches, so mismatched closers misattach what follows;
//! - unrecognized tags are skipped wholesale with no effect on nesting;
//! - arena exhaustion silently stops node creation (observable only via
//!   [`Document::truncated`]).

use log::debug;

use crate::dom::{Document, ElementData, NodeId, NodeKind};
use crate::tag::TagKind;

/// Parse markup into a freshly-allocated document tree.
pub fn parse(input: &str) -> Document {
    let mut parser = Parser::new(input);
    parser.run();
    if parser.doc.truncated() {
        debug!("node arena exhausted; document truncated");
    }
    parser.doc
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    doc: Document,
    /// The node new children are appended to.
    insertion_point: NodeId,
    /// Pending text run, whitespace already collapsed.
    text: String,
}

impl Parser {
    fn new(input: &str) -> Self {
        let doc = Document::new();
        let root = doc.root();
        Self {
            chars: input.chars().collect(),
            pos: 0,
            doc,
            insertion_point: root,
            text: String::new(),
        }
    }

    fn run(&mut self) {
        while self.pos < self.chars.len() {
            if self.chars[self.pos] == '<' {
                self.flush_text();
                if self.lookahead("<!--") {
                    self.skip_comment();
                } else if self.lookahead("</") {
                    self.close_tag();
                } else {
                    self.open_tag();
                }
            } else {
                self.accumulate_text();
            }
        }
        self.flush_text();
    }

    // --------------------------------------------------------------
    // Text runs
    // --------------------------------------------------------------

    /// Consume one character of a text run. `\n`, `\r` and `\t` become
    /// spaces, and consecutive whitespace collapses to one space.
    fn accumulate_text(&mut self) {
        let ch = self.chars[self.pos];
        self.pos += 1;
        if ch == '\n' || ch == '\r' || ch == '\t' || ch == ' ' {
            if !self.text.ends_with(' ') {
                self.text.push(' ');
            }
        } else {
            self.text.push(ch);
        }
    }

    /// Emit the pending text run as a node, if anything survives the
    /// leading-space trim. Inter-tag whitespace collapses to a single
    /// leading space and therefore produces no node.
    fn flush_text(&mut self) {
        let run = std::mem::take(&mut self.text);
        let trimmed = run.trim_start();
        if trimmed.is_empty() {
            return;
        }
        if let Some(id) = self.doc.add_node(NodeKind::Text(trimmed.to_string())) {
            self.doc.append_child(self.insertion_point, id);
        }
    }

    // --------------------------------------------------------------
    // Comments
    // --------------------------------------------------------------

    /// Skip from `<!--` past the first subsequent `-->`. Content is
    /// discarded entirely; there is no nested-comment handling.
    fn skip_comment(&mut self) {
        self.pos += 4;
        while self.pos < self.chars.len() {
            if self.lookahead("-->") {
                self.pos += 3;
                return;
            }
            self.pos += 1;
        }
        // Unterminated comment swallows the rest of the document.
    }

    // --------------------------------------------------------------
    // Closing tags
    // --------------------------------------------------------------

    /// `</name>`: skip through `>` and pop the insertion point to its
    /// parent. The name is not validated against the current node.
    fn close_tag(&mut self) {
        self.pos += 2;
        while self.pos < self.chars.len() && self.chars[self.pos] != '>' {
            self.pos += 1;
        }
        if self.pos < self.chars.len() {
            self.pos += 1; // consume '>'
        }
        if let Some(parent) = self.doc.get(self.insertion_point).parent {
            self.insertion_point = parent;
        }
    }

    // --------------------------------------------------------------
    // Opening tags
    // --------------------------------------------------------------

    /// `<name ...>`: recognized names allocate an element; anything else
    /// skips the whole tag through the next `>`.
    fn open_tag(&mut self) {
        self.pos += 1;

        let mut name = String::new();
        while self.pos < self.chars.len() {
            let ch = self.chars[self.pos];
            if ch.is_ascii_alphanumeric() {
                name.push(ch.to_ascii_lowercase());
                self.pos += 1;
            } else {
                break;
            }
        }

        let Some(tag) = TagKind::from_name(&name) else {
            // Unknown tag: no node, no nesting effect.
            while self.pos < self.chars.len() && self.chars[self.pos] != '>' {
                self.pos += 1;
            }
            if self.pos < self.chars.len() {
                self.pos += 1;
            }
            return;
        };

        let mut data = ElementData::new(tag);
        let self_closing = self.scan_attributes(&mut data);

        let Some(id) = self.doc.add_node(NodeKind::Element(data)) else {
            return;
        };
        self.doc.append_child(self.insertion_point, id);

        if !self_closing && !tag.is_void() {
            self.insertion_point = id;
        }
    }

    /// Scan the attribute region up to `>`, filling in `href`/`src`.
    /// Returns true for `/>` self-closing syntax. An unterminated tag
    /// consumes the rest of the input.
    fn scan_attributes(&mut self, data: &mut ElementData) -> bool {
        let mut self_closing = false;
        loop {
            while self.pos < self.chars.len() && self.chars[self.pos].is_whitespace() {
                self.pos += 1;
            }
            if self.pos >= self.chars.len() {
                return self_closing;
            }
            match self.chars[self.pos] {
                '>' => {
                    self.pos += 1;
                    return self_closing;
                }
                '/' => {
                    self.pos += 1;
                    self_closing = true;
                }
                _ => {
                    let (attr_name, value) = self.scan_attribute();
                    match attr_name.as_str() {
                        "href" => data.href = value,
                        "src" => data.src = value,
                        _ => {}
                    }
                    // An attribute after a stray '/' cancels self-closing.
                    self_closing = false;
                }
            }
        }
    }

    /// One `name` or `name=value` pair. Values may be double-quoted,
    /// single-quoted, or unquoted up to whitespace or `>`.
    fn scan_attribute(&mut self) -> (String, Option<String>) {
        let mut name = String::new();
        while self.pos < self.chars.len() {
            let ch = self.chars[self.pos];
            if ch == '=' || ch == '>' || ch == '/' || ch.is_whitespace() {
                break;
            }
            name.push(ch.to_ascii_lowercase());
            self.pos += 1;
        }

        if self.pos >= self.chars.len() || self.chars[self.pos] != '=' {
            return (name, None);
        }
        self.pos += 1; // consume '='

        let mut value = String::new();
        if self.pos < self.chars.len() && (self.chars[self.pos] == '"' || self.chars[self.pos] == '\'')
        {
            let quote = self.chars[self.pos];
            self.pos += 1;
            while self.pos < self.chars.len() && self.chars[self.pos] != quote {
                value.push(self.chars[self.pos]);
                self.pos += 1;
            }
            if self.pos < self.chars.len() {
                self.pos += 1; // closing quote
            }
        } else {
            while self.pos < self.chars.len() {
                let ch = self.chars[self.pos];
                if ch.is_whitespace() || ch == '>' {
                    break;
                }
                value.push(ch);
                self.pos += 1;
            }
        }
        (name, Some(value))
    }

    /// True when the input at the current position starts with `pat`.
    fn lookahead(&self, pat: &str) -> bool {
        let mut i = self.pos;
        for pch in pat.chars() {
            if i >= self.chars.len() || self.chars[i] != pch {
                return false;
            }
            i += 1;
        }
        true
    }
}
