//! Shared scanning primitives for the XML and JSON tokenizers: a
//! forward-only rune cursor with an emission point, an explicit stack of
//! open element/field names, and the acceptors both grammars need.

use std::collections::VecDeque;
use std::str::CharIndices;

use crate::token::Token;

/// Sentinel returned by [`Scanner::peek`] at end of input.
pub(crate) const EOI: char = '\0';

pub(crate) struct Scanner<'a> {
    input: &'a str,
    chars: CharIndices<'a>,
    start: usize,
    pos: usize,
    names: Vec<String>,
    pending: VecDeque<Token>,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices(),
            start: 0,
            pos: 0,
            names: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    /// Consume and return one code point, or `None` at end of input.
    pub fn next(&mut self) -> Option<char> {
        if let Some((pos, ch)) = self.chars.next() {
            self.pos = pos + ch.len_utf8();
            Some(ch)
        } else {
            None
        }
    }

    /// Inspect the next code point without consuming it. Returns [`EOI`]
    /// at end of input, so callers never need to back up.
    pub fn peek(&mut self) -> char {
        if let Some((_, ch)) = self.chars.clone().next() {
            ch
        } else {
            EOI
        }
    }

    pub fn accept(&mut self, ch: char) -> bool {
        if self.peek() == ch {
            self.next();
            true
        } else {
            false
        }
    }

    pub fn accept_run(&mut self, pred: impl Fn(char) -> bool) -> bool {
        let mut accepted = false;
        while self.peek() != EOI && pred(self.peek()) {
            self.next();
            accepted = true;
        }
        accepted
    }

    /// The substring between the emission point and the cursor.
    pub fn current(&self) -> &str {
        self.input
            .get(self.start..self.pos)
            .expect("scanner error: slice out of bounds or not on codepoint boundary")
    }

    /// Advance the emission point to the cursor, discarding pending text.
    pub fn ignore(&mut self) {
        self.start = self.pos;
    }

    /// Queue a token for the consumer and advance the emission point.
    pub fn emit(&mut self, token: Token) {
        self.pending.push_back(token);
        self.start = self.pos;
    }

    /// Dequeue the next emitted token, if any.
    pub fn take(&mut self) -> Option<Token> {
        self.pending.pop_front()
    }

    /// Remember an open element/field name so the matching `End` can
    /// recall it.
    pub fn push_name(&mut self, name: &str) {
        self.names.push(name.to_string());
    }

    /// Pop the most recently opened name. `None` is the stack-underflow
    /// sentinel; callers degrade rather than fault.
    pub fn pop_name(&mut self) -> Option<String> {
        self.names.pop()
    }

    /// Consume a maximal run of whitespace and commas, ignoring it.
    pub fn skip_separators(&mut self) {
        self.accept_run(is_separator);
        self.ignore();
    }

    /// Consume a leading `"` and the characters up to the next unescaped
    /// `"` or end of input. A `\` escapes the following character blindly;
    /// both pass through unchanged. Returns the interior text, exclusive
    /// of the quotes.
    pub fn accept_quoted(&mut self) -> String {
        self.next(); // opening quote
        self.ignore();
        loop {
            match self.peek() {
                '"' | EOI => break,
                '\\' => {
                    self.next();
                    if self.peek() != EOI {
                        self.next();
                    }
                }
                _ => {
                    self.next();
                }
            }
        }
        let text = self.current().to_string();
        self.accept('"');
        self.ignore();
        text
    }

    /// Consume a maximal run of letters, digits and underscore.
    pub fn accept_identifier(&mut self) -> String {
        self.accept_run(is_identifier_char);
        let name = self.current().to_string();
        self.ignore();
        name
    }
}

pub(crate) fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || ch == ','
}
