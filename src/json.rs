//! A tokenizer for the relaxed JSON-like object grammar: brace-delimited
//! `name: value` pairs separated by whitespace or commas, where names are
//! quoted strings or bare identifiers and values are quoted strings or
//! nested objects. No arrays, numbers or booleans; every leaf is text.
//!
//! A nested object does not get a `Begin` of its own: it is always the
//! value of exactly one field, and that field's `Begin` already opened the
//! nesting level. The closing `}` pops the open-name stack and emits the
//! matching `End`, so the stream shape agrees with the XML tokenizer's
//! for structurally equivalent input.

use crate::errors::PathError;
use crate::scanner::{Scanner, EOI};
use crate::token::Token;
use crate::trace::Trace;

enum State {
    Root,
    Name,
    Value,
    Done,
}

/// A pull-based tokenizer; see [`XmlLexer`](crate::xml::XmlLexer).
pub struct JsonLexer<'a> {
    scanner: Scanner<'a>,
    state: State,
    trace: Trace,
}

impl<'a> JsonLexer<'a> {
    pub fn new(input: &'a str, trace: &Trace) -> Self {
        Self {
            scanner: Scanner::new(input.trim()),
            state: State::Root,
            trace: trace.clone(),
        }
    }

    fn step(&mut self) {
        let state = std::mem::replace(&mut self.state, State::Done);
        self.state = match state {
            State::Root => lex_root(self),
            State::Name => lex_name(self),
            State::Value => lex_value(self),
            State::Done => State::Done,
        };
    }
}

impl Iterator for JsonLexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.scanner.take() {
                return Some(token);
            }
            if matches!(self.state, State::Done) {
                return None;
            }
            self.step();
        }
    }
}

/// Tokenize `input`, always ending with exactly one terminal token.
pub fn tokenize(input: &str, trace: &Trace) -> Vec<Token> {
    let _scope = trace.scope("json::tokenize");
    JsonLexer::new(input, trace).collect()
}

/// Like [`tokenize`], but converts a terminal error token into `Err`.
pub fn lex(input: &str, trace: &Trace) -> Result<Vec<Token>, PathError> {
    let tokens = tokenize(input, trace);
    match tokens.last() {
        Some(Token::Error { msg }) => Err(PathError::lex(msg.to_string())),
        _ => Ok(tokens),
    }
}

/// Recognize a naked `{` opening an unnamed root object. The root's name
/// is the empty string, pushed like any other so its `}` pops a match.
fn lex_root(l: &mut JsonLexer) -> State {
    let _scope = l.trace.scope("lex_root");
    let s = &mut l.scanner;

    s.skip_separators();
    if s.peek() == '{' {
        s.next();
        s.emit(Token::begin(""));
        s.push_name("");
    }
    State::Name
}

fn lex_name(l: &mut JsonLexer) -> State {
    let _scope = l.trace.scope("lex_name");
    let s = &mut l.scanner;

    s.skip_separators();
    let candidate = match s.peek() {
        '}' => {
            // end of the current level
            s.next();
            let name = s.pop_name().unwrap_or_default();
            s.emit(Token::end(&name));
            return State::Name;
        }
        '"' => s.accept_quoted(),
        EOI => {
            s.emit(Token::EndOfStream);
            return State::Done;
        }
        ch if ch.is_alphabetic() => s.accept_identifier(),
        ch => {
            s.emit(Token::error(format!(
                "expected a name or '}}', found '{}'",
                ch
            )));
            return State::Done;
        }
    };

    // a candidate name needs its colon
    s.skip_separators();
    match s.peek() {
        ':' => {
            s.next();
            s.ignore();
            s.push_name(&candidate);
            s.emit(Token::begin(&candidate));
            State::Value
        }
        EOI => {
            s.emit(Token::EndOfStream);
            State::Done
        }
        ch => {
            s.emit(Token::error(format!(
                "expected ':' after name '{}', found '{}'",
                candidate, ch
            )));
            State::Done
        }
    }
}

fn lex_value(l: &mut JsonLexer) -> State {
    let _scope = l.trace.scope("lex_value");
    let s = &mut l.scanner;

    s.skip_separators();
    match s.peek() {
        '"' => {
            let text = s.accept_quoted();
            s.emit(Token::value(&text));
            let name = s.pop_name().unwrap_or_default();
            s.emit(Token::end(&name));
            State::Name
        }
        '{' => {
            // a nested object; the field's Begin already opened this level
            s.next();
            s.ignore();
            State::Name
        }
        EOI => {
            s.emit(Token::EndOfStream);
            State::Done
        }
        ch => {
            s.emit(Token::error(format!(
                "expected a value to complete a name:value pair, found '{}'",
                ch
            )));
            State::Done
        }
    }
}
