//! A tokenizer for the XML-like tag/text grammar: tags `<name attr="value">`,
//! `</name>` and self-closing `<name/>`, with plain text between them.
//! No namespaces, CDATA, comments or entity decoding. Attributes are
//! tokenized as if they were nested single-value elements, so
//! `<foo name="value"/>` becomes `BEGIN foo`, `BEGIN name`, `VALUE value`,
//! `END name`, `VALUE ""`, `END foo`.
//!
//! Malformed input is handled leniently: an unterminated tag emits a
//! best-effort partial token and then `EndOfStream` rather than an error.

use crate::errors::PathError;
use crate::scanner::{is_identifier_char, Scanner, EOI};
use crate::token::Token;
use crate::trace::Trace;

enum State {
    Tag,
    Attributes { element: Box<str> },
    Text,
    Done,
}

/// A pull-based tokenizer: each call to `next` steps the state machine
/// until it has a token to hand over.
pub struct XmlLexer<'a> {
    scanner: Scanner<'a>,
    state: State,
    trace: Trace,
}

impl<'a> XmlLexer<'a> {
    pub fn new(input: &'a str, trace: &Trace) -> Self {
        Self {
            scanner: Scanner::new(input.trim()),
            state: State::Tag,
            trace: trace.clone(),
        }
    }

    fn step(&mut self) {
        let state = std::mem::replace(&mut self.state, State::Done);
        self.state = match state {
            State::Tag => lex_tag(self),
            State::Attributes { element } => lex_attributes(self, &element),
            State::Text => lex_text(self),
            State::Done => State::Done,
        };
    }
}

impl Iterator for XmlLexer<'_> {
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
    let _scope = trace.scope("xml::tokenize");
    XmlLexer::new(input, trace).collect()
}

/// Like [`tokenize`], but converts a terminal error token into `Err`.
pub fn lex(input: &str, trace: &Trace) -> Result<Vec<Token>, PathError> {
    let tokens = tokenize(input, trace);
    match tokens.last() {
        Some(Token::Error { msg }) => Err(PathError::lex(msg.to_string())),
        _ => Ok(tokens),
    }
}

fn lex_tag(l: &mut XmlLexer) -> State {
    let _scope = l.trace.scope("lex_tag");
    let s = &mut l.scanner;

    if s.peek() != '<' {
        return State::Text;
    }
    s.next();
    s.ignore(); // discard '<'

    let closing = s.accept('/');
    if closing {
        s.ignore();
    }

    let make = if closing { Token::end } else { Token::begin };

    loop {
        match s.peek() {
            '/' => {
                // self-closing element
                let name = s.current().to_string();
                s.emit(make(&name));
                s.emit(Token::value(""));
                s.emit(Token::end(&name));
                s.next();
                s.accept('>');
                s.ignore();
                return State::Text;
            }
            '>' => {
                let name = s.current().to_string();
                s.emit(make(&name));
                s.next();
                s.ignore();
                return State::Text;
            }
            EOI => {
                // unterminated tag: emit what we have and stop
                let name = s.current().to_string();
                if !name.is_empty() {
                    s.emit(make(&name));
                }
                s.emit(Token::EndOfStream);
                return State::Done;
            }
            ch if ch.is_whitespace() => {
                // the name ends here; the rest is attributes
                let name = s.current().to_string();
                s.emit(make(&name));
                return State::Attributes {
                    element: name.into_boxed_str(),
                };
            }
            _ => {
                s.next();
            }
        }
    }
}

fn lex_attributes(l: &mut XmlLexer, element: &str) -> State {
    let _scope = l.trace.scope("lex_attributes");
    let s = &mut l.scanner;

    loop {
        s.skip_separators();
        match s.peek() {
            '>' => {
                s.next();
                s.ignore();
                return State::Text;
            }
            '/' => {
                // tag closes as self-closing
                s.next();
                s.accept('>');
                s.ignore();
                s.emit(Token::value(""));
                s.emit(Token::end(element));
                return State::Text;
            }
            EOI => {
                s.emit(Token::EndOfStream);
                return State::Done;
            }
            ch if is_identifier_char(ch) => {
                let name = s.accept_identifier();
                if s.accept('=') {
                    s.ignore();
                    let value = if s.peek() == '"' {
                        s.accept_quoted()
                    } else {
                        // lenient: a bare value runs to the next separator
                        s.accept_identifier()
                    };
                    s.emit(Token::begin(&name));
                    s.emit(Token::value(&value));
                    s.emit(Token::end(&name));
                } else {
                    // a name with no value; drop it
                    s.ignore();
                }
            }
            _ => {
                // stray character in attribute position; skip it
                s.next();
                s.ignore();
            }
        }
    }
}

fn lex_text(l: &mut XmlLexer) -> State {
    let _scope = l.trace.scope("lex_text");
    let s = &mut l.scanner;

    loop {
        match s.peek() {
            '<' => {
                let text = s.current().to_string();
                if !text.is_empty() {
                    s.emit(Token::value(&text));
                }
                s.ignore();
                return State::Tag;
            }
            EOI => {
                let text = s.current().to_string();
                if !text.is_empty() {
                    s.emit(Token::value(&text));
                }
                s.emit(Token::EndOfStream);
                return State::Done;
            }
            _ => {
                s.next();
            }
        }
    }
}
