use core::fmt;

/// One lexical unit exchanged between a tokenizer and the navigation
/// engine. `Begin`/`End` pairs obey stack discipline in well-formed
/// streams; `Value` carries leaf text; exactly one of `EndOfStream` or
/// `Error` terminates every run. `Pad` is a filler kind for defensively
/// over-allocated buffers and never carries semantic content.
#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Pad,
    Error { msg: Box<str> },
    EndOfStream,
    Begin { name: Box<str> },
    Value { text: Box<str> },
    End { name: Box<str> },
}

impl Token {
    pub fn begin(name: &str) -> Self {
        Token::Begin {
            name: name.to_string().into_boxed_str(),
        }
    }

    pub fn end(name: &str) -> Self {
        Token::End {
            name: name.to_string().into_boxed_str(),
        }
    }

    pub fn value(text: &str) -> Self {
        Token::Value {
            text: text.to_string().into_boxed_str(),
        }
    }

    pub fn error(msg: String) -> Self {
        Token::Error {
            msg: msg.into_boxed_str(),
        }
    }

    /// True for the kinds that end a consumer's read loop.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Token::EndOfStream | Token::Error { .. } | Token::Pad)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Pad => f.write_str("{PAD}"),
            Token::Error { msg } => write!(f, "{{ERROR, \"{}\"}}", *msg),
            Token::EndOfStream => f.write_str("{EOS}"),
            Token::Begin { name } => write!(f, "{{BEGIN, \"{}\"}}", *name),
            Token::Value { text } => write!(f, "{{VALUE, \"{}\"}}", *text),
            Token::End { name } => write!(f, "{{END, \"{}\"}}", *name),
        }
    }
}
