use std::fmt;

#[derive(Debug, PartialEq)]
pub enum PathErrorKind {
    /// Malformed document: tokenization ended on an error token.
    Lex,
    /// Unusable input at the outer boundary (empty stdin, unknown format).
    Input,
}

#[derive(Debug)]
pub struct PathError {
    pub kind: PathErrorKind,
    pub msg: String,
}

impl PathError {
    pub fn new(kind: PathErrorKind, msg: String) -> Self {
        Self { kind, msg }
    }

    pub fn lex(msg: String) -> Self {
        Self::new(PathErrorKind::Lex, msg)
    }

    pub fn input(msg: String) -> Self {
        Self::new(PathErrorKind::Input, msg)
    }
}

impl std::error::Error for PathError {}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PathErrorKind::Lex => write!(f, "lex error: {}", self.msg),
            PathErrorKind::Input => write!(f, "input error: {}", self.msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_display() {
        let err = PathError::lex("expected ':' after name 'a', found 'b'".to_string());
        assert_eq!(err.kind, PathErrorKind::Lex);
        assert_eq!(
            err.to_string(),
            "lex error: expected ':' after name 'a', found 'b'"
        );
    }

    #[test]
    fn input_error_display() {
        let err = PathError::input("no input was found on stdin".to_string());
        assert_eq!(err.kind, PathErrorKind::Input);
        assert_eq!(err.to_string(), "input error: no input was found on stdin");
    }

    #[test]
    fn constructors_agree_with_new() {
        let a = PathError::input("x".to_string());
        let b = PathError::new(PathErrorKind::Input, "x".to_string());
        assert_eq!(a.kind, b.kind);
        assert_eq!(a.msg, b.msg);
    }
}
