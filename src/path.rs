//! Navigation over one flat token buffer. A [`Path`] is a read-only
//! `[start, end)` window; "finding" narrows the window with a linear scan
//! and never copies or mutates tokens. A failed find returns the canonical
//! empty window, from which every further operation is also empty, so
//! lookups that match nothing degrade to an empty result instead of a
//! failure.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::warn;

use crate::token::Token;

// Serially reusable: monotonic, never reset. Callers wanting a per-run
// count snapshot it before and subtract after.
static WARNINGS: AtomicUsize = AtomicUsize::new(0);

/// The number of navigation warnings raised so far, process-wide.
pub fn warnings() -> usize {
    WARNINGS.load(Ordering::Relaxed)
}

fn count_warning() {
    WARNINGS.fetch_add(1, Ordering::Relaxed);
}

/// A window over a token buffer. Cheap to copy; the buffer outlives every
/// window derived from it.
#[derive(Debug, Clone, Copy)]
pub struct Path<'a> {
    tokens: &'a [Token],
    start: usize,
    end: usize,
}

impl<'a> Path<'a> {
    /// A window over the whole buffer.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            start: 0,
            end: tokens.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// The tokens inside the window.
    pub fn tokens(&self) -> &'a [Token] {
        &self.tokens[self.start..self.end]
    }

    /// The canonical empty window: at the buffer's end, so resuming scans
    /// from it find nothing.
    fn empty(&self) -> Self {
        Self {
            tokens: self.tokens,
            start: self.tokens.len(),
            end: self.tokens.len(),
        }
    }

    /// The window strictly between the first matched `Begin(target)` /
    /// `End(target)` pair, exclusive of both markers. An `End` seen before
    /// any `Begin` belongs to a sibling an earlier find already consumed
    /// and is skipped, which is what lets [`find_next`](Self::find_next)
    /// resume mid-buffer.
    pub fn find_first(&self, target: &str) -> Path<'a> {
        let mut begun: Option<usize> = None;
        for i in self.start..self.end {
            match &self.tokens[i] {
                Token::Begin { name } if &**name == target => begun = Some(i + 1),
                Token::End { name } if &**name == target => match begun {
                    None => continue,
                    Some(start) => {
                        return Path {
                            tokens: self.tokens,
                            start,
                            end: i,
                        }
                    }
                },
                _ => {}
            }
        }
        self.empty()
    }

    /// The next sibling occurrence of `target`, scanning the buffer's
    /// remaining full extent beyond this window's end.
    pub fn find_next(&self, target: &str) -> Path<'a> {
        let rest = Path {
            tokens: self.tokens,
            start: self.end,
            end: self.tokens.len(),
        };
        rest.find_first(target)
    }

    /// The first sibling `element` whose `child`'s trimmed text equals
    /// `value`. Exhaustion is recoverable: warn and return empty, since a
    /// legitimately absent element and an input error look the same from
    /// here.
    pub fn find_such_that(&self, element: &str, child: &str, value: &str) -> Path<'a> {
        let mut q = self.find_first(element);
        while !q.is_empty() {
            if q.find_first(child).text_value() == value {
                return q;
            }
            q = q.find_next(element);
        }
        warn!(
            "did not find a {} such that {}={:?}; it may legitimately \
             not exist, or the input may have an error",
            element, child, value
        );
        count_warning();
        self.empty()
    }

    /// The n-th (1-based) sibling occurrence of `element`: one
    /// `find_first` plus n-1 `find_next` calls. Fewer than n occurrences
    /// yields the empty window.
    pub fn find_nth(&self, element: &str, n: usize) -> Path<'a> {
        let mut q = self.find_first(element);
        let mut i = 1;
        while i < n && !q.is_empty() {
            q = q.find_next(element);
            i += 1;
        }
        q
    }

    /// Every `Value` inside the window, each trimmed and followed by one
    /// space, the whole result trimmed. An empty `Value` still contributes
    /// its separator, so two values split by an empty one keep a double
    /// space between them. An all-blank result warns: legitimately blank
    /// and input error are indistinguishable here.
    pub fn text_value(&self) -> String {
        let mut s = String::new();
        for token in self.tokens() {
            if let Token::Value { text } = token {
                s.push_str(text.trim());
                s.push(' ');
            }
        }
        let s = s.trim().to_string();
        if s.is_empty() {
            warn!(
                "did not find non-blank text in the selected window; the \
                 result may be legitimately blank, or the input may have \
                 an error"
            );
            count_warning();
        }
        s
    }
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, token) in self.tokens().iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", token)?;
        }
        write!(f, "]")
    }
}
