//! A "log in context" diagnostic tracer: scoped begin/end lines with an
//! indent ladder, plus formatted interior notes. A `Trace` is passed
//! explicitly to the entry points that want it; the disabled default costs
//! nothing and writes nothing.

use std::cell::{Cell, RefCell};
use std::io::{self, Write};
use std::rc::Rc;

#[derive(Clone, Default)]
pub struct Trace {
    inner: Option<Rc<Inner>>,
}

struct Inner {
    out: RefCell<Box<dyn Write>>,
    depth: Cell<usize>,
}

const PAD: &str = "   |";
const MAX_DEPTH: usize = 18;

impl Trace {
    /// The no-op tracer.
    pub fn disabled() -> Self {
        Trace { inner: None }
    }

    /// A tracer writing to standard error.
    pub fn stderr() -> Self {
        Trace::new(Box::new(io::stderr()))
    }

    pub fn new(out: Box<dyn Write>) -> Self {
        Trace {
            inner: Some(Rc::new(Inner {
                out: RefCell::new(out),
                depth: Cell::new(0),
            })),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Log an indented `begin <label>` line and return a guard that logs
    /// the matching `end <label>` when dropped.
    pub fn scope(&self, label: &str) -> Scope {
        if let Some(inner) = &self.inner {
            inner.line(&format!("begin {}", label));
            inner.depth.set(inner.depth.get() + 1);
        }
        Scope {
            trace: self.clone(),
            label: label.to_string(),
        }
    }

    /// Log one indented line inside the current scope.
    pub fn note(&self, msg: &str) {
        if let Some(inner) = &self.inner {
            inner.line(msg);
        }
    }
}

impl Inner {
    fn line(&self, msg: &str) {
        // nesting deeper than the ladder just stops indenting
        let pad = PAD.repeat(self.depth.get().min(MAX_DEPTH));
        let _ = writeln!(self.out.borrow_mut(), "{}{}", pad, msg);
    }
}

/// Drop guard for one traced scope.
pub struct Scope {
    trace: Trace,
    label: String,
}

impl Drop for Scope {
    fn drop(&mut self) {
        if let Some(inner) = &self.trace.inner {
            inner.depth.set(inner.depth.get().saturating_sub(1));
            inner.line(&format!("end {}", self.label));
        }
    }
}
