//! The path-expression interpreter. An expression like
//! `/universe/galaxy[world="earth"]/timelord` compiles into a sequence of
//! [`Step`]s, each executed against the window the previous step produced;
//! the result is the final window's text. `//` is accepted as an alias for
//! `/`; there is no recursive descendant search. A malformed expression
//! never fails a run: components that match nothing simply produce an
//! empty window.

use std::iter::Peekable;
use std::str::Chars;

use crate::path::Path;
use crate::token::Token;
use crate::trace::Trace;

/// The optional `[...]` filter on a path component.
#[derive(Debug, PartialEq)]
pub enum Selector {
    None,
    /// `name[n]`, 1-based.
    Nth(usize),
    /// `name[child="value"]`.
    ChildEquals { name: String, value: String },
}

/// One compiled path component: a target name plus its selector.
#[derive(Debug, PartialEq)]
pub struct Step {
    pub name: String,
    pub selector: Selector,
}

/// Compile an expression into steps, in document order. Empty components
/// (a leading `/`, a doubled `//`, a trailing `/`) produce no step.
pub fn compile(expression: &str) -> Vec<Step> {
    let mut steps = Vec::new();
    let mut name = String::new();
    let mut selector = Selector::None;

    let mut chars = expression.trim().chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '/' => finish_step(&mut steps, &mut name, &mut selector),
            '[' => selector = parse_selector(&mut chars),
            _ => name.push(ch),
        }
    }
    finish_step(&mut steps, &mut name, &mut selector);

    steps
}

fn finish_step(steps: &mut Vec<Step>, name: &mut String, selector: &mut Selector) {
    if !name.is_empty() {
        steps.push(Step {
            name: std::mem::take(name),
            selector: std::mem::replace(selector, Selector::None),
        });
    } else {
        *selector = Selector::None;
    }
}

/// Scan one selector body up to `]`. A leading digit run is a positional
/// selector; otherwise the body splits on `=` into a child name and a
/// value, with literal quote characters dropped.
fn parse_selector(chars: &mut Peekable<Chars>) -> Selector {
    let mut body = String::new();
    for ch in chars.by_ref() {
        if ch == ']' {
            break;
        }
        body.push(ch);
    }
    let body = body.trim();

    if body.starts_with(|c: char| c.is_ascii_digit()) {
        let digits: String = body.chars().take_while(|c| c.is_ascii_digit()).collect();
        return Selector::Nth(digits.parse().unwrap_or(0));
    }

    let mut name = String::new();
    let mut value = String::new();
    let mut in_value = false;
    for ch in body.chars() {
        match ch {
            '=' => in_value = true,
            '"' => {}
            _ if in_value => value.push(ch),
            _ => name.push(ch),
        }
    }
    Selector::ChildEquals {
        name: name.trim().to_string(),
        value,
    }
}

/// Evaluate `expression` against the token buffer and return the selected
/// text. With `explain`, additionally write the parsed component list and
/// the equivalent navigation-call chain to stderr; the returned value is
/// unaffected.
pub fn evaluate(tokens: &[Token], expression: &str, explain: bool, trace: &Trace) -> String {
    let _scope = trace.scope("evaluate");

    let steps = compile(expression);
    let mut path = Path::new(tokens);

    let mut parsed = String::from("/");
    let mut chain = String::from("let path = Path::new(&tokens); let value = path");
    for (i, step) in steps.iter().enumerate() {
        if i > 0 {
            parsed.push('/');
        }
        parsed.push_str(&record_parse(step));
        chain.push_str(&record_step(step));

        path = execute(path, step);
        trace.note(&format!("after {}: {}", record_step(step).trim_start_matches('.'), path));
    }
    chain.push_str(".text_value();");

    trace.note(&format!("parse={}", parsed));
    trace.note(&format!("explanation={}", chain));
    if explain {
        eprintln!("explanation: {}", chain);
    }

    path.text_value()
}

fn execute<'a>(path: Path<'a>, step: &Step) -> Path<'a> {
    match &step.selector {
        Selector::None => path.find_first(&step.name),
        Selector::Nth(n) => path.find_nth(&step.name, *n),
        Selector::ChildEquals { name, value } => path.find_such_that(&step.name, name, value),
    }
}

fn record_parse(step: &Step) -> String {
    match &step.selector {
        Selector::None => step.name.clone(),
        Selector::Nth(n) => format!("{}[{}]", step.name, n),
        Selector::ChildEquals { name, value } => {
            format!("{}[{}={:?}]", step.name, name, value)
        }
    }
}

fn record_step(step: &Step) -> String {
    match &step.selector {
        Selector::None => format!(".find_first({:?})", step.name),
        Selector::Nth(n) => format!(".find_nth({:?}, {})", step.name, n),
        Selector::ChildEquals { name, value } => {
            format!(".find_such_that({:?}, {:?}, {:?})", step.name, name, value)
        }
    }
}
