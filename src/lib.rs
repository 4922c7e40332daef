//! XPath-style path expressions over flat token streams.
//!
//! Two tokenizers, one for an XML-like tag/text grammar and one for a
//! relaxed JSON-like object grammar, turn raw text into a single flat,
//! order-preserving sequence of `Begin`/`End`/`Value` tokens. A [`Path`]
//! is a read-only window over that sequence; path expressions navigate it
//! with linear scans, never materializing a tree.
//!
//! ## Navigating directly
//!
//! ```
//! use tagpath::{xml, Path, Trace};
//!
//! let trace = Trace::disabled();
//! let tokens = xml::tokenize("<galaxy><world>earth</world></galaxy>", &trace);
//! let path = Path::new(&tokens);
//!
//! assert_eq!(path.find_first("world").text_value(), "earth");
//! ```
//!
//! ## Interpreting an expression
//!
//! ```
//! use tagpath::{interpret, json, Trace};
//!
//! let trace = Trace::disabled();
//! let tokens = json::tokenize(
//!     r#"universe: {
//!         galaxy: { world: "nada" },
//!         galaxy: { world: "earth", timelord: "who" },
//!     }"#,
//!     &trace,
//! );
//!
//! let value = interpret::evaluate(
//!     &tokens,
//!     r#"/universe/galaxy[world="earth"]/timelord"#,
//!     false,
//!     &trace,
//! );
//! assert_eq!(value, "who");
//! ```
//!
//! Expressions that match nothing return an empty string and raise a
//! warning (see [`path::warnings`]) rather than failing; only a malformed
//! document ends tokenization early, with an error token the navigation
//! engine simply never matches.

pub mod errors;
pub mod interpret;
pub mod json;
pub mod path;
mod scanner;
pub mod token;
pub mod trace;
pub mod xml;

pub use errors::PathError;
pub use errors::PathErrorKind;
pub use interpret::evaluate;
pub use path::Path;
pub use token::Token;
pub use trace::Trace;
