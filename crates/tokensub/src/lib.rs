//! Single-pass substitution of delimited expressions.
//!
//! `tokensub` scans a string for expressions enclosed in an open/close
//! delimiter pair (for example `${name}`), hands each expression to a
//! caller-supplied [`TokenHandler`], and splices the handler's result back
//! into the surrounding text. A backslash directly before a delimiter escapes
//! it:
//!
//! ```rust
//! use tokensub::{Delimiters, TokenParser};
//!
//! let parser = TokenParser::new(Delimiters::DOLLAR_BRACE, |expr: &str| expr.to_uppercase());
//! assert_eq!(parser.render("hello ${name}!"), "hello NAME!");
//! assert_eq!(parser.render(r"cost: \${price}"), "cost: ${price}");
//! assert_eq!(parser.render(r"${a\}b}"), "A}B");
//! assert_eq!(parser.render("${unterminated"), "${unterminated");
//! ```
//!
//! The scan itself is available as an iterator of [`Segment`]s through
//! [`TokenParser::segments`], for callers that want to inspect expressions
//! without rendering them.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod trace;

mod delimiters;
mod error;
mod handler;
mod parser;
mod scanner;

#[cfg(test)]
mod tests;

pub use delimiters::Delimiters;
pub use error::{DelimiterError, Error};
pub use handler::{Fallible, TokenHandler, fallible};
pub use parser::{TokenParser, parse};
pub use scanner::{ESCAPE, Scanner, Segment};
