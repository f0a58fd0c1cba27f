//! Substitution on top of the scanner.
//!
//! ```rust
//! use std::cell::RefCell;
//!
//! use tokensub::{Delimiters, TokenParser};
//!
//! // Rewrite `#{name}` placeholders to positional `?` parameters, collecting
//! // the names in order.
//! let params = RefCell::new(Vec::new());
//! let parser = TokenParser::new(Delimiters::HASH_BRACE, |name: &str| {
//!     params.borrow_mut().push(name.to_string());
//!     "?".to_string()
//! });
//!
//! let sql = parser.render("SELECT * FROM t WHERE id = #{id} AND name = #{name}");
//! assert_eq!(sql, "SELECT * FROM t WHERE id = ? AND name = ?");
//! assert_eq!(*params.borrow(), ["id", "name"]);
//! ```

use alloc::{borrow::Cow, string::String};
use core::convert::Infallible;

use crate::{
    delimiters::Delimiters,
    error::Error,
    handler::TokenHandler,
    scanner::{Scanner, Segment},
};

/// A delimiter pair bound to a handler.
///
/// The parser holds no per-call state: [`parse`](Self::parse) takes `&self`,
/// so one parser can serve many inputs, and is `Sync` whenever its handler
/// is.
#[derive(Debug, Clone)]
pub struct TokenParser<H> {
    delimiters: Delimiters,
    handler: H,
}

impl<H> TokenParser<H> {
    /// Binds `handler` to `delimiters`.
    #[must_use]
    pub fn new(delimiters: Delimiters, handler: H) -> Self {
        Self {
            delimiters,
            handler,
        }
    }

    /// The delimiter pair this parser scans for.
    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// The handler expressions are passed to.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Consumes the parser, returning its handler.
    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Scans `text` without invoking the handler.
    #[must_use]
    pub fn segments<'a, 'src>(&'a self, text: &'src str) -> Scanner<'a, 'src> {
        Scanner::new(&self.delimiters, text)
    }

    /// The expressions [`parse`](Self::parse) would pass to the handler, in
    /// order, without calling it.
    ///
    /// ```rust
    /// use tokensub::{Delimiters, TokenParser};
    ///
    /// let parser = TokenParser::new(Delimiters::DOUBLE_BRACE, |e: &str| e.to_string());
    /// let names: Vec<_> = parser.expressions("{{a}} \\{{b}} {{c}}").collect();
    /// assert_eq!(names, ["a", "c"]);
    /// ```
    pub fn expressions<'a, 'src>(
        &'a self,
        text: &'src str,
    ) -> impl Iterator<Item = Cow<'src, str>> {
        self.segments(text).filter_map(Segment::into_expression)
    }
}

impl<H: TokenHandler> TokenParser<H> {
    /// Substitutes every delimited expression in `text`.
    ///
    /// An absent or empty `text` yields an empty string. Text without an open
    /// token is returned unchanged. Unterminated expressions are copied
    /// verbatim and never reach the handler.
    ///
    /// # Errors
    ///
    /// The first error the handler returns, unchanged. Scanning stops there.
    pub fn parse<'src>(&self, text: impl Into<Option<&'src str>>) -> Result<String, H::Error> {
        let Some(text) = text.into() else {
            return Ok(String::new());
        };
        let mut out = String::with_capacity(text.len());
        self.parse_into(text, &mut out)?;
        Ok(out)
    }

    /// Like [`parse`](Self::parse), appending to `out` instead of allocating.
    ///
    /// On error, `out` holds the output produced before the failing
    /// expression.
    ///
    /// # Errors
    ///
    /// The first error the handler returns, unchanged.
    pub fn parse_into(&self, text: &str, out: &mut String) -> Result<(), H::Error> {
        for segment in self.segments(text) {
            match segment {
                Segment::Expression { expression, .. } => {
                    out.push_str(&self.handler.handle_token(&expression)?);
                }
                other => {
                    if let Some(literal) = other.rendered() {
                        out.push_str(literal);
                    }
                }
            }
        }
        Ok(())
    }
}

impl<H: TokenHandler<Error = Infallible>> TokenParser<H> {
    /// [`parse`](Self::parse) for handlers that cannot fail.
    pub fn render<'src>(&self, text: impl Into<Option<&'src str>>) -> String {
        match self.parse(text) {
            Ok(out) => out,
            Err(never) => match never {},
        }
    }
}

/// Substitutes the expressions between `open` and `close` in `text` in one
/// call.
///
/// ```rust
/// let out = tokensub::parse("${a}-${b}", "${", "}", |x: &str| format!("[{x}]"));
/// assert_eq!(out.unwrap(), "[a]-[b]");
/// ```
///
/// # Errors
///
/// [`Error::Delimiters`] when `open` or `close` is empty, [`Error::Handler`]
/// when the handler fails.
pub fn parse<'src, H: TokenHandler>(
    text: impl Into<Option<&'src str>>,
    open: &str,
    close: &str,
    handler: H,
) -> Result<String, Error<H::Error>> {
    let delimiters = Delimiters::new(String::from(open), String::from(close))?;
    TokenParser::new(delimiters, handler)
        .parse(text)
        .map_err(Error::Handler)
}
