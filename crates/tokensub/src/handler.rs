use alloc::string::String;
use core::{convert::Infallible, error::Error, fmt};

/// Transforms the text of one expression into its replacement.
///
/// The scanner calls [`handle_token`](Self::handle_token) once per matched,
/// unescaped, closed expression, in input order, and splices the returned
/// string in place of the whole `open...close` span. The expression is passed
/// with escaped close tokens already resolved.
///
/// Any `Fn(&str) -> String` closure is an infallible handler. Wrap a
/// `Fn(&str) -> Result<String, E>` closure with [`fallible`] to surface errors.
/// Handlers take `&self`; impure handlers keep their state behind a `Cell`,
/// `RefCell` or lock, which also decides whether a parser can be shared across
/// threads.
pub trait TokenHandler {
    /// Failure reported by the handler. The scanner returns it to its caller
    /// unchanged.
    type Error: Error;

    /// Returns the replacement for `expression`.
    ///
    /// # Errors
    ///
    /// Whatever the handler reports; the scan stops at this expression.
    fn handle_token(&self, expression: &str) -> Result<String, Self::Error>;
}

impl<F> TokenHandler for F
where
    F: Fn(&str) -> String,
{
    type Error = Infallible;

    #[inline]
    fn handle_token(&self, expression: &str) -> Result<String, Self::Error> {
        Ok(self(expression))
    }
}

/// Adapter turning a `Fn(&str) -> Result<String, E>` closure into a
/// [`TokenHandler`]. Built with [`fallible`].
#[derive(Clone, Copy)]
pub struct Fallible<F>(F);

impl<F> fmt::Debug for Fallible<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fallible").finish_non_exhaustive()
    }
}

/// Wraps a fallible closure as a [`TokenHandler`].
///
/// ```rust
/// use tokensub::{Delimiters, TokenParser, fallible};
///
/// #[derive(Debug, PartialEq, thiserror::Error)]
/// #[error("unknown variable {0}")]
/// struct Unknown(String);
///
/// let parser = TokenParser::new(
///     Delimiters::DOLLAR_BRACE,
///     fallible(|name: &str| match name {
///         "user" => Ok("ferris".to_string()),
///         other => Err(Unknown(other.to_string())),
///     }),
/// );
/// assert_eq!(parser.parse("hi ${user}").unwrap(), "hi ferris");
/// assert_eq!(parser.parse("${home}"), Err(Unknown("home".to_string())));
/// ```
pub fn fallible<F, E>(f: F) -> Fallible<F>
where
    F: Fn(&str) -> Result<String, E>,
    E: Error,
{
    Fallible(f)
}

impl<F, E> TokenHandler for Fallible<F>
where
    F: Fn(&str) -> Result<String, E>,
    E: Error,
{
    type Error = E;

    #[inline]
    fn handle_token(&self, expression: &str) -> Result<String, Self::Error> {
        (self.0)(expression)
    }
}
