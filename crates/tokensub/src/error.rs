use thiserror::Error;

/// A delimiter pair that cannot be used for scanning.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterError {
    /// The open token is the empty string.
    #[error("open token must not be empty")]
    EmptyOpenToken,
    /// The close token is the empty string.
    #[error("close token must not be empty")]
    EmptyCloseToken,
}

/// Error returned by the one-shot [`parse`](crate::parse) helper.
///
/// [`TokenParser::parse`](crate::TokenParser::parse) never produces this
/// type: its delimiters are validated at construction, and handler errors are
/// returned as-is.
#[derive(Error, Debug, PartialEq)]
pub enum Error<E> {
    /// The delimiter pair was rejected before scanning started.
    #[error("invalid delimiters: {0}")]
    Delimiters(#[from] DelimiterError),
    /// The handler failed; the scan stopped at that expression.
    #[error(transparent)]
    Handler(E),
}
