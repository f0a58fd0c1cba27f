//! Scanner: one left-to-right pass that classifies input into segments.
//!
//! What it does
//! - Searches the committed offset forward for the next open token (literal
//!   substring search, no regex, no backtracking).
//! - An open token whose preceding byte is an uncommitted `\` is escaped: the
//!   backslash is dropped and the token is yielded as literal text.
//! - Otherwise the scanner searches for the matching close token. A close token
//!   preceded by `\` inside the expression body is de-escaped into the
//!   expression and the search continues after it.
//! - A missing close token turns the rest of the input, starting at the open
//!   token, into an [`Segment::Unterminated`] tail and ends the scan.
//!
//! Invariants
//! - The offset only moves forward; every input byte belongs to exactly one
//!   yielded segment, so concatenating [`Segment::source`] over the scan gives
//!   back the input.
//! - Expression text is borrowed from the input unless an escaped close token
//!   forced an owned copy.
//! - Empty literal spans are never yielded.
//!
//! Matches are found on bytes. Both tokens are valid UTF-8 and so is the
//! input, which means every match starts and ends on a char boundary, and the
//! ASCII escape byte is always a char of its own.

use alloc::{borrow::Cow, string::String};
use core::iter::FusedIterator;

use bstr::ByteSlice;

use crate::Delimiters;

/// The escape marker. Not configurable.
pub const ESCAPE: char = '\\';

const ESCAPE_BYTE: u8 = b'\\';

/// A classified span of the scanned input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Segment<'src> {
    /// Text outside any expression, copied to the output as-is.
    Literal(&'src str),
    /// An escaped open token. The output gets `token`; `raw` also includes the
    /// escape marker that was dropped.
    EscapedDelimiter {
        /// The open token, emitted literally.
        token: &'src str,
        /// `\` followed by the open token.
        raw: &'src str,
    },
    /// A delimited expression whose replacement comes from the handler.
    Expression {
        /// The text between the delimiters with escaped close tokens resolved.
        expression: Cow<'src, str>,
        /// The full `open...close` span in the input.
        raw: &'src str,
    },
    /// An open token without a matching close token, through the end of the
    /// input. Copied to the output verbatim.
    Unterminated(&'src str),
}

impl<'src> Segment<'src> {
    /// The input text this segment was scanned from.
    #[must_use]
    pub fn source(&self) -> &'src str {
        match self {
            Segment::Literal(s) | Segment::Unterminated(s) => *s,
            Segment::EscapedDelimiter { raw, .. } | Segment::Expression { raw, .. } => *raw,
        }
    }

    /// The text this segment contributes to the output, or `None` for an
    /// expression, whose output is decided by the handler.
    #[must_use]
    pub fn rendered(&self) -> Option<&'src str> {
        match self {
            Segment::Literal(s) | Segment::Unterminated(s) => Some(*s),
            Segment::EscapedDelimiter { token, .. } => Some(*token),
            Segment::Expression { .. } => None,
        }
    }

    /// The expression handed to the handler, if this is an expression.
    #[must_use]
    pub fn expression(&self) -> Option<&str> {
        match self {
            Segment::Expression { expression, .. } => Some(&**expression),
            _ => None,
        }
    }

    /// Consumes the segment, returning its expression, if any.
    #[must_use]
    pub fn into_expression(self) -> Option<Cow<'src, str>> {
        match self {
            Segment::Expression { expression, .. } => Some(expression),
            _ => None,
        }
    }
}

/// Iterator over the [`Segment`]s of one input.
///
/// Created by [`TokenParser::segments`](crate::TokenParser::segments) or
/// [`Scanner::new`].
///
/// ```rust
/// use std::borrow::Cow;
///
/// use tokensub::{Delimiters, Scanner, Segment};
///
/// let delims = Delimiters::DOLLAR_BRACE;
/// let segments: Vec<_> = Scanner::new(&delims, r"a ${b} \${c}").collect();
/// assert_eq!(
///     segments,
///     vec![
///         Segment::Literal("a "),
///         Segment::Expression { expression: Cow::Borrowed("b"), raw: "${b}" },
///         Segment::Literal(" "),
///         Segment::EscapedDelimiter { token: "${", raw: r"\${" },
///         Segment::Literal("c}"),
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Scanner<'d, 'src> {
    open: &'d str,
    close: &'d str,
    text: &'src str,
    // Bytes before `offset` have been classified.
    offset: usize,
    // A literal prefix and the segment after it are found together; the
    // second one waits here.
    pending: Option<Segment<'src>>,
}

impl<'d, 'src> Scanner<'d, 'src> {
    /// Starts a scan of `text` with the given delimiters.
    #[must_use]
    pub fn new(delimiters: &'d Delimiters, text: &'src str) -> Self {
        Self {
            open: delimiters.open(),
            close: delimiters.close(),
            text,
            offset: 0,
            pending: None,
        }
    }

    /// The input not yet classified.
    #[must_use]
    pub fn remainder(&self) -> &'src str {
        &self.text[self.offset..]
    }

    /// Whether the byte before `pos` is an escape marker that has not already
    /// been consumed, i.e. lies at or after `floor`.
    #[inline]
    fn escaped_at(&self, pos: usize, floor: usize) -> bool {
        pos > floor && self.text.as_bytes()[pos - 1] == ESCAPE_BYTE
    }

    /// Scans the expression opened at `start`, leaving the offset after its
    /// close token (or at the end of the input when unterminated).
    fn scan_expression(&mut self, start: usize) -> Segment<'src> {
        let text = self.text;
        let bytes = text.as_bytes();
        let mut cursor = start + self.open.len();
        let mut owned: Option<String> = None;

        loop {
            let Some(found) = bytes[cursor..].find(self.close.as_bytes()) else {
                trace!(start, "unterminated expression");
                self.offset = text.len();
                return Segment::Unterminated(&text[start..]);
            };
            let end = cursor + found;

            if self.escaped_at(end, cursor) {
                trace!(end, "escaped close token");
                let buf = owned.get_or_insert_with(String::new);
                buf.push_str(&text[cursor..end - 1]);
                buf.push_str(self.close);
                cursor = end + self.close.len();
                continue;
            }

            let after = end + self.close.len();
            let body = &text[cursor..end];
            let expression = match owned {
                Some(mut buf) => {
                    buf.push_str(body);
                    Cow::Owned(buf)
                }
                None => Cow::Borrowed(body),
            };
            trace!(start, end = after, "expression");
            self.offset = after;
            return Segment::Expression {
                expression,
                raw: &text[start..after],
            };
        }
    }
}

impl<'src> Iterator for Scanner<'_, 'src> {
    type Item = Segment<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(segment) = self.pending.take() {
            return Some(segment);
        }

        let text = self.text;
        let offset = self.offset;
        if offset >= text.len() {
            return None;
        }

        let Some(found) = text.as_bytes()[offset..].find(self.open.as_bytes()) else {
            self.offset = text.len();
            return Some(Segment::Literal(&text[offset..]));
        };
        let start = offset + found;

        let (literal, segment) = if self.escaped_at(start, offset) {
            trace!(start, "escaped open token");
            let after = start + self.open.len();
            self.offset = after;
            (
                &text[offset..start - 1],
                Segment::EscapedDelimiter {
                    token: &text[start..after],
                    raw: &text[start - 1..after],
                },
            )
        } else {
            (&text[offset..start], self.scan_expression(start))
        };

        if literal.is_empty() {
            Some(segment)
        } else {
            self.pending = Some(segment);
            Some(Segment::Literal(literal))
        }
    }
}

impl FusedIterator for Scanner<'_, '_> {}
