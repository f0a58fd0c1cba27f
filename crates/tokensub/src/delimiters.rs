use alloc::{borrow::Cow, string::String};

use crate::error::DelimiterError;

/// The open/close token pair that encloses an expression.
///
/// Both tokens are matched as literal substrings. They may be equal (`%` /
/// `%`) or share characters (`{{` / `}}`), but neither may be empty: the
/// constructor rejects empty tokens, so every `Delimiters` value is usable.
///
/// # Examples
///
/// ```rust
/// use tokensub::{DelimiterError, Delimiters};
///
/// let delims = Delimiters::new("<%", "%>").unwrap();
/// assert_eq!(delims.open(), "<%");
/// assert_eq!(delims.close(), "%>");
///
/// assert_eq!(Delimiters::new("", "}"), Err(DelimiterError::EmptyOpenToken));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawDelimiters"))]
pub struct Delimiters {
    open: Cow<'static, str>,
    close: Cow<'static, str>,
}

impl Delimiters {
    /// `${` and `}`: shell-style variable references.
    pub const DOLLAR_BRACE: Self = Self::from_static("${", "}");

    /// `#{` and `}`: parameter placeholders as used by SQL mappers.
    pub const HASH_BRACE: Self = Self::from_static("#{", "}");

    /// `{{` and `}}`: mustache-style templates.
    pub const DOUBLE_BRACE: Self = Self::from_static("{{", "}}");

    const fn from_static(open: &'static str, close: &'static str) -> Self {
        Self {
            open: Cow::Borrowed(open),
            close: Cow::Borrowed(close),
        }
    }

    /// Creates a delimiter pair.
    ///
    /// # Errors
    ///
    /// Returns [`DelimiterError::EmptyOpenToken`] or
    /// [`DelimiterError::EmptyCloseToken`] when either token is empty.
    pub fn new(
        open: impl Into<Cow<'static, str>>,
        close: impl Into<Cow<'static, str>>,
    ) -> Result<Self, DelimiterError> {
        let open = open.into();
        let close = close.into();
        if open.is_empty() {
            return Err(DelimiterError::EmptyOpenToken);
        }
        if close.is_empty() {
            return Err(DelimiterError::EmptyCloseToken);
        }
        Ok(Self { open, close })
    }

    /// The token that starts an expression.
    #[must_use]
    pub fn open(&self) -> &str {
        &self.open
    }

    /// The token that ends an expression.
    #[must_use]
    pub fn close(&self) -> &str {
        &self.close
    }

    /// Wraps `expression` in this pair, producing the text an expression
    /// would have been scanned from (ignoring escapes).
    #[must_use]
    pub fn wrap(&self, expression: &str) -> String {
        let mut out = String::with_capacity(self.open.len() + expression.len() + self.close.len());
        out.push_str(&self.open);
        out.push_str(expression);
        out.push_str(&self.close);
        out
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawDelimiters {
    open: String,
    close: String,
}

#[cfg(feature = "serde")]
impl TryFrom<RawDelimiters> for Delimiters {
    type Error = DelimiterError;

    fn try_from(raw: RawDelimiters) -> Result<Self, Self::Error> {
        Self::new(raw.open, raw.close)
    }
}
