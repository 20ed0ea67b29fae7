use std::io;

use bstr::ByteSlice;
use thiserror::Error;

use crate::source::Location;

/// A failure reported by a character source or the value decoder.
///
/// These never abort parsing by themselves; the tree builder wraps them in an
/// [`ErrorKind`] together with the structural context they occurred in.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    /// Input ended before the closing quote.
    #[error("unterminated string")]
    UnterminatedString,
    /// A backslash followed by a character that is not a JSON escape.
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),
    /// `\u` not followed by four hex digits.
    #[error("invalid unicode escape sequence")]
    InvalidUnicodeEscape,
    /// A UTF-16 surrogate escape without its other half.
    #[error("unpaired surrogate \\u{0:04X}")]
    LoneSurrogate(u32),
    /// The decoded bytes of a string are not UTF-8.
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,
    /// A string or number does not fit in the text buffer.
    #[error("token longer than {limit} bytes")]
    TokenTooLarge {
        /// Capacity of the text buffer.
        limit: usize,
    },
    /// A number that does not follow the JSON grammar.
    #[error("invalid number")]
    InvalidNumber,
    /// A `t`, `f` or `n` not followed by the rest of `true`, `false` or `null`.
    #[error("invalid literal")]
    InvalidLiteral,
    /// A character that cannot start a value.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    /// A `]` where no array is open.
    #[error("unexpected ']'")]
    UnexpectedEndOfArray,
    /// Input ended where a value was expected.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}

impl LexError {
    /// Whether the failure lies inside a token (string, number or literal)
    /// rather than in the choice of token.
    #[must_use]
    pub fn is_lexical(&self) -> bool {
        !matches!(
            self,
            LexError::UnexpectedCharacter(_)
                | LexError::UnexpectedEndOfArray
                | LexError::UnexpectedEndOfInput
        )
    }
}

/// Broad class of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Unexpected character, missing or extra comma, missing property name.
    Structural,
    /// Malformed string, number or literal.
    Lexical,
    /// Nesting deeper than the parser stack.
    Resource,
    /// Non-whitespace left after the document, when rejected by the options.
    TrailingContent,
    /// The underlying reader failed.
    Io,
}

/// What went wrong while building the tree.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The document does not start with a value.
    #[error("no object/array/value ({0})")]
    NoValue(#[source] LexError),
    /// A comma right before `}` or `]`.
    #[error("trailing comma")]
    TrailingComma,
    /// Two array elements without a comma between them.
    #[error("missing comma")]
    MissingComma,
    /// A property key that is malformed, not preceded by a comma, or not
    /// followed by `:`.
    #[error("object missing property name")]
    MissingPropertyName(#[source] Option<LexError>),
    /// A property whose value cannot be decoded.
    #[error("object bad value ({0})")]
    BadObjectValue(#[source] LexError),
    /// Something other than a key or `}` inside an object.
    #[error("bad format in object")]
    BadObjectFormat(Option<char>),
    /// An array element that cannot be decoded.
    #[error("bad array value ({0})")]
    BadArrayValue(#[source] LexError),
    /// Containers nested deeper than the parser stack.
    #[error("stack overflow (more than {limit} nested containers)")]
    StackOverflow {
        /// Maximum number of open containers.
        limit: usize,
    },
    /// Text after the document, rejected by
    /// [`ParserOptions::reject_trailing_content`](crate::ParserOptions::reject_trailing_content).
    #[error("trailing content")]
    TrailingContent,
    /// The reader behind a streamed parse failed.
    #[error("read error: {0}")]
    Io(#[source] io::Error),
}

impl ErrorKind {
    /// Classifies the error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorKind::NoValue(e) | ErrorKind::BadObjectValue(e) | ErrorKind::BadArrayValue(e)
                if e.is_lexical() =>
            {
                ErrorCategory::Lexical
            }
            ErrorKind::MissingPropertyName(Some(e)) if e.is_lexical() => ErrorCategory::Lexical,
            ErrorKind::StackOverflow { .. } => ErrorCategory::Resource,
            ErrorKind::TrailingContent => ErrorCategory::TrailingContent,
            ErrorKind::Io(_) => ErrorCategory::Io,
            _ => ErrorCategory::Structural,
        }
    }
}

/// A failed parse, with the position and the surrounding line of input.
///
/// The `Display` form is a single diagnostic line:
///
/// ```text
/// JSON missing comma at 4 [1 2 <ERROR> ]
/// ```
#[derive(Debug, Error)]
#[error("JSON {kind} at {offset} {consumed} <ERROR> {remaining}")]
pub struct ParseError {
    #[source]
    kind: ErrorKind,
    offset: usize,
    consumed: String,
    remaining: String,
}

impl ParseError {
    pub(crate) fn new(kind: ErrorKind, location: &Location<'_>) -> Self {
        Self {
            kind,
            offset: location.offset,
            consumed: location.consumed.to_str_lossy().into_owned(),
            remaining: location.remaining.to_str_lossy().into_owned(),
        }
    }

    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Shorthand for `self.kind().category()`.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Absolute byte offset of the failure in the input.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The part of the failing line before the failure point.
    #[must_use]
    pub fn consumed(&self) -> &str {
        &self.consumed
    }

    /// The part of the failing line from the failure point on.
    #[must_use]
    pub fn remaining(&self) -> &str {
        &self.remaining
    }
}
