//! A single-pass JSON parser that builds a typed token tree.
//!
//! Parsing is iterative: open containers live on an explicit stack bounded by
//! [`MAX_DEPTH`], so hostile nesting fails with
//! [`ErrorKind::StackOverflow`] instead of exhausting the thread stack.
//! Numbers keep their exact representation: `i64` when they fit, then `u64`,
//! then [`BigInt`]; anything with a fraction or exponent is an `f64`.
//!
//! ```
//! use quickjson::{ParserOptions, TokenKind, Value};
//!
//! let root = quickjson::parse_str(r#"{"a": [1, 2, {"b": 3}]}"#, ParserOptions::default())?;
//! let b = root.get("a").and_then(|a| a.index(2)).and_then(|o| o.get("b")).unwrap();
//! assert_eq!(b.value(), &Value::Integer(3));
//! assert_eq!(root.kind(), TokenKind::Object);
//! # Ok::<(), quickjson::ParseError>(())
//! ```
//!
//! Input can also be streamed from any [`std::io::Read`] with
//! [`parse_reader`], or supplied through a custom [`CharSource`] with
//! [`parse_source`].

mod builder;
mod decoder;
mod error;
mod escape_buffer;
mod number;
mod options;
mod source;
mod text_buffer;
mod value;


use std::io::Read;

pub use builder::MAX_DEPTH;
pub use error::{ErrorCategory, ErrorKind, LexError, ParseError};
pub use num_bigint::BigInt;
pub use options::ParserOptions;
pub use source::{CharSource, Location, ReaderSource, StrSource};
pub use text_buffer::TextBuffer;
pub use value::{Array, Map, Token, TokenKind, Value};

use crate::builder::TreeBuilder;

/// Default block size for [`parse_reader`].
pub const DEFAULT_CHUNK_SIZE: usize = 16 * 1024;

/// Default limit on a single string or number for [`parse_reader`].
pub const DEFAULT_MAX_TOKEN_SIZE: usize = 16 * 1024;

/// Parses `text`, returning `None` if it is not valid JSON.
///
/// The reason for a failure is logged at `debug` level; use [`parse_str`] to
/// get it as a value.
#[must_use]
pub fn parse(text: &str, options: ParserOptions) -> Option<Token> {
    parse_str(text, options).ok()
}

/// Parses `text`.
///
/// # Errors
///
/// A [`ParseError`] describing the first problem found. No partial tree is
/// returned.
pub fn parse_str(text: &str, options: ParserOptions) -> Result<Token, ParseError> {
    let mut source = StrSource::new(text);
    parse_source(&mut source, options, text.len())
}

/// Parses JSON read from `reader` in blocks of `chunk_size` bytes.
///
/// Strings and numbers longer than `max_token_size` bytes are rejected with
/// [`LexError::TokenTooLarge`]. With `reject_trailing_content` unset, reading
/// stops at the first non-whitespace byte after the top-level value.
///
/// # Errors
///
/// A [`ParseError`] describing the first problem found. A failed read is
/// reported as [`ErrorKind::Io`], whatever the parser made of the truncated
/// input.
pub fn parse_reader<R: Read>(
    reader: R,
    options: ParserOptions,
    chunk_size: usize,
    max_token_size: usize,
) -> Result<Token, ParseError> {
    let mut source = ReaderSource::new(reader, chunk_size);
    let result = parse_source(&mut source, options, max_token_size);
    match source.take_error() {
        Some(e) => Err(ParseError::new(ErrorKind::Io(e), &source.location())),
        None => result,
    }
}

/// Parses JSON from a caller-supplied source, with a text buffer holding at
/// most `text_buffer_size` bytes per string or number.
///
/// # Errors
///
/// A [`ParseError`] describing the first problem found.
pub fn parse_source<S: CharSource + ?Sized>(
    source: &mut S,
    options: ParserOptions,
    text_buffer_size: usize,
) -> Result<Token, ParseError> {
    TreeBuilder::new(source, options, text_buffer_size).build()
}
