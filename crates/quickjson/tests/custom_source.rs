#![allow(missing_docs)]

mod common;

use quickjson::{CharSource, ErrorKind, LexError, Location, ParserOptions, parse_source, parse_str};

use crate::common::CONFIG;

/// A source that only implements the cursor primitives and counts how often
/// the parser backs up.
struct Bytes {
    data: Vec<u8>,
    pos: usize,
    back_ups: usize,
}

impl Bytes {
    fn new(text: &str) -> Self {
        Self {
            data: text.as_bytes().to_vec(),
            pos: 0,
            back_ups: 0,
        }
    }
}

impl CharSource for Bytes {
    fn get_char(&mut self) -> Option<u8> {
        let c = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(c)
    }

    fn peek_char(&mut self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn back_up(&mut self) {
        self.back_ups += 1;
        self.pos -= 1;
    }

    fn is_string_move_on(&mut self, literal: &[u8]) -> bool {
        let matched = self.data[self.pos..].starts_with(literal);
        if matched {
            self.pos += literal.len();
        }
        matched
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn location(&self) -> Location<'_> {
        Location {
            offset: self.pos,
            consumed: &self.data[..self.pos],
            remaining: &self.data[self.pos..],
        }
    }
}

#[test_log::test]
fn default_methods_parse_a_full_document() {
    let mut source = Bytes::new(CONFIG);
    let root = parse_source(&mut source, ParserOptions::default(), 64).unwrap();
    assert_eq!(root, parse_str(CONFIG, ParserOptions::default()).unwrap());
    // One per number without a leading minus.
    assert_eq!(source.back_ups, 9);
}

#[test]
fn text_buffer_size_bounds_strings() {
    let mut source = Bytes::new(r#"{"key": "0123456789"}"#);
    let err = parse_source(&mut source, ParserOptions::default(), 8).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::BadObjectValue(LexError::TokenTooLarge { limit: 8 })
    ));
}

#[test]
fn source_position_after_trailing_check() {
    let options = ParserOptions {
        reject_trailing_content: true,
        ..Default::default()
    };
    let mut source = Bytes::new("[1, 2]   ");
    parse_source(&mut source, options, 16).unwrap();
    assert_eq!(source.position(), 9);
}
