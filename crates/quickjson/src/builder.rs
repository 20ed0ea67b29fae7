//! The explicit-stack tree builder.
//!
//! Containers under construction live in a bounded stack of [`Frame`]s rather
//! than on the call stack, so nesting depth is limited by [`MAX_DEPTH`] and
//! never by the host thread. The innermost open container is held outside the
//! stack as `current`; its parents are on the stack, and an empty stack means
//! `current` is the root.

use core::mem;

use log::{debug, trace};

use crate::{
    decoder::{Decoded, decode_value},
    error::{ErrorKind, LexError, ParseError},
    options::ParserOptions,
    source::CharSource,
    text_buffer::TextBuffer,
    value::{Array, Map, Token, Value},
};

/// Maximum number of containers open at the same time.
pub const MAX_DEPTH: usize = 256;

/// Which loop handles the current container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    InObject,
    InArray,
}

enum Flow {
    /// The current container changed kind; dispatch again.
    Switch,
    /// The root closed.
    Done,
}

/// An open container.
#[derive(Debug)]
struct Frame {
    name: Option<String>,
    body: Body,
}

#[derive(Debug)]
enum Body {
    Object(Map),
    Array(Array),
}

impl Frame {
    /// Opens a frame for a container token, or hands a scalar back.
    fn open(token: Token) -> Result<Frame, Token> {
        let (name, value) = token.into_parts();
        match value {
            Value::Object(map) => Ok(Frame {
                name,
                body: Body::Object(map),
            }),
            Value::Array(items) => Ok(Frame {
                name,
                body: Body::Array(items),
            }),
            scalar => Err(Token::from_parts(name, scalar)),
        }
    }

    fn state(&self) -> State {
        match self.body {
            Body::Object(_) => State::InObject,
            Body::Array(_) => State::InArray,
        }
    }

    fn is_empty(&self) -> bool {
        match &self.body {
            Body::Object(map) => map.is_empty(),
            Body::Array(items) => items.is_empty(),
        }
    }

    /// Adds a finished child. Object children are stored under their name; a
    /// repeated key replaces the earlier value in its first position.
    fn attach(&mut self, child: Token) {
        match &mut self.body {
            Body::Object(map) => {
                let key = child.name().unwrap_or_default().to_owned();
                map.insert(key, child);
            }
            Body::Array(items) => items.push(child),
        }
    }

    fn into_token(self) -> Token {
        let value = match self.body {
            Body::Object(map) => Value::Object(map),
            Body::Array(items) => Value::Array(items),
        };
        Token::from_parts(self.name, value)
    }
}

pub(crate) struct TreeBuilder<'s, S: ?Sized> {
    source: &'s mut S,
    text: TextBuffer,
    options: ParserOptions,
    /// Parents of the current container, outermost first.
    stack: Vec<Frame>,
    /// Whether a comma was consumed after the last child of the current
    /// container.
    comma: bool,
}

impl<'s, S: CharSource + ?Sized> TreeBuilder<'s, S> {
    pub fn new(source: &'s mut S, options: ParserOptions, text_buffer_size: usize) -> Self {
        Self {
            source,
            text: TextBuffer::with_limit(text_buffer_size),
            options,
            stack: Vec::new(),
            comma: false,
        }
    }

    /// Parses one document.
    pub fn build(mut self) -> Result<Token, ParseError> {
        let mut result = self.run();
        if result.is_ok() && self.options.reject_trailing_content && !self.source.is_eol() {
            result = Err(self.fail(ErrorKind::TrailingContent));
        }
        if let Err(err) = &result {
            debug!("{err}");
        }
        result
    }

    fn run(&mut self) -> Result<Token, ParseError> {
        self.source.skip_space();
        let root = match decode_value(&mut *self.source, &mut self.text, false) {
            Ok(Decoded::Value(token)) => token,
            Ok(Decoded::EndOfArray) => {
                return Err(self.fail(ErrorKind::NoValue(LexError::UnexpectedEndOfArray)));
            }
            Err(e) => return Err(self.fail(ErrorKind::NoValue(e))),
        };
        let mut current = match Frame::open(root) {
            Ok(frame) => frame,
            Err(scalar) => return Ok(scalar),
        };
        trace!("open root {:?}", current.state());

        loop {
            let flow = match current.state() {
                State::InObject => self.object_loop(&mut current)?,
                State::InArray => self.array_loop(&mut current)?,
            };
            if let Flow::Done = flow {
                return Ok(current.into_token());
            }
        }
    }

    fn object_loop(&mut self, current: &mut Frame) -> Result<Flow, ParseError> {
        loop {
            match self.source.get_char() {
                Some(b'}') => {
                    self.source.skip_space();
                    if !self.close(current)? {
                        return Ok(Flow::Done);
                    }
                    if current.state() != State::InObject {
                        return Ok(Flow::Switch);
                    }
                }
                Some(b'"') => {
                    let key = self.property_name(current)?;
                    let mut token = match decode_value(&mut *self.source, &mut self.text, false) {
                        Ok(Decoded::Value(token)) => token,
                        Ok(Decoded::EndOfArray) => {
                            return Err(self.fail(ErrorKind::BadObjectValue(
                                LexError::UnexpectedEndOfArray,
                            )));
                        }
                        Err(e) => return Err(self.fail(ErrorKind::BadObjectValue(e))),
                    };
                    token.set_name(key);
                    if self.add_child(current, token)? != State::InObject {
                        return Ok(Flow::Switch);
                    }
                }
                other => {
                    return Err(self.fail(ErrorKind::BadObjectFormat(other.map(char::from))));
                }
            }
        }
    }

    /// Reads a key whose opening quote was consumed, and the `:` after it.
    /// An empty key counts as a missing name.
    fn property_name(&mut self, current: &Frame) -> Result<String, ParseError> {
        let key = self
            .source
            .next_quoted_string(b'"', &mut self.text, true)
            .and_then(|_| self.text.as_str().map(str::to_owned));
        let key = match key {
            Ok(key) => key,
            Err(e) => return Err(self.fail(ErrorKind::MissingPropertyName(Some(e)))),
        };
        if key.is_empty()
            || (!self.comma && !current.is_empty())
            || !self.source.is_char_move_on(b':')
        {
            return Err(self.fail(ErrorKind::MissingPropertyName(None)));
        }
        Ok(key)
    }

    fn array_loop(&mut self, current: &mut Frame) -> Result<Flow, ParseError> {
        loop {
            let token = match decode_value(&mut *self.source, &mut self.text, true) {
                Ok(Decoded::Value(token)) => token,
                Ok(Decoded::EndOfArray) => {
                    if !self.close(current)? {
                        return Ok(Flow::Done);
                    }
                    if current.state() != State::InArray {
                        return Ok(Flow::Switch);
                    }
                    continue;
                }
                Err(e) => return Err(self.fail(ErrorKind::BadArrayValue(e))),
            };
            if !self.comma && !current.is_empty() {
                return Err(self.fail(ErrorKind::MissingComma));
            }
            if self.add_child(current, token)? != State::InArray {
                return Ok(Flow::Switch);
            }
        }
    }

    /// Attaches a scalar to `current`, or makes a container the new
    /// `current`. Returns the state that now applies.
    fn add_child(&mut self, current: &mut Frame, token: Token) -> Result<State, ParseError> {
        match Frame::open(token) {
            Ok(child) => {
                if self.stack.len() + 1 >= MAX_DEPTH {
                    return Err(self.fail(ErrorKind::StackOverflow { limit: MAX_DEPTH }));
                }
                let parent = mem::replace(current, child);
                self.stack.push(parent);
                self.comma = false;
                trace!("open {:?} at depth {}", current.state(), self.stack.len());
            }
            Err(scalar) => {
                current.attach(scalar);
                self.comma = self.source.is_char_move_on(b',');
            }
        }
        Ok(current.state())
    }

    /// Closes `current` and makes its parent current again. Returns `false`
    /// when `current` is the root, which is then complete.
    fn close(&mut self, current: &mut Frame) -> Result<bool, ParseError> {
        if self.comma && !self.options.allow_trailing_commas {
            return Err(self.fail(ErrorKind::TrailingComma));
        }
        let Some(parent) = self.stack.pop() else {
            trace!("close root");
            return Ok(false);
        };
        let child = mem::replace(current, parent);
        current.attach(child.into_token());
        self.comma = self.source.is_char_move_on(b',');
        trace!("close to depth {}", self.stack.len());
        Ok(true)
    }

    fn fail(&self, kind: ErrorKind) -> ParseError {
        ParseError::new(kind, &self.source.location())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StrSource;

    fn build(text: &str, options: ParserOptions) -> Result<Token, ParseError> {
        let mut source = StrSource::new(text);
        TreeBuilder::new(&mut source, options, text.len()).build()
    }

    #[test]
    fn frame_round_trip_keeps_name() {
        let token = Token::named("k", Value::Array(vec![Token::new(Value::Null)]));
        let frame = Frame::open(token.clone()).unwrap();
        assert_eq!(frame.state(), State::InArray);
        assert_eq!(frame.into_token(), token);
    }

    #[test]
    fn scalar_is_handed_back() {
        let token = Token::named("k", Value::Boolean(true));
        assert_eq!(Frame::open(token.clone()).unwrap_err(), token);
    }

    #[test]
    fn duplicate_key_replaces_in_place() {
        let root = build(r#"{"a":1,"b":2,"a":3}"#, ParserOptions::default()).unwrap();
        let keys: Vec<_> = root.value().as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(root.get("a").unwrap().value(), &Value::Integer(3));
    }

    #[test]
    fn empty_key_is_a_missing_name() {
        for text in [r#"{"":1}"#, r#"{"a":1,"":2}"#, r#"[{"":{}}]"#] {
            let err = build(text, ParserOptions::default()).unwrap_err();
            assert!(
                matches!(err.kind(), ErrorKind::MissingPropertyName(None)),
                "{text}: {err}"
            );
        }
    }

    #[test]
    fn close_switches_back_to_parent_kind() {
        let root = build(r#"[{"a":[{}]}, 1]"#, ParserOptions::default()).unwrap();
        assert_eq!(root.to_string(), r#"[{"a":[{}]},1]"#);
    }

    #[test]
    fn depth_limit() {
        let ok = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(build(&ok, ParserOptions::default()).is_ok());

        let deep = format!("{}{}", "[".repeat(MAX_DEPTH + 1), "]".repeat(MAX_DEPTH + 1));
        let err = build(&deep, ParserOptions::default()).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::StackOverflow { limit: MAX_DEPTH }
        ));
    }
}
