//! Incremental EDN decoding.
//!
//! This module provides the [`Decoder`], a state machine that accepts text
//! in chunks of any size and hands back every top-level value as soon as it
//! is complete. Nesting is tracked on an explicit stack of frames rather than
//! the call stack, so a chunk may end anywhere: inside a token, between a
//! backslash and the character it escapes, or halfway through a deeply nested
//! collection. Feeding the same text in any chunking yields the same values.
//!
//! ## Usage
//!
//! ```rust
//! use serde_edn::{Decoder, EdnValue};
//!
//! let mut decoder = Decoder::new();
//! assert!(decoder.feed("[1 2").unwrap().is_empty());
//!
//! let values = decoder.feed(" 3] :done ").unwrap();
//! assert_eq!(values.len(), 2);
//! assert_eq!(values[0].to_string(), "[1 2 3]");
//!
//! decoder.finish().unwrap();
//! ```
//!
//! [`decode_one`] covers the common case of a complete document held in
//! memory. It runs the same machine, treating the text as the contents of
//! an outer list and returning the first element.

use crate::options::{DecodeOptions, KeywordAs, ListAs, MapAs};
use crate::value::parse_inst;
use crate::{EdnMap, EdnValue, Error, Result};
use num_bigint::BigInt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Idle,
    InString,
    InEscape,
}

/// One open level of nesting.
#[derive(Debug)]
enum Frame {
    Vector(Vec<EdnValue>),
    List(Vec<EdnValue>),
    Set(Vec<EdnValue>),
    Map {
        entries: Vec<(EdnValue, EdnValue)>,
        key: Option<EdnValue>,
    },
    /// `#tag` waiting for the value it applies to.
    Tag(String),
}

impl Frame {
    fn describe(&self) -> &'static str {
        match self {
            Frame::Vector(_) => "vector",
            Frame::List(_) => "list",
            Frame::Set(_) => "set",
            Frame::Map { .. } => "map",
            Frame::Tag(_) => "tagged value",
        }
    }

    fn closer(&self) -> &'static str {
        match self {
            Frame::Vector(_) => "`]`",
            Frame::List(_) => "`)`",
            Frame::Set(_) | Frame::Map { .. } => "`}`",
            Frame::Tag(_) => "a value",
        }
    }
}

enum Token {
    Value(EdnValue),
    Tag(String),
}

#[inline]
fn is_separator(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | ',')
}

/// An incremental EDN decoder.
///
/// Feed it text with [`Decoder::feed`]; each call returns the top-level
/// values completed by that chunk. Call [`Decoder::finish`] once the input
/// is exhausted to flush a trailing bare token and to detect truncated
/// input.
///
/// The decoder does not recover from errors. Once a call has failed, every
/// later call returns the same error.
#[derive(Debug)]
pub struct Decoder {
    options: DecodeOptions,
    mode: Mode,
    token: String,
    stack: Vec<Frame>,
    completed: Vec<EdnValue>,
    line: usize,
    col: usize,
    after_newline: bool,
    list_stream: bool,
    wrapped: bool,
    closed: bool,
    error: Option<Error>,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// Creates a decoder that emits every top-level value.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(DecodeOptions::default())
    }

    #[must_use]
    pub fn with_options(options: DecodeOptions) -> Self {
        Decoder {
            options,
            mode: Mode::Idle,
            token: String::new(),
            stack: Vec::new(),
            completed: Vec::new(),
            line: 1,
            col: 0,
            after_newline: false,
            list_stream: false,
            wrapped: false,
            closed: false,
            error: None,
        }
    }

    /// Creates a decoder for input made of a single top-level list, such as
    /// a transaction log. Each element of that list is emitted as soon as it
    /// completes instead of waiting for the whole list.
    ///
    /// Closing the list ends the stream: separators may follow it, anything
    /// else is an error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_edn::{Decoder, EdnValue};
    ///
    /// let mut decoder = Decoder::list_stream();
    /// assert_eq!(decoder.feed("({:tx 1} {:t").unwrap().len(), 1);
    /// assert_eq!(decoder.feed("x 2})").unwrap().len(), 1);
    /// assert!(decoder.is_closed());
    /// ```
    #[must_use]
    pub fn list_stream() -> Self {
        Self::list_stream_with_options(DecodeOptions::default())
    }

    #[must_use]
    pub fn list_stream_with_options(options: DecodeOptions) -> Self {
        Decoder {
            list_stream: true,
            ..Self::with_options(options)
        }
    }

    /// A list-stream decoder whose outer list is already open and is closed
    /// by [`Decoder::finish`] rather than by the input.
    fn wrapped(options: DecodeOptions) -> Self {
        let mut decoder = Decoder {
            wrapped: true,
            ..Self::list_stream_with_options(options)
        };
        decoder.stack.push(Frame::List(Vec::new()));
        decoder
    }

    /// Returns `true` once a list-stream decoder has seen its list close.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of collections and tags currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Line and column of the last character consumed (both 1-based).
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.col)
    }

    /// Consumes a chunk of text and returns the top-level values it completed.
    ///
    /// # Errors
    ///
    /// Returns an error on unbalanced delimiters, invalid escapes, invalid
    /// `#inst` values or other malformed input. The decoder is unusable
    /// afterwards.
    pub fn feed(&mut self, chunk: &str) -> Result<Vec<EdnValue>> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        for ch in chunk.chars() {
            self.advance_position(ch);
            if let Err(err) = self.step(ch) {
                self.error = Some(err.clone());
                return Err(err);
            }
        }
        Ok(std::mem::take(&mut self.completed))
    }

    /// Signals the end of input.
    ///
    /// A bare token still pending at the top level (for example `42` with no
    /// trailing separator) is completed and returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedEof`] if input stopped inside a string or
    /// before a tag got its value, and [`Error::UnbalancedDelimiter`] if a
    /// collection is still open.
    pub fn finish(mut self) -> Result<Vec<EdnValue>> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        match self.mode {
            Mode::InString => return Err(self.eof("closing `\"`")),
            Mode::InEscape => return Err(self.eof("an escaped character")),
            Mode::Idle => {}
        }
        self.close_token()?;
        if self.wrapped && self.stack.len() == 1 && matches!(self.stack[0], Frame::List(_)) {
            self.stack.pop();
            self.closed = true;
        }
        match self.stack.last() {
            None => Ok(std::mem::take(&mut self.completed)),
            Some(Frame::Tag(tag)) => Err(self.eof(&format!("a value for tag #{}", tag))),
            Some(frame) => Err(self.unbalanced(&format!(
                "unclosed {}, expected {}",
                frame.describe(),
                frame.closer()
            ))),
        }
    }

    fn advance_position(&mut self, ch: char) {
        if self.after_newline {
            self.line += 1;
            self.col = 1;
            self.after_newline = false;
        } else {
            self.col += 1;
        }
        if ch == '\n' {
            self.after_newline = true;
        }
    }

    fn step(&mut self, ch: char) -> Result<()> {
        match self.mode {
            Mode::Idle => self.step_idle(ch),
            Mode::InString => {
                match ch {
                    '\\' => self.mode = Mode::InEscape,
                    '"' => {
                        self.mode = Mode::Idle;
                        let text = std::mem::take(&mut self.token);
                        self.attach(EdnValue::String(text))?;
                    }
                    _ => self.token.push(ch),
                }
                Ok(())
            }
            Mode::InEscape => {
                let unescaped = match ch {
                    't' => '\t',
                    'r' => '\r',
                    'n' => '\n',
                    '\\' => '\\',
                    '"' => '"',
                    other => return Err(Error::invalid_escape(self.line, self.col, other)),
                };
                self.token.push(unescaped);
                self.mode = Mode::InString;
                Ok(())
            }
        }
    }

    fn step_idle(&mut self, ch: char) -> Result<()> {
        if self.closed {
            return match ch {
                c if is_separator(c) => Ok(()),
                ')' | ']' | '}' => Err(self.unbalanced(&format!(
                    "unexpected `{}` after the list was closed",
                    ch
                ))),
                _ => Err(self.syntax("unexpected input after the list was closed")),
            };
        }
        match ch {
            '"' => {
                self.close_token()?;
                if self.list_stream && self.stack.is_empty() {
                    return Err(self.syntax("expected a list at the top level"));
                }
                self.mode = Mode::InString;
                Ok(())
            }
            c if is_separator(c) => self.close_token(),
            ']' | ')' | '}' => self.close_collection(ch),
            '[' => self.open(Frame::Vector(Vec::new())),
            '(' => self.open(Frame::List(Vec::new())),
            '{' if self.token == "#" => {
                self.token.clear();
                self.open(Frame::Set(Vec::new()))
            }
            '{' => self.open(Frame::Map {
                entries: Vec::new(),
                key: None,
            }),
            _ => {
                self.token.push(ch);
                Ok(())
            }
        }
    }

    fn open(&mut self, frame: Frame) -> Result<()> {
        self.close_token()?;
        self.push_frame(frame)
    }

    fn push_frame(&mut self, frame: Frame) -> Result<()> {
        if self.list_stream && self.stack.is_empty() && !matches!(frame, Frame::List(_)) {
            return Err(self.syntax("expected a list at the top level"));
        }
        self.stack.push(frame);
        Ok(())
    }

    /// Classifies the pending bare token, if any, and attaches the result.
    fn close_token(&mut self) -> Result<()> {
        if self.token.is_empty() {
            return Ok(());
        }
        let token = std::mem::take(&mut self.token);
        match self.classify(token)? {
            Token::Value(value) => self.attach(value),
            Token::Tag(tag) => self.push_frame(Frame::Tag(tag)),
        }
    }

    fn classify(&self, token: String) -> Result<Token> {
        let literal = match token.as_str() {
            "nil" => Some(EdnValue::Nil),
            "true" => Some(EdnValue::Bool(true)),
            "false" => Some(EdnValue::Bool(false)),
            "##Inf" => Some(EdnValue::Float(f64::INFINITY)),
            "##-Inf" => Some(EdnValue::Float(f64::NEG_INFINITY)),
            "##NaN" => Some(EdnValue::Float(f64::NAN)),
            _ => None,
        };
        if let Some(value) = literal {
            return Ok(Token::Value(value));
        }
        if let Some(name) = token.strip_prefix(':') {
            let name = name.to_string();
            return Ok(Token::Value(match self.options.keyword_as {
                KeywordAs::Keyword => EdnValue::Keyword(name),
                KeywordAs::String => EdnValue::String(name),
            }));
        }
        if let Some(tag) = token.strip_prefix('#') {
            if tag.is_empty() {
                return Err(self.syntax("`#` must be followed by a tag name"));
            }
            return Ok(Token::Tag(tag.to_string()));
        }
        Ok(Token::Value(classify_atom(token)))
    }

    /// Hands a completed value to the innermost open frame, resolving any
    /// tags waiting for it, or queues it as a finished top-level value.
    fn attach(&mut self, mut value: EdnValue) -> Result<()> {
        loop {
            let depth = self.stack.len();
            let Some(frame) = self.stack.last_mut() else {
                if self.list_stream {
                    return Err(self.syntax("expected a list at the top level"));
                }
                self.completed.push(value);
                return Ok(());
            };
            match frame {
                Frame::Tag(tag) => {
                    let tag = std::mem::take(tag);
                    self.stack.pop();
                    value = self.resolve_tag(tag, value)?;
                }
                Frame::List(_) if self.list_stream && depth == 1 => {
                    self.completed.push(value);
                    return Ok(());
                }
                Frame::Vector(items) | Frame::List(items) | Frame::Set(items) => {
                    items.push(value);
                    return Ok(());
                }
                Frame::Map { entries, key } => {
                    match key.take() {
                        Some(k) => entries.push((k, value)),
                        None => *key = Some(value),
                    }
                    return Ok(());
                }
            }
        }
    }

    fn resolve_tag(&self, tag: String, value: EdnValue) -> Result<EdnValue> {
        if tag != "inst" {
            return Ok(EdnValue::Tagged {
                tag,
                value: Box::new(value),
            });
        }
        match value {
            EdnValue::String(text) => parse_inst(&text).map(EdnValue::Inst).map_err(|reason| {
                Error::invalid_timestamp(self.line, self.col, &format!("{:?}", text), &reason)
            }),
            other => Err(Error::invalid_timestamp(
                self.line,
                self.col,
                &crate::encode(&other),
                "expected a string",
            )),
        }
    }

    fn close_collection(&mut self, closer: char) -> Result<()> {
        self.close_token()?;
        let outermost = self.stack.len() == 1;
        if self.wrapped && outermost {
            return Err(self.unbalanced(&format!(
                "unexpected `{}` with no open collection",
                closer
            )));
        }
        let Some(frame) = self.stack.pop() else {
            return Err(self.unbalanced(&format!(
                "unexpected `{}` with no open collection",
                closer
            )));
        };
        let value = match (closer, frame) {
            (']', Frame::Vector(items)) => EdnValue::Vector(items),
            (')', Frame::List(items)) => {
                if self.list_stream && outermost {
                    self.closed = true;
                    return Ok(());
                }
                match self.options.list_as {
                    ListAs::List => EdnValue::List(items),
                    ListAs::Vector => EdnValue::Vector(items),
                }
            }
            ('}', Frame::Set(items)) => EdnValue::Set(items.into_iter().collect()),
            ('}', Frame::Map { entries, key }) => {
                if key.is_some() {
                    return Err(self.syntax("map literal must contain an even number of forms"));
                }
                let map = EdnMap::from(entries);
                EdnValue::Map(match self.options.map_as {
                    MapAs::Pairs => map,
                    MapAs::Flat => map.into_flat(),
                })
            }
            (_, Frame::Tag(tag)) => {
                return Err(self.syntax(&format!("tag #{} is missing its value", tag)));
            }
            (found, open) => {
                return Err(self.unbalanced(&format!(
                    "expected {} to close the {} but found `{}`",
                    open.closer(),
                    open.describe(),
                    found
                )));
            }
        };
        self.attach(value)
    }

    fn syntax(&self, msg: &str) -> Error {
        Error::syntax(self.line, self.col, msg)
    }

    fn unbalanced(&self, msg: &str) -> Error {
        Error::unbalanced(self.line, self.col, msg)
    }

    fn eof(&self, expected: &str) -> Error {
        Error::unexpected_eof(self.line, self.col, expected)
    }
}

/// Numbers and symbols: everything a bare token can be once the literal,
/// keyword and tag forms are ruled out.
fn classify_atom(token: String) -> EdnValue {
    if is_integer_literal(&token) {
        return match token.parse::<i64>() {
            Ok(i) => EdnValue::Integer(i),
            Err(_) => match parse_bigint(&token) {
                Some(big) => EdnValue::BigInt(big),
                None => EdnValue::Symbol(token),
            },
        };
    }
    if let Some(digits) = token.strip_suffix('N') {
        if is_integer_literal(digits) {
            if let Some(big) = parse_bigint(digits) {
                return EdnValue::BigInt(big);
            }
        }
    }
    if is_float_literal(&token) {
        // The `M` suffix is accepted but read as an ordinary double.
        let text = token.strip_suffix('M').unwrap_or(&token);
        if let Ok(f) = text.parse::<f64>() {
            return EdnValue::Float(f);
        }
    }
    EdnValue::Symbol(token)
}

fn parse_bigint(digits: &str) -> Option<BigInt> {
    digits.strip_prefix('+').unwrap_or(digits).parse().ok()
}

fn strip_sign(s: &str) -> &str {
    s.strip_prefix(&['+', '-'][..]).unwrap_or(s)
}

/// Consumes `0|[1-9][0-9]*` from the front of `s` and returns the rest.
fn unsigned_int(s: &str) -> Option<&str> {
    match s.as_bytes().first()? {
        b'0' => Some(&s[1..]),
        b'1'..=b'9' => {
            let len = s.bytes().take_while(u8::is_ascii_digit).count();
            Some(&s[len..])
        }
        _ => None,
    }
}

/// `[+-]?(0|[1-9][0-9]*)`
fn is_integer_literal(s: &str) -> bool {
    unsigned_int(strip_sign(s)) == Some("")
}

/// `[+-]?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?(0|[1-9][0-9]*))?M?`
fn is_float_literal(s: &str) -> bool {
    let Some(mut rest) = unsigned_int(strip_sign(s)) else {
        return false;
    };
    if let Some(fraction) = rest.strip_prefix('.') {
        let digits = fraction.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return false;
        }
        rest = &fraction[digits..];
    }
    if let Some(exponent) = rest.strip_prefix(&['e', 'E'][..]) {
        match unsigned_int(strip_sign(exponent)) {
            Some(after) => rest = after,
            None => return false,
        }
    }
    rest.is_empty() || rest == "M"
}

/// Decodes a complete document and returns its first top-level value.
///
/// The text is read as the contents of an outer list. Values after the
/// first are still decoded (and can still fail) but are discarded; use a
/// [`Decoder`] to read every value of a multi-value document.
///
/// # Errors
///
/// Returns [`Error::EmptyDocument`] if the text holds no value, and any
/// decode error the text triggers, including a `)` that has no matching `(`.
///
/// # Examples
///
/// ```rust
/// use serde_edn::{decode_one, EdnValue};
///
/// assert_eq!(decode_one("nil").unwrap(), EdnValue::Nil);
/// assert_eq!(decode_one("1 2").unwrap(), EdnValue::from(1));
/// assert!(decode_one("").is_err());
/// ```
pub fn decode_one(text: &str) -> Result<EdnValue> {
    decode_one_with_options(text, DecodeOptions::default())
}

/// [`decode_one`] with custom [`DecodeOptions`].
///
/// # Errors
///
/// See [`decode_one`].
pub fn decode_one_with_options(text: &str, options: DecodeOptions) -> Result<EdnValue> {
    let mut decoder = Decoder::wrapped(options);
    let mut values = decoder.feed(text)?;
    values.extend(decoder.finish()?);
    values.into_iter().next().ok_or(Error::EmptyDocument)
}
