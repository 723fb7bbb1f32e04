//! Pull-based decoding from an [`io::Read`] source.
//!
//! [`ValueStream`] reads the source in fixed-size chunks, feeds them to a
//! [`Decoder`] and yields every completed value as an iterator item. A UTF-8
//! sequence cut in half by a read is carried over to the next one.
//!
//! ```rust
//! use serde_edn::{EdnValue, ValueStream};
//!
//! let log = &b"({:tx-id 1} {:tx-id 2})"[..];
//! let ids: Vec<i64> = ValueStream::list(log)
//!     .map(|tx| tx.unwrap().as_map().unwrap().get_keyword("tx-id").unwrap().as_i64().unwrap())
//!     .collect();
//!
//! assert_eq!(ids, vec![1, 2]);
//! ```

use crate::{DecodeOptions, Decoder, EdnValue, Error, Result};
use std::collections::VecDeque;
use std::io;

const CHUNK_SIZE: usize = 8 * 1024;

/// Iterator over the values decoded from a reader.
///
/// The first error ends the stream: it is yielded once and then the iterator
/// returns `None`.
pub struct ValueStream<R> {
    reader: R,
    decoder: Option<Decoder>,
    pending: VecDeque<EdnValue>,
    carry: Vec<u8>,
    buf: Vec<u8>,
    done: bool,
}

impl<R: io::Read> ValueStream<R> {
    /// Yields every top-level value in the input.
    pub fn new(reader: R) -> Self {
        Self::with_decoder(reader, Decoder::new())
    }

    /// Yields the elements of a single top-level list one by one.
    pub fn list(reader: R) -> Self {
        Self::with_decoder(reader, Decoder::list_stream())
    }

    /// Yields every top-level value, decoded with custom options.
    pub fn with_options(reader: R, options: DecodeOptions) -> Self {
        Self::with_decoder(reader, Decoder::with_options(options))
    }

    /// Drives a preconfigured decoder, e.g. one built with
    /// [`Decoder::list_stream_with_options`].
    pub fn with_decoder(reader: R, decoder: Decoder) -> Self {
        ValueStream {
            reader,
            decoder: Some(decoder),
            pending: VecDeque::new(),
            carry: Vec::new(),
            buf: vec![0; CHUNK_SIZE],
            done: false,
        }
    }

    /// Returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn fill(&mut self) -> Result<()> {
        let n = loop {
            match self.reader.read(&mut self.buf) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::io(&e.to_string())),
            }
        };

        if n == 0 {
            self.done = true;
            if !self.carry.is_empty() {
                return Err(Error::io("stream ended inside a UTF-8 sequence"));
            }
            if let Some(decoder) = self.decoder.take() {
                self.pending.extend(decoder.finish()?);
            }
            return Ok(());
        }

        self.carry.extend_from_slice(&self.buf[..n]);
        let valid = match std::str::from_utf8(&self.carry) {
            Ok(_) => self.carry.len(),
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(e) => return Err(Error::io(&e.to_string())),
        };
        let text = std::str::from_utf8(&self.carry[..valid])
            .map_err(|e| Error::io(&e.to_string()))?;
        if let Some(decoder) = self.decoder.as_mut() {
            self.pending.extend(decoder.feed(text)?);
        }
        self.carry.drain(..valid);
        Ok(())
    }
}

impl<R: io::Read> Iterator for ValueStream<R> {
    type Item = Result<EdnValue>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(value) = self.pending.pop_front() {
                return Some(Ok(value));
            }
            if self.done {
                return None;
            }
            if let Err(err) = self.fill() {
                self.done = true;
                self.decoder = None;
                self.pending.clear();
                return Some(Err(err));
            }
        }
    }
}
