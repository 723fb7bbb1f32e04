//! # serde_edn
//!
//! A codec for EDN (extensible data notation) with a Serde bridge.
//!
//! ## What is EDN?
//!
//! EDN is the data notation of the Clojure family: a richer JSON with
//! keywords, symbols, sets, lists, tagged literals and `#inst` timestamps.
//! Databases such as Crux/XTDB speak it over HTTP.
//!
//! ## Key Features
//!
//! - **Incremental decoding**: [`Decoder`] accepts text in chunks of any size,
//!   split anywhere, and hands back each top-level value once it completes
//! - **List streaming**: [`Decoder::list_stream`] emits the elements of one
//!   huge top-level list one by one
//! - **Faithful values**: [`EdnValue`] keeps keywords, symbols, lists, sets,
//!   duplicate map keys and tags apart
//! - **Serde compatible**: any `#[derive(Serialize, Deserialize)]` type maps
//!   onto EDN, with struct fields written as keywords
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! serde_edn = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Values
//!
//! ```rust
//! use serde_edn::{decode_one, encode, EdnValue};
//!
//! let value = decode_one(r#"{:crux.db/id :ivan, :name "Ivan" :tags #{:a}}"#).unwrap();
//! let map = value.as_map().unwrap();
//!
//! assert_eq!(map.get_keyword("name"), Some(&EdnValue::from("Ivan")));
//! assert_eq!(encode(&value), r#"{:crux.db/id :ivan :name "Ivan" :tags #{:a}}"#);
//! ```
//!
//! ### Rust types
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_edn::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User { id: 123, name: "Alice".to_string(), active: true };
//!
//! let edn = to_string(&user).unwrap();
//! assert_eq!(edn, r#"{:id 123 :name "Alice" :active true}"#);
//!
//! let user_back: User = from_str(&edn).unwrap();
//! assert_eq!(user, user_back);
//! ```
//!
//! ### Chunked input
//!
//! ```rust
//! use serde_edn::{Decoder, EdnValue};
//!
//! let mut decoder = Decoder::new();
//! assert!(decoder.feed("[1 2").unwrap().is_empty());
//! let values = decoder.feed("] :done ").unwrap();
//!
//! assert_eq!(values.len(), 2);
//! assert_eq!(values[1], EdnValue::keyword_unchecked("done"));
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Malformed input is reported through [`Error`], never a panic
//! - Decoding errors carry the line and column where they were detected
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Rust structs to EDN and back
//! - **`streaming.rs`** - chunked decoding and list streaming from a reader
//! - **`dynamic_values.rs`** - building and inspecting [`EdnValue`] trees
//!
//! Run any of them with: `cargo run --example <name>`

pub mod de;
pub mod decoder;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod stream;
pub mod syntax;
pub mod value;

pub use de::ValueDeserializer;
pub use decoder::{decode_one, decode_one_with_options, Decoder};
pub use error::{Error, Result};
pub use map::{EdnMap, EdnSet};
pub use options::{DecodeOptions, KeywordAs, ListAs, MapAs};
pub use ser::{encode, ValueSerializer};
pub use stream::ValueStream;
pub use value::EdnValue;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Serialize any `T: Serialize` to an EDN string.
///
/// # Examples
///
/// ```rust
/// use serde_edn::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// assert_eq!(to_string(&point).unwrap(), "{:x 1 :y 2}");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented in EDN.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(encode(&to_value(value)?))
}

/// Convert any `T: Serialize` to an [`EdnValue`].
///
/// # Examples
///
/// ```rust
/// use serde_edn::{to_value, EdnValue};
///
/// let value = to_value(&vec![Some(1), None]).unwrap();
/// assert_eq!(value, EdnValue::Vector(vec![EdnValue::from(1), EdnValue::Nil]));
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented in EDN.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<EdnValue>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Serialize any `T: Serialize` to a writer as EDN text.
///
/// # Examples
///
/// ```rust
/// use serde_edn::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &("a", 1)).unwrap();
/// assert_eq!(buffer, br#"["a" 1]"#);
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let edn = to_string(value)?;
    writer
        .write_all(edn.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from an [`EdnValue`].
///
/// # Examples
///
/// ```rust
/// use serde_edn::{from_value, EdnValue};
///
/// let value = EdnValue::Vector(vec![EdnValue::from(1), EdnValue::from(2)]);
/// let numbers: Vec<u8> = from_value(value).unwrap();
/// assert_eq!(numbers, vec![1, 2]);
/// ```
///
/// # Errors
///
/// Returns an error if the value does not fit the shape of `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: EdnValue) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

/// Deserialize an instance of type `T` from a string of EDN text.
///
/// Only the first top-level value is read.
///
/// # Examples
///
/// ```rust
/// use serde_edn::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("{:x 1, :y 2}").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid EDN or cannot be deserialized
/// to type `T`. Syntax errors include line and column information.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(decode_one(s)?)
}

/// Like [`from_str`], decoding with custom [`DecodeOptions`] first.
///
/// # Examples
///
/// ```rust
/// use serde_edn::{from_str_with_options, DecodeOptions};
/// use std::collections::HashMap;
///
/// let map: HashMap<String, i32> =
///     from_str_with_options("{:a 1 :a 2}", DecodeOptions::plain()).unwrap();
/// assert_eq!(map["a"], 2);
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid EDN or cannot be deserialized
/// to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: DecodeOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(decode_one_with_options(s, options)?)
}

/// Deserialize an instance of type `T` from an I/O stream of EDN.
///
/// # Examples
///
/// ```rust
/// use serde_edn::from_reader;
/// use std::io::Cursor;
///
/// let cursor = Cursor::new(b"[:a :b]");
/// let names: Vec<String> = from_reader(cursor).unwrap();
/// assert_eq!(names, vec!["a", "b"]);
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails, the input is not valid
/// EDN, or the data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of EDN text.
///
/// # Examples
///
/// ```rust
/// use serde_edn::from_slice;
///
/// let flag: bool = from_slice(b"true").unwrap();
/// assert!(flag);
/// ```
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid EDN, or
/// cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}
