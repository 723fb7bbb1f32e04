//! Configuration options for EDN decoding.
//!
//! The encoder always writes canonical text, so options only shape what the
//! decoder builds:
//!
//! - [`MapAs`]: keep map literals as ordered pair lists or collapse duplicate keys
//! - [`KeywordAs`]: keep keywords or read them as plain strings
//! - [`ListAs`]: keep lists or read them as vectors
//!
//! ## Examples
//!
//! ```rust
//! use serde_edn::{decode_one_with_options, DecodeOptions, EdnValue, KeywordAs, ListAs};
//!
//! let options = DecodeOptions::new()
//!     .with_keyword_as(KeywordAs::String)
//!     .with_list_as(ListAs::Vector);
//!
//! let value = decode_one_with_options("(:a :b)", options).unwrap();
//! assert_eq!(value, EdnValue::Vector(vec![EdnValue::from("a"), EdnValue::from("b")]));
//! ```

/// How map literals are built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MapAs {
    /// Keep every pair in source order, duplicate keys included.
    #[default]
    Pairs,
    /// Collapse duplicate keys; a later value overwrites an earlier one.
    Flat,
}

/// How keywords are built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeywordAs {
    #[default]
    Keyword,
    /// `:name` decodes to the string `"name"`.
    String,
}

/// How `( … )` lists are built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ListAs {
    #[default]
    List,
    Vector,
}

/// Configuration options for the decoder.
///
/// # Examples
///
/// ```rust
/// use serde_edn::{DecodeOptions, MapAs};
///
/// let options = DecodeOptions::new().with_map_as(MapAs::Flat);
/// assert_eq!(options.map_as, MapAs::Flat);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    pub map_as: MapAs,
    pub keyword_as: KeywordAs,
    pub list_as: ListAs,
}

impl DecodeOptions {
    /// Creates default options: pair-list maps, keywords and lists kept as-is.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options suited to turning documents into plain records: flat maps,
    /// string keywords and vector lists.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_edn::{DecodeOptions, KeywordAs, ListAs, MapAs};
    ///
    /// let options = DecodeOptions::plain();
    /// assert_eq!(options.map_as, MapAs::Flat);
    /// assert_eq!(options.keyword_as, KeywordAs::String);
    /// assert_eq!(options.list_as, ListAs::Vector);
    /// ```
    #[must_use]
    pub fn plain() -> Self {
        DecodeOptions {
            map_as: MapAs::Flat,
            keyword_as: KeywordAs::String,
            list_as: ListAs::Vector,
        }
    }

    #[must_use]
    pub fn with_map_as(mut self, map_as: MapAs) -> Self {
        self.map_as = map_as;
        self
    }

    #[must_use]
    pub fn with_keyword_as(mut self, keyword_as: KeywordAs) -> Self {
        self.keyword_as = keyword_as;
        self
    }

    #[must_use]
    pub fn with_list_as(mut self, list_as: ListAs) -> Self {
        self.list_as = list_as;
        self
    }
}
