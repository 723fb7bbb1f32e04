/// Builds an [`EdnValue`](crate::EdnValue) from EDN-like syntax.
///
/// Collection members are single token trees separated by commas. Anything
/// that spans several tokens (keywords, sets, tags, negative numbers, Rust
/// expressions) goes in parentheses when it sits inside a collection.
///
/// ```rust
/// use serde_edn::{edn, encode};
///
/// let doc = edn!({
///     (:"crux.db/id") => (:ivan),
///     (:name) => "Ivan",
///     (:tags) => (#{(:a), (:b)}),
///     (:history) => (list 1, 2, (-3)),
///     (:born) => (#"my/date" "1986")
/// });
///
/// assert_eq!(
///     encode(&doc),
///     r#"{:crux.db/id :ivan :name "Ivan" :tags #{:a :b} :history (1 2 -3) :born #my/date "1986"}"#
/// );
/// ```
#[macro_export]
macro_rules! edn {
    (nil) => {
        $crate::EdnValue::Nil
    };

    (true) => {
        $crate::EdnValue::Bool(true)
    };

    (false) => {
        $crate::EdnValue::Bool(false)
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::EdnValue::Vector(vec![$($crate::edn!($elem)),*])
    };

    (list $($elem:tt),* $(,)?) => {
        $crate::EdnValue::List(vec![$($crate::edn!($elem)),*])
    };

    (# { $($elem:tt),* $(,)? }) => {{
        let members: Vec<$crate::EdnValue> = vec![$($crate::edn!($elem)),*];
        $crate::EdnValue::Set(members.into_iter().collect::<$crate::EdnSet>())
    }};

    (# $tag:literal $value:tt) => {
        $crate::EdnValue::Tagged {
            tag: $tag.to_string(),
            value: Box::new($crate::edn!($value)),
        }
    };

    ({ $($key:tt => $value:tt),* $(,)? }) => {{
        #[allow(unused_mut)]
        let mut map = $crate::EdnMap::new();
        $(
            map.insert($crate::edn!($key), $crate::edn!($value));
        )*
        $crate::EdnValue::Map(map)
    }};

    (: $name:ident) => {
        $crate::EdnValue::keyword_unchecked(stringify!($name))
    };

    (: $name:literal) => {
        $crate::EdnValue::keyword_unchecked($name)
    };

    // A parenthesized member of a collection.
    (( $($inner:tt)+ )) => {
        $crate::edn!($($inner)+)
    };

    ($e:expr) => {
        $crate::EdnValue::from($e)
    };
}
