use super::Number;
use std::collections::BTreeMap;
use std::fmt;

/// An untrusted, loosely-typed value.
///
/// `Raw` is the input side of every decoder: the shape of data as it arrives from an external
/// source, before any validation has happened. It mirrors what deserializing a payload produces
/// (null, booleans, numbers, strings, sequences, keyed maps) plus an explicit [`Absent`] marker
/// for a value that was not present at all — the stand-in a decoder receives when an object key
/// is missing.
///
/// Keyed values are backed by [`BTreeMap`] so iteration and display are deterministic.
///
/// # Examples
/// Constructing `Raw` values is done through the `From` conversions.
/// ```rust
/// # use rawdec::*;
/// let raw = Raw::from(vec![1, 2, 3]);
/// assert_eq!(raw.seq().map(|s| s.len()), Some(3));
///
/// let raw = Raw::from("Hello, world!");
/// assert_eq!(raw.str(), Some("Hello, world!"));
/// ```
///
/// With the _json_ feature, a `Raw` deserializes straight out of a payload.
/// ```rust
/// # use rawdec::*;
/// # #[cfg(feature = "json")] {
/// let raw = Raw::from_json_str(r#"{ "active": true, "score": 9.5 }"#).unwrap();
/// let map = raw.map().unwrap();
/// assert_eq!(map["active"], Raw::from(true));
/// assert_eq!(map["score"], Raw::from(9.5));
/// # }
/// ```
///
/// [`Absent`]: Raw::Absent
/// [`BTreeMap`]: std::collections::BTreeMap
#[derive(Debug, Clone, PartialEq)]
pub enum Raw {
    /// No value was present. Distinct from an explicit [`Null`].
    ///
    /// [`Null`]: Raw::Null
    Absent,
    /// An explicit null.
    Null,
    /// A boolean value.
    Bool(bool),
    /// A numerical value. See [`Number`].
    ///
    /// [`Number`]: crate::Number
    Num(Number),
    /// A string value.
    Str(String),
    /// A sequence of values.
    Seq(Vec<Raw>),
    /// A keyed structure.
    Map(BTreeMap<String, Raw>),
}

impl Raw {
    /// Is the value the absent marker?
    pub fn is_absent(&self) -> bool {
        matches!(self, Raw::Absent)
    }

    /// Is the value an explicit null?
    pub fn is_null(&self) -> bool {
        matches!(self, Raw::Null)
    }

    /// The boolean, if the value is one.
    pub fn bool(&self) -> Option<bool> {
        match self {
            Raw::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The number, if the value is one.
    pub fn num(&self) -> Option<Number> {
        match self {
            Raw::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// The string, if the value is one.
    ///
    /// # Example
    /// ```rust
    /// # use rawdec::*;
    /// let raw = Raw::from("Hi");
    /// assert_eq!(raw.str(), Some("Hi"));
    /// assert_eq!(Raw::from(3.14).str(), None);
    /// ```
    pub fn str(&self) -> Option<&str> {
        match self {
            Raw::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The sequence, if the value is one.
    pub fn seq(&self) -> Option<&[Raw]> {
        match self {
            Raw::Seq(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// The keyed structure, if the value is one.
    pub fn map(&self) -> Option<&BTreeMap<String, Raw>> {
        match self {
            Raw::Map(m) => Some(m),
            _ => None,
        }
    }
}

/// The rendering quoted by decoder error messages.
///
/// Primitives render bare (no quotes around strings), `Absent` renders as `absent`, `Null` as
/// `null`, sequences as `[a, b]`, and maps as `{k: v}` in key order.
///
/// # Example
/// ```rust
/// # use rawdec::*;
/// let raw = Raw::from(vec![Raw::from(1), Raw::from("two")]);
/// assert_eq!(raw.to_string(), "[1, two]");
/// ```
impl fmt::Display for Raw {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Raw::Absent => write!(f, "absent"),
            Raw::Null => write!(f, "null"),
            Raw::Bool(b) => write!(f, "{}", b),
            Raw::Num(n) => write!(f, "{}", n),
            Raw::Str(s) => write!(f, "{}", s),
            Raw::Seq(v) => {
                write!(f, "[")?;
                for (i, x) in v.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", x)?;
                }
                write!(f, "]")
            }
            Raw::Map(m) => {
                write!(f, "{{")?;
                for (i, (k, x)) in m.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, x)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for Raw {
    fn from(b: bool) -> Self {
        Raw::Bool(b)
    }
}

impl From<Number> for Raw {
    fn from(n: Number) -> Self {
        Raw::Num(n)
    }
}

macro_rules! fr_num {
	( $( $t:ty ),* ) => {
		$(
			impl From<$t> for Raw {
				fn from(x: $t) -> Self {
					Raw::Num(Number::from(x))
				}
			}
		)*
	};
}

fr_num!(usize, u8, u16, u32, u64);
fr_num!(isize, i8, i16, i32, i64);
fr_num!(f32, f64);

impl From<&str> for Raw {
    fn from(s: &str) -> Self {
        Raw::Str(s.to_string())
    }
}

impl From<String> for Raw {
    fn from(s: String) -> Self {
        Raw::Str(s)
    }
}

impl<T: Into<Raw>> From<Vec<T>> for Raw {
    fn from(v: Vec<T>) -> Self {
        Raw::Seq(v.into_iter().map(Into::into).collect())
    }
}

/// `None` converts to an explicit [`Raw::Null`].
impl<T: Into<Raw>> From<Option<T>> for Raw {
    fn from(o: Option<T>) -> Self {
        match o {
            Some(x) => x.into(),
            None => Raw::Null,
        }
    }
}

impl From<BTreeMap<String, Raw>> for Raw {
    fn from(m: BTreeMap<String, Raw>) -> Self {
        Raw::Map(m)
    }
}

#[cfg(feature = "json")]
mod json {
    use super::*;
    use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

    impl Raw {
        /// Deserialize a `Raw` out of a JSON document.
        ///
        /// Requires the _json_ feature.
        ///
        /// Malformed JSON is a transport failure, not a decode failure: it surfaces as the
        /// [`serde_json::Error`] and never touches a decoder's error policy.
        ///
        /// # Example
        /// ```rust
        /// # use rawdec::*;
        /// let raw = Raw::from_json_str("[1, null]").unwrap();
        /// assert_eq!(raw, Raw::Seq(vec![Raw::from(1), Raw::Null]));
        /// ```
        pub fn from_json_str(s: &str) -> Result<Raw, serde_json::Error> {
            serde_json::from_str(s)
        }
    }

    impl<'de> Deserialize<'de> for Raw {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            d.deserialize_any(RawVisitor)
        }
    }

    struct RawVisitor;

    impl<'de> Visitor<'de> for RawVisitor {
        type Value = Raw;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "any deserializable value")
        }

        fn visit_bool<E>(self, v: bool) -> Result<Raw, E> {
            Ok(Raw::Bool(v))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Raw, E> {
            Ok(Raw::Num(Number::Uint(v)))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Raw, E> {
            Ok(Raw::Num(Number::Int(v)))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Raw, E> {
            Ok(Raw::Num(Number::Float(v)))
        }

        fn visit_str<E>(self, v: &str) -> Result<Raw, E> {
            Ok(Raw::Str(v.to_string()))
        }

        fn visit_string<E>(self, v: String) -> Result<Raw, E> {
            Ok(Raw::Str(v))
        }

        fn visit_unit<E>(self) -> Result<Raw, E> {
            Ok(Raw::Null)
        }

        fn visit_none<E>(self) -> Result<Raw, E> {
            Ok(Raw::Null)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Raw, D::Error> {
            d.deserialize_any(RawVisitor)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Raw, A::Error> {
            let mut v = Vec::new();
            while let Some(x) = seq.next_element()? {
                v.push(x);
            }
            Ok(Raw::Seq(v))
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Raw, A::Error> {
            let mut m = BTreeMap::new();
            while let Some((k, x)) = map.next_entry::<String, Raw>()? {
                m.insert(k, x);
            }
            Ok(Raw::Map(m))
        }
    }

    impl From<serde_json::Value> for Raw {
        fn from(v: serde_json::Value) -> Self {
            use serde_json::Value;
            match v {
                Value::Null => Raw::Null,
                Value::Bool(b) => Raw::Bool(b),
                Value::Number(n) => {
                    if let Some(u) = n.as_u64() {
                        Raw::Num(Number::Uint(u))
                    } else if let Some(i) = n.as_i64() {
                        Raw::Num(Number::Int(i))
                    } else {
                        Raw::Num(Number::Float(n.as_f64().unwrap_or(f64::NAN)))
                    }
                }
                Value::String(s) => Raw::Str(s),
                Value::Array(v) => Raw::Seq(v.into_iter().map(Raw::from).collect()),
                Value::Object(m) => {
                    Raw::Map(m.into_iter().map(|(k, v)| (k, Raw::from(v))).collect())
                }
            }
        }
    }

    impl From<&serde_json::Value> for Raw {
        fn from(v: &serde_json::Value) -> Self {
            Raw::from(v.clone())
        }
    }
}
