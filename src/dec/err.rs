use crate::ds::Raw;
use std::{error, fmt};

/// A decode failure.
///
/// Leaf decoders produce [`Invalid`] carrying the fully-formatted message. The array and object
/// combinators wrap an inner failure with positional or field context, forming a chain that
/// reads top-down to the offending leaf value:
///
/// ```text
/// Array Decoder: Item '0' failed with: "Number Decoder: Expected raw value to be a number but got: b."
/// ```
///
/// The chain is also exposed through [`std::error::Error::source`].
///
/// [`Invalid`]: Error::Invalid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A leaf decoder rejected the raw value. The string is the complete message.
    Invalid(String),
    /// An element of a sequence failed to decode.
    Item {
        /// Zero-based position of the failing element.
        index: usize,
        /// The element's failure.
        source: Box<Error>,
    },
    /// A mapped field of an object failed to decode.
    Field {
        /// The output field name.
        name: String,
        /// The raw source key the field was read from.
        key: String,
        /// The field's failure.
        source: Box<Error>,
    },
}

impl Error {
    /// A leaf failure with an already-formatted message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Error::Invalid(message.into())
    }

    pub(crate) fn item(index: usize, source: Error) -> Self {
        Error::Item {
            index,
            source: Box::new(source),
        }
    }

    pub(crate) fn field(name: &str, key: &str, source: Error) -> Self {
        Error::Field {
            name: name.to_string(),
            key: key.to_string(),
            source: Box::new(source),
        }
    }

    /// Walk the context wrappers down to the originating leaf failure.
    ///
    /// # Example
    /// ```rust
    /// # use rawdec::*;
    /// let set = DecoderSet::new();
    /// let err = set.array(set.number()).decode(&Raw::from(vec!["b"])).unwrap_err();
    /// assert_eq!(
    ///     err.leaf().to_string(),
    ///     "Number Decoder: Expected raw value to be a number but got: b."
    /// );
    /// ```
    pub fn leaf(&self) -> &Error {
        match self {
            Error::Invalid(_) => self,
            Error::Item { source, .. } => source.leaf(),
            Error::Field { source, .. } => source.leaf(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Invalid(message) => f.write_str(message),
            Error::Item { index, source } => {
                write!(f, "Array Decoder: Item '{}' failed with: \"{}\"", index, source)
            }
            Error::Field { name, key, source } => write!(
                f,
                "Object Decoder: Attempted to decode property '{}' from raw key '{}' but failed with: \"{}\"",
                name, key, source
            ),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Invalid(_) => None,
            Error::Item { source, .. } => Some(source.as_ref()),
            Error::Field { source, .. } => Some(source.as_ref()),
        }
    }
}

/// Build a leaf message on the shared grammar:
/// `"<Kind> Decoder: Expected raw value to be <expectation> but got: <raw>."`
///
/// The built-in decoders format every message through this; custom [`Descriptor`]s can use it to
/// stay on the same grammar.
///
/// # Example
/// ```rust
/// # use rawdec::*;
/// let msg = expected("Duration", "a duration string", &Raw::from(5));
/// assert_eq!(msg, "Duration Decoder: Expected raw value to be a duration string but got: 5.");
/// ```
///
/// [`Descriptor`]: crate::Descriptor
pub fn expected(kind: &str, expectation: impl fmt::Display, raw: &Raw) -> String {
    format!(
        "{} Decoder: Expected raw value to be {} but got: {}.",
        kind, expectation, raw
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn leaf_grammar() {
        let msg = expected("Number", "a number", &Raw::from("b"));
        assert_eq!(
            msg,
            "Number Decoder: Expected raw value to be a number but got: b."
        );
    }

    #[test]
    fn wrapper_grammar() {
        let inner = Error::invalid(expected("Number", "a number", &Raw::from("b")));
        let item = Error::item(0, inner.clone());
        assert_eq!(
            item.to_string(),
            "Array Decoder: Item '0' failed with: \"Number Decoder: Expected raw value to be a number but got: b.\""
        );

        let field = Error::field("age", "Age", inner.clone());
        assert_eq!(
            field.to_string(),
            "Object Decoder: Attempted to decode property 'age' from raw key 'Age' but failed with: \"Number Decoder: Expected raw value to be a number but got: b.\""
        );

        assert_eq!(field.leaf(), &inner);
        assert_eq!(field.source().map(|e| e.to_string()), Some(inner.to_string()));
        assert!(inner.source().is_none());
    }

    #[test]
    fn nested_wrappers_read_top_down() {
        let inner = Error::invalid(expected("Boolean", "a boolean", &Raw::from("nah")));
        let err = Error::item(2, Error::field("ok", "OK", inner));
        assert_eq!(
            err.to_string(),
            "Array Decoder: Item '2' failed with: \"Object Decoder: Attempted to decode property 'ok' from raw key 'OK' but failed with: \"Boolean Decoder: Expected raw value to be a boolean but got: nah.\"\""
        );
    }
}
