use super::{expected, Config, Decoder, DecoderSet, Error};
use crate::ds::Raw;
use std::collections::BTreeMap;

/// One entry of a field mapping: output field `name`, read from raw source key `key`, decoded
/// with `dec`. The two names are independent and may differ arbitrarily.
pub struct Field<T> {
    name: String,
    key: String,
    dec: Decoder<T>,
}

/// Construct a [`Field`] mapping entry.
pub fn field<T>(name: impl Into<String>, key: impl Into<String>, dec: Decoder<T>) -> Field<T> {
    Field {
        name: name.into(),
        key: key.into(),
        dec,
    }
}

impl<T> Field<T> {
    fn decode_in(&self, map: &BTreeMap<String, Raw>, config: &Config) -> Result<T, Error> {
        // a key absent from the raw object decodes the absent marker
        let raw = map.get(&self.key).unwrap_or(&Raw::Absent);
        match self.dec.decode(raw) {
            Ok(v) => Ok(v),
            Err(inner) => {
                let err = Error::field(&self.name, &self.key, inner);
                config.emit(&err);
                Err(err)
            }
        }
    }
}

/// A declaration-ordered field mapping decodable from one raw object.
///
/// Implemented for tuples of [`Field`]s holding one through twelve entries. Fields decode in
/// declaration order; the output tuple carries exactly the declared fields, in that order.
pub trait Fields: Send + Sync {
    /// The decoded record: one value per declared field, in declaration order.
    type Output;

    /// Decode every field out of `map`, failing on the first field error.
    fn decode_fields(
        &self,
        map: &BTreeMap<String, Raw>,
        config: &Config,
    ) -> Result<Self::Output, Error>;
}

macro_rules! fields {
    ($( ( $($t:ident . $idx:tt),+ ) )+) => {
        $(
            impl<$($t),+> Fields for ($(Field<$t>,)+)
            where
                $($t: Send + Sync + 'static),+
            {
                type Output = ($($t,)+);

                fn decode_fields(
                    &self,
                    map: &BTreeMap<String, Raw>,
                    config: &Config,
                ) -> Result<Self::Output, Error> {
                    Ok(($( self.$idx.decode_in(map, config)?, )+))
                }
            }
        )+
    };
}

fields!(
    (A.0)
    (A.0, B.1)
    (A.0, B.1, C.2)
    (A.0, B.1, C.2, D.3)
    (A.0, B.1, C.2, D.3, E.4)
    (A.0, B.1, C.2, D.3, E.4, F.5)
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6)
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7)
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8)
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9)
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9, K.10)
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9, K.10, L.11)
);

impl DecoderSet {
    /// Lift a field mapping to a decoder from a raw keyed structure to a typed record.
    ///
    /// Raw keys outside the mapping are ignored; a mapped key missing from the raw object is
    /// decoded as the absent marker by that field's decoder (which may itself default or fail).
    /// A field failure wraps with both the output field name and the raw source key before
    /// re-raising.
    ///
    /// # Example
    /// ```rust
    /// # use rawdec::*;
    /// # #[cfg(feature = "json")] {
    /// let d = DecoderSet::new();
    /// let dec = d.object((
    ///     field("a", "A", d.number()),
    ///     field("b", "B", d.string()),
    /// ));
    ///
    /// let raw = Raw::from_json_str(r#"{ "A": "5", "B": "x", "ignored": [] }"#).unwrap();
    /// let (a, b) = dec.decode(&raw).unwrap();
    /// assert_eq!(a, 5);
    /// assert_eq!(b, "x");
    /// # }
    /// ```
    pub fn object<F>(&self, fields: F) -> Decoder<F::Output>
    where
        F: Fields + 'static,
        F::Output: 'static,
    {
        let config = self.config().clone();
        Decoder::from_fn(move |raw| match raw.map() {
            Some(m) => fields.decode_fields(m, &config),
            None => {
                let err = Error::invalid(expected("Object", "an object", raw));
                config.emit(&err);
                Err(err)
            }
        })
    }

    /// The defaulting form of [`object`](DecoderSet::object).
    ///
    /// As with the array combinator, the default covers only the shape check; field failures
    /// inside an actual object still wrap and re-raise.
    pub fn object_or<F>(&self, fields: F, default: F::Output) -> Decoder<F::Output>
    where
        F: Fields + 'static,
        F::Output: Clone + Send + Sync + 'static,
    {
        let config = self.config().clone();
        Decoder::from_fn(move |raw| match raw.map() {
            Some(m) => fields.decode_fields(m, &config),
            None => Ok(default.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ds::Number;

    fn raw_map(entries: Vec<(&str, Raw)>) -> Raw {
        Raw::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn renames_and_ignores_unmapped_keys() {
        let d = DecoderSet::new();
        let dec = d.object((field("a", "A", d.number()), field("b", "B", d.string())));
        let raw = raw_map(vec![
            ("A", Raw::from("5")),
            ("B", Raw::from("x")),
            ("Z", Raw::Null),
        ]);
        assert_eq!(dec.decode(&raw), Ok((Number::Uint(5), "x".to_string())));
    }

    #[test]
    fn missing_key_decodes_absent() {
        let d = DecoderSet::new();
        let dec = d.object((field("on", "ON", d.boolean()),));
        assert_eq!(dec.decode(&raw_map(vec![])), Ok((false,)));

        let strict = d.object((field("n", "N", d.number()),));
        let err = strict.decode(&raw_map(vec![])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Object Decoder: Attempted to decode property 'n' from raw key 'N' but failed with: \"Number Decoder: Expected raw value to be a number but got: absent.\""
        );
    }

    #[test]
    fn declaration_order_drives_failure() {
        let d = DecoderSet::new();
        // both fields are bad; the first declared one reports
        let dec = d.object((field("a", "A", d.number()), field("b", "B", d.number())));
        let raw = raw_map(vec![("A", Raw::from("x")), ("B", Raw::from("y"))]);
        let err = dec.decode(&raw).unwrap_err();
        assert!(err.to_string().contains("property 'a' from raw key 'A'"));
    }

    #[test]
    fn shape_default() {
        let d = DecoderSet::new();
        let dec = d.object_or((field("a", "A", d.number()),), (Number::Uint(0),));
        assert_eq!(dec.decode(&Raw::Null), Ok((Number::Uint(0),)));
        assert_eq!(
            d.object((field("a", "A", d.number()),))
                .decode(&Raw::from(5))
                .unwrap_err()
                .to_string(),
            "Object Decoder: Expected raw value to be an object but got: 5."
        );
    }
}
