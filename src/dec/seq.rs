use super::{expected, Config, Decoder, DecoderSet, Error};
use crate::ds::Raw;

impl DecoderSet {
    /// Lift an item decoder to a decoder of sequences.
    ///
    /// Every element decodes through `item` in order; output order and length mirror the
    /// input exactly. A failing element is wrapped with its zero-based position before the
    /// failure re-raises, so the message reads down to the offending leaf:
    ///
    /// ```rust
    /// # use rawdec::*;
    /// let d = DecoderSet::new();
    /// let nums = d.array(d.number());
    ///
    /// let ok = nums.decode(&Raw::from(vec!["1", "2"])).unwrap();
    /// assert_eq!(ok, vec![Number::Uint(1), Number::Uint(2)]);
    ///
    /// let err = nums.decode(&Raw::from(vec!["b"])).unwrap_err();
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Array Decoder: Item '0' failed with: \"Number Decoder: Expected raw value to be a number but got: b.\""
    /// );
    /// ```
    pub fn array<T>(&self, item: Decoder<T>) -> Decoder<Vec<T>>
    where
        T: Send + Sync + 'static,
    {
        let config = self.config().clone();
        Decoder::from_fn(move |raw| match raw.seq() {
            Some(items) => decode_items(&item, items, &config),
            None => {
                let err = Error::invalid(expected("Array", "an array", raw));
                config.emit(&err);
                Err(err)
            }
        })
    }

    /// The defaulting form of [`array`](DecoderSet::array).
    ///
    /// The default covers only the shape check — non-sequence raw input yields `default`
    /// silently. Element failures inside an actual sequence still wrap and re-raise; an element
    /// only decodes quietly when the item decoder itself was constructed defaulting.
    pub fn array_or<T>(&self, item: Decoder<T>, default: Vec<T>) -> Decoder<Vec<T>>
    where
        T: Clone + Send + Sync + 'static,
    {
        let config = self.config().clone();
        Decoder::from_fn(move |raw| match raw.seq() {
            Some(items) => decode_items(&item, items, &config),
            None => Ok(default.clone()),
        })
    }
}

fn decode_items<T>(item: &Decoder<T>, items: &[Raw], config: &Config) -> Result<Vec<T>, Error> {
    let mut out = Vec::with_capacity(items.len());
    for (index, raw) in items.iter().enumerate() {
        match item.decode(raw) {
            Ok(v) => out.push(v),
            Err(inner) => {
                let err = Error::item(index, inner);
                config.emit(&err);
                return Err(err);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ds::Number;

    #[test]
    fn order_and_length_preserved() {
        let d = DecoderSet::new();
        let dec = d.array(d.number());
        let raw = Raw::from(vec![Raw::from(3), Raw::from("2"), Raw::from(1.5)]);
        assert_eq!(
            dec.decode(&raw),
            Ok(vec![Number::Uint(3), Number::Uint(2), Number::Float(1.5)])
        );
        assert_eq!(dec.decode(&Raw::Seq(vec![])), Ok(vec![]));
    }

    #[test]
    fn failure_indexes_the_first_bad_item() {
        let d = DecoderSet::new();
        let dec = d.array(d.number());
        let raw = Raw::from(vec![Raw::from(1), Raw::from("b"), Raw::from("c")]);
        let err = dec.decode(&raw).unwrap_err();
        assert!(err.to_string().contains("Item '1' failed with:"));
    }

    #[test]
    fn shape_default_does_not_cover_items() {
        let d = DecoderSet::new();
        let dec = d.array_or(d.number(), vec![]);
        assert_eq!(dec.decode(&Raw::Null), Ok(vec![]));
        assert!(dec.decode(&Raw::from(vec!["b"])).is_err());
    }

    #[test]
    fn defers_to_item_defaults() {
        let d = DecoderSet::new();
        let dec = d.array(d.number_or(Number::Uint(0)));
        let raw = Raw::from(vec![Raw::from("b"), Raw::from(2)]);
        assert_eq!(dec.decode(&raw), Ok(vec![Number::Uint(0), Number::Uint(2)]));
    }

    #[test]
    fn nested_arrays() {
        let d = DecoderSet::new();
        let dec = d.array(d.array(d.boolean()));
        let raw = Raw::from(vec![
            Raw::from(vec![Raw::from(1)]),
            Raw::from(vec![Raw::from("nah")]),
        ]);
        let err = dec.decode(&raw).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Array Decoder: Item '1' failed with: \"Array Decoder: Item '0' failed with: \"Boolean Decoder: Expected raw value to be a boolean but got: nah.\"\""
        );
    }
}
