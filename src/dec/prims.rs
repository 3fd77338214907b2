//! Descriptors for the built-in leaf decoders.
//!
//! Each primitive is a thin [`Descriptor`] instantiation — a one-line predicate and parser —
//! fed through the generic factory. The descriptor constructors are public so a custom set can
//! rewrap them (for instance to change only the message).
use super::{expected, Decoder, DecoderSet, Descriptor};
use crate::ds::{Number, Raw};
use crate::parse;
use std::fmt;
use time::Date;

fn truthy(raw: &Raw) -> bool {
    match raw {
        Raw::Bool(true) => true,
        Raw::Num(n) => *n == 1,
        Raw::Str(s) => s == "true" || s == "1",
        _ => false,
    }
}

fn falsy(raw: &Raw) -> bool {
    match raw {
        Raw::Absent | Raw::Null | Raw::Bool(false) => true,
        Raw::Num(n) => *n == 0,
        Raw::Str(s) => s == "false" || s == "0",
        _ => false,
    }
}

/// Accepts `true`, `'true'`, `1`, `'1'` (decoding to `true`) and `false`, `'false'`, `0`,
/// `'0'`, null, absent (decoding to `false`).
pub fn boolean() -> Descriptor<bool> {
    Descriptor::new(
        |raw| expected("Boolean", "a boolean", raw),
        |raw| truthy(raw) || falsy(raw),
        truthy,
    )
}

fn coerce_number(raw: &Raw) -> Option<Number> {
    match raw {
        Raw::Num(n) => Some(*n),
        Raw::Str(s) => s.parse().ok(),
        Raw::Bool(b) => Some(Number::Uint(u64::from(*b))),
        _ => None,
    }
}

/// Accepts anything numeric-coercible: numbers pass through, numeric strings parse, booleans
/// coerce to `1`/`0`.
pub fn number() -> Descriptor<Number> {
    Descriptor::new(
        |raw| expected("Number", "a number", raw),
        |raw| coerce_number(raw).is_some(),
        |raw| coerce_number(raw).expect("validity checked"),
    )
}

/// Accepts strings, booleans, and numbers, stringifying the latter two.
pub fn string() -> Descriptor<String> {
    Descriptor::new(
        |raw| expected("String", "a string", raw),
        |raw| matches!(raw, Raw::Str(_) | Raw::Bool(_) | Raw::Num(_)),
        |raw| raw.to_string(),
    )
}

/// Accepts a string in the ISO-8601 subset of [`parse::date`], decoding to the calendar date
/// with any time-of-day discarded.
///
/// [`parse::date`]: crate::parse::date
pub fn date() -> Descriptor<Date> {
    Descriptor::new(
        |raw| expected("Date", "an ISO-8601 date string", raw),
        |raw| raw.str().and_then(parse::date).is_some(),
        |raw| raw.str().and_then(parse::date).expect("validity checked"),
    )
}

/// Accepts only a raw value equal to `lit`, decoding to the literal itself.
///
/// Equality is typed: a string literal matches only raw strings, a numeric literal only raw
/// numbers (across the integer and float lanes).
pub fn literal_of<L: Literal + 'static>(lit: L) -> Descriptor<L> {
    let in_message = lit.clone();
    let in_valid = lit.clone();
    Descriptor::new(
        move |raw| expected("Literal", &in_message, raw),
        move |raw| in_valid.matches(raw),
        move |_| lit.clone(),
    )
}

/// Values usable as decoder literals: booleans, numbers, and strings.
pub trait Literal: Clone + fmt::Display + Send + Sync {
    /// Typed equality between the literal and a raw value.
    fn matches(&self, raw: &Raw) -> bool;
}

impl Literal for bool {
    fn matches(&self, raw: &Raw) -> bool {
        raw.bool() == Some(*self)
    }
}

macro_rules! literal_num_impl {
	( $( $t:ty ),* ) => {
		$(
			impl Literal for $t {
				fn matches(&self, raw: &Raw) -> bool {
					raw.num().map(|n| n == Number::from(*self)).unwrap_or(false)
				}
			}
		)*
	};
}

literal_num_impl!(usize, u8, u16, u32, u64);
literal_num_impl!(isize, i8, i16, i32, i64);
literal_num_impl!(f32, f64);

impl Literal for &'static str {
    fn matches(&self, raw: &Raw) -> bool {
        raw.str() == Some(*self)
    }
}

impl Literal for String {
    fn matches(&self, raw: &Raw) -> bool {
        raw.str() == Some(self.as_str())
    }
}

impl DecoderSet {
    /// The strict boolean decoder. See [`prims::boolean`] for the accepted forms.
    ///
    /// # Example
    /// ```rust
    /// # use rawdec::*;
    /// let d = DecoderSet::new();
    /// assert_eq!(d.boolean().decode(&Raw::from("1")), Ok(true));
    /// assert_eq!(d.boolean().decode(&Raw::Null), Ok(false));
    /// assert!(d.boolean().decode(&Raw::from("yes")).is_err());
    /// ```
    ///
    /// [`prims::boolean`]: crate::dec::prims::boolean
    pub fn boolean(&self) -> Decoder<bool> {
        self.build(boolean())
    }

    /// The defaulting boolean decoder.
    pub fn boolean_or(&self, default: bool) -> Decoder<bool> {
        self.build_or(boolean(), default)
    }

    /// The strict number decoder. See [`prims::number`] for the accepted forms.
    ///
    /// # Example
    /// ```rust
    /// # use rawdec::*;
    /// let d = DecoderSet::new();
    /// assert_eq!(d.number().decode(&Raw::from("5")), Ok(Number::Uint(5)));
    /// assert_eq!(d.number().decode(&Raw::from(-3.5)), Ok(Number::Float(-3.5)));
    /// assert!(d.number().decode(&Raw::from("five")).is_err());
    /// ```
    ///
    /// [`prims::number`]: crate::dec::prims::number
    pub fn number(&self) -> Decoder<Number> {
        self.build(number())
    }

    /// The defaulting number decoder.
    pub fn number_or(&self, default: Number) -> Decoder<Number> {
        self.build_or(number(), default)
    }

    /// The strict string decoder. See [`prims::string`] for the accepted forms.
    pub fn string(&self) -> Decoder<String> {
        self.build(string())
    }

    /// The defaulting string decoder.
    pub fn string_or(&self, default: String) -> Decoder<String> {
        self.build_or(string(), default)
    }

    /// The strict date decoder.
    ///
    /// # Example
    /// ```rust
    /// # use rawdec::*;
    /// use time::{Date, Month};
    ///
    /// let d = DecoderSet::new();
    /// assert_eq!(
    ///     d.date().decode(&Raw::from("2021-06-30T08:15:00Z")),
    ///     Ok(Date::from_calendar_date(2021, Month::June, 30).unwrap())
    /// );
    /// ```
    pub fn date(&self) -> Decoder<Date> {
        self.build(date())
    }

    /// The defaulting date decoder.
    pub fn date_or(&self, default: Date) -> Decoder<Date> {
        self.build_or(date(), default)
    }

    /// The strict literal decoder.
    ///
    /// # Example
    /// ```rust
    /// # use rawdec::*;
    /// let d = DecoderSet::new();
    /// assert_eq!(d.literal_of("imperial").decode(&Raw::from("imperial")), Ok("imperial"));
    /// assert_eq!(
    ///     d.literal_of(10).decode(&Raw::from(11)).unwrap_err().to_string(),
    ///     "Literal Decoder: Expected raw value to be 10 but got: 11."
    /// );
    /// ```
    pub fn literal_of<L: Literal + 'static>(&self, lit: L) -> Decoder<L> {
        self.build(literal_of(lit))
    }

    /// The defaulting literal decoder.
    pub fn literal_of_or<L: Literal + 'static>(&self, lit: L, default: L) -> Decoder<L> {
        self.build_or(literal_of(lit), default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_forms() {
        let d = DecoderSet::new();
        let dec = d.boolean();
        for raw in [Raw::from(true), Raw::from("true"), Raw::from(1), Raw::from("1")] {
            assert_eq!(dec.decode(&raw), Ok(true), "truthy {}", raw);
        }
        for raw in [
            Raw::from(false),
            Raw::from("false"),
            Raw::from(0),
            Raw::from("0"),
            Raw::Null,
            Raw::Absent,
        ] {
            assert_eq!(dec.decode(&raw), Ok(false), "falsy {}", raw);
        }
        for raw in [Raw::from("yes"), Raw::from(2), Raw::from(Vec::<Raw>::new())] {
            assert!(dec.decode(&raw).is_err(), "invalid {}", raw);
        }
    }

    #[test]
    fn number_coercions() {
        let d = DecoderSet::new();
        let dec = d.number();
        assert_eq!(dec.decode(&Raw::from(5)), Ok(Number::Uint(5)));
        assert_eq!(dec.decode(&Raw::from("-5")), Ok(Number::Int(-5)));
        assert_eq!(dec.decode(&Raw::from("2.5e1")), Ok(Number::Float(25.0)));
        assert_eq!(dec.decode(&Raw::from(true)), Ok(Number::Uint(1)));
        assert!(dec.decode(&Raw::from("")).is_err());
        assert!(dec.decode(&Raw::Null).is_err());
    }

    #[test]
    fn string_coercions() {
        let d = DecoderSet::new();
        let dec = d.string();
        assert_eq!(dec.decode(&Raw::from("x")), Ok("x".to_string()));
        assert_eq!(dec.decode(&Raw::from(false)), Ok("false".to_string()));
        assert_eq!(dec.decode(&Raw::from(3.14)), Ok("3.14".to_string()));
        assert!(dec.decode(&Raw::Null).is_err());
        assert!(dec.decode(&Raw::Absent).is_err());
    }

    #[test]
    fn date_messages() {
        let d = DecoderSet::new();
        assert_eq!(
            d.date().decode(&Raw::from("yesterday")).unwrap_err().to_string(),
            "Date Decoder: Expected raw value to be an ISO-8601 date string but got: yesterday."
        );
    }

    #[test]
    fn literal_typed_equality() {
        let d = DecoderSet::new();
        assert_eq!(d.literal_of(10).decode(&Raw::from(10.0)), Ok(10));
        assert!(d.literal_of(10).decode(&Raw::from("10")).is_err());
        assert!(d.literal_of("10").decode(&Raw::from(10)).is_err());
        assert_eq!(d.literal_of(false).decode(&Raw::from(false)), Ok(false));
    }

    #[test]
    fn defaulting_forms() {
        let d = DecoderSet::new();
        assert_eq!(d.boolean_or(true).decode(&Raw::from("nah")), Ok(true));
        assert_eq!(d.number_or(Number::Uint(7)).decode(&Raw::Null), Ok(Number::Uint(7)));
        assert_eq!(d.string_or(String::new()).decode(&Raw::Null), Ok(String::new()));
        assert_eq!(d.literal_of_or("a", "b").decode(&Raw::from("c")), Ok("b"));
        // a default does not disturb the valid path
        assert_eq!(d.number_or(Number::Uint(7)).decode(&Raw::from("8")), Ok(Number::Uint(8)));
    }
}
