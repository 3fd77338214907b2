//! Text-shape parsing for the primitive decoders.
//!
//! The only text shape the decoders accept beyond numbers is the calendar-date subset of
//! ISO-8601 used by [`DecoderSet::date`]:
//!
//! ```text
//! date = YYYY '-' MM '-' DD [ ('T' | ' ') time ]
//! time = HH ':' MM [ ':' SS [ '.' 1*DIGIT ] ] [ zone ]
//! zone = 'Z' | ('+' | '-') HH [':'] MM
//! ```
//!
//! All numeric fields are fixed-width digit runs. The date part must name a real calendar day
//! (leap years honored); the time part must be well-formed but its values are discarded.
//!
//! [`DecoderSet::date`]: crate::DecoderSet::date
use nom::{
    branch::alt,
    bytes::complete::take_while_m_n,
    character::complete::{char, digit1, one_of},
    combinator::{all_consuming, map, map_parser, opt},
    error::{self, ErrorKind, ParseError},
    sequence::{preceded, terminated, tuple},
    Err, IResult,
};
use std::str::FromStr;
use time::{Date, Month};

fn from_str<'a, T: FromStr, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, T, E> {
    i.parse::<T>()
        .map(|x| ("", x))
        .map_err(|_| Err::Error(error::make_error(i, ErrorKind::MapRes)))
}

/// A fixed-width run of ascii digits.
fn fixed<'a, T: FromStr, E: ParseError<&'a str>>(
    width: usize,
) -> impl FnMut(&'a str) -> IResult<&'a str, T, E> {
    map_parser(
        take_while_m_n(width, width, |c: char| c.is_ascii_digit()),
        from_str,
    )
}

fn ymd<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, (i32, u8, u8), E> {
    tuple((
        fixed::<i32, E>(4),
        preceded(char('-'), fixed::<u8, E>(2)),
        preceded(char('-'), fixed::<u8, E>(2)),
    ))(i)
}

fn zone<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, (), E> {
    alt((
        map(char('Z'), |_| ()),
        map(
            tuple((
                one_of("+-"),
                fixed::<u8, E>(2),
                opt(char(':')),
                fixed::<u8, E>(2),
            )),
            |_| (),
        ),
    ))(i)
}

/// The time-of-day tail. Values are shape-checked only; the date decoder discards them.
fn clock<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, (), E> {
    map(
        tuple((
            fixed::<u8, E>(2),
            char(':'),
            fixed::<u8, E>(2),
            opt(tuple((
                char(':'),
                fixed::<u8, E>(2),
                opt(preceded(char('.'), digit1)),
            ))),
            opt(zone),
        )),
        |_| (),
    )(i)
}

/// Parse a calendar date out of the accepted ISO-8601 subset.
///
/// Returns `None` when the string does not match the subset grammar, names an impossible
/// calendar day, or carries trailing characters.
///
/// # Example
/// ```rust
/// use rawdec::parse;
/// use time::{Date, Month};
///
/// let expected = Date::from_calendar_date(2020, Month::February, 29).ok();
/// assert_eq!(parse::date("2020-02-29"), expected);
/// assert_eq!(parse::date("2020-02-29T23:59:59.999Z"), expected);
/// assert_eq!(parse::date("2019-02-29"), None);
/// ```
pub fn date(i: &str) -> Option<Date> {
    let r: IResult<&str, (i32, u8, u8), ()> =
        all_consuming(terminated(ymd, opt(preceded(one_of("T "), clock))))(i);
    let (_, (y, m, d)) = r.ok()?;
    let month = Month::try_from(m).ok()?;
    Date::from_calendar_date(y, month, d).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u8, day: u8) -> Option<Date> {
        Date::from_calendar_date(y, Month::try_from(m).unwrap(), day).ok()
    }

    #[test]
    fn bare_dates() {
        assert_eq!(date("2020-01-02"), d(2020, 1, 2));
        assert_eq!(date("1999-12-31"), d(1999, 12, 31));
        assert_eq!(date("0001-01-01"), d(1, 1, 1));
    }

    #[test]
    fn calendar_validation() {
        assert_eq!(date("2020-02-29"), d(2020, 2, 29));
        assert_eq!(date("2019-02-29"), None);
        assert_eq!(date("2020-13-01"), None);
        assert_eq!(date("2020-00-10"), None);
        assert_eq!(date("2020-04-31"), None);
    }

    #[test]
    fn time_of_day_is_discarded() {
        let exp = d(2020, 1, 2);
        assert_eq!(date("2020-01-02T03:04"), exp);
        assert_eq!(date("2020-01-02 03:04"), exp);
        assert_eq!(date("2020-01-02T03:04:05"), exp);
        assert_eq!(date("2020-01-02T03:04:05.123456"), exp);
        assert_eq!(date("2020-01-02T03:04:05Z"), exp);
        assert_eq!(date("2020-01-02T03:04:05+10:30"), exp);
        assert_eq!(date("2020-01-02T03:04:05-0500"), exp);
    }

    #[test]
    fn malformed_shapes() {
        assert_eq!(date(""), None);
        assert_eq!(date("2020-1-2"), None);
        assert_eq!(date("20-01-02"), None);
        assert_eq!(date("2020/01/02"), None);
        assert_eq!(date("2020-01-02x"), None);
        assert_eq!(date("2020-01-02T03"), None);
        assert_eq!(date("2020-01-02T03:04:05+10:3"), None);
        assert_eq!(date("not a date"), None);
    }
}
