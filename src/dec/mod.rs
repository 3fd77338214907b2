//! The decoder combinator engine.
//!
//! A [`Decoder`] is a pure mapping from an untrusted [`Raw`] value to a typed value. Decoders
//! are built in families: [`configure`] takes a [`Config`] — the error policy — and returns a
//! [`DecoderSet`] whose every constructor closes over that policy. Primitive decoders come out
//! of the generic factory ([`DecoderSet::build`] consuming a [`Descriptor`]); composite decoders
//! ([`array`], [`object`], [`pipe`]) take existing decoders and delegate to them, adding
//! positional or field context to any failure before re-raising it.
//!
//! Every decoder constructor has a strict form and a defaulting `_or` sibling. A strict decoder
//! reports invalid input through the error policy and returns `Err`; a defaulting decoder
//! returns its construction-time default instead, without consulting the policy at all.
//! Strictness is encoded in the constructor name, never inferred from the default's value.
//!
//! # Examples
//! Decode a renamed, loosely-typed payload into typed values.
//! ```rust
//! # use rawdec::*;
//! # #[cfg(feature = "json")] {
//! let d = DecoderSet::new();
//! let point = d.object((
//!     field("x", "PosX", d.number()),
//!     field("y", "PosY", d.number()),
//! ));
//!
//! let raw = Raw::from_json_str(r#"{ "PosX": "3", "PosY": 4 }"#).unwrap();
//! let (x, y) = point.decode(&raw).unwrap();
//! assert_eq!(x, 3);
//! assert_eq!(y, 4);
//! # }
//! ```
//!
//! Failures carry an exact, deterministic message.
//! ```rust
//! # use rawdec::*;
//! let d = DecoderSet::new();
//! let err = d.number().decode(&Raw::from("b")).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Number Decoder: Expected raw value to be a number but got: b."
//! );
//! ```
//!
//! An error callback observes failures without changing control flow.
//! ```rust
//! # use rawdec::*;
//! use std::sync::{Arc, Mutex};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let log = Arc::clone(&seen);
//! let d = configure(Config::with_error_callback(move |e| {
//!     log.lock().unwrap().push(e.to_string());
//! }));
//!
//! assert!(d.boolean().decode(&Raw::from("nah")).is_err());
//! assert_eq!(seen.lock().unwrap().len(), 1);
//! ```
//!
//! [`array`]: DecoderSet::array
//! [`object`]: DecoderSet::object
//! [`pipe`]: DecoderSet::pipe
//! [`Raw`]: crate::Raw
use crate::ds::Raw;
use std::fmt;
use std::sync::Arc;

mod cntr;
mod err;
mod pipe;
pub mod prims;
mod seq;

pub use self::cntr::{field, Field, Fields};
pub use self::err::{expected, Error};
pub use self::pipe::Stages;
pub use self::prims::Literal;

/// The error policy shared by a family of decoders.
///
/// `Config` holds one capability: an optional callback invoked with the fully-formatted
/// [`Error`] whenever a decoder rejects raw input and no default was declared. Without a
/// callback the failure surfaces only as the decoder's `Err` return. `Config` is immutable;
/// deriving a new [`DecoderSet`] from a different `Config` yields an independent family and
/// never affects decoders already built.
#[derive(Clone, Default)]
pub struct Config {
    on_error: Option<Arc<dyn Fn(&Error) + Send + Sync>>,
}

impl Config {
    /// The default policy: failures surface as `Err` alone.
    pub fn new() -> Self {
        Self::default()
    }

    /// A policy whose callback observes every failed, non-defaulted decode.
    ///
    /// The callback fires exactly once per failure at each wrapping level, at the moment the
    /// failure is detected and before `Err` is returned. It cannot alter the decode result.
    pub fn with_error_callback<F>(f: F) -> Self
    where
        F: Fn(&Error) + Send + Sync + 'static,
    {
        Config {
            on_error: Some(Arc::new(f)),
        }
    }

    pub(crate) fn emit(&self, err: &Error) {
        if let Some(cb) = &self.on_error {
            cb(err);
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Config")
            .field("on_error", &self.on_error.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Build a family of decoders sharing the error policy in `config`.
pub fn configure(config: Config) -> DecoderSet {
    DecoderSet { config }
}

/// A family of decoder constructors sharing one [`Config`].
///
/// Every constructor on the set closes over a clone of the set's config. Further independent
/// families can be derived with [`configure`](DecoderSet::configure) at any time; families
/// share nothing mutable.
#[derive(Clone, Debug, Default)]
pub struct DecoderSet {
    config: Config,
}

impl DecoderSet {
    /// A decoder set on the default error policy.
    pub fn new() -> Self {
        configure(Config::new())
    }

    /// Derive an independent decoder set with a different error policy.
    pub fn configure(&self, config: Config) -> DecoderSet {
        configure(config)
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    /// The generic decoder factory: a strict decoder from a [`Descriptor`].
    ///
    /// On valid raw input the descriptor's parser runs. On invalid input the descriptor's
    /// message formatter builds the failure, the error policy observes it, and `Err` is
    /// returned.
    ///
    /// # Example
    /// ```rust
    /// # use rawdec::*;
    /// let d = DecoderSet::new();
    /// let even = d.build(Descriptor::new(
    ///     |raw| expected("Even", "an even number", raw),
    ///     |raw| raw.num().and_then(|n| n.as_i64()).map(|x| x % 2 == 0).unwrap_or(false),
    ///     |raw| raw.num().and_then(|n| n.as_i64()).expect("validity checked"),
    /// ));
    ///
    /// assert_eq!(even.decode(&Raw::from(4)), Ok(4));
    /// assert_eq!(
    ///     even.decode(&Raw::from(5)).unwrap_err().to_string(),
    ///     "Even Decoder: Expected raw value to be an even number but got: 5."
    /// );
    /// ```
    pub fn build<T>(&self, descriptor: Descriptor<T>) -> Decoder<T>
    where
        T: Send + Sync + 'static,
    {
        let config = self.config.clone();
        Decoder::from_fn(move |raw| {
            if (descriptor.valid)(raw) {
                Ok((descriptor.parse)(raw))
            } else {
                let err = Error::invalid((descriptor.message)(raw));
                config.emit(&err);
                Err(err)
            }
        })
    }

    /// The defaulting form of [`build`](DecoderSet::build): invalid raw input yields `default`
    /// and the error policy is never consulted. Valid input still parses normally.
    pub fn build_or<T>(&self, descriptor: Descriptor<T>, default: T) -> Decoder<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        Decoder::from_fn(move |raw| {
            if (descriptor.valid)(raw) {
                Ok((descriptor.parse)(raw))
            } else {
                Ok(default.clone())
            }
        })
    }
}

/// The recipe for a leaf decoder: an error-message formatter, a validity predicate, and a
/// parser invoked only on raw values the predicate accepted.
///
/// The built-in primitives are thin descriptor instantiations (see [`prims`]); custom leaf
/// decoders supply their own triple to [`DecoderSet::build`].
pub struct Descriptor<T> {
    message: Box<dyn Fn(&Raw) -> String + Send + Sync>,
    valid: Box<dyn Fn(&Raw) -> bool + Send + Sync>,
    parse: Box<dyn Fn(&Raw) -> T + Send + Sync>,
}

impl<T> Descriptor<T> {
    /// Bundle a (formatter, predicate, parser) triple.
    pub fn new<M, V, P>(message: M, valid: V, parse: P) -> Self
    where
        M: Fn(&Raw) -> String + Send + Sync + 'static,
        V: Fn(&Raw) -> bool + Send + Sync + 'static,
        P: Fn(&Raw) -> T + Send + Sync + 'static,
    {
        Descriptor {
            message: Box::new(message),
            valid: Box::new(valid),
            parse: Box::new(parse),
        }
    }
}

/// A pure mapping from a raw value to a typed value.
///
/// Decoders hold no mutable state: the same input always produces the same output, calls are
/// safe from concurrent threads, and cloning a decoder is a cheap handle copy. A failed decode
/// has already passed through the family's error policy by the time `Err` is returned.
pub struct Decoder<T> {
    run: Arc<dyn Fn(&Raw) -> Result<T, Error> + Send + Sync>,
}

impl<T> Clone for Decoder<T> {
    fn clone(&self) -> Self {
        Decoder {
            run: Arc::clone(&self.run),
        }
    }
}

impl<T> fmt::Debug for Decoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Decoder")
    }
}

impl<T> Decoder<T> {
    pub(crate) fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Raw) -> Result<T, Error> + Send + Sync + 'static,
    {
        Decoder { run: Arc::new(f) }
    }

    /// Run the decoder against a raw value.
    pub fn decode(&self, raw: &Raw) -> Result<T, Error> {
        (self.run)(raw)
    }

    /// Post-transform the decoded value.
    ///
    /// The transformation runs only on success and cannot fail; failures pass through
    /// untouched. This is how a typed record is built out of the object combinator's tuple.
    ///
    /// # Example
    /// ```rust
    /// # use rawdec::*;
    /// # #[cfg(feature = "json")] {
    /// struct User { name: String, admin: bool }
    ///
    /// let d = DecoderSet::new();
    /// let user = d
    ///     .object((
    ///         field("name", "userName", d.string()),
    ///         field("admin", "isAdmin", d.boolean_or(false)),
    ///     ))
    ///     .map(|(name, admin)| User { name, admin });
    ///
    /// let raw = Raw::from_json_str(r#"{ "userName": "ada" }"#).unwrap();
    /// let user = user.decode(&raw).unwrap();
    /// assert_eq!(user.name, "ada");
    /// assert!(!user.admin);
    /// # }
    /// ```
    pub fn map<U, F>(self, f: F) -> Decoder<U>
    where
        F: Fn(T) -> U + Send + Sync + 'static,
        T: 'static,
    {
        Decoder::from_fn(move |raw| self.decode(raw).map(&f))
    }
}
