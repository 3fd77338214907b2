//! Combinator decoders turning untrusted, loosely-typed data into typed Rust values.
//!
//! `rawdec` sits at the boundary between an external data source (say, a backend API) and an
//! internal, strictly-typed model, where field names, primitive representations, and shapes on
//! the two sides can all differ. A [`Decoder`] is an executable validation: a pure function
//! from a [`Raw`] value to a typed value, failing predictably — with an exact, deterministic
//! message — when the input does not conform. There is no schema language; every decoder is
//! built in code, out of primitive decoders and the composite combinators that lift them over
//! sequences, keyed objects, and sequential pipelines.
//!
//! Decoders come in families sharing one error policy. [`configure`] takes a [`Config`] and
//! returns a [`DecoderSet`]; everything built from that set closes over the policy. The default
//! policy surfaces a failure as the decoder's `Err` return; a policy with an error callback has
//! the callback observe every failed, non-defaulted decode as it happens.
//!
//! # Examples
//! Decoding a payload whose field names and primitive representations both differ from the
//! target model.
//! ```rust
//! use rawdec::*;
//!
//! # #[cfg(feature = "json")] {
//! #[derive(Debug, PartialEq)]
//! struct Account {
//!     name: String,
//!     age: u32,
//!     active: bool,
//! }
//!
//! let d = DecoderSet::new();
//! let account = d
//!     .object((
//!         field("name", "userName", d.string()),
//!         field("age", "userAge", d.number()),
//!         field("active", "isActive", d.boolean_or(false)),
//!     ))
//!     .map(|(name, age, active)| Account {
//!         name,
//!         age: age.as_u64().unwrap_or(0) as u32,
//!         active,
//!     });
//!
//! let raw = Raw::from_json_str(r#"{ "userName": "ada", "userAge": "36" }"#).unwrap();
//! assert_eq!(
//!     account.decode(&raw),
//!     Ok(Account { name: "ada".to_string(), age: 36, active: false })
//! );
//! # }
//! ```
//!
//! Failures wrap outward with positional and field context, reading top-down to the offending
//! leaf value.
//! ```rust
//! use rawdec::*;
//!
//! # #[cfg(feature = "json")] {
//! let d = DecoderSet::new();
//! let dec = d.array(d.object((field("n", "N", d.number()),)));
//!
//! let raw = Raw::from_json_str(r#"[ { "N": 1 }, { "N": "b" } ]"#).unwrap();
//! assert_eq!(
//!     dec.decode(&raw).unwrap_err().to_string(),
//!     "Array Decoder: Item '1' failed with: \"Object Decoder: Attempted to decode property \
//!      'n' from raw key 'N' but failed with: \"Number Decoder: Expected raw value to be a \
//!      number but got: b.\"\""
//! );
//! # }
//! ```
//!
//! # Feature flags
//! - _json_ (default): `serde` deserialization for [`Raw`] and conversions from
//!   `serde_json::Value`, so raw values come straight out of a JSON payload.
//!
//! # Guarantees
//! Decoders are pure and idempotent; the only side effect any decoder ever performs is
//! invoking the configured error callback. Everything is synchronous, nothing blocks, and all
//! the handles ([`Decoder`], [`DecoderSet`], [`Config`]) are cheap to clone and safe to share
//! across threads.
pub mod dec;
mod ds;
pub mod parse;

pub use crate::dec::{
    configure, expected, field, Config, Decoder, DecoderSet, Descriptor, Error, Field, Fields,
    Literal, Stages,
};
pub use crate::ds::{Number, ParseNumberError, Raw};
