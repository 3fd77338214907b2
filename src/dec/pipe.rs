use super::{Decoder, DecoderSet, Error};
use crate::ds::Raw;

/// A sequential pipeline of decoders.
///
/// Implemented for tuples of [`Decoder`]s holding one through eight stages. Each intermediate
/// stage's output feeds the next stage as its raw input (through the stage type's `Into<Raw>`
/// conversion); the pipeline's output type is the final stage's output type.
pub trait Stages: Send + Sync {
    /// The final stage's output.
    type Output;

    /// Thread `raw` through every stage in order.
    fn run(&self, raw: &Raw) -> Result<Self::Output, Error>;
}

impl<A> Stages for (Decoder<A>,) {
    type Output = A;

    fn run(&self, raw: &Raw) -> Result<A, Error> {
        self.0.decode(raw)
    }
}

macro_rules! stages {
    ($( ( $($t:ident . $idx:tt),+ => $last:ident . $lidx:tt ) )+) => {
        $(
            impl<$($t,)+ $last> Stages for ($(Decoder<$t>,)+ Decoder<$last>,)
            where
                $($t: Into<Raw> + Send + Sync + 'static,)+
            {
                type Output = $last;

                fn run(&self, raw: &Raw) -> Result<$last, Error> {
                    $(
                        let raw: Raw = self.$idx.decode(raw)?.into();
                        let raw = &raw;
                    )+
                    self.$lidx.decode(raw)
                }
            }
        )+
    };
}

stages!(
    (A.0 => B.1)
    (A.0, B.1 => C.2)
    (A.0, B.1, C.2 => D.3)
    (A.0, B.1, C.2, D.3 => E.4)
    (A.0, B.1, C.2, D.3, E.4 => F.5)
    (A.0, B.1, C.2, D.3, E.4, F.5 => G.6)
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6 => H.7)
);

impl DecoderSet {
    /// Sequential composition: feed raw input through the first stage, its output through the
    /// next, and so on; the result is the last stage's output. With a single stage, `pipe` is
    /// the identity wrapper around it.
    ///
    /// `pipe` adds no context of its own — a failing stage's error propagates unchanged, and
    /// the failure localizes to the stage that rejected its input.
    ///
    /// # Example
    /// ```rust
    /// # use rawdec::*;
    /// let d = DecoderSet::new();
    /// let dec = d.pipe((d.number(), d.string(), d.literal_of("10")));
    ///
    /// assert_eq!(dec.decode(&Raw::from("10")), Ok("10"));
    ///
    /// let err = dec.decode(&Raw::from("11")).unwrap_err();
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Literal Decoder: Expected raw value to be 10 but got: 11."
    /// );
    /// ```
    pub fn pipe<S>(&self, stages: S) -> Decoder<S::Output>
    where
        S: Stages + 'static,
        S::Output: 'static,
    {
        Decoder::from_fn(move |raw| stages.run(raw))
    }

    /// The pass-through decoder: no validation, no transformation of the underlying data, and
    /// never a failure — the raw value converts through the nominal type's total `From<Raw>`.
    /// Used to re-tag an already-validated value, typically as a pipeline's final stage.
    ///
    /// # Example
    /// ```rust
    /// # use rawdec::*;
    /// #[derive(Debug, PartialEq)]
    /// struct CustomerId(String);
    ///
    /// impl From<Raw> for CustomerId {
    ///     fn from(raw: Raw) -> Self {
    ///         CustomerId(raw.to_string())
    ///     }
    /// }
    ///
    /// let d = DecoderSet::new();
    /// let dec = d.pipe((d.string(), d.nominal::<CustomerId>()));
    /// assert_eq!(
    ///     dec.decode(&Raw::from("c-001")),
    ///     Ok(CustomerId("c-001".to_string()))
    /// );
    /// ```
    pub fn nominal<T>(&self) -> Decoder<T>
    where
        T: From<Raw> + 'static,
    {
        Decoder::from_fn(|raw| Ok(T::from(raw.clone())))
    }
}
