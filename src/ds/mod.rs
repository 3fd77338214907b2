mod num;
mod raw;

pub use self::num::{Number, ParseNumberError};
pub use self::raw::Raw;
