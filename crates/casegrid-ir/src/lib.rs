//! Dynamic values decoded from candidate literals.

pub mod parse;
pub mod value;

pub use parse::{parse_candidates, ParseError};
pub use value::{DynValue, Number, Shape, ValueError};
