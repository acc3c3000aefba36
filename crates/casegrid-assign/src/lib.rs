//! Type-directed conversion of dynamic candidate values into typed fields.
//!
//! Each destination type implements [`FromDynamic`]. Scalars convert
//! directly, sequences and mappings recurse through their element types and
//! always build a fresh container, so no two assignments share storage.

pub mod assign;
pub mod container;
pub mod error;
pub mod scalar;

pub use assign::{assign, FromDynamic, FromMapKey};
pub use error::{AssignError, Segment};
