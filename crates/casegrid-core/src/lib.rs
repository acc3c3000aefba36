//! Cartesian-product test case generation.
//!
//! A [`Generator`] walks the candidate lists registered for a record's
//! fields in odometer order, writing each combination into the record in
//! place:
//!
//! ```
//! use casegrid_core::{generate_cases, CaseFields, CaseTable};
//!
//! #[derive(Debug, Default, Clone, PartialEq)]
//! struct Case {
//!     enabled: bool,
//!     size: i32,
//! }
//!
//! impl CaseTable for Case {
//!     fn case_fields<'a>() -> CaseFields<'a, Self>
//!     where
//!         Self: 'a,
//!     {
//!         CaseFields::new()
//!             .field("enabled", "[true, false]", |c: &mut Case| &mut c.enabled)
//!             .field("size", "[1, 2]", |c: &mut Case| &mut c.size)
//!     }
//! }
//!
//! let mut case = Case::default();
//! let mut seen = Vec::new();
//! let mut gen = generate_cases(&mut case);
//! while gen.next() {
//!     seen.push(gen.record().clone());
//! }
//! assert_eq!(seen.len(), 4);
//! assert_eq!(seen[1], Case { enabled: true, size: 2 });
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod odometer;
pub mod sink;
pub mod table;

pub use config::GeneratorConfig;
pub use error::{ConfigError, GenError};
pub use generator::{generate_cases, Generator};
pub use odometer::Odometer;
pub use sink::{CollectingSink, FailureSink, PanicSink};
pub use table::{CandidateTable, CaseFields, CaseTable, FieldEntry};
