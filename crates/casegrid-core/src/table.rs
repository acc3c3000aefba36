//! Field registration and the decoded candidate table.

use std::collections::HashSet;
use std::fmt;

use casegrid_assign::{assign, AssignError, FromDynamic};
use casegrid_ir::{parse_candidates, DynValue};

use crate::config::GeneratorConfig;
use crate::error::{ConfigError, GenError};

type Setter<'a, R> = Box<dyn Fn(&mut R, &DynValue) -> Result<(), AssignError> + 'a>;

struct FieldSpec<'a, R> {
    id: String,
    literal: String,
    setter: Setter<'a, R>,
}

/// Ordered registration of a record's candidate fields.
///
/// Each field pairs an identifier, a candidate literal (JSON array) and an
/// accessor returning the field's storage. Registration order is
/// enumeration order: the first field varies slowest.
///
/// `'a` bounds the accessors, not the record's other fields, so records
/// holding borrowed data can register their owned fields.
pub struct CaseFields<'a, R> {
    specs: Vec<FieldSpec<'a, R>>,
}

impl<'a, R: 'a> CaseFields<'a, R> {
    pub fn new() -> Self {
        Self { specs: Vec::new() }
    }

    pub fn field<T, F>(mut self, id: impl Into<String>, literal: impl Into<String>, accessor: F) -> Self
    where
        T: FromDynamic + 'a,
        F: Fn(&mut R) -> &mut T + 'a,
    {
        self.specs.push(FieldSpec {
            id: id.into(),
            literal: literal.into(),
            setter: Box::new(move |record: &mut R, value: &DynValue| {
                assign(value, accessor(record))
            }),
        });
        self
    }
}

impl<R> CaseFields<'_, R> {
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl<'a, R: 'a> Default for CaseFields<'a, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for CaseFields<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.specs.iter().map(|s| (&s.id, &s.literal)))
            .finish()
    }
}

/// Records that declare their own candidate fields.
pub trait CaseTable: Sized {
    fn case_fields<'a>() -> CaseFields<'a, Self>
    where
        Self: 'a;
}

/// Build a [`CaseFields`] from `field: "literal"` pairs, using each field's
/// name as its identifier.
///
/// ```
/// use casegrid_core::case_fields;
///
/// struct Case { enabled: bool, size: u8 }
///
/// let fields = case_fields!(Case {
///     enabled: "[true, false]",
///     size: "[1, 2, 3]",
/// });
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! case_fields {
    ($record:ty { $($field:ident : $literal:expr),* $(,)? }) => {
        $crate::table::CaseFields::<$record>::new()
            $(.field(stringify!($field), $literal, |r: &mut $record| &mut r.$field))*
    };
}

/// One candidate field: its identifier, decoded candidates and setter.
pub struct FieldEntry<'a, R> {
    id: String,
    candidates: Vec<DynValue>,
    setter: Setter<'a, R>,
}

impl<R> FieldEntry<'_, R> {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn candidates(&self) -> &[DynValue] {
        &self.candidates
    }

    fn write(&self, record: &mut R, index: usize) -> Result<(), GenError> {
        let value = &self.candidates[index];
        tracing::trace!(field = %self.id, index, %value, "assign candidate");
        (self.setter)(record, value).map_err(|source| GenError::Assign {
            field: self.id.clone(),
            source,
        })
    }
}

impl<R> fmt::Debug for FieldEntry<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldEntry")
            .field("id", &self.id)
            .field("candidates", &self.candidates)
            .finish()
    }
}

/// Decoded candidates for every registered field, in registration order.
/// Immutable once built.
#[derive(Debug)]
pub struct CandidateTable<'a, R> {
    entries: Vec<FieldEntry<'a, R>>,
    total: u64,
}

impl<'a, R> CandidateTable<'a, R> {
    /// Decode every field's literal and check the table against `config`.
    pub fn build(fields: CaseFields<'a, R>, config: &GeneratorConfig) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(fields.specs.len());

        for spec in fields.specs {
            if !seen.insert(spec.id.clone()) {
                return Err(ConfigError::DuplicateField { field: spec.id });
            }
            let candidates =
                parse_candidates(&spec.literal).map_err(|source| ConfigError::Decode {
                    field: spec.id.clone(),
                    source,
                })?;
            entries.push(FieldEntry {
                id: spec.id,
                candidates,
                setter: spec.setter,
            });
        }

        let total = entries
            .iter()
            .try_fold(1u64, |acc, e| acc.checked_mul(e.candidates.len() as u64))
            .ok_or(ConfigError::CombinationOverflow)?;

        if let Some(limit) = config.max_combinations {
            if total > limit {
                return Err(ConfigError::TooManyCombinations { total, limit });
            }
        }

        tracing::debug!(fields = entries.len(), total, "built candidate table");
        Ok(Self { entries, total })
    }

    /// A table with no fields.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            total: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[FieldEntry<'a, R>] {
        &self.entries
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(FieldEntry::id)
    }

    pub fn candidate_counts(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.candidates.len()).collect()
    }

    /// Number of combinations the table enumerates. Zero when there are no
    /// fields or any field has no candidates.
    pub fn total_combinations(&self) -> u64 {
        if self.entries.is_empty() {
            0
        } else {
            self.total
        }
    }

    pub(crate) fn write(&self, record: &mut R, entry: usize, index: usize) -> Result<(), GenError> {
        self.entries[entry].write(record, index)
    }
}
