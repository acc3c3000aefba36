use std::borrow::Cow;

use casegrid_ir::{DynValue, Shape};

use crate::error::AssignError;

/// A destination type that can be built from a [`DynValue`].
pub trait FromDynamic: Sized {
    /// Static type name used in error messages.
    fn type_name() -> Cow<'static, str>;

    fn from_dynamic(value: &DynValue) -> Result<Self, AssignError>;
}

/// A mapping key type. Decoded mapping keys are always strings.
pub trait FromMapKey: FromDynamic {
    fn from_key(key: &str) -> Result<Self, AssignError>;
}

/// Write `source` into `destination`.
///
/// The new value is fully built before the destination is replaced; on
/// error the destination keeps its previous value.
pub fn assign<T: FromDynamic>(source: &DynValue, destination: &mut T) -> Result<(), AssignError> {
    *destination = T::from_dynamic(source)?;
    Ok(())
}

pub(crate) fn conversion<T: FromDynamic>(value: &DynValue) -> AssignError {
    AssignError::Conversion {
        value: value.to_string(),
        source_type: value.type_name(),
        dest_type: T::type_name().into_owned(),
    }
}

pub(crate) fn shape_mismatch<T: FromDynamic>(expected: Shape, value: &DynValue) -> AssignError {
    AssignError::ShapeMismatch {
        expected,
        found: value.shape(),
        source_type: value.type_name(),
        dest_type: T::type_name().into_owned(),
    }
}

impl FromDynamic for DynValue {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("DynValue")
    }

    fn from_dynamic(value: &DynValue) -> Result<Self, AssignError> {
        Ok(value.clone())
    }
}
