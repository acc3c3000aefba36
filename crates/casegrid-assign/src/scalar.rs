//! Scalar conversions.
//!
//! Numeric conversions are exact: a value that cannot be represented in
//! the destination type without losing information (fractional part, out
//! of range, integer beyond float precision) is a conversion error.

use std::borrow::Cow;

use casegrid_ir::{DynValue, Number};

use crate::assign::{conversion, FromDynamic, FromMapKey};
use crate::error::AssignError;

impl FromDynamic for bool {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("bool")
    }

    fn from_dynamic(value: &DynValue) -> Result<Self, AssignError> {
        value.as_bool().ok_or_else(|| conversion::<Self>(value))
    }
}

impl FromDynamic for String {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("String")
    }

    fn from_dynamic(value: &DynValue) -> Result<Self, AssignError> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| conversion::<Self>(value))
    }
}

impl FromMapKey for String {
    fn from_key(key: &str) -> Result<Self, AssignError> {
        Ok(key.to_owned())
    }
}

impl FromDynamic for char {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("char")
    }

    fn from_dynamic(value: &DynValue) -> Result<Self, AssignError> {
        let s = value.as_str().ok_or_else(|| conversion::<Self>(value))?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(conversion::<Self>(value)),
        }
    }
}

macro_rules! impl_integer {
    ($view:ident => $($t:ty),*) => {$(
        impl FromDynamic for $t {
            fn type_name() -> Cow<'static, str> {
                Cow::Borrowed(stringify!($t))
            }

            fn from_dynamic(value: &DynValue) -> Result<Self, AssignError> {
                value
                    .as_number()
                    .and_then(|n| n.$view())
                    .and_then(|n| <$t>::try_from(n).ok())
                    .ok_or_else(|| conversion::<Self>(value))
            }
        }

        impl FromMapKey for $t {
            fn from_key(key: &str) -> Result<Self, AssignError> {
                key.parse::<$t>().map_err(|_| AssignError::Conversion {
                    value: format!("{key:?}"),
                    source_type: "string",
                    dest_type: stringify!($t).to_string(),
                })
            }
        }
    )*};
}

impl_integer!(as_i128 => i8, i16, i32, i64, i128, isize);
impl_integer!(as_u128 => u8, u16, u32, u64, u128, usize);

/// Integers must survive the round trip through the float unchanged.
fn exact_f64(n: Number) -> Option<f64> {
    match n {
        Number::Float(f) => Some(f),
        Number::Int(i) => {
            let f = i as f64;
            (f as i128 == i128::from(i)).then_some(f)
        }
        Number::UInt(u) => {
            let f = u as f64;
            (f as u128 == u128::from(u)).then_some(f)
        }
    }
}

impl FromDynamic for f64 {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("f64")
    }

    fn from_dynamic(value: &DynValue) -> Result<Self, AssignError> {
        value
            .as_number()
            .and_then(exact_f64)
            .ok_or_else(|| conversion::<Self>(value))
    }
}

impl FromDynamic for f32 {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("f32")
    }

    fn from_dynamic(value: &DynValue) -> Result<Self, AssignError> {
        let narrowed = value.as_number().and_then(|n| match n {
            Number::Float(f) => {
                // Rounding to the nearest f32 is fine; overflow, underflow to
                // zero and subnormal precision loss are not.
                let x = f as f32;
                let error = (f64::from(x) - f).abs();
                (x.is_finite() && error <= f.abs() * f64::from(f32::EPSILON)).then_some(x)
            }
            Number::Int(i) => {
                let x = i as f32;
                (x as i128 == i128::from(i)).then_some(x)
            }
            Number::UInt(u) => {
                let x = u as f32;
                (x as u128 == u128::from(u)).then_some(x)
            }
        });
        narrowed.ok_or_else(|| conversion::<Self>(value))
    }
}
