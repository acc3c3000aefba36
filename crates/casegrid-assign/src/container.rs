//! Sequence and mapping conversions.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::{BuildHasher, Hash};

use casegrid_ir::{DynValue, Shape};

use crate::assign::{shape_mismatch, FromDynamic, FromMapKey};
use crate::error::{AssignError, Segment};

fn expect_seq<'v, T: FromDynamic>(value: &'v DynValue) -> Result<&'v [DynValue], AssignError> {
    value
        .as_seq()
        .ok_or_else(|| shape_mismatch::<T>(Shape::Sequence, value))
}

fn expect_map<'v, T: FromDynamic>(
    value: &'v DynValue,
) -> Result<&'v BTreeMap<String, DynValue>, AssignError> {
    value
        .as_map()
        .ok_or_else(|| shape_mismatch::<T>(Shape::Mapping, value))
}

/// Convert every element index-for-index, into a freshly allocated container.
fn convert_items<T, C>(items: &[DynValue]) -> Result<C, AssignError>
where
    T: FromDynamic,
    C: FromIterator<T>,
{
    items
        .iter()
        .enumerate()
        .map(|(i, item)| T::from_dynamic(item).map_err(|e| e.at(Segment::Index(i))))
        .collect()
}

fn convert_entries<K, V, C>(entries: &BTreeMap<String, DynValue>) -> Result<C, AssignError>
where
    K: FromMapKey,
    V: FromDynamic,
    C: FromIterator<(K, V)>,
{
    entries
        .iter()
        .map(|(k, v)| {
            let key = K::from_key(k).map_err(|e| e.at(Segment::Key(k.clone())))?;
            let value = V::from_dynamic(v).map_err(|e| e.at(Segment::Key(k.clone())))?;
            Ok((key, value))
        })
        .collect()
}

impl<T: FromDynamic> FromDynamic for Vec<T> {
    fn type_name() -> Cow<'static, str> {
        Cow::Owned(format!("Vec<{}>", T::type_name()))
    }

    fn from_dynamic(value: &DynValue) -> Result<Self, AssignError> {
        convert_items::<T, _>(expect_seq::<Self>(value)?)
    }
}

impl<T: FromDynamic> FromDynamic for VecDeque<T> {
    fn type_name() -> Cow<'static, str> {
        Cow::Owned(format!("VecDeque<{}>", T::type_name()))
    }

    fn from_dynamic(value: &DynValue) -> Result<Self, AssignError> {
        convert_items::<T, _>(expect_seq::<Self>(value)?)
    }
}

impl<K, V, S> FromDynamic for HashMap<K, V, S>
where
    K: FromMapKey + Eq + Hash,
    V: FromDynamic,
    S: BuildHasher + Default,
{
    fn type_name() -> Cow<'static, str> {
        Cow::Owned(format!("HashMap<{}, {}>", K::type_name(), V::type_name()))
    }

    fn from_dynamic(value: &DynValue) -> Result<Self, AssignError> {
        convert_entries::<K, V, _>(expect_map::<Self>(value)?)
    }
}

impl<K, V> FromDynamic for BTreeMap<K, V>
where
    K: FromMapKey + Ord,
    V: FromDynamic,
{
    fn type_name() -> Cow<'static, str> {
        Cow::Owned(format!("BTreeMap<{}, {}>", K::type_name(), V::type_name()))
    }

    fn from_dynamic(value: &DynValue) -> Result<Self, AssignError> {
        convert_entries::<K, V, _>(expect_map::<Self>(value)?)
    }
}
