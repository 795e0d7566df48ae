//! Value types flowing through the pipeline.
//!
//! - [`ItemCount`] - validated number of items to distinguish
//! - [`GroupingResult`] - the computed scheme, serialised with the host's
//!   camelCase field names
//! - [`IntoItemCount`] - conversion from the raw values callers hold

use std::fmt;
use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use crate::error::{GroupingError, Result};

// =============================================================================
// ItemCount
// =============================================================================

/// Number of items to distinguish. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct ItemCount(NonZeroU64);

impl ItemCount {
    /// Validate a raw count.
    ///
    /// # Errors
    ///
    /// [`GroupingError::InvalidItemCount`] when `count == 0`.
    pub fn new(count: u64) -> Result<Self> {
        NonZeroU64::new(count)
            .map(Self)
            .ok_or_else(|| GroupingError::invalid_count(count))
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for ItemCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<u64> for ItemCount {
    type Error = GroupingError;

    fn try_from(value: u64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ItemCount> for u64 {
    fn from(value: ItemCount) -> Self {
        value.get()
    }
}

// =============================================================================
// IntoItemCount
// =============================================================================

/// Conversion of caller-held values into a validated [`ItemCount`].
///
/// Implemented for every primitive integer and float type, for JSON numbers
/// and values, and for `ItemCount` itself. Anything that is not a positive
/// integer fails with [`GroupingError::InvalidItemCount`].
pub trait IntoItemCount {
    fn into_item_count(self) -> Result<ItemCount>;
}

impl IntoItemCount for ItemCount {
    #[inline]
    fn into_item_count(self) -> Result<ItemCount> {
        Ok(self)
    }
}

macro_rules! impl_into_item_count_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoItemCount for $ty {
                fn into_item_count(self) -> Result<ItemCount> {
                    let count = u64::try_from(self)
                        .map_err(|_| GroupingError::invalid_count(self))?;
                    ItemCount::new(count)
                }
            }
        )*
    };
}

impl_into_item_count_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_into_item_count_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoItemCount for $ty {
                fn into_item_count(self) -> Result<ItemCount> {
                    // `as` saturates at u64::MAX; 2^64 and up must not get there.
                    if !self.is_finite()
                        || self.fract() != 0.0
                        || self < 1.0
                        || self >= 18_446_744_073_709_551_616.0
                    {
                        return Err(GroupingError::invalid_count(self));
                    }
                    ItemCount::new(self as u64)
                }
            }
        )*
    };
}

impl_into_item_count_float!(f32, f64);

impl IntoItemCount for &serde_json::Number {
    fn into_item_count(self) -> Result<ItemCount> {
        if let Some(count) = self.as_u64() {
            return ItemCount::new(count);
        }
        if self.as_i64().is_some() {
            return Err(GroupingError::invalid_count(self));
        }
        match self.as_f64() {
            Some(value) => value
                .into_item_count()
                .map_err(|_| GroupingError::invalid_count(self)),
            None => Err(GroupingError::invalid_count(self)),
        }
    }
}

impl IntoItemCount for &serde_json::Value {
    fn into_item_count(self) -> Result<ItemCount> {
        match self {
            serde_json::Value::Number(number) => number.into_item_count(),
            other => Err(GroupingError::invalid_count(other)),
        }
    }
}

// =============================================================================
// GroupingResult
// =============================================================================

/// A minimal balanced grouping of `num_elephants` items.
///
/// `groups[g]` lists, in ascending order, the 1-based ids of the items whose
/// encoding has a `1` at string position `g`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupingResult {
    pub num_elephants: u64,
    pub min_groups: u32,
    pub k: u32,
    /// Number of generated encodings, `C(min_groups, k)`.
    #[serde(alias = "encodings")]
    pub encodings_count: u64,
    pub groups: Vec<Vec<u64>>,
}

impl GroupingResult {
    /// Members of group `g`, or `None` if `g >= min_groups`.
    #[inline]
    pub fn group(&self, g: usize) -> Option<&[u64]> {
        self.groups.get(g).map(Vec::as_slice)
    }

    /// Indices of the groups containing `item` (1-based id), ascending.
    ///
    /// Together these indices are the item's membership pattern.
    pub fn memberships(&self, item: u64) -> Vec<usize> {
        self.groups
            .iter()
            .enumerate()
            .filter(|(_, members)| members.binary_search(&item).is_ok())
            .map(|(g, _)| g)
            .collect()
    }
}
