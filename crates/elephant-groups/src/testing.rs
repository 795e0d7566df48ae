//! Test support: invariant checks and a reference enumeration.
//!
//! Used by the unit, integration and property tests, and available to
//! downstream crates that want to validate results they received over the
//! wire.

use std::collections::HashSet;

use crate::combinatorics::binomial;
use crate::model::GroupingResult;
use crate::solver::covers;

/// Check every structural invariant of a [`GroupingResult`].
///
/// Returns a description of the first violation found.
///
/// Checked:
/// - `k == min_groups / 2` and `encodings_count == C(min_groups, k)`
/// - `min_groups` is the smallest covering length
/// - one member list per group, strictly ascending, ids in `1..=num_elephants`
/// - when encodings cover all items: every item is in exactly `k` groups and
///   no two items share a membership pattern
pub fn check_invariants(result: &GroupingResult) -> Result<(), String> {
    let n = result.num_elephants;
    let g = result.min_groups;

    if result.k != g / 2 {
        return Err(format!("k = {} but min_groups / 2 = {}", result.k, g / 2));
    }
    let expected = binomial(g.into(), result.k.into());
    if u128::from(result.encodings_count) != expected {
        return Err(format!(
            "encodings_count = {} but C({g}, {}) = {expected}",
            result.encodings_count, result.k
        ));
    }
    if !covers(g, n) {
        return Err(format!("{g} groups do not cover {n} items"));
    }
    if g > 0 && covers(g - 1, n) {
        return Err(format!("{} groups already cover {n} items", g - 1));
    }
    if result.groups.len() != g as usize {
        return Err(format!("{} member lists for {g} groups", result.groups.len()));
    }

    for (idx, members) in result.groups.iter().enumerate() {
        if !members.windows(2).all(|w| w[0] < w[1]) {
            return Err(format!("group {idx} is not strictly ascending: {members:?}"));
        }
        if let Some(&bad) = members.iter().find(|&&id| id == 0 || id > n) {
            return Err(format!("group {idx} contains out-of-range id {bad}"));
        }
    }

    if result.encodings_count >= n {
        let mut patterns = HashSet::new();
        for item in 1..=n {
            let pattern = result.memberships(item);
            if pattern.len() != result.k as usize {
                return Err(format!(
                    "item {item} is in {} groups, expected {}",
                    pattern.len(),
                    result.k
                ));
            }
            if !patterns.insert(pattern) {
                return Err(format!("item {item} shares its membership pattern"));
            }
        }
    }

    Ok(())
}

/// Encodings produced by scanning every value below `2^len`, rendering it as
/// a zero-padded binary string and keeping those with `weight` ones.
///
/// Slow on purpose; this is the yardstick the fast enumerator is compared
/// against.
///
/// # Panics
///
/// Panics if `len >= 32`.
pub fn reference_encodings(len: u32, weight: u32) -> Vec<String> {
    assert!(len < 32, "reference enumeration is for small lengths only");
    (0..1u64 << len)
        .map(|v| {
            let s = format!("{:b}", v);
            if len == 0 {
                String::new()
            } else {
                format!("{s:0>width$}", width = len as usize)
            }
        })
        .filter(|s| s.bytes().filter(|&b| b == b'1').count() == weight as usize)
        .collect()
}

/// Groups derived directly from [`reference_encodings`] with the
/// string-position rule.
///
/// # Panics
///
/// Panics if `min_groups >= 32`.
pub fn reference_groups(num_elephants: u64, min_groups: u32) -> Vec<Vec<u64>> {
    let encodings = reference_encodings(min_groups, min_groups / 2);
    (0..min_groups as usize)
        .map(|g| {
            encodings
                .iter()
                .take(num_elephants as usize)
                .zip(1u64..)
                .filter(|(encoding, _)| encoding.as_bytes()[g] == b'1')
                .map(|(_, item)| item)
                .collect()
        })
        .collect()
}
