//! Fixed-weight bit-string encodings.
//!
//! An [`Encoding`] is a bit-string of `len` digits. String position 0 is the
//! most significant bit, so `Encoding::new(0b01, 2)` renders as `"01"` and is
//! set at position 1 only.
//!
//! [`encodings`] yields every encoding of a given length and weight in
//! ascending numeric order. This is the same sequence a scan over
//! `0..2^len` filtered by weight would produce; the iterator steps directly
//! from one weight-`k` value to the next larger one instead of rejecting the
//! values in between.

use std::fmt;
use std::iter::FusedIterator;

/// Longest representable encoding.
pub const MAX_LENGTH: u32 = 63;

// =============================================================================
// Encoding
// =============================================================================

/// One item's group membership pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Encoding {
    bits: u64,
    len: u32,
}

impl Encoding {
    /// Create an encoding of `len` digits.
    ///
    /// Returns `None` if `len > MAX_LENGTH` or `bits` needs more than `len`
    /// digits.
    pub fn new(bits: u64, len: u32) -> Option<Self> {
        if len > MAX_LENGTH || bits >= 1u64 << len {
            return None;
        }
        Some(Self { bits, len })
    }

    #[inline]
    pub fn bits(self) -> u64 {
        self.bits
    }

    /// Number of digits.
    #[inline]
    pub fn len(self) -> u32 {
        self.len
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Number of `1` digits.
    #[inline]
    pub fn weight(self) -> u32 {
        self.bits.count_ones()
    }

    /// Whether the digit at string `position` is `1`.
    ///
    /// Positions outside `0..len` are never set.
    #[inline]
    pub fn is_set(self, position: u32) -> bool {
        position < self.len && (self.bits >> (self.len - 1 - position)) & 1 == 1
    }

    /// String positions holding a `1`, ascending.
    pub fn positions(self) -> impl Iterator<Item = u32> {
        (0..self.len).filter(move |&p| self.is_set(p))
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `{:00b}` would still print a single "0".
        if self.len == 0 {
            return Ok(());
        }
        write!(f, "{:0width$b}", self.bits, width = self.len as usize)
    }
}

// =============================================================================
// Encodings
// =============================================================================

/// All encodings of a fixed length and weight, ascending by numeric value.
///
/// The iterator holds only the next value; clone it to restart from the
/// current point, or call [`encodings`] again to start over.
#[derive(Debug, Clone)]
pub struct Encodings {
    len: u32,
    weight: u32,
    next: Option<u64>,
}

/// Enumerate every `len`-digit encoding with exactly `weight` ones.
///
/// The sequence has `C(len, weight)` elements. It is empty when
/// `weight > len` or `len > MAX_LENGTH`.
///
/// # Example
///
/// ```
/// use elephant_groups::encoding::encodings;
///
/// let rendered: Vec<String> = encodings(3, 2).map(|e| e.to_string()).collect();
/// assert_eq!(rendered, ["011", "101", "110"]);
/// ```
pub fn encodings(len: u32, weight: u32) -> Encodings {
    let next = if weight > len || len > MAX_LENGTH {
        None
    } else {
        // weight <= 63 here, so the shift cannot overflow
        Some((1u64 << weight) - 1)
    };
    Encodings { len, weight, next }
}

impl Encodings {
    /// Length of every encoding in the sequence.
    #[inline]
    pub fn length(&self) -> u32 {
        self.len
    }

    #[inline]
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Smallest value above `v` with the same number of ones, if it still
    /// fits in `len` digits.
    fn successor(&self, v: u64) -> Option<u64> {
        if v == 0 {
            return None;
        }
        let lowest = v & v.wrapping_neg();
        let ripple = v.checked_add(lowest)?;
        let next = (((ripple ^ v) >> 2) / lowest) | ripple;
        (next < 1u64 << self.len).then_some(next)
    }
}

impl Iterator for Encodings {
    type Item = Encoding;

    fn next(&mut self) -> Option<Encoding> {
        let current = self.next?;
        self.next = self.successor(current);
        Some(Encoding {
            bits: current,
            len: self.len,
        })
    }
}

impl FusedIterator for Encodings {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinatorics::binomial;

    fn rendered(len: u32, weight: u32) -> Vec<String> {
        encodings(len, weight).map(|e| e.to_string()).collect()
    }

    /// Scan every value below 2^len and keep those of the right weight.
    fn scanned(len: u32, weight: u32) -> Vec<String> {
        (0..1u64 << len)
            .map(|v| {
                if len == 0 {
                    String::new()
                } else {
                    format!("{:0width$b}", v, width = len as usize)
                }
            })
            .filter(|s| s.chars().filter(|&c| c == '1').count() == weight as usize)
            .collect()
    }

    #[test]
    fn empty_length_has_one_empty_encoding() {
        assert_eq!(rendered(0, 0), vec![String::new()]);
    }

    #[test]
    fn length_two_weight_one() {
        assert_eq!(rendered(2, 1), ["01", "10"]);
    }

    #[test]
    fn length_four_weight_two() {
        assert_eq!(rendered(4, 2), ["0011", "0101", "0110", "1001", "1010", "1100"]);
    }

    #[test]
    fn matches_filtered_scan() {
        for len in 0..=12 {
            for weight in 0..=len {
                assert_eq!(rendered(len, weight), scanned(len, weight), "len={len} weight={weight}");
            }
        }
    }

    #[test]
    fn count_matches_binomial() {
        for len in 0..=16u32 {
            for weight in 0..=len {
                let count = encodings(len, weight).count() as u128;
                assert_eq!(count, binomial(len.into(), weight.into()));
            }
        }
    }

    #[test]
    fn full_weight_and_max_length() {
        assert_eq!(rendered(5, 5), ["11111"]);
        let all: Vec<_> = encodings(MAX_LENGTH, MAX_LENGTH).collect();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].weight(), MAX_LENGTH);

        let ones: Vec<_> = encodings(MAX_LENGTH, 1).collect();
        assert_eq!(ones.len(), MAX_LENGTH as usize);
        assert_eq!(ones.last().unwrap().bits(), 1u64 << 62);
    }

    #[test]
    fn out_of_range_is_empty() {
        assert_eq!(encodings(3, 4).count(), 0);
        assert_eq!(encodings(MAX_LENGTH + 1, 1).count(), 0);
    }

    #[test]
    fn restartable_by_clone() {
        let mut iter = encodings(4, 2);
        iter.next();
        let snapshot = iter.clone();
        let rest: Vec<_> = iter.collect();
        let again: Vec<_> = snapshot.collect();
        assert_eq!(rest, again);
        assert_eq!(rest.len(), 5);
    }

    #[test]
    fn positions_follow_string_order() {
        let enc = Encoding::new(0b0110, 4).unwrap();
        assert_eq!(enc.to_string(), "0110");
        assert!(!enc.is_set(0));
        assert!(enc.is_set(1));
        assert!(enc.is_set(2));
        assert!(!enc.is_set(3));
        assert!(!enc.is_set(4));
        assert_eq!(enc.positions().collect::<Vec<_>>(), [1, 2]);
        assert_eq!(enc.weight(), 2);
    }

    #[test]
    fn new_rejects_overlong_bits() {
        assert!(Encoding::new(0b100, 2).is_none());
        assert!(Encoding::new(0, MAX_LENGTH + 1).is_none());
        assert!(Encoding::new(0, 0).unwrap().is_empty());
    }
}
