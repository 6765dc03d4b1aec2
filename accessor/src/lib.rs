//! # Bounded Array Accessor
//!
//! A fixed-size integer array with a total read operation: every index in
//! the signed-integer domain either selects an element or yields the
//! sentinel `0`. No input can produce a read outside the backing storage.
//!
//! Works with both:
//! - `cargo build/test` - specs stripped, compiles as pure Rust
//! - `verus` - the `ensures` clauses on every read are proven
//!
//! ## Why the check is widened
//!
//! A bounds check written as `index >= 0 && index < N` on a narrow type can
//! be falsified when `index` came out of an overflowing addition upstream.
//! Both comparisons here run on a type at least twice as wide as the index,
//! so no caller-supplied value can wrap inside the check itself.
//!
//! ## Usage
//!
//! ```rust
//! use bounded_accessor::{BoundedArray, Fill};
//!
//! let arr = BoundedArray::new(Fill::OneBased);
//! assert_eq!(arr.get(0), 1);
//! assert_eq!(arr.get(199), 200);
//! assert_eq!(arr.get(i32::MAX), 0);
//! ```

// Verus requires explicit arithmetic (e.g., `x = x + 1`) for verification specs
#![allow(clippy::assign_op_pattern)]
// Default impls can't be derived inside verus! macro blocks
#![allow(clippy::new_without_default)]

use std::fmt;

use verus_builtin_macros::verus;

verus! {

// ============================================================================
// CONSTANTS
// ============================================================================

/// Number of elements in the backing array.
pub const ARRAY_SIZE: usize = 200;

/// Value returned for any index outside `[0, ARRAY_SIZE)`.
pub const SENTINEL: i32 = 0;

// ============================================================================
// INITIAL CONTENT
// ============================================================================

/// Initial content of the backing array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fill {
    /// Element `i` holds `i + 1`: `[1, 2, ..., 200]`
    OneBased,
    /// Element `i` holds `i`: `[0, 1, ..., 199]`
    ZeroBased,
}

impl Fill {
    /// Specification: the value stored at position `i`.
    pub open spec fn value_at_spec(self, i: int) -> int {
        match self {
            Fill::OneBased => i + 1,
            Fill::ZeroBased => i,
        }
    }

    /// Value stored at position `i` for this fill.
    pub fn value_at(self, i: usize) -> (v: i32)
        requires i < ARRAY_SIZE,
        ensures v as int == self.value_at_spec(i as int),
    {
        match self {
            Fill::OneBased => i as i32 + 1,
            Fill::ZeroBased => i as i32,
        }
    }
}

// ============================================================================
// ACCESSOR
// ============================================================================
//
// Key property: `get` and `get_wide` are total. In-bounds indices return the
// stored element, everything else returns SENTINEL.

/// Immutable fixed-size array with bounds-checked reads.
pub struct BoundedArray {
    data: [i32; ARRAY_SIZE],
    fill: Fill,
}

impl BoundedArray {
    /// Specification: is `index` a valid position?
    pub open spec fn in_bounds(index: int) -> bool {
        0 <= index && index < ARRAY_SIZE as int
    }

    /// Specification: the array still holds its initial content.
    pub open spec fn valid(&self) -> bool {
        forall|i: int|
            0 <= i < ARRAY_SIZE as int ==> self.data[i] as int == self.fill.value_at_spec(i)
    }

    /// Build the array with the given initial content.
    pub fn new(fill: Fill) -> (arr: Self)
        ensures
            arr.valid(),
            arr.fill == fill,
    {
        let mut data = [SENTINEL; ARRAY_SIZE];
        let mut i: usize = 0;
        while i < ARRAY_SIZE
            invariant
                i <= ARRAY_SIZE,
                forall|j: int| 0 <= j < i as int ==> data[j] as int == fill.value_at_spec(j),
            decreases ARRAY_SIZE - i,
        {
            data[i] = fill.value_at(i);
            i = i + 1;
        }
        BoundedArray { data, fill }
    }

    /// Number of elements.
    pub fn len(&self) -> (l: usize)
        ensures l == ARRAY_SIZE,
    {
        ARRAY_SIZE
    }

    /// Always false; the array has a fixed, non-zero length.
    pub fn is_empty(&self) -> (empty: bool)
        ensures !empty,
    {
        false
    }

    /// The fill this array was built with.
    pub fn fill(&self) -> (f: Fill)
        ensures f == self.fill,
    {
        self.fill
    }

    /// Bounds predicate over the 64-bit index domain, evaluated in `i128`.
    pub fn contains(&self, index: i64) -> (result: bool)
        ensures result == Self::in_bounds(index as int),
    {
        let wide = index as i128;
        0 <= wide && wide < ARRAY_SIZE as i128
    }

    /// Read the element at `index`, or `SENTINEL` if `index` is out of range.
    ///
    /// The index is widened to `i64` before either comparison, so the check
    /// holds for every `i32` including `i32::MIN` and `i32::MAX`.
    pub fn get(&self, index: i32) -> (value: i32)
        ensures
            Self::in_bounds(index as int) ==> value == self.data[index as int],
            !Self::in_bounds(index as int) ==> value == SENTINEL,
    {
        let wide = index as i64;
        if 0 <= wide && wide < ARRAY_SIZE as i64 {
            self.data[wide as usize]
        } else {
            SENTINEL
        }
    }

    /// Read with a 64-bit index. Same contract as [`BoundedArray::get`].
    pub fn get_wide(&self, index: i64) -> (value: i32)
        ensures
            Self::in_bounds(index as int) ==> value == self.data[index as int],
            !Self::in_bounds(index as int) ==> value == SENTINEL,
    {
        if self.contains(index) {
            self.data[index as usize]
        } else {
            SENTINEL
        }
    }
}

} // verus!

impl BoundedArray {
    /// Backing storage as a slice.
    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }
}

impl Default for BoundedArray {
    fn default() -> Self {
        Self::new(Fill::OneBased)
    }
}

impl Default for Fill {
    fn default() -> Self {
        Fill::OneBased
    }
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fill::OneBased => write!(f, "one-based"),
            Fill::ZeroBased => write!(f, "zero-based"),
        }
    }
}

// ============================================================================
// TESTS - Run with `cargo test`
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_reads_one_based() {
        let arr = BoundedArray::new(Fill::OneBased);
        assert_eq!(arr.get(0), 1);
        assert_eq!(arr.get(199), 200);
        assert_eq!(arr.get(200), 0);
        assert_eq!(arr.get(-1), 0);
        assert_eq!(arr.get(2147483647), 0);
        assert_eq!(arr.get(-2147483648), 0);
    }

    #[test]
    fn test_every_valid_index() {
        let one = BoundedArray::new(Fill::OneBased);
        let zero = BoundedArray::new(Fill::ZeroBased);
        for i in 0..ARRAY_SIZE as i32 {
            assert_eq!(one.get(i), i + 1);
            assert_eq!(zero.get(i), i);
        }
    }

    #[test]
    fn test_zero_based_edges() {
        let arr = BoundedArray::new(Fill::ZeroBased);
        assert_eq!(arr.get(0), 0);
        assert_eq!(arr.get(199), 199);
        assert_eq!(arr.get(200), SENTINEL);
        assert_eq!(arr.fill(), Fill::ZeroBased);
    }

    #[test]
    fn test_get_is_idempotent() {
        let arr = BoundedArray::default();
        for index in [-1, 0, 57, 199, 200, i32::MAX] {
            assert_eq!(arr.get(index), arr.get(index));
        }
    }

    #[test]
    fn test_wrapped_index_stays_in_bounds() {
        // i32::MAX + 100 with wraparound lands far below zero
        let arr = BoundedArray::default();
        let wrapped = i32::MAX.wrapping_add(100);
        assert_eq!(wrapped, -2147483549);
        assert_eq!(arr.get(wrapped), 0);
        assert_eq!(arr.get(i32::MIN.wrapping_sub(1)), 0);
    }

    #[test]
    fn test_get_wide_extremes() {
        let arr = BoundedArray::default();
        assert_eq!(arr.get_wide(0), 1);
        assert_eq!(arr.get_wide(199), 200);
        assert_eq!(arr.get_wide(200), 0);
        assert_eq!(arr.get_wide(-1), 0);
        assert_eq!(arr.get_wide(1 << 31), 0);
        assert_eq!(arr.get_wide(-(1 << 31) - 1), 0);
        assert_eq!(arr.get_wide(i64::MAX), 0);
        assert_eq!(arr.get_wide(i64::MIN), 0);
    }

    #[test]
    fn test_contains() {
        let arr = BoundedArray::default();
        assert!(arr.contains(0));
        assert!(arr.contains(199));
        assert!(!arr.contains(200));
        assert!(!arr.contains(-1));
        assert!(!arr.contains(i64::MIN));
        assert!(!arr.contains(i64::MAX));
    }

    #[test]
    fn test_sweep_full_i32_domain() {
        let arr = BoundedArray::default();
        let elements = arr.as_slice();
        let mut index = i32::MIN;
        loop {
            let value = arr.get(index);
            assert!(value == SENTINEL || elements.contains(&value));
            match index.checked_add(65_521) {
                Some(next) => index = next,
                None => break,
            }
        }
        assert_eq!(arr.get(i32::MAX), SENTINEL);
    }

    #[test]
    fn test_len_and_slice() {
        let arr = BoundedArray::new(Fill::ZeroBased);
        assert_eq!(arr.len(), ARRAY_SIZE);
        assert!(!arr.is_empty());
        assert_eq!(arr.as_slice().len(), ARRAY_SIZE);
        assert_eq!(arr.as_slice()[42], 42);
    }

    #[test]
    fn test_fill_display() {
        assert_eq!(Fill::OneBased.to_string(), "one-based");
        assert_eq!(Fill::ZeroBased.to_string(), "zero-based");
        assert_eq!(Fill::default(), Fill::OneBased);
    }
}
