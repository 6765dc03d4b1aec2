//! FAILURE: Overflowing "sanitization" of an index
//!
//! Run: verus accessor/failures/01_overflowing_sanitizer.rs
//!
//! Expected error: "possible arithmetic underflow/overflow"
//!
//! `b + 100` overflows for `b > i32::MAX - 100`. A C++ optimizer may assume
//! it never does and conclude `b` is 0 or 1 afterwards, deleting the bounds
//! check in the read below. Verus refuses the addition outright.
//!
//! FIX: Compute the offset with `checked_add` (or in a wider type) and let
//! the read do its own widened bounds check.

use vstd::prelude::*;

verus! {

const ARRAY_SIZE: usize = 200;

fn read_if_small(arr: &[i32; ARRAY_SIZE], b: i32) -> i32 {
    if b < 0 {
        return 0;
    }
    let b_plus_100 = b + 100;  // ERROR: Could overflow if b > i32::MAX - 100
    if b_plus_100 > 101 {
        return 0;
    }
    arr[b as usize]
}

// Uncomment to see the fix:
// fn read_if_small(arr: &[i32; ARRAY_SIZE], b: i32) -> i32 {
//     if b < 0 || b as i64 + 100 > 101 {
//         return 0;
//     }
//     arr[b as usize]
// }

fn main() {}

}
