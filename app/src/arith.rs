//! Index arithmetic with an explicit overflow policy
//!
//! Every addition on an index says up front what happens when the result
//! leaves the index type's range. The modes correspond to the C/C++ compiler
//! flags `-fwrapv` (wrap), `-ftrapv` (trap at the overflow) and a clamping
//! variant. Arithmetic runs at the width of the index: `i32` by default,
//! `i64` for wide indices.

use bounded_accessor::BoundedArray;
use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// What an overflowing addition produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowMode {
    /// Two's-complement wraparound
    Wrapping,
    /// Report the overflow as an error
    #[default]
    Checked,
    /// Clamp to the type's MIN / MAX
    Saturating,
}

impl fmt::Display for OverflowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowMode::Wrapping => write!(f, "wrapping"),
            OverflowMode::Checked => write!(f, "checked"),
            OverflowMode::Saturating => write!(f, "saturating"),
        }
    }
}

/// Arithmetic errors raised in checked mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithError {
    #[error("{lhs} + {rhs} overflows i{bits}")]
    Overflow { lhs: i64, rhs: i64, bits: u32 },
}

/// Signed index type the scenarios can run at
pub trait IndexInt: Copy + Ord + fmt::Display + fmt::Debug {
    const BITS: u32;
    const ZERO: Self;
    /// `MAX - 3`, the far offset added by the far-offset scenario
    const FAR_DELTA: Self;

    fn from_i32(v: i32) -> Self;
    fn widen(self) -> i64;
    /// Two's-complement reinterpretation as unsigned
    fn as_unsigned(self) -> u64;

    fn wrapping_add(self, rhs: Self) -> Self;
    fn checked_add(self, rhs: Self) -> Option<Self>;
    fn saturating_add(self, rhs: Self) -> Self;

    /// Bounds-checked read at this index
    fn read_from(self, arr: &BoundedArray) -> i32;
}

impl IndexInt for i32 {
    const BITS: u32 = i32::BITS;
    const ZERO: Self = 0;
    const FAR_DELTA: Self = i32::MAX - 3;

    fn from_i32(v: i32) -> Self {
        v
    }

    fn widen(self) -> i64 {
        self as i64
    }

    fn as_unsigned(self) -> u64 {
        self as u32 as u64
    }

    fn wrapping_add(self, rhs: Self) -> Self {
        i32::wrapping_add(self, rhs)
    }

    fn checked_add(self, rhs: Self) -> Option<Self> {
        i32::checked_add(self, rhs)
    }

    fn saturating_add(self, rhs: Self) -> Self {
        i32::saturating_add(self, rhs)
    }

    fn read_from(self, arr: &BoundedArray) -> i32 {
        arr.get(self)
    }
}

impl IndexInt for i64 {
    const BITS: u32 = i64::BITS;
    const ZERO: Self = 0;
    const FAR_DELTA: Self = i64::MAX - 3;

    fn from_i32(v: i32) -> Self {
        v as i64
    }

    fn widen(self) -> i64 {
        self
    }

    fn as_unsigned(self) -> u64 {
        self as u64
    }

    fn wrapping_add(self, rhs: Self) -> Self {
        i64::wrapping_add(self, rhs)
    }

    fn checked_add(self, rhs: Self) -> Option<Self> {
        i64::checked_add(self, rhs)
    }

    fn saturating_add(self, rhs: Self) -> Self {
        i64::saturating_add(self, rhs)
    }

    fn read_from(self, arr: &BoundedArray) -> i32 {
        arr.get_wide(self)
    }
}

/// Add `delta` to `value` under `mode`, at the width of `T`.
pub fn offset<T: IndexInt>(value: T, delta: T, mode: OverflowMode) -> Result<T, ArithError> {
    let result = match mode {
        OverflowMode::Wrapping => value.wrapping_add(delta),
        OverflowMode::Saturating => value.saturating_add(delta),
        OverflowMode::Checked => value.checked_add(delta).ok_or(ArithError::Overflow {
            lhs: value.widen(),
            rhs: delta.widen(),
            bits: T::BITS,
        })?,
    };

    log::debug!("{} + {} = {} ({}, i{})", value, delta, result, mode, T::BITS);
    Ok(result)
}
