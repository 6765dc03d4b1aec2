//! Sanitize-then-read scenarios
//!
//! Each scenario takes an index `b`, runs some "sanitization" arithmetic on
//! it and then reads the array. In an optimizing C++ build these paths let
//! the compiler delete the bounds check after a signed overflow. Here the
//! arithmetic follows an explicit [`OverflowMode`] at the index's own width
//! and the read goes through [`BoundedArray`]'s checked readers, so every
//! path ends in an element, the sentinel, an early rejection, or a reported
//! overflow.

use bounded_accessor::BoundedArray;
use colored::Colorize;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

use crate::arith::{offset, ArithError, IndexInt, OverflowMode};
use crate::index::Index;

/// How a scenario ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The array was read at `index`
    Read { index: i64, value: i32 },
    /// Sanitization refused the input before any read
    Rejected(&'static str),
    /// Checked arithmetic caught an overflow
    Overflow(ArithError),
}

/// Result of running one scenario
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub name: &'static str,
    pub narration: Vec<String>,
    pub outcome: Outcome,
}

type ScenarioFn<T> =
    fn(&BoundedArray, T, OverflowMode, &mut Vec<String>) -> Result<Outcome, ArithError>;

/// A named sanitize-then-read path, instantiated at both index widths
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    narrow: ScenarioFn<i32>,
    wide: ScenarioFn<i64>,
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl Scenario {
    /// Run against `arr` with index `b`. Overflows become an outcome.
    pub fn run(&self, arr: &BoundedArray, b: Index, mode: OverflowMode) -> ScenarioReport {
        let mut narration = Vec::new();
        let result = match b {
            Index::Narrow(b) => (self.narrow)(arr, b, mode, &mut narration),
            Index::Wide(b) => (self.wide)(arr, b, mode, &mut narration),
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                log::debug!("{}: caught {}", self.name, err);
                Outcome::Overflow(err)
            }
        };

        ScenarioReport {
            name: self.name,
            narration,
            outcome,
        }
    }
}

/// All scenarios, in the order `run_all` executes them
pub static SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "direct",
        description: "read b",
        narrow: direct::<i32>,
        wide: direct::<i64>,
    },
    Scenario {
        name: "unsanitized-offset",
        description: "c = b + 1, read c",
        narrow: unsanitized_offset::<i32>,
        wide: unsanitized_offset::<i64>,
    },
    Scenario {
        name: "sanitized-offset",
        description: "reject b < 0, c = b + 1, read c",
        narrow: sanitized_offset::<i32>,
        wide: sanitized_offset::<i64>,
    },
    Scenario {
        name: "range-sanitized",
        description: "reject b < 0, reject b + 100 > 101, read b",
        narrow: range_sanitized::<i32>,
        wide: range_sanitized::<i64>,
    },
    Scenario {
        name: "modular-curse",
        description: "reject b < 0, reject b + 100 > 110, read b",
        narrow: modular_curse::<i32>,
        wide: modular_curse::<i64>,
    },
    Scenario {
        name: "far-offset",
        description: "x = b + (MAX - 3), read b if b > 0",
        narrow: far_offset::<i32>,
        wide: far_offset::<i64>,
    },
    Scenario {
        name: "unsigned-guard",
        description: "reject b as unsigned >= 2^(bits-1), c = b + 1, read c",
        narrow: unsigned_guard::<i32>,
        wide: unsigned_guard::<i64>,
    },
];

/// Registry of scenarios by name
pub static SCENARIO_INDEX: Lazy<HashMap<&'static str, &'static Scenario>> =
    Lazy::new(|| SCENARIOS.iter().map(|s| (s.name, s)).collect());

/// Get a scenario by name
pub fn get_scenario(name: &str) -> Option<&'static Scenario> {
    SCENARIO_INDEX.get(name.to_lowercase().as_str()).copied()
}

/// Scenario names in execution order
pub fn scenario_names() -> Vec<&'static str> {
    SCENARIOS.iter().map(|s| s.name).collect()
}

/// Run every scenario in order. An overflow in one does not stop the rest.
pub fn run_all(arr: &BoundedArray, b: Index, mode: OverflowMode) -> Vec<ScenarioReport> {
    SCENARIOS.iter().map(|s| s.run(arr, b, mode)).collect()
}

fn read<T: IndexInt>(arr: &BoundedArray, index: T, narration: &mut Vec<String>) -> Outcome {
    narration.push(format!("reading array at index={}", index));
    let value = index.read_from(arr);
    let index = index.widen();
    log::debug!("get({}) = {} in-bounds={}", index, value, arr.contains(index));
    Outcome::Read { index, value }
}

fn direct<T: IndexInt>(
    arr: &BoundedArray,
    b: T,
    _mode: OverflowMode,
    narration: &mut Vec<String>,
) -> Result<Outcome, ArithError> {
    Ok(read(arr, b, narration))
}

fn unsanitized_offset<T: IndexInt>(
    arr: &BoundedArray,
    b: T,
    mode: OverflowMode,
    narration: &mut Vec<String>,
) -> Result<Outcome, ArithError> {
    let c = offset(b, T::from_i32(1), mode)?;
    narration.push(format!("going to get from array at {}", c));
    Ok(read(arr, c, narration))
}

fn sanitized_offset<T: IndexInt>(
    arr: &BoundedArray,
    b: T,
    mode: OverflowMode,
    narration: &mut Vec<String>,
) -> Result<Outcome, ArithError> {
    if b < T::ZERO {
        return Ok(Outcome::Rejected("argument is too low"));
    }
    let c = offset(b, T::from_i32(1), mode)?;
    narration.push(format!("going to get from array at {}", c));
    Ok(read(arr, c, narration))
}

fn range_sanitized<T: IndexInt>(
    arr: &BoundedArray,
    b: T,
    mode: OverflowMode,
    narration: &mut Vec<String>,
) -> Result<Outcome, ArithError> {
    bounded_by_offset(arr, b, mode, 101, narration)
}

fn modular_curse<T: IndexInt>(
    arr: &BoundedArray,
    b: T,
    mode: OverflowMode,
    narration: &mut Vec<String>,
) -> Result<Outcome, ArithError> {
    bounded_by_offset(arr, b, mode, 110, narration)
}

/// Reject `b < 0` and `b + 100 > limit`, then read `b` itself.
fn bounded_by_offset<T: IndexInt>(
    arr: &BoundedArray,
    b: T,
    mode: OverflowMode,
    limit: i32,
    narration: &mut Vec<String>,
) -> Result<Outcome, ArithError> {
    if b < T::ZERO {
        return Ok(Outcome::Rejected("argument is too low"));
    }
    let b100 = offset(b, T::from_i32(100), mode)?;
    narration.push(format!("b+100 is {}", b100));
    if b100 > T::from_i32(limit) {
        return Ok(Outcome::Rejected("argument is too high"));
    }
    Ok(read(arr, b, narration))
}

fn far_offset<T: IndexInt>(
    arr: &BoundedArray,
    b: T,
    mode: OverflowMode,
    narration: &mut Vec<String>,
) -> Result<Outcome, ArithError> {
    let x = offset(b, T::FAR_DELTA, mode)?;
    narration.push(format!("overflown number is {}", x));
    if b > T::ZERO {
        Ok(read(arr, b, narration))
    } else {
        Ok(Outcome::Rejected("argument is not positive"))
    }
}

fn unsigned_guard<T: IndexInt>(
    arr: &BoundedArray,
    b: T,
    mode: OverflowMode,
    narration: &mut Vec<String>,
) -> Result<Outcome, ArithError> {
    let unsigned = b.as_unsigned();
    if unsigned >= 1u64 << (T::BITS - 1) {
        return Ok(Outcome::Rejected("unsigned number is too large"));
    }
    narration.push(format!("range check passed: {}", unsigned));
    let c = offset(b, T::from_i32(1), mode)?;
    narration.push(format!("going to get from array at {}", c));
    Ok(read(arr, c, narration))
}

impl ScenarioReport {
    /// True if the array was read
    pub fn did_read(&self) -> bool {
        matches!(self.outcome, Outcome::Read { .. })
    }

    /// Print the report to stdout
    pub fn print_report(&self) {
        let description = get_scenario(self.name)
            .map(|s| s.description)
            .unwrap_or_default();
        println!(
            "\n{} {}: {}",
            "[*]".cyan().bold(),
            self.name.white().bold(),
            description
        );

        for line in &self.narration {
            println!("    {}", line.dimmed());
        }

        match &self.outcome {
            Outcome::Read { index, value } => {
                println!("    {} get({}) = {}", "[OK]".green().bold(), index, value);
            }
            Outcome::Rejected(reason) => {
                println!("    {} {}", "[REJECTED]".yellow().bold(), reason);
            }
            Outcome::Overflow(err) => {
                println!(
                    "    {} {} (acceptable outcome, no read)",
                    "[CAUGHT]".magenta().bold(),
                    err
                );
            }
        }
    }
}
