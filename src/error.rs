//! Typed failure verdicts for the solve pipeline.
//!
//! Unsolvability is a value, never a panic, and every variant carries the
//! context (machine, component, counter indices) needed to point back at the
//! offending input. Panics are reserved for contract violations inside the
//! crate itself.

use thiserror::Error;

/// Why a single machine cannot be driven to all-zero.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnsolvableReason {
    /// After preprocessing, no usable button remains while counters still
    /// need presses.
    #[error("no usable buttons remain but {unmet} counter(s) still need presses")]
    NoButtons { unmet: usize },
    /// Two counters covered by exactly the same buttons need different
    /// totals. Every legal press moves them in lockstep, so they can never
    /// separate. Indices refer to the original machine numbering.
    #[error("counters {first} and {second} share identical button coverage but need {first_target} and {second_target}")]
    SignatureConflict { first: usize, second: usize, first_target: u32, second_target: u32 },
    /// The exact search expanded every reachable state without hitting zero.
    /// This is the final oracle for shapes the static checks cannot see,
    /// such as uncovered counters or forced overshoot.
    #[error("component {component}: every reachable state explored without reaching zero")]
    Exhausted { component: usize },
}

/// A failure of a whole run. One unsolvable machine is fatal; there are no
/// partial totals.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("machine {machine} is unsolvable: {reason}")]
    Unsolvable { machine: usize, reason: UnsolvableReason },
    #[error("solve cancelled")]
    Cancelled,
}
