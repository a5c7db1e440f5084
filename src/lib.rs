//! Exact minimum-press planning for counter/button machines.
//!
//! A machine is a vector of non-negative counters plus a set of buttons.
//! Pressing a button decrements every counter it covers by 1 and is only
//! legal while none of them would go negative. This crate computes the exact
//! minimum number of presses that drives all counters to zero, per machine
//! and summed over a machine list.
//!
//! Per machine the pipeline is: [`reduce`] strips satisfied counters and
//! rejects statically unsolvable shapes, [`decompose`] splits the
//! counter/button incidence graph into independent components,
//! [`solver::greedy`] produces a feasible upper bound, and
//! [`solver::search`] runs a bound-pruned A* for the exact minimum.
//! [`solve`] aggregates the results and adds optional parallelism and
//! cooperative cancellation. The whole pipeline is a pure function of its
//! input: no state survives between machines, and equal inputs yield equal
//! reports.

pub mod decompose;
pub mod error;
pub mod machine;
pub mod parse;
pub mod reduce;
pub mod solve;
pub mod solver;

pub use error::{SolveError, UnsolvableReason};
pub use machine::{Button, Machine};
pub use parse::{parse_machines, ParseError};
pub use solve::{solve_machine, total_presses, CancelToken, RunReport, SolveOptions};
