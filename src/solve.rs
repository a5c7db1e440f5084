//! End-to-end pipeline: reduce, decompose, bound, search, aggregate.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::decompose::components;
use crate::error::{SolveError, UnsolvableReason};
use crate::machine::Machine;
use crate::reduce::reduce;
use crate::solver::{minimum_presses, safe_upper_bound};

/// Cooperative cancellation handle. Clones share one flag; the solver checks
/// it before each machine, so an in-flight component search runs to its end.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self { Self::default() }

    /// Flags the run as cancelled; machine solves not yet started abort.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Knobs for a solve run.
#[derive(Debug, Clone, Default)]
pub struct SolveOptions {
    /// Solve machines on the rayon thread pool. Machines are independent,
    /// so the mode cannot change the report.
    pub parallel: bool,
    /// Checked between machines; see [`CancelToken`]. Deadlines are the
    /// caller's concern: arm a timer that cancels the token.
    pub cancel: Option<CancelToken>,
}

/// The result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Sum of the per-machine minima.
    pub total: u64,
    /// Minimum press count per machine, in input order.
    pub machines: Vec<u64>,
}

/// Solves one machine: the sum of exact minima over its components.
pub fn solve_machine(machine: &Machine) -> Result<u64, UnsolvableReason> {
    let reduced = reduce(machine)?;
    if reduced.targets.is_empty() {
        return Ok(0);
    }
    let parts = components(&reduced);
    debug!(components = parts.len(), "machine decomposed");

    let mut total = 0u64;
    for (index, part) in parts.iter().enumerate() {
        let bound = safe_upper_bound(part);
        match minimum_presses(part, bound) {
            Some(presses) => {
                debug!(component = index, presses, bound = ?bound, "component solved");
                total += presses;
            }
            None => return Err(UnsolvableReason::Exhausted { component: index }),
        }
    }
    Ok(total)
}

/// Solves every machine and aggregates the run total. Any unsolvable machine
/// fails the whole run.
pub fn total_presses(
    machines: &[Machine],
    options: &SolveOptions,
) -> Result<RunReport, SolveError> {
    let solved: Result<Vec<u64>, SolveError> = if options.parallel {
        machines
            .par_iter()
            .enumerate()
            .map(|(index, machine)| solve_indexed(index, machine, options))
            .collect()
    } else {
        machines
            .iter()
            .enumerate()
            .map(|(index, machine)| solve_indexed(index, machine, options))
            .collect()
    };
    let per_machine = solved?;
    let total: u64 = per_machine.iter().sum();
    debug!(total, count = per_machine.len(), "run complete");
    Ok(RunReport { total, machines: per_machine })
}

fn solve_indexed(
    index: usize,
    machine: &Machine,
    options: &SolveOptions,
) -> Result<u64, SolveError> {
    if options.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
        return Err(SolveError::Cancelled);
    }
    let presses = solve_machine(machine)
        .map_err(|reason| SolveError::Unsolvable { machine: index, reason })?;
    debug!(machine = index, presses, "machine solved");
    Ok(presses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decompose::Component;
    use crate::machine::Button;
    use rstest::rstest;

    fn machine(targets: Vec<u32>, buttons: Vec<Vec<u32>>) -> Machine {
        Machine::new(targets, buttons.into_iter().map(Button::new).collect())
    }

    #[rstest]
    #[case(vec![3, 5], vec![vec![0], vec![1], vec![0, 1]], 5)] // shared button saves presses
    #[case(vec![2, 2], vec![vec![0], vec![1]], 4)] // two independent components
    #[case(vec![0, 0], vec![vec![0], vec![1]], 0)] // nothing to do
    #[case(vec![1, 1, 2], vec![vec![0, 2], vec![1, 2]], 2)]
    fn test_machine_minima(
        #[case] targets: Vec<u32>,
        #[case] buttons: Vec<Vec<u32>>,
        #[case] expected: u64,
    ) {
        assert_eq!(solve_machine(&machine(targets, buttons)), Ok(expected));
    }

    #[rstest]
    #[case(1)]
    #[case(5)]
    #[case(7)]
    fn test_single_counter_needs_exactly_its_target(#[case] target: u32) {
        let presses = solve_machine(&machine(vec![target], vec![vec![0]])).unwrap();
        assert_eq!(presses, u64::from(target));
    }

    #[test]
    fn test_signature_conflict_is_unsolvable() {
        let err = solve_machine(&machine(vec![1, 2], vec![vec![0, 1]])).unwrap_err();
        assert!(matches!(err, UnsolvableReason::SignatureConflict { first: 0, second: 1, .. }));
    }

    #[test]
    fn test_uncovered_counter_exhausts_its_component() {
        // Passes both static checks; only the search can rule it out.
        let err = solve_machine(&machine(vec![3, 2], vec![vec![1]])).unwrap_err();
        assert_eq!(err, UnsolvableReason::Exhausted { component: 0 });
    }

    #[test]
    fn test_forced_overshoot_exhausts() {
        let err = solve_machine(&machine(vec![2, 1], vec![vec![0, 1], vec![1]])).unwrap_err();
        assert!(matches!(err, UnsolvableReason::Exhausted { .. }));
    }

    #[test]
    fn test_no_buttons_with_positive_targets() {
        let err = solve_machine(&machine(vec![2], vec![])).unwrap_err();
        assert_eq!(err, UnsolvableReason::NoButtons { unmet: 1 });
    }

    #[test]
    fn test_decomposed_sum_matches_whole_machine_search() {
        let cases: Vec<(Vec<u32>, Vec<Vec<u32>>)> = vec![
            (vec![2, 2], vec![vec![0], vec![1]]),
            (vec![3, 5], vec![vec![0], vec![1], vec![0, 1]]),
            (vec![1, 2, 1], vec![vec![0], vec![1], vec![2], vec![0, 2]]),
            (vec![2, 3, 4], vec![vec![0, 1], vec![1, 2], vec![2]]),
        ];
        for (targets, buttons) in cases {
            let by_pipeline = solve_machine(&machine(targets.clone(), buttons.clone())).ok();
            let whole = Component {
                targets,
                buttons: buttons.into_iter().map(Button::new).collect(),
            };
            assert_eq!(by_pipeline, minimum_presses(&whole, None));
        }
    }

    #[test]
    fn test_total_sums_machines_and_reports_each() {
        let machines = vec![
            machine(vec![3, 5], vec![vec![0], vec![1], vec![0, 1]]),
            machine(vec![4], vec![vec![0]]),
        ];
        let report = total_presses(&machines, &SolveOptions::default()).unwrap();
        assert_eq!(report.total, 9);
        assert_eq!(report.machines, vec![5, 4]);
    }

    #[test]
    fn test_unsolvable_machine_reports_its_index() {
        let machines = vec![
            machine(vec![1], vec![vec![0]]),
            machine(vec![1, 2], vec![vec![0, 1]]),
        ];
        let err = total_presses(&machines, &SolveOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            SolveError::Unsolvable { machine: 1, reason: UnsolvableReason::SignatureConflict { .. } }
        ));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let machines = vec![
            machine(vec![3, 5], vec![vec![0], vec![1], vec![0, 1]]),
            machine(vec![2, 2], vec![vec![0], vec![1]]),
            machine(vec![7], vec![vec![0]]),
        ];
        let sequential = total_presses(&machines, &SolveOptions::default()).unwrap();
        let parallel =
            total_presses(&machines, &SolveOptions { parallel: true, cancel: None }).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let machines = vec![
            machine(vec![3, 5], vec![vec![0, 1], vec![1], vec![0]]),
            machine(vec![2, 3, 4], vec![vec![0, 1], vec![1, 2], vec![2]]),
        ];
        let options = SolveOptions::default();
        assert_eq!(
            total_presses(&machines, &options),
            total_presses(&machines, &options)
        );
    }

    #[test]
    fn test_cancelled_token_aborts_run() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let options = SolveOptions { parallel: false, cancel: Some(cancel) };
        let err = total_presses(&[machine(vec![1], vec![vec![0]])], &options).unwrap_err();
        assert_eq!(err, SolveError::Cancelled);
    }

    #[test]
    fn test_fresh_token_lets_the_run_finish() {
        let options = SolveOptions { parallel: false, cancel: Some(CancelToken::new()) };
        let report = total_presses(&[machine(vec![2], vec![vec![0]])], &options).unwrap();
        assert_eq!(report.total, 2);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = RunReport { total: 9, machines: vec![5, 4] };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value, serde_json::json!({ "total": 9, "machines": [5, 4] }));
    }
}
