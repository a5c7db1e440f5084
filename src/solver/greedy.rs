//! Greedy upper-bound estimator: a cheap feasible schedule, when one exists.

use crate::decompose::Component;

/// Runs the safe-only greedy schedule and returns its total press count.
///
/// Each round picks the safe button whose covered counters sum to the most
/// remaining work (strict `>`, so ties keep the first button in canonical
/// order) and presses it `t` times in one step, where `t` is the smallest
/// covered value. Every one of those `t` presses is individually legal, so
/// the schedule is feasible and its count is a valid upper bound for the
/// exact minimum.
///
/// Returns `None` when no safe button exists while counters are still
/// positive. That is a statement about this schedule, not about the machine;
/// the exact search decides solvability.
pub fn safe_upper_bound(component: &Component) -> Option<u64> {
    let mut remaining = component.targets.clone();
    let mut presses = 0u64;

    while remaining.iter().any(|&v| v > 0) {
        let mut choice: Option<(usize, u64)> = None;
        for (index, button) in component.buttons.iter().enumerate() {
            if button.is_empty() || !button.is_safe(&remaining) {
                continue;
            }
            let covered: u64 = button
                .indices()
                .iter()
                .map(|&i| u64::from(remaining[i as usize]))
                .sum();
            if choice.map_or(true, |(_, best)| covered > best) {
                choice = Some((index, covered));
            }
        }
        let (index, _) = choice?;

        let button = &component.buttons[index];
        let step = button
            .indices()
            .iter()
            .map(|&i| remaining[i as usize])
            .min()
            .expect("BUG: a safe button covers at least one counter");
        for &i in button.indices() {
            remaining[i as usize] -= step;
        }
        presses += u64::from(step);
    }

    Some(presses)
}
