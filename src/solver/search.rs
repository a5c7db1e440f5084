//! Exact minimum-press search: A* over press states.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::decompose::Component;
use crate::solver::state::{apply_if_safe, PressState};

/// One frontier entry. `g` is presses spent so far, `f = g + h` the
/// optimistic completion estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenNode {
    f: u64,
    seq: u64,
    g: u64,
    state: PressState,
}

// BinaryHeap is a max-heap, so the ordering is reversed: the smallest f pops
// first, and the insertion sequence number breaks ties deterministically
// (first pushed pops first).
impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Finds the exact minimum number of presses driving every counter in the
/// component to zero, or `None` if no press sequence can.
///
/// Classic A*. The heuristic `ceil(remaining total / widest button)` is
/// admissible: one press removes at most `widest button` from the total, so
/// the first all-zero state popped carries the optimal count. A
/// best-known-cost map deduplicates states; a successor is recorded and
/// re-enqueued only when reached with a strictly lower `g` than any known
/// path to it.
///
/// `upper_bound` must be the press count of some feasible schedule (or
/// `None` to disable pruning); nodes whose `f` exceeds it cannot beat that
/// schedule and are dropped. Exhausting the frontier proves unsolvability,
/// which is how shapes the static checks cannot see are finally ruled out.
pub fn minimum_presses(component: &Component, upper_bound: Option<u64>) -> Option<u64> {
    let start = PressState::new(&component.targets);
    if start.is_zero() {
        return Some(0);
    }
    // Positive targets with nothing that moves them: exhausted before it starts.
    let widest = component
        .buttons
        .iter()
        .filter(|button| !button.is_empty())
        .map(|button| button.len())
        .max()? as u64;

    let bound = upper_bound.unwrap_or(u64::MAX);
    let heuristic = |state: &PressState| state.total().div_ceil(widest);

    let mut best_cost: HashMap<PressState, u64> = HashMap::new();
    let mut open = BinaryHeap::new();
    let mut seq = 0u64;

    best_cost.insert(start.clone(), 0);
    open.push(OpenNode { f: heuristic(&start), seq, g: 0, state: start });

    while let Some(OpenNode { f, g, state, .. }) = open.pop() {
        if state.is_zero() {
            return Some(g);
        }
        if f > bound {
            continue;
        }
        for button in &component.buttons {
            let Some(next) = apply_if_safe(&state, button) else {
                continue;
            };
            let next_g = g + 1;
            if best_cost.get(&next).is_some_and(|&known| known <= next_g) {
                continue;
            }
            let next_f = next_g + heuristic(&next);
            best_cost.insert(next.clone(), next_g);
            if next_f <= bound {
                seq += 1;
                open.push(OpenNode { f: next_f, seq, g: next_g, state: next });
            }
        }
    }

    // Every reachable state expanded without hitting zero.
    None
}
