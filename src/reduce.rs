//! Preprocessing: strips satisfied counters and rejects statically
//! detectable unsolvable machines before any search runs.

use std::collections::{BTreeSet, HashMap};

use crate::error::UnsolvableReason;
use crate::machine::{Button, Machine};

/// A machine with every already-zero counter removed.
///
/// Invariants: every target is positive; every button is non-empty, written
/// against the dense renumbering, deduplicated, and held in one canonical
/// sorted order; `counter_map[i]` is the original machine index of reduced
/// counter `i`, kept so diagnostics can name counters the caller recognizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduced {
    pub targets: Vec<u32>,
    pub buttons: Vec<Button>,
    pub counter_map: Vec<usize>,
}

/// Reduces a machine and runs the static feasibility checks.
///
/// The checks are necessary conditions only. A machine can pass both and
/// still be unsolvable; the exact search settles those by exhaustion.
pub fn reduce(machine: &Machine) -> Result<Reduced, UnsolvableReason> {
    // 1. Keep only counters that still need presses, densely renumbered.
    let counter_map: Vec<usize> = machine
        .targets()
        .iter()
        .enumerate()
        .filter(|(_, &target)| target > 0)
        .map(|(index, _)| index)
        .collect();
    let targets: Vec<u32> = counter_map.iter().map(|&i| machine.targets()[i]).collect();

    if targets.is_empty() {
        // Already satisfied; nothing to check or solve.
        return Ok(Reduced { targets, buttons: Vec::new(), counter_map });
    }

    let renumber: HashMap<u32, u32> = counter_map
        .iter()
        .enumerate()
        .map(|(new, &old)| (old as u32, new as u32))
        .collect();

    // 2. Rewrite buttons against the new numbering. Indices that pointed at
    //    removed counters drop out, and buttons left empty are no-ops. The
    //    BTreeSet pass dedups and fixes one canonical button order, so
    //    downstream tie-breaking is identical for equal inputs regardless of
    //    how the buttons were listed.
    let buttons: Vec<Button> = machine
        .buttons()
        .iter()
        .map(|button| Button::new(button.indices().iter().filter_map(|i| renumber.get(i).copied())))
        .filter(|button| !button.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    if buttons.is_empty() {
        return Err(UnsolvableReason::NoButtons { unmet: targets.len() });
    }

    check_signatures(&targets, &buttons, &counter_map)?;

    Ok(Reduced { targets, buttons, counter_map })
}

/// Counters covered by exactly the same button set move in lockstep under
/// every legal press, so equal signatures must mean equal targets.
fn check_signatures(
    targets: &[u32],
    buttons: &[Button],
    counter_map: &[usize],
) -> Result<(), UnsolvableReason> {
    let mut first_seen: HashMap<Vec<u32>, usize> = HashMap::new();
    for (counter, &target) in targets.iter().enumerate() {
        let signature: Vec<u32> = buttons
            .iter()
            .enumerate()
            .filter(|(_, button)| button.covers(counter as u32))
            .map(|(index, _)| index as u32)
            .collect();
        match first_seen.get(&signature) {
            Some(&earlier) if targets[earlier] != target => {
                return Err(UnsolvableReason::SignatureConflict {
                    first: counter_map[earlier],
                    second: counter_map[counter],
                    first_target: targets[earlier],
                    second_target: target,
                });
            }
            Some(_) => {}
            None => {
                first_seen.insert(signature, counter);
            }
        }
    }
    Ok(())
}
