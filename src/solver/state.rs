//! Search-state representation for the exact solver.

use smallvec::SmallVec;

use crate::machine::Button;

/// Remaining counter values, used as a hashable search key.
///
/// Components are usually small, so up to 8 counters live inline without
/// touching the heap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PressState(SmallVec<[u32; 8]>);

impl PressState {
    pub fn new(values: &[u32]) -> Self {
        Self(SmallVec::from_slice(values))
    }

    #[inline(always)]
    pub fn values(&self) -> &[u32] { &self.0 }

    /// Sum of all remaining counter values.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&v| u64::from(v)).sum()
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&v| v == 0)
    }
}

/// Applies one press if it is legal, i.e. no covered counter is already at
/// zero. This is the only transition the search uses; the greedy estimator
/// shares the same legality predicate through [`Button::is_safe`].
pub fn apply_if_safe(state: &PressState, button: &Button) -> Option<PressState> {
    if !button.is_safe(state.values()) {
        return None;
    }
    let mut next = state.clone();
    for &i in button.indices() {
        next.0[i as usize] -= 1;
    }
    Some(next)
}
