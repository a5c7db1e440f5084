//! Core data model: counters, their targets, and the buttons that decrement them.

use serde::{Deserialize, Serialize};

/// A button: the fixed set of counter indices it decrements by 1 per press.
///
/// Indices are stored sorted and deduplicated, so buttons have set semantics
/// and compare, order, and hash structurally. Construction never fails; range
/// checking against a concrete machine happens in [`Machine::new`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<u32>")]
pub struct Button(Vec<u32>);

impl Button {
    pub fn new(indices: impl IntoIterator<Item = u32>) -> Self {
        let mut indices: Vec<u32> = indices.into_iter().collect();
        indices.sort_unstable();
        indices.dedup();
        Self(indices)
    }

    #[inline(always)]
    pub fn indices(&self) -> &[u32] { &self.0 }

    /// Number of counters this button covers.
    #[inline(always)]
    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// The one legality predicate: a press is safe while every covered
    /// counter is still positive.
    #[inline(always)]
    pub fn is_safe(&self, remaining: &[u32]) -> bool {
        self.0.iter().all(|&i| remaining[i as usize] > 0)
    }

    pub fn covers(&self, counter: u32) -> bool {
        self.0.binary_search(&counter).is_ok()
    }
}

impl From<Vec<u32>> for Button {
    fn from(indices: Vec<u32>) -> Self { Self::new(indices) }
}

/// One machine: per-counter targets plus the buttons that can decrement them.
///
/// Targets are the number of decrements each counter still needs. Counts in
/// this crate are `u64`; individual counter values fit in `u32`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMachine")]
pub struct Machine {
    targets: Vec<u32>,
    buttons: Vec<Button>,
}

impl Machine {
    /// Panics if a button references a counter index out of range. That is a
    /// contract violation by the caller, not an unsolvable input; the parser
    /// rejects out-of-range indices before they ever reach this constructor,
    /// and deserialization reports them as errors.
    pub fn new(targets: Vec<u32>, buttons: Vec<Button>) -> Self {
        if let Err(message) = check_indices(&targets, &buttons) {
            panic!("{}", message);
        }
        Self { targets, buttons }
    }

    pub fn targets(&self) -> &[u32] { &self.targets }
    pub fn buttons(&self) -> &[Button] { &self.buttons }
}

/// Unvalidated mirror of [`Machine`] that funnels deserialized data through
/// the same index-range check the constructor enforces.
#[derive(Deserialize)]
struct RawMachine {
    targets: Vec<u32>,
    buttons: Vec<Button>,
}

impl TryFrom<RawMachine> for Machine {
    type Error = String;

    fn try_from(raw: RawMachine) -> Result<Self, Self::Error> {
        check_indices(&raw.targets, &raw.buttons)?;
        Ok(Self { targets: raw.targets, buttons: raw.buttons })
    }
}

fn check_indices(targets: &[u32], buttons: &[Button]) -> Result<(), String> {
    for button in buttons {
        for &index in button.indices() {
            if index as usize >= targets.len() {
                return Err(format!(
                    "button index {} out of range for {} counters",
                    index,
                    targets.len()
                ));
            }
        }
    }
    Ok(())
}
