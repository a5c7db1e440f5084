//! Per-component solving: a greedy bound estimate plus exact A* search.
pub mod greedy;
pub mod search;
pub mod state;

pub use greedy::safe_upper_bound;
pub use search::minimum_presses;
pub use state::{apply_if_safe, PressState};
