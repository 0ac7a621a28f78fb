//! Preprocessing that turns over-capacity demands into dedicated trips.

mod demand_split;

pub use demand_split::{split_demands, Dispatch, SplitOutcome};
