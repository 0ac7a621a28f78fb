//! Arc evaluation and solution checking.
//!
//! - [`EvaluatorSet`] — distance, demand, and time evaluators per snapshot
//! - [`SolutionChecker`] — re-derives every constraint on a finished solution

mod checker;
mod evaluator;

pub use checker::SolutionChecker;
pub use evaluator::{
    DemandEvaluator, DistanceEvaluator, Evaluator, EvaluatorKind, EvaluatorSet, TimeEvaluator,
};
