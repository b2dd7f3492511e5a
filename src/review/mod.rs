//! Review state machine for triaging followed accounts.

mod store;

pub use store::{DecisionOutcome, MergeReport, ReviewDecision, ReviewStats, ReviewStore};
