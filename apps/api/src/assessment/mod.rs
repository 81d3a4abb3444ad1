// Readiness assessment: survey answers in, status + blockers + action plan out.
// Everything here is pure and synchronous; sessions live in `crate::session`.

pub mod blockers;
pub mod classifier;
pub mod explanation;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod plan;
