//! Matching Service
//!
//! Pure compatibility scoring between profiles and open tasks.

pub mod scorer;

pub use scorer::{calculate_match_score, find_matching_tasks, recommend_top_tasks};
