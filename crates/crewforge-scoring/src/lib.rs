//! CrewForge Scoring
//!
//! Recomputes the four objective terms of an assignment directly from the
//! roster, independent of any model encoding:
//! - friend score: same-center friend choices, 3/2/1 points by rank,
//!   normalized per center by its [`FriendDivisors`] entry
//! - gender score: per crew, the smaller of the male and female counts
//! - year score: per crew, the number of year levels represented
//! - veteran/new score: per crew, the smaller of the veteran and new counts
//!
//! Diversity terms count decided youths only. The weighted total is the
//! value the model objective must reproduce.

pub mod calculator;
pub mod divisor;
pub mod report;

pub use calculator::ScoreCalculator;
pub use divisor::FriendDivisors;
pub use report::{CenterFriendScore, CrewComposition, FriendChoiceStats, ScoreReport, SubScore};
