//! CrewForge Core - roster model and shared types for crew assignment
//!
//! This crate provides the fundamental data of the assignment problem:
//! - Typed roster records and the validated, immutable [`Roster`]
//! - Index newtypes used by every downstream stage
//! - The [`Assignment`] artifact produced by a solve
//! - The error taxonomy and terminal [`SolveStatus`]

pub mod assignment;
pub mod error;
pub mod index;
pub mod roster;
pub mod status;

pub use assignment::{Assignment, Placement, ResolvedAssignment};
pub use error::{CrewForgeError, Result};
pub use index::{CenterIndex, CrewIndex, PersonIndex};
pub use roster::{
    Center, CenterId, ChoiceRank, Crew, CrewId, CrewRecord, FriendChoice, Gender, History, Person,
    PersonId, PersonRecord, Role, Roster, RosterBuilder, YearLevel,
};
pub use status::SolveStatus;
