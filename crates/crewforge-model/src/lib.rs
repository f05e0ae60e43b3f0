//! CrewForge Model
//!
//! Translates a validated [`Roster`](crewforge_core::Roster) into a
//! [`CpModel`](crewforge_solver::CpModel):
//! - [`check_integrity`] and [`check_kinship`] reject unusable input before
//!   any variable exists
//! - [`CrewModelBuilder`] emits the assignment indicators and hard
//!   constraints
//! - [`ObjectiveComposer`] adds the weighted objective to the same model
//! - [`interchangeable_crews`] finds the crews whose order the builder
//!   fixes
//!
//! The [`IndicatorLayout`] returned with the model is what the extractor
//! uses to read an assignment back out of a valuation.

pub mod builder;
pub mod integrity;
pub mod kinship;
pub mod layout;
pub mod objective;
pub mod symmetry;

pub use builder::{CrewModel, CrewModelBuilder};
pub use integrity::check_integrity;
pub use kinship::{
    check_fixed_friends, check_kinship, friend_pairs, kinship_pairs, KinshipGroups, KinshipKind,
    KinshipPair,
};
pub use layout::IndicatorLayout;
pub use objective::{ObjectiveComposer, ObjectiveSummary};
pub use symmetry::interchangeable_crews;
