//! Shared roster fixtures for CrewForge crates.
//!
//! This crate provides rosters and configurations for testing. It depends
//! only on `crewforge-core` and `crewforge-config` so every other crate can
//! use it as a dev-dependency.
//!
//! - [`scenarios`] - small rosters for the acceptance scenarios A to E
//! - [`camp`] - a two-center camp with families, friends and history
//! - [`retreat`] - 24 youths in friend circles over four crews
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! crewforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```
//! use crewforge_test::scenarios::two_centers_four_youths;
//!
//! let (roster, config) = two_centers_four_youths();
//! assert_eq!(roster.decidable_count(), 4);
//! assert_eq!(config.min_crew_size, 5);
//! ```

pub mod camp;
pub mod retreat;
pub mod scenarios;

use crewforge_core::{Gender, History, PersonRecord, YearLevel};

pub use camp::{camp_config, camp_roster};
pub use retreat::{retreat_config, retreat_roster};

/// Shorthand for a youth record.
pub fn youth(id: &str, name: &str, gender: Gender, year: YearLevel, history: History) -> PersonRecord {
    PersonRecord::youth(id, name, gender, year, history)
}
