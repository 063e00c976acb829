//! Session lifecycle management.
//!
//! This module provides the `Tracker` struct that guarantees every
//! saved set references a live workout session, and carries the
//! maintenance and reporting flows built on top of it.

mod maintenance;
mod reports;
mod sets;
mod state;
mod tracker;

pub use reports::resolve_exercise_name;
pub use sets::InputError;
pub use sets::{parse_weight, validate_reps};
pub use state::SessionState;
pub use tracker::Tracker;
