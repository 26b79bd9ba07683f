//! # Bench Check
//!
//! Data model for completed benchmark runs: the [`Controls`] result tree,
//! per-check [`State`]s and the aggregate [`Summary`] counters.
//!
//! Check execution lives elsewhere; this crate only describes its output.

pub mod controls;
pub mod error;
pub mod state;
pub mod summary;

pub use controls::{Check, Controls, Group};
pub use error::CheckError;
pub use state::State;
pub use summary::Summary;
