// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod unitary;

pub use error::{GaddError, QubitId, Result};
pub use unitary::{Matrix2, Pauli};

pub mod constants;
pub use constants::gadd_constants::{ANGLE_TOLERANCE, FRAC_PI_2, PI};
