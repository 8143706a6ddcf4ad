//! Angle constants shared by the decomposition table and validation.

/// Constants used when parameterizing native rotations
pub mod gadd_constants {
    /// Half turn, the angle of every Pauli pulse.
    pub const PI: f64 = std::f64::consts::PI;
    /// Quarter turn, used by the Y and Hadamard rotations.
    pub const FRAC_PI_2: f64 = std::f64::consts::FRAC_PI_2;
    /// Absolute tolerance for comparing angles and matrix entries.
    pub const ANGLE_TOLERANCE: f64 = 1e-9;
}
