// src/validation/mod.rs

//! Checks on recorded single-qubit sequences: the operator they realize and
//! the logical pulse train they carry.
//!
//! These are how the crate shows that a native-gate sequence and its
//! named-gate counterpart are the same circuit once compiled.

use crate::core::{ANGLE_TOLERANCE, GaddError, Matrix2, Pauli, QubitId, Result};
use crate::decomposition::identify_unitary;
use crate::operations::Operation;

/// Product of the operators of every op on `qubit`, in time order
/// (`U_n ⋯ U_2 U_1`). Barriers and identities contribute the identity.
pub fn net_unitary(ops: &[Operation], qubit: QubitId) -> Matrix2 {
    ops.iter()
        .filter(|op| op.target() == qubit)
        .fold(Matrix2::identity(), |acc, op| op.unitary() * acc)
}

/// Returns `true` if `m` is the identity up to global phase.
///
/// # Arguments
/// * `m` - The operator to test.
/// * `tolerance` - Per-entry tolerance. Defaults to `ANGLE_TOLERANCE`.
pub fn is_identity_up_to_phase(m: &Matrix2, tolerance: Option<f64>) -> bool {
    Matrix2::identity().approx_eq_up_to_phase(m, tolerance.unwrap_or(ANGLE_TOLERANCE))
}

/// The logical pulse train on `qubit`: every pulse mapped back to the Pauli
/// it equals up to global phase. Barriers and identities are skipped.
///
/// # Returns
/// * `Err(GaddError::InvalidSequence)` if a pulse is not a Pauli (e.g. a Hadamard).
pub fn logical_pulses(ops: &[Operation], qubit: QubitId) -> Result<Vec<Pauli>> {
    ops.iter()
        .filter(|op| op.target() == qubit && op.is_pulse())
        .enumerate()
        .map(|(i, op)| {
            identify_unitary(&op.unitary()).ok_or_else(|| GaddError::InvalidSequence {
                message: format!("pulse #{} ({:?}) is not a Pauli", i, op),
            })
        })
        .collect()
}

/// Checks that the ops on `qubit` compose to the identity up to global phase,
/// i.e. that a decoupling sequence refocuses.
pub fn check_refocusing(ops: &[Operation], qubit: QubitId) -> Result<()> {
    let net = net_unitary(ops, qubit);
    if is_identity_up_to_phase(&net, None) {
        Ok(())
    } else {
        Err(GaddError::InvalidSequence {
            message: format!("sequence on {} does not refocus, net operator {}", qubit, net),
        })
    }
}
