// src/operations/mod.rs

//! Defines the operations a circuit records when a sequence builder or a
//! decomposition helper appends to it.
//!
//! The set mirrors the abstract circuit capability one-to-one: barriers,
//! identities, the three named Paulis and the two native rotation forms.

use crate::core::{Matrix2, QubitId};

/// One appended circuit element acting on a single qubit.
#[derive(Debug, Clone, PartialEq)] // f64 parameters, so no Eq
pub enum Operation {
    /// Scheduling directive; performs no physical operation.
    Barrier {
        /// Qubit the barrier spans.
        target: QubitId,
    },

    /// Idle gate of one gate duration.
    Identity {
        /// Qubit left idle.
        target: QubitId,
    },

    /// Named Pauli X.
    PauliX {
        /// Target qubit.
        target: QubitId,
    },

    /// Named Pauli Y.
    PauliY {
        /// Target qubit.
        target: QubitId,
    },

    /// Named Pauli Z.
    PauliZ {
        /// Target qubit.
        target: QubitId,
    },

    /// General single-qubit rotation `u3(θ, φ, λ)`.
    ///
    /// Analogy: IBM's native `u3`/`U` gate.
    Rotation {
        /// Target qubit.
        target: QubitId,
        /// Polar rotation angle.
        theta: f64,
        /// First phase angle.
        phi: f64,
        /// Second phase angle.
        lambda: f64,
    },

    /// Virtual Z-type phase rotation `u1(λ)`; zero pulse duration on
    /// hardware that implements it as a frame change.
    Phase {
        /// Target qubit.
        target: QubitId,
        /// Phase angle.
        lambda: f64,
    },
}

impl Operation {
    /// The qubit this operation acts on.
    pub fn target(&self) -> QubitId {
        match self {
            Operation::Barrier { target }
            | Operation::Identity { target }
            | Operation::PauliX { target }
            | Operation::PauliY { target }
            | Operation::PauliZ { target }
            | Operation::Rotation { target, .. }
            | Operation::Phase { target, .. } => *target,
        }
    }

    /// `true` for barriers.
    pub fn is_barrier(&self) -> bool {
        matches!(self, Operation::Barrier { .. })
    }

    /// `true` for identities.
    pub fn is_identity(&self) -> bool {
        matches!(self, Operation::Identity { .. })
    }

    /// `true` for everything that counts as an appended gate, i.e. all but barriers.
    pub fn is_gate(&self) -> bool {
        !self.is_barrier()
    }

    /// `true` for pulses: gates other than the identity.
    pub fn is_pulse(&self) -> bool {
        self.is_gate() && !self.is_identity()
    }

    /// The 2x2 operator the gate realizes. Barriers act as the identity.
    pub fn unitary(&self) -> Matrix2 {
        use crate::core::Pauli;
        match self {
            Operation::Barrier { .. } | Operation::Identity { .. } => Matrix2::identity(),
            Operation::PauliX { .. } => Pauli::X.matrix(),
            Operation::PauliY { .. } => Pauli::Y.matrix(),
            Operation::PauliZ { .. } => Pauli::Z.matrix(),
            Operation::Rotation { theta, phi, lambda, .. } => Matrix2::u3(*theta, *phi, *lambda),
            Operation::Phase { lambda, .. } => Matrix2::u1(*lambda),
        }
    }

    /// Short label used by the circuit diagram.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Barrier { .. } => "░",
            Operation::Identity { .. } => "I",
            Operation::PauliX { .. } => "X",
            Operation::PauliY { .. } => "Y",
            Operation::PauliZ { .. } => "Z",
            Operation::Rotation { .. } => "U3",
            Operation::Phase { .. } => "U1",
        }
    }
}
