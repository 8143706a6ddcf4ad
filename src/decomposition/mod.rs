// src/decomposition/mod.rs

//! Native-gate decompositions of the logical single-qubit gates used by
//! decoupling sequences.
//!
//! A [`DecompositionTable`] maps each [`LogicalGate`] to exactly one
//! [`NativeGate`]. Tables are calibration data for one backend at one point
//! in time: targeting other hardware means supplying a whole new table
//! (see [`DecompositionTable::from_yaml_str`] and [`BackendTables`]), never
//! tweaking single angles.

mod registry;

pub use registry::{BackendTables, DEFAULT_BACKEND};

use crate::circuits::Circuit;
use crate::core::{ANGLE_TOLERANCE, FRAC_PI_2, GaddError, Matrix2, PI, Pauli, QubitId, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical gates that have a native decomposition.
///
/// The bar gates come from RGA-style sequences, where `x̄`, `ȳ`, `z̄` are π
/// rotations of the corresponding Pauli about all axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalGate {
    /// Pauli X.
    X,
    /// Pauli Y.
    Y,
    /// Pauli Z.
    Z,
    /// X bar.
    #[serde(rename = "xb")]
    XBar,
    /// Y bar.
    #[serde(rename = "yb")]
    YBar,
    /// Z bar.
    #[serde(rename = "zb")]
    ZBar,
    /// Hadamard.
    #[serde(rename = "h")]
    Hadamard,
}

impl LogicalGate {
    /// Every gate a complete table must cover.
    pub const ALL: [LogicalGate; 7] = [
        LogicalGate::X,
        LogicalGate::Y,
        LogicalGate::Z,
        LogicalGate::XBar,
        LogicalGate::YBar,
        LogicalGate::ZBar,
        LogicalGate::Hadamard,
    ];

    /// Short name, as used in table files.
    pub fn name(&self) -> &'static str {
        match self {
            LogicalGate::X => "x",
            LogicalGate::Y => "y",
            LogicalGate::Z => "z",
            LogicalGate::XBar => "xb",
            LogicalGate::YBar => "yb",
            LogicalGate::ZBar => "zb",
            LogicalGate::Hadamard => "h",
        }
    }
}

impl fmt::Display for LogicalGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for LogicalGate {
    type Err = GaddError;

    fn from_str(s: &str) -> Result<Self> {
        LogicalGate::ALL
            .into_iter()
            .find(|g| g.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GaddError::InvalidTable { message: format!("unknown logical gate '{}'", s) })
    }
}

/// A native single-qubit operation of the target hardware.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeGate {
    /// General rotation `u3(θ, φ, λ)`.
    Rotation {
        /// Polar rotation angle.
        theta: f64,
        /// First phase angle.
        phi: f64,
        /// Second phase angle.
        lambda: f64,
    },
    /// Virtual phase rotation `u1(λ)`.
    Phase {
        /// Phase angle.
        lambda: f64,
    },
}

impl NativeGate {
    /// Appends this gate to `circuit` on `qubit`. Exactly one operation is
    /// appended; the circuit's own error is returned as-is.
    pub fn append_to<C: Circuit + ?Sized>(&self, circuit: &mut C, qubit: QubitId) -> std::result::Result<(), C::Error> {
        match *self {
            NativeGate::Rotation { theta, phi, lambda } => circuit.append_rotation(theta, phi, lambda, qubit),
            NativeGate::Phase { lambda } => circuit.append_phase(lambda, qubit),
        }
    }

    /// The 2x2 operator this gate realizes.
    pub fn unitary(&self) -> Matrix2 {
        match *self {
            NativeGate::Rotation { theta, phi, lambda } => Matrix2::u3(theta, phi, lambda),
            NativeGate::Phase { lambda } => Matrix2::u1(lambda),
        }
    }

    /// Maps the gate back to the Pauli it equals up to global phase, if any.
    ///
    /// `phase(3π)` and `phase(π)` both map to `Z`.
    pub fn identify(&self) -> Option<Pauli> {
        identify_unitary(&self.unitary())
    }

    fn angles(&self) -> Vec<f64> {
        match *self {
            NativeGate::Rotation { theta, phi, lambda } => vec![theta, phi, lambda],
            NativeGate::Phase { lambda } => vec![lambda],
        }
    }
}

impl fmt::Display for NativeGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeGate::Rotation { theta, phi, lambda } => write!(f, "u3({:.4}, {:.4}, {:.4})", theta, phi, lambda),
            NativeGate::Phase { lambda } => write!(f, "u1({:.4})", lambda),
        }
    }
}

/// Returns the Pauli equal to `m` up to global phase, if any.
pub fn identify_unitary(m: &Matrix2) -> Option<Pauli> {
    Pauli::ALL
        .into_iter()
        .find(|p| p.matrix().approx_eq_up_to_phase(m, ANGLE_TOLERANCE))
}

/// Complete mapping from every [`LogicalGate`] to its native form.
///
/// Completeness is structural: a table cannot be built, or deserialized,
/// without all seven entries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecompositionTable {
    /// Native form of `x`.
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub x: NativeGate,
    /// Native form of `y`.
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub y: NativeGate,
    /// Native form of `z`.
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub z: NativeGate,
    /// Native form of `x̄`.
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub xb: NativeGate,
    /// Native form of `ȳ`.
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub yb: NativeGate,
    /// Native form of `z̄`.
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub zb: NativeGate,
    /// Native form of Hadamard.
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub h: NativeGate,
}

/// Decompositions obtained on `ibmq_armonk` (1 May 2020) by transpiling the
/// basic gates against the backend.
pub const IBMQ_ARMONK: DecompositionTable = DecompositionTable {
    x: NativeGate::Rotation { theta: PI, phi: 0.0, lambda: PI },
    y: NativeGate::Rotation { theta: PI, phi: FRAC_PI_2, lambda: FRAC_PI_2 },
    // u1(π) = u3(0, π, 0)
    z: NativeGate::Phase { lambda: PI },
    xb: NativeGate::Phase { lambda: PI },
    // u1(3π) = u1(π); kept as calibrated
    yb: NativeGate::Phase { lambda: 3.0 * PI },
    zb: NativeGate::Rotation { theta: PI, phi: 0.0, lambda: PI },
    // u2(0, π) = u3(π/2, 0, π)
    h: NativeGate::Rotation { theta: FRAC_PI_2, phi: 0.0, lambda: PI },
};

impl DecompositionTable {
    /// The `ibmq_armonk` calibration table.
    pub fn ibmq_armonk() -> Self {
        IBMQ_ARMONK
    }

    /// Starts building a replacement table entry by entry.
    pub fn builder() -> DecompositionTableBuilder {
        DecompositionTableBuilder::default()
    }

    /// Native form of `gate`.
    pub fn native(&self, gate: LogicalGate) -> NativeGate {
        match gate {
            LogicalGate::X => self.x,
            LogicalGate::Y => self.y,
            LogicalGate::Z => self.z,
            LogicalGate::XBar => self.xb,
            LogicalGate::YBar => self.yb,
            LogicalGate::ZBar => self.zb,
            LogicalGate::Hadamard => self.h,
        }
    }

    /// Appends the native form of `gate` to `circuit` on `qubit`.
    pub fn decompose<C: Circuit + ?Sized>(
        &self,
        circuit: &mut C,
        gate: LogicalGate,
        qubit: QubitId,
    ) -> std::result::Result<(), C::Error> {
        self.native(gate).append_to(circuit, qubit)
    }

    /// Rejects tables holding NaN or infinite angles.
    pub fn validate(&self) -> Result<()> {
        for gate in LogicalGate::ALL {
            let native = self.native(gate);
            if native.angles().iter().any(|a| !a.is_finite()) {
                return Err(GaddError::InvalidTable {
                    message: format!("entry '{}' has a non-finite angle: {:?}", gate, native),
                });
            }
        }
        Ok(())
    }

    /// Parses and validates a table from YAML, one key per logical gate:
    ///
    /// ```yaml
    /// x:  { rotation: { theta: 3.141592653589793, phi: 0.0, lambda: 3.141592653589793 } }
    /// z:  { phase: { lambda: 3.141592653589793 } }
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let table: DecompositionTable = serde_yaml::from_str(yaml)?;
        table.validate()?;
        Ok(table)
    }

    /// Serializes the table to YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Builds a [`DecompositionTable`] from scratch.
///
/// Nothing is inherited from an existing table: every gate must be given
/// or [`build`](Self::build) fails.
#[derive(Debug, Clone, Default)]
pub struct DecompositionTableBuilder {
    entries: [Option<NativeGate>; 7],
}

impl DecompositionTableBuilder {
    /// Sets the native form of `gate`, replacing any earlier entry for it.
    pub fn with_entry(mut self, gate: LogicalGate, native: NativeGate) -> Self {
        self.entries[slot(gate)] = Some(native);
        self
    }

    /// Finishes the table.
    ///
    /// # Returns
    /// * `Err(GaddError::InvalidTable)` naming the first missing gate, or
    ///   from [`DecompositionTable::validate`].
    pub fn build(self) -> Result<DecompositionTable> {
        let entry = |gate: LogicalGate| {
            self.entries[slot(gate)].ok_or_else(|| GaddError::InvalidTable {
                message: format!("missing entry '{}'", gate),
            })
        };
        let table = DecompositionTable {
            x: entry(LogicalGate::X)?,
            y: entry(LogicalGate::Y)?,
            z: entry(LogicalGate::Z)?,
            xb: entry(LogicalGate::XBar)?,
            yb: entry(LogicalGate::YBar)?,
            zb: entry(LogicalGate::ZBar)?,
            h: entry(LogicalGate::Hadamard)?,
        };
        table.validate()?;
        Ok(table)
    }
}

/// Position of `gate` in [`LogicalGate::ALL`].
fn slot(gate: LogicalGate) -> usize {
    match gate {
        LogicalGate::X => 0,
        LogicalGate::Y => 1,
        LogicalGate::Z => 2,
        LogicalGate::XBar => 3,
        LogicalGate::YBar => 4,
        LogicalGate::ZBar => 5,
        LogicalGate::Hadamard => 6,
    }
}

impl Default for DecompositionTable {
    fn default() -> Self {
        IBMQ_ARMONK
    }
}

// --- ibmq_armonk helpers ---

/// Appends `x` on `qubit` as `u3(π, 0, π)`.
pub fn decompose_x<C: Circuit + ?Sized>(circuit: &mut C, qubit: QubitId) -> std::result::Result<(), C::Error> {
    IBMQ_ARMONK.decompose(circuit, LogicalGate::X, qubit)
}

/// Appends `y` on `qubit` as `u3(π, π/2, π/2)`.
pub fn decompose_y<C: Circuit + ?Sized>(circuit: &mut C, qubit: QubitId) -> std::result::Result<(), C::Error> {
    IBMQ_ARMONK.decompose(circuit, LogicalGate::Y, qubit)
}

/// Appends `z` on `qubit` as `u1(π)`.
pub fn decompose_z<C: Circuit + ?Sized>(circuit: &mut C, qubit: QubitId) -> std::result::Result<(), C::Error> {
    IBMQ_ARMONK.decompose(circuit, LogicalGate::Z, qubit)
}

/// Appends `x̄` on `qubit` as `u1(π)`.
pub fn decompose_xb<C: Circuit + ?Sized>(circuit: &mut C, qubit: QubitId) -> std::result::Result<(), C::Error> {
    IBMQ_ARMONK.decompose(circuit, LogicalGate::XBar, qubit)
}

/// Appends `ȳ` on `qubit` as `u1(3π)`.
pub fn decompose_yb<C: Circuit + ?Sized>(circuit: &mut C, qubit: QubitId) -> std::result::Result<(), C::Error> {
    IBMQ_ARMONK.decompose(circuit, LogicalGate::YBar, qubit)
}

/// Appends `z̄` on `qubit` as `u3(π, 0, π)`.
pub fn decompose_zb<C: Circuit + ?Sized>(circuit: &mut C, qubit: QubitId) -> std::result::Result<(), C::Error> {
    IBMQ_ARMONK.decompose(circuit, LogicalGate::ZBar, qubit)
}

/// Appends a Hadamard on `qubit` as `u3(π/2, 0, π)`.
pub fn decompose_h<C: Circuit + ?Sized>(circuit: &mut C, qubit: QubitId) -> std::result::Result<(), C::Error> {
    IBMQ_ARMONK.decompose(circuit, LogicalGate::Hadamard, qubit)
}
