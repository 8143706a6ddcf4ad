// src/sequences/mod.rs

//! Dynamical decoupling sequence builders.
//!
//! Every builder appends a fixed pattern to one qubit of a caller-owned
//! [`Circuit`] and returns the number of gates (barriers excluded) it
//! appended. Each gate is preceded by a barrier and the whole sequence is
//! closed by one trailing barrier, so nothing can be reordered or merged by
//! a later compilation pass.
//!
//! Counts are unsigned; a zero count appends only the trailing barrier.

use crate::circuits::Circuit;
use crate::core::{GaddError, Pauli, QubitId};
use crate::decomposition::{DecompositionTable, IBMQ_ARMONK, LogicalGate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Pulse block of XY4: `Y X Y X`.
pub const XY4_PATTERN: [Pauli; 4] = [Pauli::Y, Pauli::X, Pauli::Y, Pauli::X];

/// Pulse block of XZ4: `Z X Z X`.
///
/// Z is a virtual frame change on IBM hardware, so this block is shorter
/// than XY4 while refocusing the same dephasing.
pub const XZ4_PATTERN: [Pauli; 4] = [Pauli::Z, Pauli::X, Pauli::Z, Pauli::X];

// --- Builders on qubit 0 ---

/// Appends `n` barrier-preceded identities and a trailing barrier to qubit 0.
/// Returns `n`.
pub fn free_evolution<C: Circuit + ?Sized>(circuit: &mut C, n: usize) -> Result<usize, C::Error> {
    free_evolution_on(circuit, QubitId::ZERO, n)
}

/// Appends `ncyc` XY4 blocks with `ni` idles after every pulse to qubit 0,
/// using the circuit's named Paulis. Returns `ncyc * (4 + 4*ni)`.
pub fn xy4<C: Circuit + ?Sized>(circuit: &mut C, ncyc: usize, ni: usize) -> Result<usize, C::Error> {
    xy4_on(circuit, QubitId::ZERO, ncyc, ni)
}

/// Same pattern as [`xy4`] but each pulse is the native gate from `table`.
pub fn xy4_native<C: Circuit + ?Sized>(
    circuit: &mut C,
    table: &DecompositionTable,
    ncyc: usize,
    ni: usize,
) -> Result<usize, C::Error> {
    xy4_native_on(circuit, table, QubitId::ZERO, ncyc, ni)
}

/// [`xy4_native`] with the `ibmq_armonk` table.
pub fn xy4_native_armonk<C: Circuit + ?Sized>(circuit: &mut C, ncyc: usize, ni: usize) -> Result<usize, C::Error> {
    xy4_native_on(circuit, &IBMQ_ARMONK, QubitId::ZERO, ncyc, ni)
}

/// Appends `ncyc` XZ4 blocks with `ni` idles after every pulse to qubit 0.
/// Returns `ncyc * (4 + 4*ni)`.
pub fn xz4<C: Circuit + ?Sized>(circuit: &mut C, ncyc: usize, ni: usize) -> Result<usize, C::Error> {
    xz4_on(circuit, QubitId::ZERO, ncyc, ni)
}

// --- Builders on an explicit qubit ---

/// [`free_evolution`] on `qubit`.
pub fn free_evolution_on<C: Circuit + ?Sized>(circuit: &mut C, qubit: QubitId, n: usize) -> Result<usize, C::Error> {
    let ng = append_idles(circuit, qubit, n)?;
    circuit.append_barrier(qubit)?;
    debug!(sequence = "free", %qubit, n, gates = ng, "Appended decoupling sequence");
    Ok(ng)
}

/// [`xy4`] on `qubit`.
pub fn xy4_on<C: Circuit + ?Sized>(circuit: &mut C, qubit: QubitId, ncyc: usize, ni: usize) -> Result<usize, C::Error> {
    let ng = four_pulse(circuit, qubit, ncyc, ni, &XY4_PATTERN, |c, p, q| append_pauli(c, *p, q))?;
    debug!(sequence = "xy4", %qubit, ncyc, ni, gates = ng, "Appended decoupling sequence");
    Ok(ng)
}

/// [`xy4_native`] on `qubit`.
pub fn xy4_native_on<C: Circuit + ?Sized>(
    circuit: &mut C,
    table: &DecompositionTable,
    qubit: QubitId,
    ncyc: usize,
    ni: usize,
) -> Result<usize, C::Error> {
    const BLOCK: [LogicalGate; 4] = [LogicalGate::Y, LogicalGate::X, LogicalGate::Y, LogicalGate::X];
    let ng = four_pulse(circuit, qubit, ncyc, ni, &BLOCK, |c, g, q| table.decompose(c, *g, q))?;
    debug!(sequence = "xy4_native", %qubit, ncyc, ni, gates = ng, "Appended decoupling sequence");
    Ok(ng)
}

/// [`xz4`] on `qubit`.
pub fn xz4_on<C: Circuit + ?Sized>(circuit: &mut C, qubit: QubitId, ncyc: usize, ni: usize) -> Result<usize, C::Error> {
    let ng = four_pulse(circuit, qubit, ncyc, ni, &XZ4_PATTERN, |c, p, q| append_pauli(c, *p, q))?;
    debug!(sequence = "xz4", %qubit, ncyc, ni, gates = ng, "Appended decoupling sequence");
    Ok(ng)
}

/// Appends the named gate for `pauli`; `I` becomes an identity.
fn append_pauli<C: Circuit + ?Sized>(circuit: &mut C, pauli: Pauli, qubit: QubitId) -> Result<(), C::Error> {
    match pauli {
        Pauli::I => circuit.append_identity(qubit),
        Pauli::X => circuit.append_pauli_x(qubit),
        Pauli::Y => circuit.append_pauli_y(qubit),
        Pauli::Z => circuit.append_pauli_z(qubit),
    }
}

/// `n` × (barrier, identity). No trailing barrier.
fn append_idles<C: Circuit + ?Sized>(circuit: &mut C, qubit: QubitId, n: usize) -> Result<usize, C::Error> {
    for _ in 0..n {
        circuit.append_barrier(qubit)?;
        circuit.append_identity(qubit)?;
    }
    Ok(n)
}

/// `ncyc` × block, where every pulse is (barrier, pulse, `ni` idles), then a
/// trailing barrier.
fn four_pulse<C, P, F>(
    circuit: &mut C,
    qubit: QubitId,
    ncyc: usize,
    ni: usize,
    block: &[P; 4],
    mut emit: F,
) -> Result<usize, C::Error>
where
    C: Circuit + ?Sized,
    F: FnMut(&mut C, &P, QubitId) -> Result<(), C::Error>,
{
    let mut ng = 0;
    for _ in 0..ncyc {
        for pulse in block {
            circuit.append_barrier(qubit)?;
            emit(&mut *circuit, pulse, qubit)?;
            ng += 1;
            ng += append_idles(circuit, qubit, ni)?;
        }
    }
    circuit.append_barrier(qubit)?;
    Ok(ng)
}

//-------------------------------------------------------------------------
// Sequence descriptions
//-------------------------------------------------------------------------

/// The catalogue of sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceKind {
    /// Idle only; `ncyc` is the number of identities.
    #[serde(rename = "free")]
    FreeEvolution,
    /// `Y X Y X` with named Paulis.
    Xy4,
    /// `Y X Y X` with native gates from a decomposition table.
    Xy4Native,
    /// `Z X Z X` with named Paulis.
    Xz4,
}

impl SequenceKind {
    /// All kinds, in catalogue order.
    pub const ALL: [SequenceKind; 4] = [
        SequenceKind::FreeEvolution,
        SequenceKind::Xy4,
        SequenceKind::Xy4Native,
        SequenceKind::Xz4,
    ];

    /// Name used in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            SequenceKind::FreeEvolution => "free",
            SequenceKind::Xy4 => "xy4",
            SequenceKind::Xy4Native => "xy4_native",
            SequenceKind::Xz4 => "xz4",
        }
    }

    /// The logical 4-pulse block, or `None` for free evolution.
    pub fn pulse_pattern(&self) -> Option<[Pauli; 4]> {
        match self {
            SequenceKind::FreeEvolution => None,
            SequenceKind::Xy4 | SequenceKind::Xy4Native => Some(XY4_PATTERN),
            SequenceKind::Xz4 => Some(XZ4_PATTERN),
        }
    }
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SequenceKind {
    type Err = GaddError;

    fn from_str(s: &str) -> Result<Self, GaddError> {
        SequenceKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GaddError::InvalidSequence { message: format!("unknown sequence kind '{}'", s) })
    }
}

/// An immutable (kind, cycle count, idle count) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceSpec {
    /// Which sequence.
    pub kind: SequenceKind,
    /// Cycles of the 4-pulse block, or identities for free evolution.
    #[serde(default = "default_ncyc")]
    pub ncyc: usize,
    /// Identities after every pulse. Ignored by free evolution.
    #[serde(default)]
    pub ni: usize,
}

fn default_ncyc() -> usize {
    1
}

impl SequenceSpec {
    /// A `kind` sequence of `ncyc` cycles with `ni` idles after each pulse.
    pub fn new(kind: SequenceKind, ncyc: usize, ni: usize) -> Self {
        Self { kind, ncyc, ni }
    }

    /// Free evolution over `n` identities.
    pub fn free(n: usize) -> Self {
        Self::new(SequenceKind::FreeEvolution, n, 0)
    }

    /// The logical 4-pulse block, or `None` for free evolution.
    pub fn pulse_pattern(&self) -> Option<[Pauli; 4]> {
        self.kind.pulse_pattern()
    }

    /// Gate count [`apply`](Self::apply) will return, saturating on overflow.
    pub fn gate_count(&self) -> usize {
        match self.kind {
            SequenceKind::FreeEvolution => self.ncyc,
            _ => self.ncyc.saturating_mul(self.ni.saturating_add(1).saturating_mul(4)),
        }
    }

    /// Appends the sequence to `circuit` on `qubit`.
    ///
    /// `table` is consulted only by [`SequenceKind::Xy4Native`].
    pub fn apply<C: Circuit + ?Sized>(
        &self,
        circuit: &mut C,
        qubit: QubitId,
        table: &DecompositionTable,
    ) -> Result<usize, C::Error> {
        match self.kind {
            SequenceKind::FreeEvolution => free_evolution_on(circuit, qubit, self.ncyc),
            SequenceKind::Xy4 => xy4_on(circuit, qubit, self.ncyc, self.ni),
            SequenceKind::Xy4Native => xy4_native_on(circuit, table, qubit, self.ncyc, self.ni),
            SequenceKind::Xz4 => xz4_on(circuit, qubit, self.ncyc, self.ni),
        }
    }
}

impl Default for SequenceSpec {
    fn default() -> Self {
        Self::new(SequenceKind::Xy4, 1, 0)
    }
}

impl fmt::Display for SequenceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SequenceKind::FreeEvolution => write!(f, "free(n={})", self.ncyc),
            kind => write!(f, "{}(ncyc={}, ni={})", kind, self.ncyc, self.ni),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::RecordingCircuit;
    use crate::operations::Operation;

    const Q0: QubitId = QubitId::ZERO;

    #[test]
    fn test_free_evolution_three() -> Result<(), GaddError> {
        let mut circ = RecordingCircuit::single();
        assert_eq!(free_evolution(&mut circ, 3)?, 3);

        let b = Operation::Barrier { target: Q0 };
        let i = Operation::Identity { target: Q0 };
        assert_eq!(circ.operations(), &[b.clone(), i.clone(), b.clone(), i.clone(), b.clone(), i, b]);
        Ok(())
    }

    #[test]
    fn test_free_evolution_zero_is_single_barrier() -> Result<(), GaddError> {
        let mut circ = RecordingCircuit::single();
        assert_eq!(free_evolution(&mut circ, 0)?, 0);
        assert_eq!(circ.operations(), &[Operation::Barrier { target: Q0 }]);
        Ok(())
    }

    #[test]
    fn test_xy4_two_cycles_one_idle() -> Result<(), GaddError> {
        let mut circ = RecordingCircuit::single();
        assert_eq!(xy4(&mut circ, 2, 1)?, 16);

        let gates: Vec<&str> = circ.gates().map(Operation::symbol).collect();
        assert_eq!(
            gates,
            ["Y", "I", "X", "I", "Y", "I", "X", "I", "Y", "I", "X", "I", "Y", "I", "X", "I"]
        );
        // A barrier before every op and one trailing barrier.
        let ops = circ.operations();
        assert_eq!(ops.len(), 33);
        for pair in ops[..32].chunks(2) {
            assert!(pair[0].is_barrier() && pair[1].is_gate());
        }
        assert!(ops[32].is_barrier());
        Ok(())
    }

    #[test]
    fn test_xy4_zero_cycles() -> Result<(), GaddError> {
        let mut circ = RecordingCircuit::single();
        assert_eq!(xy4(&mut circ, 0, 5)?, 0);
        assert_eq!(circ.len(), 1);
        assert_eq!(circ.barrier_count(), 1);
        Ok(())
    }

    #[test]
    fn test_xz4_pattern() -> Result<(), GaddError> {
        let mut circ = RecordingCircuit::single();
        assert_eq!(xz4(&mut circ, 1, 0)?, 4);
        let gates: Vec<&str> = circ.gates().map(Operation::symbol).collect();
        assert_eq!(gates, ["Z", "X", "Z", "X"]);
        assert_eq!(circ.barrier_count(), 5);
        Ok(())
    }

    #[test]
    fn test_xy4_native_uses_rotations() -> Result<(), GaddError> {
        let mut circ = RecordingCircuit::single();
        assert_eq!(xy4_native_armonk(&mut circ, 1, 0)?, 4);
        let pulses: Vec<&Operation> = circ.gates().collect();
        assert!(pulses.iter().all(|op| matches!(op, Operation::Rotation { .. })));
        Ok(())
    }

    #[test]
    fn test_explicit_qubit() -> Result<(), GaddError> {
        let mut circ = RecordingCircuit::new(3);
        xz4_on(&mut circ, QubitId(2), 1, 1)?;
        assert!(circ.operations().iter().all(|op| op.target() == QubitId(2)));
        Ok(())
    }

    #[test]
    fn test_circuit_error_propagates_unchanged() {
        let mut circ = RecordingCircuit::new(1);
        match xy4_on(&mut circ, QubitId(4), 1, 0) {
            Err(GaddError::Circuit { qubit, .. }) => assert_eq!(qubit, QubitId(4)),
            other => panic!("expected circuit error, got {:?}", other),
        }
    }

    #[test]
    fn test_gate_count_matches_apply() -> Result<(), GaddError> {
        for kind in SequenceKind::ALL {
            for ncyc in 0..3 {
                for ni in 0..3 {
                    let spec = SequenceSpec::new(kind, ncyc, ni);
                    let mut circ = RecordingCircuit::single();
                    let ng = spec.apply(&mut circ, Q0, &IBMQ_ARMONK)?;
                    assert_eq!(ng, spec.gate_count(), "{}", spec);
                    assert_eq!(circ.gate_count(), ng, "{}", spec);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_pulse_patterns() {
        assert_eq!(SequenceSpec::new(SequenceKind::Xy4, 2, 1).pulse_pattern(), Some(XY4_PATTERN));
        assert_eq!(SequenceSpec::new(SequenceKind::Xy4Native, 1, 0).pulse_pattern(), Some(XY4_PATTERN));
        assert_eq!(SequenceSpec::new(SequenceKind::Xz4, 1, 0).pulse_pattern(), Some(XZ4_PATTERN));
        assert_eq!(SequenceSpec::free(3).pulse_pattern(), None);
    }

    #[test]
    fn test_pulse_pattern_matches_recorded_pulses() -> Result<(), GaddError> {
        use crate::validation::logical_pulses;
        for kind in [SequenceKind::Xy4, SequenceKind::Xy4Native, SequenceKind::Xz4] {
            let spec = SequenceSpec::new(kind, 1, 1);
            let mut circ = RecordingCircuit::single();
            spec.apply(&mut circ, Q0, &IBMQ_ARMONK)?;
            let expected = spec.pulse_pattern().map(|p| p.to_vec());
            assert_eq!(Some(logical_pulses(circ.operations(), Q0)?), expected, "{}", spec);
        }
        Ok(())
    }

    #[test]
    fn test_kind_from_str() -> Result<(), GaddError> {
        assert_eq!("XY4_native".parse::<SequenceKind>()?, SequenceKind::Xy4Native);
        assert_eq!(" free ".parse::<SequenceKind>()?, SequenceKind::FreeEvolution);
        assert!("udd".parse::<SequenceKind>().is_err());
        Ok(())
    }

    #[test]
    fn test_spec_display() {
        assert_eq!(SequenceSpec::free(4).to_string(), "free(n=4)");
        assert_eq!(SequenceSpec::new(SequenceKind::Xz4, 2, 1).to_string(), "xz4(ncyc=2, ni=1)");
    }
}
