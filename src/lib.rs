// src/lib.rs

//! `gadd` - Dynamical decoupling sequences for quantum circuits
//!
//! This library appends predefined single-qubit pulse sequences (free
//! evolution, XY4, XZ4 and a native-gate XY4) to any circuit implementing the
//! [`Circuit`] capability, and expresses Pauli and Pauli-bar gates in terms
//! of a backend's native rotations through a pluggable [`DecompositionTable`].

pub mod core;
pub mod operations;
pub mod circuits;
pub mod decomposition;
pub mod sequences;
pub mod validation;
pub mod config;

// Re-export the most common types for easier top-level use
pub use crate::core::{GaddError, Matrix2, Pauli, QubitId};
pub use operations::Operation;
pub use circuits::{Circuit, CircuitBuilder, RecordingCircuit};
pub use decomposition::{
    BackendTables,
    DecompositionTable,
    DecompositionTableBuilder,
    LogicalGate,
    NativeGate,
    decompose_h,
    decompose_x,
    decompose_xb,
    decompose_y,
    decompose_yb,
    decompose_z,
    decompose_zb,
};
pub use sequences::{SequenceKind, SequenceSpec, free_evolution, xy4, xy4_native, xy4_native_armonk, xz4};
pub use validation::{check_refocusing, logical_pulses, net_unitary};
pub use config::Config;

// Example 1: XY4 on a recording circuit
// Appends two XY4 cycles with one idle after every pulse and inspects what
// was recorded.
/// ```
/// use gadd::{RecordingCircuit, Operation, xy4, GaddError};
///
/// let mut circuit = RecordingCircuit::single();
/// let gates = xy4(&mut circuit, 2, 1)?;
/// println!("{}", circuit);
///
/// // 2 cycles * (4 pulses + 4 idles)
/// assert_eq!(gates, 16);
/// // One barrier before every gate plus the trailing one.
/// assert_eq!(circuit.barrier_count(), 17);
///
/// let first: Vec<&str> = circuit.gates().take(4).map(Operation::symbol).collect();
/// assert_eq!(first, ["Y", "I", "X", "I"]);
/// # Ok::<(), GaddError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Native-gate XY4 against the named-gate version
// Both sequences carry the same logical pulses once native rotations are
// mapped back to Paulis, and both refocus.
/// ```
/// use gadd::{RecordingCircuit, DecompositionTable, QubitId, xy4, xy4_native};
/// use gadd::validation::{check_refocusing, logical_pulses};
///
/// let q0 = QubitId::ZERO;
/// let mut named = RecordingCircuit::single();
/// let mut native = RecordingCircuit::single();
/// xy4(&mut named, 3, 2).unwrap();
/// xy4_native(&mut native, &DecompositionTable::ibmq_armonk(), 3, 2).unwrap();
///
/// assert_eq!(
///     logical_pulses(named.operations(), q0).unwrap(),
///     logical_pulses(native.operations(), q0).unwrap(),
/// );
/// check_refocusing(native.operations(), q0).unwrap();
/// ```
#[doc(hidden)]
const _: () = ();
