// src/circuits/mod.rs

//! The circuit capability consumed by the sequence builders, plus an
//! in-crate recording implementation.
//!
//! Builders never own a circuit; they take `&mut impl Circuit` and only ever
//! append. Any concrete backend circuit (a simulator, an SDK wrapper, a
//! pulse-schedule emitter) plugs in by implementing [`Circuit`].

use crate::core::{GaddError, QubitId};
use crate::operations::Operation;
use std::fmt;

/// Append-only single-qubit circuit capability.
///
/// Every method appends exactly one element. Failures are reported in the
/// implementor's own error type and travel back through the builders
/// untouched.
///
/// Analogy: the subset of `qiskit.QuantumCircuit` used for decoupling
/// (`barrier`, `id`, `x`, `y`, `z`, `u3`, `u1`).
pub trait Circuit {
    /// Error raised by the concrete circuit, e.g. for an invalid qubit index.
    type Error;

    /// Appends a barrier on `qubit`.
    fn append_barrier(&mut self, qubit: QubitId) -> Result<(), Self::Error>;

    /// Appends an identity (idle) gate on `qubit`.
    fn append_identity(&mut self, qubit: QubitId) -> Result<(), Self::Error>;

    /// Appends the named Pauli X.
    fn append_pauli_x(&mut self, qubit: QubitId) -> Result<(), Self::Error>;

    /// Appends the named Pauli Y.
    fn append_pauli_y(&mut self, qubit: QubitId) -> Result<(), Self::Error>;

    /// Appends the named Pauli Z.
    fn append_pauli_z(&mut self, qubit: QubitId) -> Result<(), Self::Error>;

    /// Appends a general rotation `u3(theta, phi, lambda)`.
    fn append_rotation(&mut self, theta: f64, phi: f64, lambda: f64, qubit: QubitId) -> Result<(), Self::Error>;

    /// Appends a virtual phase rotation `u1(lambda)`.
    fn append_phase(&mut self, lambda: f64, qubit: QubitId) -> Result<(), Self::Error>;
}

/// A [`Circuit`] that records every appended element in order.
///
/// The register has a fixed width; appending to a qubit outside it fails
/// with [`GaddError::Circuit`], which is how the crate's own tests observe
/// error propagation through the builders.
#[derive(Clone, PartialEq)]
pub struct RecordingCircuit {
    /// Number of qubits in the register.
    num_qubits: u32,
    /// Appended elements, oldest first.
    operations: Vec<Operation>,
}

impl RecordingCircuit {
    /// Creates an empty circuit over `num_qubits` qubits.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            operations: Vec::new(),
        }
    }

    /// Creates an empty one-qubit circuit, the shape every decoupling
    /// experiment starts from.
    pub fn single() -> Self {
        Self::new(1)
    }

    /// Register width.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Appends `op` after checking its target is in the register.
    pub fn push(&mut self, op: Operation) -> Result<(), GaddError> {
        let target = op.target();
        if target.0 >= self.num_qubits {
            return Err(GaddError::Circuit {
                qubit: target,
                message: format!("qubit index out of range for a {}-qubit register", self.num_qubits),
            });
        }
        self.operations.push(op);
        Ok(())
    }

    /// All recorded elements in append order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Recorded elements that are gates (everything except barriers).
    pub fn gates(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter().filter(|op| op.is_gate())
    }

    /// Number of recorded elements matching `pred`.
    pub fn count_where<F>(&self, pred: F) -> usize
    where
        F: Fn(&Operation) -> bool,
    {
        self.operations.iter().filter(|op| pred(op)).count()
    }

    /// Number of barriers recorded.
    pub fn barrier_count(&self) -> usize {
        self.count_where(Operation::is_barrier)
    }

    /// Number of gates recorded.
    pub fn gate_count(&self) -> usize {
        self.count_where(Operation::is_gate)
    }

    /// Total number of recorded elements, barriers included.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl Default for RecordingCircuit {
    fn default() -> Self {
        Self::single()
    }
}

impl Circuit for RecordingCircuit {
    type Error = GaddError;

    fn append_barrier(&mut self, qubit: QubitId) -> Result<(), GaddError> {
        self.push(Operation::Barrier { target: qubit })
    }

    fn append_identity(&mut self, qubit: QubitId) -> Result<(), GaddError> {
        self.push(Operation::Identity { target: qubit })
    }

    fn append_pauli_x(&mut self, qubit: QubitId) -> Result<(), GaddError> {
        self.push(Operation::PauliX { target: qubit })
    }

    fn append_pauli_y(&mut self, qubit: QubitId) -> Result<(), GaddError> {
        self.push(Operation::PauliY { target: qubit })
    }

    fn append_pauli_z(&mut self, qubit: QubitId) -> Result<(), GaddError> {
        self.push(Operation::PauliZ { target: qubit })
    }

    fn append_rotation(&mut self, theta: f64, phi: f64, lambda: f64, qubit: QubitId) -> Result<(), GaddError> {
        self.push(Operation::Rotation { target: qubit, theta, phi, lambda })
    }

    fn append_phase(&mut self, lambda: f64, qubit: QubitId) -> Result<(), GaddError> {
        self.push(Operation::Phase { target: qubit, lambda })
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// Method-chaining helper for hand-written reference circuits.
///
/// The first failing append is remembered and returned from [`build`](Self::build);
/// later appends are skipped.
pub struct CircuitBuilder {
    circuit: RecordingCircuit,
    error: Option<GaddError>,
}

impl CircuitBuilder {
    /// Starts a builder over a `num_qubits`-wide register.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            circuit: RecordingCircuit::new(num_qubits),
            error: None,
        }
    }

    /// Appends an arbitrary operation.
    pub fn add_op(mut self, op: Operation) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.circuit.push(op) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Appends several operations in order.
    pub fn add_ops<I>(self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        ops.into_iter().fold(self, |b, op| b.add_op(op))
    }

    /// Appends a barrier on qubit `q`.
    pub fn barrier(self, q: u32) -> Self {
        self.add_op(Operation::Barrier { target: QubitId::from(q) })
    }

    /// Appends an identity on qubit `q`.
    pub fn id(self, q: u32) -> Self {
        self.add_op(Operation::Identity { target: QubitId::from(q) })
    }

    /// Appends a Pauli X on qubit `q`.
    pub fn x(self, q: u32) -> Self {
        self.add_op(Operation::PauliX { target: QubitId::from(q) })
    }

    /// Appends a Pauli Y on qubit `q`.
    pub fn y(self, q: u32) -> Self {
        self.add_op(Operation::PauliY { target: QubitId::from(q) })
    }

    /// Appends a Pauli Z on qubit `q`.
    pub fn z(self, q: u32) -> Self {
        self.add_op(Operation::PauliZ { target: QubitId::from(q) })
    }

    /// Appends `u3(theta, phi, lambda)` on qubit `q`.
    pub fn u3(self, theta: f64, phi: f64, lambda: f64, q: u32) -> Self {
        self.add_op(Operation::Rotation { target: QubitId::from(q), theta, phi, lambda })
    }

    /// Appends `u1(lambda)` on qubit `q`.
    pub fn u1(self, lambda: f64, q: u32) -> Self {
        self.add_op(Operation::Phase { target: QubitId::from(q), lambda })
    }

    /// Finishes the circuit, or returns the first append error.
    pub fn build(self) -> Result<RecordingCircuit, GaddError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.circuit),
        }
    }
}

impl fmt::Display for RecordingCircuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num_ops = self.operations.len();
        writeln!(f, "gadd::RecordingCircuit[{} operations on {} qubits]", num_ops, self.num_qubits)?;
        if num_ops == 0 {
            return Ok(());
        }

        const GATE_WIDTH: usize = 5; // e.g. "──X──"
        const H_WIRE: char = '─';

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                return symbol.chars().take(GATE_WIDTH).collect();
            }
            let total = GATE_WIDTH - slen;
            let pre = total / 2;
            let post = total - pre;
            format!("{}{}{}", H_WIRE.to_string().repeat(pre), symbol, H_WIRE.to_string().repeat(post))
        }

        let wire = H_WIRE.to_string().repeat(GATE_WIDTH);
        let label_width = format!("{}", QubitId(self.num_qubits.saturating_sub(1))).len();
        for q in 0..self.num_qubits {
            let label = format!("{}: ", QubitId(q));
            write!(f, "{:<width$}", label, width = label_width + 2)?;
            for op in &self.operations {
                if op.target().0 == q {
                    write!(f, "{}", format_gate(op.symbol()))?;
                } else {
                    write!(f, "{}", wire)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for RecordingCircuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
