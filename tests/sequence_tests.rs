// tests/sequence_tests.rs

use gadd::{
    Circuit, CircuitBuilder, DecompositionTable, GaddError, Operation, Pauli, QubitId, RecordingCircuit, SequenceKind,
    SequenceSpec, free_evolution, xy4, xy4_native, xz4,
};
use gadd::validation::logical_pulses;

const Q0: QubitId = QubitId::ZERO;

/// A circuit that writes OpenQASM 2 text, standing in for an external SDK.
#[derive(Default)]
struct QasmCircuit {
    lines: Vec<String>,
    limit: Option<usize>,
}

#[derive(Debug, PartialEq)]
enum QasmError {
    Full(usize),
}

impl QasmCircuit {
    fn emit(&mut self, line: String) -> Result<(), QasmError> {
        if let Some(limit) = self.limit {
            if self.lines.len() >= limit {
                return Err(QasmError::Full(limit));
            }
        }
        self.lines.push(line);
        Ok(())
    }
}

impl Circuit for QasmCircuit {
    type Error = QasmError;

    fn append_barrier(&mut self, q: QubitId) -> Result<(), QasmError> {
        self.emit(format!("barrier q[{}];", q.0))
    }
    fn append_identity(&mut self, q: QubitId) -> Result<(), QasmError> {
        self.emit(format!("id q[{}];", q.0))
    }
    fn append_pauli_x(&mut self, q: QubitId) -> Result<(), QasmError> {
        self.emit(format!("x q[{}];", q.0))
    }
    fn append_pauli_y(&mut self, q: QubitId) -> Result<(), QasmError> {
        self.emit(format!("y q[{}];", q.0))
    }
    fn append_pauli_z(&mut self, q: QubitId) -> Result<(), QasmError> {
        self.emit(format!("z q[{}];", q.0))
    }
    fn append_rotation(&mut self, theta: f64, phi: f64, lambda: f64, q: QubitId) -> Result<(), QasmError> {
        self.emit(format!("u3({:.4},{:.4},{:.4}) q[{}];", theta, phi, lambda, q.0))
    }
    fn append_phase(&mut self, lambda: f64, q: QubitId) -> Result<(), QasmError> {
        self.emit(format!("u1({:.4}) q[{}];", lambda, q.0))
    }
}

#[test]
fn test_free_evolution_scenario() -> Result<(), GaddError> {
    let mut circuit = RecordingCircuit::single();
    assert_eq!(free_evolution(&mut circuit, 3)?, 3);

    let expected = CircuitBuilder::new(1)
        .barrier(0).id(0)
        .barrier(0).id(0)
        .barrier(0).id(0)
        .barrier(0)
        .build()?;
    assert_eq!(circuit, expected);
    Ok(())
}

#[test]
fn test_free_evolution_counts() -> Result<(), GaddError> {
    for n in 0..10 {
        let mut circuit = RecordingCircuit::single();
        assert_eq!(free_evolution(&mut circuit, n)?, n);
        assert_eq!(circuit.count_where(Operation::is_identity), n);
        assert_eq!(circuit.barrier_count(), n + 1);
    }
    Ok(())
}

#[test]
fn test_xy4_and_xz4_patterns_and_counts() -> Result<(), GaddError> {
    for ncyc in 0..4 {
        for ni in 0..4 {
            let mut a = RecordingCircuit::single();
            let mut b = RecordingCircuit::single();
            let na = xy4(&mut a, ncyc, ni)?;
            let nb = xz4(&mut b, ncyc, ni)?;
            assert_eq!(na, ncyc * (4 + 4 * ni));
            assert_eq!(na, nb);
            assert_eq!(a.barrier_count(), na + 1);

            let xy: Vec<Pauli> = [Pauli::Y, Pauli::X, Pauli::Y, Pauli::X].repeat(ncyc);
            let xz: Vec<Pauli> = [Pauli::Z, Pauli::X, Pauli::Z, Pauli::X].repeat(ncyc);
            assert_eq!(logical_pulses(a.operations(), Q0)?, xy);
            assert_eq!(logical_pulses(b.operations(), Q0)?, xz);
        }
    }
    Ok(())
}

#[test]
fn test_native_xy4_matches_named_xy4() -> Result<(), GaddError> {
    let table = DecompositionTable::ibmq_armonk();
    for ncyc in 0..4 {
        for ni in 0..3 {
            let mut named = RecordingCircuit::single();
            let mut native = RecordingCircuit::single();
            assert_eq!(xy4(&mut named, ncyc, ni)?, xy4_native(&mut native, &table, ncyc, ni)?);
            assert_eq!(logical_pulses(named.operations(), Q0)?, logical_pulses(native.operations(), Q0)?);
            // Same layout of barriers and idles.
            let shape = |c: &RecordingCircuit| -> Vec<bool> { c.operations().iter().map(Operation::is_pulse).collect() };
            assert_eq!(shape(&named), shape(&native));
        }
    }
    Ok(())
}

#[test]
fn test_external_circuit_text() {
    let mut circuit = QasmCircuit::default();
    assert_eq!(xz4(&mut circuit, 1, 0), Ok(4));
    assert_eq!(
        circuit.lines,
        [
            "barrier q[0];", "z q[0];", "barrier q[0];", "x q[0];",
            "barrier q[0];", "z q[0];", "barrier q[0];", "x q[0];", "barrier q[0];",
        ]
    );
}

#[test]
fn test_external_circuit_error_passes_through() {
    let mut circuit = QasmCircuit { lines: Vec::new(), limit: Some(5) };
    assert_eq!(xy4(&mut circuit, 2, 0), Err(QasmError::Full(5)));
    assert_eq!(circuit.lines.len(), 5);
}

#[test]
fn test_spec_applies_to_external_circuit() {
    let table = DecompositionTable::ibmq_armonk();
    let spec = SequenceSpec::new(SequenceKind::Xy4Native, 1, 0);
    let mut circuit = QasmCircuit::default();
    assert_eq!(spec.apply(&mut circuit, Q0, &table), Ok(4));
    assert_eq!(circuit.lines[1], "u3(3.1416,1.5708,1.5708) q[0];");
    assert_eq!(circuit.lines[3], "u3(3.1416,0.0000,3.1416) q[0];");
}
