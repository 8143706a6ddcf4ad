//! Error handling logic

use std::fmt;

/// Index of a physical qubit inside a circuit's quantum register.
///
/// Decoupling sequences always act on a single target qubit; the builders
/// default to `QubitId(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The qubit every default builder targets.
    pub const ZERO: QubitId = QubitId(0);
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q({})", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(value: u32) -> Self {
        QubitId(value)
    }
}

/// Result type alias for crate operations.
pub type Result<T> = std::result::Result<T, GaddError>;

/// Errors raised by the crate's own components.
///
/// The sequence builders never wrap errors coming from a caller-supplied
/// circuit; those surface as the circuit's own `Error` type.
#[derive(Debug)]
pub enum GaddError {
    /// A sequence description that cannot be built.
    InvalidSequence {
        /// InvalidSequence failure message
        message: String,
    },

    /// No decomposition table is registered under this backend name.
    UnknownBackend {
        /// Requested backend name
        name: String,
    },

    /// A decomposition table is incomplete or holds non-finite angles.
    InvalidTable {
        /// InvalidTable failure message
        message: String,
    },

    /// The recording circuit rejected an append.
    Circuit {
        /// Offending qubit
        qubit: QubitId,
        /// Circuit failure message
        message: String,
    },

    /// Configuration is inconsistent.
    Config {
        /// Config failure message
        message: String,
    },

    /// Reading a configuration or table file failed.
    Io(std::io::Error),

    /// YAML could not be parsed into the expected shape.
    Serialization {
        /// Serialization failure message
        message: String,
    },
}

impl fmt::Display for GaddError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GaddError::InvalidSequence { message } => write!(f, "Invalid sequence: {}", message),
            GaddError::UnknownBackend { name } => write!(f, "No decomposition table for backend '{}'", name),
            GaddError::InvalidTable { message } => write!(f, "Invalid decomposition table: {}", message),
            GaddError::Circuit { qubit, message } => write!(f, "Circuit error ({}): {}", qubit, message),
            GaddError::Config { message } => write!(f, "Configuration error: {}", message),
            GaddError::Io(e) => write!(f, "IO error: {}", e),
            GaddError::Serialization { message } => write!(f, "Serialization error: {}", message),
        }
    }
}

impl std::error::Error for GaddError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GaddError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GaddError {
    fn from(e: std::io::Error) -> Self {
        GaddError::Io(e)
    }
}

impl From<serde_yaml::Error> for GaddError {
    fn from(e: serde_yaml::Error) -> Self {
        GaddError::Serialization { message: e.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_display() {
        assert_eq!(QubitId(3).to_string(), "q(3)");
        assert_eq!(QubitId::default(), QubitId::ZERO);
        assert_eq!(QubitId::from(7), QubitId(7));
    }

    #[test]
    fn test_error_display() {
        let err = GaddError::UnknownBackend { name: "ibmq_foo".to_string() };
        assert_eq!(err.to_string(), "No decomposition table for backend 'ibmq_foo'");

        let err = GaddError::Circuit { qubit: QubitId(2), message: "out of range".to_string() };
        assert_eq!(err.to_string(), "Circuit error (q(2)): out of range");
    }

    #[test]
    fn test_io_error_source() {
        use std::error::Error;
        let err: GaddError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("IO error"));
    }
}
