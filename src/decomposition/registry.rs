//! Registry of decomposition tables keyed by backend name.
//!
//! Selecting a backend here only selects calibration data; loading a
//! provider account or submitting jobs is left to the caller's SDK.

use std::collections::HashMap;

use tracing::{debug, info};

use super::DecompositionTable;
use crate::core::{GaddError, Result};

/// Name under which the built-in table is registered.
pub const DEFAULT_BACKEND: &str = "ibmq_armonk";

/// Backend name → decomposition table.
///
/// # Example
///
/// ```
/// use gadd::decomposition::{BackendTables, DecompositionTable};
///
/// let mut tables = BackendTables::with_defaults();
/// tables.register("my_device", DecompositionTable::ibmq_armonk()).unwrap();
/// assert!(tables.get("my_device").is_ok());
/// assert!(tables.get("ibmq_nowhere").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BackendTables {
    tables: HashMap<String, DecompositionTable>,
}

impl BackendTables {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in `ibmq_armonk` table.
    pub fn with_defaults() -> Self {
        let mut tables = HashMap::new();
        tables.insert(DEFAULT_BACKEND.to_string(), DecompositionTable::ibmq_armonk());
        Self { tables }
    }

    /// Registers `table` under `name` after validating it.
    ///
    /// An existing table under the same name is replaced as a whole.
    pub fn register(&mut self, name: impl Into<String>, table: DecompositionTable) -> Result<()> {
        let name = name.into();
        table.validate()?;
        info!(backend = %name, "Registering decomposition table");
        if self.tables.insert(name.clone(), table).is_some() {
            debug!(backend = %name, "Replaced existing decomposition table");
        }
        Ok(())
    }

    /// Looks up the table for `name`.
    pub fn get(&self, name: &str) -> Result<&DecompositionTable> {
        self.tables
            .get(name)
            .ok_or_else(|| GaddError::UnknownBackend { name: name.to_string() })
    }

    /// Registered backend names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns `true` if no table is registered.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decomposition::NativeGate;

    #[test]
    fn test_defaults_contain_armonk() -> Result<()> {
        let tables = BackendTables::with_defaults();
        assert_eq!(tables.names(), vec![DEFAULT_BACKEND]);
        assert_eq!(*tables.get(DEFAULT_BACKEND)?, DecompositionTable::ibmq_armonk());
        Ok(())
    }

    #[test]
    fn test_unknown_backend() {
        let tables = BackendTables::new();
        assert!(tables.is_empty());
        match tables.get("ibmq_armonk") {
            Err(GaddError::UnknownBackend { name }) => assert_eq!(name, "ibmq_armonk"),
            other => panic!("expected unknown backend, got {:?}", other),
        }
    }

    #[test]
    fn test_register_replaces_whole_table() -> Result<()> {
        let mut tables = BackendTables::with_defaults();
        let mut replacement = DecompositionTable::ibmq_armonk();
        replacement.yb = NativeGate::Phase { lambda: std::f64::consts::PI };
        tables.register(DEFAULT_BACKEND, replacement)?;
        assert_eq!(tables.len(), 1);
        assert_eq!(tables.get(DEFAULT_BACKEND)?.yb, NativeGate::Phase { lambda: std::f64::consts::PI });
        Ok(())
    }

    #[test]
    fn test_register_rejects_invalid_table() {
        let mut tables = BackendTables::new();
        let mut bad = DecompositionTable::ibmq_armonk();
        bad.x = NativeGate::Rotation { theta: f64::INFINITY, phi: 0.0, lambda: 0.0 };
        assert!(tables.register("bad", bad).is_err());
        assert!(tables.is_empty());
    }
}
