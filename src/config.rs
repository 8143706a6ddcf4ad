//! Run configuration: which backend table, which sequence, which qubit.
//!
//! Configuration is loaded from multiple sources with the following priority
//! (later sources override earlier ones):
//!
//! 1. Built-in defaults (`ibmq_armonk`, one XY4 cycle, qubit 0)
//! 2. A YAML file
//! 3. Environment variables (`GADD_*`)
//!
//! ```yaml
//! backend: my_device
//! qubit: 0
//! sequence: { kind: xz4, ncyc: 8, ni: 2 }
//! tables:
//!   my_device:
//!     x:  { rotation: { theta: 3.141592653589793, phi: 0.0, lambda: 3.141592653589793 } }
//!     # ... all seven entries
//! ```

use std::collections::HashMap;
use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::circuits::Circuit;
use crate::core::{GaddError, QubitId, Result};
use crate::decomposition::{BackendTables, DEFAULT_BACKEND, DecompositionTable};
use crate::sequences::{SequenceKind, SequenceSpec};

/// Environment variable selecting the backend table.
pub const ENV_BACKEND: &str = "GADD_BACKEND";
/// Environment variable selecting the sequence kind.
pub const ENV_SEQUENCE: &str = "GADD_SEQUENCE";
/// Environment variable for the cycle count.
pub const ENV_NCYC: &str = "GADD_NCYC";
/// Environment variable for the idle count.
pub const ENV_NI: &str = "GADD_NI";
/// Environment variable for the target qubit.
pub const ENV_QUBIT: &str = "GADD_QUBIT";

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Backend whose decomposition table native sequences use
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Sequence to append
    #[serde(default)]
    pub sequence: SequenceSpec,

    /// Target qubit index
    #[serde(default)]
    pub qubit: u32,

    /// Extra decomposition tables, keyed by backend name
    #[serde(default)]
    pub tables: HashMap<String, DecompositionTable>,
}

fn default_backend() -> String {
    DEFAULT_BACKEND.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            sequence: SequenceSpec::default(),
            qubit: 0,
            tables: HashMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from an optional YAML file, then the environment.
    ///
    /// A path that does not exist leaves the defaults in place.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(path) = config_path {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                config = Self::from_yaml_str(&content)?;
                debug!(path = %path.display(), "Loaded configuration file");
            } else {
                warn!(path = %path.display(), "Configuration file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from YAML without consulting the environment.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Apply `GADD_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup. Malformed values are
    /// logged and ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup(ENV_BACKEND) {
            self.backend = val;
        }
        if let Some(val) = lookup(ENV_SEQUENCE) {
            match val.parse::<SequenceKind>() {
                Ok(kind) => self.sequence.kind = kind,
                Err(e) => warn!(var = ENV_SEQUENCE, value = %val, error = %e, "Ignoring override"),
            }
        }
        if let Some(n) = parse_count(&lookup, ENV_NCYC) {
            self.sequence.ncyc = n;
        }
        if let Some(n) = parse_count(&lookup, ENV_NI) {
            self.sequence.ni = n;
        }
        if let Some(val) = lookup(ENV_QUBIT) {
            match val.trim().parse::<u32>() {
                Ok(q) => self.qubit = q,
                Err(e) => warn!(var = ENV_QUBIT, value = %val, error = %e, "Ignoring override"),
            }
        }
    }

    /// Checks that the selected backend has a table and every supplied
    /// table is valid.
    pub fn validate(&self) -> Result<()> {
        self.backend_tables()?.get(&self.backend)?;
        Ok(())
    }

    /// Built-in tables plus those supplied in the configuration.
    pub fn backend_tables(&self) -> Result<BackendTables> {
        let mut tables = BackendTables::with_defaults();
        for (name, table) in &self.tables {
            tables.register(name.clone(), *table).map_err(|e| GaddError::Config {
                message: format!("table '{}': {}", name, e),
            })?;
        }
        Ok(tables)
    }

    /// The decomposition table for the selected backend.
    pub fn table(&self) -> Result<DecompositionTable> {
        Ok(*self.backend_tables()?.get(&self.backend)?)
    }

    /// Target qubit.
    pub fn qubit(&self) -> QubitId {
        QubitId(self.qubit)
    }

    /// Appends the configured sequence to `circuit`.
    ///
    /// Table resolution errors are converted into the circuit's error type;
    /// circuit errors pass through unchanged.
    pub fn apply<C>(&self, circuit: &mut C) -> std::result::Result<usize, C::Error>
    where
        C: Circuit + ?Sized,
        C::Error: From<GaddError>,
    {
        let table = self.table()?;
        self.sequence.apply(circuit, self.qubit(), &table)
    }
}

fn parse_count<F>(lookup: &F, key: &str) -> Option<usize>
where
    F: Fn(&str) -> Option<String>,
{
    let val = lookup(key)?;
    match val.trim().parse::<usize>() {
        Ok(n) => Some(n),
        Err(e) => {
            warn!(var = key, value = %val, error = %e, "Ignoring override");
            None
        }
    }
}
