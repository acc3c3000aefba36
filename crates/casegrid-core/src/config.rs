//! Generator configuration: guards against accidentally huge matrices.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Upper bound on the number of combinations a table may produce.
    /// None = unlimited (default).
    pub max_combinations: Option<u64>,
}

impl GeneratorConfig {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_limit(max_combinations: u64) -> Self {
        Self {
            max_combinations: Some(max_combinations),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
