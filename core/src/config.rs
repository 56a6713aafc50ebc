//! config.rs
//! Per-bridge configuration.
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LEVEL, MAX_BUFFER_LEN};
use crate::types::BridgeError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Level used by callers that do not pass one (file service, bindings).
    /// Passed to the codec untouched.
    pub default_level: i32,

    /// Largest destination buffer the bridge may allocate.
    /// Values above the platform limit are clamped to it.
    pub max_buffer_len: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            default_level: DEFAULT_LEVEL,
            max_buffer_len: MAX_BUFFER_LEN,
        }
    }
}

impl BridgeConfig {
    pub fn new(default_level: Option<i32>, max_buffer_len: Option<u64>) -> Self {
        Self {
            default_level: default_level.unwrap_or(DEFAULT_LEVEL),
            max_buffer_len: max_buffer_len.unwrap_or(MAX_BUFFER_LEN),
        }
    }

    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self, BridgeError> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| BridgeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, BridgeError> {
        serde_json::to_string(self).map_err(|e| BridgeError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), BridgeError> {
        if self.max_buffer_len == 0 {
            return Err(BridgeError::Config("max_buffer_len must be non-zero".into()));
        }
        Ok(())
    }

    /// Allocation ceiling actually enforced.
    pub fn effective_max_buffer_len(&self) -> u64 {
        self.max_buffer_len.min(MAX_BUFFER_LEN)
    }
}
