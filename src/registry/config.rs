/*!
 * Registry Configuration
 * Runtime toggle for handler registration
 */

use super::types::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable controlling handler registration
pub const HANDLERS_ENV: &str = "CRASH_DIAG_HANDLERS";

/// Runtime configuration for a registry instance
///
/// Registration can also be compiled out entirely by disabling the
/// `crash_handlers` cargo feature; this toggle gates it per instance at
/// runtime. Invocation is always live either way and simply finds no
/// list when registration was off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Accept register/unregister calls
    pub enabled: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl RegistryConfig {
    /// Load configuration from the environment
    ///
    /// `CRASH_DIAG_HANDLERS` accepts "1", "true", "0" or "false"; an
    /// absent variable means the default (enabled).
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(HANDLERS_ENV) {
            Ok(value) => parse_flag(&value)
                .map(|enabled| Self { enabled })
                .ok_or_else(|| ConfigError::InvalidFlag {
                    var: HANDLERS_ENV.to_string(),
                    value,
                }),
            Err(_) => Ok(Self::default()),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}
