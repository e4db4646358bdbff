/*!
 * Registry Types
 * Shared types for the fatal error handler registry
 */

use super::traits::FatalErrorHandler;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Shared reference to a registered handler
///
/// Removal identity is the `Arc` allocation: clones of the same `Arc`
/// name the same registration, independently constructed `Arc`s do not,
/// even when they wrap equal values.
pub type HandlerRef = Arc<dyn FatalErrorHandler>;

/// Configuration errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    #[diagnostic(
        code(registry::config::invalid_flag),
        help("Use \"1\", \"true\", \"0\" or \"false\".")
    )]
    InvalidFlag { var: String, value: String },
}

/// Registry statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryStats {
    pub handlers_registered: usize,
    pub total_registrations: u64,
    pub total_removals: u64,
    pub crash_invocations: u64,
    pub handlers_invoked: u64,
}
