/*!
 * Crash Diagnostics Library
 * Process-wide fatal error handler registry
 */

pub mod monitoring;
pub mod registry;

// Re-exports
pub use monitoring::init_tracing;
pub use registry::{
    call_fatal_error_handlers, register_fatal_error_handler, remove_fatal_error_handler,
    ConfigError, FatalErrorHandler, FatalErrorRegistry, HandlerGuard, HandlerRef, RegistryConfig,
    RegistryStats,
};
