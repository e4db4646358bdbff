/*!
 * Fatal Error Registry Module
 * Crash-time diagnostic handler registration and dispatch
 */

mod atomic_stats;
mod config;
mod guard;
mod registry;
pub mod traits;
pub mod types;

// Re-export public API
pub use atomic_stats::AtomicRegistryStats;
pub use config::{HANDLERS_ENV, RegistryConfig};
pub use guard::HandlerGuard;
pub use registry::{
    call_fatal_error_handlers, global, register_fatal_error_handler, remove_fatal_error_handler,
    FatalErrorRegistry,
};
pub use traits::FatalErrorHandler;
pub use types::{ConfigError, HandlerRef, RegistryStats};
