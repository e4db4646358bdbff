/*!
 * Registration Guard
 * Scoped handler registration with automatic removal
 */

use super::registry::{register_fatal_error_handler, remove_fatal_error_handler};
use super::types::HandlerRef;

/// RAII registration against the process-wide registry
///
/// Registers on construction, unregisters on drop. A guard dropped while
/// a crash is in flight inherits the registry's best-effort semantics:
/// the removal may find the list already consumed.
pub struct HandlerGuard {
    handler: HandlerRef,
}

impl HandlerGuard {
    /// Register `handler` for the guard's lifetime
    pub fn new(handler: HandlerRef) -> Self {
        register_fatal_error_handler(handler.clone());
        Self { handler }
    }

    /// The guarded handler
    pub fn handler(&self) -> &HandlerRef {
        &self.handler
    }
}

impl Drop for HandlerGuard {
    fn drop(&mut self) {
        remove_fatal_error_handler(&self.handler);
    }
}
