/*!
 * Handler Capability
 * Contract implemented by subsystems that dump state on fatal errors
 */

use std::io::Write;

/// Crash-time diagnostic callback
///
/// Implementations write whatever they can about the current process
/// state into `writer`. Called from a crashing context: the process is
/// already going down, so implementations must not take locks and should
/// avoid allocating. A handler that panics aborts the remaining handlers
/// for that crash episode.
pub trait FatalErrorHandler: Send + Sync {
    /// Write diagnostic content for the current process state
    fn on_fatal_error(&self, writer: &mut dyn Write);
}
