/*!
 * Lock-Free Registry Statistics
 * Atomic counters safe to touch from the crash path
 */

use super::types::RegistryStats;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Atomic registry statistics for lock-free updates
///
/// # Performance
/// - Cache-line aligned to prevent false sharing
/// - All operations use relaxed ordering
/// - Read-only snapshot requires no synchronization
#[repr(C, align(64))]
pub struct AtomicRegistryStats {
    handlers_registered: AtomicUsize,
    total_registrations: AtomicU64,
    total_removals: AtomicU64,
    crash_invocations: AtomicU64,
    handlers_invoked: AtomicU64,
}

impl AtomicRegistryStats {
    /// Create new atomic stats
    #[inline]
    pub const fn new() -> Self {
        Self {
            handlers_registered: AtomicUsize::new(0),
            total_registrations: AtomicU64::new(0),
            total_removals: AtomicU64::new(0),
            crash_invocations: AtomicU64::new(0),
            handlers_invoked: AtomicU64::new(0),
        }
    }

    /// Record a registration (lock-free)
    #[inline(always)]
    pub fn inc_registered(&self) {
        self.handlers_registered.fetch_add(1, Ordering::Relaxed);
        self.total_registrations.fetch_add(1, Ordering::Relaxed);
    }

    /// Record `count` removals (lock-free)
    #[inline(always)]
    pub fn dec_registered(&self, count: usize) {
        self.handlers_registered.fetch_sub(count, Ordering::Relaxed);
        self.total_removals.fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Record a crash invocation that drained `count` handlers
    ///
    /// Relaxed atomic adds only, safe from a faulting context.
    #[inline(always)]
    pub fn record_invocation(&self, count: usize) {
        self.crash_invocations.fetch_add(1, Ordering::Relaxed);
        self.handlers_invoked.fetch_add(count as u64, Ordering::Relaxed);
        self.handlers_registered.store(0, Ordering::Relaxed);
    }

    /// Get snapshot of current stats (no locks required)
    ///
    /// # Note
    /// Values may not be perfectly consistent with each other due to
    /// concurrent updates, but each individual value is accurate. This is
    /// acceptable for monitoring.
    #[inline]
    pub fn snapshot(&self) -> RegistryStats {
        RegistryStats {
            handlers_registered: self.handlers_registered.load(Ordering::Relaxed),
            total_registrations: self.total_registrations.load(Ordering::Relaxed),
            total_removals: self.total_removals.load(Ordering::Relaxed),
            crash_invocations: self.crash_invocations.load(Ordering::Relaxed),
            handlers_invoked: self.handlers_invoked.load(Ordering::Relaxed),
        }
    }
}

impl Default for AtomicRegistryStats {
    fn default() -> Self {
        Self::new()
    }
}
