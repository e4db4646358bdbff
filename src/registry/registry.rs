/*!
 * Fatal Error Handler Registry
 * Exchange-based list handoff between administrative and crash-time paths
 */

use super::atomic_stats::AtomicRegistryStats;
use super::config::RegistryConfig;
use super::traits::FatalErrorHandler;
use super::types::{HandlerRef, RegistryStats};
use arc_swap::ArcSwapOption;
#[cfg(feature = "crash_handlers")]
use log::debug;
use parking_lot::Mutex;
use std::io::Write;
#[cfg(feature = "crash_handlers")]
use std::sync::Arc;

/// Ordered handler collection; insertion order is invocation order
type HandlerList = Vec<HandlerRef>;

/// Registry of callbacks to run when the process is crashing
///
/// Register/unregister take the administrative lock for their own
/// bookkeeping, but the list handoff itself is a single atomic exchange
/// on `slot`, independent of that lock. The crash path uses only the
/// exchange: a signal handler that tried to take the lock could deadlock
/// against the very thread it interrupted. Whichever path wins the
/// exchange owns the list; the loser observes an absent list and treats
/// it as empty. A register or unregister racing exactly with a crash can
/// therefore be skipped or lost.
#[cfg_attr(not(feature = "crash_handlers"), allow(dead_code))]
pub struct FatalErrorRegistry {
    enabled: bool,
    admin_lock: Mutex<()>,
    slot: ArcSwapOption<HandlerList>,
    stats: AtomicRegistryStats,
}

impl FatalErrorRegistry {
    /// Create an empty registry
    pub const fn new() -> Self {
        Self {
            enabled: true,
            admin_lock: Mutex::new(()),
            slot: ArcSwapOption::const_empty(),
            stats: AtomicRegistryStats::new(),
        }
    }

    /// Create a registry with a runtime configuration
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            enabled: config.enabled,
            ..Self::new()
        }
    }

    /// Add `handler` to the end of the invocation list
    ///
    /// Registration order is invocation order. Registering the same
    /// handler twice runs it twice.
    pub fn register(&self, handler: HandlerRef) {
        #[cfg(feature = "crash_handlers")]
        {
            if !self.enabled {
                return;
            }
            let _admin = self.admin_lock.lock();
            let mut list = self.take_list().unwrap_or_default();
            list.push(handler);
            self.stats.inc_registered();
            debug!("Registered fatal error handler ({} active)", list.len());
            self.slot.store(Some(Arc::new(list)));
        }
        #[cfg(not(feature = "crash_handlers"))]
        {
            let _ = handler;
        }
    }

    /// Remove every registration of `handler`
    ///
    /// Identity is `Arc` pointer equality. If the list is currently
    /// exchanged out by an in-progress invocation this is a silent no-op:
    /// the process is in the middle of crashing anyway, so don't add a
    /// fault on top of it. If the list drains, it is dropped and the slot
    /// stays empty.
    pub fn unregister(&self, handler: &HandlerRef) {
        #[cfg(feature = "crash_handlers")]
        {
            if !self.enabled {
                return;
            }
            let _admin = self.admin_lock.lock();
            let Some(mut list) = self.take_list() else {
                return;
            };
            let before = list.len();
            list.retain(|registered| !Arc::ptr_eq(registered, handler));
            let removed = before - list.len();
            if removed > 0 {
                self.stats.dec_registered(removed);
                debug!("Removed {} fatal error handler registration(s)", removed);
            }
            if !list.is_empty() {
                self.slot.store(Some(Arc::new(list)));
            }
        }
        #[cfg(not(feature = "crash_handlers"))]
        {
            let _ = handler;
        }
    }

    /// Crash-time entry point: run every registered handler once
    ///
    /// Takes the whole list with one atomic exchange and never touches
    /// the administrative lock; the slot is never `load`ed anywhere, so
    /// the exchange cannot wait on readers either. The list is dropped
    /// after iteration rather than restored: a second fault during the
    /// first finds an absent list and invokes nothing.
    pub fn invoke(&self, writer: &mut dyn Write) {
        if let Some(list) = self.slot.swap(None) {
            for handler in list.iter() {
                handler.on_fatal_error(writer);
            }
            self.stats.record_invocation(list.len());
        }
    }

    /// Snapshot the registry counters
    pub fn stats(&self) -> RegistryStats {
        self.stats.snapshot()
    }

    /// Exchange the list out of the slot, reclaiming sole ownership
    ///
    /// The registry never keeps a second clone of the list `Arc`, so the
    /// winner of the exchange holds the only reference.
    #[cfg(feature = "crash_handlers")]
    fn take_list(&self) -> Option<HandlerList> {
        self.slot
            .swap(None)
            .map(|list| Arc::try_unwrap(list).unwrap_or_else(|shared| (*shared).clone()))
    }
}

impl Default for FatalErrorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide registry; crash handling is a whole-process concern
static REGISTRY: FatalErrorRegistry = FatalErrorRegistry::new();

/// The process-wide registry instance
pub fn global() -> &'static FatalErrorRegistry {
    &REGISTRY
}

/// Register `handler` with the process-wide registry
pub fn register_fatal_error_handler(handler: HandlerRef) {
    REGISTRY.register(handler);
}

/// Remove `handler` from the process-wide registry
pub fn remove_fatal_error_handler(handler: &HandlerRef) {
    REGISTRY.unregister(handler);
}

/// Run the process-wide registry's handlers against `writer`
///
/// Called by the external fault handling mechanism exactly once per
/// detected fatal condition.
pub fn call_fatal_error_handlers(writer: &mut dyn Write) {
    REGISTRY.invoke(writer);
}
