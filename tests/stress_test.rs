/*!
 * Registry Stress Tests
 * Concurrent register/unregister churn and invocation races
 */

#![cfg(feature = "crash_handlers")]

use crash_diagnostics::{FatalErrorHandler, FatalErrorRegistry, HandlerRef};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;
const OPS_PER_THREAD: usize = 2_000;
const RACE_ROUNDS: u64 = 32;
const RACE_MUTATORS: u64 = 4;
const RACE_OPS: usize = 200;

struct CountingHandler {
    invocations: Arc<AtomicUsize>,
}

impl FatalErrorHandler for CountingHandler {
    fn on_fatal_error(&self, _writer: &mut dyn Write) {
        self.invocations.fetch_add(1, Ordering::Relaxed);
    }
}

fn counting_handler(invocations: &Arc<AtomicUsize>) -> HandlerRef {
    Arc::new(CountingHandler {
        invocations: Arc::clone(invocations),
    })
}

#[test]
fn test_concurrent_registration_converges() {
    let registry = Arc::new(FatalErrorRegistry::new());
    let invocations = Arc::new(AtomicUsize::new(0));

    let mut handles = vec![];
    for _ in 0..THREADS {
        let registry = Arc::clone(&registry);
        let invocations = Arc::clone(&invocations);

        handles.push(thread::spawn(move || {
            for _ in 0..OPS_PER_THREAD {
                let handler = counting_handler(&invocations);
                registry.register(handler.clone());
                registry.unregister(&handler);
            }
            // One registration per thread survives the churn
            registry.register(counting_handler(&invocations));
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    // No invocation raced the mutators, so the counters are exact
    let stats = registry.stats();
    assert_eq!(stats.handlers_registered, THREADS);
    assert_eq!(stats.total_registrations as usize, THREADS * (OPS_PER_THREAD + 1));
    assert_eq!(stats.total_removals as usize, THREADS * OPS_PER_THREAD);

    let mut out = Vec::new();
    registry.invoke(&mut out);
    assert_eq!(invocations.load(Ordering::Relaxed), THREADS);
}

#[test]
fn test_invocation_racing_mutators() {
    for seed in 0..RACE_ROUNDS {
        let registry = Arc::new(FatalErrorRegistry::new());
        let invocations = Arc::new(AtomicUsize::new(0));

        let seeded: Vec<HandlerRef> = (0..8).map(|_| counting_handler(&invocations)).collect();
        for handler in &seeded {
            registry.register(handler.clone());
        }

        let mut mutators = vec![];
        for thread_index in 0..RACE_MUTATORS {
            let registry = Arc::clone(&registry);
            let seeded = seeded.clone();

            mutators.push(thread::spawn(move || {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_mul(31).wrapping_add(thread_index));
                for _ in 0..RACE_OPS {
                    let handler = &seeded[rng.gen_range(0..seeded.len())];
                    if rng.gen_bool(0.5) {
                        registry.unregister(handler);
                    } else {
                        registry.register(handler.clone());
                    }
                }
            }));
        }

        let crasher = {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let mut out = Vec::new();
                registry.invoke(&mut out);
            })
        };

        for mutator in mutators {
            mutator.join().unwrap();
        }
        crasher.join().unwrap();

        // Quiescent now: drain whatever survived the raced exchange, then
        // confirm a further invocation finds nothing.
        invocations.store(0, Ordering::Relaxed);
        let mut out = Vec::new();
        registry.invoke(&mut out);
        let drained = invocations.load(Ordering::Relaxed);
        assert!(drained <= seeded.len() + RACE_MUTATORS as usize * RACE_OPS);

        let mut out = Vec::new();
        registry.invoke(&mut out);
        assert_eq!(invocations.load(Ordering::Relaxed), drained);
    }
}

#[test]
fn test_unregister_storm_on_shared_handler() {
    // Every thread hammers the same registration while others re-add it
    let registry = Arc::new(FatalErrorRegistry::new());
    let invocations = Arc::new(AtomicUsize::new(0));
    let shared = counting_handler(&invocations);

    let mut handles = vec![];
    for thread_index in 0..THREADS {
        let registry = Arc::clone(&registry);
        let shared = shared.clone();

        handles.push(thread::spawn(move || {
            for op in 0..OPS_PER_THREAD {
                if (op + thread_index) % 2 == 0 {
                    registry.register(shared.clone());
                } else {
                    registry.unregister(&shared);
                }
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    // The final list holds some number of pointer-equal duplicates; one
    // removal must take out all of them at once.
    registry.unregister(&shared);
    assert_eq!(registry.stats().handlers_registered, 0);

    let mut out = Vec::new();
    registry.invoke(&mut out);
    assert_eq!(invocations.load(Ordering::Relaxed), 0);
}
