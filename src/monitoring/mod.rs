/*!
 * Monitoring
 * Structured tracing setup for registry consumers
 */

mod tracer;

pub use tracer::init_tracing;
