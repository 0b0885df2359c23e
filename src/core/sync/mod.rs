/*!
 * Synchronization Primitives
 *
 * The buffer lock and its wait queues live in `buffer::shared`; this module
 * holds the cancellation signal that blocking waits observe.
 */

mod signal;

pub use signal::InterruptSignal;
