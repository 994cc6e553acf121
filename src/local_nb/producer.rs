//! Useful functionality for working with producers.
//!
//! ## Obtaining Producers
//!
//! The [ThenProducer] produces the items of some producer, but only after a future has resolved. The [buffer](crate::buffer) functions return one. [ThenProducer::new] gates a producer on a [Signalled] future.
//!
//! The [IteratorAsProducer] produces the items of a finite iterator. `Vec`, `VecDeque` and arrays [convert](crate::local_nb::IntoProducer) into one.
//!
//! ## Adaptors
//!
//! The [SyncToLocalNb] adaptor allows you to use a [`sync::Producer`](crate::sync::Producer) as a [`local_nb::Producer`](crate::local_nb::Producer).
//!
//! ## Development Helpers
//!
//! The [Invariant] adaptor wraps any producer and makes it panic during tests when some client code violates the API contracts imposed by the producer traits. In production builds, the wrapper does nothing and compiles away without any overhead.
//!
//! The [TestProducer] (requires the `dev` feature) emits a fixed sequence of items followed by a configurable final value or error, and can be told to yield to the executor before every item.

mod iterator_as_producer;
mod sync_to_local_nb;
mod then;

#[cfg(test)]
mod invariant;
#[cfg(not(test))]
mod invariant_noop;

#[cfg(any(test, feature = "dev"))]
mod test_producer;

pub use iterator_as_producer::IteratorAsProducer_ as IteratorAsProducer;
pub use sync_to_local_nb::SyncToLocalNb;
pub use then::{Signalled, ThenProducer};

#[cfg(any(test, feature = "dev"))]
pub use test_producer::TestProducer_ as TestProducer;

// During testing we use a wrapper which panics on invariant transgressions.
// The no-op version of the wrapper is used for production code compilation.
#[cfg(test)]
pub use invariant::Invariant;
#[cfg(not(test))]
pub use invariant_noop::Invariant;
