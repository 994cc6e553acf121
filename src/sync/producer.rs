//! Useful functionality for working with synchronous producers.
//!
//! ## Development Helpers
//!
//! The [TestProducer] (requires the `dev` feature) emits a fixed sequence of items followed by a configurable final value or error, which makes it the tool of choice for checking how code copes with failing sources. It panics when it is asked to produce after it has terminated.

#[cfg(any(test, feature = "dev"))]
mod test_producer;
#[cfg(any(test, feature = "dev"))]
pub use test_producer::TestProducer;
