#![allow(async_fn_in_trait)]

//! Eagerly drain a producer into a buffer, then lazily produce from that buffer.
//!
//! The typical use: start consuming a (possibly slow) source of items right away, do some unrelated work, and only iterate over the results once the source has been fully drained.
//!
//! ```
//! use eager_buffer::prelude::*;
//! # smol::block_on(async {
//!
//! let mut websites = eager_buffer::buffer(["ufotofu.org", "worm-blossom.org"]);
//!
//! // Other potentially time-consuming work here.
//!
//! // Producing only begins once the source has been drained completely.
//! assert_eq!(websites.produce().await, Ok(Left("ufotofu.org")));
//! assert_eq!(websites.produce().await, Ok(Left("worm-blossom.org")));
//! assert_eq!(websites.produce().await, Ok(Right(())));
//! # });
//! ```
//!
//! ## Module Overview
//!
//! The [`sync`] module defines synchronous producers, the [`local_nb`] module defines their non-blocking counterparts (whose futures are `!Send`) together with the buffering functions:
//!
//! - [`buffer`], [`buffer_with`], [`buffer_into`] and [`buffer_with_into`] hand a source and a buffer to a *write* function and return a [`ThenProducer`](local_nb::producer::ThenProducer) over the buffer, and
//! - [`default_write`] is the write function used when none is supplied: it moves every item of the source into the buffer, in order.
//!
//! ## Sources and Buffers
//!
//! Anything implementing [`IntoProducer`](local_nb::IntoProducer) can serve as a source or as a buffer: every [`local_nb::Producer`], the std collections `Vec`, `VecDeque` and arrays, any [`sync::Producer`] wrapped in [`SyncToLocalNb`](local_nb::producer::SyncToLocalNb), and any finite iterator wrapped in [`IteratorAsProducer`](local_nb::producer::IteratorAsProducer). When buffering with the default write function, the buffer must additionally be a [`Consumer`](local_nb::Consumer).
//!
//! Values that are none of these are rejected at compile time:
//!
//! ```compile_fail
//! // A number is neither a synchronous nor an asynchronous producer.
//! let _ = eager_buffer::buffer(3);
//! ```

pub mod local_nb;
pub mod sync;

mod common;
pub use common::errors::*;

pub use local_nb::{buffer, buffer_into, buffer_with, buffer_with_into, default_write};

/// A "prelude" for crates using the `eager_buffer` crate.
///
/// ```
/// use eager_buffer::prelude::*;
/// ```
pub mod prelude {
    pub use crate::local_nb::{Consumer, IntoProducer, Producer};
    pub use crate::sync::Producer as SyncProducer;
    pub use either::Either::{self, Left, Right};

    pub use core::convert::Infallible;
}
