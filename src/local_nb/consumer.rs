//! Consumers that can serve as buffers.
//!
//! The [default write function](crate::default_write) appends to its buffer through the [`Consumer`](crate::local_nb::Consumer) trait. This module implements that trait for the std collections that can also be [produced from](crate::local_nb::IntoProducer) afterwards: `Vec` and `VecDeque`. Both append at the back, and closing them does nothing.

mod collections;

pub use collections::IntoVecError;
