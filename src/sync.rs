//! Synchronous producers.
//!
//! A synchronous producer computes every item on the spot, without ever waiting for anything. Use the [`SyncToLocalNb`](crate::local_nb::producer::SyncToLocalNb) adaptor to use one wherever a [`local_nb::Producer`](crate::local_nb::Producer) is expected, for example as the source or the buffer of [`buffer`](crate::buffer).

use either::Either;

pub mod producer;

/// A `Producer` produces a potentially infinite sequence, one item at a time.
///
/// The sequence consists of an arbitrary number of values of type `Self::Item`, followed by up to one value of type `Self::Final`. If you intend for the sequence to be infinite, use [`Infallible`](core::convert::Infallible) for `Self::Final`.
///
/// A producer can also signal an error of type `Self::Error` instead of producing an item.
pub trait Producer {
    /// The sequence produced by this producer *starts* with *arbitrarily many* values of this type.
    type Item;
    /// The sequence produced by this producer *ends* with *up to one* value of this type.
    type Final;
    /// The type of errors the producer can emit instead of doing its job.
    type Error;

    /// Attempt to produce the next item, which is either a regular repeated item, or the final item.
    ///
    /// After this function returns the final item, or after it returns an error, no further functions of this trait may be invoked.
    ///
    /// #### Invariants
    ///
    /// Must not be called after any function of this trait returned a final item or an error.
    fn produce(&mut self) -> Result<Either<Self::Item, Self::Final>, Self::Error>;
}

impl<P: Producer> Producer for &mut P {
    type Item = P::Item;
    type Final = P::Final;
    type Error = P::Error;

    fn produce(&mut self) -> Result<Either<Self::Item, Self::Final>, Self::Error> {
        (*self).produce()
    }
}
