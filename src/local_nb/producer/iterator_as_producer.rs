use core::convert::Infallible;
use std::collections::VecDeque;
use std::vec::Vec;

use either::Either::{self, Left, Right};
use wrapper::Wrapper;

use crate::local_nb::producer::Invariant;
use crate::local_nb::{IntoProducer, Producer};

/// Use a finite [`Iterator`] as a [`Producer`] of final type `()` and error type [`Infallible`].
///
/// This is how synchronous collections are buffered and read: `Vec`, `VecDeque` and arrays all [convert](IntoProducer) into an `IteratorAsProducer` over their owning iterator.
///
/// ```
/// use eager_buffer::local_nb::producer::IteratorAsProducer;
/// use eager_buffer::prelude::*;
/// # smol::block_on(async {
///
/// let mut pro = eager_buffer::buffer(IteratorAsProducer::new((1..4).map(|n| n * n)));
///
/// assert_eq!(pro.produce().await, Ok(Left(1)));
/// assert_eq!(pro.produce().await, Ok(Left(4)));
/// assert_eq!(pro.produce().await, Ok(Left(9)));
/// assert_eq!(pro.produce().await, Ok(Right(())));
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct IteratorAsProducer_<I>(Invariant<IteratorAsProducer<I>>);

impl<I> IteratorAsProducer_<I> {
    /// Wrap a finite iterator to use it as a producer.
    pub fn new(iter: I) -> Self {
        IteratorAsProducer_(Invariant::new(IteratorAsProducer(iter)))
    }
}

impl<I> AsRef<I> for IteratorAsProducer_<I> {
    fn as_ref(&self) -> &I {
        &self.0.as_ref().0
    }
}

impl<I> Wrapper<I> for IteratorAsProducer_<I> {
    fn into_inner(self) -> I {
        self.0.into_inner().0
    }
}

impl<I: Iterator> Producer for IteratorAsProducer_<I> {
    type Item = I::Item;
    type Final = ();
    type Error = Infallible;

    async fn produce(&mut self) -> Result<Either<Self::Item, Self::Final>, Self::Error> {
        self.0.produce().await
    }
}

#[derive(Debug, Clone)]
struct IteratorAsProducer<I>(I);

impl<I: Iterator> Producer for IteratorAsProducer<I> {
    type Item = I::Item;
    type Final = ();
    type Error = Infallible;

    async fn produce(&mut self) -> Result<Either<Self::Item, Self::Final>, Self::Error> {
        match self.0.next() {
            Some(it) => Ok(Left(it)),
            None => Ok(Right(())),
        }
    }
}

macro_rules! implement_into_producer_for_collection {
    ($collection:ty, $($generics:tt)*) => {
        impl<$($generics)*> IntoProducer for $collection {
            type Item = T;
            type Final = ();
            type Error = Infallible;
            type IntoProducer = IteratorAsProducer_<<$collection as IntoIterator>::IntoIter>;

            fn into_producer(self) -> Self::IntoProducer {
                IteratorAsProducer_::new(self.into_iter())
            }
        }
    };
}

implement_into_producer_for_collection!(Vec<T>, T);
implement_into_producer_for_collection!(VecDeque<T>, T);
implement_into_producer_for_collection!([T; N], T, const N: usize);
