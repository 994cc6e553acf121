use either::Either;
use wrapper::Wrapper;

use crate::local_nb::Producer;
use crate::sync;

/// Turns a [`sync::Producer`](crate::sync::Producer) into a [`local_nb::Producer`](crate::local_nb::Producer). Only use this to wrap types that never block and do not perform time-intensive computations.
///
/// ```
/// use eager_buffer::local_nb::producer::SyncToLocalNb;
/// use eager_buffer::prelude::*;
///
/// struct Countdown(u8);
///
/// impl SyncProducer for Countdown {
///     type Item = u8;
///     type Final = ();
///     type Error = Infallible;
///
///     fn produce(&mut self) -> Result<Either<u8, ()>, Infallible> {
///         if self.0 == 0 {
///             Ok(Right(()))
///         } else {
///             self.0 -= 1;
///             Ok(Left(self.0))
///         }
///     }
/// }
///
/// # smol::block_on(async {
/// let mut pro = eager_buffer::buffer(SyncToLocalNb(Countdown(2)));
///
/// assert_eq!(pro.produce().await, Ok(Left(1)));
/// assert_eq!(pro.produce().await, Ok(Left(0)));
/// assert_eq!(pro.produce().await, Ok(Right(())));
/// # });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncToLocalNb<P>(pub P);

impl<P> AsRef<P> for SyncToLocalNb<P> {
    fn as_ref(&self) -> &P {
        &self.0
    }
}

impl<P> AsMut<P> for SyncToLocalNb<P> {
    fn as_mut(&mut self) -> &mut P {
        &mut self.0
    }
}

impl<P> Wrapper<P> for SyncToLocalNb<P> {
    fn into_inner(self) -> P {
        self.0
    }
}

impl<P: sync::Producer> Producer for SyncToLocalNb<P> {
    type Item = P::Item;
    type Final = P::Final;
    type Error = P::Error;

    async fn produce(&mut self) -> Result<Either<Self::Item, Self::Final>, Self::Error> {
        self.0.produce()
    }
}
