use core::convert::{AsMut, AsRef};

use either::Either;
use wrapper::Wrapper;

use crate::local_nb::Producer;

/// A `Producer` wrapper that panics when callers violate API contracts such
/// as halting interaction after an error.
///
/// This wrapper only performs the checks when testing code (more specifically,
/// when `#[cfg(test)]` applies). In production builds, the wrapper does
/// nothing at all and compiles away without any overhead.
///
/// All producers implemented in this crate use this wrapper internally already.
///
/// #### Invariants
///
/// The wrapper enforces the following invariant:
///
/// - Must not call `produce` after it returned the final item or an error.
#[derive(Debug, Copy, Clone, Hash, Ord, Eq, PartialEq, PartialOrd)]
pub struct Invariant<P> {
    /// An implementer of the `Producer` trait.
    inner: P,
    /// The status of the producer. `true` while the caller may call trait
    /// methods, `false` once that becomes disallowed (because a method returned
    /// an error or the final item).
    active: bool,
}

impl<P> Invariant<P> {
    /// Return a `Producer` that behaves exactly like the wrapped `Producer`
    /// `inner`, except that - when running tests - it performs runtime
    /// validation of API invariants and panics if they are violated by a
    /// caller.
    pub fn new(inner: P) -> Self {
        Invariant {
            inner,
            active: true,
        }
    }

    /// Checks the state of the `active` field and panics if the value is
    /// `false`.
    fn check_inactive(&self) {
        if !self.active {
            panic!("may not call `Producer` methods after the sequence has ended");
        }
    }
}

impl<P> AsRef<P> for Invariant<P> {
    fn as_ref(&self) -> &P {
        &self.inner
    }
}

impl<P> AsMut<P> for Invariant<P> {
    fn as_mut(&mut self) -> &mut P {
        &mut self.inner
    }
}

impl<P> Wrapper<P> for Invariant<P> {
    fn into_inner(self) -> P {
        self.inner
    }
}

impl<P, T, F, E> Producer for Invariant<P>
where
    P: Producer<Item = T, Final = F, Error = E>,
{
    type Item = T;
    type Final = F;
    type Error = E;

    async fn produce(&mut self) -> Result<Either<Self::Item, Self::Final>, Self::Error> {
        self.check_inactive();

        self.inner
            .produce()
            .await
            .inspect(|either| {
                // Mark the producer as inactive if the final value is emitted.
                if let Either::Right(_) = either {
                    self.active = false
                }
            })
            .inspect_err(|_| {
                self.active = false;
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use either::Either::{Left, Right};

    use crate::local_nb::producer::TestProducer;

    #[test]
    fn accepts_produce_until_final() {
        smol::block_on(async {
            let mut pro: TestProducer<u8, (), ()> = TestProducer::new(vec![1], Left(()));

            assert_eq!(pro.produce().await, Ok(Left(1)));
            assert_eq!(pro.produce().await, Ok(Right(())));
        })
    }

    #[test]
    #[should_panic(expected = "may not call `Producer` methods after the sequence has ended")]
    fn panics_on_produce_after_error() {
        smol::block_on(async {
            let mut pro: TestProducer<u8, (), &str> =
                TestProducer::new(vec![], Right("Iterable error."));

            assert_eq!(pro.produce().await, Err("Iterable error."));
            let _ = pro.produce().await;
        })
    }
}
