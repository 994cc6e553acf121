use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use std::collections::VecDeque;
use std::vec::Vec;

#[cfg(feature = "dev")]
use arbitrary::Arbitrary;
use either::Either::{self, Left, Right};
use wrapper::Wrapper;

use crate::local_nb::producer::Invariant;
use crate::local_nb::Producer;

/// A producer for testing purposes: it emits a fixed sequence of items, followed by either a final value or an error.
///
/// A [`yielding`](TestProducer_::yielding) test producer hands control back to the executor once before every item, the final value, or the error, so that code driving it is suspended exactly where a real asynchronous source would suspend it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestProducer_<Item, Final, Error>(Invariant<TestProducer<Item, Final, Error>>);

impl<Item, Final, Error> TestProducer_<Item, Final, Error> {
    /// Create a producer that emits the `items` in order, and then terminates with `termination`: a final value (`Left`) or an error (`Right`).
    pub fn new(items: Vec<Item>, termination: Either<Final, Error>) -> Self {
        TestProducer_(Invariant::new(TestProducer {
            items: items.into(),
            termination: Some(termination),
            yielding: false,
            yields: 0,
        }))
    }

    /// Make the producer yield to the executor before producing anything.
    pub fn yielding(mut self) -> Self {
        self.0.as_mut().yielding = true;
        self
    }

    /// The items that have not been produced yet.
    pub fn remaining(&self) -> &VecDeque<Item> {
        &self.0.as_ref().items
    }

    /// Returns `true` once the final value or the error has been emitted.
    pub fn did_terminate(&self) -> bool {
        self.0.as_ref().termination.is_none()
    }

    /// How often the producer has yielded to the executor so far.
    pub fn yields(&self) -> usize {
        self.0.as_ref().yields
    }
}

impl<Item, Final, Error> Wrapper<Vec<Item>> for TestProducer_<Item, Final, Error> {
    fn into_inner(self) -> Vec<Item> {
        self.0.into_inner().items.into()
    }
}

impl<Item, Final, Error> Producer for TestProducer_<Item, Final, Error> {
    type Item = Item;
    type Final = Final;
    type Error = Error;

    async fn produce(&mut self) -> Result<Either<Self::Item, Self::Final>, Self::Error> {
        self.0.produce().await
    }
}

#[cfg(feature = "dev")]
impl<'a, Item, Final, Error> Arbitrary<'a> for TestProducer_<Item, Final, Error>
where
    Item: Arbitrary<'a>,
    Final: Arbitrary<'a>,
    Error: Arbitrary<'a>,
{
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let items: Vec<Item> = Arbitrary::arbitrary(u)?;

        let termination: Either<Final, Error> = if Arbitrary::arbitrary(u)? {
            Left(Arbitrary::arbitrary(u)?)
        } else {
            Right(Arbitrary::arbitrary(u)?)
        };

        let pro = TestProducer_::new(items, termination);

        if Arbitrary::arbitrary(u)? {
            Ok(pro.yielding())
        } else {
            Ok(pro)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TestProducer<Item, Final, Error> {
    items: VecDeque<Item>,
    termination: Option<Either<Final, Error>>,
    yielding: bool,
    yields: usize,
}

impl<Item, Final, Error> Producer for TestProducer<Item, Final, Error> {
    type Item = Item;
    type Final = Final;
    type Error = Error;

    async fn produce(&mut self) -> Result<Either<Self::Item, Self::Final>, Self::Error> {
        if self.yielding {
            YieldNow(false).await;
            self.yields += 1;
        }

        match self.items.pop_front() {
            Some(item) => Ok(Left(item)),
            None => match self.termination.take() {
                Some(Left(fin)) => Ok(Right(fin)),
                Some(Right(err)) => Err(err),
                None => panic!("Must not call produce after any function of the producer returned a final item or error."),
            },
        }
    }
}

// Heavily inspired by https://docs.rs/async-std/latest/src/async_std/task/yield_now.rs.html
struct YieldNow(bool);

impl Future for YieldNow {
    type Output = ();

    // Re-schedules the task once, giving room for other futures to progress.
    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}
