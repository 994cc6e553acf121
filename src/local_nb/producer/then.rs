use core::fmt;
use core::future::{poll_fn, Future, IntoFuture};
use core::pin::Pin;
use core::task::{Context, Poll, Waker};
use std::boxed::Box;

use either::Either;
use log::debug;
use pin_project_lite::pin_project;

use crate::common::errors::ThenError;
use crate::local_nb::{IntoProducer, Producer};

/// Produces the items of some producer, but only after a future has resolved.
///
/// The future is the *gate*. Creating a `ThenProducer` polls the gate once, right away, so that all work the gate can do without waiting happens before the constructor returns. Every call to [`produce`](Producer::produce) then first awaits the gate; only the first of them actually waits, later calls find the outcome cached. If the gate resolves to `Ok`, every call then delegates to the underlying producer. If it resolves to `Err`, the underlying producer is never touched, and every call to `produce` reports (a clone of) that same error as [`ThenError::Write`]. Errors of the underlying producer are reported as [`ThenError::Buffer`].
///
/// Values are never cached or reordered, the gate only defers the start of delegation.
///
/// Replaying a gate error on every call requires the error to be [`Clone`]. For errors that are not, such as [`std::io::Error`], wrap them in an [`Rc`](std::rc::Rc) inside the gate, or use [`settle`](ThenProducer::settle), which only hands out a reference.
///
/// ```
/// use eager_buffer::local_nb::producer::ThenProducer;
/// use eager_buffer::prelude::*;
/// # smol::block_on(async {
///
/// let mut pro = ThenProducer::new([1, 2], async { Ok::<(), Infallible>(()) });
///
/// assert_eq!(pro.produce().await, Ok(Left(1)));
/// assert_eq!(pro.produce().await, Ok(Left(2)));
/// assert_eq!(pro.produce().await, Ok(Right(())));
/// # });
/// ```
pub struct ThenProducer<Fut, P, E> {
    gate: Gate<Fut, P, E>,
}

enum Gate<Fut, P, E> {
    /// The gating future has not resolved yet.
    Pending(Pin<Box<Fut>>),
    /// The gate resolved successfully, this is the producer to delegate to.
    Open(P),
    /// The gate resolved to an error, which is replayed on every call.
    Failed(E),
}

impl<Fut, P, E> ThenProducer<Fut, P, E>
where
    Fut: Future<Output = Result<P, E>>,
{
    /// Create a producer that awaits `fut` and then produces the items of the producer it resolved to.
    ///
    /// `fut` is polled once before this returns. If it can complete without waiting, for example because it drains a synchronous source, the returned producer is already [settled](ThenProducer::is_settled).
    pub fn from_future(fut: Fut) -> Self {
        let mut pro = ThenProducer {
            gate: Gate::Pending(Box::pin(fut)),
        };

        // Nobody waits on this poll, whoever polls next registers the real waker.
        let _ = pro.poll_gate(&mut Context::from_waker(Waker::noop()));
        pro
    }

    /// Drive the gate to completion without producing anything.
    ///
    /// This resolves the gate exactly like the first call to [`produce`](Producer::produce) would. Joining this with some other work continues to drain a [buffered](crate::buffer) source while that work is happening. Calling it again after the gate has resolved returns the cached outcome immediately.
    ///
    /// Unlike `produce`, this reports a gate error by reference, so it works for error types that are not [`Clone`].
    ///
    /// ```
    /// use eager_buffer::prelude::*;
    /// # smol::block_on(async {
    ///
    /// let mut pro = eager_buffer::buffer([1, 2, 3]);
    /// let unrelated_work = async { 17 };
    ///
    /// let (drained, work) = smol::future::zip(pro.settle(), unrelated_work).await;
    /// assert_eq!(drained, Ok(()));
    /// assert_eq!(work, 17);
    ///
    /// assert!(pro.is_settled());
    /// assert_eq!(pro.produce().await, Ok(Left(1)));
    /// # });
    /// ```
    pub async fn settle(&mut self) -> Result<(), &E> {
        poll_fn(|cx| self.poll_gate(cx)).await;

        match &self.gate {
            Gate::Failed(err) => Err(err),
            _ => Ok(()),
        }
    }

    /// Returns `true` once the gate has resolved, successfully or not.
    pub fn is_settled(&self) -> bool {
        !matches!(self.gate, Gate::Pending(_))
    }

    fn poll_gate(&mut self, cx: &mut Context<'_>) -> Poll<()> {
        let Gate::Pending(fut) = &mut self.gate else {
            return Poll::Ready(());
        };

        let Poll::Ready(outcome) = fut.as_mut().poll(cx) else {
            return Poll::Pending;
        };

        self.gate = match outcome {
            Ok(producer) => {
                debug!("gate opened");
                Gate::Open(producer)
            }
            Err(err) => {
                debug!("gate failed");
                Gate::Failed(err)
            }
        };

        Poll::Ready(())
    }
}

impl<S, P, E> ThenProducer<Signalled<S, P>, P, E>
where
    S: Future<Output = Result<(), E>>,
{
    /// Create a producer of the items of `buffer` that starts producing only once `signal` has resolved to `Ok(())`.
    ///
    /// `buffer` is converted into a producer right away. `signal` is polled once before this returns, and is driven further by the first call to [`produce`](Producer::produce) or [`settle`](ThenProducer::settle).
    ///
    /// The buffer must be something that can be produced from:
    ///
    /// ```compile_fail
    /// use core::future::ready;
    /// use eager_buffer::local_nb::producer::ThenProducer;
    /// use eager_buffer::prelude::*;
    ///
    /// let _ = ThenProducer::new(3, ready(Ok::<(), Infallible>(())));
    /// ```
    pub fn new<B, I>(buffer: B, signal: I) -> Self
    where
        B: IntoProducer<IntoProducer = P>,
        I: IntoFuture<IntoFuture = S>,
    {
        ThenProducer::from_future(Signalled {
            signal: signal.into_future(),
            buffer: Some(buffer.into_producer()),
        })
    }
}

pin_project! {
    /// The gate of a [`ThenProducer`] created with [`ThenProducer::new`]: resolves to the buffer's producer once the signal has resolved to `Ok(())`.
    #[must_use = "futures do nothing unless polled"]
    pub struct Signalled<S, P> {
        #[pin]
        signal: S,
        buffer: Option<P>,
    }
}

impl<S, P, E> Future for Signalled<S, P>
where
    S: Future<Output = Result<(), E>>,
{
    type Output = Result<P, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        match this.signal.poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Err(err)) => Poll::Ready(Err(err)),
            Poll::Ready(Ok(())) => match this.buffer.take() {
                Some(producer) => Poll::Ready(Ok(producer)),
                None => panic!("`Signalled` polled after completion"),
            },
        }
    }
}

impl<Fut, P, E> fmt::Debug for ThenProducer<Fut, P, E>
where
    P: fmt::Debug,
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.gate {
            Gate::Pending(_) => f.debug_tuple("ThenProducer::Pending").finish(),
            Gate::Open(producer) => f.debug_tuple("ThenProducer::Open").field(producer).finish(),
            Gate::Failed(err) => f.debug_tuple("ThenProducer::Failed").field(err).finish(),
        }
    }
}

impl<Fut, P, E> Producer for ThenProducer<Fut, P, E>
where
    Fut: Future<Output = Result<P, E>>,
    P: Producer,
    E: Clone,
{
    type Item = P::Item;
    type Final = P::Final;
    type Error = ThenError<E, P::Error>;

    async fn produce(&mut self) -> Result<Either<Self::Item, Self::Final>, Self::Error> {
        poll_fn(|cx| self.poll_gate(cx)).await;

        match &mut self.gate {
            Gate::Open(producer) => producer.produce().await.map_err(ThenError::Buffer),
            Gate::Failed(err) => Err(ThenError::Write(err.clone())),
            Gate::Pending(_) => unreachable!("the gate resolves before it is inspected"),
        }
    }
}
