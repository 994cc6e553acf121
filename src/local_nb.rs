//! Non-blocking producers and consumers whose futures are `!Send`, and the functions for eagerly buffering producers.
//!
//! The [`buffer`] family of functions is the entry point of this crate. Each of them takes a *source*, a *write* function, and a *buffer*, immediately calls the write function with the source and the buffer, and returns a [`ThenProducer`] that produces the contents of the buffer, but only after the future returned by the write function has resolved.
//!
//! A write function has the shape `FnOnce(S, B) -> impl IntoFuture<Output = Result<B, E>>`: it receives ownership of the source and of the buffer, and hands the buffer back once it is done writing into it. The buffer is written exclusively by the write function and read exclusively by the returned producer, and the hand-back separates the two phases.
//!
//! Draining starts before the buffer functions return: the future of the write function is polled once, right away. A synchronous source, or any source whose items are ready, is drained completely inside the call.
//!
//! Rust has no implicit background executor, so a write function that has to wait for its source only continues while the returned producer is being polled. The first call to [`produce`](Producer::produce) drives it to completion before producing the first item. To keep draining *concurrently* with some other work, join that work with [`ThenProducer::settle`]. Dropping the returned producer stops any draining that has not finished yet.

use core::future::{Future, IntoFuture};

use either::Either::{self, Left, Right};
use log::{debug, trace};
use std::vec::Vec;

use crate::common::errors::WriteError;

pub mod consumer;
pub mod producer;

use producer::ThenProducer;

/// A `Consumer` consumes a potentially infinite sequence, one item at a time.
///
/// The sequence consists of an arbitrary number of values of type `Self::Item`, followed by up to one value of type `Self::Final`.
///
/// A consumer can also signal an error of type `Self::Error` instead of consuming an item.
pub trait Consumer {
    /// The sequence consumed by this consumer *starts* with *arbitrarily many* values of this type.
    type Item;
    /// The sequence consumed by this consumer *ends* with *up to one* value of this type.
    type Final;
    /// The type of errors the consumer can emit instead of doing its job.
    type Error;

    /// Attempt to consume the next item.
    ///
    /// After this function returns an error, no further functions of this trait may be invoked.
    ///
    /// #### Invariants
    ///
    /// Must not be called after any function of this trait returned an error,
    /// nor after `close` was called.
    async fn consume(&mut self, item: Self::Item) -> Result<(), Self::Error>;

    /// Attempt to consume the final item.
    ///
    /// After this function is called, no further functions of this trait may be invoked.
    ///
    /// #### Invariants
    ///
    /// Must not be called after any function of this trait has returned an error,
    /// nor after `close` was called.
    async fn close(&mut self, fin: Self::Final) -> Result<(), Self::Error>;
}

impl<C: Consumer> Consumer for &mut C {
    type Item = C::Item;
    type Final = C::Final;
    type Error = C::Error;

    async fn consume(&mut self, item: Self::Item) -> Result<(), Self::Error> {
        (*self).consume(item).await
    }

    async fn close(&mut self, fin: Self::Final) -> Result<(), Self::Error> {
        (*self).close(fin).await
    }
}

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

    /// Attempt to produce the next item, which is either a regular repeated item or the final item.
    /// If the sequence of items has not ended yet, but no item are available at the time of calling,
    /// the function must block until at least one more item becomes available (or it becomes clear
    /// that the final value or an error should be yielded).
    ///
    /// After this function returns the final item, or after it returns an error, no further
    /// functions of this trait may be invoked.
    ///
    /// #### Invariants
    ///
    /// Must not be called after any function of this trait has returned a final item or an error.
    async fn produce(&mut self) -> Result<Either<Self::Item, Self::Final>, Self::Error>;
}

impl<P: Producer> Producer for &mut P {
    type Item = P::Item;
    type Final = P::Final;
    type Error = P::Error;

    async fn produce(&mut self) -> Result<Either<Self::Item, Self::Final>, Self::Error> {
        (*self).produce().await
    }
}

/// Conversion into a [`Producer`].
///
/// This is the bound for everything that can be buffered or serve as a buffer. It is implemented for
///
/// - every [`Producer`], converting to itself,
/// - `Vec`, `VecDeque` and arrays, producing their items in order, and
/// - every [`sync::Producer`](crate::sync::Producer), once wrapped in [`SyncToLocalNb`](producer::SyncToLocalNb).
///
/// A type that is a `Producer` always converts to itself, even if it happens to be a collection as well.
pub trait IntoProducer {
    /// The type of the items of the resulting producer.
    type Item;
    /// The final type of the resulting producer.
    type Final;
    /// The error type of the resulting producer.
    type Error;
    /// Which kind of producer are we turning this into?
    type IntoProducer: Producer<Item = Self::Item, Final = Self::Final, Error = Self::Error>;

    /// Creates a producer from a value.
    fn into_producer(self) -> Self::IntoProducer;
}

impl<P: Producer> IntoProducer for P {
    type Item = P::Item;
    type Final = P::Final;
    type Error = P::Error;
    type IntoProducer = P;

    fn into_producer(self) -> Self::IntoProducer {
        self
    }
}

/// Moves every item of `source` into `buffer`, in order, and hands the buffer back once `source` has emitted its final value.
///
/// This is the write function that [`buffer`] and [`buffer_into`] use. It is a regular write function, so it can also be passed to [`buffer_with_into`] explicitly, or be used on its own. The final value of the source is discarded, and the buffer is *not* closed, so that it can be read afterwards.
///
/// If the source emits an error, the function stops pulling from it and returns [`WriteError::Source`]. If the buffer fails to consume an item, the function returns [`WriteError::Buffer`].
///
/// ```
/// use eager_buffer::prelude::*;
/// # smol::block_on(async {
///
/// let buffer = eager_buffer::default_write([1, 2, 3], vec![0]).await.unwrap();
/// assert_eq!(buffer, vec![0, 1, 2, 3]);
/// # });
/// ```
///
/// The buffer must be able to append items, that is, it must be a [`Consumer`]:
///
/// ```compile_fail
/// use eager_buffer::local_nb::producer::IteratorAsProducer;
///
/// // An `IteratorAsProducer` can be produced from, but not appended to.
/// let _ = eager_buffer::buffer_into([1, 2, 3], IteratorAsProducer::new(0..3));
/// ```
pub async fn default_write<S, B>(
    source: S,
    mut buffer: B,
) -> Result<B, WriteError<S::Error, B::Error>>
where
    S: IntoProducer,
    B: Consumer<Item = S::Item>,
{
    let mut source = source.into_producer();
    let mut count: usize = 0;

    loop {
        match source.produce().await {
            Ok(Left(item)) => {
                buffer.consume(item).await.map_err(WriteError::Buffer)?;
                count += 1;
                trace!("appended item {} to the buffer", count);
            }
            Ok(Right(_)) => {
                debug!("drained {} items from the source", count);
                return Ok(buffer);
            }
            Err(err) => {
                debug!("source failed after {} items", count);
                return Err(WriteError::Source(err));
            }
        }
    }
}

/// Eagerly buffers all items of `source` into a fresh `Vec`, and returns a producer of those items that starts producing only once `source` has been drained completely.
///
/// The returned [`ThenProducer`] replays an error of the source on every call to `produce`, so it only implements [`Producer`] if the source's error type is [`Clone`]. To buffer a source with an error such as [`std::io::Error`], use [`buffer_with`] and wrap the error in an [`Rc`](std::rc::Rc):
///
/// ```
/// use std::rc::Rc;
/// use eager_buffer::local_nb::producer::SyncToLocalNb;
/// use eager_buffer::sync::Producer as SyncProducer;
/// use eager_buffer::prelude::*;
///
/// struct Unreadable;
///
/// impl SyncProducer for Unreadable {
///     type Item = u8;
///     type Final = ();
///     type Error = std::io::Error;
///
///     fn produce(&mut self) -> Result<Either<u8, ()>, std::io::Error> {
///         Err(std::io::Error::other("unreadable"))
///     }
/// }
///
/// # smol::block_on(async {
/// let mut pro = eager_buffer::buffer_with(SyncToLocalNb(Unreadable), |source, buffer| async move {
///     eager_buffer::default_write(source, buffer).await.map_err(Rc::new)
/// });
///
/// let err = pro.produce().await.unwrap_err();
/// assert_eq!(err.to_string(), "unreadable");
/// # });
/// ```
///
/// ```
/// use eager_buffer::prelude::*;
/// # smol::block_on(async {
///
/// let mut pro = eager_buffer::buffer([1, 2, 3]);
///
/// assert_eq!(pro.produce().await, Ok(Left(1)));
/// assert_eq!(pro.produce().await, Ok(Left(2)));
/// assert_eq!(pro.produce().await, Ok(Left(3)));
/// assert_eq!(pro.produce().await, Ok(Right(())));
/// # });
/// ```
pub fn buffer<S>(
    source: S,
) -> ThenProducer<
    impl Future<
        Output = Result<
            <Vec<S::Item> as IntoProducer>::IntoProducer,
            WriteError<S::Error, consumer::IntoVecError>,
        >,
    >,
    <Vec<S::Item> as IntoProducer>::IntoProducer,
    WriteError<S::Error, consumer::IntoVecError>,
>
where
    S: IntoProducer,
{
    buffer_with_into(source, default_write, Vec::new())
}

/// Calls `write` with `source` and a fresh `Vec`, and returns a producer of the contents of that `Vec` which starts producing only once the future returned by `write` has resolved.
///
/// ```
/// use eager_buffer::prelude::*;
/// # smol::block_on(async {
///
/// let mut pro = eager_buffer::buffer_with([1, 2, 3], |source, mut buffer| async move {
///     for value in source {
///         buffer.push(value * 3);
///     }
///     Ok::<_, Infallible>(buffer)
/// });
///
/// assert_eq!(pro.produce().await, Ok(Left(3)));
/// assert_eq!(pro.produce().await, Ok(Left(6)));
/// assert_eq!(pro.produce().await, Ok(Left(9)));
/// assert_eq!(pro.produce().await, Ok(Right(())));
/// # });
/// ```
///
/// The write function must be a function:
///
/// ```compile_fail
/// let _ = eager_buffer::buffer_with([1, 2, 3], "Neither a function nor omitted.");
/// ```
pub fn buffer_with<S, W, Fut, T, E>(
    source: S,
    write: W,
) -> ThenProducer<
    impl Future<Output = Result<<Vec<T> as IntoProducer>::IntoProducer, E>>,
    <Vec<T> as IntoProducer>::IntoProducer,
    E,
>
where
    S: IntoProducer,
    W: FnOnce(S, Vec<T>) -> Fut,
    Fut: IntoFuture<Output = Result<Vec<T>, E>>,
{
    buffer_with_into(source, write, Vec::new())
}

/// Eagerly buffers all items of `source` into `buffer`, and returns a producer of the contents of `buffer` that starts producing only once `source` has been drained completely.
///
/// ```
/// use std::collections::VecDeque;
/// use eager_buffer::prelude::*;
/// # smol::block_on(async {
///
/// let mut pro = eager_buffer::buffer_into([2, 3], VecDeque::from([1]));
///
/// assert_eq!(pro.produce().await, Ok(Left(1)));
/// assert_eq!(pro.produce().await, Ok(Left(2)));
/// assert_eq!(pro.produce().await, Ok(Left(3)));
/// assert_eq!(pro.produce().await, Ok(Right(())));
/// # });
/// ```
///
/// The buffer must be something that can be produced from:
///
/// ```compile_fail
/// let _ = eager_buffer::buffer_into([1, 2, 3], 3);
/// ```
pub fn buffer_into<S, B>(
    source: S,
    buffer: B,
) -> ThenProducer<
    impl Future<Output = Result<B::IntoProducer, WriteError<S::Error, <B as Consumer>::Error>>>,
    B::IntoProducer,
    WriteError<S::Error, <B as Consumer>::Error>,
>
where
    S: IntoProducer,
    B: Consumer<Item = S::Item> + IntoProducer,
{
    buffer_with_into(source, default_write, buffer)
}

/// Calls `write` with `source` and `buffer`, and returns a producer of the contents of `buffer` which starts producing only once the future returned by `write` has resolved.
///
/// `write` is called exactly once, before this function returns. Its return value is turned into a future via [`IntoFuture`], so a write function that finishes its work synchronously can simply return [`core::future::ready`]. Whatever the future resolves to is reported by every call to [`produce`](Producer::produce) on the returned producer: an `Ok` opens the gate to the buffer, an `Err` is replayed as [`ThenError::Write`](crate::ThenError::Write).
///
/// Nothing checks that `write` actually fills `buffer` before it resolves, that is up to the write function.
///
/// ```
/// use core::future::ready;
/// use eager_buffer::prelude::*;
/// # smol::block_on(async {
///
/// let mut pro = eager_buffer::buffer_with_into(
///     [1, 2, 3],
///     |source: [i32; 3], mut buffer: Vec<i32>| {
///         buffer.extend(source.iter().rev());
///         ready(Ok::<_, Infallible>(buffer))
///     },
///     vec![],
/// );
///
/// assert_eq!(pro.produce().await, Ok(Left(3)));
/// # });
/// ```
///
/// A custom write function need not append, but the buffer must still be something that can be produced from:
///
/// ```compile_fail
/// use core::future::ready;
/// use eager_buffer::prelude::*;
///
/// let _ = eager_buffer::buffer_with_into(
///     [1, 2, 3],
///     |_source: [i32; 3], buffer: i32| ready(Ok::<_, Infallible>(buffer)),
///     3,
/// );
/// ```
pub fn buffer_with_into<S, W, Fut, B, E>(
    source: S,
    write: W,
    buffer: B,
) -> ThenProducer<impl Future<Output = Result<B::IntoProducer, E>>, B::IntoProducer, E>
where
    S: IntoProducer,
    W: FnOnce(S, B) -> Fut,
    Fut: IntoFuture<Output = Result<B, E>>,
    B: IntoProducer,
{
    debug!("starting to write the source into the buffer");
    let signal = write(source, buffer).into_future();

    ThenProducer::from_future(async move { signal.await.map(IntoProducer::into_producer) })
}
