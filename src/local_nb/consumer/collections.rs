use core::convert::Infallible;
use std::collections::{TryReserveError, VecDeque};
use std::vec::Vec;

use thiserror::Error;

use crate::local_nb::Consumer;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error(transparent)]
/// Error to indicate that appending to a `Vec` failed because allocating more memory for the `Vec` failed.
pub struct IntoVecError(#[from] pub TryReserveError);

/// Appends items, reporting an error instead of aborting when the `Vec` cannot grow.
impl<T> Consumer for Vec<T> {
    type Item = T;
    type Final = ();
    type Error = IntoVecError;

    async fn consume(&mut self, item: T) -> Result<(), Self::Error> {
        self.try_reserve(1)?;
        self.push(item);

        Ok(())
    }

    async fn close(&mut self, _fin: Self::Final) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Appends items at the back.
impl<T> Consumer for VecDeque<T> {
    type Item = T;
    type Final = ();
    type Error = Infallible;

    async fn consume(&mut self, item: T) -> Result<(), Self::Error> {
        self.push_back(item);

        Ok(())
    }

    async fn close(&mut self, _fin: Self::Final) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_appends_at_the_back() {
        smol::block_on(async {
            let mut buffer = vec![1];

            assert_eq!(buffer.consume(2).await, Ok(()));
            assert_eq!(buffer.consume(3).await, Ok(()));
            assert_eq!(buffer.close(()).await, Ok(()));
            assert_eq!(buffer, vec![1, 2, 3]);
        })
    }

    #[test]
    fn vec_deque_appends_at_the_back() {
        smol::block_on(async {
            let mut buffer = VecDeque::from([1]);

            assert_eq!(buffer.consume(2).await, Ok(()));
            assert_eq!(buffer, VecDeque::from([1, 2]));
        })
    }
}
