use std::collections::VecDeque;
use std::vec::Vec;

#[cfg(feature = "dev")]
use arbitrary::Arbitrary;
use either::Either::{self, Left, Right};
use wrapper::Wrapper;

use crate::sync::Producer;

/// A producer for testing purposes: it emits a fixed sequence of items, followed by either a final value or an error.
///
/// Calling `produce` after the final value or the error has been emitted panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestProducer<Item, Final, Error> {
    items: VecDeque<Item>,
    termination: Option<Either<Final, Error>>,
}

impl<Item, Final, Error> TestProducer<Item, Final, Error> {
    /// Create a producer that emits the `items` in order, and then terminates with `termination`: a final value (`Left`) or an error (`Right`).
    pub fn new(items: Vec<Item>, termination: Either<Final, Error>) -> Self {
        TestProducer {
            items: items.into(),
            termination: Some(termination),
        }
    }

    /// The items that have not been produced yet.
    pub fn remaining(&self) -> &VecDeque<Item> {
        &self.items
    }

    /// Returns `true` once the final value or the error has been emitted.
    pub fn did_terminate(&self) -> bool {
        self.termination.is_none()
    }
}

impl<Item, Final, Error> Wrapper<Vec<Item>> for TestProducer<Item, Final, Error> {
    fn into_inner(self) -> Vec<Item> {
        self.items.into()
    }
}

impl<Item, Final, Error> Producer for TestProducer<Item, Final, Error> {
    type Item = Item;
    type Final = Final;
    type Error = Error;

    fn produce(&mut self) -> Result<Either<Self::Item, Self::Final>, Self::Error> {
        match self.items.pop_front() {
            Some(item) => Ok(Left(item)),
            None => match self.termination.take() {
                Some(Left(fin)) => Ok(Right(fin)),
                Some(Right(err)) => Err(err),
                None => panic!("may not call `Producer` methods after the sequence has ended"),
            },
        }
    }
}

#[cfg(feature = "dev")]
impl<'a, Item, Final, Error> Arbitrary<'a> for TestProducer<Item, Final, Error>
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

        Ok(TestProducer::new(items, termination))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_items_then_final() {
        let mut pro: TestProducer<u8, i8, ()> = TestProducer::new(vec![1, 2], Left(-1));

        assert_eq!(pro.produce(), Ok(Left(1)));
        assert!(!pro.did_terminate());
        assert_eq!(pro.produce(), Ok(Left(2)));
        assert_eq!(pro.produce(), Ok(Right(-1)));
        assert!(pro.did_terminate());
    }

    #[test]
    fn emits_items_then_error() {
        let mut pro: TestProducer<u8, (), &str> =
            TestProducer::new(vec![1], Right("Iterable error."));

        assert_eq!(pro.produce(), Ok(Left(1)));
        assert_eq!(pro.remaining().len(), 0);
        assert_eq!(pro.produce(), Err("Iterable error."));
    }

    #[test]
    fn hands_back_the_items_not_produced_yet() {
        let mut pro: TestProducer<u8, (), ()> = TestProducer::new(vec![1, 2, 3], Left(()));

        assert_eq!(pro.produce(), Ok(Left(1)));
        assert_eq!(pro.into_inner(), vec![2, 3]);
    }

    #[test]
    #[should_panic(expected = "may not call `Producer` methods after the sequence has ended")]
    fn panics_when_producing_after_the_error() {
        let mut pro: TestProducer<u8, (), &str> = TestProducer::new(vec![], Right("Error."));

        let _ = pro.produce();
        let _ = pro.produce();
    }
}
