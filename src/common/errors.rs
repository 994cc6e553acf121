use core::error::Error;
use core::fmt::{self, Display};

/// Everything that can go wrong when [writing](crate::default_write) a producer into a buffer with the default write function.
///
/// Both variants are transparent: displaying the error displays the wrapped error, and [`Error::source`] is that of the wrapped error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WriteError<SourceError, BufferError> {
    /// The source emitted an error.
    Source(SourceError),
    /// The buffer emitted an error when consuming an item.
    Buffer(BufferError),
}

impl<SourceError, BufferError> Display for WriteError<SourceError, BufferError>
where
    SourceError: Display,
    BufferError: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteError::Source(err) => Display::fmt(err, f),
            WriteError::Buffer(err) => Display::fmt(err, f),
        }
    }
}

impl<SourceError, BufferError> Error for WriteError<SourceError, BufferError>
where
    SourceError: Error,
    BufferError: Error,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WriteError::Source(err) => err.source(),
            WriteError::Buffer(err) => err.source(),
        }
    }
}

/// Everything a [`ThenProducer`](crate::local_nb::producer::ThenProducer) can emit instead of an item.
///
/// Both variants are transparent: displaying the error displays the wrapped error, and [`Error::source`] is that of the wrapped error. The original failure is never obscured, use [`ThenError::into_write`] and [`ThenError::into_buffer`] to get it back.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ThenError<W, B> {
    /// The future that gates the buffer resolved to an error. Every pull after the gate failed reports a clone of this same error.
    Write(W),
    /// The buffer itself emitted an error after the gate had opened.
    Buffer(B),
}

impl<W, B> ThenError<W, B> {
    /// Returns the error of the gating future, if that is what went wrong.
    pub fn into_write(self) -> Option<W> {
        match self {
            ThenError::Write(err) => Some(err),
            ThenError::Buffer(_) => None,
        }
    }

    /// Returns the error of the buffer, if that is what went wrong.
    pub fn into_buffer(self) -> Option<B> {
        match self {
            ThenError::Write(_) => None,
            ThenError::Buffer(err) => Some(err),
        }
    }
}

impl<W, B> Display for ThenError<W, B>
where
    W: Display,
    B: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThenError::Write(err) => Display::fmt(err, f),
            ThenError::Buffer(err) => Display::fmt(err, f),
        }
    }
}

impl<W, B> Error for ThenError<W, B>
where
    W: Error,
    B: Error,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ThenError::Write(err) => err.source(),
            ThenError::Buffer(err) => err.source(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Boom;

    impl Display for Boom {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Iterable error.")
        }
    }

    impl Error for Boom {}

    #[test]
    fn then_error_displays_the_original_message() {
        let write: ThenError<Boom, Boom> = ThenError::Write(Boom);
        let buffer: ThenError<Boom, Boom> = ThenError::Buffer(Boom);

        assert_eq!(write.to_string(), "Iterable error.");
        assert_eq!(buffer.to_string(), "Iterable error.");
    }

    #[test]
    fn write_error_is_transparent() {
        let err: WriteError<Boom, Boom> = WriteError::Source(Boom);

        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "Iterable error.");
    }

    #[test]
    fn then_error_unwraps_into_its_variants() {
        let err: ThenError<u8, u16> = ThenError::Buffer(17);

        assert_eq!(err.into_write(), None);
        assert_eq!(err.into_buffer(), Some(17));
    }
}
