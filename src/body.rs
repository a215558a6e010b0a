use futures_core::Stream;
use std::{
    error::Error as StdError,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{parser, Error, Event};

/// Turns a stream of body chunks into a stream of events, one per chunk.
///
/// Chunks are not buffered or joined: whatever the transport hands over in
/// one piece is parsed as one record.
pub struct Body<S> {
    inner: S,
}

impl<S, B, E> Stream for Body<S>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: bytes::Buf,
    E: StdError + Send + Sync + 'static,
{
    type Item = Result<Event, Error>;

    fn poll_next(mut self: Pin<&mut Self>, ctx: &mut Context) -> Poll<Option<Self::Item>> {
        match Pin::new(&mut self.inner).poll_next(ctx) {
            Poll::Ready(Some(Err(err))) => Poll::Ready(Some(Err(Error::inner(err)))),
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
            Poll::Ready(Some(Ok(mut bs))) => {
                let chunk = bs.copy_to_bytes(bs.remaining());
                tracing::debug!(len = chunk.len(), "received chunk");
                Poll::Ready(Some(parser::parse(&chunk).map_err(Error::parser)))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<S, B, E> From<S> for Body<S>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: bytes::Buf,
    E: StdError,
{
    fn from(inner: S) -> Self {
        Self { inner }
    }
}

/// Extension for anything that streams body chunks.
pub trait EventBody: Sized {
    fn into_events(self) -> Body<Self>;
}

impl<S, B, E> EventBody for S
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: bytes::Buf,
    E: StdError,
{
    fn into_events(self) -> Body<Self> {
        Body::from(self)
    }
}
