//! Bridge from ByteReader to the AsyncRead + AsyncSeek pair the Parquet stream
//! builder expects.
//!
//! Reads are served from a single window of up to `PARQUET_BUFFER_SIZE` bytes.
//! When a read falls outside the window a new ranged read is issued. Windows
//! never start later than `PARQUET_BUFFER_SIZE` bytes before the end of the
//! object, so the trailer read and the metadata read before it share one
//! request whenever the metadata fits in the buffer.

use anyhow::Result;
use bytes::Bytes;
use futures::future::BoxFuture;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncSeek, ReadBuf};

use crate::config::PARQUET_BUFFER_SIZE;
use crate::error::SourceError;
use crate::io::ByteReader;

/// Bytes fetched from the underlying reader, anchored at `start`
struct Window {
    start: u64,
    data: Bytes,
}

impl Window {
    fn contains(&self, position: u64) -> bool {
        position >= self.start && position < self.start + self.data.len() as u64
    }
}

/// In-flight ranged read and the offset it was issued for
struct PendingFetch {
    start: u64,
    future: BoxFuture<'static, Result<Vec<u8>>>,
}

/// Adapter that implements AsyncRead + AsyncSeek over a ByteReader
pub struct ByteReaderAdapter<R: ByteReader> {
    reader: Arc<R>,
    len: u64,
    position: u64,
    window: Option<Window>,
    pending: Option<PendingFetch>,
}

impl<R: ByteReader> ByteReaderAdapter<R> {
    /// Create a new adapter; the object size is fetched once up front
    pub async fn new(reader: Arc<R>) -> Result<Self> {
        let len = reader.size().await?;
        Ok(Self {
            reader,
            len,
            position: 0,
            window: None,
            pending: None,
        })
    }

    pub fn object_size(&self) -> u64 {
        self.len
    }

    /// Copy from the window into `buf`, returning false if the window misses
    fn copy_from_window(&mut self, buf: &mut ReadBuf<'_>) -> bool {
        let Some(window) = self.window.as_ref().filter(|w| w.contains(self.position)) else {
            return false;
        };

        let offset = (self.position - window.start) as usize;
        let n = std::cmp::min(buf.remaining(), window.data.len() - offset);
        buf.put_slice(&window.data[offset..offset + n]);
        self.position += n as u64;
        true
    }
}

impl<R: ByteReader + 'static> AsyncRead for ByteReaderAdapter<R> {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if self.position >= self.len || self.copy_from_window(buf) {
            return Poll::Ready(Ok(()));
        }

        let mut pending = match self.pending.take() {
            Some(pending) => pending,
            None => {
                let reader = Arc::clone(&self.reader);
                // Pull the window back so a read near the end also covers
                // the bytes just before it
                let start = std::cmp::min(
                    self.position,
                    self.len.saturating_sub(PARQUET_BUFFER_SIZE as u64),
                );
                let end = std::cmp::min(start + PARQUET_BUFFER_SIZE as u64, self.len);
                PendingFetch {
                    start,
                    future: Box::pin(async move { reader.read_range(start, end).await }),
                }
            }
        };

        match pending.future.as_mut().poll(cx) {
            Poll::Pending => {
                self.pending = Some(pending);
                Poll::Pending
            }
            Poll::Ready(result) => {
                let start = pending.start;
                // Keep SourceError on top so the category survives the trip
                // through the Parquet reader
                let data = result.map_err(|err| match err.downcast::<SourceError>() {
                    Ok(source) => io::Error::other(source),
                    Err(err) => io::Error::other(err),
                })?;
                if data.is_empty() {
                    // Object shrank underneath us; report EOF rather than spin
                    return Poll::Ready(Ok(()));
                }
                self.window = Some(Window {
                    start,
                    data: Bytes::from(data),
                });
                self.copy_from_window(buf);
                Poll::Ready(Ok(()))
            }
        }
    }
}

impl<R: ByteReader + 'static> AsyncSeek for ByteReaderAdapter<R> {
    fn start_seek(mut self: Pin<&mut Self>, seek_pos: io::SeekFrom) -> io::Result<()> {
        let target = match seek_pos {
            io::SeekFrom::Start(pos) => Some(pos),
            io::SeekFrom::End(offset) => self.len.checked_add_signed(offset),
            io::SeekFrom::Current(offset) => self.position.checked_add_signed(offset),
        };

        let Some(target) = target else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Cannot seek to negative position",
            ));
        };

        self.position = target;
        // A fetch issued for the old position is useless now
        self.pending = None;
        Ok(())
    }

    fn poll_complete(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<u64>> {
        Poll::Ready(Ok(self.position))
    }
}
