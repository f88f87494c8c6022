//! Line framing for the DICT protocol.
//!
//! Bytes arriving from the transport are buffered until a CRLF is seen.
//! Each complete line is handed out once, in arrival order, without its
//! terminator. Bytes after the last CRLF stay buffered for the next read.

#![allow(clippy::missing_errors_doc)]

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::{Error, Result};

/// Bytes reserved ahead of each read.
const READ_CHUNK: usize = 4096;

/// Maximum line length to prevent memory exhaustion.
pub const MAX_LINE_LENGTH: usize = 1024 * 1024; // 1 MB

/// Line-oriented stream over a byte transport.
pub struct LineStream<S> {
    stream: S,
    buffer: BytesMut,
    max_line_length: usize,
}

impl<S> LineStream<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Creates a new line stream with the default line limit.
    pub fn new(stream: S) -> Self {
        Self::with_max_line_length(stream, MAX_LINE_LENGTH)
    }

    /// Creates a new line stream that rejects lines longer than `max`.
    pub fn with_max_line_length(stream: S, max: usize) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            max_line_length: max,
        }
    }

    /// Reads the next CRLF-terminated line, without the CRLF.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    ///
    /// Fails with [`Error::ConnectionClosed`] if the stream ends first and
    /// with [`Error::LineTooLong`] if no CRLF shows up within the limit.
    pub async fn read_line(&mut self) -> Result<String> {
        let mut scanned = 0;

        loop {
            if let Some(pos) = find_crlf(&self.buffer[scanned..]) {
                let end = scanned + pos;
                let line = String::from_utf8_lossy(&self.buffer[..end]).into_owned();
                self.buffer.advance(end + 2);
                return Ok(line);
            }

            // A CR at the very end may pair with an LF still in flight.
            scanned = self.buffer.len().saturating_sub(1);

            if self.buffer.len() > self.max_line_length {
                return Err(Error::LineTooLong(self.max_line_length));
            }

            self.buffer.reserve(READ_CHUNK);
            if self.stream.read_buf(&mut self.buffer).await? == 0 {
                return Err(Error::ConnectionClosed);
            }
        }
    }

    /// Writes one serialized command and flushes it.
    pub async fn write_line(&mut self, data: &[u8]) -> Result<()> {
        self.stream.write_all(data).await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Shuts down the write half of the transport.
    pub async fn shutdown(&mut self) -> Result<()> {
        self.stream.shutdown().await?;
        Ok(())
    }

    /// Bytes received after the last complete line.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }
}

/// Finds the position of CRLF in a buffer.
fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}
