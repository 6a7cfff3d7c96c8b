//! Minimal HTTP/1.1 body plumbing for the Docker Engine API
//!
//! Enough to read chunked and length-delimited responses off a Unix
//! socket, plus the 8-byte stream-frame demultiplexing the logs endpoint
//! uses for non-TTY containers.

use std::collections::HashMap;

use logspool_core::{Error, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

/// Whether a response body uses chunked transfer encoding
pub(crate) fn is_chunked(headers: &HashMap<String, String>) -> bool {
    headers
        .get("transfer-encoding")
        .map_or(false, |v| v.to_lowercase().contains("chunked"))
}

/// Reads a response body chunk by chunk
///
/// For chunked bodies, `next` yields one transfer chunk at a time; for
/// plain bodies it yields whatever the socket delivers. `None` marks the
/// end of the body.
pub(crate) struct ChunkStream<R> {
    reader: R,
    chunked: bool,
    done: bool,
}

impl<R: AsyncBufRead + Unpin> ChunkStream<R> {
    pub(crate) fn new(reader: R, chunked: bool) -> Self {
        Self {
            reader,
            chunked,
            done: false,
        }
    }

    pub(crate) async fn next(&mut self) -> Result<Option<Vec<u8>>> {
        if self.done {
            return Ok(None);
        }

        if !self.chunked {
            let mut buf = vec![0u8; 8192];
            let n = self.reader.read(&mut buf).await?;
            if n == 0 {
                self.done = true;
                return Ok(None);
            }
            buf.truncate(n);
            return Ok(Some(buf));
        }

        let mut size_line = String::new();
        if self.reader.read_line(&mut size_line).await? == 0 {
            self.done = true;
            return Ok(None);
        }
        let size_str = size_line.trim().split(';').next().unwrap_or_default().trim();
        let size = usize::from_str_radix(size_str, 16)
            .map_err(|_| Error::runtime(format!("Invalid chunk size {:?}", size_line.trim())))?;

        if size == 0 {
            self.done = true;
            let mut trailer = String::new();
            let _ = self.reader.read_line(&mut trailer).await;
            return Ok(None);
        }

        let mut data = vec![0u8; size];
        self.reader.read_exact(&mut data).await?;
        let mut crlf = [0u8; 2];
        self.reader.read_exact(&mut crlf).await?;
        Ok(Some(data))
    }
}

/// Demultiplexes the Docker attach/logs stream framing
///
/// Each frame is an 8-byte header (stream type, three zero bytes, a
/// big-endian payload length) followed by the payload.
#[derive(Default)]
pub(crate) struct FrameDecoder {
    buf: Vec<u8>,
}

impl FrameDecoder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Next complete frame payload, if the buffer holds one
    pub(crate) fn next_payload(&mut self) -> Option<Vec<u8>> {
        if self.buf.len() < 8 {
            return None;
        }
        let len = u32::from_be_bytes([self.buf[4], self.buf[5], self.buf[6], self.buf[7]]) as usize;
        if self.buf.len() < 8 + len {
            return None;
        }
        let payload = self.buf[8..8 + len].to_vec();
        self.buf.drain(..8 + len);
        Some(payload)
    }
}

/// Splits a byte stream into complete text lines
///
/// Partial lines are buffered until their newline arrives; trailing
/// `\r` is stripped.
#[derive(Default)]
pub(crate) struct LineSplitter {
    buf: Vec<u8>,
}

impl LineSplitter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(bytes);
        let mut lines = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.buf.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }
}
