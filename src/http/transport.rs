//! Output transports a response is flushed to.
//!
//! # Responsibilities
//! - Accept a rendered status line
//! - Accept header lines in replace or append mode
//! - Accept body bytes
//!
//! # Design Decisions
//! - Transports are write-only; nothing is read back by the response
//! - `WriterTransport` holds header lines until the first body write so that
//!   replace mode can still drop earlier lines of the same name

use std::io::{self, Write};

use crate::http::headers::HeaderLine;

/// How a header line interacts with lines already emitted under its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMode {
    /// Drop earlier lines with the same name.
    Replace,
    /// Keep earlier lines; repeated names become repeated lines.
    Append,
}

/// Sink for a rendered response.
pub trait Transport {
    /// True when the platform has already flushed headers on its own.
    fn headers_sent(&self) -> bool {
        false
    }

    fn emit_status_line(&mut self, line: &str) -> io::Result<()>;

    fn emit_header(&mut self, line: &HeaderLine, mode: HeaderMode) -> io::Result<()>;

    fn write_body(&mut self, body: &[u8]) -> io::Result<()>;
}

/// Writes the raw wire form to any `io::Write`.
#[derive(Debug)]
pub struct WriterTransport<W: Write> {
    inner: W,
    status_line: Option<String>,
    pending: Vec<String>,
    flushed: bool,
}

impl<W: Write> WriterTransport<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            status_line: None,
            pending: Vec::new(),
            flushed: false,
        }
    }

    /// Write the status line and pending headers followed by the blank line.
    pub fn finish_headers(&mut self) -> io::Result<()> {
        if self.flushed {
            return Ok(());
        }
        if let Some(status) = self.status_line.take() {
            write!(self.inner, "{}\r\n", status)?;
        }
        for line in self.pending.drain(..) {
            write!(self.inner, "{}\r\n", line)?;
        }
        self.inner.write_all(b"\r\n")?;
        self.flushed = true;
        Ok(())
    }

    /// Flush everything and hand back the writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.finish_headers()?;
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> Transport for WriterTransport<W> {
    fn headers_sent(&self) -> bool {
        self.flushed
    }

    fn emit_status_line(&mut self, line: &str) -> io::Result<()> {
        self.status_line = Some(line.to_string());
        Ok(())
    }

    fn emit_header(&mut self, line: &HeaderLine, mode: HeaderMode) -> io::Result<()> {
        if mode == HeaderMode::Replace {
            let prefix = format!("{}:", line.name().to_ascii_lowercase());
            self.pending
                .retain(|existing| !existing.to_ascii_lowercase().starts_with(&prefix));
        }
        self.pending.push(line.to_string());
        Ok(())
    }

    fn write_body(&mut self, body: &[u8]) -> io::Result<()> {
        self.finish_headers()?;
        self.inner.write_all(body)
    }
}

/// A single call observed by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    StatusLine(String),
    Header { line: String, mode: HeaderMode },
    Body(Vec<u8>),
}

/// Captures every call instead of writing anywhere.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    calls: Vec<TransportCall>,
    platform_sent: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend the platform already flushed its headers.
    pub fn with_platform_headers_sent(mut self) -> Self {
        self.platform_sent = true;
        self
    }

    pub fn calls(&self) -> &[TransportCall] {
        &self.calls
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    /// Header lines in emission order.
    pub fn header_lines(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                TransportCall::Header { line, .. } => Some(line.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Concatenated body writes.
    pub fn body(&self) -> Vec<u8> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                TransportCall::Body(bytes) => Some(bytes.as_slice()),
                _ => None,
            })
            .flatten()
            .copied()
            .collect()
    }
}

impl Transport for RecordingTransport {
    fn headers_sent(&self) -> bool {
        self.platform_sent
    }

    fn emit_status_line(&mut self, line: &str) -> io::Result<()> {
        self.calls.push(TransportCall::StatusLine(line.to_string()));
        Ok(())
    }

    fn emit_header(&mut self, line: &HeaderLine, mode: HeaderMode) -> io::Result<()> {
        self.calls.push(TransportCall::Header {
            line: line.to_string(),
            mode,
        });
        Ok(())
    }

    fn write_body(&mut self, body: &[u8]) -> io::Result<()> {
        self.calls.push(TransportCall::Body(body.to_vec()));
        Ok(())
    }
}
