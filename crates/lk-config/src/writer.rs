//! Line-oriented writer with a sticky error.
//!
//! Once a write fails, every later line is dropped and the first error is
//! kept. The byte count always reflects what reached the underlying writer.

use std::fmt;
use std::io::{self, Write};

use crate::error::WriteError;

/// Writes newline-terminated lines, tracking bytes written and the first error.
#[derive(Debug)]
pub struct StickyWriter<W> {
    inner: W,
    written: u64,
    error: Option<io::Error>,
}

impl<W: Write> StickyWriter<W> {
    /// Wrap a writer.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            written: 0,
            error: None,
        }
    }

    /// Write one formatted line followed by `\n`.
    ///
    /// Does nothing if an earlier write already failed.
    pub fn write_line(&mut self, args: fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        let mut line = args.to_string();
        line.push('\n');
        self.write_bytes(line.as_bytes());
    }

    fn write_bytes(&mut self, mut buf: &[u8]) {
        while !buf.is_empty() {
            match self.inner.write(buf) {
                Ok(0) => {
                    self.error = Some(io::Error::from(io::ErrorKind::WriteZero));
                    return;
                }
                Ok(n) => {
                    self.written += n as u64;
                    buf = &buf[n..];
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.error = Some(e);
                    return;
                }
            }
        }
    }

    /// Bytes written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Returns `true` if a write has failed.
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }

    /// Consume the writer, returning the byte count or the first error.
    pub fn finish(self) -> Result<u64, WriteError> {
        match self.error {
            None => Ok(self.written),
            Some(source) => Err(WriteError {
                written: self.written,
                source,
            }),
        }
    }
}
