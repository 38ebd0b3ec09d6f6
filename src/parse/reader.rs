use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Default read size, in bytes, for one chunk of a scanned file.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 60;

/// Incremental line reader over fixed-size chunks.
///
/// Bytes are pulled from the underlying reader one chunk at a time. Complete
/// lines are queued as soon as a chunk contains a newline; a trailing partial
/// line stays buffered until the next chunk (or end of input) completes it.
/// Calling [`ChunkedLineReader::stop`] drops the underlying reader so no
/// further bytes are read.
pub struct ChunkedLineReader<R> {
    inner: Option<R>,
    chunk: Vec<u8>,
    partial: Vec<u8>,
    ready: VecDeque<Vec<u8>>,
    bytes_read: u64,
}

impl ChunkedLineReader<File> {
    /// Open `path` for chunked reading.
    pub fn open(path: &Path, chunk_size: usize) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file, chunk_size))
    }
}

impl<R: Read> ChunkedLineReader<R> {
    pub fn new(inner: R, chunk_size: usize) -> Self {
        Self {
            inner: Some(inner),
            chunk: vec![0; chunk_size.max(1)],
            partial: Vec::new(),
            ready: VecDeque::new(),
            bytes_read: 0,
        }
    }

    /// Return the next complete line without its terminator, or `None` once
    /// input is exhausted or the reader was stopped.
    ///
    /// A trailing `\r` is stripped. Invalid UTF-8 sequences are replaced with
    /// `U+FFFD`; only failures of the underlying reader are errors.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(raw) = self.ready.pop_front() {
                return Ok(Some(decode_line(raw)));
            }
            if !self.fill()? {
                return Ok(None);
            }
        }
    }

    /// Stop reading. The underlying reader is dropped (closing a file) and
    /// any buffered but unconsumed input is discarded.
    pub fn stop(&mut self) {
        self.inner = None;
        self.partial.clear();
        self.ready.clear();
    }

    pub fn is_stopped(&self) -> bool {
        self.inner.is_none()
    }

    /// Total number of bytes pulled from the underlying reader so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Read one chunk and queue any lines it completes. Returns false when no
    /// more lines can be produced.
    fn fill(&mut self) -> io::Result<bool> {
        let Some(inner) = self.inner.as_mut() else {
            return Ok(false);
        };

        let n = loop {
            match inner.read(&mut self.chunk) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };

        if n == 0 {
            self.inner = None;
            if self.partial.is_empty() {
                return Ok(false);
            }
            // Last line without a terminating newline.
            self.ready.push_back(std::mem::take(&mut self.partial));
            return Ok(true);
        }

        self.bytes_read += n as u64;
        let mut rest = &self.chunk[..n];
        while let Some(pos) = rest.iter().position(|&b| b == b'\n') {
            let mut line = std::mem::take(&mut self.partial);
            line.extend_from_slice(&rest[..pos]);
            self.ready.push_back(line);
            rest = &rest[pos + 1..];
        }
        self.partial.extend_from_slice(rest);
        Ok(true)
    }
}

fn decode_line(mut raw: Vec<u8>) -> String {
    if raw.last() == Some(&b'\r') {
        raw.pop();
    }
    match String::from_utf8(raw) {
        Ok(line) => line,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}
