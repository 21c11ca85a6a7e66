//! Buffered copy shared by both output sinks.

use crate::ProgressCallback;
use std::io;
use std::io::Read;
use std::io::Write;

/// Buffer size for copying file contents (64 KiB).
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Reusable copy buffer, allocated once per sink run.
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Box<[u8]>,
}

impl CopyBuffer {
    /// Allocates a zeroed buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; COPY_BUFFER_SIZE].into_boxed_slice(),
        }
    }

    /// Buffer size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies `reader` into `writer`, reporting each chunk to `progress`.
///
/// Returns the number of bytes copied. Interrupted reads are retried.
///
/// # Examples
///
/// ```
/// use keysweep_core::NoopProgress;
/// use keysweep_core::copy::CopyBuffer;
/// use keysweep_core::copy::copy_with_progress;
///
/// let mut input: &[u8] = b"PRIVATE KEY";
/// let mut output = Vec::new();
/// let copied = copy_with_progress(&mut input, &mut output, &mut CopyBuffer::new(), &mut NoopProgress)?;
/// assert_eq!(copied, 11);
/// assert_eq!(output, b"PRIVATE KEY");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn copy_with_progress<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
    progress: &mut dyn ProgressCallback,
) -> io::Result<u64> {
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buffer.buf) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&buffer.buf[..n])?;
        total += n as u64;
        progress.on_bytes_written(n as u64);
    }
}
