//! Bounded-memory streaming copy with a reusable buffer.
//!
//! One [`CopyBuffer`] is allocated per compression run and shared by every
//! file, so archiving a tree never allocates per file and never holds more
//! than one buffer's worth of file data in memory.

use crate::ProgressCallback;
use std::io;
use std::io::Read;
use std::io::Write;

/// Size of the copy buffer (64 KB).
pub const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Fixed-size buffer reused across copy operations.
///
/// # Examples
///
/// ```
/// use zipdir_core::NoopProgress;
/// use zipdir_core::copy::CopyBuffer;
/// use zipdir_core::copy::copy_with_buffer;
///
/// let mut buffer = CopyBuffer::new();
/// let mut input: &[u8] = b"hello";
/// let mut output = Vec::new();
///
/// let copied = copy_with_buffer(&mut input, &mut output, &mut buffer, &mut NoopProgress)?;
/// assert_eq!(copied, 5);
/// assert_eq!(output, b"hello");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct CopyBuffer {
    #[allow(clippy::large_stack_arrays)]
    buf: [u8; COPY_BUFFER_SIZE],
}

impl CopyBuffer {
    /// Creates a new zero-initialized copy buffer.
    #[inline]
    #[must_use]
    #[allow(clippy::large_stack_arrays)]
    pub fn new() -> Self {
        Self {
            buf: [0u8; COPY_BUFFER_SIZE],
        }
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies `reader` to `writer` through `buffer`, reporting each chunk.
///
/// Interrupted reads are retried. Returns the number of bytes copied.
///
/// # Errors
///
/// Returns the first read or write error. Data copied before the error has
/// already reached `writer`.
#[inline]
pub fn copy_with_buffer<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
    progress: &mut dyn ProgressCallback,
) -> io::Result<u64> {
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        writer.write_all(&buffer.buf[..bytes_read])?;

        total = total
            .checked_add(bytes_read as u64)
            .ok_or_else(|| io::Error::other("copied byte count overflowed"))?;
        progress.on_bytes_written(bytes_read as u64);
    }

    Ok(total)
}
