//! Bounded I/O for callers that start from a filesystem path.
//!
//! The analysis core itself is pure and operates on an in-memory buffer;
//! this module is the caller-side guard that bounds how much of a hostile
//! input ever reaches memory.

use crate::error::{AnalysisError, Result};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Resource limits for I/O operations.
#[derive(Debug, Clone)]
pub struct IOLimits {
    pub max_read_bytes: u64,
    pub max_file_size: u64,
}

impl Default for IOLimits {
    fn default() -> Self {
        Self {
            max_read_bytes: 10 * 1024 * 1024, // 10MB
            max_file_size: 100 * 1024 * 1024, // 100MB
        }
    }
}

/// A bounded reader that limits the amount of data read.
pub struct BoundedReader<R> {
    inner: R,
    bytes_read: u64,
    limit: u64,
}

impl<R: Read> BoundedReader<R> {
    pub fn new(reader: R, limit: u64) -> Self {
        Self {
            inner: reader,
            bytes_read: 0,
            limit,
        }
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}

impl<R: Read> Read for BoundedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.bytes_read >= self.limit {
            debug!("BoundedReader reached limit of {} bytes", self.limit);
            return Ok(0); // EOF
        }

        let remaining = self.limit - self.bytes_read;
        let max_to_read = std::cmp::min(buf.len() as u64, remaining) as usize;
        let n = self.inner.read(&mut buf[..max_to_read])?;
        self.bytes_read += n as u64;
        Ok(n)
    }
}

/// File reader that enforces the configured size limits up front.
pub struct SafeFileReader {
    file: File,
    size: u64,
    limits: IOLimits,
}

impl SafeFileReader {
    /// Open a file, rejecting it if it exceeds the size limit.
    pub fn open<P: AsRef<Path>>(path: P, limits: IOLimits) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let size = file.metadata()?.len();

        debug!(
            "Opened {:?}: {} bytes (max_file={}, max_read={})",
            path, size, limits.max_file_size, limits.max_read_bytes
        );

        if size > limits.max_file_size {
            warn!(
                "Rejecting oversized file {:?}: {} bytes (limit: {})",
                path, size, limits.max_file_size
            );
            return Err(AnalysisError::FileTooLarge {
                size,
                limit: limits.max_file_size,
            });
        }

        Ok(Self { file, size, limits })
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Read the entire file, bounded by `max_read_bytes`.
    pub fn read_all(&mut self) -> Result<Vec<u8>> {
        let mut reader = BoundedReader::new(&mut self.file, self.limits.max_read_bytes);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    #[test]
    fn test_bounded_reader() {
        let data = b"Hello, World! This is a test.";
        let mut reader = BoundedReader::new(Cursor::new(data), 10);

        let mut buf = [0u8; 20];
        let n = reader.read(&mut buf).unwrap();
        assert_eq!(n, 10);
        assert_eq!(&buf[..n], &data[..10]);
        assert_eq!(reader.bytes_read(), 10);

        // Further reads hit the limit and report EOF
        let n2 = reader.read(&mut buf).unwrap();
        assert_eq!(n2, 0);
    }

    #[test]
    fn test_safe_file_reader() {
        let test_data = b"sample evidence bytes";
        let temp_file = NamedTempFile::new().unwrap();
        temp_file.as_file().write_all(test_data).unwrap();

        let limits = IOLimits {
            max_read_bytes: 1000,
            max_file_size: 10000,
        };
        let mut reader = SafeFileReader::open(temp_file.path(), limits).unwrap();
        assert_eq!(reader.size(), test_data.len() as u64);
        assert_eq!(reader.read_all().unwrap(), test_data);
    }

    #[test]
    fn test_file_size_limit() {
        let temp_file = NamedTempFile::new().unwrap();
        temp_file.as_file().write_all(&[0u8; 100]).unwrap();

        let limits = IOLimits {
            max_read_bytes: 1000,
            max_file_size: 50,
        };
        let result = SafeFileReader::open(temp_file.path(), limits);
        assert!(matches!(
            result,
            Err(AnalysisError::FileTooLarge { size: 100, limit: 50 })
        ));
    }
}
