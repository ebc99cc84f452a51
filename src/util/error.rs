use std::io;
use std::os::raw::c_int;

use thiserror::Error;

use crate::consts::{SectorCount, SectorIndex};

type ErrorNum = c_int;

pub type Result<T> = std::result::Result<T, IoError>;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("Failed to open medium: {0}")]
    OpenFailed(#[source] io::Error),
    #[error("Failed to close medium: {0}")]
    CloseFailed(#[source] io::Error),
    #[error("Seek failed at offset {offset:#x}: {source}")]
    SeekFailed { offset: u64, source: io::Error },
    #[error("Read failed: sector {start}, count {count}: {source}")]
    ReadFailed {
        start: SectorIndex,
        count: SectorCount,
        source: io::Error,
    },
    #[error("Write failed: sector {start}, count {count}: {source}")]
    WriteFailed {
        start: SectorIndex,
        count: SectorCount,
        source: io::Error,
    },
    #[error("Sector range out of bounds: start {start}, count {count}, total {sector_count}")]
    InvalidRange {
        start: SectorIndex,
        count: SectorCount,
        sector_count: SectorCount,
    },
    #[error("Buffer too small: {len} bytes, need {required}")]
    BufferTooSmall { len: usize, required: usize },
}

impl IoError {
    /// POSIX error number for callers that report failures as errno.
    pub fn errno(&self) -> ErrorNum {
        match self {
            IoError::OpenFailed(source) => source.raw_os_error().unwrap_or(match source.kind() {
                io::ErrorKind::NotFound => libc::ENOENT,
                io::ErrorKind::PermissionDenied => libc::EACCES,
                _ => libc::EIO,
            }),
            IoError::CloseFailed(_)
            | IoError::SeekFailed { .. }
            | IoError::ReadFailed { .. }
            | IoError::WriteFailed { .. } => libc::EIO,
            IoError::InvalidRange { .. } | IoError::BufferTooSmall { .. } => libc::EINVAL,
        }
    }
}
