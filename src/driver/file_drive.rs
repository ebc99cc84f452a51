use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::{debug, error};

use crate::consts::{SectorCount, SectorIndex, SECTOR_SIZE};
use crate::driver::{DeviceDriver, Geometry};
use crate::util::error::{IoError, Result};

/// Disk image stored in a regular file.
#[derive(Debug, Clone, Copy)]
pub struct FileDrive {
    sector_size: usize,
}

impl FileDrive {
    pub fn new() -> FileDrive {
        FileDrive::with_sector_size(SECTOR_SIZE)
    }

    pub fn with_sector_size(sector_size: usize) -> FileDrive {
        FileDrive { sector_size }
    }

    /// Creates a zero filled image of `bytes` bytes, replacing any existing file.
    pub fn create_image<P: AsRef<Path>>(path: P, bytes: u64) -> io::Result<()> {
        let file = File::create(path.as_ref())?;
        file.set_len(bytes)?;
        file.sync_all()?;
        debug!("created image {} ({} bytes)", path.as_ref().display(), bytes);
        Ok(())
    }

    fn seek(file: &mut File, offset: u64) -> Result<()> {
        file.seek(SeekFrom::Start(offset)).map_err(|source| {
            error!("seek disk failed: {:#x}", offset);
            IoError::SeekFailed { offset, source }
        })?;
        Ok(())
    }
}

impl Default for FileDrive {
    fn default() -> Self {
        FileDrive::new()
    }
}

impl DeviceDriver for FileDrive {
    type InitData = Path;
    type State = File;

    fn open(&self, path: &Path) -> Result<(File, Geometry)> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|err| {
                error!("open disk failed: {}: {}", path.display(), err);
                IoError::OpenFailed(err)
            })?;
        let bytes = file.metadata().map_err(IoError::OpenFailed)?.len();

        let geometry = Geometry {
            sector_size: self.sector_size,
            sector_count: bytes / self.sector_size.max(1) as u64,
        };
        debug!(
            "opened {}: {} sectors of {} bytes",
            path.display(),
            geometry.sector_count,
            geometry.sector_size
        );
        Ok((file, geometry))
    }

    fn close(&self, file: &mut File) -> Result<()> {
        file.sync_all().map_err(|err| {
            error!("close disk failed: {}", err);
            IoError::CloseFailed(err)
        })
    }

    fn read_sector(
        &self,
        file: &mut File,
        geometry: &Geometry,
        buffer: &mut [u8],
        start: SectorIndex,
        count: SectorCount,
    ) -> Result<()> {
        Self::seek(file, geometry.offset_of(start))?;

        let len = geometry.transfer_len(count);
        file.read_exact(&mut buffer[..len]).map_err(|source| {
            error!("read disk failed: sector: {}, count: {}", start, count);
            IoError::ReadFailed {
                start,
                count,
                source,
            }
        })
    }

    fn write_sector(
        &self,
        file: &mut File,
        geometry: &Geometry,
        buffer: &[u8],
        start: SectorIndex,
        count: SectorCount,
    ) -> Result<()> {
        Self::seek(file, geometry.offset_of(start))?;

        let len = geometry.transfer_len(count);
        file.write_all(&buffer[..len])
            .and_then(|_| file.flush())
            .and_then(|_| file.sync_data())
            .map_err(|source| {
                error!("write disk failed: sector: {}, count: {}", start, count);
                IoError::WriteFailed {
                    start,
                    count,
                    source,
                }
            })
    }
}
