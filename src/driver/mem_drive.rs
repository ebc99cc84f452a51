use std::io;

use crate::consts::{SectorCount, SectorIndex, SECTOR_SIZE};
use crate::driver::{DeviceDriver, Geometry};
use crate::util::error::{IoError, Result};

/// Volatile medium kept in memory. Contents are lost on close.
#[derive(Debug, Clone, Copy)]
pub struct MemDrive {
    sector_size: usize,
}

impl MemDrive {
    pub fn new() -> MemDrive {
        MemDrive::with_sector_size(SECTOR_SIZE)
    }

    pub fn with_sector_size(sector_size: usize) -> MemDrive {
        MemDrive { sector_size }
    }

    fn range(geometry: &Geometry, start: SectorIndex, count: SectorCount) -> (usize, usize) {
        let offset = geometry.offset_of(start) as usize;
        (offset, offset + geometry.transfer_len(count))
    }
}

impl Default for MemDrive {
    fn default() -> Self {
        MemDrive::new()
    }
}

impl DeviceDriver for MemDrive {
    /// Number of sectors to allocate.
    type InitData = SectorCount;
    type State = Vec<u8>;

    fn open(&self, sector_count: &SectorCount) -> Result<(Vec<u8>, Geometry)> {
        if self.sector_size == 0 {
            return Err(IoError::OpenFailed(io::Error::new(
                io::ErrorKind::InvalidInput,
                "sector size must be non-zero",
            )));
        }

        let geometry = Geometry {
            sector_size: self.sector_size,
            sector_count: *sector_count,
        };
        let len = geometry
            .byte_len()
            .and_then(|len| usize::try_from(len).ok())
            .ok_or_else(|| {
                IoError::OpenFailed(io::Error::new(
                    io::ErrorKind::OutOfMemory,
                    format!("{} sectors do not fit in memory", sector_count),
                ))
            })?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|err| IoError::OpenFailed(io::Error::new(io::ErrorKind::OutOfMemory, err)))?;
        data.resize(len, 0);
        Ok((data, geometry))
    }

    fn close(&self, data: &mut Vec<u8>) -> Result<()> {
        data.clear();
        data.shrink_to_fit();
        Ok(())
    }

    fn read_sector(
        &self,
        data: &mut Vec<u8>,
        geometry: &Geometry,
        buffer: &mut [u8],
        start: SectorIndex,
        count: SectorCount,
    ) -> Result<()> {
        let (from, to) = Self::range(geometry, start, count);
        buffer[..to - from].copy_from_slice(&data[from..to]);
        Ok(())
    }

    fn write_sector(
        &self,
        data: &mut Vec<u8>,
        geometry: &Geometry,
        buffer: &[u8],
        start: SectorIndex,
        count: SectorCount,
    ) -> Result<()> {
        let (from, to) = Self::range(geometry, start, count);
        data[from..to].copy_from_slice(&buffer[..to - from]);
        Ok(())
    }
}
