pub mod file_drive;
pub mod mem_drive;

use crate::consts::{SectorCount, SectorIndex};
use crate::util::error::Result;

/// Shape of an opened medium, reported by the driver at open time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub sector_size: usize,
    pub sector_count: SectorCount,
}

impl Geometry {
    /// Total size in bytes, or `None` if it does not fit in a `u64`.
    pub fn byte_len(&self) -> Option<u64> {
        self.sector_count.checked_mul(self.sector_size as u64)
    }

    pub fn offset_of(&self, sector: SectorIndex) -> u64 {
        sector * self.sector_size as u64
    }

    pub fn transfer_len(&self, count: SectorCount) -> usize {
        count as usize * self.sector_size
    }
}

/// Capability set implemented once per medium type.
///
/// Drivers are only ever called through [`crate::disk::Disk`], which validates
/// sector ranges and buffer lengths before dispatch. Implementations may
/// assume `start + count <= geometry.sector_count` and that the buffer holds
/// at least `count * geometry.sector_size` bytes.
pub trait DeviceDriver {
    /// Medium specific data needed to acquire the medium, e.g. a path.
    type InitData: ?Sized;
    /// Opaque per-medium state owned by the handle.
    type State;

    fn open(&self, init_data: &Self::InitData) -> Result<(Self::State, Geometry)>;

    /// Releases the medium. Calling this twice on the same state is not supported.
    fn close(&self, state: &mut Self::State) -> Result<()>;

    fn read_sector(
        &self,
        state: &mut Self::State,
        geometry: &Geometry,
        buffer: &mut [u8],
        start: SectorIndex,
        count: SectorCount,
    ) -> Result<()>;

    /// Must not return before the data is durable enough for a following read
    /// of the same range to observe it.
    fn write_sector(
        &self,
        state: &mut Self::State,
        geometry: &Geometry,
        buffer: &[u8],
        start: SectorIndex,
        count: SectorCount,
    ) -> Result<()>;
}
