use std::io;

use log::warn;

use crate::consts::{SectorCount, SectorIndex};
use crate::driver::{DeviceDriver, Geometry};
use crate::util::error::{IoError, Result};
use range::{check_buffer, check_range};

mod range;

/// An open block device: one driver bound to one medium.
///
/// Every transfer is checked against the medium's geometry before the driver
/// sees it. A handle exists only while the medium is open; [`Disk::close`]
/// consumes it. Dropping an open handle releases the medium as well.
///
/// One handle serves one caller at a time. Wrap it in a `Mutex` to share it.
pub struct Disk<'d, D: DeviceDriver> {
    name: String,
    driver: &'d D,
    state: D::State,
    geometry: Geometry,
    open: bool,
}

impl<'d, D: DeviceDriver> Disk<'d, D> {
    /// Binds `driver` to a new handle and acquires the medium described by
    /// `init_data`. `name` is a label for diagnostics only.
    pub fn open(name: &str, driver: &'d D, init_data: &D::InitData) -> Result<Disk<'d, D>> {
        let (mut state, geometry) = driver.open(init_data)?;

        if geometry.sector_size == 0 {
            if let Err(err) = driver.close(&mut state) {
                warn!("{}: release after rejected open failed: {}", name, err);
            }
            return Err(IoError::OpenFailed(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{}: driver reported a zero sector size", name),
            )));
        }

        Ok(Disk {
            name: name.to_string(),
            driver,
            state,
            geometry,
            open: true,
        })
    }

    /// Releases the medium. The handle is gone whether or not this succeeds.
    pub fn close(mut self) -> Result<()> {
        self.open = false;
        self.driver.close(&mut self.state)
    }

    pub fn read_sector(
        &mut self,
        buffer: &mut [u8],
        start: SectorIndex,
        count: SectorCount,
    ) -> Result<()> {
        check_range(&self.geometry, start, count)?;
        check_buffer(&self.geometry, buffer.len(), count)?;

        self.driver
            .read_sector(&mut self.state, &self.geometry, buffer, start, count)
    }

    pub fn write_sector(
        &mut self,
        buffer: &[u8],
        start: SectorIndex,
        count: SectorCount,
    ) -> Result<()> {
        check_range(&self.geometry, start, count)?;
        check_buffer(&self.geometry, buffer.len(), count)?;

        self.driver
            .write_sector(&mut self.state, &self.geometry, buffer, start, count)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sector_size(&self) -> usize {
        self.geometry.sector_size
    }

    pub fn sector_count(&self) -> SectorCount {
        self.geometry.sector_count
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Addressable size in bytes, saturating at `u64::MAX`.
    pub fn capacity(&self) -> u64 {
        self.geometry.byte_len().unwrap_or(u64::MAX)
    }
}

impl<'d, D: DeviceDriver> Drop for Disk<'d, D> {
    fn drop(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        if let Err(err) = self.driver.close(&mut self.state) {
            warn!("{}: release on drop failed: {}", self.name, err);
        }
    }
}
