//! Sector addressed block devices.
//!
//! A [`DeviceDriver`] knows how to reach one kind of medium (an image file, a
//! RAM buffer, ...). A [`Disk`] binds a driver to one opened medium and checks
//! every transfer against the medium's geometry before the driver sees it.

pub mod consts;
pub mod disk;
pub mod driver;
pub mod util;

pub use consts::{SectorCount, SectorIndex, SECTOR_SIZE};
pub use disk::Disk;
pub use driver::file_drive::FileDrive;
pub use driver::mem_drive::MemDrive;
pub use driver::{DeviceDriver, Geometry};
pub use util::error::{IoError, Result};
