pub const SECTOR_SIZE: usize = 512;

pub type SectorIndex = u64;
pub type SectorCount = u64;
