use crate::consts::{SectorCount, SectorIndex};
use crate::driver::Geometry;
use crate::util::error::{IoError, Result};

/// Rejects any request that reaches past the last sector. The upper bound is
/// exclusive, so `start + count == sector_count` still addresses the final sector.
pub(crate) fn check_range(
    geometry: &Geometry,
    start: SectorIndex,
    count: SectorCount,
) -> Result<()> {
    let in_bounds = start
        .checked_add(count)
        .is_some_and(|end| end <= geometry.sector_count);

    if !in_bounds {
        return Err(IoError::InvalidRange {
            start,
            count,
            sector_count: geometry.sector_count,
        });
    }
    Ok(())
}

pub(crate) fn check_buffer(geometry: &Geometry, len: usize, count: SectorCount) -> Result<()> {
    let required = usize::try_from(count)
        .ok()
        .and_then(|count| count.checked_mul(geometry.sector_size))
        .unwrap_or(usize::MAX);

    if len < required {
        return Err(IoError::BufferTooSmall { len, required });
    }
    Ok(())
}
