use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, LevelFilter, Log, Metadata, Record};

use vdisk::util::format::pretty_size_from_bytes;
use vdisk::{Disk, FileDrive, Geometry, IoError, SectorCount};

#[derive(Parser, Debug)]
#[command(about = "Write, read back and verify sectors of a disk image")]
struct Args {
    /// Disk image to test
    #[arg(default_value = "disk_test.img")]
    path: PathBuf,

    /// Create a zero filled image of this many bytes before testing
    #[arg(long, value_name = "BYTES")]
    create: Option<u64>,

    /// Number of sectors to transfer, starting at sector 0
    #[arg(long, default_value_t = 2)]
    sectors: SectorCount,

    #[arg(short, long)]
    verbose: bool,
}

struct StdoutLogger;

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StdoutLogger = StdoutLogger;

/// Byte length of a `sectors` long transfer from sector 0, rejected up front
/// when it cannot fit on the medium.
fn transfer_len(geometry: &Geometry, sectors: SectorCount) -> vdisk::Result<usize> {
    Some(sectors)
        .filter(|sectors| *sectors <= geometry.sector_count)
        .and_then(|sectors| usize::try_from(sectors).ok())
        .and_then(|sectors| sectors.checked_mul(geometry.sector_size))
        .ok_or(IoError::InvalidRange {
            start: 0,
            count: sectors,
            sector_count: geometry.sector_count,
        })
}

/// Sequential native endian `u32` values, wrapping past `u32::MAX`.
fn test_pattern(len: usize) -> Vec<u8> {
    (0..len / 4)
        .flat_map(|i| (i as u32).to_ne_bytes())
        .collect()
}

/// Returns whether the data read back matched what was written.
fn disk_io_test(args: &Args) -> vdisk::Result<bool> {
    let drive = FileDrive::new();
    let mut disk = Disk::open("vdisk", &drive, args.path.as_path())?;
    info!(
        "{}: {} sectors of {} bytes ({})",
        disk.name(),
        disk.sector_count(),
        disk.sector_size(),
        pretty_size_from_bytes(disk.capacity())
    );

    let len = transfer_len(&disk.geometry(), args.sectors)?;
    let write_buffer = test_pattern(len);
    let mut read_buffer = vec![0u8; len];

    disk.write_sector(&write_buffer, 0, args.sectors)?;
    disk.read_sector(&mut read_buffer, 0, args.sectors)?;
    let equal = read_buffer == write_buffer;
    disk.close()?;
    if !equal {
        error!("data not equal!");
        return Ok(false);
    }

    let mut disk = Disk::open("vdisk", &drive, args.path.as_path())?;
    read_buffer.fill(0);
    disk.read_sector(&mut read_buffer, 0, args.sectors)?;
    disk.close()?;
    if read_buffer != write_buffer {
        error!("data not equal after reopen!");
        return Ok(false);
    }

    info!("disk io test ok!");
    Ok(true)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }

    if let Some(bytes) = args.create {
        if let Err(err) = FileDrive::create_image(&args.path, bytes) {
            error!("create disk failed: {}: {}", args.path.display(), err);
            return ExitCode::FAILURE;
        }
    }

    match disk_io_test(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("disk io test failed: {}", err);
            ExitCode::from(err.errno().clamp(1, 255) as u8)
        }
    }
}
