use anyhow::{Context, Result};
use clap::Parser;
use collector::reader::{default_volume, open_volume};
use collector::volume::MAX_ALIGNMENT;
use collector::{probe, ProbeOptions, ProbeReport, SeekVolume};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mftcheck")]
#[command(about = "Locate the NTFS Master File Table from the boot sector and verify its signature", long_about = None)]
struct Cli {
    /// Volume, block device or image file (e.g. \\.\C:, /dev/sda1, disk.img)
    #[arg(env = "MFTCHECK_VOLUME")]
    volume: Option<String>,

    /// Reject volumes whose OEM ID, geometry or reserved fields are not NTFS
    #[arg(long)]
    strict: bool,

    /// Also locate and verify $MFTMirr
    #[arg(long)]
    mirror: bool,

    /// Read alignment in bytes, a power of two up to 65536 (raised to the sector size once the VBR is read)
    #[arg(long, default_value_t = 512, value_parser = parse_alignment)]
    align: u64,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "warn", env = "MFTCHECK_LOG")]
    log_level: String,
}

/// `--align` 값 검증: 1..=64KB 범위의 2의 거듭제곱만 허용
fn parse_alignment(s: &str) -> Result<u64, String> {
    let value: u64 = s.parse().map_err(|e| format!("{}", e))?;
    if !value.is_power_of_two() || value > MAX_ALIGNMENT {
        return Err(format!("must be a power of two between 1 and {}", MAX_ALIGNMENT));
    }
    Ok(value)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG가 있으면 우선, 없으면 --log-level. 리포트는 stdout, 로그는 stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(report) if report.is_consistent() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<ProbeReport> {
    let path = cli
        .volume
        .as_deref()
        .or_else(default_volume)
        .context("No volume given (pass a path or set MFTCHECK_VOLUME)")?;

    tracing::info!("Opening volume {}", path);
    let file = open_volume(path).with_context(|| format!("Failed to open volume {}", path))?;
    let mut volume = SeekVolume::new(file).with_alignment(cli.align);

    let options = ProbeOptions {
        strict: cli.strict,
        check_mirror: cli.mirror,
    };
    let report = probe(&mut volume, options)?;
    print_report(&report);

    Ok(report)
}

fn print_report(report: &ProbeReport) {
    let bs = &report.boot_sector;

    println!("OEM ID: {:?}", bs.oem_id_str());
    println!("Volume Serial Number: {:016X}", bs.volume_serial_number);
    println!("Total Sectors: {}", bs.total_sectors);
    println!("MFT Start LCN: {}", bs.mft_start_cluster);
    println!("Bytes Per Sector: {}", bs.bytes_per_sector);
    println!("Sectors Per Cluster: {}", bs.sectors_per_cluster);
    match (bs.file_record_size(), report.file_record_bytes) {
        (Some(size), Some(bytes)) => println!("File Record Size: {} ({} bytes)", size, bytes),
        _ => println!("File Record Size: invalid ({})", bs.clusters_per_file_record),
    }
    println!("Calculated MFT Offset: 0x{:X}", report.mft.offset);

    if report.mft.verified {
        println!("MFT signature verified successfully.");
    } else {
        println!("Failed to verify MFT signature.");
    }

    if let Some(mirror) = report.mirror {
        println!("MFT Mirror Start LCN: {}", bs.mft2_start_cluster);
        println!("Calculated MFT Mirror Offset: 0x{:X}", mirror.offset);
        if mirror.verified {
            println!("MFT mirror signature verified successfully.");
        } else {
            println!("Failed to verify MFT mirror signature.");
        }
    }
}
