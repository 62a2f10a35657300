use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use log::LevelFilter;

use dvpl_codecs::{provider_by_name, DEFAULT_HC_LEVEL};
use dvpl_core::{decode, encode, inspect, FOOTER_SIZE};

// ── CLI definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "dvpl",
    about = "Pack, unpack, and inspect DVPL game-asset containers",
    version
)]
struct Cli {
    /// What to do with the input file
    #[arg(long, value_enum, ignore_case = true)]
    mode: Mode,
    /// Source file
    #[arg(long = "in")]
    input: PathBuf,
    /// Destination file (required for encode and decode)
    #[arg(long = "out")]
    output: Option<PathBuf>,
    /// Try LZ4HC on encode; the payload is stored raw if it does not shrink
    #[arg(long)]
    compress: bool,
    /// Compression provider: hc | fast | store
    #[arg(long, default_value = "hc")]
    compressor: String,
    /// LZ4HC level (1–12, only used with --compressor hc)
    #[arg(long, default_value_t = DEFAULT_HC_LEVEL, value_parser = clap::value_parser!(i32).range(1..=12))]
    level: i32,
    /// Log more (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Wrap a raw file in a DVPL container
    Encode,
    /// Validate a DVPL container and write its payload
    Decode,
    /// Print the footer of a DVPL container
    Inspect,
}

// ── Helpers ────────────────────────────────────────────────────────────────

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn print_usage() {
    let modes: Vec<String> = Mode::value_variants()
        .iter()
        .filter_map(|m| m.to_possible_value())
        .map(|v| v.get_name().to_string())
        .collect();
    println!("Usage: dvpl --mode <mode> --in <input file> --out <output file>");
    println!("Modes: {}", modes.join(", "));
}

fn human_bytes(n: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut v = n as f64;
    let mut unit = 0;
    while v >= 1024.0 && unit < UNITS.len() - 1 {
        v /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", n)
    } else {
        format!("{:.2} {}", v, UNITS[unit])
    }
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("reading input file {:?}", path))
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("writing output file {:?}", path))
}

fn required_output(output: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    output.context("--out is required for encode and decode")
}

// ── Mode implementations ───────────────────────────────────────────────────

fn run_encode(cli: Cli) -> anyhow::Result<()> {
    let output = required_output(cli.output)?;
    let provider = provider_by_name(&cli.compressor, cli.level)?;
    let raw = read_input(&cli.input)?;

    let t0 = Instant::now();
    let container = encode(&raw, cli.compress, provider.as_ref())
        .with_context(|| format!("encoding {:?}", cli.input))?;
    let elapsed = t0.elapsed();

    write_output(&output, &container)?;

    let footer = inspect(&container)?;
    let stored = footer.compressed_size as u64;
    log::info!("wrote {:?}: {}", output, footer);
    eprintln!("  provider    : {}", provider.name());
    eprintln!("  type        : {}", footer.compression_type()?.name());
    eprintln!("  raw size    : {}", human_bytes(raw.len() as u64));
    eprintln!("  stored      : {}", human_bytes(stored));
    if stored > 0 {
        eprintln!("  ratio       : {:.2}x", raw.len() as f64 / stored as f64);
    }
    eprintln!("  elapsed     : {:.3}s", elapsed.as_secs_f64());
    Ok(())
}

fn run_decode(cli: Cli) -> anyhow::Result<()> {
    let output = required_output(cli.output)?;
    let provider = provider_by_name(&cli.compressor, cli.level)?;
    let container = read_input(&cli.input)?;

    let t0 = Instant::now();
    let raw = decode(&container, provider.as_ref())
        .with_context(|| format!("decoding {:?}", cli.input))?;
    let elapsed = t0.elapsed();

    write_output(&output, &raw)?;

    log::info!("wrote {} bytes to {:?}", raw.len(), output);
    eprintln!("  container   : {}", human_bytes(container.len() as u64));
    eprintln!("  raw size    : {}", human_bytes(raw.len() as u64));
    eprintln!("  elapsed     : {:.3}s", elapsed.as_secs_f64());
    Ok(())
}

fn run_inspect(cli: Cli) -> anyhow::Result<()> {
    let container = read_input(&cli.input)?;
    let footer = inspect(&container).with_context(|| format!("inspecting {:?}", cli.input))?;

    let type_name = footer
        .compression_type()
        .map(|t| t.name().to_string())
        .unwrap_or_else(|_| format!("unknown ({})", footer.type_tag));

    println!("=== DVPL File: {:?} ===", cli.input);
    println!();
    println!("  {}", footer);
    println!("  type           : {}", type_name);
    println!("  original size  : {}", human_bytes(footer.original_size as u64));
    println!("  stored size    : {}", human_bytes(footer.compressed_size as u64));
    println!("  crc32          : 0x{:08x}", footer.crc32 as u32);
    println!("  file on disk   : {}", human_bytes(container.len() as u64));
    if footer.container_len() != container.len() as u64 {
        println!(
            "  note           : footer implies {} bytes ({} payload + {} footer)",
            footer.container_len(),
            footer.compressed_size,
            FOOTER_SIZE
        );
    }
    Ok(())
}

// ── Entry point ────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                return ExitCode::SUCCESS;
            }
            _ => {
                println!("Error parsing arguments: {}", e.render());
                print_usage();
                return ExitCode::FAILURE;
            }
        },
    };

    init_logging(cli.verbose);
    let mode = cli.mode;
    log::debug!("dvpl {} mode={:?}", env!("CARGO_PKG_VERSION"), mode);

    let result = match mode {
        Mode::Encode => run_encode(cli),
        Mode::Decode => run_decode(cli),
        Mode::Inspect => run_inspect(cli),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
