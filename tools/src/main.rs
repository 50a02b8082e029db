use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codec::{CodecLimits, Decoder, EncodeOptions, Encoder, LogTrace, NoTrace};
use glob::Pattern;
use log::LevelFilter;
use wadlz_tools::{format_report_pretty, inspect_stream, InspectReport};

#[derive(Parser)]
#[command(
    name = "wadlz-tools",
    version,
    about = "wadlz compression, decompression and inspection tools"
)]
struct Cli {
    /// Increase log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compress a raw file into a stream.
    Compress {
        input: PathBuf,
        output: PathBuf,
        /// Number of blocks compressed in parallel.
        #[arg(long, default_value_t = 1)]
        threads: usize,
    },
    /// Decompress a stream into a raw file.
    Decompress {
        input: PathBuf,
        output: PathBuf,
        /// Stop after this many decompressed bytes.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Inspect stream structure and check its invariants.
    Inspect {
        /// Path to a stream, or a directory of streams.
        path: PathBuf,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Sort inspected streams.
        #[arg(long, value_enum)]
        sort: Option<InspectSort>,
        /// Limit the number of inspected streams (after sorting).
        #[arg(long)]
        limit: Option<usize>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = InspectFormat::Pretty)]
        format: InspectFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InspectSort {
    Size,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum InspectFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Command::Compress {
            input,
            output,
            threads,
        } => {
            let source =
                fs::read(&input).with_context(|| format!("read input {}", input.display()))?;
            let encoder = Encoder::new(EncodeOptions::with_threads(threads));
            let result = if cli.verbose > 0 {
                encoder.compress_traced(&source, &mut LogTrace)
            } else {
                encoder.compress_traced(&source, &mut NoTrace)
            };
            let stream = result.with_context(|| format!("compress {}", input.display()))?;
            fs::write(&output, &stream)
                .with_context(|| format!("write output {}", output.display()))?;
            log::info!(
                "{}: {} -> {} bytes",
                input.display(),
                source.len(),
                stream.len()
            );
        }
        Command::Decompress {
            input,
            output,
            limit,
        } => {
            let stream =
                fs::read(&input).with_context(|| format!("read input {}", input.display()))?;
            let decoder = Decoder::new();
            let mut decoded = Vec::new();
            let result = if cli.verbose > 1 {
                decoder.decompress_traced(&stream, limit, &mut decoded, &mut LogTrace)
            } else {
                decoder.decompress_into(&stream, limit, &mut decoded)
            };
            result.with_context(|| format!("decompress {}", input.display()))?;
            fs::write(&output, &decoded)
                .with_context(|| format!("write output {}", output.display()))?;
            log::info!(
                "{}: {} -> {} bytes",
                input.display(),
                stream.len(),
                decoded.len()
            );
        }
        Command::Inspect {
            path,
            glob,
            sort,
            limit,
            format,
        } => {
            if path.is_dir() {
                let entries = collect_stream_entries(&path, glob.as_deref())?;
                let mut entries = maybe_sort_entries(entries, sort);
                let limit = limit.or(sort.map(|InspectSort::Size| 10));
                if let Some(limit) = limit {
                    entries.truncate(limit);
                }
                for entry in entries {
                    let report = inspect_path(&entry.path)?;
                    if format == InspectFormat::Pretty {
                        println!("== {} ({} bytes) ==", entry.path.display(), entry.size);
                    }
                    print_report(&report, format)?;
                }
            } else {
                let report = inspect_path(&path)?;
                print_report(&report, format)?;
            }
        }
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    builder.parse_default_env();
    let _ = builder.try_init();
}

fn inspect_path(path: &Path) -> Result<InspectReport> {
    let bytes = fs::read(path).with_context(|| format!("read stream {}", path.display()))?;
    inspect_stream(&bytes, &wire::Limits::default(), &CodecLimits::default())
        .with_context(|| format!("inspect {}", path.display()))
}

fn print_report(report: &InspectReport, format: InspectFormat) -> Result<()> {
    match format {
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(report).context("serialize json")?;
            println!("{json}");
        }
        InspectFormat::Pretty => print!("{}", format_report_pretty(report)),
    }
    Ok(())
}

struct StreamEntry {
    path: PathBuf,
    size: u64,
}

fn collect_stream_entries(dir: &Path, glob: Option<&str>) -> Result<Vec<StreamEntry>> {
    let mut entries = Vec::new();
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        let size = entry.metadata()?.len();
        entries.push(StreamEntry { path, size });
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

fn maybe_sort_entries(
    mut entries: Vec<StreamEntry>,
    sort: Option<InspectSort>,
) -> Vec<StreamEntry> {
    match sort {
        Some(InspectSort::Size) => {
            entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
        }
        None => {}
    }
    entries
}
