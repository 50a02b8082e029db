use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use codec::{Decoder, EncodeOptions, Encoder, TraceStats};
use serde::Serialize;
use simbench::Scenario;

#[derive(Parser)]
#[command(
    name = "simbench",
    version,
    about = "wadlz compression benchmark harness"
)]
struct Cli {
    /// Bytes generated per scenario.
    #[arg(long, default_value_t = 64 * 1024)]
    size: usize,
    /// Thread counts to compress with.
    #[arg(long, value_delimiter = ',', default_values_t = [1, 4])]
    threads: Vec<usize>,
    /// Scenarios to run (all when omitted).
    #[arg(long, value_enum, value_delimiter = ',')]
    scenario: Vec<Scenario>,
    /// Timed iterations per run.
    #[arg(long, default_value_t = 5)]
    iterations: u32,
    /// RNG seed for deterministic results.
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Output directory for summary.json.
    #[arg(long, default_value = "target/simbench")]
    out_dir: PathBuf,
    /// Fail if any non-noise scenario compresses worse than this ratio.
    #[arg(long)]
    max_ratio: Option<f64>,
    /// Fail if any run's p95 encode time exceeds this many microseconds.
    #[arg(long)]
    max_p95_encode_us: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("create output dir {}", cli.out_dir.display()))?;

    let scenarios = if cli.scenario.is_empty() {
        Scenario::ALL.to_vec()
    } else {
        cli.scenario.clone()
    };

    let mut summary = Summary {
        size: cli.size,
        seed: cli.seed,
        iterations: cli.iterations,
        runs: Vec::new(),
    };
    for &scenario in &scenarios {
        let source = scenario.generate(cli.seed, cli.size);
        for &threads in &cli.threads {
            let run = run_scenario(scenario, &source, threads, cli.iterations)?;
            log::info!(
                "{scenario:?} x{threads}: {} -> {} bytes ({:.3}), p95 encode {}us",
                run.input_bytes,
                run.stream_bytes,
                run.ratio,
                run.p95_encode_us
            );
            summary.runs.push(run);
        }
    }

    summary.assert_budgets(cli.max_ratio, cli.max_p95_encode_us)?;
    write_summary_json(&cli.out_dir, &summary)?;
    Ok(())
}

fn init_logging() {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Info);
    builder.parse_default_env();
    let _ = builder.try_init();
}

fn run_scenario(
    scenario: Scenario,
    source: &[u8],
    threads: usize,
    iterations: u32,
) -> Result<Run> {
    let encoder = Encoder::new(EncodeOptions::with_threads(threads));
    let decoder = Decoder::new();

    let mut stats = TraceStats::new();
    let stream = encoder
        .compress_traced(source, &mut stats)
        .with_context(|| format!("compress {scenario:?} with {threads} threads"))?;
    let decoded = decoder
        .decompress(&stream, None)
        .with_context(|| format!("decompress {scenario:?} with {threads} threads"))?;
    if decoded != source {
        anyhow::bail!("{scenario:?} with {threads} threads did not round-trip");
    }

    let mut encode_us = Vec::with_capacity(iterations as usize);
    let mut decode_us = Vec::with_capacity(iterations as usize);
    for _ in 0..iterations {
        let start = Instant::now();
        let again = encoder.compress(source)?;
        encode_us.push(start.elapsed().as_micros() as u64);
        if again != stream {
            anyhow::bail!("{scenario:?} with {threads} threads is not deterministic");
        }

        let start = Instant::now();
        decoder.decompress(&stream, None)?;
        decode_us.push(start.elapsed().as_micros() as u64);
    }

    Ok(Run {
        scenario,
        threads,
        input_bytes: source.len(),
        stream_bytes: stream.len(),
        ratio: ratio(stream.len(), source.len()),
        blocks: stats.blocks,
        match_packets: stats.match_packets(),
        literal_packets: stats.literal_packets,
        pads_inserted: stats.pads_inserted,
        fillers_inserted: stats.fillers_inserted.total(),
        avg_encode_us: average(&encode_us),
        p95_encode_us: p95(&mut encode_us),
        avg_decode_us: average(&decode_us),
        p95_decode_us: p95(&mut decode_us),
    })
}

fn write_summary_json(out_dir: &Path, summary: &Summary) -> Result<()> {
    let path = out_dir.join("summary.json");
    let contents = serde_json::to_string_pretty(summary).context("serialize summary")?;
    fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct Summary {
    size: usize,
    seed: u64,
    iterations: u32,
    runs: Vec<Run>,
}

#[derive(Debug, Serialize)]
struct Run {
    scenario: Scenario,
    threads: usize,
    input_bytes: usize,
    stream_bytes: usize,
    ratio: f64,
    blocks: usize,
    match_packets: usize,
    literal_packets: usize,
    pads_inserted: usize,
    fillers_inserted: usize,
    avg_encode_us: u64,
    p95_encode_us: u64,
    avg_decode_us: u64,
    p95_decode_us: u64,
}

impl Summary {
    fn assert_budgets(&self, max_ratio: Option<f64>, max_p95_encode_us: Option<u64>) -> Result<()> {
        for run in &self.runs {
            if let Some(max_ratio) = max_ratio {
                if run.scenario != Scenario::Noise && run.ratio > max_ratio {
                    anyhow::bail!(
                        "{:?} x{} ratio {:.3} exceeds budget {max_ratio:.3}",
                        run.scenario,
                        run.threads,
                        run.ratio
                    );
                }
            }
            if let Some(max_us) = max_p95_encode_us {
                if run.p95_encode_us > max_us {
                    anyhow::bail!(
                        "{:?} x{} p95 encode {}us exceeds budget {max_us}us",
                        run.scenario,
                        run.threads,
                        run.p95_encode_us
                    );
                }
            }
        }
        Ok(())
    }
}

fn ratio(stream: usize, input: usize) -> f64 {
    if input == 0 {
        return 0.0;
    }
    stream as f64 / input as f64
}

fn average(values: &[u64]) -> u64 {
    if values.is_empty() {
        return 0;
    }
    values.iter().sum::<u64>() / values.len() as u64
}

fn p95(values: &mut [u64]) -> u64 {
    if values.is_empty() {
        return 0;
    }
    values.sort_unstable();
    let idx = ((values.len() as f64) * 0.95).ceil() as usize;
    let idx = idx.saturating_sub(1).min(values.len() - 1);
    values[idx]
}
