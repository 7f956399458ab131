//! Example: Convert audio files to 48 kHz
//!
//! Usage:
//!   cargo run --release --example resample_file -- [options] <file1> <file2> ...
//!
//! Each `<name>.<ext>` is written next to the input as `<name>_out.wav`.
//!
//! Notes:
//! - Parallelism is across files. Each conversion is single-threaded and
//!   chunks within a file are always processed in order.
//! - Default workers: (available CPU threads - 1), keeping one core free for the system.

use rayon::prelude::*;
use std::env;
use std::path::PathBuf;
use std::time::Instant;
use stratum_resample::io::derive_output_path;
use stratum_resample::{resample_file, ProcessingMode, ResampleConfig, ResampleReport, SpectrumPolicy};

const USAGE: &str = "Usage: resample_file [options] <file1> <file2> ...\n\
     \n\
     --chunked[=MS]       Process in independent MS-millisecond chunks (default 20)\n\
     --policy gap|low-half  Spectrum resizing policy (default: gap)\n\
     --rate HZ            Output sample rate (default: 48000)\n\
     --config FILE        Load settings from a JSON file (flags override it)\n\
     --jobs N             Parallel workers (default: CPU-1)\n\
     --json               Emit one JSON object per line (JSONL)\n";

fn default_jobs() -> usize {
    let n = std::thread::available_parallelism().map(|v| v.get()).unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

fn take_value(args: &mut Vec<String>, flag: &str) -> Result<String, String> {
    if args.is_empty() {
        return Err(format!("{} requires a value", flag));
    }
    Ok(args.remove(0))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut json = false;
    let mut jobs: Option<usize> = None;
    let mut config_path: Option<String> = None;
    let mut mode: Option<ProcessingMode> = None;
    let mut policy: Option<SpectrumPolicy> = None;
    let mut rate: Option<u32> = None;
    let mut paths: Vec<PathBuf> = Vec::new();

    while !args.is_empty() {
        let a = args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--jobs" => {
                let v = take_value(&mut args, "--jobs")?.parse::<usize>()?;
                jobs = Some(std::cmp::max(1, v));
            }
            "--chunked" => mode = Some(ProcessingMode::Chunked { chunk_ms: 20 }),
            s if s.starts_with("--chunked=") => {
                let chunk_ms = s["--chunked=".len()..].parse::<u32>()?;
                mode = Some(ProcessingMode::Chunked { chunk_ms });
            }
            "--policy" => {
                policy = Some(match take_value(&mut args, "--policy")?.as_str() {
                    "gap" => SpectrumPolicy::GapInsertion,
                    "low-half" => SpectrumPolicy::LowHalfCopy,
                    other => {
                        eprintln!("ERROR: unknown policy '{}'\n\n{}", other, USAGE);
                        std::process::exit(2);
                    }
                });
            }
            "--rate" => rate = Some(take_value(&mut args, "--rate")?.parse::<u32>()?),
            "--config" => config_path = Some(take_value(&mut args, "--config")?),
            "--help" | "-h" => {
                eprintln!("{}", USAGE);
                return Ok(());
            }
            _ => paths.push(PathBuf::from(a)),
        }
    }

    if paths.is_empty() {
        eprintln!("ERROR: Provide at least one audio file path. Use --help for usage.");
        std::process::exit(2);
    }

    let mut config = match config_path {
        Some(path) => ResampleConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => ResampleConfig::default(),
    };
    if let Some(mode) = mode {
        config.mode = mode;
    }
    if let Some(policy) = policy {
        config.policy = policy;
    }
    if let Some(rate) = rate {
        config.target_rate = rate;
    }

    let jobs = jobs.unwrap_or_else(default_jobs);
    eprintln!(
        "FFT resampler: {} files -> {} Hz ({}, {}), jobs={}",
        paths.len(),
        config.target_rate,
        config.mode.name(),
        config.policy.name(),
        jobs
    );

    let t0 = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

    let outs: Vec<(PathBuf, Result<ResampleReport, String>)> = pool.install(|| {
        paths
            .par_iter()
            .map(|input| {
                let output = derive_output_path(input);
                let result = resample_file(input, &output, config.clone()).map_err(|e| e.to_string());
                (input.clone(), result)
            })
            .collect()
    });

    let mut failed = 0;
    for (idx, (input, result)) in outs.iter().enumerate() {
        match result {
            Ok(report) if json => println!("{}", serde_json::to_string(report)?),
            Ok(report) => {
                println!(
                    "[{}/{}] {} -> {}: {} -> {} samples",
                    idx + 1,
                    outs.len(),
                    input.display(),
                    report.output.display(),
                    report.metadata.input_samples,
                    report.metadata.output_samples
                );
                println!("time interval: {} ms", report.metadata.processing_time_ms as u64);
            }
            Err(e) => {
                failed += 1;
                if json {
                    println!(
                        "{{\"file\":{},\"error\":{}}}",
                        serde_json::to_string(&input.display().to_string())?,
                        serde_json::to_string(e)?
                    );
                } else {
                    println!("[{}/{}] {}: ERROR: {}", idx + 1, outs.len(), input.display(), e);
                }
            }
        }
    }

    eprintln!(
        "Done: ok={}/{} wall={:.0}ms",
        outs.len() - failed,
        outs.len(),
        t0.elapsed().as_secs_f64() * 1000.0
    );

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
