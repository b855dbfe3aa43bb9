//! # tsim-runner
//!
//! Drives the tick simulator end to end: generator → stream → feature
//! worker → risk, until Ctrl+C, a time limit, or a tick limit.
//!
//! # Usage
//!
//! ```bash
//! tsim-runner config.json --log-level info
//! tsim-runner --ticks-per-second 50000 --duration-sec 10 --seed 42
//! tsim-runner --benchmark --duration-sec 5
//! ```
//!
//! Without a config file the built-in defaults apply. Command-line values
//! override the file.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tsim_core::config::AppConfig;
use tsim_core::latency::LatencyCollector;
use tsim_core::types::PerformanceStats;
use tsim_md::pipeline::FeatureSink;
use tsim_md::{MarketDataProcessor, StopHandle, SymbolHistory, TickGenerator};

/// Benchmark length when no duration is configured.
const DEFAULT_BENCHMARK_SECS: u64 = 5;

/// Synthetic market data simulator.
#[derive(Parser)]
#[command(name = "tsim-runner", about = "Synthetic tick generator and feature pipeline")]
struct Cli {
    /// Configuration file path (JSON).
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Optional log directory for file output.
    #[arg(long)]
    log_dir: Option<String>,

    /// Stop after this many seconds.
    #[arg(long)]
    duration_sec: Option<u64>,

    /// Target generation rate.
    #[arg(long)]
    ticks_per_second: Option<u32>,

    /// Fixed RNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Print every tick with its features and risk as JSON lines.
    #[arg(long)]
    print_ticks: bool,

    /// Run the unpaced generate + process benchmark instead of the stream.
    #[arg(long)]
    benchmark: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load configuration and apply overrides
    let mut config = match &cli.config {
        Some(path) => tsim_core::config::load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(tps) = cli.ticks_per_second {
        config.generator.ticks_per_second = tps;
    }
    if let Some(seed) = cli.seed {
        config.generator.seed = Some(seed);
    }
    if let Some(secs) = cli.duration_sec {
        config.stream.duration_sec = Some(secs);
    }

    // 2. Initialize logging
    let module_name = config.module_name("tsim-runner");
    let log_dir = cli.log_dir.clone().or_else(|| config.log_path());
    tsim_core::logging::init_logging(&cli.log_level, log_dir.as_deref(), &module_name);

    info!(
        "{module_name} starting: config={}, tps={}, mode={}",
        cli.config.as_ref().map_or("<defaults>".into(), |p| p.display().to_string()),
        config.generator.ticks_per_second,
        if cli.benchmark { "benchmark".to_string() } else { config.stream.mode.to_string() },
    );

    // 3. Run
    if cli.benchmark {
        tokio::task::spawn_blocking(move || run_benchmark(&config)).await?
    } else {
        run_stream(config, cli.print_ticks).await
    }
}

/// Producer and feature worker on blocking tasks, joined by a bounded channel.
async fn run_stream(config: AppConfig, print_ticks: bool) -> Result<()> {
    let (tx, rx) = crossbeam_channel::bounded(config.stream.channel_capacity);
    let stop = StopHandle::default();
    let processor = Arc::new(MarketDataProcessor::new());

    let consumer = {
        let processor = Arc::clone(&processor);
        let cfg = config.processor.clone();
        let sink = print_ticks.then(json_sink);
        tokio::task::spawn_blocking(move || tsim_md::run_feature_loop("features", rx, processor, &cfg, sink))
    };

    let mut producer = {
        let gen_cfg = config.generator.clone();
        let mode = config.stream.mode;
        let max_ticks = config.stream.max_ticks;
        let stop = stop.clone();
        tokio::task::spawn_blocking(move || -> PerformanceStats {
            tsim_core::cpu_affinity::maybe_bind(gen_cfg.cpu_affinity);
            let mut generator = TickGenerator::from_config(&gen_cfg);
            let mut stream = generator.create_stream(mode).with_stop_handle(stop);
            while let Some(tick) = stream.next_tick() {
                if tx.send(tick).is_err() {
                    warn!("feature worker gone, stopping producer");
                    stream.stop();
                }
                if max_ticks.is_some_and(|max| stream.emitted() >= max) {
                    info!("max_ticks reached");
                    stream.stop();
                }
            }
            drop(stream);
            generator.performance_stats()
        })
    };

    info!("stream running, press Ctrl+C to stop");

    let gen_stats = tokio::select! {
        res = &mut producer => res?,
        _ = shutdown_signal(config.stream.duration_sec) => {
            stop.stop();
            producer.await?
        }
    };
    let summary = consumer.await?;

    info!("generator: {gen_stats}");
    info!("processor: {}", processor.processor_stats());
    info!("features: {} ticks, {} risk breaches", summary.ticks, summary.risk_breaches);
    if let Some(lat) = summary.latency {
        info!("feature latency: {lat}");
    }
    info!("stream finished, goodbye");
    Ok(())
}

/// Resolves on Ctrl+C or after `duration_sec`, whichever comes first.
async fn shutdown_signal(duration_sec: Option<u64>) {
    let timer = async {
        match duration_sec {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => std::future::pending().await,
        }
    };
    tokio::select! {
        _ = tokio::signal::ctrl_c() => info!("shutdown signal received"),
        _ = timer => info!("duration elapsed"),
    }
}

fn json_sink() -> FeatureSink {
    Box::new(|tick, features, risk| {
        let line = serde_json::json!({ "tick": tick, "features": features, "risk": risk });
        println!("{line}");
    })
}

/// Unpaced generate → features → risk loop.
fn run_benchmark(config: &AppConfig) -> Result<()> {
    tsim_core::cpu_affinity::maybe_bind(config.generator.cpu_affinity);
    let mut generator = TickGenerator::from_config(&config.generator);
    let processor = MarketDataProcessor::new();
    let mut history = SymbolHistory::new(config.processor.history_len);
    let mut latency = LatencyCollector::new();

    let duration = Duration::from_secs(config.stream.duration_sec.unwrap_or(DEFAULT_BENCHMARK_SECS));
    let max_ticks = config.stream.max_ticks.unwrap_or(u64::MAX);
    let mut breaches = 0u64;
    let mut last_tick = None;

    info!("benchmark: {}s, max_ticks={max_ticks}", duration.as_secs());
    let start = Instant::now();
    let mut ticks = 0u64;
    while ticks < max_ticks && start.elapsed() < duration {
        let t0 = Instant::now();
        let tick = generator.generate_tick()?;
        let features = processor.process_tick(&tick, history.view(tick.symbol_id));
        let risk = MarketDataProcessor::calculate_risk_metrics(&features, config.processor.position_size);
        latency.record(t0.elapsed().as_nanos() as u64);

        history.push(tick);
        if risk.risk_limit_exceeded {
            breaches += 1;
        }
        last_tick = Some(tick);
        ticks += 1;
    }
    let elapsed = start.elapsed().as_secs_f64();

    let achieved = if elapsed > 0.0 { ticks as f64 / elapsed } else { 0.0 };
    info!(
        "benchmark done: {ticks} ticks in {elapsed:.3}s, {achieved:.0} ticks/s achieved vs {} target",
        config.generator.ticks_per_second
    );
    info!("generator: {}", generator.performance_stats());
    info!("processor: {}", processor.processor_stats());
    info!("risk breaches: {breaches}");
    if let Some(lat) = latency.stats() {
        info!("generate+process latency: {lat}");
    }
    if let Some(tick) = last_tick {
        info!("last tick: {tick}");
        info!("book: {}", generator.generate_depth(&tick));
    }
    Ok(())
}
