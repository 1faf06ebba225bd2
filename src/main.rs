// src/main.rs

use anyhow::{Context, Result};
use doorway_counter::announce::ConsoleAnnouncer;
use doorway_counter::pipeline::{CounterLoop, CounterMetrics};
use doorway_counter::prompt::{parse_initial_count, read_initial_count};
use doorway_counter::sensor::ReplaySource;
use doorway_counter::Config;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config_path =
        std::env::var("DOORWAY_COUNTER_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());
    let config = Config::load(&config_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    info!("🚪 Doorway counter starting");
    info!("✓ Configuration loaded from {}", config_path);

    let tendency = config.tendency_config();
    let accumulator = config.accumulator_config();
    info!(
        "Counting: extent={:.2}cm, dead_zone={:.1}cm, tendency_bound={:.2}, grace_frames={}",
        tendency.max_lateral_extent,
        tendency.ignored_length,
        tendency.tendency_lower_bound,
        accumulator.grace_frames
    );

    let initial_count = match std::env::var("DOORWAY_COUNTER_INITIAL") {
        Ok(raw) => parse_initial_count(&raw)
            .with_context(|| format!("DOORWAY_COUNTER_INITIAL={:?}", raw))?,
        Err(_) => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            read_initial_count(&mut stdin.lock(), &mut stdout.lock())?
        }
    };
    info!("Starting with {} people inside", initial_count);

    let mut source = ReplaySource::load(&config.sensor.replay_path)?;

    let shutdown = Arc::new(AtomicBool::new(false));
    let signal_flag = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping after the current scan");
            signal_flag.store(true, Ordering::SeqCst);
        }
    });

    let metrics = CounterMetrics::new();
    let mut counter = CounterLoop::new(accumulator, tendency, initial_count, metrics.clone());

    let loop_flag = shutdown.clone();
    let (reason, final_count) = tokio::task::spawn_blocking(move || {
        let mut announcer = ConsoleAnnouncer;
        let reason = counter.run(&mut source, &mut announcer, &loop_flag)?;
        Ok::<_, anyhow::Error>((reason, counter.count()))
    })
    .await
    .context("counting thread panicked")??;

    let summary = metrics.summary();
    info!("\n========================================");
    info!("Stopped: {:?}", reason);
    info!("  People inside: {}", final_count);
    info!("  Scans: {} ({} with a target)", summary.total_scans, summary.scans_with_target);
    info!(
        "  Bursts: {} sealed, {} dead-zone only, {} dropped",
        summary.bursts_sealed, summary.bursts_filtered_out, summary.bursts_discarded
    );
    info!(
        "  ➡️  Entries: {}  ⬅️  Exits: {}  ❔ At the door: {}",
        summary.entries, summary.exits, summary.ambiguous
    );
    info!("========================================");

    Ok(())
}
