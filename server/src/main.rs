use anyhow::Result;
use clap::Parser;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::{info, warn};

use server::{
    build_app,
    config::{Args, SimConfig, init_tracing},
    resources::{EffectStats, LatestFrame},
};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_filter);

    let config = SimConfig::from(&args);
    anyhow::ensure!(config.tick_rate > 0, "tick rate must be positive");
    let ticks = config.ticks;
    let tick_duration = Duration::from_nanos(1_000_000_000 / u64::from(config.tick_rate));

    info!(
        "starting sandbox at {} Hz with {} bots and {} props (seed {})",
        config.tick_rate, config.bots, config.props, config.seed
    );
    let mut app = build_app(config);

    // Run the app in a loop manually at the configured rate
    let mut interval = time::interval(tick_duration);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut frame: u64 = 0;
    while ticks.is_none_or(|limit| frame < limit) {
        interval.tick().await;

        let update_start = Instant::now();
        app.update();
        let update_elapsed = update_start.elapsed();

        if update_elapsed > tick_duration {
            warn!(
                "tick {} took {:.2}ms (exceeded {:.2}ms budget)",
                frame,
                update_elapsed.as_secs_f64() * 1000.0,
                tick_duration.as_secs_f64() * 1000.0
            );
        }

        frame += 1;
    }

    let stats = app.world().resource::<EffectStats>();
    let latest = app.world().resource::<LatestFrame>();
    info!(
        "stopped after {frame} ticks: {} effects ({} grabs, {} releases, {} refused), last frame {} bytes",
        stats.total,
        stats.grabs,
        stats.releases,
        stats.cannot_pick_up,
        latest.bytes.len()
    );
    Ok(())
}
