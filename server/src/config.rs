use bevy_ecs::prelude::*;
use clap::Parser;

use crate::constants::{DEFAULT_BOTS, DEFAULT_PROPS, DEFAULT_TICK_RATE};

// ============================================================================
// CLI Argument Parsing
// ============================================================================

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless sandbox simulation host", long_about = None)]
pub struct Args {
    /// Fixed simulation rate in Hz
    #[arg(long, default_value_t = DEFAULT_TICK_RATE)]
    pub tick_rate: u16,

    /// Number of random-input avatars to simulate
    #[arg(long, default_value_t = DEFAULT_BOTS)]
    pub bots: usize,

    /// Number of loose props scattered over the floor
    #[arg(long, default_value_t = DEFAULT_PROPS)]
    pub props: usize,

    /// Stop after this many ticks instead of running forever
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Seed for prop placement and bot input
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_filter: String,

    /// Grant noclip to every bot
    #[arg(long, default_value_t = false)]
    pub admin: bool,
}

// ============================================================================
// Simulation Config
// ============================================================================

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub tick_rate: u16,
    pub bots: usize,
    pub props: usize,
    pub ticks: Option<u64>,
    pub seed: u64,
    pub admin: bool,
}

impl SimConfig {
    // Fixed step in seconds.
    #[must_use]
    pub fn dt(&self) -> f32 {
        1.0 / f32::from(self.tick_rate.max(1))
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
            bots: DEFAULT_BOTS,
            props: DEFAULT_PROPS,
            ticks: None,
            seed: 0,
            admin: false,
        }
    }
}

impl From<&Args> for SimConfig {
    fn from(args: &Args) -> Self {
        Self {
            tick_rate: args.tick_rate,
            bots: args.bots,
            props: args.props,
            ticks: args.ticks,
            seed: args.seed,
            admin: args.admin,
        }
    }
}

// ============================================================================
// Logging
// ============================================================================

pub fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
