use bevy_ecs::prelude::*;
use rand::{SeedableRng, rngs::StdRng};

// ============================================================================
// Bevy Resources
// ============================================================================

// Tick counter, advanced once per fixed step
#[derive(Resource, Debug, Default)]
pub struct SimClock {
    pub tick: u64,
}

// Deterministic randomness for arena layout and bot input
#[derive(Resource)]
pub struct BotRng(pub StdRng);

impl BotRng {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

// Most recent encoded replication frame
#[derive(Resource, Debug, Default)]
pub struct LatestFrame {
    pub tick: u64,
    pub bytes: Vec<u8>,
    pub avatars: usize,
    pub grabs: usize,
}

// Running totals of presented effects
#[derive(Resource, Debug, Default)]
pub struct EffectStats {
    pub total: u64,
    pub cannot_pick_up: u64,
    pub grabs: u64,
    pub releases: u64,
}
