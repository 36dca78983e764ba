use crate::{
    events::EffectQueue,
    physics::PhysicsWorld,
    replication::{Permissions, Replication},
};

// ============================================================================
// Simulation Context
// ============================================================================

/// Collaborators and timing for one fixed simulation tick.
///
/// Built by the host for each tick and handed to every core operation instead of
/// letting components look up world singletons.
pub struct SimContext<'a> {
    pub physics: &'a mut dyn PhysicsWorld,
    pub net: &'a mut dyn Replication,
    pub effects: &'a mut EffectQueue,
    pub permissions: &'a dyn Permissions,
    // Fixed step in seconds.
    pub dt: f32,
    // Simulation clock in seconds.
    pub now: f32,
}

impl<'a> SimContext<'a> {
    pub fn new(
        physics: &'a mut dyn PhysicsWorld,
        net: &'a mut dyn Replication,
        effects: &'a mut EffectQueue,
        permissions: &'a dyn Permissions,
        dt: f32,
        now: f32,
    ) -> Self {
        Self {
            physics,
            net,
            effects,
            permissions,
            dt,
            now,
        }
    }
}
