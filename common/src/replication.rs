use crate::{physics::BodyId, protocol::ParticipantId};

// ============================================================================
// Tags
// ============================================================================

// Replicated mutual-exclusion marker set on a hierarchy root while it is held.
pub const GRABBED_TAG: &str = "grabbed";
// World/map geometry; never grabbable.
pub const MAP_TAG: &str = "map";

// ============================================================================
// Replication Facade
// ============================================================================

/// Field replication and ownership transfer provided by the network transport.
pub trait Replication {
    // Claims authority over the hierarchy rooted at `root`. Returns false when another
    // participant's claim reached the authority first.
    fn take_ownership(&mut self, root: BodyId, participant: ParticipantId) -> bool;

    // Returns the hierarchy to default (host) ownership.
    fn drop_ownership(&mut self, root: BodyId);

    fn owner(&self, root: BodyId) -> Option<ParticipantId>;

    fn add_tag(&mut self, root: BodyId, tag: &'static str);
    fn remove_tag(&mut self, root: BodyId, tag: &'static str);
    fn has_tag(&self, root: BodyId, tag: &str) -> bool;
}

/// Authorization checks for privileged locomotion modes.
pub trait Permissions {
    fn can_noclip(&self, participant: ParticipantId) -> bool;
}
