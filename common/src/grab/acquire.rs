use thiserror::Error;
use tracing::debug;

use super::{
    session::{GrabSession, Grip},
    tool::ToolProfile,
};
use crate::{
    context::SimContext,
    events::EffectEvent,
    locomotion::ViewPoint,
    physics::{BodyId, BodyType, Ray, RayFilter},
    protocol::ParticipantId,
    replication::{GRABBED_TAG, MAP_TAG},
};

/// Why an acquisition attempt did not produce a session.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AcquireError {
    #[error("nothing within reach")]
    NothingHit,
    #[error("{0:?} is map geometry")]
    MapGeometry(BodyId),
    #[error("ray started inside {0:?}")]
    StartedInSolid(BodyId),
    #[error("{0:?} is already held")]
    AlreadyGrabbed(BodyId),
    #[error("{0:?} is not dynamic")]
    NotDynamic(BodyId),
    #[error("ownership of {0:?} went to another participant")]
    OwnershipDenied(BodyId),
    #[error("pickup is cooling down")]
    Cooldown,
}

/// Ray-cast from the holder's eye and take hold of whatever dynamic body it strikes.
///
/// Ownership is claimed before anything is tagged or converted, so a lost race
/// leaves no trace behind.
pub fn acquire(
    holder: ParticipantId,
    view: &ViewPoint,
    profile: &ToolProfile,
    ctx: &mut SimContext,
) -> Result<GrabSession, AcquireError> {
    let ray = Ray {
        origin: view.origin,
        direction: view.forward(),
        max_distance: profile.range,
    };
    let hit = ctx
        .physics
        .raycast(&ray, &RayFilter::default())
        .ok_or(AcquireError::NothingHit)?;
    if hit.start_solid {
        return Err(AcquireError::StartedInSolid(hit.body));
    }

    let root = ctx.physics.root_of(hit.body).ok_or(AcquireError::NothingHit)?;
    if ctx.net.has_tag(root, MAP_TAG) || ctx.net.has_tag(hit.body, MAP_TAG) {
        return Err(AcquireError::MapGeometry(hit.body));
    }
    if ctx.net.has_tag(root, GRABBED_TAG) {
        return Err(AcquireError::AlreadyGrabbed(hit.body));
    }

    let is_static = ctx.physics.body_type(hit.body) != Some(BodyType::Dynamic);
    if is_static && !profile.converts_static {
        return Err(AcquireError::NotDynamic(hit.body));
    }

    let pose = ctx.physics.pose(hit.body).ok_or(AcquireError::NothingHit)?;
    let sub_body = ctx
        .physics
        .hierarchy(root)
        .iter()
        .position(|member| *member == hit.body)
        .and_then(|index| u32::try_from(index).ok())
        .unwrap_or(0);

    if !ctx.net.take_ownership(root, holder) {
        return Err(AcquireError::OwnershipDenied(root));
    }
    ctx.net.add_tag(root, GRABBED_TAG);
    if is_static {
        ctx.physics.set_body_type(hit.body, BodyType::Dynamic);
    }

    let grip = Grip {
        target: hit.body,
        root,
        sub_body,
        local_offset: pose.to_local(hit.point),
        hold_distance: hit.distance.clamp(profile.min_hold, profile.max_hold),
    };
    let session = GrabSession::begin(holder, grip, pose, view, profile, ctx);

    ctx.effects.push(EffectEvent::Grabbed { holder, body: hit.body });
    debug!(
        "{holder:?} grabbed {:?} (root {root:?}, sub {sub_body}) at {:.1}",
        hit.body, hit.distance
    );
    Ok(session)
}
