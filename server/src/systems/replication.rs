use bevy_ecs::prelude::*;
use tracing::{trace, warn};

use crate::resources::{LatestFrame, SimClock};
use common::{GrabTool, LocomotionController, io::encode_frame, protocol::ReplicationFrame};

// ============================================================================
// Replication
// ============================================================================

// Snapshots every avatar and active grab after the physics step and encodes the frame.
pub fn replication_system(
    clock: Res<SimClock>,
    avatars: Query<(&LocomotionController, Option<&GrabTool>)>,
    mut latest: ResMut<LatestFrame>,
) {
    let mut frame = ReplicationFrame {
        tick: clock.tick,
        avatars: Vec::new(),
        grabs: Vec::new(),
    };
    for (controller, tool) in &avatars {
        frame.avatars.push(controller.pose());
        frame.grabs.extend(tool.and_then(GrabTool::snapshot));
    }

    match encode_frame(&frame) {
        Ok(bytes) => {
            trace!("tick {}: {} byte frame", clock.tick, bytes.len());
            *latest = LatestFrame {
                tick: clock.tick,
                bytes,
                avatars: frame.avatars.len(),
                grabs: frame.grabs.len(),
            };
        }
        Err(err) => warn!("tick {}: {err:#}", clock.tick),
    }
}
