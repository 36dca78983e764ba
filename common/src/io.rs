use anyhow::{Context, Result};

use crate::protocol::ReplicationFrame;

// ============================================================================
// Replication Frame Codec
// ============================================================================

// Upper bound on an encoded frame accepted from the transport.
pub const MAX_FRAME_BYTES: usize = 1024 * 1024;

#[cfg(feature = "json")]
pub fn encode_frame(frame: &ReplicationFrame) -> Result<Vec<u8>> {
    serde_json::to_vec(frame).context("Failed to encode replication frame")
}

#[cfg(feature = "json")]
pub fn decode_frame(data: &[u8]) -> Result<ReplicationFrame> {
    anyhow::ensure!(data.len() <= MAX_FRAME_BYTES, "Replication frame of {} bytes exceeds limit", data.len());
    serde_json::from_slice(data).context("Failed to decode replication frame")
}

#[cfg(all(feature = "bincode", not(feature = "json")))]
pub fn encode_frame(frame: &ReplicationFrame) -> Result<Vec<u8>> {
    bincode::encode_to_vec(frame, bincode::config::standard()).context("Failed to encode replication frame")
}

#[cfg(all(feature = "bincode", not(feature = "json")))]
pub fn decode_frame(data: &[u8]) -> Result<ReplicationFrame> {
    anyhow::ensure!(data.len() <= MAX_FRAME_BYTES, "Replication frame of {} bytes exceeds limit", data.len());
    let (frame, _) = bincode::decode_from_slice(data, bincode::config::standard())
        .context("Failed to decode replication frame")?;
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        math::LookAngles,
        physics::BodyId,
        protocol::{AvatarPose, GrabState, ParticipantId},
    };
    use bevy_math::{Quat, Vec3};

    #[test]
    fn frame_survives_the_codec() {
        let frame = ReplicationFrame {
            tick: 42,
            avatars: vec![AvatarPose {
                id: ParticipantId(3),
                position: Vec3::new(1.0, 2.0, 3.0).into(),
                rotation: Quat::from_rotation_y(0.5).into(),
                velocity: Vec3::X.into(),
                look: LookAngles::new(30.0, -10.0),
                grounded: true,
                noclip: false,
                crouch_level: 0.25,
                eye_height: 55.0,
            }],
            grabs: vec![GrabState {
                holder: ParticipantId(3),
                target: BodyId(9),
                sub_body: 1,
                desired_position: Vec3::new(0.0, 64.0, -200.0).into(),
                desired_rotation: Quat::IDENTITY.into(),
                hold_distance: 200.0,
            }],
        };

        let bytes = encode_frame(&frame).expect("encode");
        assert_eq!(decode_frame(&bytes).expect("decode"), frame);
    }

    #[test]
    fn truncated_frame_is_rejected() {
        let frame = ReplicationFrame {
            tick: 1,
            avatars: Vec::new(),
            grabs: Vec::new(),
        };
        let bytes = encode_frame(&frame).expect("encode");
        assert!(decode_frame(&bytes[..bytes.len() - 1]).is_err());
    }
}
