#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Crouch State Machine
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum CrouchState {
    #[default]
    Standing,
    Crouched,
}

/// Inputs for one crouch update.
#[derive(Debug, Clone, Copy)]
pub struct CrouchRequest {
    pub wants_crouch: bool,
    pub grounded: bool,
    // Seconds since the avatar last touched the ground, zero while grounded.
    pub airborne_for: f32,
    pub noclip: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrouchTransition {
    // Capsule shrinks; `airborne` means it shrinks from the bottom.
    Crouch { airborne: bool },
    // Capsule grows back; `airborne` means it grows from the bottom.
    Stand { airborne: bool },
}

/// Decides crouch transitions. The head probe is only consulted when standing up
/// could actually be blocked.
#[must_use]
pub fn next_crouch_transition(
    state: CrouchState,
    request: CrouchRequest,
    stand_grace: f32,
    head_blocked: impl FnOnce() -> bool,
) -> Option<CrouchTransition> {
    let airborne = !request.grounded && !request.noclip;
    match state {
        CrouchState::Standing if request.wants_crouch && !request.noclip => Some(CrouchTransition::Crouch { airborne }),
        CrouchState::Crouched if request.noclip => Some(CrouchTransition::Stand { airborne: false }),
        CrouchState::Crouched if !request.wants_crouch => {
            let grace_elapsed = airborne && request.airborne_for >= stand_grace;
            (grace_elapsed || !head_blocked()).then_some(CrouchTransition::Stand { airborne })
        }
        _ => None,
    }
}
