pub mod acquire;
pub mod damper;
pub mod session;
pub mod tool;

pub use acquire::AcquireError;
pub use damper::CriticalDamper;
pub use session::GrabSession;
pub use tool::{GrabTool, ToolProfile};

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

/// The closed set of grab tools an avatar can equip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum GrabToolKind {
    /// Soft power-suspend: set-down, throw, no freezing.
    Suspend,
    /// Stiff long-range lock that can freeze bodies in place.
    RigidLock,
    /// Short-range pick up and carry.
    HandCarry,
}

impl GrabToolKind {
    pub const ALL: [Self; 3] = [Self::Suspend, Self::RigidLock, Self::HandCarry];
}

/// Why a grab session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseReason {
    Dropped,
    Thrown,
    Frozen,
    DistanceExceeded,
    TargetInvalid,
    OwnershipLost,
    Unequipped,
}

impl ReleaseReason {
    // Releases the holder did not ask for; these always produce a cue.
    #[must_use]
    pub const fn is_forced(self) -> bool {
        matches!(
            self,
            Self::DistanceExceeded | Self::TargetInvalid | Self::OwnershipLost | Self::Unequipped
        )
    }
}
