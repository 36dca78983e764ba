//! In-memory implementations of the physics and replication facades.
//!
//! Used by the headless host and as test doubles. Bodies are oriented boxes,
//! hull sweeps use their world-space bounds.

pub mod net;
pub mod scene;
pub mod shapes;

pub use net::{AdminList, NetState};
pub use scene::{BodyDesc, PhysicsScene};
