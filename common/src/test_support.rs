use bevy_math::Vec3;

use crate::{
    context::SimContext,
    events::EffectQueue,
    locomotion::ViewPoint,
    math::LookAngles,
    physics::BodyId,
    replication::{MAP_TAG, Replication},
    sandbox::{AdminList, BodyDesc, NetState, PhysicsScene},
};

pub const DT: f32 = 1.0 / 66.0;

/// In-memory world with a clock, for driving core operations tick by tick.
pub struct TestWorld {
    pub scene: PhysicsScene,
    pub net: NetState,
    pub effects: EffectQueue,
    pub admins: AdminList,
    pub floor: BodyId,
    pub now: f32,
}

impl TestWorld {
    // Large static floor whose top face is y = 0, tagged as map geometry.
    pub fn with_floor() -> Self {
        let mut scene = PhysicsScene::default();
        let floor = scene.spawn(BodyDesc::fixed(Vec3::new(0.0, -10.0, 0.0), Vec3::new(5000.0, 10.0, 5000.0)));
        let mut net = NetState::default();
        net.add_tag(floor, MAP_TAG);

        Self {
            scene,
            net,
            effects: EffectQueue::default(),
            admins: AdminList::default(),
            floor,
            now: 0.0,
        }
    }

    pub fn advance(&mut self) {
        self.now += DT;
    }

    pub fn ctx(&mut self) -> SimContext<'_> {
        SimContext::new(&mut self.scene, &mut self.net, &mut self.effects, &self.admins, DT, self.now)
    }
}

pub fn view_from(origin: Vec3, angles: LookAngles) -> ViewPoint {
    ViewPoint {
        origin,
        rotation: angles.rotation(),
        yaw_rotation: angles.yaw_rotation(),
    }
}
