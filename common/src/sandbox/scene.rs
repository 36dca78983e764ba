use bevy_ecs::prelude::*;
use bevy_math::{Quat, Vec3};
use std::collections::BTreeMap;

use super::shapes::{boxes_overlap, rotated_half_extents, sweep_segment_vs_box};
use crate::{
    constants::{GRAVITY, PHYSICS_EPSILON},
    physics::{BodyId, BodyType, Hull, HullTrace, PhysicsWorld, Pose, Ray, RayFilter, RayHit},
};

// Distance kept between a swept hull and the surface it stopped against.
const HULL_SKIN: f32 = 0.01;

// ============================================================================
// Scene Bodies
// ============================================================================

/// Box-shaped body description used when spawning into the scene.
#[derive(Debug, Clone, Copy)]
pub struct BodyDesc {
    pub pose: Pose,
    pub half_extents: Vec3,
    pub body_type: BodyType,
    pub trigger: bool,
}

impl BodyDesc {
    #[must_use]
    pub const fn dynamic(position: Vec3, half_extents: Vec3) -> Self {
        Self {
            pose: Pose::new(position, Quat::IDENTITY),
            half_extents,
            body_type: BodyType::Dynamic,
            trigger: false,
        }
    }

    #[must_use]
    pub const fn fixed(position: Vec3, half_extents: Vec3) -> Self {
        Self {
            pose: Pose::new(position, Quat::IDENTITY),
            half_extents,
            body_type: BodyType::Static,
            trigger: false,
        }
    }

    #[must_use]
    pub const fn trigger(mut self) -> Self {
        self.trigger = true;
        self
    }

    #[must_use]
    pub const fn rotated(mut self, rotation: Quat) -> Self {
        self.pose.rotation = rotation;
        self
    }
}

#[derive(Debug, Clone)]
struct SceneBody {
    pose: Pose,
    half_extents: Vec3,
    velocity: Vec3,
    angular_velocity: Vec3,
    body_type: BodyType,
    trigger: bool,
    parent: Option<BodyId>,
}

impl SceneBody {
    fn world_half_extents(&self) -> Vec3 {
        rotated_half_extents(self.pose.rotation, self.half_extents)
    }
}

// ============================================================================
// Physics Scene
// ============================================================================

/// In-memory rigid-body world: oriented boxes, articulated hierarchies, simple integration.
#[derive(Resource, Debug, Default)]
pub struct PhysicsScene {
    bodies: BTreeMap<BodyId, SceneBody>,
    next_id: u32,
}

impl PhysicsScene {
    pub fn spawn(&mut self, desc: BodyDesc) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.insert(
            id,
            SceneBody {
                pose: desc.pose,
                half_extents: desc.half_extents,
                velocity: Vec3::ZERO,
                angular_velocity: Vec3::ZERO,
                body_type: desc.body_type,
                trigger: desc.trigger,
                parent: None,
            },
        );
        id
    }

    // Spawns `desc` as an articulated sub-body of `parent`.
    pub fn spawn_child(&mut self, parent: BodyId, desc: BodyDesc) -> BodyId {
        let id = self.spawn(desc);
        self.set_parent(id, Some(parent));
        id
    }

    pub fn despawn(&mut self, body: BodyId) {
        self.bodies.remove(&body);
        for other in self.bodies.values_mut() {
            if other.parent == Some(body) {
                other.parent = None;
            }
        }
    }

    // Re-parents `body`; `None` detaches it into its own hierarchy.
    pub fn set_parent(&mut self, body: BodyId, parent: Option<BodyId>) {
        if let Some(entry) = self.bodies.get_mut(&body) {
            entry.parent = parent;
        }
    }

    pub fn set_pose(&mut self, body: BodyId, pose: Pose) {
        if let Some(entry) = self.bodies.get_mut(&body) {
            entry.pose = pose;
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Integrates dynamic bodies by `dt` and rests them on top of static geometry.
    pub fn step(&mut self, dt: f32) {
        let statics: Vec<(Vec3, Vec3)> = self
            .bodies
            .values()
            .filter(|b| b.body_type == BodyType::Static && !b.trigger)
            .map(|b| (b.pose.position, b.world_half_extents()))
            .collect();

        for body in self.bodies.values_mut().filter(|b| b.body_type == BodyType::Dynamic) {
            body.velocity.y -= GRAVITY * dt;
            body.pose.position += body.velocity * dt;
            if body.angular_velocity.length_squared() > PHYSICS_EPSILON {
                body.pose.rotation = (Quat::from_scaled_axis(body.angular_velocity * dt) * body.pose.rotation).normalize();
            }

            let half = body.world_half_extents();
            for (center, static_half) in &statics {
                if !boxes_overlap(body.pose.position, half, *center, *static_half) {
                    continue;
                }
                // only resolve landings; side contacts are left to the caller's velocities
                let top = center.y + static_half.y;
                if body.pose.position.y > center.y {
                    body.pose.position.y = top + half.y;
                    body.velocity.y = body.velocity.y.max(0.0);
                }
            }
        }
    }

    fn entry(&self, body: BodyId) -> Option<&SceneBody> {
        self.bodies.get(&body)
    }

    fn entry_mut(&mut self, body: BodyId) -> Option<&mut SceneBody> {
        self.bodies.get_mut(&body)
    }
}

impl PhysicsWorld for PhysicsScene {
    fn raycast(&self, ray: &Ray, filter: &RayFilter) -> Option<RayHit> {
        let segment = ray.direction.normalize_or_zero() * ray.max_distance;
        if segment == Vec3::ZERO {
            return None;
        }

        let mut best: Option<RayHit> = None;
        for (id, body) in &self.bodies {
            if (body.trigger && !filter.include_triggers) || filter.ignore.contains(id) {
                continue;
            }
            let local_origin = body.pose.to_local(ray.origin);
            let local_dir = body.pose.rotation.inverse() * segment;
            let Some(collision) = sweep_segment_vs_box(local_origin, local_dir, body.half_extents) else {
                continue;
            };
            let distance = collision.t * ray.max_distance;
            if best.is_some_and(|hit| hit.distance <= distance) {
                continue;
            }
            best = Some(RayHit {
                body: *id,
                point: ray.origin + segment * collision.t,
                normal: body.pose.rotation * collision.normal,
                distance,
                start_solid: collision.inside,
            });
        }
        best
    }

    fn trace_hull(&self, hull: Hull, from: Vec3, to: Vec3) -> HullTrace {
        let half = hull.half_extents();
        let start = hull.center(from);
        let delta = to - from;

        let mut trace = HullTrace::clear(to);
        for (id, body) in &self.bodies {
            if body.trigger {
                continue;
            }
            let combined = half + body.world_half_extents();
            let Some(collision) = sweep_segment_vs_box(start - body.pose.position, delta, combined) else {
                continue;
            };
            if collision.inside {
                // let the hull escape whatever it is stuck in
                trace.start_solid = true;
                continue;
            }
            if collision.t < trace.fraction {
                trace.fraction = collision.t;
                trace.normal = collision.normal;
                trace.hit = Some(*id);
            }
        }

        if trace.hit.is_some() {
            trace.end = from + delta * trace.fraction + trace.normal * HULL_SKIN;
        }
        trace
    }

    fn pose(&self, body: BodyId) -> Option<Pose> {
        self.entry(body).map(|b| b.pose)
    }

    fn velocity(&self, body: BodyId) -> Option<Vec3> {
        self.entry(body).map(|b| b.velocity)
    }

    fn set_velocity(&mut self, body: BodyId, velocity: Vec3) {
        if let Some(entry) = self.entry_mut(body) {
            entry.velocity = velocity;
        }
    }

    fn angular_velocity(&self, body: BodyId) -> Option<Vec3> {
        self.entry(body).map(|b| b.angular_velocity)
    }

    fn set_angular_velocity(&mut self, body: BodyId, angular_velocity: Vec3) {
        if let Some(entry) = self.entry_mut(body) {
            entry.angular_velocity = angular_velocity;
        }
    }

    fn body_type(&self, body: BodyId) -> Option<BodyType> {
        self.entry(body).map(|b| b.body_type)
    }

    fn set_body_type(&mut self, body: BodyId, body_type: BodyType) {
        if let Some(entry) = self.entry_mut(body) {
            entry.body_type = body_type;
            if body_type == BodyType::Static {
                entry.velocity = Vec3::ZERO;
                entry.angular_velocity = Vec3::ZERO;
            }
        }
    }

    fn root_of(&self, body: BodyId) -> Option<BodyId> {
        let mut current = body;
        let mut entry = self.entry(current)?;
        // bounded walk guards against accidental parent cycles
        for _ in 0..self.bodies.len() {
            let Some(parent) = entry.parent else {
                return Some(current);
            };
            current = parent;
            entry = self.entry(current)?;
        }
        Some(current)
    }

    fn hierarchy(&self, root: BodyId) -> Vec<BodyId> {
        if !self.bodies.contains_key(&root) {
            return Vec::new();
        }
        let mut members = vec![root];
        members.extend(
            self.bodies
                .keys()
                .copied()
                .filter(|id| *id != root && self.root_of(*id) == Some(root)),
        );
        members
    }

    fn closest_point(&self, body: BodyId, point: Vec3) -> Option<Vec3> {
        let entry = self.entry(body)?;
        let local = entry.pose.to_local(point).clamp(-entry.half_extents, entry.half_extents);
        Some(entry.pose.to_world(local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_with_floor() -> (PhysicsScene, BodyId) {
        let mut scene = PhysicsScene::default();
        let floor = scene.spawn(BodyDesc::fixed(Vec3::new(0.0, -10.0, 0.0), Vec3::new(1000.0, 10.0, 1000.0)));
        (scene, floor)
    }

    #[test]
    fn raycast_returns_nearest_solid_and_skips_triggers() {
        let (mut scene, _) = scene_with_floor();
        let near = scene.spawn(BodyDesc::dynamic(Vec3::new(0.0, 50.0, -100.0), Vec3::splat(10.0)));
        scene.spawn(BodyDesc::dynamic(Vec3::new(0.0, 50.0, -50.0), Vec3::splat(10.0)).trigger());
        scene.spawn(BodyDesc::dynamic(Vec3::new(0.0, 50.0, -300.0), Vec3::splat(10.0)));

        let ray = Ray {
            origin: Vec3::new(0.0, 50.0, 0.0),
            direction: Vec3::NEG_Z,
            max_distance: 1000.0,
        };
        let hit = scene.raycast(&ray, &RayFilter::default()).expect("hit");
        assert_eq!(hit.body, near);
        assert!((hit.distance - 90.0).abs() < 1e-3);
        assert_eq!(hit.normal, Vec3::Z);

        let ignoring = scene.raycast(&ray, &RayFilter {
            ignore: vec![near],
            ..RayFilter::default()
        }).expect("hit");
        assert_ne!(ignoring.body, near);
    }

    #[test]
    fn hull_stops_against_wall_and_slides_on_floor() {
        let (mut scene, _) = scene_with_floor();
        scene.spawn(BodyDesc::fixed(Vec3::new(100.0, 50.0, 0.0), Vec3::new(10.0, 50.0, 100.0)));
        let hull = Hull::new(16.0, 64.0);

        let along_floor = scene.trace_hull(hull, Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 50.0));
        assert!(along_floor.hit.is_none());

        let into_wall = scene.trace_hull(hull, Vec3::new(0.0, 0.0, 0.0), Vec3::new(200.0, 0.0, 0.0));
        assert!(into_wall.hit.is_some());
        assert!(into_wall.end.x < 100.0 - 10.0 - 16.0 + 0.1);
        assert_eq!(into_wall.normal, Vec3::NEG_X);
    }

    #[test]
    fn hierarchy_lists_root_first() {
        let mut scene = PhysicsScene::default();
        let root = scene.spawn(BodyDesc::dynamic(Vec3::ZERO, Vec3::ONE));
        let arm = scene.spawn_child(root, BodyDesc::dynamic(Vec3::X * 3.0, Vec3::ONE));
        let hand = scene.spawn_child(arm, BodyDesc::dynamic(Vec3::X * 6.0, Vec3::ONE));

        assert_eq!(scene.root_of(hand), Some(root));
        assert_eq!(scene.hierarchy(root), vec![root, arm, hand]);
    }

    #[test]
    fn dynamic_body_falls_and_rests_on_floor() {
        let (mut scene, _) = scene_with_floor();
        let crate_body = scene.spawn(BodyDesc::dynamic(Vec3::new(0.0, 100.0, 0.0), Vec3::splat(10.0)));
        for _ in 0..200 {
            scene.step(1.0 / 66.0);
        }
        let pose = scene.pose(crate_body).expect("body");
        assert!((pose.position.y - 10.0).abs() < 1e-3);
    }

    #[test]
    fn closest_point_clamps_to_bounds() {
        let mut scene = PhysicsScene::default();
        let body = scene.spawn(BodyDesc::fixed(Vec3::ZERO, Vec3::splat(10.0)));
        let point = scene.closest_point(body, Vec3::new(50.0, 5.0, 0.0)).expect("body");
        assert!((point - Vec3::new(10.0, 5.0, 0.0)).length() < 1e-5);
    }
}
