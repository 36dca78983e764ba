use bevy_app::App;
use bevy_ecs::prelude::*;
use bevy_math::{Vec2, Vec3};

use common::{
    Action, ActionSet, GrabTool, GrabToolKind, InputFrame, LocomotionController, LocomotionTuning,
    io::decode_frame,
    math::LookAngles,
    physics::BodyId,
    protocol::ParticipantId,
    replication::{GRABBED_TAG, Replication},
    sandbox::{AdminList, BodyDesc, NetState, PhysicsScene},
};
use server::{
    build_app,
    components::{EquipRequest, Leaving},
    config::SimConfig,
    resources::{EffectStats, LatestFrame, SimClock},
};

const HOLDER: ParticipantId = ParticipantId(9);

fn empty_arena() -> App {
    build_app(SimConfig {
        bots: 0,
        props: 0,
        ..SimConfig::default()
    })
}

// Avatar with Primary held down and a crate floating right in front of its eyes.
fn spawn_holder(app: &mut App, kind: GrabToolKind) -> (Entity, BodyId) {
    let controller = LocomotionController::new(HOLDER, Vec3::ZERO, LocomotionTuning::default());
    let view = controller.view();
    let prop = app
        .world_mut()
        .resource_mut::<PhysicsScene>()
        .spawn(BodyDesc::dynamic(view.origin + view.forward() * 60.0, Vec3::splat(10.0)));

    let input = InputFrame::from_held(ActionSet::EMPTY, ActionSet::of(&[Action::Primary]));
    let entity = app
        .world_mut()
        .spawn((HOLDER, controller, input, GrabTool::new(HOLDER, kind)))
        .id();
    (entity, prop)
}

fn is_holding(app: &App, entity: Entity) -> bool {
    app.world().get::<GrabTool>(entity).is_some_and(GrabTool::is_holding)
}

#[test]
fn bots_run_and_every_tick_is_replicated() {
    let mut app = build_app(SimConfig {
        bots: 4,
        props: 12,
        seed: 7,
        ..SimConfig::default()
    });

    for _ in 0..200 {
        app.update();
    }

    assert_eq!(app.world().resource::<SimClock>().tick, 200);
    let latest = app.world().resource::<LatestFrame>();
    assert_eq!(latest.tick, 200);
    assert_eq!(latest.avatars, 4);

    let frame = decode_frame(&latest.bytes).expect("frame decodes");
    assert_eq!(frame.tick, 200);
    assert_eq!(frame.avatars.len(), 4);
    assert_eq!(frame.grabs.len(), latest.grabs);
}

#[test]
fn admin_flag_grants_noclip_to_bots() {
    let mut app = build_app(SimConfig {
        bots: 2,
        props: 0,
        admin: true,
        ..SimConfig::default()
    });
    app.update();

    let admins = app.world().resource::<AdminList>();
    assert!(admins.0.contains(&ParticipantId(1)));
    assert!(admins.0.contains(&ParticipantId(2)));
}

#[test]
fn leaving_releases_the_held_body() {
    let mut app = empty_arena();
    let (entity, prop) = spawn_holder(&mut app, GrabToolKind::RigidLock);

    app.update();
    assert!(is_holding(&app, entity));
    assert_eq!(app.world().resource::<NetState>().owner(prop), Some(HOLDER));
    assert!(app.world().resource::<NetState>().has_tag(prop, GRABBED_TAG));

    app.update();
    app.world_mut().entity_mut(entity).insert(Leaving);
    app.update();

    assert!(app.world().get_entity(entity).is_err());
    let net = app.world().resource::<NetState>();
    assert_eq!(net.owner(prop), None);
    assert!(!net.has_tag(prop, GRABBED_TAG));

    let stats = app.world().resource::<EffectStats>();
    assert_eq!(stats.grabs, 1);
    assert_eq!(stats.releases, 1);
    assert_eq!(app.world().resource::<LatestFrame>().avatars, 0);
}

#[test]
fn switching_tools_forces_a_release() {
    let mut app = empty_arena();
    let (entity, prop) = spawn_holder(&mut app, GrabToolKind::RigidLock);

    app.update();
    assert!(is_holding(&app, entity));

    app.world_mut().entity_mut(entity).insert(EquipRequest(GrabToolKind::Suspend));
    app.update();

    let tool = app.world().get::<GrabTool>(entity).expect("tool stays equipped");
    assert_eq!(tool.kind(), GrabToolKind::Suspend);
    assert!(!tool.is_holding());
    assert!(app.world().get::<EquipRequest>(entity).is_none());
    assert_eq!(app.world().resource::<NetState>().owner(prop), None);
    assert_eq!(app.world().resource::<EffectStats>().releases, 1);
}

#[test]
fn equipping_the_same_tool_keeps_the_grab() {
    let mut app = empty_arena();
    let (entity, prop) = spawn_holder(&mut app, GrabToolKind::RigidLock);

    app.update();
    app.world_mut().entity_mut(entity).insert(EquipRequest(GrabToolKind::RigidLock));
    app.update();

    assert!(is_holding(&app, entity));
    assert_eq!(app.world().resource::<NetState>().owner(prop), Some(HOLDER));
}

#[test]
fn rotating_a_held_body_freezes_the_view_until_released() {
    let mut app = empty_arena();
    let (entity, _) = spawn_holder(&mut app, GrabToolKind::RigidLock);
    app.update();
    assert!(is_holding(&app, entity));

    let look = Vec2::new(30.0, 0.0);
    let set_input = |app: &mut App, held: &[Action]| {
        let mut input = app.world_mut().get_mut::<InputFrame>(entity).expect("avatar has input");
        *input = input.next(ActionSet::of(held)).with_look(look);
    };
    let angles = |app: &App| app.world().get::<LocomotionController>(entity).expect("avatar").angles();

    set_input(&mut app, &[Action::Primary, Action::Rotate]);
    app.update();
    assert_eq!(angles(&app), LookAngles::default());
    assert!(is_holding(&app, entity));

    set_input(&mut app, &[Action::Primary]);
    app.update();
    assert!((angles(&app).yaw - 30.0).abs() < 1e-3);
    assert!(is_holding(&app, entity));
}
