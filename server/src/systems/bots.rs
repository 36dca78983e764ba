use bevy_ecs::prelude::*;
use bevy_math::{Vec2, Vec3};
use bevy_time::Time;
use rand::Rng;

use crate::{
    components::{Bot, EquipRequest},
    constants::*,
    resources::BotRng,
};
use common::{Action, GrabToolKind, InputFrame};

// ============================================================================
// Bot Input
// ============================================================================

// Stand-in for the input transport: each bot wanders, looks around and mashes buttons.
pub fn bot_input_system(
    mut commands: Commands,
    time: Res<Time>,
    mut rng: ResMut<BotRng>,
    mut bots: Query<(Entity, &mut Bot, &mut InputFrame)>,
) {
    let dt = time.delta_secs();
    let rng = &mut rng.0;

    for (entity, mut bot, mut input) in &mut bots {
        let mut held = bot.held;
        for action in Action::ALL {
            if rng.random_bool(BOT_PRESS_PROBABILITY) {
                if held.contains(action) {
                    held.remove(action);
                } else {
                    held.insert(action);
                }
            }
        }

        let move_axes = if rng.random_bool(BOT_RETHINK_PROBABILITY) {
            Vec3::new(
                rng.random_range(-1.0..=1.0),
                rng.random_range(-1.0..=1.0),
                rng.random_range(-1.0..=1.0),
            )
        } else {
            input.move_axes
        };
        let look = Vec2::new(rng.random_range(-1.0..=1.0), rng.random_range(-0.5..=0.5)) * BOT_TURN_RATE * dt;
        let scroll = if rng.random_bool(BOT_PRESS_PROBABILITY) {
            if rng.random_bool(0.5) { 1.0 } else { -1.0 }
        } else {
            0.0
        };

        *input = input.next(held).with_move(move_axes).with_look(look).with_scroll(scroll);
        bot.held = held;

        if rng.random_bool(BOT_SWITCH_TOOL_PROBABILITY) {
            let kind = GrabToolKind::ALL[rng.random_range(0..GrabToolKind::ALL.len())];
            commands.entity(entity).insert(EquipRequest(kind));
        }
    }
}
