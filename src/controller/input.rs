use bevy::ecs::observer::On;
use bevy::prelude::{Component, Deref, DerefMut, Entity, EntityEvent, Query, Vec2};
use bevy_enhanced_input::prelude::*;

/// Roll in a direction (WASD / left stick)
#[derive(Debug, InputAction)]
#[action_output(Vec2)]
pub struct MoveAction;

/// Jump action
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct JumpAction;

/// Stores the current movement input vector
#[derive(Component, Default, Deref, DerefMut)]
pub struct MoveInput(pub Vec2);

/// Stores whether jump was pressed since the last input tick
#[derive(Component, Default)]
pub struct JumpPressed(pub bool);

/// Entity whose orientation turns raw input axes into world directions,
/// typically the camera. Only its horizontal heading is used.
///
/// Bodies without one use world axes: +X for the horizontal axis and Bevy's
/// forward (-Z) for the vertical axis.
#[derive(Component, Clone, Copy, Debug)]
pub struct InputSpace(pub Entity);

/// System to handle move input via observer
pub fn handle_move_input(trigger: On<Fire<MoveAction>>, mut query: Query<&mut MoveInput>) {
    if let Ok(mut move_input) = query.get_mut(trigger.event_target()) {
        move_input.0 = trigger.value;
    }
}

/// Clear move input when all movement keys are released
pub fn handle_move_end(trigger: On<Complete<MoveAction>>, mut query: Query<&mut MoveInput>) {
    if let Ok(mut move_input) = query.get_mut(trigger.event_target()) {
        move_input.0 = Vec2::ZERO;
    }
}

/// Handle jump press. The flag stays set until the next input tick reads it.
pub fn handle_jump_start(trigger: On<Start<JumpAction>>, mut query: Query<&mut JumpPressed>) {
    if let Ok(mut jump) = query.get_mut(trigger.event_target()) {
        jump.0 = true;
    }
}
