use bevy::prelude::*;

use super::state::{Grounding, JumpKind, StepReport};

/// Locomotion event messages emitted once per physics step.
///
/// Consumers subscribe with `MessageReader<LocomotionMessage>` to trigger
/// sound effects, particles, or other feedback.
#[derive(Message, Clone, Debug, PartialEq)]
pub enum LocomotionMessage {
    Jumped { body: Entity, kind: JumpKind, speed: f32 },
    Landed { body: Entity, impact_speed: f32 },
    SnappedToGround { body: Entity },
    LeftGround { body: Entity },
}

/// Translates a step report into messages. `previous_velocity` is the body
/// velocity read at the start of the step.
pub fn step_messages(
    body: Entity,
    report: &StepReport,
    previous_velocity: Vec3,
) -> Vec<LocomotionMessage> {
    let mut messages = Vec::new();

    if report.landed {
        let impact_speed = (-previous_velocity.y).max(0.0);
        debug!("{body} landed at {impact_speed:.2} m/s");
        messages.push(LocomotionMessage::Landed { body, impact_speed });
    }

    if report.grounding == Some(Grounding::Snapped) {
        messages.push(LocomotionMessage::SnappedToGround { body });
    }

    if report.left_ground {
        messages.push(LocomotionMessage::LeftGround { body });
    }

    if let Some((kind, speed)) = report.jump {
        messages.push(LocomotionMessage::Jumped { body, kind, speed });
    }

    messages
}

pub fn emit_step_messages(
    body: Entity,
    report: &StepReport,
    previous_velocity: Vec3,
    writer: &mut MessageWriter<LocomotionMessage>,
) {
    for message in step_messages(body, report, previous_velocity) {
        writer.write(message);
    }
}
