mod config;
mod contact;
mod grounding;
pub mod input;
mod jump;
mod messages;
mod movement;
mod plugin;
mod state;

pub use config::*;
pub use contact::accumulate_contacts;
pub use input::{InputSpace, JumpPressed, MoveInput};
pub use jump::jump_speed;
pub use messages::*;
pub use movement::{run_physics_tick, update_desired_velocity};
pub use plugin::*;
pub use state::{BodyState, Grounding, JumpKind, LocomotionController, StepReport};
