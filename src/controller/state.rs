use bevy::prelude::*;

use super::config::{ConfigError, LocomotionConfig, SlopeThresholds};
use crate::physics::GroundProbe;

/// Body snapshot read from the physics engine at the start of a step
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyState {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// How the body became grounded this step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grounding {
    /// At least one walkable contact was reported
    Contact,
    /// Pulled back onto the ground by the downward probe
    Snapped,
    /// Several steep contacts combine into a walkable crevice
    SteepPromoted,
}

/// Surface a jump was launched from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Ground,
    Wall,
    Air,
}

/// Outcome of a single physics step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Velocity to write back to the body
    pub velocity: Vec3,
    pub grounding: Option<Grounding>,
    /// Grounded this step after at least one airborne step
    pub landed: bool,
    /// Airborne this step after a grounded one
    pub left_ground: bool,
    pub jump: Option<(JumpKind, f32)>,
}

/// Contact-driven locomotion state for a single rigid body.
///
/// Contacts are accumulated between physics steps and consumed by
/// [`LocomotionController::physics_tick`], which resolves the ground state,
/// steers toward the desired velocity, applies any requested jump and then
/// clears the contact accumulators.
#[derive(Component, Debug, Clone)]
pub struct LocomotionController {
    pub(crate) config: LocomotionConfig,
    pub(crate) thresholds: SlopeThresholds,

    pub(crate) velocity: Vec3,
    pub(crate) desired_velocity: Vec3,
    pub(crate) desired_jump: bool,

    /// Sum of walkable contact normals this step
    pub(crate) contact_normal: Vec3,
    /// Sum of steep contact normals this step
    pub(crate) steep_normal: Vec3,
    pub(crate) ground_contact_count: u32,
    pub(crate) steep_contact_count: u32,

    /// Jumps taken since last settling on the ground
    pub(crate) jump_phase: u32,
    pub(crate) steps_since_last_grounded: u32,
    pub(crate) steps_since_last_jump: u32,
}

impl LocomotionController {
    pub fn new(config: LocomotionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            thresholds: SlopeThresholds::from_config(&config),
            config,
            velocity: Vec3::ZERO,
            desired_velocity: Vec3::ZERO,
            desired_jump: false,
            contact_normal: Vec3::ZERO,
            steep_normal: Vec3::ZERO,
            ground_contact_count: 0,
            steep_contact_count: 0,
            jump_phase: 0,
            steps_since_last_grounded: 0,
            steps_since_last_jump: 0,
        })
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    pub fn thresholds(&self) -> SlopeThresholds {
        self.thresholds
    }

    /// Replaces the tuning. Invalid tuning is rejected and the current one kept.
    pub fn set_config(&mut self, config: LocomotionConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.thresholds = SlopeThresholds::from_config(&config);
        self.config = config;
        Ok(())
    }

    #[inline]
    pub fn on_ground(&self) -> bool {
        self.ground_contact_count > 0
    }

    #[inline]
    pub fn on_steep(&self) -> bool {
        self.steep_contact_count > 0
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn desired_velocity(&self) -> Vec3 {
        self.desired_velocity
    }

    pub fn jump_requested(&self) -> bool {
        self.desired_jump
    }

    pub fn contact_normal(&self) -> Vec3 {
        self.contact_normal
    }

    pub fn jump_phase(&self) -> u32 {
        self.jump_phase
    }

    pub fn steps_since_last_grounded(&self) -> u32 {
        self.steps_since_last_grounded
    }

    pub fn steps_since_last_jump(&self) -> u32 {
        self.steps_since_last_jump
    }

    /// Runs one fixed physics step in order: resolve ground state, steer,
    /// jump, then clear the per-step contact accumulators.
    pub fn physics_tick(
        &mut self,
        body: BodyState,
        gravity: Vec3,
        dt: f32,
        probe: &impl GroundProbe,
    ) -> StepReport {
        let was_grounded = self.steps_since_last_grounded == 0;
        let grounding = self.resolve_ground_state(body, probe);
        let landed = grounding.is_some() && !was_grounded;
        let left_ground = grounding.is_none() && was_grounded;

        self.steer_velocity(dt);

        let jump = if self.desired_jump {
            self.desired_jump = false;
            self.compose_jump(gravity)
        } else {
            None
        };

        let report = StepReport {
            velocity: self.velocity,
            grounding,
            landed,
            left_ground,
            jump,
        };
        self.clear_contacts();
        report
    }

    /// Zeroes the contact accumulators. Runs once per step after the
    /// velocity for that step has been computed.
    pub fn clear_contacts(&mut self) {
        self.ground_contact_count = 0;
        self.steep_contact_count = 0;
        self.contact_normal = Vec3::ZERO;
        self.steep_normal = Vec3::ZERO;
    }
}
