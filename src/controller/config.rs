//! Controller tuning and the slope thresholds derived from it.

use avian3d::prelude::*;
use thiserror::Error;

use crate::physics::{GameLayer, SurfaceClass, SurfaceClassifier};

/// Invalid tuning value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("{field} must be finite")]
    NotFinite { field: &'static str },
}

/// Locomotion tuning, set once at spawn and validated before use
#[derive(Debug, Clone, Copy)]
pub struct LocomotionConfig {
    /// Maximum horizontal speed in m/s
    pub max_speed: f32,
    /// Steering acceleration while grounded
    pub max_acceleration: f32,
    /// Steering acceleration while airborne (reduced control)
    pub max_air_acceleration: f32,
    /// Height reached by a jump from rest, in meters
    pub jump_height: f32,
    /// Extra jumps allowed while airborne
    pub max_air_jumps: u32,
    /// Steepest walkable ground, in degrees
    pub max_ground_angle: f32,
    /// Steepest walkable stairs, in degrees
    pub max_stairs_angle: f32,
    /// Snapping is skipped above this speed
    pub max_snap_speed: f32,
    /// Length of the downward snap probe
    pub probe_distance: f32,
    /// Layers the snap probe can hit
    pub probe_mask: LayerMask,
    /// Layers treated as stairs
    pub stairs_mask: LayerMask,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            max_speed: 10.0,
            max_acceleration: 10.0,
            max_air_acceleration: 1.0,
            jump_height: 2.0,
            max_air_jumps: 0,
            max_ground_angle: 25.0,
            max_stairs_angle: 50.0,
            max_snap_speed: 100.0,
            probe_distance: 1.0,
            probe_mask: [GameLayer::World, GameLayer::Stairs].into(),
            stairs_mask: GameLayer::Stairs.into(),
        }
    }
}

impl LocomotionConfig {
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    pub fn with_acceleration(mut self, ground: f32, air: f32) -> Self {
        self.max_acceleration = ground;
        self.max_air_acceleration = air;
        self
    }

    pub fn with_jump(mut self, height: f32, max_air_jumps: u32) -> Self {
        self.jump_height = height;
        self.max_air_jumps = max_air_jumps;
        self
    }

    pub fn with_slope_limits(mut self, ground_degrees: f32, stairs_degrees: f32) -> Self {
        self.max_ground_angle = ground_degrees;
        self.max_stairs_angle = stairs_degrees;
        self
    }

    pub fn with_snapping(mut self, max_snap_speed: f32, probe_distance: f32) -> Self {
        self.max_snap_speed = max_snap_speed;
        self.probe_distance = probe_distance;
        self
    }

    /// Rejects any value outside the supported tuning ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("max_speed", self.max_speed, 0.0, 100.0)?;
        check_range("max_acceleration", self.max_acceleration, 0.0, 100.0)?;
        check_range("max_air_acceleration", self.max_air_acceleration, 0.0, 100.0)?;
        check_range("jump_height", self.jump_height, 0.0, 10.0)?;
        check_range("max_air_jumps", self.max_air_jumps as f32, 0.0, 5.0)?;
        check_range("max_ground_angle", self.max_ground_angle, 0.0, 90.0)?;
        check_range("max_stairs_angle", self.max_stairs_angle, 0.0, 90.0)?;
        check_range("max_snap_speed", self.max_snap_speed, 0.0, 100.0)?;
        check_range("probe_distance", self.probe_distance, 0.0, f32::MAX)?;
        Ok(())
    }

    pub fn surface_classifier(&self) -> SurfaceClassifier {
        SurfaceClassifier::new(self.stairs_mask)
    }
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field });
    }
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Minimum up-components of a walkable surface normal, per surface class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopeThresholds {
    pub min_ground_dot: f32,
    pub min_stairs_dot: f32,
}

impl SlopeThresholds {
    pub fn from_config(config: &LocomotionConfig) -> Self {
        Self {
            min_ground_dot: config.max_ground_angle.to_radians().cos(),
            min_stairs_dot: config.max_stairs_angle.to_radians().cos(),
        }
    }

    #[inline]
    pub fn min_dot(&self, surface: SurfaceClass) -> f32 {
        match surface {
            SurfaceClass::Ground => self.min_ground_dot,
            SurfaceClass::Stairs => self.min_stairs_dot,
        }
    }
}
