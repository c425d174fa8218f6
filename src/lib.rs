//! Rocket Loop - a rocket logistics game built on temporal loops
//!
//! Core modules:
//! - `sim`: Deterministic simulation (vehicles, landing, loop recording/replay)
//! - `level`: Islands, goods and landing interactions
//! - `settings`: Data-driven tuning
//! - `error`: Crate error type

pub mod error;
pub mod level;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use level::{Good, Island, IslandKind, Level};
pub use settings::{Settings, VehicleClass, VehicleTuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Target simulation rate (ticks per second)
    pub const TARGET_TICK_RATE: u32 = 60;
    /// Length of one loop cycle in seconds
    pub const CYCLE_SECONDS: u32 = 30;
    /// Upper bound on ticks per cycle (an hour at the default rate)
    pub const MAX_CYCLE_STEPS: u32 = 60 * 60 * 60;

    /// Max distance between foot and landing line that still counts as "over" it
    pub const LANDING_TOLERANCE: f32 = 2.0;

    /// Below these speeds a vehicle counts as stationary (engine units per tick)
    pub const STATIONARY_LINEAR_EPS: f32 = 0.02;
    pub const STATIONARY_ANGULAR_EPS: f32 = 0.02;

    /// Spin is weighted this much heavier than linear speed on terrain impact
    pub const CRASH_SPIN_WEIGHT: f32 = 15.0;

    /// Reference world air friction (fraction of velocity lost per tick)
    pub const AIR_FRICTION: f32 = 0.02;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Rotate a body-local vector into world space
#[inline]
pub fn rotate(local: Vec2, rotation: f32) -> Vec2 {
    Vec2::from_angle(rotation).rotate(local)
}

/// Unit "nose" direction of a body with the given rotation.
///
/// Rotation 0 points up the screen (negative y).
#[inline]
pub fn heading(rotation: f32) -> Vec2 {
    let angle = rotation - std::f32::consts::FRAC_PI_2;
    Vec2::new(angle.cos(), angle.sin())
}
