//! Game tuning and configuration
//!
//! Loaded from JSON; every field falls back to its default so partial files work.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::sim::ControlScheme;

/// Vehicle classes available at a spawner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum VehicleClass {
    /// Classic rocket: rotate, then thrust along the nose (or reverse at half power)
    #[default]
    Reversible,
    /// Omni-directional drone with fixed rotation
    Omni,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 2] = [VehicleClass::Reversible, VehicleClass::Omni];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleClass::Reversible => "Reversible",
            VehicleClass::Omni => "Omni",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "reversible" | "rocket" => Some(VehicleClass::Reversible),
            "omni" | "drone" => Some(VehicleClass::Omni),
            _ => None,
        }
    }

    /// How this class interprets stick input
    pub fn control_scheme(&self) -> ControlScheme {
        match self {
            VehicleClass::Reversible => ControlScheme::Rotational,
            VehicleClass::Omni => ControlScheme::Directional,
        }
    }

    /// Factory tuning for this class
    pub fn default_tuning(&self) -> VehicleTuning {
        match self {
            VehicleClass::Reversible => VehicleTuning {
                max_torque: 0.004,
                max_forward_accel: 0.14,
                max_backward_accel: 0.07,
                foot_offset: Vec2::new(0.0, 16.0),
                crash_threshold: 1.5,
                stationary_linear_eps: STATIONARY_LINEAR_EPS,
                stationary_angular_eps: STATIONARY_ANGULAR_EPS,
                fixed_rotation: false,
            },
            VehicleClass::Omni => VehicleTuning {
                max_torque: 0.0,
                max_forward_accel: 0.14,
                max_backward_accel: 0.07,
                foot_offset: Vec2::new(0.0, 12.0),
                crash_threshold: 0.8,
                stationary_linear_eps: STATIONARY_LINEAR_EPS,
                stationary_angular_eps: STATIONARY_ANGULAR_EPS,
                fixed_rotation: true,
            },
        }
    }
}

/// Per-class handling and survivability numbers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleTuning {
    /// Torque at full sideways stick (rotational scheme only)
    pub max_torque: f32,
    /// Thrust at full forward stick
    pub max_forward_accel: f32,
    /// Thrust at full reverse stick
    pub max_backward_accel: f32,
    /// Body center to ground contact point, in body space
    pub foot_offset: Vec2,
    /// Terrain impacts above `15 * spin + speed` of this explode the vehicle
    pub crash_threshold: f32,
    pub stationary_linear_eps: f32,
    pub stationary_angular_eps: f32,
    /// Body never rotates (torque is ignored)
    pub fixed_rotation: bool,
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed simulation rate (ticks per second)
    pub target_tick_rate: u32,
    /// Length of one recorded loop
    pub cycle_seconds: u32,
    /// Foot-to-landing-line distance that still counts as over the strip
    pub landing_tolerance: f32,
    /// Air friction for the reference kinematic world
    pub air_friction: f32,
    /// Seed for picking a vehicle class when a spawn doesn't name one
    pub seed: u64,
    pub reversible: VehicleTuning,
    pub omni: VehicleTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_tick_rate: TARGET_TICK_RATE,
            cycle_seconds: CYCLE_SECONDS,
            landing_tolerance: LANDING_TOLERANCE,
            air_friction: AIR_FRICTION,
            seed: 0x5EED,
            reversible: VehicleClass::Reversible.default_tuning(),
            omni: VehicleClass::Omni.default_tuning(),
        }
    }
}

impl Settings {
    /// Number of ticks in one loop cycle; `validate` bounds it by `MAX_CYCLE_STEPS`
    pub fn cycle_steps(&self) -> u32 {
        self.target_tick_rate.saturating_mul(self.cycle_seconds)
    }

    /// Fixed timestep in seconds
    pub fn dt(&self) -> f32 {
        1.0 / self.target_tick_rate as f32
    }

    pub fn tuning(&self, class: VehicleClass) -> &VehicleTuning {
        match class {
            VehicleClass::Reversible => &self.reversible,
            VehicleClass::Omni => &self.omni,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_tick_rate == 0 {
            return Err(Error::InvalidSettings("target_tick_rate must be positive"));
        }
        if self.cycle_seconds == 0 {
            return Err(Error::InvalidSettings("cycle_seconds must be positive"));
        }
        match self.target_tick_rate.checked_mul(self.cycle_seconds) {
            Some(steps) if steps <= MAX_CYCLE_STEPS => {}
            _ => return Err(Error::InvalidSettings("cycle too long")),
        }
        if self.landing_tolerance.is_nan() || self.landing_tolerance <= 0.0 {
            return Err(Error::InvalidSettings("landing_tolerance must be positive"));
        }
        if !(0.0..=1.0).contains(&self.air_friction) {
            return Err(Error::InvalidSettings("air_friction must be within 0..=1"));
        }
        for class in VehicleClass::ALL {
            let tuning = self.tuning(class);
            if tuning.max_backward_accel > tuning.max_forward_accel * 0.5 {
                return Err(Error::InvalidSettings(
                    "max_backward_accel must be at most half of max_forward_accel",
                ));
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!(
            "Loaded settings from {} ({} ticks per cycle)",
            path.display(),
            settings.cycle_steps()
        );
        Ok(settings)
    }
}
