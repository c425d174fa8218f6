//! Player-pilotable vehicles
//!
//! A vehicle wraps one physics body. It turns stick input into forces and
//! torques according to its control scheme, tracks the readings the landing
//! and crash logic need, and can be teleported onto a recorded trajectory.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::landing::LandingState;
use super::physics::{BodyHandle, BodyState, PhysicsEngine};
use crate::level::Good;
use crate::settings::{VehicleClass, VehicleTuning};
use crate::{heading, rotate};

/// Stable identity of a vehicle for the lifetime of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VehicleId(pub u32);

/// How stick input maps to forces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlScheme {
    /// x spins the body, y thrusts along the nose
    Rotational,
    /// (x, y) is a world-space direction, independent of heading
    Directional,
}

/// What the presentation layer should animate this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationCue {
    #[default]
    Idle,
    Forward,
    Backward,
    Thrust,
}

impl AnimationCue {
    pub fn from_input(scheme: ControlScheme, input: Vec2) -> Self {
        match scheme {
            ControlScheme::Rotational if input.y > 0.0 => AnimationCue::Forward,
            ControlScheme::Rotational if input.y < 0.0 => AnimationCue::Backward,
            ControlScheme::Rotational => AnimationCue::Idle,
            ControlScheme::Directional if input == Vec2::ZERO => AnimationCue::Idle,
            ControlScheme::Directional => AnimationCue::Thrust,
        }
    }
}

/// Outcome of driving a vehicle for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    Alive,
    Destroyed,
}

/// Clamp a stick axis to [-1, 1]; NaN reads as centered
#[inline]
pub fn clamp_axis(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

#[derive(Debug, Clone)]
pub struct Vehicle {
    id: VehicleId,
    body: BodyHandle,
    class: VehicleClass,
    tuning: VehicleTuning,
    /// Pose and velocities as of the last sync with the engine
    state: BodyState,
    /// Speeds sampled when input was last applied (used for crash severity)
    impact_speed: f32,
    impact_spin: f32,
    last_input: Vec2,
    cue: AnimationCue,
    cargo: Option<Good>,
    landing: LandingState,
    destroyed: bool,
}

impl Vehicle {
    /// Create a vehicle whose foot rests exactly on `spawn_point`
    pub fn spawn(
        engine: &mut dyn PhysicsEngine,
        id: VehicleId,
        class: VehicleClass,
        tuning: VehicleTuning,
        spawn_point: Vec2,
    ) -> Self {
        let center = spawn_point - tuning.foot_offset;
        let body = engine.spawn_body(center, 0.0);
        if tuning.fixed_rotation {
            engine.set_fixed_rotation(body, true);
        }
        let state = engine
            .body_state(body)
            .unwrap_or_else(|| BodyState::at(center, 0.0));

        log::debug!(
            "Spawned {} vehicle {:?} at ({}, {})",
            class.as_str(),
            id,
            spawn_point.x,
            spawn_point.y
        );

        Self {
            id,
            body,
            class,
            tuning,
            state,
            impact_speed: 0.0,
            impact_spin: 0.0,
            last_input: Vec2::ZERO,
            cue: AnimationCue::Idle,
            cargo: None,
            landing: LandingState::default(),
            destroyed: false,
        }
    }

    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn body(&self) -> BodyHandle {
        self.body
    }

    pub fn class(&self) -> VehicleClass {
        self.class
    }

    pub fn tuning(&self) -> &VehicleTuning {
        &self.tuning
    }

    pub fn control_scheme(&self) -> ControlScheme {
        self.class.control_scheme()
    }

    pub fn position(&self) -> Vec2 {
        self.state.pos
    }

    pub fn rotation(&self) -> f32 {
        self.state.rotation
    }

    pub fn body_state(&self) -> &BodyState {
        &self.state
    }

    pub fn cue(&self) -> AnimationCue {
        self.cue
    }

    pub fn cargo(&self) -> Option<Good> {
        self.cargo
    }

    pub fn last_input(&self) -> Vec2 {
        self.last_input
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn landing(&self) -> &LandingState {
        &self.landing
    }

    pub fn landing_mut(&mut self) -> &mut LandingState {
        &mut self.landing
    }

    /// World-space ground contact point
    pub fn foot_position(&self) -> Vec2 {
        self.state.pos + rotate(self.tuning.foot_offset, self.state.rotation)
    }

    /// Both linear and angular speed are below the class epsilons
    pub fn is_stationary(&self) -> bool {
        self.state.speed() < self.tuning.stationary_linear_eps
            && self.state.angular_speed() < self.tuning.stationary_angular_eps
    }

    /// No net stick input on the last applied tick
    pub fn is_idle(&self) -> bool {
        self.last_input == Vec2::ZERO
    }

    /// Apply one tick of stick input.
    ///
    /// Axes are clamped to [-1, 1]. Self-destruct explodes the vehicle
    /// instead of applying any force.
    pub fn apply_input(
        &mut self,
        engine: &mut dyn PhysicsEngine,
        x: f32,
        y: f32,
        self_destruct: bool,
    ) -> TickResult {
        if self.destroyed {
            return TickResult::Destroyed;
        }
        if self_destruct {
            self.explode(engine);
            return TickResult::Destroyed;
        }

        let input = Vec2::new(clamp_axis(x), clamp_axis(y));
        match self.control_scheme() {
            ControlScheme::Rotational => self.apply_rotational(engine, input),
            ControlScheme::Directional => self.apply_directional(engine, input),
        }

        self.last_input = input;
        self.cue = AnimationCue::from_input(self.control_scheme(), input);
        self.landing.set_idle(self.is_idle());
        self.impact_speed = self.state.speed();
        self.impact_spin = self.state.angular_speed();
        TickResult::Alive
    }

    fn apply_rotational(&mut self, engine: &mut dyn PhysicsEngine, input: Vec2) {
        let torque = input.x * self.tuning.max_torque;
        let max_accel = if input.y > 0.0 {
            self.tuning.max_forward_accel
        } else {
            self.tuning.max_backward_accel
        };
        let accel = input.y * max_accel;

        if accel != 0.0 {
            engine.apply_force(self.body, heading(self.state.rotation) * accel);
        }
        if torque != 0.0 {
            engine.apply_torque(self.body, torque);
        }
    }

    fn apply_directional(&mut self, engine: &mut dyn PhysicsEngine, input: Vec2) {
        // Stick up is screen up (negative y)
        let direction = Vec2::new(input.x, -input.y);
        let magnitude = direction.length().clamp(0.0, 1.0);
        if magnitude == 0.0 {
            return;
        }
        let force = direction.normalize() * magnitude * self.tuning.max_forward_accel;
        engine.apply_force(self.body, force);
    }

    /// Refresh the cached pose and velocities after the engine stepped
    pub fn sync(&mut self, engine: &dyn PhysicsEngine) {
        if self.destroyed {
            return;
        }
        if let Some(state) = engine.body_state(self.body) {
            self.state = state;
        }
        let stationary = self.is_stationary();
        self.landing.set_stationary(stationary);
    }

    /// Teleport so the foot sits on `foot` with the given rotation
    pub fn snap_foot(&mut self, engine: &mut dyn PhysicsEngine, foot: Vec2, rotation: f32) {
        let center = foot - rotate(self.tuning.foot_offset, rotation);
        self.set_position_and_rotation(engine, center, rotation);
    }

    /// Teleport the body center, zeroing linear and angular velocity
    pub fn set_position_and_rotation(
        &mut self,
        engine: &mut dyn PhysicsEngine,
        pos: Vec2,
        rotation: f32,
    ) {
        if self.destroyed {
            return;
        }
        engine.teleport(self.body, pos, rotation);
        self.state = BodyState::at(pos, rotation);
        self.impact_speed = 0.0;
        self.impact_spin = 0.0;
        self.landing.set_stationary(true);
    }

    /// Replay a recorded input purely as an animation cue (no forces)
    pub fn play_cue(&mut self, input: Vec2) {
        self.cue = AnimationCue::from_input(self.control_scheme(), input);
    }

    /// Destroy the vehicle and detach its body.
    ///
    /// Returns true only on the call that actually destroyed it.
    pub fn explode(&mut self, engine: &mut dyn PhysicsEngine) -> bool {
        if self.destroyed {
            return false;
        }
        self.destroyed = true;
        self.cargo = None;
        engine.remove_body(self.body);
        log::info!(
            "Vehicle {:?} exploded at ({:.1}, {:.1})",
            self.id,
            self.state.pos.x,
            self.state.pos.y
        );
        true
    }

    /// Weighted impact speed: spin counts much more than drift
    pub fn impact_severity(&self) -> f32 {
        crate::consts::CRASH_SPIN_WEIGHT * self.impact_spin + self.impact_speed
    }

    /// Whether a bump into terrain at the current readings is survivable
    pub fn survives_terrain_impact(&self) -> bool {
        self.impact_severity() <= self.tuning.crash_threshold
    }

    /// Load a good; fails if the cargo slot is occupied
    pub fn try_store_good(&mut self, good: Good) -> bool {
        if self.cargo.is_some() {
            return false;
        }
        self.cargo = Some(good);
        true
    }

    /// Unload a good; fails unless carrying exactly that good
    pub fn try_take_good(&mut self, good: Good) -> bool {
        if self.cargo != Some(good) {
            return false;
        }
        self.cargo = None;
        true
    }

    #[cfg(test)]
    pub(crate) fn set_impact_readings(&mut self, speed: f32, spin: f32) {
        self.impact_speed = speed;
        self.impact_spin = spin;
    }
}
