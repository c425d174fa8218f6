//! Physics engine seam
//!
//! The simulation never integrates rigid bodies itself. It pushes forces,
//! torques and teleports into a `PhysicsEngine` and reads poses and speeds
//! back once per fixed tick. `KinematicWorld` is a small deterministic
//! implementation used by the native driver and the tests; collision
//! detection is not part of it, contacts are injected by the caller.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque identity of a body inside the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

/// Pose and velocities of a body, in engine units (distance per tick)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BodyState {
    pub pos: Vec2,
    pub rotation: f32,
    pub vel: Vec2,
    pub angular_vel: f32,
}

impl BodyState {
    pub fn at(pos: Vec2, rotation: f32) -> Self {
        Self {
            pos,
            rotation,
            ..Default::default()
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    #[inline]
    pub fn angular_speed(&self) -> f32 {
        self.angular_vel.abs()
    }
}

/// A collision-start notification between two bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: BodyHandle,
    pub b: BodyHandle,
}


/// Capabilities the simulation needs from a rigid-body engine.
///
/// Calls are synchronous and must not re-enter the simulation.
pub trait PhysicsEngine {
    fn spawn_body(&mut self, pos: Vec2, rotation: f32) -> BodyHandle;
    /// Immovable terrain/obstacle body
    fn spawn_static_body(&mut self, pos: Vec2) -> BodyHandle;
    fn remove_body(&mut self, body: BodyHandle);
    fn body_state(&self, body: BodyHandle) -> Option<BodyState>;
    fn apply_force(&mut self, body: BodyHandle, force: Vec2);
    fn apply_torque(&mut self, body: BodyHandle, torque: f32);
    /// Move a body and zero its linear and angular velocity
    fn teleport(&mut self, body: BodyHandle, pos: Vec2, rotation: f32);
    fn set_fixed_rotation(&mut self, body: BodyHandle, fixed: bool);
    /// Advance every dynamic body by one fixed step
    fn step(&mut self, dt: f32);
    /// Collision-start pairs reported since the last drain
    fn drain_contacts(&mut self) -> Vec<Contact>;
}

#[derive(Debug, Clone)]
struct KinematicBody {
    state: BodyState,
    force: Vec2,
    torque: f32,
    fixed_rotation: bool,
    is_static: bool,
}

/// Deterministic point-mass world (unit mass and inertia).
///
/// Velocities are in units per reference tick; `step` scales by
/// `dt / base_dt` so a step at the reference rate is exactly one tick.
#[derive(Debug, Clone)]
pub struct KinematicWorld {
    bodies: BTreeMap<BodyHandle, KinematicBody>,
    contacts: Vec<Contact>,
    air_friction: f32,
    base_dt: f32,
    next_id: u32,
}

impl KinematicWorld {
    pub fn new(base_dt: f32, air_friction: f32) -> Self {
        Self {
            bodies: BTreeMap::new(),
            contacts: Vec::new(),
            air_friction: air_friction.clamp(0.0, 1.0),
            base_dt,
            next_id: 1,
        }
    }

    /// Queue a collision-start pair, as a collision detector would
    pub fn push_contact(&mut self, a: BodyHandle, b: BodyHandle) {
        self.contacts.push(Contact { a, b });
    }

    /// Overwrite a body's velocities (test/scripting helper)
    pub fn set_velocity(&mut self, body: BodyHandle, vel: Vec2, angular_vel: f32) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.state.vel = vel;
            b.state.angular_vel = angular_vel;
        }
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn insert(&mut self, state: BodyState, is_static: bool) -> BodyHandle {
        let handle = BodyHandle(self.next_id);
        self.next_id += 1;
        self.bodies.insert(
            handle,
            KinematicBody {
                state,
                force: Vec2::ZERO,
                torque: 0.0,
                fixed_rotation: is_static,
                is_static,
            },
        );
        handle
    }
}

impl PhysicsEngine for KinematicWorld {
    fn spawn_body(&mut self, pos: Vec2, rotation: f32) -> BodyHandle {
        self.insert(BodyState::at(pos, rotation), false)
    }

    fn spawn_static_body(&mut self, pos: Vec2) -> BodyHandle {
        self.insert(BodyState::at(pos, 0.0), true)
    }

    fn remove_body(&mut self, body: BodyHandle) {
        self.bodies.remove(&body);
    }

    fn body_state(&self, body: BodyHandle) -> Option<BodyState> {
        self.bodies.get(&body).map(|b| b.state)
    }

    fn apply_force(&mut self, body: BodyHandle, force: Vec2) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.force += force;
        }
    }

    fn apply_torque(&mut self, body: BodyHandle, torque: f32) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.torque += torque;
        }
    }

    fn teleport(&mut self, body: BodyHandle, pos: Vec2, rotation: f32) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.state = BodyState::at(pos, rotation);
        }
    }

    fn set_fixed_rotation(&mut self, body: BodyHandle, fixed: bool) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.fixed_rotation = fixed;
            if fixed {
                b.state.angular_vel = 0.0;
            }
        }
    }

    fn step(&mut self, dt: f32) {
        let scale = dt / self.base_dt;
        let keep = 1.0 - self.air_friction;

        for body in self.bodies.values_mut() {
            let force = std::mem::take(&mut body.force);
            let torque = std::mem::take(&mut body.torque);
            if body.is_static {
                continue;
            }

            let state = &mut body.state;
            state.vel = state.vel * keep + force * scale;
            state.pos += state.vel * scale;

            if !body.fixed_rotation {
                state.angular_vel = state.angular_vel * keep + torque * scale;
                state.rotation += state.angular_vel * scale;
            }
        }
    }

    fn drain_contacts(&mut self) -> Vec<Contact> {
        std::mem::take(&mut self.contacts)
    }
}
