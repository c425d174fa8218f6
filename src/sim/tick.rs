//! Fixed timestep simulation tick
//!
//! Translates player commands into session input and advances the game by
//! exactly one step.

use super::physics::PhysicsEngine;
use super::session::{SessionInput, SpawnRequest, TickReport};
use super::state::GameState;
use crate::settings::VehicleClass;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GameInput {
    /// Stick x in [-1, 1]; out of range values are clamped
    pub x: f32,
    /// Stick y in [-1, 1]; positive is forward/up
    pub y: f32,
    /// Launch a vehicle from the selected spawner (ignored while piloting)
    pub spawn: bool,
    /// Blow up the piloted vehicle and discard its recording
    pub self_destruct: bool,
    /// Cycle to the next discovered spawner (ignored while piloting)
    pub next_spawner: bool,
    /// Vehicle class for the next spawn; random when `None`
    pub class: Option<VehicleClass>,
}

impl GameInput {
    pub fn stick(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick<E: PhysicsEngine>(state: &mut GameState<E>, input: &GameInput) -> TickReport {
    let piloting = state.controller.is_recording();
    if input.next_spawner && !piloting {
        state.level.select_next_spawner();
    }

    let spawn = (input.spawn && !piloting).then(|| SpawnRequest {
        point: state.level.selected_spawn_point(),
        class: input.class,
    });
    let session_input = SessionInput {
        x: input.x,
        y: input.y,
        self_destruct: input.self_destruct,
        spawn,
    };

    let GameState {
        controller,
        level,
        clock,
        engine,
        ..
    } = state;
    controller.tick(engine, level, clock, &session_input)
}
