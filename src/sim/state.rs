//! Game state and presentation snapshots
//!
//! `GameState` owns everything one game needs: configuration, the level,
//! the session controller, the clock and the physics engine. Presentation
//! reads it through `Hud` and `VehicleView` only.

use glam::Vec2;
use serde::Serialize;

use super::landing::LandingDetector;
use super::physics::{KinematicWorld, PhysicsEngine};
use super::session::{SessionController, SimulationClock};
use super::vehicle::{AnimationCue, Vehicle, VehicleId};
use crate::error::Result;
use crate::level::{Good, Level};
use crate::normalize_angle;
use crate::settings::Settings;

/// Complete game state (deterministic for a given settings seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState<E: PhysicsEngine = KinematicWorld> {
    pub settings: Settings,
    pub level: Level,
    pub controller: SessionController,
    pub clock: SimulationClock,
    pub engine: E,
}

impl GameState<KinematicWorld> {
    /// Game on the reference kinematic world
    pub fn new(settings: Settings, level: Level) -> Result<Self> {
        let engine = KinematicWorld::new(settings.dt(), settings.air_friction);
        Self::with_engine(settings, level, engine)
    }
}

impl<E: PhysicsEngine> GameState<E> {
    pub fn with_engine(settings: Settings, level: Level, engine: E) -> Result<Self> {
        settings.validate()?;
        let detector = LandingDetector::new(level.strips(), settings.landing_tolerance);
        log::debug!(
            "New game: {} islands, {} ticks per cycle, seed {:#x}",
            level.islands().len(),
            settings.cycle_steps(),
            settings.seed
        );
        Ok(Self {
            clock: SimulationClock::from_settings(&settings),
            controller: SessionController::new(settings.clone(), detector),
            settings,
            level,
            engine,
        })
    }

    pub fn hud(&self) -> Hud {
        let player = self.controller.player();
        Hud {
            cycle_time: self.clock.cycle_time(),
            cycle_seconds: self.settings.cycle_seconds as f32,
            recording_started_at: player.map(|s| s.started_at() as f32 * self.clock.dt()),
            ticks_remaining: player.map(|s| s.ticks_remaining()),
            back_at_start: player.is_some_and(|s| s.is_back_at_start()),
            ready_to_land: self.controller.is_ready_to_land(),
            landed: self.controller.is_landed(),
            outstanding_goals: self.level.outstanding_goals(),
            spawner_count: self.level.spawner_count(),
            selected_spawner: self.level.selected_spawner().name.clone(),
            loops: self.controller.loops().len(),
        }
    }

    /// Render list: piloted vehicle first, then loops
    pub fn vehicle_views(&self) -> Vec<VehicleView> {
        self.controller
            .vehicles()
            .map(|(vehicle, looping)| VehicleView::new(vehicle, looping))
            .collect()
    }
}

/// Per-frame HUD snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    /// Seconds into the global cycle
    pub cycle_time: f32,
    pub cycle_seconds: f32,
    /// Cycle time at which the live recording started
    pub recording_started_at: Option<f32>,
    pub ticks_remaining: Option<usize>,
    pub back_at_start: bool,
    pub ready_to_land: bool,
    pub landed: bool,
    pub outstanding_goals: usize,
    pub spawner_count: usize,
    pub selected_spawner: String,
    pub loops: usize,
}

impl Hud {
    /// One-line prompt for the pilot, if any
    pub fn status_line(&self) -> Option<&'static str> {
        self.ticks_remaining?;
        if self.back_at_start {
            Some("All good, you're back at the start :)")
        } else {
            Some("Return to start before the loop ends!")
        }
    }
}

/// What the renderer needs to draw one vehicle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VehicleView {
    pub id: VehicleId,
    pub position: Vec2,
    /// Normalized to [-π, π)
    pub rotation: f32,
    pub cue: AnimationCue,
    pub cargo: Option<Good>,
    pub looping: bool,
}

impl VehicleView {
    pub fn new(vehicle: &Vehicle, looping: bool) -> Self {
        Self {
            id: vehicle.id(),
            position: vehicle.position(),
            rotation: normalize_angle(vehicle.rotation()),
            cue: vehicle.cue(),
            cargo: vehicle.cargo(),
            looping,
        }
    }
}
