//! Loop playback
//!
//! A loop player owns a finished recording and the vehicle that made it, and
//! drives that vehicle along the recorded trajectory forever. Playback is
//! position driven: every tick the body is teleported onto the recorded pose
//! and no forces are applied, so repetition is exact regardless of how the
//! engine would have integrated the original inputs.

use glam::Vec2;

use super::landing::{Landable, LandingStrip};
use super::physics::PhysicsEngine;
use super::recorder::{Recording, Snapshot};
use super::vehicle::{TickResult, Vehicle, VehicleId};

#[derive(Debug, Clone)]
pub struct LoopPlayer {
    recording: Recording,
    vehicle: Vehicle,
    cursor: usize,
    /// Local sticky flag; cleared whenever the current snapshot isn't ready
    landed: bool,
    completed_cycles: u64,
}

impl LoopPlayer {
    /// Take over `vehicle`. Cursor 0 is the pose the recording ended in.
    pub fn new(recording: Recording, vehicle: Vehicle) -> Self {
        let landed = vehicle.landing().is_landed();
        log::debug!(
            "Loop player for vehicle {:?} with {} steps",
            vehicle.id(),
            recording.len()
        );
        Self {
            recording,
            vehicle,
            cursor: 0,
            landed,
            completed_cycles: 0,
        }
    }

    /// Play the next recorded tick
    pub fn advance(&mut self, engine: &mut dyn PhysicsEngine) -> TickResult {
        if self.vehicle.is_destroyed() {
            return TickResult::Destroyed;
        }

        self.cursor = (self.cursor + 1) % self.recording.len();
        if self.cursor == 0 {
            self.completed_cycles += 1;
        }

        let snap = self.recording[self.cursor];
        self.vehicle
            .set_position_and_rotation(engine, snap.position, snap.rotation);
        self.vehicle.play_cue(snap.input);
        if !snap.ready_to_land {
            self.landed = false;
        }
        TickResult::Alive
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &Snapshot {
        &self.recording[self.cursor]
    }

    pub fn period(&self) -> usize {
        self.recording.len()
    }

    pub fn completed_cycles(&self) -> u64 {
        self.completed_cycles
    }

    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    pub fn id(&self) -> VehicleId {
        self.vehicle.id()
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn is_landed(&self) -> bool {
        self.landed
    }

    pub fn is_ready_to_land(&self) -> bool {
        self.current().ready_to_land
    }
}

impl Landable for LoopPlayer {
    fn foot_position(&self) -> Vec2 {
        self.vehicle.foot_position()
    }

    fn is_ready_to_land(&self) -> bool {
        LoopPlayer::is_ready_to_land(self)
    }

    fn is_landed(&self) -> bool {
        self.landed
    }

    fn finalize_landing(&mut self, engine: &mut dyn PhysicsEngine, strip: &LandingStrip) {
        self.vehicle.snap_foot(engine, strip.midpoint(), 0.0);
        self.vehicle.landing_mut().mark_landed(strip.id);
        self.landed = true;
    }

    fn vehicle_mut(&mut self) -> &mut Vehicle {
        &mut self.vehicle
    }
}
