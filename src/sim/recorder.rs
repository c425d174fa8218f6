//! Control recording
//!
//! While a player session is live, one snapshot is captured per fixed tick,
//! after that tick's input was applied and the engine stepped. Recording
//! stops at exactly one cycle's worth of ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::vehicle::{Vehicle, clamp_axis};
use crate::error::{Error, Result};

/// Vehicle state at the end of one recorded tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Body center
    pub position: Vec2,
    pub rotation: f32,
    /// Sticky landed flag at capture time. Inspection only: replay keeps its
    /// own flag, cleared by `ready_to_land`.
    pub landed: bool,
    pub ready_to_land: bool,
    /// Stick input of the tick (replayed as an animation cue only)
    pub input: Vec2,
}

impl Snapshot {
    pub fn capture(vehicle: &Vehicle, input: Vec2) -> Self {
        Self {
            position: vehicle.position(),
            rotation: vehicle.rotation(),
            landed: vehicle.landing().is_landed(),
            ready_to_land: vehicle.landing().is_ready_to_land(),
            input,
        }
    }
}

/// Accumulates exactly `capacity` snapshots
#[derive(Debug, Clone)]
pub struct Recorder {
    capacity: usize,
    snapshots: Vec<Snapshot>,
}

impl Recorder {
    /// A cycle is at least one tick long
    pub fn new(cycle_steps: u32) -> Self {
        let capacity = cycle_steps.max(1) as usize;
        Self {
            capacity,
            snapshots: Vec::with_capacity(capacity),
        }
    }

    /// Capture this tick's snapshot.
    ///
    /// Recording past a full cycle is a tick-ordering bug: it asserts in
    /// debug builds and is ignored otherwise.
    pub fn record(&mut self, vehicle: &Vehicle, input_x: f32, input_y: f32) {
        if self.is_complete() {
            debug_assert!(false, "record() called on a complete recording");
            log::warn!("Recording overrun on vehicle {:?} ignored", vehicle.id());
            return;
        }
        let input = Vec2::new(clamp_axis(input_x), clamp_axis(input_y));
        self.snapshots.push(Snapshot::capture(vehicle, input));
    }

    pub fn is_complete(&self) -> bool {
        self.snapshots.len() >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Ticks left before the cycle completes
    pub fn remaining(&self) -> usize {
        self.capacity - self.snapshots.len()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Freeze the captured snapshots for replay
    pub fn finish(self) -> Result<Recording> {
        Recording::new(self.snapshots)
    }
}

/// A frozen, non-empty recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    snapshots: Box<[Snapshot]>,
}

impl Recording {
    pub fn new(snapshots: Vec<Snapshot>) -> Result<Self> {
        if snapshots.is_empty() {
            return Err(Error::EmptyRecording);
        }
        Ok(Self {
            snapshots: snapshots.into_boxed_slice(),
        })
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }
}

impl std::ops::Index<usize> for Recording {
    type Output = Snapshot;

    fn index(&self, index: usize) -> &Snapshot {
        &self.snapshots[index]
    }
}
