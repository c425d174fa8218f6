//! Landing detection
//!
//! A vehicle is "over" a strip when its foot is within the landing tolerance
//! of the strip's line. It lands when it is also ready (idle and stationary):
//! the strip's interaction hook fires once, the vehicle snaps upright onto
//! the strip midpoint, and a sticky `landed` flag keeps the hook from firing
//! again until the pilot touches the stick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics::PhysicsEngine;
use super::segment::Segment;
use super::vehicle::Vehicle;

/// Identity of a landing strip (its island's index in level order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StripId(pub u32);

/// An immutable landing line on an island
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandingStrip {
    pub id: StripId,
    pub line: Segment,
}

impl LandingStrip {
    pub fn new(id: StripId, a: Vec2, b: Vec2) -> Self {
        Self {
            id,
            line: Segment::new(a, b),
        }
    }

    /// Snap target and spawn point
    #[inline]
    pub fn midpoint(&self) -> Vec2 {
        self.line.midpoint()
    }
}

/// Per-vehicle readiness bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandingState {
    idle: bool,
    stationary: bool,
    landed: bool,
    last_strip: Option<StripId>,
}

impl Default for LandingState {
    /// Fresh vehicles are at rest with no input
    fn default() -> Self {
        Self {
            idle: true,
            stationary: true,
            landed: false,
            last_strip: None,
        }
    }
}

impl LandingState {
    /// Any stick input wakes a parked vehicle up
    pub fn set_idle(&mut self, idle: bool) {
        self.idle = idle;
        if !idle {
            self.landed = false;
        }
    }

    pub fn set_stationary(&mut self, stationary: bool) {
        self.stationary = stationary;
    }

    pub fn mark_landed(&mut self, strip: StripId) {
        self.landed = true;
        self.last_strip = Some(strip);
    }

    pub fn is_idle(&self) -> bool {
        self.idle
    }

    pub fn is_stationary(&self) -> bool {
        self.stationary
    }

    pub fn is_ready_to_land(&self) -> bool {
        self.idle && self.stationary
    }

    pub fn is_landed(&self) -> bool {
        self.landed
    }

    /// Strip of the most recent landing, kept after take-off
    pub fn last_strip(&self) -> Option<StripId> {
        self.last_strip
    }
}

/// Something the detector can land: a piloted vehicle or a loop player
pub trait Landable {
    fn foot_position(&self) -> Vec2;
    fn is_ready_to_land(&self) -> bool;
    fn is_landed(&self) -> bool;
    /// Snap onto the strip and latch the landed flag
    fn finalize_landing(&mut self, engine: &mut dyn PhysicsEngine, strip: &LandingStrip);
    /// The vehicle handed to the strip's interaction hook
    fn vehicle_mut(&mut self) -> &mut Vehicle;
}

impl Landable for Vehicle {
    fn foot_position(&self) -> Vec2 {
        Vehicle::foot_position(self)
    }

    fn is_ready_to_land(&self) -> bool {
        self.landing().is_ready_to_land()
    }

    fn is_landed(&self) -> bool {
        self.landing().is_landed()
    }

    fn finalize_landing(&mut self, engine: &mut dyn PhysicsEngine, strip: &LandingStrip) {
        self.snap_foot(engine, strip.midpoint(), 0.0);
        self.landing_mut().mark_landed(strip.id);
    }

    fn vehicle_mut(&mut self) -> &mut Vehicle {
        self
    }
}

/// Island behaviour triggered once per landing.
///
/// May change the vehicle's cargo or the island's own state. Must not
/// trigger further landing checks.
pub trait LandingHook {
    fn interact(&mut self, strip: StripId, vehicle: &mut Vehicle);
}

/// First strip (in caller order) whose line is within `tolerance` of `foot`
pub fn find_strip_under(
    foot: Vec2,
    strips: &[LandingStrip],
    tolerance: f32,
) -> Option<&LandingStrip> {
    strips
        .iter()
        .find(|strip| strip.line.distance_to(foot) < tolerance)
}

/// Checks landables against an ordered set of strips
#[derive(Debug, Clone)]
pub struct LandingDetector {
    strips: Vec<LandingStrip>,
    tolerance: f32,
}

impl LandingDetector {
    pub fn new(strips: Vec<LandingStrip>, tolerance: f32) -> Self {
        Self { strips, tolerance }
    }

    pub fn strips(&self) -> &[LandingStrip] {
        &self.strips
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    pub fn find_strip_under(&self, foot: Vec2) -> Option<&LandingStrip> {
        find_strip_under(foot, &self.strips, self.tolerance)
    }

    /// Land `entity` if it is ready, not already landed, and over a strip.
    ///
    /// Returns the strip landed on. The hook fires before the snap.
    pub fn check_and_snap(
        &self,
        entity: &mut dyn Landable,
        engine: &mut dyn PhysicsEngine,
        hook: &mut dyn LandingHook,
    ) -> Option<StripId> {
        if !entity.is_ready_to_land() || entity.is_landed() {
            return None;
        }
        let strip = self.find_strip_under(entity.foot_position())?;

        hook.interact(strip.id, entity.vehicle_mut());
        entity.finalize_landing(engine, strip);
        log::trace!("Landed on strip {:?}", strip.id);
        Some(strip.id)
    }
}
