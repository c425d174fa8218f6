//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (piloted vehicle first, then loops by creation)
//! - No rendering or platform dependencies

pub mod collision;
pub mod landing;
pub mod physics;
pub mod player;
pub mod recorder;
pub mod segment;
pub mod session;
pub mod state;
pub mod tick;
pub mod vehicle;

pub use collision::{Crash, CrashCause, resolve_contacts};
pub use landing::{
    Landable, LandingDetector, LandingHook, LandingState, LandingStrip, StripId, find_strip_under,
};
pub use physics::{BodyHandle, BodyState, Contact, KinematicWorld, PhysicsEngine};
pub use player::LoopPlayer;
pub use recorder::{Recorder, Recording, Snapshot};
pub use segment::Segment;
pub use session::{
    DiscardReason, PlayerSession, SessionController, SessionEvent, SessionInput,
    SimulationClock, SpawnRequest, TickReport,
};
pub use state::{GameState, Hud, VehicleView};
pub use tick::{GameInput, tick};
pub use vehicle::{AnimationCue, ControlScheme, TickResult, Vehicle, VehicleId};
