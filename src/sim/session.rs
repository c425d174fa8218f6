//! Session lifecycle
//!
//! One player slot and any number of loop players. Per fixed tick:
//! 1. resolve collisions reported by the previous engine step
//! 2. landing checks: loop players first, then the piloted vehicle
//! 3. player state machine: finish a complete cycle (convert or discard),
//!    self-destruct, apply live input, or spawn
//! 4. advance every loop player
//! 5. step the engine, sync vehicles, record the piloted vehicle
//!
//! A finished cycle becomes a loop only if the vehicle's foot is exactly
//! back on its spawn point; anything else explodes the vehicle.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{CrashCause, resolve_contacts};
use super::landing::{Landable, LandingDetector, LandingHook, StripId};
use super::physics::PhysicsEngine;
use super::player::LoopPlayer;
use super::recorder::Recorder;
use super::vehicle::{Vehicle, VehicleId};
use crate::settings::{Settings, VehicleClass};

/// Tick counter shared by everything that composes a session controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    tick: u64,
    cycle_steps: u32,
    dt: f32,
}

impl SimulationClock {
    pub fn new(cycle_steps: u32, dt: f32) -> Self {
        Self {
            tick: 0,
            cycle_steps: cycle_steps.max(1),
            dt,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.cycle_steps(), settings.dt())
    }

    /// Ticks since the game started
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Position within the global cycle
    pub fn cycle_step(&self) -> u32 {
        (self.tick % self.cycle_steps as u64) as u32
    }

    pub fn cycle_steps(&self) -> u32 {
        self.cycle_steps
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Seconds into the global cycle
    pub fn cycle_time(&self) -> f32 {
        self.cycle_step() as f32 * self.dt
    }

    pub fn advance(&mut self) {
        self.tick += 1;
    }
}

/// Ask for a new piloted vehicle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    /// Where the foot starts (and must return to)
    pub point: Vec2,
    /// Picked by the seeded RNG when `None`
    pub class: Option<VehicleClass>,
}

/// Input consumed by the session controller for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionInput {
    pub x: f32,
    pub y: f32,
    pub self_destruct: bool,
    /// Ignored while a vehicle is being piloted
    pub spawn: Option<SpawnRequest>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiscardReason {
    /// Cycle ended with the foot this far from the spawn point
    NotReturned { distance: f32 },
    SelfDestruct,
    Crashed(CrashCause),
    /// Back at the spawn point but nothing was captured
    EmptyRecording,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    Spawned {
        vehicle: VehicleId,
        class: VehicleClass,
        spawn_point: Vec2,
    },
    Landed {
        vehicle: VehicleId,
        strip: StripId,
        looping: bool,
    },
    LoopCreated {
        vehicle: VehicleId,
        steps: usize,
    },
    Discarded {
        vehicle: VehicleId,
        reason: DiscardReason,
    },
    LoopDestroyed {
        vehicle: VehicleId,
        cause: CrashCause,
    },
}

/// Everything that happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub events: Vec<SessionEvent>,
}

impl TickReport {
    pub fn new(tick: u64) -> Self {
        Self {
            tick,
            events: Vec::new(),
        }
    }

    fn push(&mut self, event: SessionEvent) {
        self.events.push(event);
    }
}

/// The live, recording binding between the player and one vehicle
#[derive(Debug, Clone)]
pub struct PlayerSession {
    vehicle: Vehicle,
    recorder: Recorder,
    spawn_point: Vec2,
    /// Global cycle step at which recording started
    started_at: u32,
}

impl PlayerSession {
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn spawn_point(&self) -> Vec2 {
        self.spawn_point
    }

    pub fn started_at(&self) -> u32 {
        self.started_at
    }

    pub fn recorded_ticks(&self) -> usize {
        self.recorder.len()
    }

    pub fn ticks_remaining(&self) -> usize {
        self.recorder.remaining()
    }

    pub fn distance_to_spawn(&self) -> f32 {
        self.vehicle.foot_position().distance(self.spawn_point)
    }

    /// Exactly on the spawn point (the loop conversion condition)
    pub fn is_back_at_start(&self) -> bool {
        self.distance_to_spawn() == 0.0
    }
}

#[derive(Debug, Clone, Default)]
pub enum PlayerSlot {
    #[default]
    Idle,
    Controlling(PlayerSession),
}

/// Owns the piloted session and every loop player
#[derive(Debug, Clone)]
pub struct SessionController {
    settings: Settings,
    detector: LandingDetector,
    slot: PlayerSlot,
    loops: Vec<LoopPlayer>,
    rng: Pcg32,
    next_vehicle_id: u32,
}

impl SessionController {
    pub fn new(settings: Settings, detector: LandingDetector) -> Self {
        let rng = Pcg32::seed_from_u64(settings.seed);
        Self {
            settings,
            detector,
            slot: PlayerSlot::Idle,
            loops: Vec::new(),
            rng,
            next_vehicle_id: 1,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn detector(&self) -> &LandingDetector {
        &self.detector
    }

    pub fn player(&self) -> Option<&PlayerSession> {
        match &self.slot {
            PlayerSlot::Controlling(session) => Some(session),
            PlayerSlot::Idle => None,
        }
    }

    pub fn loops(&self) -> &[LoopPlayer] {
        &self.loops
    }

    pub fn is_recording(&self) -> bool {
        self.player().is_some()
    }

    pub fn ticks_remaining_in_cycle(&self) -> Option<usize> {
        self.player().map(PlayerSession::ticks_remaining)
    }

    pub fn is_ready_to_land(&self) -> bool {
        self.player()
            .is_some_and(|s| s.vehicle.landing().is_ready_to_land())
    }

    pub fn is_landed(&self) -> bool {
        self.player()
            .is_some_and(|s| s.vehicle.landing().is_landed())
    }

    /// Every live vehicle: the piloted one first, then loops in creation order
    pub fn vehicles(&self) -> impl Iterator<Item = (&Vehicle, bool)> {
        self.player()
            .map(|s| (&s.vehicle, false))
            .into_iter()
            .chain(self.loops.iter().map(|l| (l.vehicle(), true)))
    }

    fn allocate_id(&mut self) -> VehicleId {
        let id = VehicleId(self.next_vehicle_id);
        self.next_vehicle_id += 1;
        id
    }

    fn pick_class(&mut self, requested: Option<VehicleClass>) -> VehicleClass {
        requested.unwrap_or_else(|| {
            if self.rng.random_bool(0.5) {
                VehicleClass::Reversible
            } else {
                VehicleClass::Omni
            }
        })
    }

    /// Advance the session state by one fixed tick
    pub fn tick(
        &mut self,
        engine: &mut dyn PhysicsEngine,
        hook: &mut dyn LandingHook,
        clock: &mut SimulationClock,
        input: &SessionInput,
    ) -> TickReport {
        let mut report = TickReport::new(clock.tick());

        self.resolve_collisions(engine, &mut report);

        for lp in self.loops.iter_mut() {
            if let Some(strip) = self.detector.check_and_snap(lp, engine, hook) {
                report.push(SessionEvent::Landed {
                    vehicle: lp.id(),
                    strip,
                    looping: true,
                });
            }
        }
        if let PlayerSlot::Controlling(session) = &mut self.slot {
            if let Some(strip) = self.detector.check_and_snap(&mut session.vehicle, engine, hook) {
                log::info!("Vehicle {:?} landed on strip {:?}", session.vehicle.id(), strip);
                report.push(SessionEvent::Landed {
                    vehicle: session.vehicle.id(),
                    strip,
                    looping: false,
                });
            }
        }

        let mut recording_input = None;
        match std::mem::take(&mut self.slot) {
            PlayerSlot::Idle => {
                if let Some(request) = input.spawn {
                    self.spawn(engine, clock, request, &mut report);
                }
            }
            PlayerSlot::Controlling(session) if session.recorder.is_complete() => {
                self.finish_session(engine, session, &mut report);
            }
            PlayerSlot::Controlling(mut session) => {
                if input.self_destruct {
                    session.vehicle.apply_input(engine, 0.0, 0.0, true);
                    log::info!("Vehicle {:?} self-destructed", session.vehicle.id());
                    report.push(SessionEvent::Discarded {
                        vehicle: session.vehicle.id(),
                        reason: DiscardReason::SelfDestruct,
                    });
                } else {
                    session.vehicle.apply_input(engine, input.x, input.y, false);
                    recording_input = Some((input.x, input.y));
                    self.slot = PlayerSlot::Controlling(session);
                }
            }
        }

        // Destroyed loops were dropped by collision resolution
        for lp in self.loops.iter_mut() {
            lp.advance(engine);
        }

        engine.step(clock.dt());

        for lp in self.loops.iter_mut() {
            lp.vehicle_mut().sync(engine);
        }
        if let PlayerSlot::Controlling(session) = &mut self.slot {
            session.vehicle.sync(engine);
            if let Some((x, y)) = recording_input {
                session.recorder.record(&session.vehicle, x, y);
            }
        }

        clock.advance();
        report
    }

    fn spawn(
        &mut self,
        engine: &mut dyn PhysicsEngine,
        clock: &SimulationClock,
        request: SpawnRequest,
        report: &mut TickReport,
    ) {
        let class = self.pick_class(request.class);
        let id = self.allocate_id();
        let tuning = *self.settings.tuning(class);
        let vehicle = Vehicle::spawn(engine, id, class, tuning, request.point);

        log::info!(
            "Spawned {} vehicle {:?} at ({}, {}), recording {} ticks",
            class.as_str(),
            id,
            request.point.x,
            request.point.y,
            self.settings.cycle_steps()
        );
        report.push(SessionEvent::Spawned {
            vehicle: id,
            class,
            spawn_point: request.point,
        });

        self.slot = PlayerSlot::Controlling(PlayerSession {
            vehicle,
            recorder: Recorder::new(self.settings.cycle_steps()),
            spawn_point: request.point,
            started_at: clock.cycle_step(),
        });
    }

    /// Convert a complete cycle into a loop, or explode it if it didn't come home
    fn finish_session(
        &mut self,
        engine: &mut dyn PhysicsEngine,
        session: PlayerSession,
        report: &mut TickReport,
    ) {
        let PlayerSession {
            mut vehicle,
            recorder,
            spawn_point,
            ..
        } = session;
        let id = vehicle.id();
        let distance = vehicle.foot_position().distance(spawn_point);

        if distance != 0.0 {
            vehicle.explode(engine);
            log::info!("Vehicle {id:?} did not return to spawn ({distance:.2} away), discarded");
            report.push(SessionEvent::Discarded {
                vehicle: id,
                reason: DiscardReason::NotReturned { distance },
            });
            return;
        }

        match recorder.finish() {
            Ok(recording) => {
                let steps = recording.len();
                log::info!("Vehicle {id:?} closed its loop ({steps} steps)");
                self.loops.push(LoopPlayer::new(recording, vehicle));
                report.push(SessionEvent::LoopCreated { vehicle: id, steps });
            }
            // Recorders hold at least one tick, so a finished session is never empty
            Err(err) => {
                log::warn!("Vehicle {id:?} could not become a loop: {err}");
                vehicle.explode(engine);
                report.push(SessionEvent::Discarded {
                    vehicle: id,
                    reason: DiscardReason::EmptyRecording,
                });
            }
        }
    }

    fn resolve_collisions(&mut self, engine: &mut dyn PhysicsEngine, report: &mut TickReport) {
        let contacts = engine.drain_contacts();
        if contacts.is_empty() {
            return;
        }

        let player_vehicle = match &mut self.slot {
            PlayerSlot::Controlling(session) => Some(&mut session.vehicle),
            PlayerSlot::Idle => None,
        };
        let mut vehicles: Vec<&mut Vehicle> = player_vehicle
            .into_iter()
            .chain(self.loops.iter_mut().map(LoopPlayer::vehicle_mut))
            .collect();
        let crashes = resolve_contacts(engine, &contacts, &mut vehicles);
        drop(vehicles);

        for crash in crashes {
            let is_player = self
                .player()
                .is_some_and(|s| s.vehicle.id() == crash.vehicle);
            if is_player {
                self.slot = PlayerSlot::Idle;
                report.push(SessionEvent::Discarded {
                    vehicle: crash.vehicle,
                    reason: DiscardReason::Crashed(crash.cause),
                });
            } else {
                report.push(SessionEvent::LoopDestroyed {
                    vehicle: crash.vehicle,
                    cause: crash.cause,
                });
            }
        }
        self.loops.retain(|lp| !lp.vehicle().is_destroyed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::landing::LandingStrip;
    use crate::sim::physics::KinematicWorld;

    struct NoHook;

    impl LandingHook for NoHook {
        fn interact(&mut self, _strip: StripId, _vehicle: &mut Vehicle) {}
    }

    #[derive(Default)]
    struct CountingHook(Vec<(StripId, VehicleId)>);

    impl LandingHook for CountingHook {
        fn interact(&mut self, strip: StripId, vehicle: &mut Vehicle) {
            self.0.push((strip, vehicle.id()));
        }
    }

    const SPAWN: Vec2 = Vec2::new(400.0, 400.0);

    /// Omni vehicles whose velocity follows input exactly (0.25 per tick)
    fn exact_settings(cycle_steps: u32) -> Settings {
        let mut settings = Settings {
            target_tick_rate: cycle_steps,
            cycle_seconds: 1,
            air_friction: 1.0,
            ..Default::default()
        };
        settings.omni.max_forward_accel = 0.25;
        settings
    }

    struct Harness {
        world: KinematicWorld,
        controller: SessionController,
        clock: SimulationClock,
    }

    impl Harness {
        fn new(settings: Settings, strips: Vec<LandingStrip>) -> Self {
            let world = KinematicWorld::new(settings.dt(), settings.air_friction);
            let clock = SimulationClock::from_settings(&settings);
            let detector = LandingDetector::new(strips, settings.landing_tolerance);
            Self {
                world,
                controller: SessionController::new(settings, detector),
                clock,
            }
        }

        fn tick(&mut self, input: SessionInput) -> TickReport {
            self.tick_with(input, &mut NoHook)
        }

        fn tick_with(&mut self, input: SessionInput, hook: &mut dyn LandingHook) -> TickReport {
            self.controller
                .tick(&mut self.world, hook, &mut self.clock, &input)
        }

        fn spawn_omni(&mut self) -> VehicleId {
            let report = self.tick(SessionInput {
                spawn: Some(SpawnRequest {
                    point: SPAWN,
                    class: Some(VehicleClass::Omni),
                }),
                ..Default::default()
            });
            match report.events[..] {
                [SessionEvent::Spawned { vehicle, .. }] => vehicle,
                _ => panic!("expected a spawn, got {:?}", report.events),
            }
        }

        fn steer(&mut self, x: f32, y: f32) -> TickReport {
            self.tick(SessionInput {
                x,
                y,
                ..Default::default()
            })
        }
    }

    fn spawn_strip() -> LandingStrip {
        LandingStrip::new(
            StripId(0),
            Vec2::new(380.0, 400.0),
            Vec2::new(420.0, 400.0),
        )
    }

    #[test]
    fn test_clock_wraps_cycle() {
        let mut clock = SimulationClock::new(3, 0.5);
        for _ in 0..4 {
            clock.advance();
        }
        assert_eq!(clock.tick(), 4);
        assert_eq!(clock.cycle_step(), 1);
        assert_eq!(clock.cycle_time(), 0.5);
    }

    #[test]
    fn test_spawn_starts_recording_next_tick() {
        let mut h = Harness::new(exact_settings(10), vec![]);
        assert!(!h.controller.is_recording());
        h.spawn_omni();
        let session = h.controller.player().unwrap();
        // The spawn tick itself applies no input and records nothing
        assert_eq!(session.recorded_ticks(), 0);
        assert_eq!(h.controller.ticks_remaining_in_cycle(), Some(10));

        h.steer(1.0, 0.0);
        assert_eq!(h.controller.player().unwrap().recorded_ticks(), 1);
        assert_eq!(h.controller.ticks_remaining_in_cycle(), Some(9));
    }

    #[test]
    fn test_spawn_ignored_while_controlling() {
        let mut h = Harness::new(exact_settings(10), vec![]);
        let first = h.spawn_omni();
        let report = h.tick(SessionInput {
            spawn: Some(SpawnRequest {
                point: Vec2::ZERO,
                class: None,
            }),
            ..Default::default()
        });
        assert!(report.events.is_empty());
        assert_eq!(h.controller.player().unwrap().vehicle().id(), first);
    }

    #[test]
    fn test_parked_cycle_converts_to_loop() {
        let mut h = Harness::new(exact_settings(5), vec![]);
        let id = h.spawn_omni();
        for _ in 0..5 {
            h.steer(0.0, 0.0);
        }
        assert_eq!(h.controller.ticks_remaining_in_cycle(), Some(0));
        let report = h.steer(0.0, 0.0);
        assert!(report
            .events
            .contains(&SessionEvent::LoopCreated { vehicle: id, steps: 5 }));
        assert!(!h.controller.is_recording());
        assert_eq!(h.controller.loops().len(), 1);
    }

    #[test]
    fn test_tiny_miss_is_discarded() {
        let mut h = Harness::new(exact_settings(4), vec![]);
        let id = h.spawn_omni();
        h.steer(1.0, 0.0);
        h.steer(-1.0, 0.0);
        h.steer(0.0, 0.0);
        // Nudge the body a hair off the spawn point before the cycle closes
        let body = h.controller.player().unwrap().vehicle().body();
        let pos = h.world.body_state(body).unwrap().pos;
        h.world.teleport(body, pos + Vec2::new(0.001, 0.0), 0.0);
        h.steer(0.0, 0.0);

        let report = h.steer(0.0, 0.0);
        match report.events[..] {
            [SessionEvent::Discarded {
                vehicle,
                reason: DiscardReason::NotReturned { distance },
            }] => {
                assert_eq!(vehicle, id);
                assert!(distance > 0.0);
            }
            _ => panic!("expected discard, got {:?}", report.events),
        }
        assert!(h.controller.loops().is_empty());
        assert_eq!(h.world.body_count(), 0);
    }

    #[test]
    fn test_self_destruct_discards_immediately() {
        let mut h = Harness::new(exact_settings(100), vec![]);
        let id = h.spawn_omni();
        h.steer(1.0, 0.0);
        let report = h.tick(SessionInput {
            x: 1.0,
            self_destruct: true,
            ..Default::default()
        });
        assert_eq!(
            report.events,
            vec![SessionEvent::Discarded {
                vehicle: id,
                reason: DiscardReason::SelfDestruct
            }]
        );
        assert!(!h.controller.is_recording());
        assert_eq!(h.world.body_count(), 0);
    }

    #[test]
    fn test_player_crash_frees_slot() {
        let mut settings = exact_settings(100);
        settings.air_friction = 0.0;
        let mut h = Harness::new(settings, vec![]);
        let id = h.spawn_omni();
        let rock = h.world.spawn_static_body(Vec2::new(0.0, 0.0));
        let body = h.controller.player().unwrap().vehicle().body();

        // Speed builds up by 0.25 a tick; the last sample is well past 0.8
        for _ in 0..6 {
            h.steer(1.0, 0.0);
        }
        h.world.push_contact(body, rock);
        let report = h.steer(0.0, 0.0);

        assert!(report.events.iter().any(|e| matches!(
            e,
            SessionEvent::Discarded {
                vehicle,
                reason: DiscardReason::Crashed(CrashCause::TerrainImpact { .. })
            } if *vehicle == id
        )));
        assert!(!h.controller.is_recording());
    }

    #[test]
    fn test_gentle_touch_survives() {
        let mut h = Harness::new(exact_settings(100), vec![]);
        h.spawn_omni();
        let rock = h.world.spawn_static_body(Vec2::new(0.0, 0.0));
        let body = h.controller.player().unwrap().vehicle().body();
        h.steer(1.0, 0.0);
        h.steer(1.0, 0.0);
        h.world.push_contact(body, rock);
        let report = h.steer(0.0, 0.0);
        assert!(report.events.is_empty());
        assert!(h.controller.is_recording());
    }

    #[test]
    fn test_loop_collision_removes_both() {
        let mut h = Harness::new(exact_settings(3), vec![]);
        h.spawn_omni();
        for _ in 0..4 {
            h.steer(0.0, 0.0);
        }
        assert_eq!(h.controller.loops().len(), 1);
        let loop_body = h.controller.loops()[0].vehicle().body();
        let loop_id = h.controller.loops()[0].id();

        let pilot = h.spawn_omni();
        let pilot_body = h.controller.player().unwrap().vehicle().body();
        h.world.push_contact(loop_body, pilot_body);
        let report = h.steer(0.0, 0.0);

        assert!(report.events.iter().any(|e| matches!(
            e,
            SessionEvent::LoopDestroyed { vehicle, .. } if *vehicle == loop_id
        )));
        assert!(report.events.iter().any(|e| matches!(
            e,
            SessionEvent::Discarded {
                vehicle,
                reason: DiscardReason::Crashed(CrashCause::VehicleCollision(_))
            } if *vehicle == pilot
        )));
        assert!(h.controller.loops().is_empty());
        assert!(!h.controller.is_recording());

        // Gone for good: nothing left to advance or report
        let report = h.steer(0.0, 0.0);
        assert!(report.events.is_empty());
        assert!(h.controller.loops().is_empty());
    }

    #[test]
    fn test_landing_checked_for_player_and_loops() {
        let mut h = Harness::new(exact_settings(3), vec![spawn_strip()]);
        let mut hook = CountingHook::default();
        let spawn = SessionInput {
            spawn: Some(SpawnRequest {
                point: SPAWN,
                class: Some(VehicleClass::Omni),
            }),
            ..Default::default()
        };
        h.tick_with(spawn, &mut hook);
        // Fresh vehicle rests on the strip: lands on the first check
        let report = h.tick_with(SessionInput::default(), &mut hook);
        assert!(report.events.iter().any(|e| matches!(
            e,
            SessionEvent::Landed { looping: false, .. }
        )));
        assert!(h.controller.is_landed());
        assert!(h.controller.is_ready_to_land());
        assert_eq!(hook.0.len(), 1);

        // Parked for the rest of the cycle: no repeat fires
        for _ in 0..4 {
            h.tick_with(SessionInput::default(), &mut hook);
        }
        assert_eq!(h.controller.loops().len(), 1);
        assert_eq!(hook.0.len(), 1);
    }

    #[test]
    fn test_random_class_is_seeded() {
        let spawn_twice = || {
            let mut h = Harness::new(exact_settings(1), vec![]);
            let mut classes = Vec::new();
            for _ in 0..8 {
                let report = h.tick(SessionInput {
                    spawn: Some(SpawnRequest {
                        point: SPAWN,
                        class: None,
                    }),
                    ..Default::default()
                });
                if let Some(SessionEvent::Spawned { class, .. }) = report.events.first() {
                    classes.push(*class);
                }
                h.tick(SessionInput {
                    self_destruct: true,
                    ..Default::default()
                });
            }
            classes
        };
        let first = spawn_twice();
        assert_eq!(first.len(), 8);
        assert_eq!(first, spawn_twice());
    }

    #[test]
    fn test_end_to_end_out_and_back() {
        // 30 s at 60 Hz
        let mut settings = exact_settings(60);
        settings.cycle_seconds = 30;
        let n = settings.cycle_steps() as usize;
        assert_eq!(n, 1800);

        let mut h = Harness::new(settings, vec![spawn_strip()]);
        let id = h.spawn_omni();
        for t in 0..n {
            let x = if t < 900 { 1.0 } else { -1.0 };
            h.steer(x, 0.0);
        }
        let session = h.controller.player().unwrap();
        assert_eq!(session.recorded_ticks(), 1800);
        assert_eq!(session.vehicle().foot_position(), SPAWN);
        assert!(session.is_back_at_start());

        let report = h.steer(0.0, 0.0);
        assert!(report
            .events
            .contains(&SessionEvent::LoopCreated { vehicle: id, steps: 1800 }));

        let lp = &h.controller.loops()[0];
        let recording = lp.recording();
        let foot = Vec2::new(0.0, 12.0);
        assert_eq!(recording[1799].position + foot, SPAWN);
        assert_eq!(recording[899].position + foot, Vec2::new(625.0, 400.0));
        assert_eq!(recording[900].position + foot, Vec2::new(624.75, 400.0));

        // Conversion tick already advanced once
        assert_eq!(lp.cursor(), 1);
        for _ in 0..(900 - 1) {
            h.steer(0.0, 0.0);
        }
        let lp = &h.controller.loops()[0];
        assert_eq!(lp.cursor(), 900);
        assert_eq!(lp.vehicle().foot_position(), Vec2::new(624.75, 400.0));

        for _ in 0..899 {
            h.steer(0.0, 0.0);
        }
        let lp = &h.controller.loops()[0];
        assert_eq!(lp.cursor(), 1799);
        assert_eq!(lp.vehicle().foot_position(), SPAWN);

        // Wraps back to where it started
        h.steer(0.0, 0.0);
        h.steer(0.0, 0.0);
        assert_eq!(h.controller.loops()[0].cursor(), 1);
    }
}
