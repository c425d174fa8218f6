//! Islands, goods and what happens when a vehicle lands on them
//!
//! Island order is landing priority: when two landing lines are both in
//! range, the earlier island wins.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sim::landing::{LandingHook, LandingStrip, StripId};
use crate::sim::segment::Segment;
use crate::sim::vehicle::Vehicle;

/// Cargo a vehicle can carry, one unit at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Good {
    Water,
    Food,
    Ore,
}

impl Good {
    pub fn as_str(&self) -> &'static str {
        match self {
            Good::Water => "water",
            Good::Food => "food",
            Good::Ore => "ore",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum IslandKind {
    /// Nothing to do here
    Plain,
    /// Vehicles may be spawned here once it has been landed on
    Spawner {
        #[serde(default)]
        discovered: bool,
    },
    /// Loads its good into an empty cargo slot
    Producer { good: Good },
    /// Takes its good and counts the delivery
    Shop {
        good: Good,
        #[serde(default)]
        deliveries: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Island {
    pub name: String,
    pub landing_line: Segment,
    pub kind: IslandKind,
}

impl Island {
    pub fn new(name: impl Into<String>, a: Vec2, b: Vec2, kind: IslandKind) -> Self {
        Self {
            name: name.into(),
            landing_line: Segment::new(a, b),
            kind,
        }
    }

    pub fn is_usable_spawner(&self) -> bool {
        matches!(self.kind, IslandKind::Spawner { discovered: true })
    }

    /// Where a spawned vehicle's foot is placed
    pub fn spawn_point(&self) -> Vec2 {
        self.landing_line.midpoint()
    }

    fn interact(&mut self, vehicle: &mut Vehicle) {
        match &mut self.kind {
            IslandKind::Plain => {}
            IslandKind::Spawner { discovered } => {
                if !*discovered {
                    log::info!("Discovered spawner {}", self.name);
                    *discovered = true;
                }
            }
            IslandKind::Producer { good } => {
                if vehicle.try_store_good(*good) {
                    log::info!(
                        "Vehicle {:?} loaded {} at {}",
                        vehicle.id(),
                        good.as_str(),
                        self.name
                    );
                }
            }
            IslandKind::Shop { good, deliveries } => {
                if vehicle.try_take_good(*good) {
                    *deliveries += 1;
                    log::info!(
                        "Vehicle {:?} delivered {} to {} ({} total)",
                        vehicle.id(),
                        good.as_str(),
                        self.name,
                        deliveries
                    );
                }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct LevelFile {
    islands: Vec<Island>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    islands: Vec<Island>,
    /// Index into `islands`; always a discovered spawner
    selected_spawner: usize,
}

impl Level {
    /// Needs at least one discovered spawner; the first one starts selected
    pub fn new(islands: Vec<Island>) -> Result<Self> {
        let selected_spawner = islands
            .iter()
            .position(Island::is_usable_spawner)
            .ok_or_else(|| Error::InvalidLevel("no discovered spawner".into()))?;
        Ok(Self {
            islands,
            selected_spawner,
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: LevelFile = serde_json::from_str(json)?;
        Self::new(file.islands)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let level = Self::from_json(&json)?;
        log::info!(
            "Loaded level {} ({} islands)",
            path.display(),
            level.islands.len()
        );
        Ok(level)
    }

    pub fn islands(&self) -> &[Island] {
        &self.islands
    }

    pub fn island(&self, strip: StripId) -> Option<&Island> {
        self.islands.get(strip.0 as usize)
    }

    /// One strip per island, in island order
    pub fn strips(&self) -> Vec<LandingStrip> {
        self.islands
            .iter()
            .enumerate()
            .map(|(i, island)| LandingStrip {
                id: StripId(i as u32),
                line: island.landing_line,
            })
            .collect()
    }

    pub fn selected_spawner(&self) -> &Island {
        &self.islands[self.selected_spawner]
    }

    pub fn selected_spawn_point(&self) -> Vec2 {
        self.selected_spawner().spawn_point()
    }

    pub fn spawner_count(&self) -> usize {
        self.islands.iter().filter(|i| i.is_usable_spawner()).count()
    }

    pub fn has_multiple_spawners(&self) -> bool {
        self.spawner_count() > 1
    }

    /// Move the selection to the next discovered spawner, wrapping around
    pub fn select_next_spawner(&mut self) {
        let n = self.islands.len();
        let next = (1..=n)
            .map(|offset| (self.selected_spawner + offset) % n)
            .find(|&i| self.islands[i].is_usable_spawner());
        if let Some(next) = next {
            self.selected_spawner = next;
            log::debug!("Selected spawner {}", self.islands[next].name);
        }
    }

    /// Shops that haven't received a delivery yet
    pub fn outstanding_goals(&self) -> usize {
        self.islands
            .iter()
            .filter(|i| matches!(i.kind, IslandKind::Shop { deliveries: 0, .. }))
            .count()
    }
}

impl LandingHook for Level {
    fn interact(&mut self, strip: StripId, vehicle: &mut Vehicle) {
        match self.islands.get_mut(strip.0 as usize) {
            Some(island) => island.interact(vehicle),
            None => log::warn!("Landing on unknown strip {strip:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::VehicleClass;
    use crate::sim::physics::KinematicWorld;
    use crate::sim::vehicle::VehicleId;

    fn island(name: &str, x: f32, kind: IslandKind) -> Island {
        Island::new(name, Vec2::new(x, 100.0), Vec2::new(x + 40.0, 100.0), kind)
    }

    fn level() -> Level {
        Level::new(vec![
            island("cacti", 0.0, IslandKind::Plain),
            island("home", 100.0, IslandKind::Spawner { discovered: true }),
            island("lake", 200.0, IslandKind::Producer { good: Good::Water }),
            island(
                "shop",
                300.0,
                IslandKind::Shop {
                    good: Good::Water,
                    deliveries: 0,
                },
            ),
            island("outpost", 400.0, IslandKind::Spawner { discovered: false }),
        ])
        .unwrap()
    }

    fn vehicle(world: &mut KinematicWorld) -> Vehicle {
        Vehicle::spawn(
            world,
            VehicleId(1),
            VehicleClass::Reversible,
            VehicleClass::Reversible.default_tuning(),
            Vec2::ZERO,
        )
    }

    #[test]
    fn test_requires_discovered_spawner() {
        let result = Level::new(vec![island(
            "outpost",
            0.0,
            IslandKind::Spawner { discovered: false },
        )]);
        assert!(matches!(result, Err(Error::InvalidLevel(_))));
    }

    #[test]
    fn test_first_discovered_spawner_selected() {
        let level = level();
        assert_eq!(level.selected_spawner().name, "home");
        assert_eq!(level.selected_spawn_point(), Vec2::new(120.0, 100.0));
        assert!(!level.has_multiple_spawners());
    }

    #[test]
    fn test_strips_follow_island_order() {
        let strips = level().strips();
        assert_eq!(strips.len(), 5);
        assert_eq!(strips[3].id, StripId(3));
        assert_eq!(strips[3].midpoint(), Vec2::new(320.0, 100.0));
    }

    #[test]
    fn test_landing_discovers_spawner_and_cycles() {
        let mut world = KinematicWorld::new(1.0 / 60.0, 0.0);
        let mut v = vehicle(&mut world);
        let mut level = level();

        level.select_next_spawner();
        assert_eq!(level.selected_spawner().name, "home");

        level.interact(StripId(4), &mut v);
        assert!(level.has_multiple_spawners());
        level.select_next_spawner();
        assert_eq!(level.selected_spawner().name, "outpost");
        level.select_next_spawner();
        assert_eq!(level.selected_spawner().name, "home");
    }

    #[test]
    fn test_delivery_run() {
        let mut world = KinematicWorld::new(1.0 / 60.0, 0.0);
        let mut v = vehicle(&mut world);
        let mut level = level();
        assert_eq!(level.outstanding_goals(), 1);

        // Nothing to deliver yet
        level.interact(StripId(3), &mut v);
        assert_eq!(level.outstanding_goals(), 1);

        level.interact(StripId(2), &mut v);
        assert_eq!(v.cargo(), Some(Good::Water));
        // Full slot: producer is a no-op
        level.interact(StripId(2), &mut v);
        assert_eq!(v.cargo(), Some(Good::Water));

        level.interact(StripId(3), &mut v);
        assert_eq!(v.cargo(), None);
        assert_eq!(level.outstanding_goals(), 0);
        assert!(matches!(
            level.island(StripId(3)).unwrap().kind,
            IslandKind::Shop { deliveries: 1, .. }
        ));
    }

    #[test]
    fn test_wrong_good_not_taken() {
        let mut world = KinematicWorld::new(1.0 / 60.0, 0.0);
        let mut v = vehicle(&mut world);
        let mut level = level();
        assert!(v.try_store_good(Good::Ore));
        level.interact(StripId(3), &mut v);
        assert_eq!(v.cargo(), Some(Good::Ore));
        assert_eq!(level.outstanding_goals(), 1);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "islands": [
                {"name": "home", "landing_line": {"a": [0, 0], "b": [40, 0]},
                 "kind": {"type": "spawner", "discovered": true}},
                {"name": "shop", "landing_line": {"a": [100, 0], "b": [140, 0]},
                 "kind": {"type": "shop", "good": "food"}}
            ]
        }"#;
        let level = Level::from_json(json).unwrap();
        assert_eq!(level.islands().len(), 2);
        assert_eq!(
            level.islands()[1].kind,
            IslandKind::Shop {
                good: Good::Food,
                deliveries: 0
            }
        );
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(Level::from_json("{"), Err(Error::Json(_))));
    }
}
