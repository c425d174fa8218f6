//! Collision consequences
//!
//! The engine reports collision-start pairs; this decides who survives.
//! Two vehicles touching always destroys both. A vehicle bumping terrain
//! only explodes if its weighted impact speed (`15 * spin + speed`) exceeds
//! its class crash threshold, so gentle touch-downs survive.

use super::physics::{BodyHandle, Contact, PhysicsEngine};
use super::vehicle::{Vehicle, VehicleId};

/// Why a vehicle was destroyed by a collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CrashCause {
    /// Hit another vehicle
    VehicleCollision(VehicleId),
    /// Hit terrain too hard
    TerrainImpact { severity: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crash {
    pub vehicle: VehicleId,
    pub cause: CrashCause,
}

fn find(vehicles: &[&mut Vehicle], body: BodyHandle) -> Option<usize> {
    vehicles.iter().position(|v| v.body() == body)
}

/// Apply collision rules to a batch of contacts.
///
/// Returns one `Crash` per vehicle destroyed by this batch. Contacts that
/// involve no known vehicle are ignored; already destroyed vehicles are
/// left alone.
pub fn resolve_contacts(
    engine: &mut dyn PhysicsEngine,
    contacts: &[Contact],
    vehicles: &mut [&mut Vehicle],
) -> Vec<Crash> {
    let mut crashes = Vec::new();

    for contact in contacts {
        match (find(vehicles, contact.a), find(vehicles, contact.b)) {
            (Some(ia), Some(ib)) if ia != ib => {
                let (id_a, id_b) = (vehicles[ia].id(), vehicles[ib].id());
                if vehicles[ia].explode(engine) {
                    crashes.push(Crash {
                        vehicle: id_a,
                        cause: CrashCause::VehicleCollision(id_b),
                    });
                }
                if vehicles[ib].explode(engine) {
                    crashes.push(Crash {
                        vehicle: id_b,
                        cause: CrashCause::VehicleCollision(id_a),
                    });
                }
            }
            (Some(i), None) | (None, Some(i)) => {
                let vehicle = &mut *vehicles[i];
                if vehicle.is_destroyed() || vehicle.survives_terrain_impact() {
                    continue;
                }
                let severity = vehicle.impact_severity();
                if vehicle.explode(engine) {
                    crashes.push(Crash {
                        vehicle: vehicle.id(),
                        cause: CrashCause::TerrainImpact { severity },
                    });
                }
            }
            _ => {}
        }
    }

    crashes
}
