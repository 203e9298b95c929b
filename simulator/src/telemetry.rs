use std::sync::Arc;

use bevy::prelude::*;
use parking_lot::RwLock;
use tracing::info;

use crate::controls::ControlLink;
use crate::vessel::{SimClock, Vessel, VesselStateComp};

/// Latest observable state of the lead vessel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetrySnapshot {
    pub tick: u64,
    pub time_s: f32,
    pub position: Vec3,
    pub speed: f32,
    pub mass: f32,
    pub submerged: bool,
    pub submerged_count: usize,
    pub rpm: Vec<f32>,
    pub ignition: Vec<bool>,
    pub propulsion: Vec<f32>,
    pub fuel_per_tank: Vec<f32>,
    pub breaches: usize,
    pub flooded_mass: f32,
    /// Running on last-known controls.
    pub controls_degraded: bool,
}

/// Shared handle to the snapshot. Cloned out of the app so other threads can
/// read telemetry without touching the ECS world.
#[derive(Resource, Clone, Default)]
pub struct TelemetryBoard(Arc<RwLock<TelemetrySnapshot>>);

impl TelemetryBoard {
    pub fn snapshot(&self) -> TelemetrySnapshot {
        self.0.read().clone()
    }

    fn publish(&self, snapshot: TelemetrySnapshot) {
        *self.0.write() = snapshot;
    }
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct TelemetryLog {
    pub interval_s: f32,
    next_at: f32,
}

impl TelemetryLog {
    pub fn every(interval_s: f32) -> Self {
        Self { interval_s, next_at: 0.0 }
    }
}

pub fn publish_telemetry(
    clock: Res<SimClock>,
    link: Res<ControlLink>,
    board: Res<TelemetryBoard>,
    mut log: ResMut<TelemetryLog>,
    q_vessel: Query<&VesselStateComp, With<Vessel>>,
) {
    let Some(state) = q_vessel.iter().next() else {
        return;
    };
    let s = &state.0;
    let snapshot = TelemetrySnapshot {
        tick: clock.ticks,
        time_s: clock.seconds(),
        position: s.position,
        speed: s.speed(),
        mass: s.mass,
        submerged: s.submerged,
        submerged_count: s.submerged_count,
        rpm: s.engines.iter().map(|e| e.rpm).collect(),
        ignition: s.engines.iter().map(|e| e.ignition).collect(),
        propulsion: s.engines.iter().map(|e| e.propulsion).collect(),
        fuel_per_tank: s.tank_levels(),
        breaches: s.flooding.breaches.len(),
        flooded_mass: s.flooding.flooded_mass,
        controls_degraded: link.degraded,
    };

    if log.interval_s > 0.0 && snapshot.time_s >= log.next_at {
        log.next_at = snapshot.time_s + log.interval_s;
        info!(
            tick = snapshot.tick,
            t = snapshot.time_s,
            pos = ?snapshot.position,
            speed = snapshot.speed,
            mass = snapshot.mass,
            submerged = snapshot.submerged_count,
            rpm = ?snapshot.rpm,
            fuel = ?snapshot.fuel_per_tank,
            breaches = snapshot.breaches,
            "Vessel telemetry"
        );
    }
    board.publish(snapshot);
}
