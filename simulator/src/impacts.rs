use bevy::prelude::*;
use ocean::{register_impact, ImpactOutcome};
use tracing::{debug, warn};

use crate::config::ScriptedImpact;
use crate::vessel::{SimClock, Vessel, VesselBody, VesselStateComp};

/// A collision reported against a vessel's hull. `contact` is in world space.
#[derive(Event, Debug, Clone, Copy)]
pub struct HullImpact {
    pub vessel: Entity,
    pub speed: f32,
    pub contact: Vec3,
}

/// Impacts still waiting for their time, latest first.
#[derive(Resource, Debug, Default)]
pub struct ImpactScript {
    pending: Vec<ScriptedImpact>,
}

impl ImpactScript {
    pub fn new(mut impacts: Vec<ScriptedImpact>) -> Self {
        impacts.sort_by(|a, b| b.at_s.total_cmp(&a.at_s));
        Self { pending: impacts }
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

pub fn fire_scripted_impacts(
    clock: Res<SimClock>,
    mut script: ResMut<ImpactScript>,
    q_vessel: Query<(Entity, &VesselStateComp), With<Vessel>>,
    mut impacts: EventWriter<HullImpact>,
) {
    let now = clock.seconds();
    while script.pending.last().is_some_and(|i| i.at_s <= now) {
        let Some(scripted) = script.pending.pop() else {
            break;
        };
        for (entity, state) in &q_vessel {
            let contact = state.0.position + state.0.orientation * scripted.offset;
            impacts.write(HullImpact { vessel: entity, speed: scripted.speed, contact });
        }
    }
}

pub fn apply_hull_impacts(
    clock: Res<SimClock>,
    mut impacts: EventReader<HullImpact>,
    mut q_vessel: Query<(&VesselBody, &mut VesselStateComp), With<Vessel>>,
) {
    for impact in impacts.read() {
        let Ok((body, mut state)) = q_vessel.get_mut(impact.vessel) else {
            warn!(?impact, "Impact for a vessel that no longer exists");
            continue;
        };
        let outcome = register_impact(&body.0, &mut state.0, impact.speed, impact.contact, clock.seconds());
        if let ImpactOutcome::Breached { radius } = outcome {
            debug!(vessel = ?impact.vessel, radius, breaches = state.0.flooding.breaches.len(), "Impact applied");
        }
    }
}
