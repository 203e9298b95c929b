use std::sync::Arc;

use anyhow::{Context, Result};
use bevy::prelude::*;
use ocean::{step_vessel_dbg, Sea, VesselSpec, VesselState, VesselStepDebug};

use crate::controls::ControlLink;

#[derive(Component)]
pub struct Vessel;

#[derive(Component, Clone)]
pub struct VesselBody(pub VesselSpec);

#[derive(Component, Debug, Clone)]
pub struct VesselStateComp(pub VesselState);

/// Per-term breakdown of the last physics tick.
#[derive(Component, Debug, Clone, Default)]
pub struct VesselTelemetry(pub VesselStepDebug);

#[derive(Resource)]
pub struct SeaRes(pub Sea);

/// Bounded pool the wave sampling runs on. Every tick's parallel-for is
/// joined inside `install` before forces are summed.
#[derive(Resource, Clone)]
pub struct WorkerPool(pub Arc<rayon::ThreadPool>);

impl WorkerPool {
    pub fn new(threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("wave-sampler-{i}"))
            .build()
            .context("building wave sampling pool")?;
        Ok(Self(Arc::new(pool)))
    }
}

/// Simulated time, advanced once per fixed tick.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct SimClock {
    pub ticks: u64,
    pub elapsed: f64,
}

impl SimClock {
    pub fn seconds(&self) -> f32 {
        self.elapsed as f32
    }
}

pub fn spawn_vessel(world: &mut World, spec: VesselSpec, state: VesselState) -> Entity {
    world
        .spawn((Vessel, VesselBody(spec), VesselStateComp(state), VesselTelemetry::default()))
        .id()
}

pub fn step_vessels(
    time: Res<Time>,
    sea: Res<SeaRes>,
    link: Res<ControlLink>,
    pool: Res<WorkerPool>,
    clock: Res<SimClock>,
    mut q_vessel: Query<(&VesselBody, &mut VesselStateComp, &mut VesselTelemetry), With<Vessel>>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    let t = clock.seconds();
    let inputs = link.inputs;
    for (body, mut state_comp, mut telemetry) in &mut q_vessel {
        let state = &mut state_comp.0;
        let mut dbg = VesselStepDebug::default();
        pool.0
            .install(|| step_vessel_dbg(&sea.0, &body.0, inputs, state, dt, t, Some(&mut dbg)));
        telemetry.0 = dbg;
    }
}

pub fn advance_clock(time: Res<Time>, mut clock: ResMut<SimClock>) {
    clock.ticks += 1;
    clock.elapsed += time.delta_secs_f64();
}
