//! Headless fixed-timestep runner around the `ocean` physics core.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use ocean::{vesselspecs, Quatf, Sea, VesselState};
use tracing::{info, warn};

pub mod args;
pub mod config;
pub mod controls;
pub mod impacts;
pub mod telemetry;
pub mod vessel;

pub use args::Args;
pub use config::{load_config, Config, ScriptedImpact, VesselConfig};
pub use controls::{ControlLink, ShipControls};
pub use impacts::{HullImpact, ImpactScript};
pub use telemetry::{TelemetryBoard, TelemetrySnapshot};
pub use vessel::{SimClock, Vessel, VesselBody, VesselStateComp, VesselTelemetry, WorkerPool};

use controls::resolve_controls;
use impacts::{apply_hull_impacts, fire_scripted_impacts};
use telemetry::{publish_telemetry, TelemetryLog};
use vessel::{advance_clock, spawn_vessel, step_vessels, SeaRes};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimSet {
    Input,
    Physics,
    Report,
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct RunLimit {
    pub duration_s: Option<f32>,
}

/// Build the simulation app: one vessel from `cfg`, physics on `FixedUpdate`.
/// Fails only on an invalid configuration.
pub fn build_sim_app(cfg: Config) -> Result<App> {
    if !(cfg.tick_hz > 0.0) || !cfg.tick_hz.is_finite() {
        bail!("tick_hz must be positive, got {}", cfg.tick_hz);
    }
    let spec = vesselspecs::by_name(&cfg.vessel.preset).with_context(|| {
        format!(
            "unknown vessel preset `{}` (known: {:?})",
            cfg.vessel.preset,
            vesselspecs::names()
        )
    })?;
    let sea = Sea::from_spec(&cfg.resolved_sea()?).context("building sea")?;
    if let Some(interval_s) = sea.currents.update_interval_s() {
        warn!(interval_s, "Current update interval is set but the grid is static; ignoring");
    }
    let orientation = Quatf::from_rotation_y(cfg.vessel.heading_deg.to_radians());
    let state = VesselState::new(&spec, cfg.vessel.spawn, orientation)
        .with_context(|| format!("spawning vessel `{}`", spec.name))?;
    let pool = WorkerPool::new(cfg.worker_threads)?;

    let tick = Duration::from_secs_f64(1.0 / cfg.tick_hz);
    let mut app = App::new();
    if cfg.realtime {
        app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(tick)));
    } else {
        // One update is exactly one tick.
        app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::ZERO)));
        app.insert_resource(TimeUpdateStrategy::ManualDuration(tick));
    }

    app.insert_resource(Time::<Fixed>::from_hz(cfg.tick_hz))
        .insert_resource(Time::<Virtual>::from_max_delta(tick.max(Duration::from_millis(250))))
        .insert_resource(SeaRes(sea))
        .insert_resource(pool)
        .insert_resource(ImpactScript::new(cfg.impacts.clone()))
        .insert_resource(TelemetryLog::every(cfg.telemetry_interval_s))
        .insert_resource(RunLimit { duration_s: cfg.duration_s })
        .init_resource::<ControlLink>()
        .init_resource::<SimClock>()
        .init_resource::<TelemetryBoard>()
        .add_event::<HullImpact>()
        .configure_sets(FixedUpdate, (SimSet::Input, SimSet::Physics, SimSet::Report).chain())
        .add_systems(
            FixedUpdate,
            (resolve_controls, fire_scripted_impacts, apply_hull_impacts)
                .chain()
                .in_set(SimSet::Input),
        )
        .add_systems(FixedUpdate, (step_vessels, advance_clock).chain().in_set(SimSet::Physics))
        .add_systems(
            FixedUpdate,
            (publish_telemetry, stop_after_duration).chain().in_set(SimSet::Report),
        );

    if let Some(controls) = cfg.controls {
        app.insert_resource(controls);
    }
    let entity = spawn_vessel(app.world_mut(), spec, state);
    info!(?entity, vessel = %cfg.vessel.preset, tick_hz = cfg.tick_hz, "Simulation ready");
    app.insert_resource(cfg);
    Ok(app)
}

fn stop_after_duration(
    clock: Res<SimClock>,
    limit: Res<RunLimit>,
    mut exit: EventWriter<AppExit>,
    mut done: Local<bool>,
) {
    let Some(duration_s) = limit.duration_s else {
        return;
    };
    if !*done && clock.seconds() >= duration_s {
        *done = true;
        info!(ticks = clock.ticks, t = clock.seconds(), "Run duration reached; exiting");
        exit.write(AppExit::Success);
    }
}
