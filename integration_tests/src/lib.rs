#[cfg(test)]
mod integration {
    use anyhow::Result;
    use bevy_app::{App, AppExit};
    use bevy_math::Vec3;
    use bevy_time::{Fixed, Time};
    use ocean::{vesselspecs, VesselState};
    use simulator::{
        build_sim_app, Config, ControlLink, ScriptedImpact, ShipControls, SimClock,
        TelemetryBoard, VesselConfig, VesselStateComp, WorkerPool,
    };

    const TICK_HZ: f64 = 60.0;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }

    fn calm_config() -> Config {
        Config {
            tick_hz: TICK_HZ,
            duration_s: None,
            worker_threads: 2,
            telemetry_interval_s: 0.0,
            sea_preset: Some("calm".to_string()),
            vessel: VesselConfig {
                preset: vesselspecs::PATROL_BOAT.to_string(),
                spawn: Vec3::ZERO,
                heading_deg: 0.0,
            },
            controls: Some(ShipControls { ignition: true, throttle: 50.0, steering: 0.0 }),
            ..Config::default()
        }
    }

    fn build(cfg: Config) -> Result<App> {
        let mut app = build_sim_app(cfg)?;
        app.finish();
        app.cleanup();
        Ok(app)
    }

    fn ticks(app: &App) -> u64 {
        app.world().resource::<SimClock>().ticks
    }

    /// Update until `n` more fixed ticks have run.
    fn run_ticks(app: &mut App, n: u64) {
        let target = ticks(app) + n;
        let mut updates = 0;
        while ticks(app) < target {
            app.update();
            updates += 1;
            assert!(updates <= n + 10, "fixed schedule stalled at tick {}", ticks(app));
        }
    }

    fn vessel(app: &mut App) -> VesselState {
        let mut q = app.world_mut().query::<&VesselStateComp>();
        let world = app.world();
        let mut it = q.iter(world);
        let state = it.next().expect("one vessel").0.clone();
        assert!(it.next().is_none(), "expected exactly one vessel");
        state
    }

    #[test]
    fn one_update_is_one_fixed_tick() -> Result<()> {
        init_tracing();
        let mut app = build(calm_config())?;
        let step = app.world().resource::<Time<Fixed>>().timestep();
        assert!((step.as_secs_f64() - 1.0 / TICK_HZ).abs() < 1e-9);
        // First update only primes the clock.
        app.update();
        let start = ticks(&app);
        for _ in 0..10 {
            app.update();
        }
        assert_eq!(ticks(&app) - start, 10);
        let clock = *app.world().resource::<SimClock>();
        assert!((clock.elapsed - clock.ticks as f64 / TICK_HZ).abs() < 1e-6);
        assert_eq!(app.world().resource::<WorkerPool>().0.current_num_threads(), 2);
        Ok(())
    }

    #[test]
    fn boat_makes_way_under_half_throttle() -> Result<()> {
        init_tracing();
        let mut app = build(calm_config())?;
        run_ticks(&mut app, 20 * TICK_HZ as u64);

        let state = vessel(&mut app);
        assert!(state.submerged);
        assert!(state.engines.iter().all(|e| e.ignition));
        for e in &state.engines {
            assert!((e.rpm - 2500.0).abs() < 1.0, "rpm={}", e.rpm);
        }
        // Heading 0 means bow along +Z.
        assert!(state.position.z > 3.0, "only reached z={}", state.position.z);
        assert!(state.position.x.abs() < 0.5, "drifted sideways to x={}", state.position.x);
        let levels = state.tank_levels();
        assert!(levels.iter().all(|&l| l < 100.0 && l > 90.0), "tanks={levels:?}");
        assert!((levels[0] - levels[1]).abs() < 1e-4);
        Ok(())
    }

    #[test]
    fn scripted_impacts_hole_the_hull_and_add_mass() -> Result<()> {
        init_tracing();
        let cfg = Config {
            controls: Some(ShipControls::default()),
            impacts: vec![
                ScriptedImpact { at_s: 1.0, speed: 15.0, offset: Vec3::new(0.0, -0.6, 0.0) },
                ScriptedImpact { at_s: 2.0, speed: 5.0, offset: Vec3::new(1.2, -0.4, 2.0) },
            ],
            ..calm_config()
        };
        let mut app = build(cfg)?;
        let dry_mass = vesselspecs::patrol_boat_spec().mass;

        run_ticks(&mut app, 30);
        assert!(vessel(&mut app).flooding.breaches.is_empty());

        run_ticks(&mut app, 10 * TICK_HZ as u64);
        let state = vessel(&mut app);
        assert_eq!(state.flooding.breaches.len(), 1, "glancing impact must not breach");
        let breach = state.flooding.breaches[0];
        assert!((breach.radius - 1.5).abs() < 1e-5);
        assert!((breach.local_pos - Vec3::new(0.0, -0.6, 0.0)).length() < 1e-4);
        assert!(state.mass > dry_mass + 100.0, "mass={}", state.mass);

        let snap = app.world().resource::<TelemetryBoard>().snapshot();
        assert_eq!(snap.breaches, 1);
        assert!((snap.mass - state.mass).abs() < 1e-3);
        assert!((snap.flooded_mass - (state.mass - dry_mass)).abs() < 1e-2);
        Ok(())
    }

    #[test]
    fn missing_controls_degrade_instead_of_stopping() -> Result<()> {
        init_tracing();
        let cfg = Config { controls: None, ..calm_config() };
        let mut app = build(cfg)?;

        run_ticks(&mut app, 30);
        assert!(app.world().resource::<ControlLink>().degraded);
        let state = vessel(&mut app);
        assert!(!state.any_engine_running());
        assert!(state.position.is_finite());
        assert!(app.world().resource::<TelemetryBoard>().snapshot().controls_degraded);

        // Control source comes online.
        app.insert_resource(ShipControls { ignition: true, throttle: 60.0, steering: 0.0 });
        run_ticks(&mut app, 120);
        assert!(!app.world().resource::<ControlLink>().degraded);
        let running = vessel(&mut app);
        assert!(running.any_engine_running());
        assert!(running.engines.iter().all(|e| e.rpm > 2000.0));

        // And drops out again: the helm holds.
        app.world_mut().remove_resource::<ShipControls>();
        run_ticks(&mut app, 120);
        let link = *app.world().resource::<ControlLink>();
        assert!(link.degraded);
        assert_eq!(link.inputs.throttle, 60.0);
        let held = vessel(&mut app);
        assert!(held.any_engine_running());
        for e in &held.engines {
            assert!((e.rpm - 3000.0).abs() < 1.0, "rpm={}", e.rpm);
        }
        Ok(())
    }

    #[test]
    fn telemetry_is_readable_off_thread() -> Result<()> {
        init_tracing();
        let mut app = build(calm_config())?;
        let board = app.world().resource::<TelemetryBoard>().clone();
        run_ticks(&mut app, 90);
        let expected = ticks(&app);

        let snap = std::thread::spawn(move || board.snapshot())
            .join()
            .expect("reader thread");
        assert_eq!(snap.tick, expected);
        assert_eq!(snap.rpm.len(), 2);
        assert_eq!(snap.fuel_per_tank.len(), 2);
        assert!(snap.submerged && snap.submerged_count == 8);
        Ok(())
    }

    #[test]
    fn run_stops_after_configured_duration() -> Result<()> {
        init_tracing();
        let cfg = Config { duration_s: Some(1.0), ..calm_config() };
        let mut app = build(cfg)?;
        let mut updates = 0;
        while app.should_exit().is_none() {
            app.update();
            updates += 1;
            assert!(updates < 200, "app never asked to exit");
        }
        assert_eq!(app.should_exit(), Some(AppExit::Success));
        let clock = *app.world().resource::<SimClock>();
        assert!(clock.elapsed >= 1.0 && clock.elapsed < 1.1, "elapsed={}", clock.elapsed);
        Ok(())
    }
}
