use alpinegen::{config::ResortConfig, engine::Engine, models::SlopeDifficulty, resort::Resort};

/// Config where nothing moves unless a test turns it back on.
fn still_config() -> ResortConfig {
    let mut config = ResortConfig::default();
    config.weather.temperature_drift = 0.0;
    config.weather.wind_speed_drift = 0.0;
    config.weather.snow_intensity_drift = 0.0;
    config.weather.visibility_drift = 0.0;
    config.lifts.queue_drift = 0;
    config.lifts.status_change_probability = 0.0;
    config.safety.risk_drift = 0.0;
    config.safety.incident_probability = 0.0;
    config.slopes.depth_drift = 0.0;
    config.slopes.reopen_probability = 0.0;
    config.slopes.groom_probability = 0.0;
    config.slopes.ungroom_probability = 0.0;
    config
}

fn build(config: &ResortConfig) -> (Engine, Resort) {
    let mut engine = Engine::standard(config);
    let resort = engine.build_resort(config);
    (engine, resort)
}

#[test]
fn extreme_avalanche_risk_closes_black_runs_only() {
    let config = still_config();
    let (mut engine, mut resort) = build(&config);
    resort.set_avalanche_risk_index(0.9);

    engine.tick(&mut resort).expect("tick succeeds");

    for slope in resort.slopes() {
        match slope.difficulty {
            SlopeDifficulty::Black => assert!(!slope.is_open, "{} should close", slope.name),
            _ => assert!(slope.is_open, "{} should stay open", slope.name),
        }
    }
}

#[test]
fn storm_wind_closes_advanced_terrain() {
    let config = still_config();
    let (mut engine, mut resort) = build(&config);
    resort.weather_mut().wind_speed = 70.0;

    engine.tick(&mut resort).expect("tick succeeds");

    for slope in resort.slopes() {
        if slope.difficulty.is_advanced() {
            assert!(!slope.is_open, "{} should close in storm wind", slope.name);
        } else {
            assert!(slope.is_open, "{} should stay open", slope.name);
        }
    }
}

#[test]
fn reopen_never_succeeds_while_a_closure_condition_holds() {
    let mut config = still_config();
    config.slopes.reopen_probability = 1.0;
    let (mut engine, mut resort) = build(&config);
    resort.set_avalanche_risk_index(0.9);

    // Risk does not drift, so the closure condition holds on every tick and
    // the guaranteed reopen attempt must keep failing.
    for _ in 0..50 {
        engine.tick(&mut resort).expect("tick succeeds");
        for slope in resort.slopes() {
            if slope.difficulty == SlopeDifficulty::Black {
                assert!(!slope.is_open);
            }
        }
    }
}

#[test]
fn reopen_succeeds_once_conditions_clear() {
    let mut config = still_config();
    config.slopes.reopen_probability = 1.0;
    let (mut engine, mut resort) = build(&config);

    resort.set_avalanche_risk_index(0.9);
    engine.tick(&mut resort).expect("tick succeeds");
    assert!(resort
        .slopes()
        .iter()
        .filter(|s| s.difficulty == SlopeDifficulty::Black)
        .all(|s| !s.is_open));

    resort.set_avalanche_risk_index(0.2);
    engine.tick(&mut resort).expect("tick succeeds");
    assert!(resort
        .slopes()
        .iter()
        .filter(|s| s.difficulty == SlopeDifficulty::Black)
        .all(|s| s.is_open));
}

#[test]
fn grooming_only_applies_to_easy_terrain() {
    let mut config = still_config();
    config.slopes.groom_probability = 1.0;
    let (mut engine, mut resort) = build(&config);

    engine.tick(&mut resort).expect("tick succeeds");

    for slope in resort.slopes() {
        if slope.difficulty.is_groomable() {
            assert!(slope.groomed, "{} should be groomed", slope.name);
        } else {
            assert!(!slope.groomed, "{} should never be groomed", slope.name);
        }
    }
}

#[test]
fn groomed_slopes_can_lose_grooming() {
    let mut config = still_config();
    config.slopes.ungroom_probability = 1.0;
    let (mut engine, mut resort) = build(&config);
    for slope in resort.slopes_mut() {
        slope.groomed = true;
    }

    engine.tick(&mut resort).expect("tick succeeds");

    // Groom attempt first (probability 0 here), so the ungroom roll runs
    // for every groomed slope.
    assert!(resort.slopes().iter().all(|slope| !slope.groomed));
}

#[test]
fn heavy_snowfall_accumulates_on_slopes() {
    let config = still_config();
    let (mut engine, mut resort) = build(&config);
    resort.weather_mut().snow_intensity = 4.0;
    let before: Vec<f64> = resort.slopes().iter().map(|s| s.snow_depth_cm).collect();

    engine.tick(&mut resort).expect("tick succeeds");

    for (slope, depth_before) in resort.slopes().iter().zip(before) {
        let expected = ((depth_before + 0.4) * 10.0).round() / 10.0;
        assert!(
            (slope.snow_depth_cm - expected).abs() < 1e-9,
            "{}: {} vs {}",
            slope.name,
            slope.snow_depth_cm,
            expected
        );
    }
}
