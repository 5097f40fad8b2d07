use alpinegen::{
    config::ResortConfig,
    engine::Engine,
    resort::{Resort, INCIDENT_HISTORY_CAP},
    systems::lifts::expected_wait_minutes,
};

fn build(config: &ResortConfig) -> (Engine, Resort) {
    let mut engine = Engine::standard(config);
    let resort = engine.build_resort(config);
    (engine, resort)
}

#[test]
fn bounded_fields_stay_in_domain_over_many_ticks() {
    let config = ResortConfig::default();
    let (mut engine, mut resort) = build(&config);

    for _ in 0..500 {
        engine.tick(&mut resort).expect("tick succeeds");

        let weather = resort.weather();
        assert!((-15.0..=5.0).contains(&weather.temperature));
        assert!((0.0..=80.0).contains(&weather.wind_speed));
        assert!((0.0..=5.0).contains(&weather.snow_intensity));
        assert!((50.0..=10000.0).contains(&weather.visibility));

        let safety = resort.safety();
        assert!((0.0..=1.0).contains(&safety.avalanche_risk_index));
        assert!(safety.incident_reports.len() <= INCIDENT_HISTORY_CAP);

        for lift in resort.lifts() {
            assert!(lift.queue_length <= 200);
            assert!(lift.wait_time_minutes >= 0.0);
        }
        for slope in resort.slopes() {
            assert!(slope.snow_depth_cm >= 0.0);
        }
    }
}

#[test]
fn wait_time_is_always_the_derived_function() {
    let config = ResortConfig::default();
    let (mut engine, mut resort) = build(&config);

    for _ in 0..200 {
        engine.tick(&mut resort).expect("tick succeeds");
        for lift in resort.lifts() {
            assert_eq!(
                lift.wait_time_minutes,
                expected_wait_minutes(lift.status, lift.queue_length, lift.throughput_rate),
                "lift {} drifted off its derived wait time",
                lift.lift_id
            );
        }
    }
}

#[test]
fn entity_sets_are_fixed_for_the_process_lifetime() {
    let config = ResortConfig::default();
    let (mut engine, mut resort) = build(&config);

    let lift_ids: Vec<String> = resort.lifts().iter().map(|l| l.lift_id.clone()).collect();
    let throughputs: Vec<u32> = resort.lifts().iter().map(|l| l.throughput_rate).collect();
    let slope_ids: Vec<String> = resort.slopes().iter().map(|s| s.slope_id.clone()).collect();
    let difficulties: Vec<_> = resort.slopes().iter().map(|s| s.difficulty).collect();

    engine.run(&mut resort, 300).expect("run succeeds");

    assert_eq!(
        resort.lifts().iter().map(|l| l.lift_id.clone()).collect::<Vec<_>>(),
        lift_ids
    );
    assert_eq!(
        resort.lifts().iter().map(|l| l.throughput_rate).collect::<Vec<_>>(),
        throughputs
    );
    assert_eq!(
        resort.slopes().iter().map(|s| s.slope_id.clone()).collect::<Vec<_>>(),
        slope_ids
    );
    assert_eq!(
        resort.slopes().iter().map(|s| s.difficulty).collect::<Vec<_>>(),
        difficulties
    );
}

#[test]
fn snapshot_without_update_is_identical() {
    let config = ResortConfig::default();
    let (mut engine, mut resort) = build(&config);
    engine.run(&mut resort, 10).expect("run succeeds");

    let first = resort.state();
    let second = resort.state();
    assert_eq!(first, second);
}

#[test]
fn timestamps_reflect_the_latest_tick() {
    let config = ResortConfig::default();
    let (mut engine, mut resort) = build(&config);
    engine.run(&mut resort, 3).expect("run succeeds");

    let state = resort.state();
    assert_eq!(state.weather.timestamp, state.timestamp);
    assert_eq!(state.safety.timestamp, state.timestamp);
    for lift in &state.lifts {
        assert_eq!(lift.timestamp, state.timestamp);
    }
    for slope in &state.slopes {
        assert_eq!(slope.timestamp, state.timestamp);
    }
}

#[test]
fn seeded_runs_agree_on_numeric_state() {
    let mut config = ResortConfig::default();
    config.seed = 7;
    let (mut engine_a, mut resort_a) = build(&config);
    let (mut engine_b, mut resort_b) = build(&config);

    engine_a.run(&mut resort_a, 50).expect("run succeeds");
    engine_b.run(&mut resort_b, 50).expect("run succeeds");

    assert_eq!(resort_a.weather().temperature, resort_b.weather().temperature);
    assert_eq!(resort_a.weather().wind_speed, resort_b.weather().wind_speed);
    assert_eq!(resort_a.weather().visibility, resort_b.weather().visibility);
    assert_eq!(
        resort_a.avalanche_risk_index(),
        resort_b.avalanche_risk_index()
    );
    for (a, b) in resort_a.lifts().iter().zip(resort_b.lifts()) {
        assert_eq!(a.queue_length, b.queue_length);
        assert_eq!(a.status, b.status);
        assert_eq!(a.wait_time_minutes, b.wait_time_minutes);
    }
    for (a, b) in resort_a.slopes().iter().zip(resort_b.slopes()) {
        assert_eq!(a.snow_depth_cm, b.snow_depth_cm);
        assert_eq!(a.is_open, b.is_open);
        assert_eq!(a.groomed, b.groomed);
    }
    assert_eq!(
        resort_a.safety().incident_reports.len(),
        resort_b.safety().incident_reports.len()
    );
}
