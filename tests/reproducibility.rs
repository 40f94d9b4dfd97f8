use tourga::prelude::*;

fn ring(n: usize) -> Vec<City> {
    (0..n)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::TAU / n as f64;
            City::new(angle.cos() * 100.0, angle.sin() * 100.0)
        })
        .collect()
}

fn start(seed: u64, cities: &[City]) -> SearchController {
    let mut search = SearchController::new(SearchConfig::builder().seed(seed).build());
    search.begin_building().unwrap();
    for &city in cities {
        search.add_city(city).unwrap();
    }
    search.start().unwrap();
    search
}

// H0: Different seeds produce identical trajectories
// Falsification: Run seeds 42, 43, 44 on the same cities; compare populations
#[test]
fn h0_1_different_seeds_produce_different_populations() {
    let cities = ring(10);
    let outputs: Vec<String> = [42, 43, 44]
        .into_iter()
        .map(|seed| {
            let mut search = start(seed, &cities);
            search.step().unwrap();
            serde_json::to_string(search.population()).unwrap()
        })
        .collect();

    assert_ne!(outputs[0], outputs[1], "Seed 42 and 43 produced identical output");
    assert_ne!(outputs[1], outputs[2], "Seed 43 and 44 produced identical output");
    assert_ne!(outputs[0], outputs[2], "Seed 42 and 44 produced identical output");
}

// H0: The same seed produces different trajectories across runs
// Falsification: Run 20 searches with seed=42; every state must match the first
#[test]
fn h0_2_same_seed_produces_identical_trajectories() {
    let cities = ring(9);
    let reference = {
        let mut search = start(42, &cities);
        search.run_until_done(200).unwrap();
        (
            serde_json::to_string(search.state()).unwrap(),
            search.history().to_vec(),
            search.best_tour(),
        )
    };

    for run in 0..20 {
        let mut search = start(42, &cities);
        search.run_until_done(200).unwrap();
        assert_eq!(
            serde_json::to_string(search.state()).unwrap(),
            reference.0,
            "run {run} state diverged"
        );
        assert_eq!(search.history(), reference.1.as_slice(), "run {run} history diverged");
        assert_eq!(search.best_tour(), reference.2, "run {run} tour diverged");
    }
}

// H0: Step-by-step and batched execution diverge
// Falsification: Drive one search with step(), another with run_until_done()
#[test]
fn h0_3_stepping_matches_batched_run() {
    let cities = ring(8);

    let mut stepped = start(7, &cities);
    let mut improvements = Vec::new();
    while stepped.phase() == Phase::Searching {
        improvements.extend(stepped.step().unwrap().improvement);
    }

    let mut batched = start(7, &cities);
    let batched_improvements = batched.run_until_done(u64::MAX).unwrap();

    assert_eq!(improvements, batched_improvements);
    assert_eq!(stepped.history(), batched.history());
    assert_eq!(stepped.stop_reason(), batched.stop_reason());
}

// H0: A restored checkpoint continues on a different path
// Falsification: Snapshot mid-run, serialize through JSON, resume, compare
#[test]
fn h0_4_checkpoint_resume_is_exact() {
    let cities = ring(11);
    let mut original = start(99, &cities);
    for _ in 0..15 {
        original.step().unwrap();
    }

    let json = serde_json::to_string(&original.snapshot()).unwrap();
    let snapshot: SearchSnapshot = serde_json::from_str(&json).unwrap();
    let mut resumed = SearchController::new(SearchConfig::default());
    resumed.restore(snapshot).unwrap();

    original.run_until_done(100).unwrap();
    resumed.run_until_done(100).unwrap();

    assert_eq!(original.history(), resumed.history());
    assert_eq!(original.best_tour(), resumed.best_tour());
    assert_eq!(original.state(), resumed.state());
}

// H0: Restarting a controller leaks state from the previous search
// Falsification: Search A, rebuild, search B; compare B with a fresh controller
#[test]
fn h0_5_restart_is_clean() {
    let first = ring(7);
    let second = ring(9);

    let mut reused = start(5, &first);
    reused.run_until_done(50).unwrap();
    if reused.phase() == Phase::Searching {
        reused.cancel().unwrap();
    }
    reused.begin_building().unwrap();
    for &city in &second {
        reused.add_city(city).unwrap();
    }
    reused.start().unwrap();
    reused.run_until_done(50).unwrap();

    let mut fresh = start(5, &second);
    fresh.run_until_done(50).unwrap();

    assert_eq!(reused.history(), fresh.history());
    assert_eq!(reused.best_tour(), fresh.best_tour());
}
