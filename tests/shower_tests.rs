mod common;

use rand::rngs::StdRng;
use rand::SeedableRng;
use shower_rs::dsty::Dsty;
use shower_rs::error::ShowerError;
use shower_rs::{run, Config, Float, Sim};

#[test]
fn test_one_gev_profile_shape() {
    let sim = common::setup_sim(1000, vec![1.0]);
    let prof = sim.run_energy(1.0, 2021).unwrap();
    assert_eq!(prof.chrg.len(), 250);
    assert_eq!(prof.phot.len(), 250);
    assert!(prof.chrg.iter().all(|&v| v >= 0.0));
    assert!(prof.phot.iter().all(|&v| v >= 0.0));

    let (max_depth, peak) = prof.shower_max().unwrap();
    assert!(peak > 0.0);
    // the shower has not developed at the front face
    assert!(prof.chrg[0] < 0.01 * peak);
    assert!(max_depth > 0.0);
    assert!(max_depth < 10.0 * sim.x0, "shower max at {} cm", max_depth);
    // and has died out at the back
    let tail: Float = prof.chrg[240..].iter().sum::<Float>() / 10.0;
    assert!(tail < 0.01 * peak, "tail {} vs peak {}", tail, peak);
}

#[test]
fn test_doubling_energy_moves_shower_deeper() {
    let sim = common::setup_sim(1000, vec![1.0, 2.0]);
    let profiles = sim.run_all().unwrap();
    assert_eq!(profiles.len(), 2);
    let (one, two) = (&profiles[0], &profiles[1]);
    assert_eq!(one.e0, 1.0);
    assert_eq!(two.e0, 2.0);

    let (max_one, peak_one) = one.shower_max().unwrap();
    let (max_two, peak_two) = two.shower_max().unwrap();
    assert!(
        max_two > max_one,
        "maximum at {} cm for 2 GeV vs {} cm for 1 GeV",
        max_two,
        max_one
    );
    assert!(peak_two > peak_one);
    assert!(two.mean_depth().unwrap() > one.mean_depth().unwrap());
    assert!(two.track_length() > one.track_length());
}

#[test]
fn test_events_terminate() {
    let sim = common::setup_sim(1, vec![10.0]);
    let mut rng = StdRng::seed_from_u64(17);
    for &e0 in &[0.01, 0.1, 1.0, 5.0, 10.0] {
        let mut dsty = Dsty::new(sim.planes.len());
        let stats = sim.simulate_event(e0, &mut rng, &mut dsty).unwrap();
        assert_eq!(stats.events, 1);
        assert!(stats.peak_queue < 1_000_000);
        assert_eq!(dsty.chrg.len(), 250);
    }
}

#[test]
fn test_fixed_seed_is_reproducible() {
    let sim = common::setup_sim(200, vec![1.0]);
    let a = sim.run_energy(1.0, 5).unwrap();
    let b = sim.run_energy(1.0, 5).unwrap();
    assert_eq!(a, b);
    let c = sim.run_energy(1.0, 6).unwrap();
    assert_ne!(a.chrg, c.chrg);
}

#[test]
fn test_thread_count_does_not_change_result() {
    let sim = common::setup_sim(300, vec![2.0]);
    let single = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap()
        .install(|| sim.run_all().unwrap());
    let many = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .unwrap()
        .install(|| sim.run_all().unwrap());
    assert_eq!(single, many);
}

#[test]
fn test_invalid_config_fails_fast() {
    let bad: Vec<Box<dyn Fn(&mut Config)>> = vec![
        Box::new(|c: &mut Config| c.params.depth = 0.0),
        Box::new(|c: &mut Config| c.params.depth = -1.0),
        Box::new(|c: &mut Config| c.params.n_planes = 0),
        Box::new(|c: &mut Config| c.setup.n_events = 0),
        Box::new(|c: &mut Config| c.params.x0 = 0.0),
        Box::new(|c: &mut Config| c.params.ie_loss = -0.1),
        Box::new(|c: &mut Config| c.setup.energies = vec![]),
        Box::new(|c: &mut Config| c.setup.energies = vec![1.0, -2.0]),
        Box::new(|c: &mut Config| c.setup.threads = Some(0)),
    ];
    for tweak in bad.iter() {
        let mut cfg = common::setup_cfg(10, vec![1.0]);
        tweak(&mut cfg);
        match Sim::new(&cfg) {
            Err(ShowerError::Config(_)) => {}
            Err(e) => panic!("unexpected error {}", e),
            Ok(_) => panic!("config {:?} should be rejected", cfg),
        }
    }
}

#[test]
fn test_run_returns_a_profile_per_energy() {
    let mut cfg = common::setup_cfg(20, vec![0.5, 1.0, 3.0]);
    cfg.setup.threads = Some(2);
    let profiles = run(cfg).unwrap();
    let energies: Vec<Float> = profiles.iter().map(|p| p.e0).collect();
    assert_eq!(energies, vec![0.5, 1.0, 3.0]);
}

#[test]
fn test_config_from_file_fills_defaults() {
    let path = std::env::temp_dir().join(format!("shower_rs_cfg_{}.toml", std::process::id()));
    std::fs::write(
        &path,
        r#"
[params]
x0 = 0.89
ie_loss = 0.0102
depth = 25.0
n_planes = 250

[setup]
n_events = 1000
energies = [1.0, 2.0]

[output]
write_output = false
"#,
    )
    .unwrap();
    let cfg = Config::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(cfg.params.rest_e, 5e-4);
    assert_eq!(cfg.params.max_queue, 1_000_000);
    assert_eq!(cfg.setup.seed, None);
    assert_eq!(cfg.setup.threads, None);
    assert_eq!(cfg.output.outdir, "output");
    assert_eq!(cfg.setup.energies, vec![1.0, 2.0]);
    assert!(Sim::new(&cfg).is_ok());
}

#[test]
fn test_missing_config_file_is_an_error() {
    assert!(Config::from_file("does/not/exist.toml").is_err());
}
