use shower_rs::{Config, Output, Params, Setup, Sim};

pub fn setup_cfg(n_events: u32, energies: Vec<f64>) -> Config {
    // A lead-glass-like block used throughout the tests.
    Config {
        output: Output {
            write_output: false,
            outdir: "output".to_string(),
        },
        setup: Setup {
            n_events,
            energies: energies.into_iter().map(|e| e as shower_rs::Float).collect(),
            seed: Some(2021),
            threads: None,
        },
        params: Params {
            x0: 0.89,
            ie_loss: 0.0102,
            depth: 25.0,
            n_planes: 250,
            rest_e: 5e-4,
            max_queue: 1_000_000,
        },
    }
}

#[allow(dead_code)]
pub fn setup_sim(n_events: u32, energies: Vec<f64>) -> Sim {
    Sim::new(&setup_cfg(n_events, energies)).unwrap()
}
