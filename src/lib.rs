use anyhow::{Context, Result};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub mod dsty;
pub mod error;
pub mod prtls;
pub mod sampling;
pub mod save;
pub mod shower;

use crate::dsty::{Dsty, Planes, Profile};
use crate::error::{ShowerError, ShowerResult};
use crate::shower::EventStats;

// We use a type alias for f64/Float to easily support
// double and single precision.
#[cfg(feature = "dprec")]
pub type Float = f64;

#[cfg(not(feature = "dprec"))]
pub type Float = f32;

/// Minimum number of events a rayon task handles before it may be split.
pub const EVENT_CHUNK_SIZE: usize = 16;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub params: Params,
    pub setup: Setup,
    pub output: Output,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Params {
    pub x0: Float,      // radiation length, cm
    pub ie_loss: Float, // ionization loss rate, GeV/cm
    pub depth: Float,   // cm
    pub n_planes: usize,
    #[serde(default = "default_rest_e")]
    pub rest_e: Float, // GeV
    #[serde(default = "default_max_queue")]
    pub max_queue: usize,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Setup {
    pub n_events: u32,
    pub energies: Vec<Float>, // GeV
    pub seed: Option<u64>,
    pub threads: Option<usize>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Output {
    pub write_output: bool,
    #[serde(default = "default_outdir")]
    pub outdir: String,
}

fn default_rest_e() -> Float {
    5e-4
}

fn default_max_queue() -> usize {
    1_000_000
}

fn default_outdir() -> String {
    "output".to_string()
}

impl Config {
    pub fn new() -> Result<Config> {
        Config::from_file("config.toml")
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Could not open the {} file", path.display()))?;
        toml::from_str(&contents).with_context(|| "Could not parse Config file")
    }
}

/// Runs every configured energy and writes the profiles if asked to.
/// Returns the profiles in the order the energies were configured.
pub fn run(cfg: Config) -> Result<Vec<Profile>> {
    let sim = Sim::new(&cfg)?;
    info!(
        "simulating {} events for each of {:?} GeV, seed {}",
        sim.n_events, sim.energies, sim.seed
    );

    let profiles = match cfg.setup.threads {
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .context("Could not build the thread pool")?;
            pool.install(|| sim.run_all())?
        }
        None => sim.run_all()?,
    };

    for prof in &profiles {
        if let Some((x, v)) = prof.shower_max() {
            info!(
                "E0 = {} GeV: shower max {:.3} /cm at {:.2} cm ({:.2} X0), track length {:.3} cm",
                prof.e0,
                v,
                x,
                x / sim.x0,
                prof.track_length()
            );
        }
    }

    if cfg.output.write_output {
        for prof in &profiles {
            save::save_profile(prof, &cfg.output.outdir)?;
        }
        save::save_summary(&profiles, &cfg.output.outdir)?;
        info!("saved output to {}", cfg.output.outdir);
    }

    Ok(profiles)
}

pub struct Sim {
    pub x0: Float,
    pub ie_loss: Float,
    pub depth: Float,
    pub rest_e: Float,
    pub max_queue: usize,
    pub n_events: u32,
    pub energies: Vec<Float>,
    pub seed: u64,
    pub planes: Planes,
}

impl Sim {
    /// Checks the configuration up front so nothing fails mid-run.
    pub fn new(cfg: &Config) -> ShowerResult<Sim> {
        let params = &cfg.params;
        let setup = &cfg.setup;
        let checks = [
            (params.depth.is_finite() && params.depth > 0.0, "depth must be positive"),
            (params.n_planes > 0, "n_planes must be positive"),
            (setup.n_events > 0, "n_events must be positive"),
            (params.x0.is_finite() && params.x0 > 0.0, "x0 must be positive"),
            (
                params.ie_loss.is_finite() && params.ie_loss >= 0.0,
                "ie_loss must not be negative",
            ),
            (params.rest_e.is_finite() && params.rest_e > 0.0, "rest_e must be positive"),
            (params.max_queue > 0, "max_queue must be positive"),
            (!setup.energies.is_empty(), "energies must not be empty"),
            (
                setup.energies.iter().all(|e| e.is_finite() && *e > 0.0),
                "every initial energy must be positive",
            ),
            (setup.threads != Some(0), "threads must be positive"),
        ];
        if let Some((_, msg)) = checks.iter().find(|(ok, _)| !ok) {
            return Err(ShowerError::Config(msg.to_string()));
        }

        Ok(Sim {
            x0: params.x0,
            ie_loss: params.ie_loss,
            depth: params.depth,
            rest_e: params.rest_e,
            max_queue: params.max_queue,
            n_events: setup.n_events,
            energies: setup.energies.clone(),
            seed: setup.seed.unwrap_or_else(rand::random),
            planes: Planes::new(params.depth, params.n_planes),
        })
    }

    /// Runs `n_events` independent events at `e0` and returns the averaged
    /// density. Event `i` draws from its own generator seeded with
    /// `seed + i`, so the result does not depend on the thread count.
    pub fn run_energy(&self, e0: Float, seed: u64) -> ShowerResult<Profile> {
        let n_planes = self.planes.len();
        let (dsty, stats) = (0..self.n_events)
            .into_par_iter()
            .with_min_len(EVENT_CHUNK_SIZE)
            .try_fold(
                || (Dsty::new(n_planes), EventStats::default()),
                |(mut dsty, stats), iev| {
                    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(iev as u64));
                    let ev = self.simulate_event(e0, &mut rng, &mut dsty)?;
                    Ok((dsty, stats.merge(ev)))
                },
            )
            .try_reduce(
                || (Dsty::new(n_planes), EventStats::default()),
                |a, b| Ok((a.0.merge(b.0), a.1.merge(b.1))),
            )?;

        debug!("E0 = {} GeV: {:?}", e0, stats);
        Ok(dsty.normalize(&self.planes, e0, self.n_events))
    }

    /// Every configured energy in order. Energy `k` uses the seed
    /// `seed + k * 2^32` so that no two energies share event streams.
    pub fn run_all(&self) -> ShowerResult<Vec<Profile>> {
        self.energies
            .iter()
            .enumerate()
            .map(|(k, &e0)| {
                info!("running E0 = {} GeV", e0);
                self.run_energy(e0, self.seed.wrapping_add((k as u64) << 32))
            })
            .collect()
    }
}
