use crate::{dsty::Profile, Float};
use anyhow::{Context, Result};
use npy_derive::Serializable;

/// One row of `summary.npy`: the descriptive numbers of a single profile.
#[derive(Serializable, Debug, PartialEq, Clone)]
pub struct SummaryRow {
    pub e0: Float,
    pub max_depth: Float,
    pub max_dsty: Float,
    pub mean_depth: Float,
    pub track_length: Float,
}

impl SummaryRow {
    pub fn from_profile(prof: &Profile) -> SummaryRow {
        let (max_depth, max_dsty) = prof.shower_max().unwrap_or((0.0, 0.0));
        SummaryRow {
            e0: prof.e0,
            max_depth,
            max_dsty,
            mean_depth: prof.mean_depth().unwrap_or(0.0),
            track_length: prof.track_length(),
        }
    }
}

pub fn profile_dir(prof: &Profile, outdir: &str) -> String {
    format!("{}/e_{}", outdir, prof.e0)
}

/// Writes the planes and both density arrays of `prof` as .npy files.
pub fn save_profile(prof: &Profile, outdir: &str) -> Result<()> {
    let output_prefix = profile_dir(prof, outdir);
    std::fs::create_dir_all(&output_prefix).context("Unable to create output directory")?;

    npy::to_file(
        format!("{}/planes.npy", output_prefix),
        prof.planes.iter().copied(),
    )
    .context("Could not save depth planes to file")?;
    npy::to_file(
        format!("{}/chrg_dsty.npy", output_prefix),
        prof.chrg.iter().copied(),
    )
    .context("Could not save charged particle density to file")?;
    npy::to_file(
        format!("{}/phot_dsty.npy", output_prefix),
        prof.phot.iter().copied(),
    )
    .context("Could not save photon density to file")?;

    Ok(())
}

pub fn save_summary(profiles: &[Profile], outdir: &str) -> Result<()> {
    std::fs::create_dir_all(outdir).context("Unable to create output directory")?;
    let rows: Vec<SummaryRow> = profiles.iter().map(SummaryRow::from_profile).collect();
    npy::to_file(format!("{}/summary.npy", outdir), rows)
        .context("Could not save profile summary to file")?;
    Ok(())
}
