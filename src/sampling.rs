use crate::Float;
use rand::Rng;
use rand_distr::{Distribution, Exp1, Standard};

/// Ratio of the photon pair-production mean free path to the radiation length.
pub const PHOTON_PATH_RATIO: Float = 9.0 / 7.0;

/// Draws a free path length from an exponential distribution with mean `scale`.
#[inline(always)]
pub fn sample_free_path<R: Rng + ?Sized>(rng: &mut R, scale: Float) -> Float {
    if !cfg!(feature = "unchecked") {
        assert!(
            scale.is_finite() && scale > 0.0,
            "free path scale must be positive, got {}",
            scale
        );
    }
    let unit: Float = Exp1.sample(rng);
    unit * scale
}

/// Uniform fraction in [0, 1) used to split a photon between the pair.
#[inline(always)]
pub fn sample_energy_fraction<R: Rng + ?Sized>(rng: &mut R) -> Float {
    Standard.sample(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn free_path_mean_matches_scale() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 200_000;
        let scale: Float = 0.89;
        let mean = (0..n)
            .map(|_| sample_free_path(&mut rng, scale) as f64)
            .sum::<f64>()
            / n as f64;
        assert!((mean - scale as f64).abs() < 0.01, "mean was {}", mean);
    }

    #[test]
    fn free_path_is_non_negative() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10_000 {
            let step = sample_free_path(&mut rng, PHOTON_PATH_RATIO * 0.89);
            assert!(step >= 0.0);
            assert!(step.is_finite());
        }
    }

    #[test]
    #[should_panic]
    #[cfg(not(feature = "unchecked"))]
    fn zero_scale_panics() {
        let mut rng = StdRng::seed_from_u64(1);
        sample_free_path(&mut rng, 0.0);
    }

    #[test]
    fn energy_fraction_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10_000 {
            let f = sample_energy_fraction(&mut rng);
            assert!(f >= 0.0 && f < 1.0);
        }
    }
}
