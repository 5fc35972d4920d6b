use crate::prtls::Species;
use crate::Float;
use itertools::izip;

/// Evenly spaced depth planes. Plane `k` sits at `k * depth / n_planes`.
#[derive(Clone, Debug)]
pub struct Planes {
    pub locs: Vec<Float>,
    pub bin_width: Float,
}

impl Planes {
    pub fn new(depth: Float, n_planes: usize) -> Planes {
        let bin_width = depth / n_planes as Float;
        Planes {
            locs: (0..n_planes).map(|k| k as Float * bin_width).collect(),
            bin_width,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.locs.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.locs.is_empty()
    }

    /// Number of planes strictly shallower than `x`, found by binary search.
    /// Ranges over `0..=len()`.
    #[inline(always)]
    pub fn bin_index(&self, x: Float) -> usize {
        self.locs.partition_point(|&loc| loc < x)
    }
}

/// Raw plane-crossing counts for one batch of events. Counts are
/// integers so partial sums merge exactly in any order.
#[derive(Clone, Debug, PartialEq)]
pub struct Dsty {
    pub chrg: Vec<u64>,
    pub phot: Vec<u64>,
}

impl Dsty {
    pub fn new(n_planes: usize) -> Dsty {
        Dsty {
            chrg: vec![0; n_planes],
            phot: vec![0; n_planes],
        }
    }

    /// Counts one particle in every plane it crossed travelling from
    /// `start` to `end`, i.e. bins `bin_index(start)..bin_index(end)`.
    #[inline(always)]
    pub fn deposit(&mut self, planes: &Planes, species: Species, start: Float, end: Float) {
        let lo = planes.bin_index(start);
        let hi = planes.bin_index(end);
        if !cfg!(feature = "unchecked") {
            assert!(start.is_finite() && end.is_finite());
            assert!(start <= end);
            assert_eq!(planes.len(), self.chrg.len());
            // bin_index tops out at the plane count
            assert!(lo <= hi && hi <= self.chrg.len(), "bad bins {}..{}", lo, hi);
        }
        let hist = match species {
            Species::Chrg => &mut self.chrg,
            Species::Photon => &mut self.phot,
        };
        for v in hist[lo..hi].iter_mut() {
            *v += 1;
        }
    }

    pub fn merge(mut self, other: Dsty) -> Dsty {
        for (a, b, c, d) in izip!(&mut self.chrg, &other.chrg, &mut self.phot, &other.phot) {
            *a += b;
            *c += d;
        }
        self
    }

    /// Average linear density, particles per cm per event.
    pub fn normalize(&self, planes: &Planes, e0: Float, n_events: u32) -> Profile {
        let norm = 1.0 / (planes.bin_width * n_events as Float);
        Profile {
            e0,
            planes: planes.locs.clone(),
            chrg: self.chrg.iter().map(|&n| n as Float * norm).collect(),
            phot: self.phot.iter().map(|&n| n as Float * norm).collect(),
        }
    }
}

/// Normalized depth profiles for one initial energy.
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    pub e0: Float,
    pub planes: Vec<Float>,
    pub chrg: Vec<Float>,
    pub phot: Vec<Float>,
}

impl Profile {
    /// Depth and value of the charged particle maximum. First one wins on ties.
    pub fn shower_max(&self) -> Option<(Float, Float)> {
        let mut best: Option<(Float, Float)> = None;
        for (&x, &v) in self.planes.iter().zip(self.chrg.iter()) {
            match best {
                Some((_, b)) if v <= b => {}
                _ => best = Some((x, v)),
            }
        }
        best
    }

    /// Charged density integrated over depth: the mean secondary track
    /// length per event, in cm.
    pub fn track_length(&self) -> Float {
        let dx = match self.planes.get(1) {
            Some(&x1) => x1 - self.planes[0],
            None => return 0.0,
        };
        self.chrg.iter().sum::<Float>() * dx
    }

    /// Density weighted mean depth of the charged profile.
    pub fn mean_depth(&self) -> Option<Float> {
        let total: Float = self.chrg.iter().sum();
        if total > 0.0 {
            Some(
                izip!(&self.planes, &self.chrg)
                    .map(|(&x, &v)| x * v)
                    .sum::<Float>()
                    / total,
            )
        } else {
            None
        }
    }
}
