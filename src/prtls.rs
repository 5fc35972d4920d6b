use crate::sampling::sample_energy_fraction;
use crate::Float;
use rand::Rng;

/// Where a charged particle came from. Only decides which histogram
/// the particle is counted in, never its physics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Incident,
    Secondary,
}

/// The two density histograms a particle can be counted in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Species {
    Chrg,
    Photon,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Photon {
    pub energy: Float, // GeV
    pub pos: Float,    // cm
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Chrg {
    pub energy: Float, // GeV
    pub pos: Float,    // cm
    pub origin: Origin,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Prtl {
    Photon(Photon),
    Chrg(Chrg),
}

impl Photon {
    pub fn new(energy: Float, pos: Float) -> Photon {
        Photon { energy, pos }
    }

    /// Converts the photon into an electron-positron pair. The photon is
    /// absorbed without offspring when it is below threshold.
    pub fn pair_production<R: Rng + ?Sized>(&self, rng: &mut R, rest_e: Float) -> Option<[Chrg; 2]> {
        if self.energy > 2.0 * rest_e {
            let frac = sample_energy_fraction(rng);
            // The larger share is the product, the smaller one the difference.
            // The difference is then exact, so the pair sums to the photon energy.
            let (e1, e2) = if frac >= 0.5 {
                let e1 = frac * self.energy;
                (e1, self.energy - e1)
            } else {
                let e2 = (1.0 - frac) * self.energy;
                (self.energy - e2, e2)
            };
            Some([
                Chrg::secondary(e1, self.pos),
                Chrg::secondary(e2, self.pos),
            ])
        } else {
            None
        }
    }
}

impl Chrg {
    pub fn incident(energy: Float) -> Chrg {
        Chrg {
            energy,
            pos: 0.0,
            origin: Origin::Incident,
        }
    }

    pub fn secondary(energy: Float, pos: Float) -> Chrg {
        Chrg {
            energy,
            pos,
            origin: Origin::Secondary,
        }
    }

    /// Continuous energy loss over `distance`, floored at `rest_e`.
    #[inline(always)]
    pub fn ionization_loss(&mut self, distance: Float, loss_rate: Float, rest_e: Float) {
        self.energy = (self.energy - distance * loss_rate).max(rest_e);
    }

    /// Halves the particle's energy and returns the radiated photon,
    /// or `None` if the particle is already at the floor.
    pub fn bremsstrahlung(&mut self, rest_e: Float) -> Option<Photon> {
        if self.energy > rest_e {
            self.energy *= 0.5;
            Some(Photon::new(self.energy, self.pos))
        } else {
            None
        }
    }
}

impl Prtl {
    #[inline(always)]
    pub fn energy(&self) -> Float {
        match self {
            Prtl::Photon(p) => p.energy,
            Prtl::Chrg(c) => c.energy,
        }
    }

    #[inline(always)]
    pub fn pos(&self) -> Float {
        match self {
            Prtl::Photon(p) => p.pos,
            Prtl::Chrg(c) => c.pos,
        }
    }

    /// Moves the particle deeper into the medium. Steps are never negative.
    #[inline(always)]
    pub fn advance(&mut self, step: Float) {
        if !cfg!(feature = "unchecked") {
            assert!(step >= 0.0 && step.is_finite(), "bad step {}", step);
        }
        match self {
            Prtl::Photon(p) => p.pos += step,
            Prtl::Chrg(c) => c.pos += step,
        }
    }

    /// Which histogram this particle contributes to. The incident
    /// particle is never counted.
    #[inline(always)]
    pub fn species(&self) -> Option<Species> {
        match self {
            Prtl::Photon(_) => Some(Species::Photon),
            Prtl::Chrg(Chrg {
                origin: Origin::Secondary,
                ..
            }) => Some(Species::Chrg),
            Prtl::Chrg(Chrg {
                origin: Origin::Incident,
                ..
            }) => None,
        }
    }
}

impl From<Photon> for Prtl {
    fn from(p: Photon) -> Prtl {
        Prtl::Photon(p)
    }
}

impl From<Chrg> for Prtl {
    fn from(c: Chrg) -> Prtl {
        Prtl::Chrg(c)
    }
}
