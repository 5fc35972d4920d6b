use crate::dsty::Dsty;
use crate::error::{ShowerError, ShowerResult};
use crate::prtls::{Chrg, Prtl};
use crate::sampling::{sample_free_path, PHOTON_PATH_RATIO};
use crate::{Float, Sim};
use rand::Rng;

pub mod bank;
use bank::PrtlBank;

/// Bookkeeping for one or more simulated events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventStats {
    pub events: u64,
    pub steps: u64,      // particles that took a step inside the medium
    pub escaped: u64,    // particles dropped for stepping past the depth
    pub photons: u64,    // photons radiated
    pub chrgs: u64,      // secondary charged particles created
    pub peak_queue: usize,
}

impl EventStats {
    pub fn merge(self, other: EventStats) -> EventStats {
        EventStats {
            events: self.events + other.events,
            steps: self.steps + other.steps,
            escaped: self.escaped + other.escaped,
            photons: self.photons + other.photons,
            chrgs: self.chrgs + other.chrgs,
            peak_queue: self.peak_queue.max(other.peak_queue),
        }
    }
}

impl Sim {
    #[inline(always)]
    fn mean_free_path(&self, prtl: &Prtl) -> Float {
        match prtl {
            Prtl::Chrg(_) => self.x0,
            Prtl::Photon(_) => PHOTON_PATH_RATIO * self.x0,
        }
    }

    /// Follows one incident electron of energy `e0` and all its offspring
    /// until the queue drains, adding every counted step to `dsty`.
    pub fn simulate_event<R: Rng + ?Sized>(
        &self,
        e0: Float,
        rng: &mut R,
        dsty: &mut Dsty,
    ) -> ShowerResult<EventStats> {
        let mut bank = PrtlBank::with_capacity(64);
        let mut stats = EventStats {
            events: 1,
            ..EventStats::default()
        };
        bank.push(Chrg::incident(e0));

        while let Some(mut prtl) = bank.pop() {
            if !cfg!(feature = "unchecked") {
                assert!(
                    prtl.energy().is_finite() && prtl.pos().is_finite(),
                    "non-finite particle dequeued {:?}",
                    prtl
                );
            }
            if prtl.energy() <= self.rest_e {
                continue;
            }

            let start = prtl.pos();
            let step = sample_free_path(rng, self.mean_free_path(&prtl));
            prtl.advance(step);
            if !cfg!(feature = "unchecked") {
                assert!(prtl.pos() >= start, "particle moved backwards {:?}", prtl);
            }
            if prtl.pos() > self.depth {
                stats.escaped += 1;
                continue;
            }
            stats.steps += 1;

            match &mut prtl {
                Prtl::Chrg(chrg) => {
                    chrg.ionization_loss(step, self.ie_loss, self.rest_e);
                    if !cfg!(feature = "unchecked") {
                        assert!(chrg.energy >= self.rest_e, "energy under floor {:?}", chrg);
                    }
                    if let Some(photon) = chrg.bremsstrahlung(self.rest_e) {
                        // The radiating particle carries on as a new secondary.
                        bank.push(Chrg::secondary(chrg.energy, chrg.pos));
                        bank.push(photon);
                        stats.chrgs += 1;
                        stats.photons += 1;
                    }
                }
                Prtl::Photon(photon) => {
                    if let Some([a, b]) = photon.pair_production(rng, self.rest_e) {
                        bank.push(a);
                        bank.push(b);
                        stats.chrgs += 2;
                    }
                }
            }

            if !cfg!(feature = "unchecked") {
                assert!(
                    prtl.energy().is_finite() && prtl.pos().is_finite(),
                    "non-finite particle state {:?}",
                    prtl
                );
            }

            if bank.len() > self.max_queue {
                return Err(ShowerError::QueueOverflow {
                    limit: self.max_queue,
                    e0,
                });
            }

            // Counted under the variant it has after the step. Incident
            // segments are never counted.
            if let Some(species) = prtl.species() {
                let pos = prtl.pos();
                dsty.deposit(&self.planes, species, pos - step, pos);
            }
        }

        stats.peak_queue = bank.peak();
        Ok(stats)
    }
}
