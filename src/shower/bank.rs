use crate::prtls::Prtl;
use std::collections::VecDeque;

/// FIFO queue owning every live particle of one event.
pub struct PrtlBank {
    queue: VecDeque<Prtl>,
    peak: usize,
}

impl PrtlBank {
    pub fn new() -> PrtlBank {
        PrtlBank {
            queue: VecDeque::new(),
            peak: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> PrtlBank {
        PrtlBank {
            queue: VecDeque::with_capacity(capacity),
            peak: 0,
        }
    }

    #[inline(always)]
    pub fn push(&mut self, prtl: impl Into<Prtl>) {
        self.queue.push_back(prtl.into());
        self.peak = self.peak.max(self.queue.len());
    }

    #[inline(always)]
    pub fn pop(&mut self) -> Option<Prtl> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Largest number of particles held at once.
    pub fn peak(&self) -> usize {
        self.peak
    }
}

impl Default for PrtlBank {
    fn default() -> Self {
        Self::new()
    }
}
