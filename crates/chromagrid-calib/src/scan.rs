//! Bounded band scanning.
//!
//! Every marker search walks rows or columns in order and needs to stop a
//! fixed number of empty lines after the marker band ends. [`BandScan`]
//! keeps that logic in one place as an explicit state machine instead of
//! loop-local flags and counters.

use std::ops::ControlFlow;

/// Where a scan currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanState {
    /// No marker seen yet.
    Searching,
    /// The last observed line belonged to the band.
    MarkerBandFound,
    /// Consecutive empty lines seen since the band.
    Trailing { misses: usize },
}

/// Outcome of probing one line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Probe {
    /// Line counts as part of the band and becomes the latest hit.
    Hit,
    /// Line contains marker but does not qualify as a hit; it does not
    /// count as empty either.
    Touch,
    /// Line has no marker.
    Miss,
}

#[derive(Clone, Debug)]
pub struct BandScan {
    state: ScanState,
    max_misses: usize,
    last_hit: Option<usize>,
}

impl BandScan {
    /// Scan that stops once `max_misses` consecutive empty lines follow the
    /// band. A value of zero is treated as one.
    pub fn new(max_misses: usize) -> Self {
        Self {
            state: ScanState::Searching,
            max_misses: max_misses.max(1),
            last_hit: None,
        }
    }

    pub fn observe(&mut self, index: usize, probe: Probe) -> ControlFlow<()> {
        self.state = match (self.state, probe) {
            (_, Probe::Hit) => {
                self.last_hit = Some(index);
                ScanState::MarkerBandFound
            }
            (ScanState::Searching, _) => ScanState::Searching,
            (_, Probe::Touch) => ScanState::MarkerBandFound,
            (ScanState::MarkerBandFound, Probe::Miss) => ScanState::Trailing { misses: 1 },
            (ScanState::Trailing { misses }, Probe::Miss) => ScanState::Trailing {
                misses: misses + 1,
            },
        };
        match self.state {
            ScanState::Trailing { misses } if misses >= self.max_misses => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    }

    /// Feed probes until the scan stops or the input runs out.
    pub fn run(mut self, probes: impl IntoIterator<Item = (usize, Probe)>) -> Self {
        for (index, probe) in probes {
            if self.observe(index, probe).is_break() {
                break;
            }
        }
        self
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Index of the last hit before the scan stopped.
    pub fn last_hit(&self) -> Option<usize> {
        self.last_hit
    }
}
