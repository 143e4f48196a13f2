//! End-of-run summary
//!
//! Shown once the pair has merged.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::sim::PairSimulator;

/// Summary of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recap {
    /// Simulated time until the merge
    pub elapsed_time: f64,
    /// Highest display-scaled wave frequency seen (Hz)
    pub max_frequency: f64,
    /// Mass of the surviving body
    pub final_mass: f64,
    /// Radius of the surviving body
    pub final_radius: f64,
}

impl Recap {
    /// Build a recap from a merged pair, `None` while it is still running
    pub fn from_pair(sim: &PairSimulator) -> Option<Self> {
        let survivor = sim.survivor()?;
        Some(Self {
            elapsed_time: sim.elapsed_time(),
            max_frequency: sim.max_wave_frequency(),
            final_mass: survivor.raw_mass(),
            final_radius: survivor.radius(),
        })
    }
}

impl fmt::Display for Recap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Highest Recorded Frequency: {:.0} Hz", self.max_frequency)
    }
}
