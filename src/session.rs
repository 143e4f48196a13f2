//! Run control around the kernel
//!
//! Owns the simulator, the frame clock and the live settings, and applies
//! the start/pause/reset controls. The kernel itself only knows how to step;
//! whether it steps on a given frame is decided here.

use serde::{Deserialize, Serialize};

use crate::clock::FrameClock;
use crate::consts::*;
use crate::recap::Recap;
use crate::settings::{Settings, SettingsError, check};
use crate::sim::{BodyId, FieldSampler, FrameSnapshot, GridPoint, PairSimulator, StepOutcome};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Freshly initialized, waiting for start
    Ready,
    /// Stepping on every admitted frame
    Running,
    /// Stopped by the user, resumable
    Paused,
    /// Bodies merged; only reset leaves this phase
    Merged,
}

/// What happened on one host frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// The clock admitted this frame
    pub admitted: bool,
    /// Kernel result, if a step ran
    pub outcome: Option<StepOutcome>,
}

impl FrameReport {
    /// True exactly on the frame the merge happened
    pub fn ended(&self) -> bool {
        self.outcome.is_some_and(StepOutcome::ended)
    }
}

/// A simulation run
#[derive(Debug, Clone)]
pub struct Session {
    sim: PairSimulator,
    clock: FrameClock,
    settings: Settings,
    phase: SessionPhase,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        let clock = FrameClock::default();
        let mut sim = PairSimulator::new(settings.initial_conditions());
        sim.set_frame_time_nanos(clock.frame_period_nanos());
        settings.apply_to(&mut sim);
        Self {
            sim,
            clock,
            settings,
            phase: SessionPhase::Ready,
        }
    }

    #[inline]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[inline]
    pub fn simulator(&self) -> &PairSimulator {
        &self.sim
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[inline]
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Start or resume stepping
    pub fn start(&mut self) {
        match self.phase {
            SessionPhase::Ready | SessionPhase::Paused => {
                self.phase = SessionPhase::Running;
                log::info!("Simulation running");
            }
            SessionPhase::Running | SessionPhase::Merged => {}
        }
    }

    pub fn pause(&mut self) {
        if self.phase == SessionPhase::Running {
            self.phase = SessionPhase::Paused;
            log::info!("Simulation paused at t={:.3}", self.sim.elapsed_time());
        }
    }

    /// Reinitialize both bodies from the current settings
    pub fn reset(&mut self) {
        self.sim.reset(self.settings.initial_conditions());
        self.sim.reset_max_frequency();
        self.clock.reset();
        self.phase = SessionPhase::Ready;
    }

    /// Replace the settings and push the live values into the simulator.
    ///
    /// Positions and velocities only change on the next reset.
    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.settings.apply_to(&mut self.sim);
    }

    /// Live parameter writes only land when the value is inside its control
    /// range; a rejected value leaves both settings and simulator untouched.
    pub fn set_time_step(&mut self, dt: f64) -> Result<(), SettingsError> {
        check("time_step", dt, MIN_TIME_STEP, MAX_TIME_STEP)?;
        self.settings.time_step = dt;
        self.sim.set_time_step(dt);
        Ok(())
    }

    pub fn set_merge_distance_multiplier(&mut self, multiplier: f64) -> Result<(), SettingsError> {
        check(
            "merge_distance_multiplier",
            multiplier,
            MIN_MERGE_DISTANCE_MULTIPLIER,
            MAX_MERGE_DISTANCE_MULTIPLIER,
        )?;
        self.settings.merge_distance_multiplier = multiplier;
        self.sim.set_merge_distance_multiplier(multiplier);
        Ok(())
    }

    pub fn set_mass(&mut self, id: BodyId, mass: f64) -> Result<(), SettingsError> {
        check("mass", mass, MIN_MASS, MAX_MASS)?;
        self.settings.body_mut(id).mass = mass;
        self.sim.set_mass(id, mass);
        Ok(())
    }

    pub fn set_radius(&mut self, id: BodyId, radius: f64) -> Result<(), SettingsError> {
        check("radius", radius, MIN_RADIUS, self.settings.max_radius())?;
        self.settings.body_mut(id).radius = radius;
        self.sim.set_radius(id, radius);
        Ok(())
    }

    /// Handle one host frame at `now_nanos`
    pub fn frame(&mut self, now_nanos: u64) -> FrameReport {
        if !self.clock.admit(now_nanos) {
            return FrameReport {
                admitted: false,
                outcome: None,
            };
        }
        if self.phase != SessionPhase::Running {
            return FrameReport {
                admitted: true,
                outcome: None,
            };
        }

        let outcome = self.sim.step();
        if outcome.ended() {
            self.phase = SessionPhase::Merged;
            if let Some(recap) = self.recap() {
                log::info!("{}", recap);
            }
        }
        FrameReport {
            admitted: true,
            outcome: Some(outcome),
        }
    }

    /// Distorted grid for the current pair state
    pub fn grid(&self) -> Vec<GridPoint> {
        let field: &FieldSampler = &self.settings.field;
        let scenario = &self.settings.scenario;
        field.sweep(self.sim.bodies(), scenario.width, scenario.height, self.sim.constants())
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        self.sim.snapshot()
    }

    pub fn recap(&self) -> Option<Recap> {
        Recap::from_pair(&self.sim)
    }
}
