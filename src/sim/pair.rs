//! Two-body stepping
//!
//! Advances the pair by one admitted frame: merge detection, mutual
//! acceleration, integration and the derived gravitational-wave frequency.
//! Every parameter the UI can change is owned here and written through a
//! setter between steps.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyId, BodyInit, PhysicalConstants};
use crate::consts::*;

/// Initial state of both bodies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairInit {
    pub primary: BodyInit,
    pub secondary: BodyInit,
}

/// Result of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// No physics ran (massless body or already merged)
    Skipped,
    /// Both bodies moved
    Advanced,
    /// The bodies merged this step; stop stepping
    Merged,
}

impl StepOutcome {
    /// True exactly on the step a merge occurred
    #[inline]
    pub fn ended(self) -> bool {
        self == StepOutcome::Merged
    }
}

/// Per-body values the UI reads each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub event_horizon_radius: f64,
    pub enabled: bool,
    pub scale_factor: f64,
}

impl From<&Body> for BodySnapshot {
    fn from(body: &Body) -> Self {
        Self {
            x: body.x(),
            y: body.y(),
            radius: body.radius(),
            event_horizon_radius: body.event_horizon_radius(),
            enabled: body.is_enabled(),
            scale_factor: body.scale_factor(),
        }
    }
}

/// Everything the UI reads after a frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub primary: BodySnapshot,
    pub secondary: BodySnapshot,
    pub wave_frequency: f64,
    pub max_wave_frequency: f64,
    pub elapsed_time: f64,
    pub merged: bool,
}

/// Accelerations of `a` and `b` from their mutual attraction.
///
/// Equal and opposite force, each acceleration scaled by the body's own mass.
/// Callers must ensure the bodies are apart and both massive.
pub fn mutual_acceleration(a: &Body, b: &Body, k: &PhysicalConstants) -> (DVec2, DVec2) {
    let (m1, m2) = (a.mass(), b.mass());
    let distance = a.distance_to_body(b);
    let force = k.g * m1 * m2 / (distance * distance);
    let delta = b.pos - a.pos;
    let angle = delta.y.atan2(delta.x);
    let dir = DVec2::new(angle.cos(), angle.sin());

    (force * dir / m1, -force * dir / m2)
}

/// Owns exactly two bodies and the parameters driving them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairSimulator {
    bodies: [Body; 2],
    /// Which slot absorbs the other on merge
    primary: BodyId,
    constants: PhysicalConstants,
    time_step: f64,
    merge_distance_multiplier: f64,
    frame_time_nanos: u64,
    wave_frequency: f64,
    max_wave_frequency: f64,
    elapsed_time: f64,
    merged: bool,
    /// Slot that absorbed its partner, set on merge
    survivor: Option<BodyId>,
}

impl PairSimulator {
    pub fn new(init: PairInit) -> Self {
        Self::with_constants(init, PhysicalConstants::default())
    }

    pub fn with_constants(init: PairInit, constants: PhysicalConstants) -> Self {
        Self {
            bodies: [Body::new(init.primary), Body::new(init.secondary)],
            primary: BodyId::Primary,
            constants,
            time_step: DEFAULT_TIME_STEP,
            merge_distance_multiplier: DEFAULT_MERGE_DISTANCE_MULTIPLIER,
            frame_time_nanos: FRAME_TIME_NANOS,
            wave_frequency: 0.0,
            max_wave_frequency: 0.0,
            elapsed_time: 0.0,
            merged: false,
            survivor: None,
        }
    }

    /// Default scenario: equal bodies on a horizontal line, drifting diagonally
    pub fn default_pair(width: f64, height: f64) -> PairInit {
        let cy = height / 2.0;
        PairInit {
            primary: BodyInit::new(
                width / 2.0 - DEFAULT_POSITION_DIFFERENCE,
                cy,
                DEFAULT_VELOCITY,
                DEFAULT_VELOCITY,
                DEFAULT_MASS,
                DEFAULT_RADIUS,
            ),
            secondary: BodyInit::new(
                width / 2.0 + DEFAULT_POSITION_DIFFERENCE,
                cy,
                -DEFAULT_VELOCITY,
                -DEFAULT_VELOCITY,
                DEFAULT_MASS,
                DEFAULT_RADIUS,
            ),
        }
    }

    #[inline]
    pub fn body(&self, id: BodyId) -> &Body {
        &self.bodies[id.index()]
    }

    #[inline]
    pub fn body_mut(&mut self, id: BodyId) -> &mut Body {
        &mut self.bodies[id.index()]
    }

    #[inline]
    pub fn bodies(&self) -> &[Body; 2] {
        &self.bodies
    }

    /// Body that absorbs its partner on merge
    #[inline]
    pub fn primary(&self) -> &Body {
        self.body(self.primary)
    }

    #[inline]
    pub fn secondary(&self) -> &Body {
        self.body(self.primary.other())
    }

    /// Choose which slot absorbs the other on merge
    pub fn set_primary(&mut self, id: BodyId) {
        self.primary = id;
    }

    #[inline]
    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    #[inline]
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    #[inline]
    pub fn merge_distance_multiplier(&self) -> f64 {
        self.merge_distance_multiplier
    }

    /// Latest gravitational-wave frequency (display scaled)
    #[inline]
    pub fn wave_frequency(&self) -> f64 {
        self.wave_frequency
    }

    #[inline]
    pub fn max_wave_frequency(&self) -> f64 {
        self.max_wave_frequency
    }

    #[inline]
    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    #[inline]
    pub fn is_merged(&self) -> bool {
        self.merged
    }

    /// Body that absorbed its partner, fixed at merge time
    pub fn survivor(&self) -> Option<&Body> {
        self.survivor.map(|id| self.body(id))
    }

    /// Set the integration time step; non-positive values are ignored
    pub fn set_time_step(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.time_step = dt;
        } else {
            log::warn!("Ignoring invalid time step {}", dt);
        }
    }

    /// Set the merge distance multiplier; negative values are ignored
    pub fn set_merge_distance_multiplier(&mut self, multiplier: f64) {
        if multiplier.is_finite() && multiplier >= 0.0 {
            self.merge_distance_multiplier = multiplier;
        } else {
            log::warn!("Ignoring invalid merge distance multiplier {}", multiplier);
        }
    }

    /// Frame period used to advance elapsed time
    pub fn set_frame_time_nanos(&mut self, nanos: u64) {
        self.frame_time_nanos = nanos;
    }

    pub fn set_mass(&mut self, id: BodyId, mass: f64) {
        self.body_mut(id).set_mass(mass);
    }

    pub fn set_radius(&mut self, id: BodyId, radius: f64) {
        self.body_mut(id).set_radius(radius);
    }

    /// Reinitialize both bodies and zero elapsed time.
    ///
    /// The recorded maximum frequency survives; see [`Self::reset_max_frequency`].
    pub fn reset(&mut self, init: PairInit) {
        self.bodies[BodyId::Primary.index()].reset(init.primary);
        self.bodies[BodyId::Secondary.index()].reset(init.secondary);
        self.wave_frequency = 0.0;
        self.elapsed_time = 0.0;
        self.merged = false;
        self.survivor = None;
        log::info!("Pair reset");
    }

    pub fn reset_max_frequency(&mut self) {
        self.max_wave_frequency = 0.0;
    }

    /// Split the storage into (primary, secondary) mutable references
    fn pair_mut(&mut self) -> (&mut Body, &mut Body) {
        let [first, second] = &mut self.bodies;
        match self.primary {
            BodyId::Primary => (first, second),
            BodyId::Secondary => (second, first),
        }
    }

    /// Advance the pair by one admitted frame
    pub fn step(&mut self) -> StepOutcome {
        if self.merged {
            return StepOutcome::Skipped;
        }

        let k = self.constants;
        let dt = self.time_step;
        let multiplier = self.merge_distance_multiplier;
        let (primary, secondary) = self.pair_mut();

        // Effective mass is zero for a disabled body, so this also covers
        // the disabled case and no motion is applied to it
        if primary.mass() == 0.0 || secondary.mass() == 0.0 {
            return StepOutcome::Skipped;
        }

        let distance = primary.distance_to_body(secondary);
        if distance * multiplier <= (primary.radius() + secondary.radius()) / 2.0 {
            Self::merge(primary, secondary);
            self.merged = true;
            self.survivor = Some(self.primary);
            log::info!(
                "Merged: mass={:e} radius={:.2} after t={:.3}",
                self.primary().raw_mass(),
                self.primary().radius(),
                self.elapsed_time
            );
            return StepOutcome::Merged;
        }

        let (a1, a2) = mutual_acceleration(primary, secondary, &k);
        primary.acc = a1;
        secondary.acc = a2;

        for body in [&mut *primary, &mut *secondary] {
            body.update_velocity(dt);
            body.update_position(dt);
            body.acc = DVec2::ZERO;
        }

        let s1 = primary.scale_factor_relative_to(secondary, &k);
        let s2 = secondary.scale_factor_relative_to(primary, &k);
        primary.set_scale_factor(s1);
        secondary.set_scale_factor(s2);

        let frequency = primary.wave_frequency(secondary, &k) * WAVE_FREQUENCY_DISPLAY_SCALE;
        self.wave_frequency = frequency;
        self.max_wave_frequency = self.max_wave_frequency.max(frequency);
        self.elapsed_time += self.frame_time_nanos as f64 * dt / 1.0e9;

        StepOutcome::Advanced
    }

    /// Absorb `secondary` into `primary`.
    ///
    /// The growth ratio uses the post-merge primary mass over the pre-merge
    /// primary mass (the secondary is still enabled when it is evaluated).
    fn merge(primary: &mut Body, secondary: &mut Body) {
        let absorbed = secondary.mass();
        let mass = primary.raw_mass() + absorbed;
        primary.set_mass(mass);
        let growth = (mass / (mass - absorbed)).powf(1.0 / 3.0);
        primary.set_radius(primary.radius() + secondary.radius() * growth);

        secondary.set_enabled(false);
        primary.reset_scale_factor();
        secondary.reset_scale_factor();
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            primary: self.body(BodyId::Primary).into(),
            secondary: self.body(BodyId::Secondary).into(),
            wave_frequency: self.wave_frequency,
            max_wave_frequency: self.max_wave_frequency,
            elapsed_time: self.elapsed_time,
            merged: self.merged,
        }
    }
}
