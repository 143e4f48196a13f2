//! Simulation settings
//!
//! Values the control panel exposes, with the same ranges as its sliders.
//! Stored as JSON when the host wants to keep them between runs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::max_radius_for_height;
use crate::sim::{BodyId, BodyInit, FieldSampler, PairInit, PairSimulator};

/// Settings errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Mass and radius of one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySettings {
    pub mass: f64,
    pub radius: f64,
}

impl Default for BodySettings {
    fn default() -> Self {
        Self {
            mass: DEFAULT_MASS,
            radius: DEFAULT_RADIUS,
        }
    }
}

/// Viewport and starting layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSettings {
    pub width: f64,
    pub height: f64,
    /// Horizontal offset of each body from the viewport center
    pub position_difference: f64,
    /// Per-axis starting speed (primary moves +,+ and secondary -,-)
    pub initial_speed: f64,
}

impl Default for ScenarioSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIMULATION_WIDTH,
            height: DEFAULT_SIMULATION_HEIGHT,
            position_difference: DEFAULT_POSITION_DIFFERENCE,
            initial_speed: DEFAULT_VELOCITY,
        }
    }
}

/// All user-adjustable settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub time_step: f64,
    pub merge_distance_multiplier: f64,
    pub primary: BodySettings,
    pub secondary: BodySettings,
    pub scenario: ScenarioSettings,
    pub field: FieldSampler,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            time_step: DEFAULT_TIME_STEP,
            merge_distance_multiplier: DEFAULT_MERGE_DISTANCE_MULTIPLIER,
            primary: BodySettings::default(),
            secondary: BodySettings::default(),
            scenario: ScenarioSettings::default(),
            field: FieldSampler::default(),
        }
    }
}

pub(crate) fn check(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), SettingsError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

impl Settings {
    /// Largest radius the viewport allows
    pub fn max_radius(&self) -> f64 {
        max_radius_for_height(self.scenario.height)
    }

    pub fn body(&self, id: BodyId) -> &BodySettings {
        match id {
            BodyId::Primary => &self.primary,
            BodyId::Secondary => &self.secondary,
        }
    }

    pub fn body_mut(&mut self, id: BodyId) -> &mut BodySettings {
        match id {
            BodyId::Primary => &mut self.primary,
            BodyId::Secondary => &mut self.secondary,
        }
    }

    /// Report the first value outside its control range
    pub fn validate(&self) -> Result<(), SettingsError> {
        check("time_step", self.time_step, MIN_TIME_STEP, MAX_TIME_STEP)?;
        check(
            "merge_distance_multiplier",
            self.merge_distance_multiplier,
            MIN_MERGE_DISTANCE_MULTIPLIER,
            MAX_MERGE_DISTANCE_MULTIPLIER,
        )?;
        let max_radius = self.max_radius();
        check("primary.mass", self.primary.mass, MIN_MASS, MAX_MASS)?;
        check("primary.radius", self.primary.radius, MIN_RADIUS, max_radius)?;
        check("secondary.mass", self.secondary.mass, MIN_MASS, MAX_MASS)?;
        check("secondary.radius", self.secondary.radius, MIN_RADIUS, max_radius)?;
        Ok(())
    }

    /// Copy with every value pulled into its control range
    pub fn clamped(&self) -> Self {
        let max_radius = self.max_radius().max(MIN_RADIUS);
        let clamp_body = |b: &BodySettings| BodySettings {
            mass: b.mass.clamp(MIN_MASS, MAX_MASS),
            radius: b.radius.clamp(MIN_RADIUS, max_radius),
        };
        Self {
            time_step: self.time_step.clamp(MIN_TIME_STEP, MAX_TIME_STEP),
            merge_distance_multiplier: self
                .merge_distance_multiplier
                .clamp(MIN_MERGE_DISTANCE_MULTIPLIER, MAX_MERGE_DISTANCE_MULTIPLIER),
            primary: clamp_body(&self.primary),
            secondary: clamp_body(&self.secondary),
            scenario: self.scenario,
            field: self.field,
        }
    }

    /// Starting state for a run with these settings
    pub fn initial_conditions(&self) -> PairInit {
        let s = &self.scenario;
        let cx = s.width / 2.0;
        let cy = s.height / 2.0;
        PairInit {
            primary: BodyInit::new(
                cx - s.position_difference,
                cy,
                s.initial_speed,
                s.initial_speed,
                self.primary.mass,
                self.primary.radius,
            ),
            secondary: BodyInit::new(
                cx + s.position_difference,
                cy,
                -s.initial_speed,
                -s.initial_speed,
                self.secondary.mass,
                self.secondary.radius,
            ),
        }
    }

    /// Push the live parameters into a simulator (between steps only)
    pub fn apply_to(&self, sim: &mut PairSimulator) {
        sim.set_time_step(self.time_step);
        sim.set_merge_distance_multiplier(self.merge_distance_multiplier);
        for id in [BodyId::Primary, BodyId::Secondary] {
            let b = self.body(id);
            sim.set_mass(id, b.mass);
            sim.set_radius(id, b.radius);
        }
    }

    /// Parse settings; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!("Loaded settings");
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
