//! Black hole merge simulator - two-body gravitational kernel
//!
//! Core modules:
//! - `sim`: Body state, pair stepping (force, merge, integration, wave frequency)
//!   and the field sampler used to distort the spacetime grid
//! - `clock`: Fixed-cadence frame admission
//! - `settings`: User-facing configuration with the control ranges
//! - `session`: Start/pause/reset control over the kernel
//! - `recap`: End-of-run summary

pub mod clock;
pub mod recap;
pub mod session;
pub mod settings;
pub mod sim;

pub use clock::FrameClock;
pub use recap::Recap;
pub use session::{FrameReport, Session, SessionPhase};
pub use settings::{Settings, SettingsError};

/// Simulation configuration constants
pub mod consts {
    /// Gravitational constant (simulation scale)
    pub const G: f64 = 6.674010551359e-11;
    /// Speed of light
    pub const C: f64 = 299_792_458.0;

    /// Target cadence of the simulation loop
    pub const FPS: u64 = 144;
    /// Frame period in nanoseconds
    pub const FRAME_TIME_NANOS: u64 = 1_000_000_000 / FPS;

    /// Event horizon drawn slightly outside the body radius
    pub const EVENT_HORIZON_FACTOR: f64 = 1.02;
    /// Multiplier applied to the physical wave frequency before display/audio
    pub const WAVE_FREQUENCY_DISPLAY_SCALE: f64 = 1.0e4;

    /// Body defaults
    pub const DEFAULT_TIME_STEP: f64 = 0.1;
    pub const DEFAULT_MASS: f64 = 5.0e15;
    pub const DEFAULT_RADIUS: f64 = 44.0;
    pub const DEFAULT_VELOCITY: f64 = 7.5;
    pub const DEFAULT_POSITION_DIFFERENCE: f64 = 500.0;
    pub const DEFAULT_MERGE_DISTANCE_MULTIPLIER: f64 = 0.9;

    /// Simulation viewport (75% x 90% of a 1920x1080 screen)
    pub const DEFAULT_SIMULATION_WIDTH: f64 = 1440.0;
    pub const DEFAULT_SIMULATION_HEIGHT: f64 = 972.0;

    /// Spacetime grid
    pub const GRID_CELL_SIZE: f64 = 12.5;
    pub const GRID_QUALITY: f64 = 5.0;
    pub const GRID_FORCE_MULTIPLIER: f64 = 1.5;
    pub const GRID_MAX_FORCE: f64 = 75.0;

    /// Control ranges
    pub const MIN_TIME_STEP: f64 = 0.01;
    pub const MAX_TIME_STEP: f64 = 1.0;
    pub const MIN_RADIUS: f64 = 25.0;
    pub const MIN_MASS: f64 = 1.0;
    pub const MAX_MASS: f64 = DEFAULT_MASS * 4.0;
    pub const MIN_MERGE_DISTANCE_MULTIPLIER: f64 = 0.0;
    pub const MAX_MERGE_DISTANCE_MULTIPLIER: f64 = 10.0;
}

/// Largest radius that keeps the event horizon inside the viewport height
#[inline]
pub fn max_radius_for_height(height: f64) -> f64 {
    (height / 2.0) / consts::EVENT_HORIZON_FACTOR
}
