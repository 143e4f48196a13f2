//! Black hole body state and per-body physics
//!
//! A body is a massive disc with position, velocity, acceleration, mass and
//! radius. It carries no rendering state: the UI reads the numeric fields and
//! draws whatever it likes.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::consts::*;

/// Gravitational constant and speed of light used by every body computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    pub g: f64,
    pub c: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self { g: G, c: C }
    }
}

/// Which slot of the pair a body occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyId {
    Primary,
    Secondary,
}

impl BodyId {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            BodyId::Primary => 0,
            BodyId::Secondary => 1,
        }
    }

    #[inline]
    pub fn other(self) -> Self {
        match self {
            BodyId::Primary => BodyId::Secondary,
            BodyId::Secondary => BodyId::Primary,
        }
    }
}

/// Initial state of one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyInit {
    pub pos: DVec2,
    pub vel: DVec2,
    pub mass: f64,
    pub radius: f64,
}

impl BodyInit {
    pub fn new(x: f64, y: f64, vx: f64, vy: f64, mass: f64, radius: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
            vel: DVec2::new(vx, vy),
            mass,
            radius,
        }
    }
}

/// A simulated black hole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: DVec2,
    pub vel: DVec2,
    /// Recomputed every step, never accumulated
    pub acc: DVec2,
    mass: f64,
    radius: f64,
    enabled: bool,
    /// Visual pulsation multiplier (1.0 = rest size)
    scale_factor: f64,
}

impl Body {
    pub fn new(init: BodyInit) -> Self {
        Self {
            pos: init.pos,
            vel: init.vel,
            acc: DVec2::ZERO,
            mass: init.mass,
            radius: init.radius,
            enabled: true,
            scale_factor: 1.0,
        }
    }

    /// Reinitialize the body and re-enable it
    pub fn reset(&mut self, init: BodyInit) {
        *self = Self::new(init);
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.pos.y
    }

    #[inline]
    pub fn vx(&self) -> f64 {
        self.vel.x
    }

    #[inline]
    pub fn vy(&self) -> f64 {
        self.vel.y
    }

    /// Effective mass: zero once the body has been absorbed
    #[inline]
    pub fn mass(&self) -> f64 {
        if self.enabled { self.mass } else { 0.0 }
    }

    /// Stored mass, regardless of the enabled flag
    #[inline]
    pub fn raw_mass(&self) -> f64 {
        self.mass
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn event_horizon_radius(&self) -> f64 {
        self.radius * EVENT_HORIZON_FACTOR
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn set_mass(&mut self, mass: f64) {
        self.mass = mass;
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
    }

    /// A disabled body reports zero mass to every computation
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_scale_factor(&mut self, scale: f64) {
        self.scale_factor = scale;
    }

    pub fn reset_scale_factor(&mut self) {
        self.scale_factor = 1.0;
    }

    /// Euclidean distance to a point
    #[inline]
    pub fn distance_to(&self, point: DVec2) -> f64 {
        self.pos.distance(point)
    }

    #[inline]
    pub fn distance_to_body(&self, other: &Body) -> f64 {
        self.distance_to(other.pos)
    }

    /// True if the point lies on or inside the event horizon
    #[inline]
    pub fn is_in_event_horizon(&self, point: DVec2) -> bool {
        let r = self.event_horizon_radius();
        self.pos.distance_squared(point) <= r * r
    }

    /// Schwarzschild radius `2GM/c²`
    pub fn schwarzschild_radius(&self, k: &PhysicalConstants) -> f64 {
        2.0 * k.g * self.mass() / (k.c * k.c)
    }

    /// Field strength `GM/d²` at the given distance.
    ///
    /// Callers must ensure `distance > 0`; the result is infinite otherwise.
    #[inline]
    pub fn gravitational_force(&self, distance: f64, k: &PhysicalConstants) -> f64 {
        k.g * self.mass() / (distance * distance)
    }

    /// Visual pulsation multiplier relative to the partner.
    ///
    /// Stays at 1.0 while the bodies overlap either horizon.
    pub fn scale_factor_relative_to(&self, other: &Body, k: &PhysicalConstants) -> f64 {
        let distance = self.distance_to_body(other);
        if distance == 0.0
            || distance < self.event_horizon_radius()
            || distance < other.event_horizon_radius()
        {
            return 1.0;
        }
        1.0 + self.gravitational_force(distance, k) / distance
    }

    /// Gravitational-wave frequency estimate from the Schwarzschild metric.
    ///
    /// Orbital frequency of the pair corrected by the reduced mass and this
    /// body's Schwarzschild radius, so it is not symmetric in `self`/`other`
    /// unless both Schwarzschild radii match.
    pub fn wave_frequency(&self, other: &Body, k: &PhysicalConstants) -> f64 {
        let distance = self.distance_to_body(other);
        let m1 = self.mass();
        let m2 = other.mass();
        let total_mass = m1 + m2;
        let reduced_mass = m1 * m2 / total_mass;
        let c2 = k.c * k.c;

        let orbital = (k.g * total_mass / distance.powi(3)).sqrt() / (2.0 * PI);
        let correction = 1.0 - 6.0 * k.g * reduced_mass / (c2 * distance)
            + 8.0 * PI * k.g * reduced_mass * self.schwarzschild_radius(k) / (3.0 * c2 * distance);

        orbital * correction
    }

    /// Semi-implicit Euler velocity update
    #[inline]
    pub fn update_velocity(&mut self, dt: f64) {
        self.vel += self.acc * dt;
    }

    /// Position update from the already-updated velocity plus the `½·a·dt²` term
    #[inline]
    pub fn update_position(&mut self, dt: f64) {
        self.pos += self.vel * dt + 0.5 * self.acc * dt * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_at(x: f64, y: f64, mass: f64, radius: f64) -> Body {
        Body::new(BodyInit::new(x, y, 0.0, 0.0, mass, radius))
    }

    #[test]
    fn test_distance() {
        let a = body_at(0.0, 0.0, 1.0, 10.0);
        let b = body_at(3.0, 4.0, 1.0, 10.0);
        assert!((a.distance_to_body(&b) - 5.0).abs() < 1e-12);
        assert_eq!(a.distance_to(a.pos), 0.0);
    }

    #[test]
    fn test_event_horizon_boundary() {
        let b = body_at(100.0, 100.0, 1.0, 50.0);
        // Horizon radius is 51
        assert!(b.is_in_event_horizon(DVec2::new(151.0, 100.0)));
        assert!(b.is_in_event_horizon(DVec2::new(130.0, 100.0)));
        assert!(!b.is_in_event_horizon(DVec2::new(151.5, 100.0)));
    }

    #[test]
    fn test_disabled_body_has_no_mass() {
        let k = PhysicalConstants::default();
        let mut b = body_at(0.0, 0.0, DEFAULT_MASS, DEFAULT_RADIUS);
        assert!(b.gravitational_force(100.0, &k) > 0.0);

        b.set_enabled(false);
        assert_eq!(b.mass(), 0.0);
        assert_eq!(b.raw_mass(), DEFAULT_MASS);
        assert_eq!(b.gravitational_force(100.0, &k), 0.0);
        assert_eq!(b.schwarzschild_radius(&k), 0.0);
    }

    #[test]
    fn test_gravitational_force_inverse_square() {
        let k = PhysicalConstants::default();
        let b = body_at(0.0, 0.0, DEFAULT_MASS, DEFAULT_RADIUS);
        let ratio = b.gravitational_force(100.0, &k) / b.gravitational_force(200.0, &k);
        assert!((ratio - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_scale_factor_inside_horizon_is_one() {
        let k = PhysicalConstants::default();
        let a = body_at(0.0, 0.0, DEFAULT_MASS, 44.0);
        let b = body_at(40.0, 0.0, DEFAULT_MASS, 44.0);
        assert_eq!(a.scale_factor_relative_to(&b, &k), 1.0);

        let same = body_at(0.0, 0.0, DEFAULT_MASS, 44.0);
        assert_eq!(a.scale_factor_relative_to(&same, &k), 1.0);
    }

    #[test]
    fn test_scale_factor_grows_when_closer() {
        let k = PhysicalConstants::default();
        let a = body_at(0.0, 0.0, DEFAULT_MASS, 44.0);
        let near = body_at(100.0, 0.0, DEFAULT_MASS, 44.0);
        let far = body_at(400.0, 0.0, DEFAULT_MASS, 44.0);
        let s_near = a.scale_factor_relative_to(&near, &k);
        let s_far = a.scale_factor_relative_to(&far, &k);
        assert!(s_near > s_far);
        assert!(s_far > 1.0);
    }

    #[test]
    fn test_wave_frequency_symmetric_for_equal_masses() {
        let k = PhysicalConstants::default();
        let a = body_at(0.0, 0.0, DEFAULT_MASS, 44.0);
        let b = body_at(200.0, 0.0, DEFAULT_MASS, 30.0);
        assert_eq!(a.wave_frequency(&b, &k), b.wave_frequency(&a, &k));
    }

    #[test]
    fn test_wave_frequency_asymmetry_is_schwarzschild_term() {
        // Unit constants so the relativistic terms are visible in f64
        let k = PhysicalConstants { g: 1.0, c: 1.0 };
        let a = body_at(0.0, 0.0, 1.0, 1.0);
        let b = body_at(100.0, 0.0, 3.0, 1.0);
        let d: f64 = 100.0;

        let f_ab = a.wave_frequency(&b, &k);
        let f_ba = b.wave_frequency(&a, &k);
        assert!(f_ab != f_ba);

        let mu = 0.75;
        let orbital = (4.0 / d.powi(3)).sqrt() / (2.0 * PI);
        let rs_diff = a.schwarzschild_radius(&k) - b.schwarzschild_radius(&k);
        let expected = orbital * 8.0 * PI * mu * rs_diff / (3.0 * d);
        assert!(((f_ab - f_ba) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_wave_frequency_absolute_value() {
        let k = PhysicalConstants { g: 1.0, c: 1.0 };
        let a = body_at(0.0, 0.0, 1.0, 1.0);
        let b = body_at(100.0, 0.0, 3.0, 1.0);

        // M = 4, mu = 0.75, rs(a) = 2, d = 100
        let orbital = 0.002 / (2.0 * PI);
        let correction = 1.0 - 6.0 * 0.75 / 100.0 + 8.0 * PI * 0.75 * 2.0 / 300.0;
        assert!((correction - (0.955 + 0.04 * PI)).abs() < 1e-15);
        assert!((a.wave_frequency(&b, &k) - orbital * correction).abs() < 1e-15);

        // rs(b) = 6
        let correction_b = 0.955 + 0.12 * PI;
        assert!((b.wave_frequency(&a, &k) - orbital * correction_b).abs() < 1e-15);
    }

    #[test]
    fn test_wave_frequency_rises_as_bodies_approach() {
        let k = PhysicalConstants::default();
        let a = body_at(0.0, 0.0, DEFAULT_MASS, 44.0);
        let near = body_at(100.0, 0.0, DEFAULT_MASS, 44.0);
        let far = body_at(300.0, 0.0, DEFAULT_MASS, 44.0);
        assert!(a.wave_frequency(&near, &k) > a.wave_frequency(&far, &k));
    }

    #[test]
    fn test_integration_order() {
        let mut b = Body::new(BodyInit::new(0.0, 0.0, 1.0, 0.0, 1.0, 1.0));
        b.acc = DVec2::new(2.0, 0.0);
        b.update_velocity(0.5);
        b.update_position(0.5);
        // v = 1 + 2*0.5 = 2; x = 2*0.5 + 0.5*2*0.25 = 1.25
        assert!((b.vx() - 2.0).abs() < 1e-12);
        assert!((b.x() - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_reset_reenables() {
        let init = BodyInit::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let mut b = Body::new(init);
        b.set_enabled(false);
        b.pos = DVec2::new(99.0, 99.0);
        b.set_scale_factor(1.7);
        b.reset(init);
        assert_eq!(b, Body::new(init));
        assert!(b.is_enabled());
    }
}
