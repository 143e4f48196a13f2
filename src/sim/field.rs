//! Force-field sampling for the spacetime grid
//!
//! Pure reads of the pair state: each grid point is pulled toward the enabled
//! bodies by their field strength, so the grid visibly sags around them.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, PhysicalConstants};
use crate::consts::*;

/// Displacement and brightness for one grid point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSample {
    /// Offset to draw the point at
    pub displacement: DVec2,
    /// Brightness in [0, 1]
    pub brightness: f64,
}

/// A sampled grid point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub origin: DVec2,
    pub sample: FieldSample,
}

impl GridPoint {
    /// Where the point should be drawn
    #[inline]
    pub fn displaced(&self) -> DVec2 {
        self.origin + self.sample.displacement
    }
}

/// Grid sampling parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSampler {
    pub max_force: f64,
    pub force_multiplier: f64,
    /// Spacing between grid lines
    pub cell_size: f64,
    /// Spacing between samples along a line
    pub quality: f64,
}

impl Default for FieldSampler {
    fn default() -> Self {
        Self {
            max_force: GRID_MAX_FORCE,
            force_multiplier: GRID_FORCE_MULTIPLIER,
            cell_size: GRID_CELL_SIZE,
            quality: GRID_QUALITY,
        }
    }
}

fn in_any_horizon(bodies: &[Body; 2], point: DVec2) -> bool {
    bodies
        .iter()
        .any(|b| b.is_enabled() && b.is_in_event_horizon(point))
}

impl FieldSampler {
    /// Sample the field at `point`.
    ///
    /// Returns `None` when the point must not be drawn: it lies inside an
    /// enabled horizon, a body's field exceeds `max_force` there, or the
    /// displaced point would land inside a horizon.
    pub fn sample(&self, bodies: &[Body; 2], point: DVec2, k: &PhysicalConstants) -> Option<FieldSample> {
        if in_any_horizon(bodies, point) {
            return None;
        }

        let mut pull = [DVec2::ZERO; 2];
        for (body, slot) in bodies.iter().zip(pull.iter_mut()) {
            if !body.is_enabled() {
                continue;
            }
            let distance = body.distance_to(point);
            let force = body.gravitational_force(distance, k);
            if force > self.max_force {
                return None;
            }
            *slot = (body.pos - point) / distance * force;
        }

        let displacement = (pull[0] + pull[1]) * self.force_multiplier;
        if in_any_horizon(bodies, point + displacement) {
            return None;
        }

        let brightness = (1.0 - ((displacement.x + displacement.y) / self.max_force).abs()).clamp(0.0, 1.0);
        Some(FieldSample {
            displacement,
            brightness,
        })
    }

    /// Walk the grid lines of a `width` x `height` viewport.
    ///
    /// Samples every `quality` units and keeps points lying on a grid line
    /// (`x` or `y` a multiple of `cell_size`). Suppressed points are dropped.
    pub fn sweep(&self, bodies: &[Body; 2], width: f64, height: f64, k: &PhysicalConstants) -> Vec<GridPoint> {
        let mut points = Vec::new();
        if self.quality <= 0.0 || self.cell_size <= 0.0 {
            return points;
        }

        let mut x = 0.0;
        while x < width {
            let mut y = 0.0;
            while y < height {
                if x % self.cell_size == 0.0 || y % self.cell_size == 0.0 {
                    let origin = DVec2::new(x, y);
                    if let Some(sample) = self.sample(bodies, origin, k) {
                        points.push(GridPoint { origin, sample });
                    }
                }
                y += self.quality;
            }
            x += self.quality;
        }

        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::BodyInit;
    use proptest::prelude::*;

    fn pair() -> [Body; 2] {
        [
            Body::new(BodyInit::new(400.0, 300.0, 0.0, 0.0, DEFAULT_MASS, DEFAULT_RADIUS)),
            Body::new(BodyInit::new(900.0, 300.0, 0.0, 0.0, DEFAULT_MASS, DEFAULT_RADIUS)),
        ]
    }

    #[test]
    fn test_suppressed_inside_horizon() {
        let bodies = pair();
        let k = PhysicalConstants::default();
        let sampler = FieldSampler::default();
        assert!(sampler.sample(&bodies, DVec2::new(400.0, 300.0), &k).is_none());
        assert!(sampler.sample(&bodies, DVec2::new(430.0, 300.0), &k).is_none());
    }

    #[test]
    fn test_suppressed_above_max_force() {
        let bodies = pair();
        let k = PhysicalConstants::default();
        let sampler = FieldSampler::default();
        // Field at 60 units is G*M/3600 ~ 92.7 > 75
        assert!(sampler.sample(&bodies, DVec2::new(460.0, 300.0), &k).is_none());
    }

    #[test]
    fn test_far_point_pulled_toward_body() {
        let bodies = pair();
        let k = PhysicalConstants::default();
        let sampler = FieldSampler::default();
        let sample = sampler
            .sample(&bodies, DVec2::new(400.0, 100.0), &k)
            .expect("point 200 units away should be drawn");
        // Mostly pulled down toward the nearer body
        assert!(sample.displacement.y > 0.0);
        assert!((0.0..=1.0).contains(&sample.brightness));
    }

    #[test]
    fn test_disabled_body_contributes_nothing() {
        let mut bodies = pair();
        let k = PhysicalConstants::default();
        let sampler = FieldSampler::default();
        bodies[1].set_enabled(false);

        // Inside the disabled horizon: drawn, and only pulled by body 0
        let sample = sampler
            .sample(&bodies, DVec2::new(900.0, 300.0), &k)
            .expect("disabled horizon must not suppress");
        assert!(sample.displacement.x < 0.0);

        let p = DVec2::new(650.0, 200.0);
        let b = &bodies[0];
        let d = b.distance_to(p);
        let single = (b.pos - p) / d * b.gravitational_force(d, &k) * sampler.force_multiplier;
        let sampled = sampler.sample(&bodies, p, &k).map(|s| s.displacement);
        assert_eq!(sampled, Some(single));
    }

    #[test]
    fn test_sweep_only_keeps_grid_lines() {
        let bodies = pair();
        let k = PhysicalConstants::default();
        let sampler = FieldSampler::default();
        let points = sampler.sweep(&bodies, 200.0, 100.0, &k);
        assert!(!points.is_empty());
        for p in &points {
            let on_line = p.origin.x % 12.5 == 0.0 || p.origin.y % 12.5 == 0.0;
            assert!(on_line, "off-grid point {:?}", p.origin);
        }
        // (5, 5) is sampled but lies on no grid line
        assert!(!points.iter().any(|p| p.origin == DVec2::new(5.0, 5.0)));
        assert!(points.iter().any(|p| p.origin == DVec2::new(0.0, 5.0)));
    }

    #[test]
    fn test_sweep_skips_horizons() {
        let bodies = pair();
        let k = PhysicalConstants::default();
        let sampler = FieldSampler::default();
        let points = sampler.sweep(&bodies, 1440.0, 600.0, &k);
        for p in &points {
            assert!(!bodies.iter().any(|b| b.is_in_event_horizon(p.origin)));
            assert!(!bodies.iter().any(|b| b.is_in_event_horizon(p.displaced())));
        }
    }

    proptest! {
        #[test]
        fn prop_inside_horizon_is_suppressed(angle in 0.0..std::f64::consts::TAU, frac in 0.0..0.999f64) {
            let bodies = pair();
            let k = PhysicalConstants::default();
            let b = &bodies[0];
            let r = b.event_horizon_radius() * frac;
            let p = b.pos + DVec2::new(angle.cos(), angle.sin()) * r;
            prop_assert!(FieldSampler::default().sample(&bodies, p, &k).is_none());
        }

        #[test]
        fn prop_displaced_point_stays_outside_horizons(x in 0.0..1440.0f64, y in 0.0..972.0f64) {
            let bodies = pair();
            let k = PhysicalConstants::default();
            let sampler = FieldSampler::default();
            let origin = DVec2::new(x, y);
            if let Some(sample) = sampler.sample(&bodies, origin, &k) {
                let p = origin + sample.displacement;
                prop_assert!(!bodies.iter().any(|b| b.is_in_event_horizon(p)));
                prop_assert!((0.0..=1.0).contains(&sample.brightness));
            }
        }
    }
}
