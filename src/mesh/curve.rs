//! Centripetal Catmull-Rom control curves
//!
//! Used as the spine for trunks, frond stems, seaweed strands and the
//! mermaid tail. `point(t)` is parameterized per control segment while
//! `point_at_fraction(u)` walks the curve by arc length, so objects
//! distributed along `u` are evenly spaced.

use glam::Vec3;

/// Samples used to build the arc-length table
const ARC_DIVISIONS: usize = 200;

#[derive(Debug, Clone)]
pub struct CatmullRomCurve {
    points: Vec<Vec3>,
    /// Cumulative arc length at `t = i / ARC_DIVISIONS`
    arc_lengths: Vec<f32>,
}

/// Cubic segment coefficients for one coordinate axis set
#[derive(Debug, Clone, Copy)]
struct Cubic {
    c0: Vec3,
    c1: Vec3,
    c2: Vec3,
    c3: Vec3,
}

impl Cubic {
    fn nonuniform(x0: Vec3, x1: Vec3, x2: Vec3, x3: Vec3, dt0: f32, dt1: f32, dt2: f32) -> Self {
        let mut t1 = (x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1;
        let mut t2 = (x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2;
        t1 *= dt1;
        t2 *= dt1;
        Self {
            c0: x1,
            c1: t1,
            c2: -3.0 * x1 + 3.0 * x2 - 2.0 * t1 - t2,
            c3: 2.0 * x1 - 2.0 * x2 + t1 + t2,
        }
    }

    fn eval(&self, t: f32) -> Vec3 {
        self.c0 + self.c1 * t + self.c2 * (t * t) + self.c3 * (t * t * t)
    }
}

impl CatmullRomCurve {
    /// Build a curve through `points`. Fewer than two points degenerate to a
    /// single fixed point.
    pub fn new(points: Vec<Vec3>) -> Self {
        let points = match points.len() {
            0 => vec![Vec3::ZERO, Vec3::ZERO],
            1 => vec![points[0], points[0]],
            _ => points,
        };
        let mut curve = Self {
            points,
            arc_lengths: Vec::new(),
        };
        curve.arc_lengths = curve.build_arc_table();
        curve
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    /// Total arc length
    pub fn length(&self) -> f32 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at segment parameter `t` in [0, 1]
    pub fn point(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        let n = self.points.len();
        let p = (n - 1) as f32 * t;
        let mut index = p.floor() as usize;
        let mut weight = p - index as f32;

        if index >= n - 1 {
            index = n - 2;
            weight = 1.0;
        }

        let p1 = self.points[index];
        let p2 = self.points[index + 1];
        // Extrapolate phantom end points so the curve passes through both ends
        let p0 = if index > 0 {
            self.points[index - 1]
        } else {
            2.0 * p1 - p2
        };
        let p3 = if index + 2 < n {
            self.points[index + 2]
        } else {
            2.0 * p2 - p1
        };

        let mut dt0 = p0.distance_squared(p1).powf(0.25);
        let mut dt1 = p1.distance_squared(p2).powf(0.25);
        let mut dt2 = p2.distance_squared(p3).powf(0.25);
        if dt1 < 1e-4 {
            dt1 = 1.0;
        }
        if dt0 < 1e-4 {
            dt0 = dt1;
        }
        if dt2 < 1e-4 {
            dt2 = dt1;
        }

        Cubic::nonuniform(p0, p1, p2, p3, dt0, dt1, dt2).eval(weight)
    }

    /// Point at arc-length fraction `u` in [0, 1]
    pub fn point_at_fraction(&self, u: f32) -> Vec3 {
        self.point(self.fraction_to_t(u))
    }

    /// Unit tangent at arc-length fraction `u`
    pub fn tangent_at_fraction(&self, u: f32) -> Vec3 {
        let t = self.fraction_to_t(u);
        let delta = 1e-4;
        let t1 = (t - delta).max(0.0);
        let t2 = (t + delta).min(1.0);
        (self.point(t2) - self.point(t1))
            .try_normalize()
            .unwrap_or(Vec3::Y)
    }

    fn build_arc_table(&self) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(ARC_DIVISIONS + 1);
        let mut last = self.point(0.0);
        let mut sum = 0.0;
        lengths.push(0.0);
        for i in 1..=ARC_DIVISIONS {
            let p = self.point(i as f32 / ARC_DIVISIONS as f32);
            sum += p.distance(last);
            lengths.push(sum);
            last = p;
        }
        lengths
    }

    /// Map an arc-length fraction to the segment parameter
    fn fraction_to_t(&self, u: f32) -> f32 {
        let total = self.length();
        if total <= f32::EPSILON {
            return u.clamp(0.0, 1.0);
        }
        let target = u.clamp(0.0, 1.0) * total;

        // First table entry at or past the target length
        let i = self.arc_lengths.partition_point(|&l| l < target);
        if i == 0 {
            return 0.0;
        }
        if i > ARC_DIVISIONS {
            return 1.0;
        }

        let before = self.arc_lengths[i - 1];
        let after = self.arc_lengths[i];
        let span = after - before;
        let frac = if span > 0.0 { (target - before) / span } else { 0.0 };
        ((i - 1) as f32 + frac) / ARC_DIVISIONS as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stem() -> CatmullRomCurve {
        CatmullRomCurve::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, -0.5, 0.0),
            Vec3::new(2.5, -1.5, 0.0),
            Vec3::new(4.0, -2.5, 0.0),
        ])
    }

    #[test]
    fn test_curve_passes_through_control_points() {
        let curve = stem();
        assert!(curve.point(0.0).distance(Vec3::ZERO) < 1e-5);
        assert!(curve.point(1.0 / 3.0).distance(Vec3::new(1.0, -0.5, 0.0)) < 1e-4);
        assert!(curve.point(1.0).distance(Vec3::new(4.0, -2.5, 0.0)) < 1e-5);
    }

    #[test]
    fn test_fraction_endpoints() {
        let curve = stem();
        assert!(curve.point_at_fraction(0.0).distance(Vec3::ZERO) < 1e-5);
        assert!(curve.point_at_fraction(1.0).distance(Vec3::new(4.0, -2.5, 0.0)) < 1e-4);
    }

    #[test]
    fn test_fraction_is_evenly_spaced() {
        let curve = stem();
        let samples: Vec<Vec3> = (0..=10).map(|i| curve.point_at_fraction(i as f32 / 10.0)).collect();
        let steps: Vec<f32> = samples.windows(2).map(|w| w[0].distance(w[1])).collect();
        let expected = curve.length() / 10.0;
        for step in steps {
            assert!((step - expected).abs() < expected * 0.05);
        }
    }

    #[test]
    fn test_straight_line_length() {
        let curve = CatmullRomCurve::new(vec![Vec3::ZERO, Vec3::new(0.0, 4.0, 0.0), Vec3::new(0.0, 8.0, 0.0)]);
        assert!((curve.length() - 8.0).abs() < 1e-3);
        assert!((curve.tangent_at_fraction(0.5) - Vec3::Y).length() < 1e-3);
    }

    #[test]
    fn test_degenerate_curve() {
        let curve = CatmullRomCurve::new(vec![Vec3::ONE]);
        assert_eq!(curve.point_at_fraction(0.7), Vec3::ONE);
        assert_eq!(curve.length(), 0.0);
    }
}
