//! Catmull-Rom spline through a list of control points.
//!
//! Used by the procedural models for arms, linkers and tubes, and by the
//! transcription animation for its arc-length parameterised path.

use glam::Vec3;

/// Samples used for the arc-length lookup table.
const ARC_DIVISIONS: usize = 200;

/// Open uniform Catmull-Rom curve with an arc-length table.
#[derive(Debug, Clone)]
pub struct CatmullRom {
    points: Vec<Vec3>,
    /// Cumulative length at `t = i / ARC_DIVISIONS`.
    arc_lengths: Vec<f32>,
}

impl CatmullRom {
    /// Needs at least one control point.
    pub fn new(points: Vec<Vec3>) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut curve = Self {
            points,
            arc_lengths: Vec::with_capacity(ARC_DIVISIONS + 1),
        };

        let mut total = 0.0;
        let mut last = curve.point(0.0);
        curve.arc_lengths.push(0.0);
        for i in 1..=ARC_DIVISIONS {
            let p = curve.point(i as f32 / ARC_DIVISIONS as f32);
            total += p.distance(last);
            curve.arc_lengths.push(total);
            last = p;
        }
        Some(curve)
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn length(&self) -> f32 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at curve parameter `t` in [0, 1]. Spacing follows the control points.
    pub fn point(&self, t: f32) -> Vec3 {
        let n = self.points.len();
        if n == 1 {
            return self.points[0];
        }

        let p = (n - 1) as f32 * t.clamp(0.0, 1.0);
        let i = (p.floor() as usize).min(n - 2);
        let w = p - i as f32;

        let p1 = self.points[i];
        let p2 = self.points[i + 1];
        // Open ends are extrapolated.
        let p0 = if i > 0 { self.points[i - 1] } else { p1 * 2.0 - p2 };
        let p3 = if i + 2 < n {
            self.points[i + 2]
        } else {
            p2 * 2.0 - p1
        };

        let w2 = w * w;
        let w3 = w2 * w;
        0.5 * ((2.0 * p1)
            + (p2 - p0) * w
            + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * w2
            + (3.0 * p1 - p0 - 3.0 * p2 + p3) * w3)
    }

    /// Point at fraction `u` of the total arc length.
    pub fn point_at(&self, u: f32) -> Vec3 {
        self.point(self.arc_to_t(u))
    }

    /// `divisions + 1` points at evenly spaced parameters.
    pub fn points(&self, divisions: usize) -> Vec<Vec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point(i as f32 / divisions as f32))
            .collect()
    }

    fn arc_to_t(&self, u: f32) -> f32 {
        let total = self.length();
        if total <= f32::EPSILON {
            return u.clamp(0.0, 1.0);
        }
        let target = u.clamp(0.0, 1.0) * total;

        // First sample at or beyond the target length.
        let hi = self
            .arc_lengths
            .partition_point(|&len| len < target)
            .clamp(1, ARC_DIVISIONS);
        let lo = hi - 1;
        let span = self.arc_lengths[hi] - self.arc_lengths[lo];
        let frac = if span > f32::EPSILON {
            (target - self.arc_lengths[lo]) / span
        } else {
            0.0
        };
        (lo as f32 + frac) / ARC_DIVISIONS as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(count: usize, spacing: f32) -> Vec<Vec3> {
        (0..count)
            .map(|i| Vec3::new(0.0, (i as f32 - count as f32 / 2.0) * spacing, 0.0))
            .collect()
    }

    #[test]
    fn test_passes_through_control_points() {
        let points = vec![Vec3::ZERO, Vec3::new(10.0, 5.0, 0.0), Vec3::new(20.0, 0.0, 3.0)];
        let curve = CatmullRom::new(points.clone()).unwrap();
        assert!(curve.point(0.0).distance(points[0]) < 1e-5);
        assert!(curve.point(0.5).distance(points[1]) < 1e-4);
        assert!(curve.point(1.0).distance(points[2]) < 1e-4);
    }

    #[test]
    fn test_straight_column_is_linear_in_arc_length() {
        let curve = CatmullRom::new(column(40, 3.4)).unwrap();
        assert!((curve.length() - 39.0 * 3.4).abs() < 1e-2);

        let start = curve.point_at(0.0);
        let mid = curve.point_at(0.5);
        assert!((mid.y - (start.y + curve.length() * 0.5)).abs() < 1e-2, "mid {:?}", mid);
    }

    #[test]
    fn test_point_at_reaches_both_ends() {
        let points = vec![Vec3::ZERO, Vec3::new(1.0, 4.0, 0.0), Vec3::new(30.0, 0.0, -2.0)];
        let curve = CatmullRom::new(points.clone()).unwrap();
        assert!(curve.point_at(0.0).distance(points[0]) < 1e-4);
        assert!(curve.point_at(1.0).distance(points[2]) < 1e-3);
    }

    #[test]
    fn test_single_point_and_empty() {
        assert!(CatmullRom::new(Vec::new()).is_none());
        let curve = CatmullRom::new(vec![Vec3::ONE]).unwrap();
        assert_eq!(curve.point_at(0.7), Vec3::ONE);
        assert_eq!(curve.length(), 0.0);
    }

    #[test]
    fn test_points_count() {
        let curve = CatmullRom::new(column(3, 1.0)).unwrap();
        assert_eq!(curve.points(30).len(), 31);
    }
}
