/// Horizontal placement of the timeline track on screen, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    pub left: f64,
    pub width: f64,
}

impl TrackGeometry {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Linear map from a pointer x-coordinate to a time in `[0, duration]`.
    /// Positions outside the track pin to its edges.
    pub fn time_at(&self, x: f64, duration: f64) -> f64 {
        if self.width <= 0.0 || !x.is_finite() {
            return 0.0;
        }
        ((x - self.left) / self.width).clamp(0.0, 1.0) * duration
    }

    pub fn x_at(&self, time: f64, duration: f64) -> f64 {
        if duration <= 0.0 {
            return self.left;
        }
        self.left + (time / duration) * self.width
    }
}

impl Default for TrackGeometry {
    fn default() -> Self {
        Self::new(0.0, 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::left_edge(100.0, 0.0)]
    #[case::middle(300.0, 5.0)]
    #[case::right_edge(500.0, 10.0)]
    #[case::before_track(0.0, 0.0)]
    #[case::after_track(900.0, 10.0)]
    fn test_time_at(#[case] x: f64, #[case] expected: f64) {
        let g = TrackGeometry::new(100.0, 400.0);
        assert_relative_eq!(g.time_at(x, 10.0), expected);
    }

    #[test]
    fn test_zero_width_maps_to_zero() {
        let g = TrackGeometry::new(0.0, 0.0);
        assert_relative_eq!(g.time_at(50.0, 10.0), 0.0);
    }

    #[test]
    fn test_x_at_inverts_time_at() {
        let g = TrackGeometry::new(20.0, 800.0);
        let x = g.x_at(3.5, 14.0);
        assert_relative_eq!(g.time_at(x, 14.0), 3.5, epsilon = 1e-9);
    }
}
