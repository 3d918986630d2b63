use crate::segments::domain::edit_rejected::EditRejected;
use crate::shared::constants::{DEFAULT_SNAP_STEP, MAGNET_THRESHOLD, TIME_EPSILON};

/// Grid and magnet policy shared by every drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapSettings {
    snap_step: f64,
    magnet_threshold: f64,
}

impl SnapSettings {
    pub fn new(snap_step: f64) -> Result<Self, EditRejected> {
        validate_snap_step(snap_step)?;
        Ok(Self {
            snap_step,
            magnet_threshold: MAGNET_THRESHOLD,
        })
    }

    pub fn snap_step(&self) -> f64 {
        self.snap_step
    }

    pub fn magnet_threshold(&self) -> f64 {
        self.magnet_threshold
    }

    pub fn set_snap_step(&mut self, snap_step: f64) -> Result<(), EditRejected> {
        validate_snap_step(snap_step)?;
        self.snap_step = snap_step;
        Ok(())
    }

    /// Round `time` to the nearest multiple of the snap step.
    pub fn quantize(&self, time: f64) -> f64 {
        (time / self.snap_step).round() * self.snap_step
    }

    /// Snapped drag target: the grid value, unless it falls within the
    /// magnet threshold of `neighbor`, in which case exactly `neighbor`.
    pub fn resolve(&self, time: f64, neighbor: Option<f64>) -> f64 {
        let snapped = self.quantize(time);
        match neighbor {
            Some(n) if (snapped - n).abs() <= self.magnet_threshold + TIME_EPSILON => n,
            _ => snapped,
        }
    }
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            snap_step: DEFAULT_SNAP_STEP,
            magnet_threshold: MAGNET_THRESHOLD,
        }
    }
}

pub fn validate_snap_step(snap_step: f64) -> Result<(), EditRejected> {
    if snap_step.is_finite() && snap_step > 0.0 {
        Ok(())
    } else {
        Err(EditRejected::InvalidSnapStep(snap_step))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(2.04, 2.0)]
    #[case(2.06, 2.1)]
    #[case(0.0, 0.0)]
    #[case(9.97, 10.0)]
    fn test_quantize_default_step(#[case] time: f64, #[case] expected: f64) {
        assert_relative_eq!(SnapSettings::default().quantize(time), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_quantize_custom_step() {
        let s = SnapSettings::new(0.25).unwrap();
        assert_relative_eq!(s.quantize(1.13), 1.25);
        assert_relative_eq!(s.quantize(1.12), 1.0);
    }

    #[test]
    fn test_magnet_pulls_onto_neighbor() {
        let s = SnapSettings::new(0.01).unwrap();
        assert_eq!(s.resolve(2.02, Some(2.0)), 2.0);
    }

    #[test]
    fn test_magnet_ignores_far_neighbor() {
        let s = SnapSettings::new(0.01).unwrap();
        assert_relative_eq!(s.resolve(2.05, Some(2.0)), 2.05, epsilon = 1e-9);
    }

    #[test]
    fn test_magnet_hits_off_grid_neighbor() {
        let s = SnapSettings::default();
        assert_eq!(s.resolve(2.1, Some(2.113)), 2.113);
    }

    #[test]
    fn test_no_neighbor_returns_grid_value() {
        let s = SnapSettings::default();
        assert_relative_eq!(s.resolve(3.33, None), 3.3, epsilon = 1e-9);
    }

    #[rstest]
    #[case::zero(0.0)]
    #[case::negative(-0.1)]
    #[case::nan(f64::NAN)]
    #[case::infinite(f64::INFINITY)]
    fn test_invalid_snap_step_rejected(#[case] step: f64) {
        assert!(SnapSettings::new(step).is_err());
        let mut s = SnapSettings::default();
        assert!(s.set_snap_step(step).is_err());
        assert_relative_eq!(s.snap_step(), DEFAULT_SNAP_STEP);
    }
}
