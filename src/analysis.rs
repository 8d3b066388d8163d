//! Sensitivity comparison math.
//!
//! Everything here is a pure function over accumulated motion state, so the
//! whole module is testable without any device attached. The contract for a
//! comparison gesture is: move both devices through the *same physical path*,
//! then ask how the accumulated vectors relate.

use std::fmt;
use std::time::Duration;

use crate::device::Device;

/// Euclidean norm of an accumulated displacement. Zero vector yields 0.
pub fn magnitude(dx: i64, dy: i64) -> f64 {
    (dx as f64).hypot(dy as f64)
}

/// Factor the sensitivity setting used with `from` should be multiplied by
/// to get the same effective movement with `to`.
///
/// A zero-magnitude `to` yields 0: "no basis for comparison" is a defined
/// result, never a division by zero or NaN.
pub fn conversion_factor(from: &Device, to: &Device) -> f64 {
    let (tdx, tdy) = to.motion();
    let tmag = magnitude(tdx, tdy);
    if tmag == 0.0 {
        return 0.0;
    }
    let (fdx, fdy) = from.motion();
    magnitude(fdx, fdy) / tmag
}

/// Direction of a device's accumulated motion, in radians.
///
/// Deliberately `atan2(dx, dy)` with the arguments swapped from the usual
/// `atan2(y, x)`. Only differences of two such angles are ever used, so the
/// convention cancels out; it must simply be the same on both sides.
pub fn angle(device: &Device) -> f64 {
    let (dx, dy) = device.motion();
    (dx as f64).atan2(dy as f64)
}

/// Signed angular deviation between two devices' motion directions.
///
/// Range is roughly (-2π, 2π) and is *not* normalized into [-π, π]; callers
/// classify by absolute value and must tolerate the full range.
pub fn angular_difference(from: &Device, to: &Device) -> f64 {
    angle(to) - angle(from)
}

/// Quality tier for an angular difference between two comparison gestures.
///
/// A large angular difference means the two devices were not moved along the
/// same path, so the conversion factor measured alongside it is suspect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Perfect,
    Excellent,
    VeryGood,
    Good,
    Adequate,
    Questionable,
    Bad,
    Terrible,
    Unusable,
}

impl Tier {
    pub fn label(self) -> &'static str {
        match self {
            Tier::Perfect => "perfect",
            Tier::Excellent => "excellent",
            Tier::VeryGood => "very good",
            Tier::Good => "good",
            Tier::Adequate => "adequate",
            Tier::Questionable => "questionable",
            Tier::Bad => "bad",
            Tier::Terrible => "terrible",
            Tier::Unusable => "unusable",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify an angular difference by absolute value.
///
/// Upper bounds are exclusive; only the first tier is an exact-zero match,
/// so `classify(0.01)` is `VeryGood`, not `Excellent`.
pub fn classify(diff: f64) -> Tier {
    let abs = diff.abs();
    if diff == 0.0 {
        Tier::Perfect
    } else if abs < 0.01 {
        Tier::Excellent
    } else if abs < 0.05 {
        Tier::VeryGood
    } else if abs < 0.10 {
        Tier::Good
    } else if abs < 0.15 {
        Tier::Adequate
    } else if abs < 0.20 {
        Tier::Questionable
    } else if abs < 0.30 {
        Tier::Bad
    } else if abs < 0.50 {
        Tier::Terrible
    } else {
        Tier::Unusable
    }
}

/// Estimated peak reporting rate in Hz, from the smallest positive gap seen
/// between consecutive events. `None` ("n/a") until the device has produced
/// at least two events with a measurable gap.
pub fn reporting_rate_hz(device: &Device) -> Option<f64> {
    if device.event_count() < 2 {
        return None;
    }
    device
        .min_interval()
        .map(|min: Duration| 1.0 / min.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DeviceHandle, DeviceKind};
    use std::time::Instant;

    fn mouse_with_motion(handle: usize, moves: &[(i32, i32)]) -> Device {
        let mut dev = Device::new(DeviceHandle(handle), DeviceKind::Mouse, String::new());
        let t0 = Instant::now();
        for (i, &(dx, dy)) in moves.iter().enumerate() {
            dev.record_motion(dx, dy, t0 + Duration::from_millis(i as u64));
        }
        dev
    }

    #[test]
    fn test_magnitude_zero_vector() {
        assert_eq!(magnitude(0, 0), 0.0);
    }

    #[test]
    fn test_magnitude_pythagorean() {
        assert_eq!(magnitude(3, 4), 5.0);
        assert_eq!(magnitude(-3, 4), 5.0);
    }

    #[test]
    fn test_conversion_factor_zero_target_is_defined() {
        let a = mouse_with_motion(1, &[(3, 4)]);
        let b = mouse_with_motion(2, &[]);
        let factor = conversion_factor(&a, &b);
        assert_eq!(factor, 0.0);
        assert!(factor.is_finite());
    }

    #[test]
    fn test_conversion_factor_round_trips_magnitude() {
        let a = mouse_with_motion(1, &[(30, 0), (0, 40)]);
        let b = mouse_with_motion(2, &[(-8, 6)]);
        let (bdx, bdy) = b.motion();
        let (adx, ady) = a.motion();
        let recovered = conversion_factor(&a, &b) * magnitude(bdx, bdy);
        assert!((recovered - magnitude(adx, ady)).abs() < 1e-9);
    }

    #[test]
    fn test_two_mice_scenario() {
        // A moves (3,0)+(2,0), B moves (0,5): equal magnitudes, orthogonal
        // directions.
        let a = mouse_with_motion(1, &[(3, 0), (2, 0)]);
        let b = mouse_with_motion(2, &[(0, 5)]);
        assert_eq!(a.motion(), (5, 0));
        assert_eq!(b.motion(), (0, 5));
        assert_eq!(conversion_factor(&a, &b), 1.0);
        assert_eq!(angle(&a), (5f64).atan2(0.0));
        assert_eq!(angle(&b), (0f64).atan2(5.0));
        let diff = angular_difference(&a, &b);
        assert!((diff - (-std::f64::consts::FRAC_PI_2)).abs() < 1e-12);
        assert_eq!(classify(diff), Tier::Unusable);
    }

    #[test]
    fn test_classify_tiers() {
        assert_eq!(classify(0.0), Tier::Perfect);
        assert_eq!(classify(-0.0), Tier::Perfect);
        assert_eq!(classify(0.009), Tier::Excellent);
        assert_eq!(classify(0.04), Tier::VeryGood);
        assert_eq!(classify(0.07), Tier::Good);
        assert_eq!(classify(0.12), Tier::Adequate);
        assert_eq!(classify(0.17), Tier::Questionable);
        assert_eq!(classify(0.25), Tier::Bad);
        assert_eq!(classify(0.45), Tier::Terrible);
        assert_eq!(classify(0.60), Tier::Unusable);
        assert_eq!(classify(-0.60), Tier::Unusable);
    }

    #[test]
    fn test_classify_boundaries_are_exclusive() {
        assert_eq!(classify(0.01), Tier::VeryGood);
        assert_eq!(classify(0.05), Tier::Good);
        assert_eq!(classify(0.10), Tier::Adequate);
        assert_eq!(classify(0.15), Tier::Questionable);
        assert_eq!(classify(0.20), Tier::Bad);
        assert_eq!(classify(0.30), Tier::Terrible);
        assert_eq!(classify(0.50), Tier::Unusable);
        // Tiny but nonzero is not Perfect.
        assert_eq!(classify(1e-12), Tier::Excellent);
    }

    #[test]
    fn test_reporting_rate_needs_two_events() {
        let single = mouse_with_motion(1, &[(1, 1)]);
        assert!(reporting_rate_hz(&single).is_none());

        let mut dev = Device::new(DeviceHandle(2), DeviceKind::Mouse, String::new());
        let t0 = Instant::now();
        dev.record_motion(1, 0, t0);
        dev.record_motion(1, 0, t0 + Duration::from_millis(1));
        let hz = reporting_rate_hz(&dev).unwrap();
        assert!((hz - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_reporting_rate_na_when_all_gaps_zero() {
        let mut dev = Device::new(DeviceHandle(3), DeviceKind::Mouse, String::new());
        let t0 = Instant::now();
        dev.record_motion(1, 0, t0);
        dev.record_motion(1, 0, t0);
        assert_eq!(dev.event_count(), 2);
        assert!(reporting_rate_hz(&dev).is_none());
    }
}
