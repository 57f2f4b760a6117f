use std::f32::consts::PI;
use std::f32::consts::TAU;

use bevy::prelude::*;

/// Exponential approach of `current` toward `target`.
///
/// `rate` is the decay rate in 1/seconds - higher chases faster. Frame-rate
/// independent: two 8ms steps land where one 16ms step does (within float
/// noise), which keeps camera motion identical across refresh rates.
pub fn damp(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * (1.0 - (-rate * dt).exp())
}

/// `damp` in f64, used by the simulation clock.
pub fn damp64(current: f64, target: f64, rate: f64, dt: f64) -> f64 {
    current + (target - current) * (1.0 - (-rate * dt).exp())
}

/// Component-wise `damp` for vectors.
pub fn damp3(current: Vec3, target: Vec3, rate: f32, dt: f32) -> Vec3 {
    current + (target - current) * (1.0 - (-rate * dt).exp())
}

/// `damp` along the shortest arc between two angles (radians).
///
/// Without the wrap, a camera sitting at yaw 3.1 asked to reach -3.1 would
/// swing almost a full turn instead of nudging across the seam.
pub fn damp_angle(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let mut diff = (target - current) % TAU;
    if diff > PI {
        diff -= TAU;
    } else if diff < -PI {
        diff += TAU;
    }
    current + diff * (1.0 - (-rate * dt).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damp_moves_toward_target() {
        let stepped = damp(0.0, 10.0, 5.0, 0.016);
        assert!(stepped > 0.0 && stepped < 10.0);
    }

    #[test]
    fn damp_zero_dt_is_identity() {
        assert_eq!(damp(3.5, 10.0, 5.0, 0.0), 3.5);
    }

    #[test]
    fn damp_at_target_stays_put() {
        assert_eq!(damp(7.0, 7.0, 5.0, 0.016), 7.0);
    }

    #[test]
    fn damp_never_overshoots() {
        let mut value = 0.0;
        for _ in 0..500 {
            let next = damp(value, 1.0, 8.0, 0.016);
            assert!(next >= value && next <= 1.0);
            value = next;
        }
        assert!((value - 1.0).abs() < 1e-3);
    }

    #[test]
    fn damp_frame_rate_independent() {
        let one_step = damp(0.0, 1.0, 5.0, 0.032);
        let mut two_steps = damp(0.0, 1.0, 5.0, 0.016);
        two_steps = damp(two_steps, 1.0, 5.0, 0.016);
        assert!((one_step - two_steps).abs() < 1e-6);
    }

    #[test]
    fn damp_angle_crosses_the_seam() {
        // 3.0 -> -3.0 is a short hop across ±π, not a near-full turn back
        let stepped = damp_angle(3.0, -3.0, 10.0, 0.016);
        assert!(stepped > 3.0, "should move forward across the seam, got {stepped}");
    }

    #[test]
    fn damp_angle_plain_case_matches_damp() {
        let a = damp_angle(0.2, 1.0, 5.0, 0.016);
        let b = damp(0.2, 1.0, 5.0, 0.016);
        assert!((a - b).abs() < 1e-6);
    }

    #[test]
    fn damp3_matches_scalar_per_component() {
        let stepped = damp3(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0), 5.0, 0.016);
        assert!((stepped.x - damp(0.0, 1.0, 5.0, 0.016)).abs() < 1e-6);
        assert!((stepped.y - damp(0.0, 2.0, 5.0, 0.016)).abs() < 1e-6);
        assert!((stepped.z - damp(0.0, 3.0, 5.0, 0.016)).abs() < 1e-6);
    }
}
