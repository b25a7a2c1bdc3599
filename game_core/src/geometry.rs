//! Small vector helpers shared by the ball systems

use glam::Vec2;
use rand_distr::{Distribution, UnitDisc};

use crate::GameRng;

/// Reflect `v` across a surface with unit normal `normal`
pub fn reflect(v: Vec2, normal: Vec2) -> Vec2 {
    v - 2.0 * v.dot(normal) * normal
}

/// Normalize `v`, or return `fallback` when `v` has no usable length
pub fn unit_or(v: Vec2, fallback: Vec2) -> Vec2 {
    v.try_normalize().unwrap_or(fallback)
}

/// Uniform sample from the disk of the given radius
pub fn disk_offset(radius: f32, rng: &mut GameRng) -> Vec2 {
    let [x, y]: [f32; 2] = UnitDisc.sample(&mut rng.0);
    Vec2::new(x, y) * radius
}

/// Nudge a unit vector by a random offset inside `radius` and re-normalize
pub fn jitter(v: Vec2, radius: f32, rng: &mut GameRng) -> Vec2 {
    unit_or(v + disk_offset(radius, rng), v)
}

/// Serve direction: `axis` plus a disk offset, redrawn until the result
/// stays within 45° of `axis`
pub fn serve_direction(axis: Vec2, radius: f32, rng: &mut GameRng) -> Vec2 {
    loop {
        if let Some(dir) = (axis + disk_offset(radius, rng)).try_normalize() {
            if dir.dot(axis) >= std::f32::consts::FRAC_1_SQRT_2 {
                return dir;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_head_on() {
        let reflected = reflect(Vec2::new(1.0, 0.0), Vec2::new(-1.0, 0.0));
        assert_eq!(reflected, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_reflect_keeps_tangent_component() {
        let reflected = reflect(Vec2::new(0.6, -0.8), Vec2::Y);
        assert!((reflected - Vec2::new(0.6, 0.8)).length() < 1e-6);
    }

    #[test]
    fn test_unit_or_falls_back_on_zero() {
        assert_eq!(unit_or(Vec2::ZERO, Vec2::X), Vec2::X);
        assert!((unit_or(Vec2::new(3.0, 4.0), Vec2::X).length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_disk_offset_within_radius() {
        let mut rng = GameRng::new(7);
        for _ in 0..500 {
            assert!(disk_offset(0.05, &mut rng).length() <= 0.05 + 1e-6);
        }
    }

    #[test]
    fn test_jitter_stays_close_and_unit() {
        let mut rng = GameRng::new(3);
        for _ in 0..500 {
            let d = jitter(Vec2::X, 0.05, &mut rng);
            assert!((d.length() - 1.0).abs() < 1e-5);
            assert!(d.dot(Vec2::X) > 0.99);
        }
    }

    #[test]
    fn test_serve_direction_within_45_degrees() {
        let mut rng = GameRng::new(11);
        for axis in [Vec2::NEG_X, Vec2::X] {
            for _ in 0..500 {
                let d = serve_direction(axis, 1.0, &mut rng);
                assert!((d.length() - 1.0).abs() < 1e-5);
                assert!(d.dot(axis) >= std::f32::consts::FRAC_1_SQRT_2 - 1e-6);
            }
        }
    }
}
