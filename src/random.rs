//! Sampling helpers for the stochastic parts of the renderer.
//!
//! Every routine takes the random stream it draws from explicitly; there is
//! no process-wide generator. The render loop derives one deterministic
//! ChaCha20 stream per pixel from the user-supplied seed, which keeps a
//! render reproducible and lets pixels be traced in parallel without shared
//! mutable state.

use glam::Vec3A;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Build the random stream owned by a single pixel.
///
/// All pixels share the seed; the stream id separates them, so the colors a
/// pixel computes do not depend on which thread renders it.
pub fn pixel_stream(seed: u64, pixel_index: u64) -> ChaCha20Rng {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    rng.set_stream(pixel_index);
    rng
}

/// Generate a random f32 in [min, max)
pub fn random_range(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + (max - min) * rng.random::<f32>()
}

/// Generate a random point inside the unit ball using rejection sampling.
///
/// Draw uniform points in [-1,1]^3 until one lands inside the sphere.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3A {
    loop {
        let p = Vec3A::new(
            random_range(rng, -1.0, 1.0),
            random_range(rng, -1.0, 1.0),
            random_range(rng, -1.0, 1.0),
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Generate a random point inside the unit disk using rejection sampling.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3A {
    loop {
        let p = Vec3A::new(
            random_range(rng, -1.0, 1.0),
            random_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Generate a cosine-weighted direction around the +Z axis.
///
/// Standard disk-to-hemisphere projection; the density of the returned
/// direction is cos(theta) / pi.
pub fn random_cosine_direction(rng: &mut dyn RngCore) -> Vec3A {
    let r1 = rng.random::<f32>();
    let r2 = rng.random::<f32>();

    let phi = 2.0 * std::f32::consts::PI * r1;
    let x = phi.cos() * r2.sqrt();
    let y = phi.sin() * r2.sqrt();
    let z = (1.0 - r2).sqrt();

    Vec3A::new(x, y, z)
}

/// Generate a random RGB color with components in [0.0, 1.0).
pub fn random_color(rng: &mut dyn RngCore) -> Vec3A {
    Vec3A::new(rng.random(), rng.random(), rng.random())
}

/// Generate a random RGB color with components in [min, max).
pub fn random_color_range(rng: &mut dyn RngCore, min: f32, max: f32) -> Vec3A {
    Vec3A::new(
        random_range(rng, min, max),
        random_range(rng, min, max),
        random_range(rng, min, max),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_streams_are_deterministic_and_distinct() {
        let a: f32 = pixel_stream(7, 0).random();
        let b: f32 = pixel_stream(7, 0).random();
        let c: f32 = pixel_stream(7, 1).random();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn unit_sphere_points_are_inside() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        for _ in 0..1000 {
            assert!(random_in_unit_sphere(&mut rng).length_squared() < 1.0);
        }
    }

    #[test]
    fn unit_disk_points_are_inside_and_flat() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        for _ in 0..1000 {
            let p = random_in_unit_disk(&mut rng);
            assert!(p.length_squared() < 1.0);
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn cosine_directions_are_unit_and_upward() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        for _ in 0..1000 {
            let d = random_cosine_direction(&mut rng);
            assert!((d.length() - 1.0).abs() < 1e-5);
            assert!(d.z >= 0.0);
        }
    }

    #[test]
    fn cosine_directions_have_expected_mean_cosine() {
        // E[cos(theta)] under the cos(theta)/pi density is 2/3.
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let n = 20_000;
        let mean = (0..n)
            .map(|_| random_cosine_direction(&mut rng).z)
            .sum::<f32>()
            / n as f32;
        assert!((mean - 2.0 / 3.0).abs() < 0.01, "mean cosine {mean}");
    }
}
