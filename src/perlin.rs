//! Coherent lattice noise.
//!
//! Classic Perlin noise over a 256-entry table of random unit gradients,
//! with Hermitian-smoothed trilinear interpolation and a summed-octave
//! turbulence variant. Built from an explicit random stream so two textures
//! seeded alike produce identical patterns.

use glam::Vec3A;
use rand::RngCore;

use crate::random::random_range;

const POINT_COUNT: usize = 256;

/// Perlin noise generator.
pub struct Perlin {
    ranvec: Vec<Vec3A>,
    perm_x: Vec<usize>,
    perm_y: Vec<usize>,
    perm_z: Vec<usize>,
}

impl Perlin {
    /// Build the gradient and permutation tables from the given stream.
    pub fn new(rng: &mut dyn RngCore) -> Self {
        let ranvec = (0..POINT_COUNT)
            .map(|_| {
                Vec3A::new(
                    random_range(rng, -1.0, 1.0),
                    random_range(rng, -1.0, 1.0),
                    random_range(rng, -1.0, 1.0),
                )
                .normalize()
            })
            .collect();

        Self {
            ranvec,
            perm_x: generate_perm(rng),
            perm_y: generate_perm(rng),
            perm_z: generate_perm(rng),
        }
    }

    /// Noise value at a point, in [-1, 1].
    pub fn noise(&self, p: Vec3A) -> f32 {
        let u = p.x - p.x.floor();
        let v = p.y - p.y.floor();
        let w = p.z - p.z.floor();

        let i = p.x.floor() as i32;
        let j = p.y.floor() as i32;
        let k = p.z.floor() as i32;

        let mut c = [[[Vec3A::ZERO; 2]; 2]; 2];
        for (di, plane) in c.iter_mut().enumerate() {
            for (dj, row) in plane.iter_mut().enumerate() {
                for (dk, cell) in row.iter_mut().enumerate() {
                    let idx = self.perm_x[((i + di as i32) & 255) as usize]
                        ^ self.perm_y[((j + dj as i32) & 255) as usize]
                        ^ self.perm_z[((k + dk as i32) & 255) as usize];
                    *cell = self.ranvec[idx];
                }
            }
        }

        perlin_interp(&c, u, v, w)
    }

    /// Summed-octave turbulence: sum of |noise| at doubling frequencies.
    ///
    /// Always non-negative.
    pub fn turb(&self, p: Vec3A, depth: u32) -> f32 {
        let mut accum = 0.0;
        let mut temp_p = p;
        let mut weight = 1.0;

        for _ in 0..depth {
            accum += weight * self.noise(temp_p);
            weight *= 0.5;
            temp_p *= 2.0;
        }

        accum.abs()
    }
}

/// A shuffled identity permutation of table indices.
fn generate_perm(rng: &mut dyn RngCore) -> Vec<usize> {
    let mut p: Vec<usize> = (0..POINT_COUNT).collect();
    // Fisher-Yates
    for i in (1..POINT_COUNT).rev() {
        let target = (rng.next_u32() as usize) % (i + 1);
        p.swap(i, target);
    }
    p
}

/// Trilinear interpolation of gradient dot products with Hermite smoothing.
fn perlin_interp(c: &[[[Vec3A; 2]; 2]; 2], u: f32, v: f32, w: f32) -> f32 {
    let uu = u * u * (3.0 - 2.0 * u);
    let vv = v * v * (3.0 - 2.0 * v);
    let ww = w * w * (3.0 - 2.0 * w);

    let mut accum = 0.0;
    for (i, plane) in c.iter().enumerate() {
        for (j, row) in plane.iter().enumerate() {
            for (k, cell) in row.iter().enumerate() {
                let (fi, fj, fk) = (i as f32, j as f32, k as f32);
                let weight = Vec3A::new(u - fi, v - fj, w - fk);
                accum += (fi * uu + (1.0 - fi) * (1.0 - uu))
                    * (fj * vv + (1.0 - fj) * (1.0 - vv))
                    * (fk * ww + (1.0 - fk) * (1.0 - ww))
                    * cell.dot(weight);
            }
        }
    }
    accum
}
