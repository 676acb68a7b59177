//! Lumapath path tracer
//!
//! A stochastic light-transport renderer: polymorphic scene geometry,
//! texture-driven materials with optional importance sampling, a recursive
//! Monte Carlo radiance estimator, and the standalone variance-reduction
//! estimators that validate the same machinery. Renders reproducibly from a
//! seed with one random stream per pixel.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod aabb;
pub mod camera;
pub mod hittable;
pub mod interval;
pub mod material;
pub mod montecarlo;
pub mod onb;
pub mod output;
pub mod perlin;
pub mod random;
pub mod ray;
pub mod rect;
pub mod sphere;
pub mod texture;
