//! Color fields over surface coordinates and world position.
//!
//! Closed set of texture variants dispatched by match, mirroring the
//! material system. Textures are shared between materials through Arc.

use std::sync::Arc;

use glam::Vec3A;
use image::RgbImage;
use log::warn;
use rand::RngCore;

use crate::perlin::Perlin;

/// RGB color type using Vec3A for SIMD optimization.
type Color = Vec3A;

/// Spatial frequency of the checker pattern.
const CHECKER_FREQUENCY: f32 = 10.0;

/// Octaves summed by the turbulence-based noise styles.
const TURBULENCE_DEPTH: u32 = 7;

/// How a noise texture maps lattice noise to color.
#[derive(Debug, Clone, Copy)]
pub enum NoiseStyle {
    /// Raw noise remapped from [-1, 1] to [0, 1]
    Plain,
    /// Summed-octave turbulence used directly as intensity
    Turbulence,
    /// Sine stripes with turbulence-perturbed phase
    Marble,
}

/// Color field evaluated at (u, v) surface coordinates and a world point.
pub enum Texture {
    /// The same color everywhere.
    Solid {
        /// The color returned for every query
        color: Color,
    },
    /// Two child textures selected by the sign of a sum of sines of the
    /// scaled point coordinates.
    Checker {
        /// Child used where the selector is non-negative
        even: Arc<Texture>,
        /// Child used where the selector is negative
        odd: Arc<Texture>,
    },
    /// Coherent lattice noise.
    Noise {
        /// The noise generator
        perlin: Perlin,
        /// Spatial frequency multiplier applied to the query point
        scale: f32,
        /// Mapping from noise to color
        style: NoiseStyle,
    },
    /// Nearest-pixel lookup into a loaded image.
    Image {
        /// Loaded pixel buffer; may be empty if loading failed
        image: RgbImage,
    },
}

impl Texture {
    /// Constant-color texture.
    pub fn solid(color: Color) -> Self {
        Self::Solid { color }
    }

    /// Checkerboard of two constant colors.
    pub fn checker_colors(even: Color, odd: Color) -> Self {
        Self::Checker {
            even: Arc::new(Self::solid(even)),
            odd: Arc::new(Self::solid(odd)),
        }
    }

    /// Noise texture with freshly built tables.
    pub fn noise(rng: &mut dyn RngCore, scale: f32, style: NoiseStyle) -> Self {
        Self::Noise {
            perlin: Perlin::new(rng),
            scale,
            style,
        }
    }

    /// Image texture loaded from disk.
    ///
    /// A load failure is logged and leaves an empty buffer; lookups then
    /// return a fixed fallback color instead of reading out of bounds.
    pub fn image(path: &str) -> Self {
        let image = match image::open(path) {
            Ok(img) => img.to_rgb8(),
            Err(e) => {
                warn!("Failed to load texture image {}: {}", path, e);
                RgbImage::new(0, 0)
            }
        };
        Self::Image { image }
    }

    /// Evaluate the texture at (u, v) surface coordinates and world point p.
    pub fn value(&self, u: f32, v: f32, p: Vec3A) -> Color {
        match self {
            Texture::Solid { color } => *color,
            Texture::Checker { even, odd } => {
                let sines = (CHECKER_FREQUENCY * p.x).sin()
                    + (CHECKER_FREQUENCY * p.y).sin()
                    + (CHECKER_FREQUENCY * p.z).sin();
                if sines < 0.0 {
                    odd.value(u, v, p)
                } else {
                    even.value(u, v, p)
                }
            }
            Texture::Noise {
                perlin,
                scale,
                style,
            } => {
                let intensity = match style {
                    NoiseStyle::Plain => 0.5 * (1.0 + perlin.noise(*scale * p)),
                    NoiseStyle::Turbulence => perlin.turb(*scale * p, TURBULENCE_DEPTH),
                    // Color proportional to a sine, with turbulence shifting
                    // the phase so the stripes undulate
                    NoiseStyle::Marble => {
                        0.5 * (1.0 + (*scale * p.z + 10.0 * perlin.turb(p, TURBULENCE_DEPTH)).sin())
                    }
                };
                Color::ONE * intensity
            }
            Texture::Image { image } => image_value(image, u, v),
        }
    }
}

/// Nearest-pixel lookup with clamped coordinates.
fn image_value(image: &RgbImage, u: f32, v: f32) -> Color {
    if image.width() == 0 || image.height() == 0 {
        // Deterministic debug color for missing image data
        return Color::new(0.0, 1.0, 1.0);
    }

    let u = u.clamp(0.0, 1.0);
    // Image rows run top to bottom; v runs bottom to top
    let v = 1.0 - v.clamp(0.0, 1.0);

    let i = ((u * image.width() as f32) as u32).min(image.width() - 1);
    let j = ((v * image.height() as f32) as u32).min(image.height() - 1);

    let pixel = image.get_pixel(i, j);
    let color_scale = 1.0 / 255.0;
    Color::new(
        color_scale * pixel[0] as f32,
        color_scale * pixel[1] as f32,
        color_scale * pixel[2] as f32,
    )
}
