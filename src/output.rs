//! Image output.
//!
//! Converts the linear f32 framebuffer produced by the render loop into
//! files on disk: a plain-text PPM dump with gamma-2 correction, or an
//! 8-bit PNG with sRGB transfer. I/O failures are logged, never fatal.

use std::fs::File;
use std::io::{BufWriter, Write};

use image::{ImageBuffer, Rgb};
use log::{info, warn};

/// Encode a linear f32 RGB image as a plain-text PPM (P3) string.
///
/// Header: `P3`, image dimensions, then `255` as the channel maximum.
/// Pixels follow one per line in row-major order, top row first. Each
/// channel is truncated from `255.99 * sqrt(linear)` — gamma 2.0 — and the
/// saturating cast keeps it in [0, 255] without an explicit clamp.
pub fn ppm_string(image: &ImageBuffer<Rgb<f32>, Vec<f32>>) -> String {
    let mut out = format!("P3\n{} {}\n255\n", image.width(), image.height());
    for pixel in image.pixels() {
        let r = (255.99 * pixel[0].sqrt()) as u8;
        let g = (255.99 * pixel[1].sqrt()) as u8;
        let b = (255.99 * pixel[2].sqrt()) as u8;
        out.push_str(&format!("{} {} {}\n", r, g, b));
    }
    out
}

/// Save a linear f32 RGB image as a plain-text PPM file.
pub fn save_image_as_ppm(image: &ImageBuffer<Rgb<f32>, Vec<f32>>, output_path: &str) {
    let file = match File::create(output_path) {
        Ok(f) => f,
        Err(e) => {
            warn!("Failed to create {}: {}", output_path, e);
            return;
        }
    };
    let mut writer = BufWriter::new(file);
    match writer.write_all(ppm_string(image).as_bytes()) {
        Ok(_) => info!("Image saved as {}", output_path),
        Err(e) => warn!("Failed to save image: {}", e),
    }
}

/// Save an f32 RGB image as PNG with HDR to LDR tone mapping and gamma
/// correction.
///
/// Values are clamped to [0.0, 1.0] (overexposed areas become white), run
/// through the sRGB transfer curve and scaled to 8-bit integers.
pub fn save_image_as_png(image: &ImageBuffer<Rgb<f32>, Vec<f32>>, output_path: &str) {
    let u8_image: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
            let pixel = image.get_pixel(x, y);

            // sRGB standard gamma correction with linear portion for dark values
            let linear_to_gamma = |linear: f32| -> f32 {
                if linear <= 0.0 {
                    0.0
                } else if linear <= 0.0031308 {
                    12.92 * linear
                } else {
                    1.055 * linear.powf(1.0 / 2.4) - 0.055
                }
            };

            Rgb([
                (linear_to_gamma(pixel[0].clamp(0.0, 1.0)) * 255.0) as u8,
                (linear_to_gamma(pixel[1].clamp(0.0, 1.0)) * 255.0) as u8,
                (linear_to_gamma(pixel[2].clamp(0.0, 1.0)) * 255.0) as u8,
            ])
        });

    match u8_image.save(output_path) {
        Ok(_) => info!("Image saved as {}", output_path),
        Err(e) => warn!("Failed to save image: {}", e),
    }
}
