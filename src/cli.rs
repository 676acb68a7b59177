use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// The demo scenes this binary knows how to build
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SceneKind {
    /// Random spheres over a checkered ground, with motion blur
    Cover,
    /// Two large checkered spheres
    Checker,
    /// Marble-noise spheres under the sky
    Perlin,
    /// An image-textured globe
    Earth,
    /// Noise spheres lit by a rectangular lamp in the dark
    Light,
    /// An empty Cornell-style box with a ceiling light
    Cornell,
}

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "lumapath")]
#[command(about = "A stochastic path tracer in Rust")]
pub struct Args {
    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Demo scene to render
    #[arg(long, value_enum, default_value = "cover", help = "Demo scene to render")]
    pub scene: SceneKind,

    /// Image width in pixels
    #[arg(long, default_value = "800", help = "Image width in pixels")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "600", help = "Image height in pixels")]
    pub height: u32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value = "100", help = "Number of samples per pixel")]
    pub samples_per_pixel: u32,

    /// Maximum ray bounce depth
    #[arg(long, default_value = "50", help = "Maximum ray bounce depth")]
    pub max_depth: u32,

    /// Base seed for the per-pixel random streams
    #[arg(long, default_value = "0", help = "Base seed for the per-pixel random streams")]
    pub seed: u64,

    /// Image file used by the earth scene
    #[arg(long, default_value = "earthmap.png", help = "Image file used by the earth scene")]
    pub texture: String,

    /// Output file path (.ppm for plain-text, .png for 8-bit sRGB)
    #[arg(
        short,
        long,
        default_value = "output.png",
        help = "Output file path (.ppm for plain-text, .png for 8-bit sRGB)"
    )]
    pub output: String,

    /// Run the Monte Carlo estimator demonstrations instead of rendering
    #[arg(long, help = "Run the Monte Carlo estimator demonstrations instead of rendering")]
    pub estimators: bool,
}
