use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use prism_core::{Illumination, LightMode, RenderSettings, SphereIntersection};
use prism_renderer::DEFAULT_BUCKET_SIZE;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

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

/// Lighting model selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IlluminationArg {
    Flat,
    BlinnPhong,
}

impl From<IlluminationArg> for Illumination {
    fn from(arg: IlluminationArg) -> Self {
        match arg {
            IlluminationArg::Flat => Illumination::Flat,
            IlluminationArg::BlinnPhong => Illumination::BlinnPhong,
        }
    }
}

/// Sphere intersection method selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SpheresArg {
    Analytic,
    Generic,
}

impl From<SpheresArg> for SphereIntersection {
    fn from(arg: SpheresArg) -> Self {
        match arg {
            SpheresArg::Analytic => SphereIntersection::Analytic,
            SpheresArg::Generic => SphereIntersection::Generic,
        }
    }
}

/// Light mode selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LightsArg {
    Single,
    All,
}

impl From<LightsArg> for LightMode {
    fn from(arg: LightsArg) -> Self {
        match arg {
            LightsArg::Single => LightMode::Single,
            LightsArg::All => LightMode::All,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "prism")]
#[command(about = "Render a scene with the Prism Blinn-Phong ray tracer")]
pub struct Args {
    /// JSON scene file; the built-in demo scene is used when omitted
    #[arg(short, long)]
    pub scene: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long, default_value_t = 512)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 512)]
    pub height: u32,

    /// Bucket edge length in pixels
    #[arg(long, default_value_t = DEFAULT_BUCKET_SIZE)]
    pub bucket_size: u32,

    /// Output PNG path
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,

    /// Cast shadow rays towards each light
    #[arg(long, value_name = "BOOL")]
    pub shadows: Option<bool>,

    /// Lighting model
    #[arg(long, value_enum)]
    pub illumination: Option<IlluminationArg>,

    /// Sphere intersection method
    #[arg(long, value_enum)]
    pub spheres: Option<SpheresArg>,

    /// Shade with the first light only or sum every light
    #[arg(long, value_enum)]
    pub lights: Option<LightsArg>,

    /// Set the logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply the render options given on the command line on top of `base`.
    /// Anything not given keeps the scene file's value.
    pub fn apply_to(&self, base: RenderSettings) -> RenderSettings {
        let mut settings = base;
        if let Some(shadows) = self.shadows {
            settings.shadows = shadows;
        }
        if let Some(illumination) = self.illumination {
            settings.illumination = illumination.into();
        }
        if let Some(spheres) = self.spheres {
            settings.spheres = spheres.into();
        }
        if let Some(lights) = self.lights {
            settings.lights = lights.into();
        }
        settings
    }
}
