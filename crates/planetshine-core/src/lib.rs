pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod math;
pub mod texture;

pub use color::Rgba;
pub use config::{PlanetShineConfig, Quality};
pub use error::{ConfigError, SampleError};
pub use math::{BodyGeometry, SunExposure};
pub use texture::PixelBuffer;
