pub mod body;
pub mod cache;
pub mod data;
pub mod defaults;
pub mod overrides;

pub use body::{BodyId, CelestialBody};
pub use cache::BodyCache;
pub use data::CelestialBodyData;
pub use overrides::{BodyConfigError, BodyOverride, BodyOverrides, ColorSetting};
