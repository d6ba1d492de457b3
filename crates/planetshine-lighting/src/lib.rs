pub mod ambient;
pub mod debug;
pub mod model;
pub mod pipeline;
pub mod rig;

pub use ambient::{blend_ambient, AmbientSink};
pub use debug::{DebugLine, DebugVertex};
pub use model::LightingSnapshot;
pub use pipeline::{PlanetShine, SceneProvider};
pub use rig::{distribute_lights, DirectionalLight, LightSink, RenderMode};
