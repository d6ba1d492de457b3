pub mod auto_color;
pub mod camera;
pub mod clouds;
pub mod computed;
pub mod determiner;
pub mod error;
pub mod ports;
pub mod sampler;
pub mod visual;

pub use auto_color::{determine_base_color, BaseColorReport};
pub use camera::{frame_body, AlbedoCamera, RenderView, Renderer, Representation, ScaledSpace};
pub use clouds::{CloudEstimate, CloudLayer};
pub use computed::ComputedAlbedoDeterminer;
pub use determiner::{AlbedoContext, AlbedoDeterminer};
pub use error::{AlbedoError, RenderError};
pub use ports::{AlbedoPorts, BodyTextureSource, CloudLayerSource, TextureDemandTrigger};
pub use sampler::{ColorSampler, SampleStrategy};
pub use visual::VisualAlbedoDeterminer;
