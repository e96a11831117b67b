//! wgpu rendering layer: GPU context, surface and depth management, the
//! fixed flythrough camera, mesh buffers, and the ship pipeline.

pub mod camera;
pub mod cone;
pub mod depth;
pub mod gpu;
pub mod mesh;
pub mod pass;
pub mod ship_pipeline;
pub mod surface;

pub use camera::{Camera, CameraUniform};
pub use cone::generate_cone;
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use mesh::{MeshBuffer, VertexPositionColor, create_mesh};
pub use pass::{FrameEncoder, RenderPassBuilder, SPACE_BLACK};
pub use ship_pipeline::{SHIP_SHADER_SOURCE, ShipPipeline};
pub use surface::SurfaceWrapper;
