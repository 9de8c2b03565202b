//! wgpu rendering plumbing for the orrery viewer: GPU context and surface
//! management, camera matrices, mesh/point pipelines, buffers, and frame
//! encoding.

pub mod buffer;
pub mod camera;
pub mod depth;
pub mod gpu;
pub mod pass;
pub mod pipeline;

pub use buffer::{BufferAllocator, MeshBuffer, PointBuffer, VertexPositionColor};
pub use camera::Camera;
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use pass::{FrameEncoder, RenderPassBuilder, SPACE_BLACK};
pub use pipeline::{
    CameraUniform, MESH_SHADER_SOURCE, MeshPipeline, ModelUniform, POINT_SHADER_SOURCE,
    PointPipeline, draw_mesh, draw_points,
};
