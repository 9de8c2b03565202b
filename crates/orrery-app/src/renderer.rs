//! GPU-side scene resources and the one draw call per frame.
//!
//! [`SceneRenderer`] uploads every static mesh once at startup and rewrites
//! only the camera and per-object model uniforms each frame. Draw order is
//! stars, sun, planets, ring, all inside a single pass.

use std::sync::Arc;

use orrery_render::{
    BufferAllocator, Camera, CameraUniform, DepthBuffer, FrameEncoder, MESH_SHADER_SOURCE,
    MeshBuffer, MeshPipeline, ModelUniform, POINT_SHADER_SOURCE, PointBuffer, PointPipeline,
    RenderContext, RenderPassBuilder, SurfaceError, VertexPositionColor, draw_mesh, draw_points,
};
use orrery_scene::{RING, SPHERE_SEGMENTS, SolarSystem, annulus, uv_sphere};

/// One body's GPU residency: its mesh and its per-frame transform slot.
struct BodyDraw {
    mesh: MeshBuffer,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
}

/// All GPU resources needed to draw the scene.
pub struct SceneRenderer {
    mesh_pipeline: MeshPipeline,
    point_pipeline: PointPipeline,
    depth_buffer: DepthBuffer,

    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    point_camera_bind_group: wgpu::BindGroup,

    sun: BodyDraw,
    planets: Vec<BodyDraw>,
    ring: Option<BodyDraw>,
    stars: PointBuffer,
}

impl SceneRenderer {
    /// Upload the whole scene to the GPU.
    pub fn new(gpu: &RenderContext, scene: &SolarSystem) -> Self {
        let device = &gpu.device;
        let allocator = BufferAllocator::new(device);

        let mesh_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh-shader"),
            source: wgpu::ShaderSource::Wgsl(MESH_SHADER_SOURCE.into()),
        });
        let point_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("point-shader"),
            source: wgpu::ShaderSource::Wgsl(POINT_SHADER_SOURCE.into()),
        });

        let mesh_pipeline = MeshPipeline::new(device, &mesh_shader, gpu.surface_format);
        let point_pipeline = PointPipeline::new(device, &point_shader, gpu.surface_format);
        let depth_buffer =
            DepthBuffer::new(device, gpu.surface_config.width, gpu.surface_config.height);

        let camera_buffer = allocator.create_uniform(
            "camera-uniform",
            std::mem::size_of::<CameraUniform>() as u64,
        );
        let camera_bind_group = mesh_pipeline.create_camera_bind_group(device, &camera_buffer);
        let point_camera_bind_group =
            point_pipeline.create_camera_bind_group(device, &camera_buffer);

        let body_draw = |label: &str, radius: f32, color: [f32; 3]| {
            let data = uv_sphere(radius, SPHERE_SEGMENTS, SPHERE_SEGMENTS);
            let vertices = VertexPositionColor::from_positions(&data.positions, color);
            let mesh = allocator.create_mesh(label, &vertices, &data.indices);
            let model_buffer = allocator.create_uniform(
                &format!("{}-model", label),
                std::mem::size_of::<ModelUniform>() as u64,
            );
            let model_bind_group = mesh_pipeline.create_model_bind_group(device, &model_buffer);
            BodyDraw {
                mesh,
                model_buffer,
                model_bind_group,
            }
        };

        let sun = body_draw("sun", scene.sun.radius, scene.sun.color);

        let mut planets = Vec::with_capacity(scene.pivots().len());
        let mut ring = None;
        for (i, pivot) in scene.pivots().iter().enumerate() {
            planets.push(body_draw(
                &format!("planet-{i}"),
                pivot.body.radius,
                pivot.body.color,
            ));

            if let Some(r) = &pivot.body.ring {
                let data = annulus(r.inner_radius, r.outer_radius, RING.segments);
                let vertices = VertexPositionColor::from_positions(&data.positions, r.color);
                let mesh = allocator.create_mesh("ring", &vertices, &data.indices);
                let model_buffer = allocator
                    .create_uniform("ring-model", std::mem::size_of::<ModelUniform>() as u64);
                let model_bind_group =
                    mesh_pipeline.create_model_bind_group(device, &model_buffer);
                ring = Some(BodyDraw {
                    mesh,
                    model_buffer,
                    model_bind_group,
                });
            }
        }

        let star_vertices =
            VertexPositionColor::from_positions(scene.starfield.positions(), [1.0, 1.0, 1.0]);
        let stars = allocator.create_points("starfield", &star_vertices);

        Self {
            mesh_pipeline,
            point_pipeline,
            depth_buffer,
            camera_buffer,
            camera_bind_group,
            point_camera_bind_group,
            sun,
            planets,
            ring,
            stars,
        }
    }

    /// Resize GPU resources tied to the surface dimensions.
    pub fn resize(&mut self, gpu: &RenderContext) {
        self.depth_buffer.resize(
            &gpu.device,
            gpu.surface_config.width,
            gpu.surface_config.height,
        );
    }

    /// Upload this frame's uniforms and issue the draw call.
    pub fn render(
        &mut self,
        gpu: &RenderContext,
        scene: &SolarSystem,
        camera: &Camera,
    ) -> Result<(), SurfaceError> {
        let queue = &gpu.queue;

        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&camera.to_uniform()),
        );
        queue.write_buffer(
            &self.sun.model_buffer,
            0,
            bytemuck::bytes_of(&ModelUniform::from_matrix(scene.sun_transform())),
        );
        for (draw, pivot) in self.planets.iter().zip(scene.pivots()) {
            queue.write_buffer(
                &draw.model_buffer,
                0,
                bytemuck::bytes_of(&ModelUniform::from_matrix(pivot.body_transform())),
            );
            if let (Some(ring_draw), Some(ring_transform)) = (&self.ring, pivot.ring_transform()) {
                queue.write_buffer(
                    &ring_draw.model_buffer,
                    0,
                    bytemuck::bytes_of(&ModelUniform::from_matrix(ring_transform)),
                );
            }
        }

        let surface_texture = gpu.get_current_texture()?;
        let mut frame = FrameEncoder::new(&gpu.device, Arc::new(queue.clone()), surface_texture);

        {
            let builder = RenderPassBuilder::new()
                .depth(&self.depth_buffer)
                .label("scene-pass");
            let mut pass = frame.begin_render_pass(&builder);

            draw_points(
                &mut pass,
                &self.point_pipeline,
                &self.point_camera_bind_group,
                &self.stars,
            );

            draw_mesh(
                &mut pass,
                &self.mesh_pipeline,
                &self.camera_bind_group,
                &self.sun.model_bind_group,
                &self.sun.mesh,
            );
            for draw in &self.planets {
                draw_mesh(
                    &mut pass,
                    &self.mesh_pipeline,
                    &self.camera_bind_group,
                    &draw.model_bind_group,
                    &draw.mesh,
                );
            }
            if let Some(ring_draw) = &self.ring {
                draw_mesh(
                    &mut pass,
                    &self.mesh_pipeline,
                    &self.camera_bind_group,
                    &ring_draw.model_bind_group,
                    &ring_draw.mesh,
                );
            }
        }

        frame.submit();
        Ok(())
    }
}
