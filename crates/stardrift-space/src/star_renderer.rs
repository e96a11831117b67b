//! GPU renderer drawing the whole starfield as one instanced billboard call.
//!
//! Each star is a screen-aligned quad sized in pixels. The vertex shader
//! projects the star center and offsets the quad corners in NDC using the
//! viewport dimensions from the camera uniform, so a star keeps its pixel
//! size regardless of distance. The fragment shader rounds the quad into a
//! soft disc.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use stardrift_render::{CameraUniform, DepthBuffer};

use crate::starfield::Star;

/// Pixels of screen size per world unit of star size.
pub const STAR_SIZE_TO_PIXELS: f32 = 800.0;

const STAR_SHADER: &str = r#"
struct CameraUniform {
    view_proj: mat4x4<f32>,
    viewport: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: CameraUniform;

struct VertexInput {
    @location(0) quad_pos: vec2<f32>,
    // Instance attributes
    @location(2) center: vec3<f32>,
    @location(3) size_px: f32,
    @location(4) color: vec3<f32>,
    @location(5) brightness: f32,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) color: vec3<f32>,
    @location(2) brightness: f32,
};

@vertex
fn vs_star(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;

    // Project the star center, then offset the quad corner by the star's
    // pixel size converted to NDC. Multiplying by w keeps the offset fixed
    // in screen space after the perspective divide.
    let clip_center = camera.view_proj * vec4<f32>(in.center, 1.0);
    let ndc_offset = in.quad_pos * in.size_px / camera.viewport.xy;
    out.clip_position = vec4<f32>(
        clip_center.x + ndc_offset.x * clip_center.w,
        clip_center.y + ndc_offset.y * clip_center.w,
        clip_center.z,
        clip_center.w,
    );
    out.uv = in.quad_pos;
    out.color = in.color;
    out.brightness = in.brightness;
    return out;
}

@fragment
fn fs_star(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist_sq = dot(in.uv, in.uv);
    if dist_sq > 1.0 {
        discard;
    }

    // Soft edge so the disc does not alias at small sizes.
    let alpha = 1.0 - smoothstep(0.6, 1.0, dist_sq);
    return vec4<f32>(in.color * in.brightness, alpha);
}
"#;

/// Quad corner vertex in [-1, 1].
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct QuadVertex {
    position: [f32; 2],
}

impl QuadVertex {
    const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x2,
            offset: 0,
            shader_location: 0,
        }],
    };
}

/// Per-star instance data uploaded once at startup.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct StarInstance {
    pub center: [f32; 3],
    pub size_px: f32,
    pub color: [f32; 3],
    pub brightness: f32,
}

impl StarInstance {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 2,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32,
                offset: 12,
                shader_location: 3,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 16,
                shader_location: 4,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32,
                offset: 28,
                shader_location: 5,
            },
        ],
    };

    /// Convert a generated star into GPU instance data.
    pub fn from_star(star: &Star) -> Self {
        Self {
            center: star.position.to_array(),
            size_px: star.size * STAR_SIZE_TO_PIXELS,
            color: star.color,
            brightness: star.brightness,
        }
    }
}

/// Renders the fixed starfield as instanced billboards in a single draw.
pub struct StarfieldRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    instance_count: u32,
}

impl StarfieldRenderer {
    /// Build the pipeline and upload the star catalog. The catalog never
    /// changes after startup, so the instance buffer is written once here.
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat, stars: &[Star]) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("star-shader"),
            source: wgpu::ShaderSource::Wgsl(STAR_SHADER.into()),
        });

        let camera_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("star-camera-bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: std::num::NonZeroU64::new(
                        std::mem::size_of::<CameraUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("star-pipeline-layout"),
            bind_group_layouts: &[&camera_bgl],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("star-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_star"),
                buffers: &[QuadVertex::LAYOUT, StarInstance::LAYOUT],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: Some(DepthBuffer::depth_stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_star"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        let quad_verts = [
            QuadVertex {
                position: [-1.0, -1.0],
            },
            QuadVertex {
                position: [1.0, -1.0],
            },
            QuadVertex {
                position: [1.0, 1.0],
            },
            QuadVertex {
                position: [-1.0, 1.0],
            },
        ];
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("star-quad-verts"),
            contents: bytemuck::cast_slice(&quad_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let indices: [u16; 6] = [0, 1, 2, 2, 3, 0];
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("star-quad-indices"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let instances: Vec<StarInstance> = stars.iter().map(StarInstance::from_star).collect();
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("star-instances"),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("star-camera-uniform"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("star-camera-bg"),
            layout: &camera_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        log::info!("Starfield renderer initialized ({} stars)", instances.len());

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            instance_buffer,
            camera_buffer,
            camera_bind_group,
            instance_count: instances.len() as u32,
        }
    }

    /// Upload a fresh camera uniform (on startup and after resizes).
    pub fn update_camera(&self, queue: &wgpu::Queue, uniform: &CameraUniform) {
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(uniform));
    }

    /// Draw every star in one instanced call.
    pub fn render(&self, pass: &mut wgpu::RenderPass) {
        if self.instance_count == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.camera_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..6, 0, 0..self.instance_count);
    }
}
