use crate::device::GpuContext;
use bytemuck::{Pod, Zeroable};
use nalgebra::Matrix4;
use pointlight_core::{Error, NormalPoint3f, PointCloud, Result};
use std::sync::Arc;
use winit::window::Window;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Corners of the quad drawn for every point
const VERTICES_PER_POINT: u32 = 6;

const POINT_SHADER: &str = r#"
struct DrawUniforms {
    projection: mat4x4<f32>,
    view: mat4x4<f32>,
    model: mat4x4<f32>,
    // x: point size in pixels
    point: vec4<f32>,
    // xyz: point light position, w: enabled
    point_light: vec4<f32>,
    // xyz: spot light position, w: enabled
    spot_position: vec4<f32>,
    // xyz: spot cone axis, w: cosine of the cutoff angle
    spot_direction: vec4<f32>,
    // xyz: directional light direction, w: enabled
    directional: vec4<f32>,
    // w: shininess
    ambient: vec4<f32>,
    // w: normal colouring
    diffuse: vec4<f32>,
    // w: draw as a light marker
    specular: vec4<f32>,
    camera_position: vec4<f32>,
    // xy: viewport size in pixels
    viewport: vec4<f32>,
};

@group(0) @binding(0) var<uniform> u: DrawUniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

@vertex
fn vs_main(
    @builtin(vertex_index) corner_index: u32,
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
) -> VertexOutput {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-0.5, -0.5),
        vec2<f32>(0.5, -0.5),
        vec2<f32>(0.5, 0.5),
        vec2<f32>(-0.5, -0.5),
        vec2<f32>(0.5, 0.5),
        vec2<f32>(-0.5, 0.5),
    );

    let world = u.model * vec4<f32>(position, 1.0);
    let clip = u.projection * u.view * world;
    let offset = corners[corner_index] * u.point.x * 2.0 / u.viewport.xy;

    var out: VertexOutput;
    out.clip_position = vec4<f32>(clip.xy + offset * clip.w, clip.zw);
    out.world_position = world.xyz;
    out.normal = (u.model * vec4<f32>(normal, 0.0)).xyz;
    return out;
}

fn phong(n: vec3<f32>, to_light: vec3<f32>, to_eye: vec3<f32>) -> vec3<f32> {
    let diffuse = max(dot(n, to_light), 0.0) * u.diffuse.xyz;
    let reflected = reflect(-to_light, n);
    let highlight = pow(max(dot(to_eye, reflected), 0.0), max(u.ambient.w, 1.0));
    return diffuse + highlight * u.specular.xyz;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.normal);

    if (u.diffuse.w > 0.5) {
        return vec4<f32>(n * 0.5 + 0.5, 1.0);
    }
    if (u.specular.w > 0.5) {
        return vec4<f32>(u.ambient.xyz, 1.0);
    }

    let to_eye = normalize(u.camera_position.xyz - in.world_position);
    var lit = u.ambient.xyz;

    if (u.point_light.w > 0.5) {
        let to_light = normalize(u.point_light.xyz - in.world_position);
        lit += phong(n, to_light, to_eye);
    }
    if (u.directional.w > 0.5) {
        lit += phong(n, normalize(-u.directional.xyz), to_eye);
    }
    if (u.spot_position.w > 0.5) {
        let to_light = normalize(u.spot_position.xyz - in.world_position);
        let theta = dot(to_light, normalize(-u.spot_direction.xyz));
        if (theta > u.spot_direction.w) {
            lit += phong(n, to_light, to_eye);
        }
    }

    return vec4<f32>(min(lit, vec3<f32>(1.0)), 1.0);
}
"#;

/// Per-draw uniform block, laid out as in the point shader
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct DrawUniforms {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub point: [f32; 4],
    pub point_light: [f32; 4],
    pub spot_position: [f32; 4],
    pub spot_direction: [f32; 4],
    pub directional: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub camera_position: [f32; 4],
    pub viewport: [f32; 4],
}

impl Default for DrawUniforms {
    fn default() -> Self {
        let identity: [[f32; 4]; 4] = Matrix4::<f32>::identity().into();
        Self {
            projection: identity,
            view: identity,
            model: identity,
            point: [2.0, 0.0, 0.0, 0.0],
            point_light: [0.0; 4],
            spot_position: [0.0; 4],
            spot_direction: [0.0, 0.0, -1.0, 1.0],
            directional: [0.0, -1.0, 0.0, 0.0],
            ambient: [0.0, 0.0, 0.0, 1.0],
            diffuse: [0.0; 4],
            specular: [0.0; 4],
            camera_position: [0.0, 0.0, 0.0, 1.0],
            viewport: [640.0, 480.0, 0.0, 0.0],
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub background_color: [f64; 4],
    pub enable_depth_test: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background_color: [0.05, 0.05, 0.08, 1.0],
            enable_depth_test: true,
        }
    }
}

/// Handle to a point cloud uploaded with [`PointCloudRenderer::upload`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloudHandle(usize);

/// One draw of an uploaded cloud
#[derive(Debug, Clone, Copy)]
pub struct DrawCall {
    pub cloud: CloudHandle,
    pub uniforms: DrawUniforms,
}

struct GpuCloud {
    instances: wgpu::Buffer,
    count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Point cloud renderer drawing every point as a lit screen-space square
pub struct PointCloudRenderer {
    pub gpu_context: GpuContext,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub config: RenderConfig,
    render_pipeline: wgpu::RenderPipeline,
    uniform_layout: wgpu::BindGroupLayout,
    depth_view: wgpu::TextureView,
    clouds: Vec<GpuCloud>,
}

impl PointCloudRenderer {
    /// Create new point cloud renderer
    pub async fn new(window: Arc<Window>, config: RenderConfig) -> Result<Self> {
        let size = window.inner_size();
        let (gpu_context, surface) = GpuContext::for_window(window).await?;

        let surface_caps = surface.get_capabilities(&gpu_context.adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| Error::Gpu("Surface reports no texture formats".to_string()))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        let device = &gpu_context.device;
        surface.configure(device, &surface_config);

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("draw_uniform_layout"),
        });

        let shader = gpu_context.create_shader_module("Point Shader", POINT_SHADER);

        let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Point Render Pipeline Layout"),
            bind_group_layouts: &[&uniform_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Point Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[point_instance_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: if config.enable_depth_test {
                Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                })
            } else {
                None
            },
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let depth_view = create_depth_view(device, &surface_config);

        Ok(Self {
            gpu_context,
            surface,
            surface_config,
            config,
            render_pipeline,
            uniform_layout,
            depth_view,
            clouds: Vec::new(),
        })
    }

    /// Upload a point cloud once; later frames draw it through the handle
    pub fn upload(&mut self, label: &str, cloud: &PointCloud<NormalPoint3f>) -> CloudHandle {
        let instances = self.gpu_context.create_buffer_init(
            label,
            &cloud.points,
            wgpu::BufferUsages::VERTEX,
        );
        let uniform_buffer = self.gpu_context.create_buffer_init(
            label,
            &[DrawUniforms::default()],
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );
        let bind_group = self.gpu_context.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &self.uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some(label),
        });

        self.clouds.push(GpuCloud {
            instances,
            count: cloud.len() as u32,
            uniform_buffer,
            bind_group,
        });
        log::debug!("Uploaded {} ({} points)", label, cloud.len());
        CloudHandle(self.clouds.len() - 1)
    }

    /// Resize renderer surface
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.surface_config.width = new_size.width;
            self.surface_config.height = new_size.height;
            self.surface.configure(&self.gpu_context.device, &self.surface_config);
            self.depth_view = create_depth_view(&self.gpu_context.device, &self.surface_config);
        }
    }

    /// Draw one frame. A lost or outdated surface is reconfigured and the
    /// frame is skipped.
    pub fn render(&mut self, draws: &[DrawCall]) -> Result<()> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.gpu_context.device, &self.surface_config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timed out, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(Error::Gpu(format!("Failed to get surface texture: {:?}", e))),
        };

        for draw in draws {
            let cloud = self.cloud(draw.cloud)?;
            self.gpu_context.queue.write_buffer(
                &cloud.uniform_buffer,
                0,
                bytemuck::bytes_of(&draw.uniforms),
            );
        }

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu_context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Point Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Point Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: self.config.background_color[0],
                            g: self.config.background_color[1],
                            b: self.config.background_color[2],
                            a: self.config.background_color[3],
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: if self.config.enable_depth_test {
                    Some(wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth_view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    })
                } else {
                    None
                },
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            for draw in draws {
                let cloud = &self.clouds[draw.cloud.0];
                if cloud.count == 0 {
                    continue;
                }
                render_pass.set_bind_group(0, &cloud.bind_group, &[]);
                render_pass.set_vertex_buffer(0, cloud.instances.slice(..));
                render_pass.draw(0..VERTICES_PER_POINT, 0..cloud.count);
            }
        }

        self.gpu_context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn cloud(&self, handle: CloudHandle) -> Result<&GpuCloud> {
        self.clouds
            .get(handle.0)
            .ok_or_else(|| Error::Gpu(format!("Unknown point cloud handle {}", handle.0)))
    }
}

/// Instance layout: one [`NormalPoint3f`] per point
fn point_instance_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
    ];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<NormalPoint3f>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &ATTRIBUTES,
    }
}

fn create_depth_view(
    device: &wgpu::Device,
    surface_config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: surface_config.width,
            height: surface_config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_block_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<DrawUniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<DrawUniforms>(), 3 * 64 + 10 * 16);
    }

    #[test]
    fn test_instance_stride_matches_point_layout() {
        assert_eq!(std::mem::size_of::<NormalPoint3f>(), 24);
        let layout = point_instance_layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes[1].offset, 12);
    }
}
