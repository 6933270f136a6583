/// wgpu render pipeline for the live image preview
///
/// This module manages all the wgpu boilerplate:
/// - Device and queue initialization
/// - Texture creation and uploads
/// - Uniform buffer for the style descriptor
/// - Render pipeline state
/// - Draw commands and readback

use std::sync::Arc;

// Use wgpu from iced to avoid dependency conflicts
use iced_wgpu::wgpu;
use wgpu::util::DeviceExt;

use crate::style::ImageStyle;

/// Cap on the preview texture width; larger canvases are rendered smaller so
/// slider updates stay responsive
const MAX_PREVIEW_WIDTH: f32 = 2048.0;

/// The style descriptor in a GPU-friendly format.
/// Must match the WGSL struct layout with proper alignment.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct GpuStyle {
    brightness: f32,
    contrast: f32,
    saturation: f32,
    _pad: f32, // For 16-byte alignment
    /// Inverse transform matrix, column-major [c0.x, c0.y, c1.x, c1.y]
    inv_transform: [f32; 4],
    /// Render canvas size in source pixel units (the transformed
    /// bounding box)
    dest_extent: [f32; 2],
    _pad2: [f32; 2],
}

impl GpuStyle {
    fn new(style: &ImageStyle, source_width: f32, source_height: f32) -> Self {
        // Percent amounts become plain multipliers in the shader
        let inverse = style.transform.inverse_matrix();
        let (dest_width, dest_height) = style.transform.bounding_box(source_width, source_height);

        Self {
            brightness: style.filter.brightness / 100.0,
            contrast: style.filter.contrast / 100.0,
            saturation: style.filter.saturation / 100.0,
            _pad: 0.0,
            inv_transform: [inverse.x.x, inverse.x.y, inverse.y.x, inverse.y.y],
            dest_extent: [dest_width, dest_height],
            _pad2: [0.0, 0.0],
        }
    }
}

/// Offscreen render pipeline that applies the current style to the uploaded
/// image and reads the result back for display
pub struct RenderPipeline {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    /// Source image width
    pub width: u32,
    /// Source image height
    pub height: u32,
}

// Manual Debug implementation (wgpu types don't implement Debug)
impl std::fmt::Debug for RenderPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderPipeline")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl RenderPipeline {
    /// Create a new render pipeline with the given decoded image
    pub async fn new(
        rgba: Arc<Vec<u8>>,
        width: u32,
        height: u32,
        style: ImageStyle,
    ) -> Result<Self, String> {
        // Request wgpu adapter
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or("Failed to find suitable GPU adapter")?;

        // Request device and queue
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Decipher Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .map_err(|e| format!("Failed to create device: {:?}", e))?;

        // Create texture for the decoded RGBA image
        let texture_size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Source Image Texture"),
            size: texture_size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        // Upload the pixels once; only the uniforms change afterwards
        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba.as_slice(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            texture_size,
        );

        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Create sampler
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Source Image Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        // Create uniform buffer with the initial style
        let gpu_style = GpuStyle::new(&style, width as f32, height as f32);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Style Uniform Buffer"),
            contents: bytemuck::cast_slice(&[gpu_style]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        // Create bind group layout
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Bind Group Layout"),
            entries: &[
                // Source texture
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                // Sampler
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                // Uniform buffer
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        // Create bind group
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        });

        // Load shader
        let shader_source = super::shaders::get_shader();
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Preview Shader"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        // Create pipeline layout
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        // Create render pipeline
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Preview Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: wgpu::TextureFormat::Rgba8Unorm,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None, // Disable culling for full-screen triangle
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        println!("🖥️  Preview pipeline ready: source {}x{}", width, height);

        Ok(Self {
            device,
            queue,
            pipeline,
            bind_group,
            uniform_buffer,
            width,
            height,
        })
    }

    /// Update the uniform buffer with a new style descriptor
    pub fn update_uniforms(&self, style: &ImageStyle) {
        let gpu_style = GpuStyle::new(style, self.width as f32, self.height as f32);

        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[gpu_style]));
    }

    /// Render the styled image to a preview target spanning the transformed
    /// bounding box and read the RGBA bytes back for display.
    /// Returns the target dimensions along with the pixels.
    pub fn render_to_bytes(&self, style: &ImageStyle) -> (u32, u32, Vec<u8>) {
        // The canvas covers the whole transformed image, downscaled to the
        // preview cap when the bounding box is larger
        let (canvas_width, canvas_height) = style
            .transform
            .bounding_box(self.width as f32, self.height as f32);
        let shrink = (MAX_PREVIEW_WIDTH / canvas_width).min(1.0);
        let target_width = ((canvas_width * shrink).round() as u32).max(1);
        let target_height = ((canvas_height * shrink).round() as u32).max(1);

        let output_texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Output Texture (Preview)"),
            size: wgpu::Extent3d {
                width: target_width,
                height: target_height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });

        let output_view = output_texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Preview Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &output_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Full-screen triangle
        }

        // Readback with row padding to the 256-byte alignment wgpu requires
        let bytes_per_row = target_width * 4;
        let padded_bytes_per_row = (bytes_per_row + 255) & !255;
        let buffer_size = (padded_bytes_per_row * target_height) as u64;

        let output_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Output Buffer"),
            size: buffer_size,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &output_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &output_buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(target_height),
                },
            },
            wgpu::Extent3d {
                width: target_width,
                height: target_height,
                depth_or_array_layers: 1,
            },
        );

        self.queue.submit(Some(encoder.finish()));

        let buffer_slice = output_buffer.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        self.device.poll(wgpu::Maintain::Wait);

        if rx.recv().map(|r| r.is_err()).unwrap_or(true) {
            eprintln!("⚠️  Preview readback failed, returning empty frame");
            return (
                target_width,
                target_height,
                vec![0; (target_width * target_height * 4) as usize],
            );
        }

        let data = buffer_slice.get_mapped_range();
        let mut output = Vec::with_capacity((target_width * target_height * 4) as usize);
        for y in 0..target_height {
            let start = (y * padded_bytes_per_row) as usize;
            let end = start + (target_width * 4) as usize;
            output.extend_from_slice(&data[start..end]);
        }

        drop(data);
        output_buffer.unmap();
        (target_width, target_height, output)
    }
}
