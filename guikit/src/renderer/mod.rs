//! wgpu renderer for recorded draw commands
//!
//! Three pipelines:
//! 1. Solid pipeline - vertex-colored quads (`DrawCommand::Rect`)
//! 2. Image pipeline - textured quads with tint and quarter-turn rotation (`DrawCommand::Sprite`)
//! 3. Text pipeline - glyphon (`DrawCommand::Text`)
//!
//! Rects and sprites are drawn in submission order; text is drawn on top.

use std::collections::{HashMap, HashSet};

use bytemuck::{Pod, Zeroable};
use glyphon::{
    Attrs, Buffer as TextBuffer, Color as TextColor, Family, FontSystem, Metrics, Resolution,
    Shaping, SwashCache, TextArea, TextAtlas, TextBounds, TextRenderer as GlyphonTextRenderer,
};
use wgpu::util::DeviceExt;
use wgpu::{
    BindGroup, BindGroupLayout, Buffer, Device, MultisampleState, Queue, RenderPass,
    RenderPipeline, Sampler, TextureFormat,
};

use crate::color::Color;
use crate::font::{Font, FontId};
use crate::geometry::Rect;
use crate::surface::DrawCommand;
use crate::texture::{Texture, TextureId};

// ─── Solid Pipeline ───────────────────────────────────────────────────

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct SolidVertex {
    position: [f32; 2],
    color: [f32; 4],
}

impl SolidVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SolidVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct SolidUniforms {
    viewport: [f32; 4], // width, height, 0, 0
}

// ─── Image Pipeline ───────────────────────────────────────────────────

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct ImageVertex {
    position: [f32; 2],
    tex_coords: [f32; 2],
}

impl ImageVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ImageVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

// Unit quad (0,0) to (1,1)
const IMAGE_VERTICES: &[ImageVertex] = &[
    ImageVertex { position: [0.0, 0.0], tex_coords: [0.0, 0.0] },
    ImageVertex { position: [1.0, 0.0], tex_coords: [1.0, 0.0] },
    ImageVertex { position: [1.0, 1.0], tex_coords: [1.0, 1.0] },
    ImageVertex { position: [0.0, 1.0], tex_coords: [0.0, 1.0] },
];

const IMAGE_INDICES: &[u16] = &[0, 1, 2, 0, 2, 3];

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct ImageUniforms {
    viewport: [f32; 4], // width, height, 0, 0
    rect: [f32; 4],     // x, y, width, height (pixels)
    tint: [f32; 4],
    quarter_turns: u32,
    _padding: [u32; 3],
}

struct GpuTexture {
    // Kept alive for the view
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

// ─── Frame plan ───────────────────────────────────────────────────────

/// One draw call in submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Batch {
    /// `quads` consecutive rects starting at quad `first`.
    Solid { first: u32, quads: u32 },
    /// Index of a sprite command.
    Sprite(usize),
}

/// Group consecutive rects into one solid batch; every sprite is its own batch.
fn plan(commands: &[DrawCommand]) -> Vec<Batch> {
    let mut batches = Vec::new();
    let mut quad = 0u32;
    for (index, command) in commands.iter().enumerate() {
        match command {
            DrawCommand::Rect { .. } => {
                match batches.last_mut() {
                    Some(Batch::Solid { quads, .. }) => *quads += 1,
                    _ => batches.push(Batch::Solid { first: quad, quads: 1 }),
                }
                quad += 1;
            }
            DrawCommand::Sprite { .. } => batches.push(Batch::Sprite(index)),
            DrawCommand::Text { .. } => {}
        }
    }
    batches
}

enum PreparedBatch {
    Solid { first_index: u32, index_count: u32 },
    Sprite { bind_group: BindGroup },
}

// ─── WidgetRenderer ───────────────────────────────────────────────────

/// Renders a frame of [`DrawCommand`]s recorded by a [`Canvas`](crate::Canvas).
pub struct WidgetRenderer {
    // --- Solid pipeline ---
    solid_pipeline: RenderPipeline,
    solid_uniform_buffer: Buffer,
    solid_bind_group: BindGroup,
    solid_vertex_buffer: Option<Buffer>,
    solid_index_buffer: Option<Buffer>,

    // --- Image pipeline ---
    image_pipeline: RenderPipeline,
    image_bind_group_layout: BindGroupLayout,
    image_sampler: Sampler,
    image_vertex_buffer: Buffer,
    image_index_buffer: Buffer,
    textures: HashMap<TextureId, GpuTexture>,

    batches: Vec<PreparedBatch>,

    // --- Text pipeline (glyphon) ---
    font_system: FontSystem,
    swash_cache: SwashCache,
    text_atlas: TextAtlas,
    text_renderer: GlyphonTextRenderer,
    text_buffers: Vec<TextBuffer>,
    font_families: HashMap<FontId, Option<String>>,
}

impl WidgetRenderer {
    pub fn new(device: &Device, queue: &Queue, format: TextureFormat) -> Self {
        // ── Solid pipeline ──────────────────────────────────────
        let solid_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Widget Solid Shader"),
            source: wgpu::ShaderSource::Wgsl(SOLID_SHADER.into()),
        });

        let solid_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Widget Solid Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let solid_pipeline = create_pipeline(
            device,
            format,
            "Widget Solid Pipeline",
            &solid_shader,
            &solid_bind_group_layout,
            SolidVertex::desc(),
        );

        let solid_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Widget Solid Uniform Buffer"),
            contents: bytemuck::cast_slice(&[SolidUniforms {
                viewport: [800.0, 600.0, 0.0, 0.0],
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let solid_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Widget Solid Bind Group"),
            layout: &solid_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: solid_uniform_buffer.as_entire_binding(),
            }],
        });

        // ── Image pipeline ──────────────────────────────────────
        let image_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Widget Image Shader"),
            source: wgpu::ShaderSource::Wgsl(IMAGE_SHADER.into()),
        });

        let image_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Widget Image Bind Group Layout"),
                entries: &[
                    // Uniforms
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    // Texture
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
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
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let image_pipeline = create_pipeline(
            device,
            format,
            "Widget Image Pipeline",
            &image_shader,
            &image_bind_group_layout,
            ImageVertex::desc(),
        );

        let image_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let image_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Widget Image Vertex Buffer"),
            contents: bytemuck::cast_slice(IMAGE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let image_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Widget Image Index Buffer"),
            contents: bytemuck::cast_slice(IMAGE_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        // ── Text pipeline (glyphon) ─────────────────────────────
        let font_system = FontSystem::new();
        let swash_cache = SwashCache::new();
        let mut text_atlas = TextAtlas::new(device, queue, format);
        let text_renderer =
            GlyphonTextRenderer::new(&mut text_atlas, device, MultisampleState::default(), None);

        Self {
            solid_pipeline,
            solid_uniform_buffer,
            solid_bind_group,
            solid_vertex_buffer: None,
            solid_index_buffer: None,

            image_pipeline,
            image_bind_group_layout,
            image_sampler,
            image_vertex_buffer,
            image_index_buffer,
            textures: HashMap::new(),

            batches: Vec::new(),

            font_system,
            swash_cache,
            text_atlas,
            text_renderer,
            text_buffers: Vec::new(),
            font_families: HashMap::new(),
        }
    }

    /// Upload everything a frame of `commands` needs.
    ///
    /// `viewport` is the surface size in pixels.
    pub fn prepare(
        &mut self,
        device: &Device,
        queue: &Queue,
        commands: &[DrawCommand],
        viewport: [f32; 2],
    ) {
        queue.write_buffer(
            &self.solid_uniform_buffer,
            0,
            bytemuck::cast_slice(&[SolidUniforms {
                viewport: [viewport[0], viewport[1], 0.0, 0.0],
            }]),
        );

        let batches = plan(commands);
        self.prepare_solids(device, commands);
        self.prepare_batches(device, queue, commands, &batches, viewport);
        self.prepare_text(device, queue, commands, viewport);
    }

    /// Build one vertex/index buffer holding every rect of the frame.
    fn prepare_solids(&mut self, device: &Device, commands: &[DrawCommand]) {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for command in commands {
            if let DrawCommand::Rect { rect, color } = command {
                push_rect_vertices(&mut vertices, &mut indices, *rect, *color);
            }
        }

        if vertices.is_empty() {
            self.solid_vertex_buffer = None;
            self.solid_index_buffer = None;
            return;
        }

        self.solid_vertex_buffer = Some(device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Widget Solid Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));

        self.solid_index_buffer = Some(device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Widget Solid Index Buffer"),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        ));
    }

    fn prepare_batches(
        &mut self,
        device: &Device,
        queue: &Queue,
        commands: &[DrawCommand],
        batches: &[Batch],
        viewport: [f32; 2],
    ) {
        self.batches.clear();
        let mut used = HashSet::new();

        for batch in batches {
            match *batch {
                Batch::Solid { first, quads } => self.batches.push(PreparedBatch::Solid {
                    first_index: first * 6,
                    index_count: quads * 6,
                }),
                Batch::Sprite(index) => {
                    let Some(DrawCommand::Sprite {
                        texture,
                        rect,
                        tint,
                        quarter_turns,
                    }) = commands.get(index)
                    else {
                        continue;
                    };
                    used.insert(texture.id());
                    let bind_group =
                        self.sprite_bind_group(device, queue, texture, *rect, *tint, *quarter_turns, viewport);
                    self.batches.push(PreparedBatch::Sprite { bind_group });
                }
            }
        }

        // Drop textures no longer drawn
        self.textures.retain(|id, _| used.contains(id));
    }

    #[allow(clippy::too_many_arguments)]
    fn sprite_bind_group(
        &mut self,
        device: &Device,
        queue: &Queue,
        texture: &Texture,
        rect: Rect,
        tint: Color,
        quarter_turns: u8,
        viewport: [f32; 2],
    ) -> BindGroup {
        let gpu = self
            .textures
            .entry(texture.id())
            .or_insert_with(|| upload_texture(device, queue, texture));

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Widget Image Uniform"),
            contents: bytemuck::cast_slice(&[ImageUniforms {
                viewport: [viewport[0], viewport[1], 0.0, 0.0],
                rect: rect.to_array(),
                tint: tint.to_f32_array(),
                quarter_turns: u32::from(quarter_turns),
                _padding: [0; 3],
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Widget Image Bind Group"),
            layout: &self.image_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&gpu.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.image_sampler),
                },
            ],
        })
    }

    /// Shape every text command with glyphon, centered on its anchor.
    fn prepare_text(
        &mut self,
        device: &Device,
        queue: &Queue,
        commands: &[DrawCommand],
        viewport: [f32; 2],
    ) {
        self.text_buffers.clear();
        let mut text_entries: Vec<TextEntry> = Vec::new();

        for command in commands {
            let DrawCommand::Text {
                text,
                font,
                size,
                color,
                center,
            } = command
            else {
                continue;
            };

            let family = font
                .as_ref()
                .and_then(|font| register_font(&mut self.font_system, &mut self.font_families, font));
            let attrs = match &family {
                Some(name) => Attrs::new().family(Family::Name(name)),
                None => Attrs::new().family(Family::SansSerif),
            };

            let font_size = (*size).max(1) as f32;
            let line_height = font_size * 1.2;
            let mut buffer = TextBuffer::new(&mut self.font_system, Metrics::new(font_size, line_height));
            buffer.set_size(&mut self.font_system, viewport[0].max(1.0), line_height * 2.0);
            buffer.set_text(&mut self.font_system, text, attrs, Shaping::Advanced);
            buffer.shape_until_scroll(&mut self.font_system);

            let text_width: f32 = buffer
                .layout_runs()
                .map(|run| run.line_w)
                .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
                .unwrap_or(0.0);

            text_entries.push(TextEntry {
                left: center.x - text_width / 2.0,
                top: center.y - line_height / 2.0,
                color: *color,
            });
            self.text_buffers.push(buffer);
        }

        let resolution = Resolution {
            width: viewport[0] as u32,
            height: viewport[1] as u32,
        };
        let text_areas: Vec<TextArea> = text_entries
            .iter()
            .zip(self.text_buffers.iter())
            .map(|(entry, buffer)| TextArea {
                buffer,
                left: entry.left,
                top: entry.top,
                scale: 1.0,
                bounds: TextBounds {
                    left: 0,
                    top: 0,
                    right: viewport[0] as i32,
                    bottom: viewport[1] as i32,
                },
                default_color: TextColor::rgba(entry.color.r, entry.color.g, entry.color.b, entry.color.a),
            })
            .collect();

        if let Err(e) = self.text_renderer.prepare(
            device,
            queue,
            &mut self.font_system,
            &mut self.text_atlas,
            resolution,
            text_areas,
            &mut self.swash_cache,
        ) {
            log::error!("Failed to prepare widget text: {:?}", e);
        }
    }

    /// Render the prepared frame.
    pub fn render<'a>(&'a self, render_pass: &mut RenderPass<'a>) {
        for batch in &self.batches {
            match batch {
                PreparedBatch::Solid {
                    first_index,
                    index_count,
                } => {
                    let (Some(vb), Some(ib)) = (&self.solid_vertex_buffer, &self.solid_index_buffer)
                    else {
                        continue;
                    };
                    render_pass.set_pipeline(&self.solid_pipeline);
                    render_pass.set_bind_group(0, &self.solid_bind_group, &[]);
                    render_pass.set_vertex_buffer(0, vb.slice(..));
                    render_pass.set_index_buffer(ib.slice(..), wgpu::IndexFormat::Uint32);
                    render_pass.draw_indexed(*first_index..first_index + index_count, 0, 0..1);
                }
                PreparedBatch::Sprite { bind_group } => {
                    render_pass.set_pipeline(&self.image_pipeline);
                    render_pass.set_bind_group(0, bind_group, &[]);
                    render_pass.set_vertex_buffer(0, self.image_vertex_buffer.slice(..));
                    render_pass.set_index_buffer(
                        self.image_index_buffer.slice(..),
                        wgpu::IndexFormat::Uint16,
                    );
                    render_pass.draw_indexed(0..6, 0, 0..1);
                }
            }
        }

        if let Err(e) = self.text_renderer.render(&self.text_atlas, render_pass) {
            log::error!("Failed to render widget text: {:?}", e);
        }
    }

    /// Trim the text atlas to free unused memory
    pub fn trim(&mut self) {
        self.text_atlas.trim();
    }
}

struct TextEntry {
    left: f32,
    top: f32,
    color: Color,
}

fn create_pipeline(
    device: &Device,
    format: TextureFormat,
    label: &str,
    shader: &wgpu::ShaderModule,
    bind_group_layout: &BindGroupLayout,
    vertex_layout: wgpu::VertexBufferLayout<'static>,
) -> RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: &[bind_group_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: "vs_main",
            buffers: &[vertex_layout],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: "fs_main",
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    })
}

/// Push 4 vertices + 6 indices for one rect
fn push_rect_vertices(vertices: &mut Vec<SolidVertex>, indices: &mut Vec<u32>, rect: Rect, color: Color) {
    let [x, y, w, h] = rect.to_array();
    let color = color.to_f32_array();
    let base_idx = vertices.len() as u32;

    for (px, py) in [(x, y), (x + w, y), (x + w, y + h), (x, y + h)] {
        vertices.push(SolidVertex {
            position: [px, py],
            color,
        });
    }

    indices.extend_from_slice(&[
        base_idx,
        base_idx + 1,
        base_idx + 2,
        base_idx,
        base_idx + 2,
        base_idx + 3,
    ]);
}

fn upload_texture(device: &Device, queue: &Queue, texture: &Texture) -> GpuTexture {
    let (width, height) = (texture.width(), texture.height());
    let texture_size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };

    let gpu_texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Widget Texture"),
        size: texture_size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::ImageCopyTexture {
            texture: &gpu_texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        texture.pixels(),
        wgpu::ImageDataLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        texture_size,
    );

    log::debug!("Uploaded texture {:?} ({}x{})", texture.id(), width, height);
    let view = gpu_texture.create_view(&wgpu::TextureViewDescriptor::default());
    GpuTexture {
        _texture: gpu_texture,
        view,
    }
}

/// Family name of `font` in the font system, loading it the first time.
fn register_font(
    font_system: &mut FontSystem,
    families: &mut HashMap<FontId, Option<String>>,
    font: &Font,
) -> Option<String> {
    families
        .entry(font.id())
        .or_insert_with(|| {
            let before: HashSet<_> = font_system.db().faces().map(|face| face.id).collect();
            font_system.db_mut().load_font_data(font.bytes().to_vec());
            let family = font_system
                .db()
                .faces()
                .find(|face| !before.contains(&face.id))
                .and_then(|face| face.families.first().map(|(name, _)| name.clone()));
            match &family {
                Some(name) => log::info!("Registered font '{}' as family '{}'", font.name(), name),
                None => log::warn!("Font '{}' has no usable face, using sans-serif", font.name()),
            }
            family
        })
        .clone()
}

const SOLID_SHADER: &str = r#"
struct Uniforms {
    viewport: vec4<f32>, // width, height, 0, 0
}

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) color: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
}

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let clip_x = (in.position.x / uniforms.viewport.x) * 2.0 - 1.0;
    let clip_y = 1.0 - (in.position.y / uniforms.viewport.y) * 2.0;
    out.clip_position = vec4<f32>(clip_x, clip_y, 0.0, 1.0);
    out.color = in.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

const IMAGE_SHADER: &str = r#"
struct Uniforms {
    viewport: vec4<f32>,
    rect: vec4<f32>,
    tint: vec4<f32>,
    quarter_turns: u32,
    _pad0: u32,
    _pad1: u32,
    _pad2: u32,
}

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;
@group(0) @binding(1)
var t_image: texture_2d<f32>;
@group(0) @binding(2)
var s_image: sampler;

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) tex_coords: vec2<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) tex_coords: vec2<f32>,
}

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let pixel = uniforms.rect.xy + in.position * uniforms.rect.zw;
    let clip_x = (pixel.x / uniforms.viewport.x) * 2.0 - 1.0;
    let clip_y = 1.0 - (pixel.y / uniforms.viewport.y) * 2.0;
    out.clip_position = vec4<f32>(clip_x, clip_y, 0.0, 1.0);

    // Clockwise quarter turns: destination (u, v) samples source (v, 1 - u)
    var uv = in.tex_coords;
    for (var i = 0u; i < uniforms.quarter_turns; i = i + 1u) {
        uv = vec2<f32>(uv.y, 1.0 - uv.x);
    }
    out.tex_coords = uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(t_image, s_image, in.tex_coords) * uniforms.tint;
}
"#;
