// SPDX-License-Identifier: MPL-2.0
//! GPU display of the uploaded image with pan, zoom and enhancement filters.
//!
//! The decoded pixels are uploaded once per image. Every frame only a small
//! uniform buffer changes: the quad geometry (from the viewport transform)
//! and the filter/shadow values (from the enhancement preset). Pixel data on
//! the CPU side is never modified.
//!
//! # Architecture
//!
//! The render pass viewport covers the whole widget; quad corners are given
//! in the widget's NDC space and may lie far outside it when zoomed or
//! panned, in which case the rasterizer and the scissor rect clip them.
//! Two instances are drawn: the drop shadow (instance 0, fully transparent
//! when the preset has none) and the image itself (instance 1).

use crate::media::ImageAsset;
use crate::ui::state::{EnhancementPreset, ViewportTransform};
use bytemuck::{Pod, Zeroable};
use iced::widget::shader::{self, Viewport};
use iced::widget::Action;
use iced::{mouse, Element, Length, Point, Rectangle, Size};
use image_rs::imageops::{self, FilterType};
use image_rs::RgbaImage;
use std::borrow::Cow;
use std::sync::Arc;

/// Pointer input, in logical pixels relative to the widget's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed(Point),
    Moved(Point),
    Released,
    /// The cursor left the widget (or the window) while pressed.
    Exited,
}

/// Builds the image widget.
pub fn filtered_image<'a, Message: 'a>(
    image: &ImageAsset,
    transform: ViewportTransform,
    preset: EnhancementPreset,
    height: f32,
    on_pointer: fn(PointerEvent) -> Message,
) -> Element<'a, Message> {
    let (width_px, height_px) = image.texture_size();
    let program = FilteredImageProgram {
        texture: TextureData {
            asset_id: image.id(),
            rgba: image.rgba_shared(),
            width: width_px,
            height: height_px,
        },
        transform,
        preset,
        on_pointer,
    };

    shader::Shader::new(program)
        .width(Length::Fill)
        .height(Length::Fixed(height))
        .into()
}

#[derive(Debug, Clone)]
struct TextureData {
    asset_id: u64,
    rgba: Arc<Vec<u8>>,
    width: u32,
    height: u32,
}

struct FilteredImageProgram<Message> {
    texture: TextureData,
    transform: ViewportTransform,
    preset: EnhancementPreset,
    on_pointer: fn(PointerEvent) -> Message,
}

/// Per-widget pointer tracking.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PointerState {
    pressed: bool,
}

/// Maps a raw window event to a pointer event for the widget at `bounds`.
fn pointer_event(
    state: &mut PointerState,
    event: &iced::Event,
    bounds: Rectangle,
    cursor: mouse::Cursor,
) -> Option<PointerEvent> {
    match event {
        iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
            let position = cursor.position_in(bounds)?;
            state.pressed = true;
            Some(PointerEvent::Pressed(position))
        }
        iced::Event::Mouse(mouse::Event::CursorMoved { .. }) if state.pressed => {
            match cursor.position_in(bounds) {
                Some(position) => Some(PointerEvent::Moved(position)),
                None => {
                    state.pressed = false;
                    Some(PointerEvent::Exited)
                }
            }
        }
        iced::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) if state.pressed => {
            state.pressed = false;
            Some(PointerEvent::Released)
        }
        iced::Event::Mouse(mouse::Event::CursorLeft) if state.pressed => {
            state.pressed = false;
            Some(PointerEvent::Exited)
        }
        _ => None,
    }
}

impl<Message> shader::Program<Message> for FilteredImageProgram<Message> {
    type State = PointerState;
    type Primitive = FilteredImagePrimitive;

    fn update(
        &self,
        state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        pointer_event(state, event, bounds, cursor)
            .map(|pointer| Action::publish((self.on_pointer)(pointer)).and_capture())
    }

    fn draw(
        &self,
        _state: &Self::State,
        _cursor: mouse::Cursor,
        bounds: Rectangle,
    ) -> Self::Primitive {
        let image_size = Size::new(self.texture.width as f32, self.texture.height as f32);
        let uniforms = self
            .transform
            .display_rect(image_size, bounds.size())
            .map_or_else(Uniforms::hidden, |rect| {
                Uniforms::new(rect, bounds.size(), self.preset)
            });

        FilteredImagePrimitive {
            texture: self.texture.clone(),
            uniforms,
        }
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if state.pressed {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(bounds) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}

/// GPU-side parameters, laid out as five `vec4<f32>`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
struct Uniforms {
    /// Image quad in NDC: left, top, right, bottom.
    image_quad: [f32; 4],
    /// Shadow quad in NDC: left, top, right, bottom.
    shadow_quad: [f32; 4],
    /// Shadow quad half extent in px (x, y); shadow box half extent (z, w).
    shadow_extent: [f32; 4],
    /// Blur radius in px, shadow alpha, unused, unused.
    shadow_style: [f32; 4],
    /// Brightness, contrast, saturation, unused.
    filter: [f32; 4],
}

impl Uniforms {
    fn new(rect: Rectangle, bounds: Size, preset: EnhancementPreset) -> Self {
        let (shadow_rect, shadow_extent, shadow_style) = match preset.shadow {
            Some(shadow) => {
                let half_box = Size::new(
                    (rect.width / 2.0 + shadow.spread()).max(0.0),
                    (rect.height / 2.0 + shadow.spread()).max(0.0),
                );
                let reach = shadow.blur();
                let center = Point::new(rect.center_x(), rect.center_y() + shadow.offset_y());
                let quad = Rectangle {
                    x: center.x - half_box.width - reach,
                    y: center.y - half_box.height - reach,
                    width: 2.0 * (half_box.width + reach),
                    height: 2.0 * (half_box.height + reach),
                };
                (
                    quad,
                    [
                        quad.width / 2.0,
                        quad.height / 2.0,
                        half_box.width,
                        half_box.height,
                    ],
                    [shadow.blur(), shadow.alpha(), 0.0, 0.0],
                )
            }
            None => (rect, [0.0; 4], [0.0; 4]),
        };

        Self {
            image_quad: to_ndc(rect, bounds),
            shadow_quad: to_ndc(shadow_rect, bounds),
            shadow_extent,
            shadow_style,
            filter: [preset.brightness, preset.contrast, preset.saturation, 0.0],
        }
    }

    /// Degenerate geometry: nothing is rasterized.
    fn hidden() -> Self {
        Self::zeroed()
    }
}

/// Converts a rectangle relative to the widget origin into the widget's NDC.
fn to_ndc(rect: Rectangle, bounds: Size) -> [f32; 4] {
    [
        rect.x / bounds.width * 2.0 - 1.0,
        1.0 - rect.y / bounds.height * 2.0,
        (rect.x + rect.width) / bounds.width * 2.0 - 1.0,
        1.0 - (rect.y + rect.height) / bounds.height * 2.0,
    ]
}

#[derive(Debug, Clone)]
pub struct FilteredImagePrimitive {
    texture: TextureData,
    uniforms: Uniforms,
}

impl shader::Primitive for FilteredImagePrimitive {
    type Pipeline = FilteredImagePipeline;

    fn prepare(
        &self,
        pipeline: &mut Self::Pipeline,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bounds: &Rectangle,
        viewport: &Viewport,
    ) {
        pipeline.store_physical_bounds(bounds, viewport);
        pipeline.update_texture(device, queue, &self.texture);
        queue.write_buffer(&pipeline.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));
    }

    fn render(
        &self,
        pipeline: &Self::Pipeline,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        clip_bounds: &Rectangle<u32>,
    ) {
        pipeline.render(encoder, target, clip_bounds);
    }
}

pub struct FilteredImagePipeline {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    uniform_buffer: wgpu::Buffer,
    bind_group: Option<wgpu::BindGroup>,
    current_asset: Option<u64>,
    widget_physical_bounds: Rectangle<f32>,
}

impl shader::Pipeline for FilteredImagePipeline {
    fn new(device: &wgpu::Device, _queue: &wgpu::Queue, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Filtered Image Shader"),
            source: wgpu::ShaderSource::Wgsl(FILTERED_IMAGE_SHADER.into()),
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Filtered Image Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Filtered Image Uniforms"),
            size: std::mem::size_of::<Uniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Filtered Image Bind Group Layout"),
            entries: &[
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
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Filtered Image Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Filtered Image Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
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
            cache: None,
        });

        Self {
            pipeline,
            bind_group_layout,
            sampler,
            uniform_buffer,
            bind_group: None,
            current_asset: None,
            widget_physical_bounds: Rectangle::default(),
        }
    }
}

impl FilteredImagePipeline {
    fn store_physical_bounds(&mut self, bounds: &Rectangle, viewport: &Viewport) {
        let scale = viewport.scale_factor();
        self.widget_physical_bounds = Rectangle {
            x: bounds.x * scale,
            y: bounds.y * scale,
            width: bounds.width * scale,
            height: bounds.height * scale,
        };
    }

    /// Uploads the pixels when the image changed since the last frame.
    fn update_texture(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &TextureData) {
        if self.current_asset == Some(data.asset_id) {
            return;
        }

        let max_dimension = device.limits().max_texture_dimension_2d;
        let Some((width, height, pixels)) = texture_pixels(data, max_dimension) else {
            tracing::warn!(
                width = data.width,
                height = data.height,
                "pixel buffer does not match image size"
            );
            return;
        };

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Filtered Image Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            // Decoded pixels are already gamma-encoded.
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            size,
        );

        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        self.bind_group = Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Filtered Image Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: self.uniform_buffer.as_entire_binding(),
                },
            ],
        }));
        self.current_asset = Some(data.asset_id);
    }

    fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        clip_bounds: &Rectangle<u32>,
    ) {
        let Some(bind_group) = &self.bind_group else {
            return;
        };
        let wb = &self.widget_physical_bounds;
        if wb.width < 1.0 || wb.height < 1.0 || clip_bounds.width == 0 || clip_bounds.height == 0 {
            return;
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Filtered Image Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, bind_group, &[]);
        render_pass.set_viewport(wb.x, wb.y, wb.width, wb.height, 0.0, 1.0);
        render_pass.set_scissor_rect(
            clip_bounds.x,
            clip_bounds.y,
            clip_bounds.width,
            clip_bounds.height,
        );

        // Instance 0: shadow, instance 1: image.
        render_pass.draw(0..4, 0..2);
    }
}

const FILTERED_IMAGE_SHADER: &str = r#"
struct Uniforms {
    image_quad: vec4<f32>,
    shadow_quad: vec4<f32>,
    shadow_extent: vec4<f32>,
    shadow_style: vec4<f32>,
    filter: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) tex_coord: vec2<f32>,
    @location(1) local: vec2<f32>,
    @location(2) @interpolate(flat) kind: u32,
}

@group(0) @binding(0)
var image_texture: texture_2d<f32>;
@group(0) @binding(1)
var image_sampler: sampler;
@group(0) @binding(2)
var<uniform> u: Uniforms;

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @builtin(instance_index) instance_index: u32,
) -> VertexOutput {
    // Triangle strip: top-left, top-right, bottom-left, bottom-right
    let corner = vec2<f32>(f32(vertex_index & 1u), f32(vertex_index >> 1u));

    var quad = u.image_quad;
    if (instance_index == 0u) {
        quad = u.shadow_quad;
    }

    var output: VertexOutput;
    output.position = vec4<f32>(
        mix(quad.x, quad.z, corner.x),
        mix(quad.y, quad.w, corner.y),
        0.0,
        1.0,
    );
    output.tex_coord = corner;
    output.local = (corner * 2.0 - 1.0) * u.shadow_extent.xy;
    output.kind = instance_index;
    return output;
}

fn enhance(color: vec3<f32>) -> vec3<f32> {
    let zero = vec3<f32>(0.0);
    let one = vec3<f32>(1.0);
    var rgb = clamp(color * u.filter.x, zero, one);
    rgb = clamp((rgb - 0.5) * u.filter.y + 0.5, zero, one);
    let luma = dot(rgb, vec3<f32>(0.2126, 0.7152, 0.0722));
    return clamp(mix(vec3<f32>(luma), rgb, u.filter.z), zero, one);
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    // Sampled before branching to stay in uniform control flow.
    let texel = textureSample(image_texture, image_sampler, input.tex_coord);

    if (input.kind == 0u) {
        let outside = max(abs(input.local) - u.shadow_extent.zw, vec2<f32>(0.0));
        let distance = length(outside);
        let blur = max(u.shadow_style.x, 0.001);
        let alpha = u.shadow_style.y * (1.0 - smoothstep(0.0, blur, distance));
        return vec4<f32>(0.0, 0.0, 0.0, alpha);
    }

    return vec4<f32>(enhance(texel.rgb), texel.a);
}
"#;

/// Largest size with the same aspect ratio that fits in `max` on both sides.
fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width <= max && height <= max {
        return (width, height);
    }
    let (long, short) = (u64::from(width.max(height)), u64::from(width.min(height)));
    let scaled = u32::try_from(short * u64::from(max) / long).unwrap_or(max).max(1);
    if width >= height {
        (max, scaled)
    } else {
        (scaled, max)
    }
}

/// Pixels to upload, downsampled when the image exceeds the device limit.
///
/// Returns `None` if the buffer length does not match the image size.
fn texture_pixels(data: &TextureData, max_dimension: u32) -> Option<(u32, u32, Cow<'_, [u8]>)> {
    let (width, height) = fit_within(data.width, data.height, max_dimension);
    if (width, height) == (data.width, data.height) {
        return Some((width, height, Cow::Borrowed(data.rgba.as_slice())));
    }

    let full = RgbaImage::from_raw(data.width, data.height, data.rgba.to_vec())?;
    tracing::debug!(
        from_width = data.width,
        from_height = data.height,
        width,
        height,
        "downsampling image to the GPU texture limit"
    );
    let fitted = imageops::resize(&full, width, height, FilterType::Triangle);
    Some((width, height, Cow::Owned(fitted.into_raw())))
}
