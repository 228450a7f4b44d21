use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use image::imageops::{self, FilterType};

use crate::asset::{self, DecodedImage, ImageSource};
use crate::coords::Rect;
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::DrawList;

use super::common::{
    create_quad_pipeline, logical_clip_to_scissor, runs, InstanceBuffer, UnitQuad, ViewportUniform,
};

/// Tint multiplied into the white fallback texture when a source fails to load.
const PLACEHOLDER_TINT: Color = Color::from_premul(0.35, 0.35, 0.4, 1.0);

/// Slot of the 1×1 white fallback texture.
const FALLBACK_SLOT: usize = 0;

// ── texture cache ─────────────────────────────────────────────────────────

struct GpuTexture {
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// GPU textures keyed by [`ImageSource`].
///
/// Each source is decoded at most once. A failure is remembered so the source
/// is neither fetched again nor logged again; its sprites use the fallback.
struct TextureCache {
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    slots: Vec<GpuTexture>,
    /// `None` marks a source that failed to load.
    by_source: HashMap<ImageSource, Option<usize>>,
}

impl TextureCache {
    fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("spritedeck sprite texture bgl"),
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
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("spritedeck sprite sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let mut cache = Self { layout, sampler, slots: Vec::new(), by_source: HashMap::new() };
        let white = DecodedImage { width: 1, height: 1, rgba: vec![255; 4] };
        let fallback = cache.upload(device, queue, "spritedeck fallback texture", &white);
        cache.slots.push(fallback);
        cache
    }

    /// Slot for `source`, loading it on first use. `None` if it failed to load.
    fn slot_for(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, source: &ImageSource) -> Option<usize> {
        if let Some(slot) = self.by_source.get(source) {
            return *slot;
        }

        let slot = match asset::decode(source) {
            Ok(decoded) => {
                let max = device.limits().max_texture_dimension_2d;
                let decoded = downscale_to_fit(decoded, max);
                log::debug!("loaded texture {source} ({}×{})", decoded.width, decoded.height);
                let label = format!("spritedeck texture {source}");
                let texture = self.upload(device, queue, &label, &decoded);
                self.slots.push(texture);
                Some(self.slots.len() - 1)
            }
            Err(err) => {
                log::warn!("failed to load texture {source}: {err}; drawing placeholder");
                None
            }
        };

        self.by_source.insert(source.clone(), slot);
        slot
    }

    fn upload(&self, device: &wgpu::Device, queue: &wgpu::Queue, label: &str, image: &DecodedImage) -> GpuTexture {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        // Colours pass through unconverted; the surface handles encoding.
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
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
            &image.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        GpuTexture { _texture: texture, bind_group }
    }
}

/// Scales `(width, height)` down uniformly so neither side exceeds `max`.
fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width <= max && height <= max {
        return (width, height);
    }
    let scale = max as f64 / width.max(height) as f64;
    let w = ((width as f64 * scale).round() as u32).clamp(1, max);
    let h = ((height as f64 * scale).round() as u32).clamp(1, max);
    (w, h)
}

fn downscale_to_fit(image: DecodedImage, max: u32) -> DecodedImage {
    let (width, height) = fit_within(image.width, image.height, max);
    if (width, height) == (image.width, image.height) {
        return image;
    }

    log::debug!(
        "downscaling {}×{} texture to {width}×{height} (device limit {max})",
        image.width,
        image.height
    );

    let Some(buffer) = image::RgbaImage::from_raw(image.width, image.height, image.rgba) else {
        return DecodedImage { width: 1, height: 1, rgba: vec![255; 4] };
    };
    let resized = imageops::resize(&buffer, width, height, FilterType::Triangle);
    DecodedImage { width, height, rgba: resized.into_raw() }
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Renderer for `DrawCmd::Sprite`.
///
/// Consecutive sprites sharing a texture and clip rect go out as one
/// instanced draw, so recording order is paint order.
pub struct SpriteRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    viewport_bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    textures: Option<TextureCache>,
    quad: Option<UnitQuad>,
    instances: InstanceBuffer,
}

impl Default for SpriteRenderer {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            viewport_bind_group: None,
            viewport_ubo: None,
            textures: None,
            quad: None,
            instances: InstanceBuffer::new("spritedeck sprite instance vbo"),
        }
    }
}

impl SpriteRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &DrawList) {
        if draw_list.sprites().next().is_none() {
            return;
        }

        self.ensure_pipeline(ctx);
        if self.quad.is_none() {
            self.quad = Some(UnitQuad::new(ctx.device, "spritedeck sprite"));
        }
        let Some(textures) = self.textures.as_mut() else { return; };

        let mut instances: Vec<SpriteInstance> = Vec::new();
        let mut keys: Vec<(usize, Option<Rect>)> = Vec::new();

        for (cmd, clip) in draw_list.sprites() {
            let (slot, tint) = match textures.slot_for(ctx.device, ctx.queue, &cmd.image) {
                Some(slot) => (slot, cmd.tint),
                None => (FALLBACK_SLOT, multiply(PLACEHOLDER_TINT, cmd.tint)),
            };

            let bounds = cmd.bounds();
            instances.push(SpriteInstance {
                origin: [bounds.origin.x, bounds.origin.y],
                size: [bounds.size.x, bounds.size.y],
                tint: tint.to_array(),
            });
            keys.push((slot, clip));
        }

        if let Some(ubo) = self.viewport_ubo.as_ref() {
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::new(ctx.viewport)));
        }

        let Some(instance_vbo)  = self.instances.upload(ctx, &instances) else { return; };
        let Some(pipeline)      = self.pipeline.as_ref()            else { return; };
        let Some(viewport_bg)   = self.viewport_bind_group.as_ref() else { return; };
        let Some(quad)          = self.quad.as_ref()                else { return; };
        let Some(textures)      = self.textures.as_ref()            else { return; };

        let mut rpass = target.begin_load_pass("spritedeck sprite pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, viewport_bg, &[]);
        rpass.set_vertex_buffer(0, quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad.ibo.slice(..), wgpu::IndexFormat::Uint16);

        for run in runs(&keys) {
            let (slot, clip) = keys[run.start as usize];
            let Some((sx, sy, sw, sh)) = logical_clip_to_scissor(clip, ctx.viewport, ctx.scale_factor)
            else {
                continue;
            };
            let Some(texture) = textures.slots.get(slot) else { continue; };

            rpass.set_scissor_rect(sx, sy, sw, sh);
            rpass.set_bind_group(1, &texture.bind_group, &[]);
            rpass.draw_indexed(0..UnitQuad::INDEX_COUNT, 0, run);
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.textures.is_none() {
            self.textures = Some(TextureCache::new(ctx.device, ctx.queue));
        }
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }
        let Some(textures) = self.textures.as_ref() else { return; };

        let viewport_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("spritedeck sprite viewport bgl"),
            entries: &[ViewportUniform::layout_entry(0)],
        });

        let pipeline = create_quad_pipeline(
            ctx,
            "spritedeck sprite",
            include_str!("shaders/sprite.wgsl"),
            &[&viewport_bgl, &textures.layout],
            SpriteInstance::layout(),
        );

        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("spritedeck sprite viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let viewport_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("spritedeck sprite viewport bind group"),
            layout: &viewport_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.viewport_ubo = Some(viewport_ubo);
        self.viewport_bind_group = Some(viewport_bind_group);
    }
}

fn multiply(a: Color, b: Color) -> Color {
    Color::from_premul(a.r * b.r, a.g * b.g, a.b * b.b, a.a * b.a)
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (32 bytes):
///
///  offset  0  origin  [f32; 2]   loc 1  (top-left, anchor already applied)
///  offset  8  size    [f32; 2]   loc 2
///  offset 16  tint    [f32; 4]   loc 3  (premultiplied)
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct SpriteInstance {
    origin: [f32; 2],
    size:   [f32; 2],
    tint:   [f32; 4],
}

impl SpriteInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2, // size
        3 => Float32x4  // tint
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── downscaling ───────────────────────────────────────────────────────

    #[test]
    fn images_within_the_limit_are_untouched() {
        assert_eq!(fit_within(300, 200, 2048), (300, 200));
        assert_eq!(fit_within(2048, 2048, 2048), (2048, 2048));
    }

    #[test]
    fn oversized_images_keep_their_aspect_ratio() {
        assert_eq!(fit_within(4096, 1024, 2048), (2048, 512));
        assert_eq!(fit_within(1000, 8000, 2000), (250, 2000));
    }

    #[test]
    fn extreme_aspect_never_collapses_to_zero() {
        assert_eq!(fit_within(100_000, 1, 2048), (2048, 1));
    }

    #[test]
    fn downscale_resamples_pixels() {
        let image = DecodedImage { width: 8, height: 4, rgba: vec![200; 8 * 4 * 4] };
        let out = downscale_to_fit(image, 4);
        assert_eq!((out.width, out.height), (4, 2));
        assert_eq!(out.rgba.len(), 4 * 2 * 4);
        assert!(out.rgba.iter().all(|&b| b.abs_diff(200) <= 1));
    }

    // ── tint ──────────────────────────────────────────────────────────────

    #[test]
    fn placeholder_tint_respects_sprite_alpha() {
        let t = multiply(PLACEHOLDER_TINT, Color::WHITE.faded(0.5));
        assert_eq!(t.a, 0.5);
        assert!((t.r - 0.175).abs() < 1e-6);
    }
}
