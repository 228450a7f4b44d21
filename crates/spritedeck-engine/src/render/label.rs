use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::coords::Rect;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::DrawList;
use crate::text::FontSystem;

use super::common::{
    create_quad_pipeline, logical_clip_to_scissor, runs, InstanceBuffer, UnitQuad, ViewportUniform,
};

// ── atlas constants ────────────────────────────────────────────────────────

const ATLAS_SIZE: u32 = 2048;
const GLYPH_PADDING: u32 = 1; // pixels between glyphs in the atlas

struct CachedGlyph {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

/// Shelf packer state for the glyph atlas.
struct ShelfCursor {
    x: u32,
    y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfCursor {
    fn new() -> Self {
        Self { x: GLYPH_PADDING, y: GLYPH_PADDING, row_height: 0, full: false }
    }

    /// Reserves a `w × h` cell and returns its top-left, or `None` once full.
    fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full {
            return None;
        }
        if self.x + w + GLYPH_PADDING > ATLAS_SIZE {
            self.y += self.row_height + GLYPH_PADDING;
            self.x = GLYPH_PADDING;
            self.row_height = 0;
        }
        if self.y + h + GLYPH_PADDING > ATLAS_SIZE || self.x + w + GLYPH_PADDING > ATLAS_SIZE {
            self.full = true;
            return None;
        }

        let at = (self.x, self.y);
        self.x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(at)
    }
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Renderer for `DrawCmd::Label`.
///
/// Glyphs are rasterized with fontdue at physical pixel size into a
/// 2048 × 2048 R8Unorm atlas and cached for the renderer's lifetime, keyed
/// by `GlyphRasterConfig` (font, glyph index, pixel size).
pub struct LabelRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    atlas_texture: Option<wgpu::Texture>,
    cursor: ShelfCursor,
    glyph_cache: HashMap<GlyphRasterConfig, CachedGlyph>,

    quad: Option<UnitQuad>,
    instances: InstanceBuffer,

    layout: Layout<()>,
}

impl Default for LabelRenderer {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            bind_group: None,
            viewport_ubo: None,
            atlas_texture: None,
            cursor: ShelfCursor::new(),
            glyph_cache: HashMap::new(),
            quad: None,
            instances: InstanceBuffer::new("spritedeck label instance vbo"),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }
}

impl LabelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &DrawList,
        fonts: &FontSystem,
    ) {
        if draw_list.labels().next().is_none() {
            return;
        }

        self.ensure_pipeline(ctx);
        if self.quad.is_none() {
            self.quad = Some(UnitQuad::new(ctx.device, "spritedeck label"));
        }

        let scale = ctx.scale_factor.max(f32::EPSILON);
        let mut instances: Vec<GlyphInstance> = Vec::new();
        let mut clips: Vec<Option<Rect>> = Vec::new();

        for (cmd, clip) in draw_list.labels() {
            let Some(font) = fonts.get(cmd.font) else {
                log::warn!("LabelRenderer: unknown {:?}, skipping {:?}", cmd.font, cmd.text);
                continue;
            };

            // Lay out in physical pixels, then map back to logical.
            self.layout.reset(&LayoutSettings {
                x: cmd.origin.x * scale,
                y: cmd.origin.y * scale,
                max_width: cmd.max_width.map(|w| w * scale),
                ..LayoutSettings::default()
            });
            self.layout.append(&[font], &TextStyle::new(&cmd.text, cmd.size * scale, 0));

            let glyphs: Vec<(GlyphRasterConfig, f32, f32, usize, usize)> = self
                .layout
                .glyphs()
                .iter()
                .filter(|g| g.width > 0 && g.height > 0)
                .map(|g| (g.key, g.x, g.y, g.width, g.height))
                .collect();

            let color = cmd.color.to_array();
            for (key, x, y, w, h) in glyphs {
                if !self.glyph_cache.contains_key(&key) {
                    let (metrics, bitmap) = font.rasterize_config(key);
                    if metrics.width == 0 || metrics.height == 0 {
                        continue;
                    }
                    if let Some(glyph) =
                        self.upload_glyph(ctx, &bitmap, metrics.width as u32, metrics.height as u32)
                    {
                        self.glyph_cache.insert(key, glyph);
                    }
                }
                let Some(cached) = self.glyph_cache.get(&key) else { continue; };

                instances.push(GlyphInstance {
                    dst_min: [x / scale, y / scale],
                    dst_max: [(x + w as f32) / scale, (y + h as f32) / scale],
                    uv_min: cached.uv_min,
                    uv_max: cached.uv_max,
                    color,
                });
                clips.push(clip);
            }
        }

        if instances.is_empty() {
            return;
        }

        if let Some(ubo) = self.viewport_ubo.as_ref() {
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::new(ctx.viewport)));
        }

        let Some(instance_vbo) = self.instances.upload(ctx, &instances) else { return; };
        let Some(pipeline)     = self.pipeline.as_ref()   else { return; };
        let Some(bind_group)   = self.bind_group.as_ref() else { return; };
        let Some(quad)         = self.quad.as_ref()       else { return; };

        let mut rpass = target.begin_load_pass("spritedeck label pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad.ibo.slice(..), wgpu::IndexFormat::Uint16);

        for run in runs(&clips) {
            let clip = clips[run.start as usize];
            let Some((sx, sy, sw, sh)) = logical_clip_to_scissor(clip, ctx.viewport, ctx.scale_factor)
            else {
                continue;
            };
            rpass.set_scissor_rect(sx, sy, sw, sh);
            rpass.draw_indexed(0..UnitQuad::INDEX_COUNT, 0, run);
        }
    }

    fn upload_glyph(&mut self, ctx: &RenderCtx<'_>, bitmap: &[u8], w: u32, h: u32) -> Option<CachedGlyph> {
        let was_full = self.cursor.full;
        let Some((gx, gy)) = self.cursor.place(w, h) else {
            if !was_full {
                log::warn!("LabelRenderer: glyph atlas is full ({ATLAS_SIZE}×{ATLAS_SIZE}); dropping glyphs");
            }
            return None;
        };
        let atlas = self.atlas_texture.as_ref()?;

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: atlas,
                mip_level: 0,
                origin: wgpu::Origin3d { x: gx, y: gy, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            bitmap,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );

        let atlas_f = ATLAS_SIZE as f32;
        Some(CachedGlyph {
            uv_min: [gx as f32 / atlas_f,       gy as f32 / atlas_f],
            uv_max: [(gx + w) as f32 / atlas_f, (gy + h) as f32 / atlas_f],
        })
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("spritedeck label bgl"),
            entries: &[
                ViewportUniform::layout_entry(0),
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
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline = create_quad_pipeline(
            ctx,
            "spritedeck label",
            include_str!("shaders/label.wgsl"),
            &[&bgl],
            GlyphInstance::layout(),
        );

        if self.atlas_texture.is_none() {
            self.atlas_texture = Some(ctx.device.create_texture(&wgpu::TextureDescriptor {
                label: Some("spritedeck glyph atlas"),
                size: wgpu::Extent3d {
                    width: ATLAS_SIZE,
                    height: ATLAS_SIZE,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::R8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            }));
        }
        let Some(atlas) = self.atlas_texture.as_ref() else { return; };
        let atlas_view = atlas.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("spritedeck label sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("spritedeck label viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("spritedeck label bind group"),
            layout: &bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: viewport_ubo.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::TextureView(&atlas_view) },
                wgpu::BindGroupEntry { binding: 2, resource: wgpu::BindingResource::Sampler(&sampler) },
            ],
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (48 bytes):
///
///  offset  0  dst_min  [f32; 2]   loc 1
///  offset  8  dst_max  [f32; 2]   loc 2
///  offset 16  uv_min   [f32; 2]   loc 3
///  offset 24  uv_max   [f32; 2]   loc 4
///  offset 32  color    [f32; 4]   loc 5
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min:  [f32; 2],
    uv_max:  [f32; 2],
    color:   [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2, // uv_max
        5 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── shelf packing ─────────────────────────────────────────────────────

    #[test]
    fn glyphs_pack_left_to_right() {
        let mut shelf = ShelfCursor::new();
        assert_eq!(shelf.place(10, 12), Some((1, 1)));
        assert_eq!(shelf.place(5, 4), Some((12, 1)));
    }

    #[test]
    fn wraps_to_next_shelf_below_tallest_glyph() {
        let mut shelf = ShelfCursor::new();
        shelf.place(ATLAS_SIZE - 20, 30);
        assert_eq!(shelf.place(40, 10), Some((1, 32)));
    }

    #[test]
    fn reports_full_and_stays_full() {
        let mut shelf = ShelfCursor::new();
        assert_eq!(shelf.place(10, ATLAS_SIZE), None);
        assert!(shelf.full);
        assert_eq!(shelf.place(1, 1), None);
    }
}
