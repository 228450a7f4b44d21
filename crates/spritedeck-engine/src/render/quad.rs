use bytemuck::{Pod, Zeroable};

use crate::coords::Rect;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::DrawList;

use super::common::{
    create_quad_pipeline, logical_clip_to_scissor, runs, InstanceBuffer, UnitQuad, ViewportUniform,
};

/// Renderer for `DrawCmd::Fill`.
///
/// One instanced draw per run of fills sharing a clip rect.
pub struct QuadRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    quad: Option<UnitQuad>,
    instances: InstanceBuffer,
}

impl Default for QuadRenderer {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            bind_group: None,
            viewport_ubo: None,
            quad: None,
            instances: InstanceBuffer::new("spritedeck fill instance vbo"),
        }
    }
}

impl QuadRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &DrawList) {
        let (instances, clips): (Vec<FillInstance>, Vec<Option<Rect>>) = draw_list
            .fills()
            .map(|(cmd, clip)| {
                let instance = FillInstance {
                    origin: [cmd.rect.origin.x, cmd.rect.origin.y],
                    size: [cmd.rect.size.x, cmd.rect.size.y],
                    color: cmd.color.to_array(),
                };
                (instance, clip)
            })
            .unzip();

        if instances.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        if self.quad.is_none() {
            self.quad = Some(UnitQuad::new(ctx.device, "spritedeck fill"));
        }

        if let Some(ubo) = self.viewport_ubo.as_ref() {
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::new(ctx.viewport)));
        }

        let Some(instance_vbo) = self.instances.upload(ctx, &instances) else { return; };
        let Some(pipeline)     = self.pipeline.as_ref()   else { return; };
        let Some(bind_group)   = self.bind_group.as_ref() else { return; };
        let Some(quad)         = self.quad.as_ref()       else { return; };

        let mut rpass = target.begin_load_pass("spritedeck fill pass");
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

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("spritedeck fill bgl"),
            entries: &[ViewportUniform::layout_entry(0)],
        });

        let pipeline = create_quad_pipeline(
            ctx,
            "spritedeck fill",
            include_str!("shaders/quad.wgsl"),
            &[&bgl],
            FillInstance::layout(),
        );

        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("spritedeck fill viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("spritedeck fill bind group"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (32 bytes):
///
///  offset  0  origin  [f32; 2]   loc 1
///  offset  8  size    [f32; 2]   loc 2
///  offset 16  color   [f32; 4]   loc 3  (premultiplied)
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct FillInstance {
    origin: [f32; 2],
    size:   [f32; 2],
    color:  [f32; 4],
}

impl FillInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2, // size
        3 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<FillInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
