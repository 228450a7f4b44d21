use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;

use spritedeck_engine::coords::Rect;
use spritedeck_engine::core::{App as EngineApp, AppControl, FrameCtx};
use spritedeck_engine::device::GpuInit;
use spritedeck_engine::render::{LabelRenderer, QuadRenderer, SpriteRenderer, StageOptions};
use spritedeck_engine::window::{Runtime, RuntimeConfig};

use crate::assembler::{AssemblerConfig, SceneAssembler};
use crate::catalog::{Catalog, ItemTemplate};
use crate::scene::{UiInput, UiScene};
use crate::stage::Stage;
use crate::widget::Widget;
use crate::widgets::picker::{PickerPanel, PickerStyle};

// ── Application ───────────────────────────────────────────────────────────

/// Top-level builder: configure the window, catalog and stage, then
/// [`run`](Self::run) the event loop.
///
/// ```rust,ignore
/// Application::new()
///     .title("spritedeck")
///     .catalog(catalog)
///     .font(load_font())
///     .run()?;
/// ```
pub struct Application {
    title:         String,
    width:         f64,
    height:        f64,
    catalog:       Catalog,
    stage_options: StageOptions,
    picker_style:  PickerStyle,
    assembler:     AssemblerConfig,
    gpu_init:      GpuInit,
    font:          Option<Vec<u8>>,
}

impl Application {
    pub fn new() -> Self {
        Self {
            title:         "spritedeck".to_string(),
            width:         1280.0,
            height:        720.0,
            catalog:       Catalog::default(),
            stage_options: StageOptions::default(),
            picker_style:  PickerStyle::default(),
            assembler:     AssemblerConfig::default(),
            gpu_init:      GpuInit::default(),
            font:          None,
        }
    }

    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width  = width;
        self.height = height;
        self
    }

    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Stage background and sizing. The size is resolved once, at mount.
    pub fn stage_options(mut self, options: StageOptions) -> Self {
        self.stage_options = options;
        self
    }

    pub fn picker_style(mut self, style: PickerStyle) -> Self {
        self.picker_style = style;
        self
    }

    pub fn assembler(mut self, config: AssemblerConfig) -> Self {
        self.assembler = config;
        self
    }

    /// Device and backend preferences handed to the renderer at startup.
    pub fn gpu_init(mut self, init: GpuInit) -> Self {
        self.gpu_init = init;
        self
    }

    /// TrueType / OpenType bytes for picker labels. Without a usable font the
    /// picker shows thumbnails only.
    pub fn font(mut self, data: Vec<u8>) -> Self {
        self.font = Some(data);
        self
    }

    /// Opens the window and runs until it is closed.
    pub fn run(self) -> Result<()> {
        let config = RuntimeConfig::default()
            .with_title(self.title.clone())
            .with_size(self.width, self.height);
        let gpu_init = self.gpu_init.clone();
        Runtime::run(config, gpu_init, UiAppState::new(self))
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

// ── UiAppState ────────────────────────────────────────────────────────────

/// Implements `spritedeck_engine::core::App`; user code never sees it.
struct UiAppState {
    scene:     UiScene,
    picker:    PickerPanel,
    assembler: SceneAssembler,
    /// Templates emitted by the picker, drained into the assembler each frame.
    pending:   Rc<RefCell<Vec<ItemTemplate>>>,

    stage_options: StageOptions,
    /// Mounted on the first frame, when the window size is known.
    stage:         Option<Stage>,

    quad_renderer:   QuadRenderer,
    sprite_renderer: SpriteRenderer,
    label_renderer:  LabelRenderer,
}

impl UiAppState {
    fn new(app: Application) -> Self {
        let mut scene = UiScene::new();
        match app.font.as_deref() {
            Some(bytes) => {
                if let Err(e) = scene.load_font(bytes) {
                    log::warn!("{e}; picker labels disabled");
                }
            }
            None => log::info!("no font configured; picker labels disabled"),
        }

        let pending: Rc<RefCell<Vec<ItemTemplate>>> = Rc::default();
        let sink = pending.clone();
        let picker = PickerPanel::new(app.catalog, app.picker_style)
            .on_add(move |template| sink.borrow_mut().push(template));

        Self {
            scene,
            picker,
            assembler: SceneAssembler::new(app.assembler),
            pending,
            stage_options: app.stage_options,
            stage: None,
            quad_renderer: QuadRenderer::new(),
            sprite_renderer: SpriteRenderer::new(),
            label_renderer: LabelRenderer::new(),
        }
    }
}

impl EngineApp for UiAppState {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let window = ctx.window.logical_size();
        let picker_width = self.picker.style().width;
        let options = &self.stage_options;
        let stage = self
            .stage
            .get_or_insert_with(|| Stage::mount(options, window, picker_width));

        let picker_rect = Rect::new(0.0, 0.0, picker_width, window.y);
        let stage_rect = stage.rect();

        // ── Route input ───────────────────────────────────────────────────
        let input = UiInput::from_engine(ctx.input, ctx.input_frame);
        self.scene.dispatch(
            &mut [
                (&mut self.picker as &mut dyn Widget, picker_rect),
                (&mut *stage as &mut dyn Widget, stage_rect),
            ],
            &input,
        );

        for template in self.pending.borrow_mut().drain(..) {
            self.assembler.add_item(template);
        }
        self.assembler.sync(stage);

        // ── Paint ─────────────────────────────────────────────────────────
        self.scene.paint(
            &[
                (&self.picker as &dyn Widget, picker_rect),
                (&*stage as &dyn Widget, stage_rect),
            ],
            input.hover,
        );

        // ── Render ────────────────────────────────────────────────────────
        let dl      = &self.scene.draw_list;
        let fonts   = &self.scene.font_system;
        let quads   = &mut self.quad_renderer;
        let sprites = &mut self.sprite_renderer;
        let labels  = &mut self.label_renderer;

        ctx.render(self.picker.style().background, |rctx, target| {
            quads.render(rctx, target, dl);
            sprites.render(rctx, target, dl);
            labels.render(rctx, target, dl, fonts);
        })
    }
}
