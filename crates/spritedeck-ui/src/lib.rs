//! Spritedeck UI: the picker, the stage of draggable sprites, and the glue
//! that turns picker clicks into placed items.
//!
//! ```rust,ignore
//! use spritedeck_ui::prelude::*;
//!
//! let catalog = Catalog::new(vec![
//!     CatalogEntry::new("cena", ImageSource::path("assets/cena.webp"), 300.0, 300.0),
//! ]);
//! Application::new().catalog(catalog).run()?;
//! ```

pub mod app;
pub mod assembler;
pub mod catalog;
pub mod drag;
pub mod event;
pub mod painter;
pub mod scene;
pub mod stage;
pub mod widget;
pub mod widgets;

pub use app::Application;

/// Everything needed to configure and extend the demo.
pub mod prelude {
    pub use crate::app::Application;
    pub use crate::assembler::{AssemblerConfig, ItemId, PlacedItem, SceneAssembler};
    pub use crate::catalog::{Catalog, CatalogEntry, ItemTemplate};
    pub use crate::drag::{DragBinding, DragController, DragState, NodeEvent, NodeSprite};
    pub use crate::event::{EventResult, UiEvent};
    pub use crate::painter::Painter;
    pub use crate::scene::{PointerInput, UiInput, UiScene};
    pub use crate::stage::{Stage, StagePointer};
    pub use crate::widget::Widget;
    pub use crate::widgets::picker::{PickerPanel, PickerStyle};

    pub use spritedeck_engine::asset::ImageSource;
    pub use spritedeck_engine::coords::{Anchor, Rect, Vec2};
    pub use spritedeck_engine::device::GpuInit;
    pub use spritedeck_engine::paint::Color;
    pub use spritedeck_engine::render::{StageOptions, StageSizing};
}
