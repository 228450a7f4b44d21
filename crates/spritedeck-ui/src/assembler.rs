//! Turns picked templates into placed items and keeps the stage in step.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use spritedeck_engine::asset::ImageSource;
use spritedeck_engine::coords::Vec2;

use crate::catalog::ItemTemplate;
use crate::drag::{DragController, NodeSprite, DEFAULT_NODE_Y, NODE_SPACING};
use crate::stage::Stage;

static NEXT_ITEM_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a placed item, unique for the life of the process.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl ItemId {
    pub(crate) fn next() -> Self {
        ItemId(NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A template that has been placed on the stage. Never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedItem {
    pub id: ItemId,
    pub name: String,
    pub image: ImageSource,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AssemblerConfig {
    /// Default x of item `i` is `spacing × i`.
    pub spacing: f32,
    pub default_y: f32,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self { spacing: NODE_SPACING, default_y: DEFAULT_NODE_Y }
    }
}

/// Append-only list of placed items, in insertion order.
#[derive(Debug, Default)]
pub struct SceneAssembler {
    config: AssemblerConfig,
    items: Vec<PlacedItem>,
}

impl SceneAssembler {
    pub fn new(config: AssemblerConfig) -> Self {
        Self { config, items: Vec::new() }
    }

    /// Places a copy of `template` and returns its fresh id.
    pub fn add_item(&mut self, template: ItemTemplate) -> ItemId {
        let id = ItemId::next();
        log::debug!("add item {id} ({}) at index {}", template.name, self.items.len());
        self.items.push(PlacedItem {
            id,
            name: template.name,
            image: template.image,
            width: template.width,
            height: template.height,
        });
        id
    }

    #[inline]
    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Where the item at `index` first appears, in stage space.
    pub fn default_position(&self, index: usize) -> Vec2 {
        Vec2::new(self.config.spacing * index as f32, self.config.default_y)
    }

    /// Reconciles `stage` with the item list.
    ///
    /// New ids get a controller at their default position; ids no longer
    /// listed are unmounted; render order follows insertion order. Mounted
    /// controllers are left alone, so drag state survives later additions.
    pub fn sync(&self, stage: &mut Stage) {
        let stale: Vec<_> = stage
            .order()
            .iter()
            .copied()
            .filter(|id| !self.items.iter().any(|item| item.id == *id))
            .collect();
        for id in stale {
            stage.unmount_node(id);
        }

        for (index, item) in self.items.iter().enumerate() {
            if stage.contains(item.id) {
                continue;
            }
            let node = NodeSprite::sized(item.image.clone(), Vec2::new(item.width, item.height));
            stage.mount_node(item.id, DragController::with_node(self.default_position(index), node));
        }

        stage.set_order(self.items.iter().map(|item| item.id));
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use spritedeck_engine::coords::Rect;
    use spritedeck_engine::paint::Color;

    use super::*;
    use crate::catalog::CatalogEntry;
    use crate::stage::StagePointer;

    fn template(name: &str) -> ItemTemplate {
        CatalogEntry::new(name, ImageSource::path(format!("{name}.png")), 300.0, 300.0).template()
    }

    fn stage() -> Stage {
        Stage::new(Rect::new(0.0, 0.0, 1000.0, 720.0), Color::RED)
    }

    // ── insertion ─────────────────────────────────────────────────────────

    #[test]
    fn items_keep_insertion_order() {
        let mut asm = SceneAssembler::default();
        asm.add_item(template("cena"));
        asm.add_item(template("scala"));
        let names: Vec<&str> = asm.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["cena", "scala"]);
    }

    #[test]
    fn ids_are_distinct_under_rapid_insertion() {
        let mut asm = SceneAssembler::default();
        let ids: HashSet<ItemId> = (0..1000).map(|_| asm.add_item(template("cena"))).collect();
        assert_eq!(ids.len(), 1000);
        assert_eq!(asm.len(), 1000);
    }

    #[test]
    fn ids_increase_with_insertion() {
        let mut asm = SceneAssembler::default();
        let a = asm.add_item(template("cena"));
        let b = asm.add_item(template("cena"));
        assert!(b.get() > a.get());
    }

    #[test]
    fn placed_item_copies_template() {
        let mut asm = SceneAssembler::default();
        let id = asm.add_item(template("scala"));
        let item = &asm.items()[0];
        assert_eq!(item.id, id);
        assert_eq!(item.image, ImageSource::path("scala.png"));
        assert_eq!((item.width, item.height), (300.0, 300.0));
    }

    // ── sync ──────────────────────────────────────────────────────────────

    #[test]
    fn nodes_mount_at_spaced_default_positions() {
        let mut asm = SceneAssembler::default();
        for _ in 0..4 {
            asm.add_item(template("cena"));
        }
        let mut stage = stage();
        asm.sync(&mut stage);

        let xs: Vec<f32> = stage
            .order()
            .iter()
            .filter_map(|id| stage.node(*id))
            .map(|n| n.position().x)
            .collect();
        assert_eq!(xs, vec![0.0, 300.0, 600.0, 900.0]);
        assert!(stage.order().iter().all(|id| stage.node(*id).is_some_and(|n| n.position().y == 300.0)));
    }

    #[test]
    fn render_order_follows_insertion() {
        let mut asm = SceneAssembler::default();
        let a = asm.add_item(template("cena"));
        let b = asm.add_item(template("scala"));
        let mut stage = stage();
        asm.sync(&mut stage);
        assert_eq!(stage.order(), &[a, b]);
    }

    #[test]
    fn drag_state_survives_later_additions() {
        let mut asm = SceneAssembler::default();
        let a = asm.add_item(template("cena"));
        let b = asm.add_item(template("scala"));
        let mut stage = stage();
        asm.sync(&mut stage);

        // Drag `a` from (0, 300) to (50, 500) and `b` from (300, 300) to (700, 100).
        for (from, to) in [((10.0, 300.0), (50.0, 500.0)), ((310.0, 300.0), (700.0, 100.0))] {
            stage.route(StagePointer::Down(Vec2::new(from.0, from.1)));
            stage.route(StagePointer::Move(Vec2::new(to.0, to.1)));
            stage.route(StagePointer::Up(Vec2::new(to.0, to.1)));
        }

        let c = asm.add_item(template("cena"));
        asm.sync(&mut stage);

        assert_eq!(stage.node(a).map(|n| n.position()), Some(Vec2::new(50.0, 500.0)));
        assert_eq!(stage.node(b).map(|n| n.position()), Some(Vec2::new(700.0, 100.0)));
        assert_eq!(stage.node(c).map(|n| n.position()), Some(Vec2::new(600.0, 300.0)));
        assert_eq!(stage.order(), &[a, b, c]);
    }

    #[test]
    fn sync_unmounts_unknown_nodes() {
        let asm = SceneAssembler::default();
        let mut stage = stage();
        let stray = ItemId::next();
        stage.mount_node(stray, DragController::free_standing());
        asm.sync(&mut stage);
        assert!(stage.is_empty());
    }

    #[test]
    fn default_position_uses_config() {
        let asm = SceneAssembler::new(AssemblerConfig { spacing: 10.0, default_y: 5.0 });
        assert_eq!(asm.default_position(3), Vec2::new(30.0, 5.0));
    }
}
