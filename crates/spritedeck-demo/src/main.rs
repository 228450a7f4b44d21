use spritedeck_engine::logging::{LoggingConfig, init_logging};
use spritedeck_ui::prelude::*;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let catalog = Catalog::new(vec![
        CatalogEntry::new("cena", asset("cena.webp"), 300.0, 300.0),
        CatalogEntry::new("scala", asset("scala.png"), 300.0, 300.0),
    ]);
    log::info!("catalog ready: {} entries", catalog.len());

    let mut app = Application::new()
        .title("spritedeck")
        .size(1280.0, 720.0)
        .catalog(catalog)
        .stage_options(StageOptions {
            background: Color::RED,
            sizing: StageSizing::FillWindow,
        });

    match load_font() {
        Some(bytes) => app = app.font(bytes),
        None => log::warn!("no system font found; picker labels disabled"),
    }

    app.run()
}

/// Bundled images live next to the manifest so `cargo run` works from any cwd.
fn asset(name: &str) -> ImageSource {
    ImageSource::path(format!("{}/assets/{name}", env!("CARGO_MANIFEST_DIR")))
}

fn load_font() -> Option<Vec<u8>> {
    [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    ]
    .iter()
    .find_map(|path| std::fs::read(path).ok())
}
