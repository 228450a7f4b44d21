//! Static list of images the picker offers.

use spritedeck_engine::asset::ImageSource;

/// One selectable image, defined at startup and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    pub image: ImageSource,
    pub width: f32,
    pub height: f32,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, image: ImageSource, width: f32, height: f32) -> Self {
        Self { name: name.into(), image, width, height }
    }

    /// Fresh copy of this entry's data, handed out when the entry is picked.
    pub fn template(&self) -> ItemTemplate {
        ItemTemplate {
            name: self.name.clone(),
            image: self.image.clone(),
            width: self.width,
            height: self.height,
        }
    }
}

/// Data emitted by the picker for one click.
///
/// Carries no reference back to the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemTemplate {
    pub name: String,
    pub image: ImageSource,
    pub width: f32,
    pub height: f32,
}

/// Ordered, immutable set of [`CatalogEntry`] values.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    #[inline]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }
}

impl FromIterator<CatalogEntry> for Catalog {
    fn from_iter<I: IntoIterator<Item = CatalogEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> CatalogEntry {
        CatalogEntry::new(name, ImageSource::path(format!("assets/{name}.png")), 300.0, 300.0)
    }

    #[test]
    fn keeps_definition_order() {
        let catalog: Catalog = ["cena", "scala"].into_iter().map(entry).collect();
        let names: Vec<&str> = catalog.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["cena", "scala"]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).map(|e| e.name.as_str()), Some("scala"));
        assert!(catalog.get(2).is_none());
    }

    #[test]
    fn empty_catalog() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert!(catalog.entries().is_empty());
    }

    #[test]
    fn template_copies_every_field() {
        let e = entry("cena");
        let t = e.template();
        assert_eq!(t.name, e.name);
        assert_eq!(t.image, e.image);
        assert_eq!((t.width, t.height), (300.0, 300.0));
    }
}
