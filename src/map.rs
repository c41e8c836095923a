//! Map click handling: pointer → reference-image coordinate conversion and
//! region hit-testing.
//!
//! Pure logic only. The `web` module reads the image geometry from the DOM and
//! hands it in as an `ImageGeometry`.

use serde::Deserialize;

/// A named rectangle in reference-image coordinates (the image's natural size).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MapRegion {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl MapRegion {
    #[cfg(test)]
    pub fn new(name: &str, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            name: name.to_string(),
            x,
            y,
            width,
            height,
        }
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Size of the map image as laid out on screen and as authored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageGeometry {
    pub displayed_width: f64,
    pub displayed_height: f64,
    pub natural_width: f64,
    pub natural_height: f64,
}

impl ImageGeometry {
    /// An image that has not finished loading reports a zero natural size.
    pub fn is_loaded(&self) -> bool {
        self.natural_width > 0.0
            && self.natural_height > 0.0
            && self.displayed_width > 0.0
            && self.displayed_height > 0.0
    }

    /// Convert a point relative to the image's top-left corner (displayed
    /// pixels) into reference-image coordinates. Each axis scales independently.
    ///
    /// Returns `None` while the image is not loaded.
    pub fn to_reference(&self, pointer_x: f64, pointer_y: f64) -> Option<(f64, f64)> {
        if !self.is_loaded() {
            return None;
        }
        let scale_x = self.natural_width / self.displayed_width;
        let scale_y = self.natural_height / self.displayed_height;
        Some((pointer_x * scale_x, pointer_y * scale_y))
    }
}

/// Ordered region list. Overlaps resolve by list order: the first region that
/// contains the point wins.
#[derive(Debug, Clone, Default)]
pub struct RegionMap {
    regions: Vec<MapRegion>,
}

impl RegionMap {
    pub fn new(regions: Vec<MapRegion>) -> Self {
        Self { regions }
    }

    pub fn hit_test(&self, x: f64, y: f64) -> Option<&MapRegion> {
        self.regions.iter().find(|r| r.contains(x, y))
    }

    /// Full pipeline from displayed-pixel pointer position to region.
    pub fn region_at(
        &self,
        geometry: &ImageGeometry,
        pointer_x: f64,
        pointer_y: f64,
    ) -> Option<&MapRegion> {
        let (x, y) = geometry.to_reference(pointer_x, pointer_y)?;
        self.hit_test(x, y)
    }
}
