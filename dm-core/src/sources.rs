//! Tile source URLs handed to the map engine.

/// Vector layers drawn under every product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseLayer {
    Ocean,
    Lakes,
    Land,
    States,
    Countries,
}

impl BaseLayer {
    pub fn name(&self) -> &'static str {
        match self {
            BaseLayer::Ocean => "ocean",
            BaseLayer::Lakes => "lakes",
            BaseLayer::Land => "land",
            BaseLayer::States => "states",
            BaseLayer::Countries => "countries",
        }
    }
}

/// A vector tile layer: the source path and its `{z}/{x}/{y}` template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorSource {
    pub layer: String,
    pub source: String,
    pub tiles: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSources {
    raster_base: String,
    vector_base: String,
}

impl TileSources {
    pub fn new(raster_base: &str, vector_base: &str) -> Self {
        Self {
            raster_base: raster_base.trim_end_matches('/').to_string(),
            vector_base: vector_base.trim_end_matches('/').to_string(),
        }
    }

    /// Zarr store for a raster variable.
    pub fn raster(&self, variable: &str) -> String {
        format!("{}/{}.zarr", self.raster_base, variable)
    }

    pub fn vector(&self, layer: &str) -> VectorSource {
        let source = format!("{}/{}", self.vector_base, layer);
        VectorSource {
            layer: layer.to_string(),
            tiles: format!("{source}/{{z}}/{{x}}/{{y}}.pbf"),
            source,
        }
    }

    pub fn base(&self, layer: BaseLayer) -> VectorSource {
        self.vector(layer.name())
    }

    /// Filled growing area and outline layers for a crop.
    pub fn crop(&self, crop: &str) -> (VectorSource, VectorSource) {
        (self.vector(&format!("{crop}_mask")), self.vector(crop))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_templated_urls() {
        let sources = TileSources::new(
            "https://storage.googleapis.com/drought-monitor/zarr/",
            "https://storage.googleapis.com/drought-monitor/vector",
        );
        assert_eq!(
            sources.raster("drought"),
            "https://storage.googleapis.com/drought-monitor/zarr/drought.zarr"
        );
        let lakes = sources.base(BaseLayer::Lakes);
        assert_eq!(
            lakes.tiles,
            "https://storage.googleapis.com/drought-monitor/vector/lakes/{z}/{x}/{y}.pbf"
        );
        let (mask, outline) = sources.crop("coffee");
        assert_eq!(mask.layer, "coffee_mask");
        assert!(mask.source.ends_with("/vector/coffee_mask"));
        assert!(outline.tiles.ends_with("/vector/coffee/{z}/{x}/{y}.pbf"));
    }
}
