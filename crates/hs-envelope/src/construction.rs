//! Predefined wall constructions.

use hs_core::normalize_text;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerSpec {
    pub material_key: &'static str,
    /// Thickness (m).
    pub thickness_m: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WallConstruction {
    pub key: &'static str,
    pub name: &'static str,
    /// Layers from inside to outside.
    pub layers: &'static [LayerSpec],
}

impl WallConstruction {
    pub fn matches_query(&self, query: &str) -> bool {
        let query = normalize_text(query);
        query.is_empty() || self.key.contains(&query) || self.name.to_lowercase().contains(&query)
    }
}

static CONSTRUCTIONS: [WallConstruction; 4] = [
    WallConstruction {
        key: "panel_300",
        name: "Concrete panel 300 mm, insulated",
        layers: &[
            LayerSpec {
                material_key: "plaster",
                thickness_m: 0.02,
            },
            LayerSpec {
                material_key: "concrete_heavy",
                thickness_m: 0.22,
            },
            LayerSpec {
                material_key: "mineral_wool",
                thickness_m: 0.06,
            },
        ],
    },
    WallConstruction {
        key: "aerated_300",
        name: "Aerated concrete D400, 300 mm",
        layers: &[
            LayerSpec {
                material_key: "aerated_d400",
                thickness_m: 0.30,
            },
            LayerSpec {
                material_key: "plaster",
                thickness_m: 0.02,
            },
        ],
    },
    WallConstruction {
        key: "brick_380_mw100",
        name: "Brick 380 mm + mineral wool 100 mm",
        layers: &[
            LayerSpec {
                material_key: "brick_solid",
                thickness_m: 0.38,
            },
            LayerSpec {
                material_key: "mineral_wool",
                thickness_m: 0.10,
            },
            LayerSpec {
                material_key: "plaster",
                thickness_m: 0.02,
            },
        ],
    },
    WallConstruction {
        key: "frame_insulated",
        name: "Timber frame, 150 mm mineral wool",
        layers: &[
            LayerSpec {
                material_key: "wood",
                thickness_m: 0.015,
            },
            LayerSpec {
                material_key: "mineral_wool",
                thickness_m: 0.15,
            },
            LayerSpec {
                material_key: "gypsum",
                thickness_m: 0.012,
            },
        ],
    },
];

pub fn constructions_catalog() -> &'static [WallConstruction] {
    &CONSTRUCTIONS
}

pub fn construction_by_key(key: &str) -> Option<&'static WallConstruction> {
    let key = key.trim();
    CONSTRUCTIONS.iter().find(|c| c.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::material_by_key;

    #[test]
    fn every_layer_references_a_catalog_material() {
        for construction in constructions_catalog() {
            for layer in construction.layers {
                assert!(
                    material_by_key(layer.material_key).is_some(),
                    "{} uses unknown material {}",
                    construction.key,
                    layer.material_key
                );
                assert!(layer.thickness_m > 0.0);
            }
        }
    }

    #[test]
    fn lookup_by_key() {
        assert_eq!(construction_by_key(" aerated_300 ").map(|c| c.layers.len()), Some(2));
        assert!(construction_by_key("igloo").is_none());
    }
}
