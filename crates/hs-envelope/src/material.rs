//! Materials catalog and free-text material recognition.

use hs_core::{RuleTable, TextRule, normalize_text};
use serde::Serialize;

/// Conductivity assumed for a key missing from the catalog (dense brick).
pub const FALLBACK_LAMBDA_W_MK: f64 = 0.8;

/// Material used when nothing in a description is recognized.
pub const DEFAULT_MATERIAL_KEY: &str = "brick_solid";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialGroup {
    Masonry,
    Aerated,
    Concrete,
    Insulation,
    Gypsum,
    Plaster,
    Wood,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Material {
    pub key: &'static str,
    pub display_name: &'static str,
    /// Lower-case name variants searched for in user text.
    #[serde(skip)]
    pub names: &'static [&'static str],
    pub group: MaterialGroup,
    /// Thermal conductivity λ (W/m·K).
    pub lambda_w_mk: f64,
}

impl Material {
    pub fn matches_text(&self, normalized: &str) -> bool {
        self.names.iter().any(|name| normalized.contains(name))
    }

    pub fn matches_query(&self, query: &str) -> bool {
        let query = normalize_text(query);
        if query.is_empty() {
            return true;
        }
        self.key.contains(&query)
            || self.display_name.to_lowercase().contains(&query)
            || self.names.iter().any(|name| name.contains(&query))
    }
}

// More specific variants come first: the first entry whose name appears in
// the text wins.
static MATERIALS: [Material; 13] = [
    Material {
        key: "brick_hollow",
        display_name: "Hollow brick",
        names: &[
            "кирпич пустотелый",
            "пустотелый кирпич",
            "щелевой кирпич",
            "hollow brick",
        ],
        group: MaterialGroup::Masonry,
        lambda_w_mk: 0.45,
    },
    Material {
        key: "brick_solid",
        display_name: "Solid brick",
        names: &["кирпич полнотелый", "кирпич", "solid brick", "brick"],
        group: MaterialGroup::Masonry,
        lambda_w_mk: 0.81,
    },
    Material {
        key: "aerated_d500",
        display_name: "Aerated concrete D500",
        names: &["газобетон d500", "aerated d500", "aerated 500"],
        group: MaterialGroup::Aerated,
        lambda_w_mk: 0.13,
    },
    Material {
        key: "aerated_d400",
        display_name: "Aerated concrete D400",
        names: &["газобетон d400", "aerated d400", "aerated 400"],
        group: MaterialGroup::Aerated,
        lambda_w_mk: 0.11,
    },
    Material {
        key: "aerated_d300",
        display_name: "Aerated concrete D300",
        names: &["газобетон", "aerated"],
        group: MaterialGroup::Aerated,
        lambda_w_mk: 0.09,
    },
    Material {
        key: "expanded_clay_concrete",
        display_name: "Expanded clay concrete",
        names: &["керамзитобетон", "керамзит", "expanded clay"],
        group: MaterialGroup::Concrete,
        lambda_w_mk: 0.43,
    },
    Material {
        key: "concrete_heavy",
        display_name: "Reinforced concrete",
        names: &["железобетон", "бетон", "жби", "жб", "панель", "concrete"],
        group: MaterialGroup::Concrete,
        lambda_w_mk: 1.75,
    },
    Material {
        key: "mineral_wool",
        display_name: "Mineral wool",
        names: &["минвата", "вата", "rockwool", "mineral wool", "stone wool"],
        group: MaterialGroup::Insulation,
        lambda_w_mk: 0.04,
    },
    Material {
        key: "xps",
        display_name: "Extruded polystyrene",
        names: &["xps", "экструдированный", "пенополистирол", "extruded"],
        group: MaterialGroup::Insulation,
        lambda_w_mk: 0.032,
    },
    Material {
        key: "eps",
        display_name: "Expanded polystyrene",
        names: &["ппс", "пенопласт", "eps", "expanded polystyrene"],
        group: MaterialGroup::Insulation,
        lambda_w_mk: 0.035,
    },
    Material {
        key: "gypsum",
        display_name: "Gypsum board",
        names: &[
            "гипсокартон",
            "гкл",
            "гипс",
            "gypsum",
            "plasterboard",
            "drywall",
        ],
        group: MaterialGroup::Gypsum,
        lambda_w_mk: 0.21,
    },
    Material {
        key: "plaster",
        display_name: "Plaster",
        names: &["штукатурка", "plaster", "render"],
        group: MaterialGroup::Plaster,
        lambda_w_mk: 0.7,
    },
    Material {
        key: "wood",
        display_name: "Wood",
        names: &["дерево", "брус", "osb", "wood", "timber"],
        group: MaterialGroup::Wood,
        lambda_w_mk: 0.15,
    },
];

/// Word roots tried when no catalog name variant is present.
const MATERIAL_ROOTS: RuleTable<&str> = RuleTable::new(
    &[
        TextRule {
            keywords: &["газобет", "газоблок", "aerat", "ytong"],
            value: "aerated_d400",
        },
        TextRule {
            keywords: &["пенопласт", "пенополист", "polystyren", "styro"],
            value: "eps",
        },
        TextRule {
            keywords: &["минват", "mineral", "wool", "утепл", "insulat"],
            value: "mineral_wool",
        },
        TextRule {
            keywords: &["керамзит"],
            value: "expanded_clay_concrete",
        },
        TextRule {
            keywords: &["бетон", "concret", "панел"],
            value: "concrete_heavy",
        },
        TextRule {
            keywords: &["дерев", "брус", "бревн", "timber", "log"],
            value: "wood",
        },
        TextRule {
            keywords: &["гкл", "гипс", "drywall"],
            value: "gypsum",
        },
        TextRule {
            keywords: &["штукат", "render"],
            value: "plaster",
        },
        TextRule {
            keywords: &["кирп", "brick"],
            value: "brick_solid",
        },
    ],
    DEFAULT_MATERIAL_KEY,
);

pub fn materials_catalog() -> &'static [Material] {
    &MATERIALS
}

pub fn filter_materials(query: &str) -> Vec<Material> {
    materials_catalog()
        .iter()
        .copied()
        .filter(|m| m.matches_query(query))
        .collect()
}

pub fn material_by_key(key: &str) -> Option<&'static Material> {
    MATERIALS.iter().find(|m| m.key == key)
}

/// λ for a key, or [`FALLBACK_LAMBDA_W_MK`] when the key is unknown.
pub fn lambda_for(key: &str) -> f64 {
    material_by_key(key)
        .map(|m| m.lambda_w_mk)
        .unwrap_or(FALLBACK_LAMBDA_W_MK)
}

/// Recognize a material in free text.
///
/// Order: catalog name variants, then word roots, then solid brick.
pub fn guess_material_key(text: &str) -> &'static str {
    let normalized = normalize_text(text);
    if normalized.is_empty() {
        return DEFAULT_MATERIAL_KEY;
    }

    if let Some(material) = MATERIALS.iter().find(|m| m.matches_text(&normalized)) {
        return material.key;
    }

    match MATERIAL_ROOTS.find(&normalized) {
        Some(rule) => rule.value,
        None => {
            tracing::debug!(text = %normalized, "unrecognized material, assuming solid brick");
            DEFAULT_MATERIAL_KEY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keys_are_unique() {
        let mut seen = HashSet::new();
        for m in materials_catalog() {
            assert!(seen.insert(m.key), "duplicate material key: {}", m.key);
        }
    }

    #[test]
    fn name_variants_are_lower_case() {
        for m in materials_catalog() {
            for name in m.names {
                assert_eq!(*name, name.to_lowercase(), "{} has mixed-case name", m.key);
            }
        }
    }

    #[test]
    fn catalog_names_win() {
        assert_eq!(guess_material_key("кирпич"), "brick_solid");
        assert_eq!(guess_material_key("Кирпич пустотелый"), "brick_hollow");
        assert_eq!(guess_material_key("газобетон D400"), "aerated_d400");
        assert_eq!(guess_material_key("газобетон"), "aerated_d300");
        assert_eq!(guess_material_key("Минвата"), "mineral_wool");
        assert_eq!(guess_material_key("керамзитобетон"), "expanded_clay_concrete");
        assert_eq!(guess_material_key("plasterboard"), "gypsum");
        assert_eq!(guess_material_key("lime plaster"), "plaster");
    }

    #[test]
    fn roots_catch_inflections() {
        assert_eq!(guess_material_key("газобетонные блоки"), "aerated_d300");
        assert_eq!(guess_material_key("газоблок"), "aerated_d400");
        assert_eq!(guess_material_key("утеплитель"), "mineral_wool");
        assert_eq!(guess_material_key("деревянный"), "wood");
        assert_eq!(guess_material_key("polystyrene boards"), "eps");
    }

    #[test]
    fn unknown_falls_back_to_brick() {
        assert_eq!(guess_material_key("что-то непонятное"), DEFAULT_MATERIAL_KEY);
        assert_eq!(guess_material_key(""), DEFAULT_MATERIAL_KEY);
    }

    #[test]
    fn lambda_lookup() {
        assert_eq!(lambda_for("mineral_wool"), 0.04);
        assert_eq!(lambda_for("unobtainium"), FALLBACK_LAMBDA_W_MK);
    }

    #[test]
    fn search_by_query() {
        let hits = filter_materials("wool");
        assert!(hits.iter().any(|m| m.key == "mineral_wool"));
        assert_eq!(filter_materials("").len(), materials_catalog().len());
    }
}
