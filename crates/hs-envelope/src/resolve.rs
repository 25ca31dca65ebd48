//! Wall resolution and steady-state U-value.

use serde::Serialize;

use crate::construction::construction_by_key;
use crate::layers::{WallLayer, layers_from_construction, parse_wall_description};
use crate::material::lambda_for;

/// Inside surface resistance (m²·K/W).
pub const RSI: f64 = 0.13;
/// Outside surface resistance (m²·K/W).
pub const RSE: f64 = 0.04;
/// U-value reported when the total resistance is not positive.
pub const PENALTY_U_VALUE: f64 = 5.0;

pub const DEFAULT_WALL_MATERIAL: &str = "brick_solid";
pub const DEFAULT_WALL_THICKNESS_M: f64 = 0.38;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeSource {
    Construction,
    Text,
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedEnvelope {
    pub layers: Vec<WallLayer>,
    /// Total resistance including surface films (m²·K/W).
    pub r_total: f64,
    /// Thermal transmittance (W/m²·K).
    pub u_value: f64,
    pub label: String,
    pub description: String,
    pub source: EnvelopeSource,
}

impl ResolvedEnvelope {
    fn from_layers(
        layers: Vec<WallLayer>,
        label: String,
        description: String,
        source: EnvelopeSource,
    ) -> Self {
        let r_total = total_resistance(&layers);
        Self {
            u_value: u_from_resistance(r_total),
            r_total,
            layers,
            label,
            description,
            source,
        }
    }

    /// A new envelope with `layer` added on the outside.
    pub fn with_layer(&self, layer: WallLayer) -> Self {
        let mut layers = self.layers.clone();
        let description = format!("{} + {}", self.description, layer.raw);
        layers.push(layer);
        Self::from_layers(layers, self.label.clone(), description, self.source)
    }
}

/// Σ d/λ over the layers plus both surface films; zero for no layers.
pub fn total_resistance(layers: &[WallLayer]) -> f64 {
    if layers.is_empty() {
        return 0.0;
    }
    let conduction: f64 = layers
        .iter()
        .map(|layer| layer.thickness_m / lambda_for(layer.material_key))
        .sum();
    conduction + RSI + RSE
}

pub fn u_from_resistance(r_total: f64) -> f64 {
    if r_total.is_finite() && r_total > 0.0 {
        1.0 / r_total
    } else {
        PENALTY_U_VALUE
    }
}

pub fn u_from_layers(layers: &[WallLayer]) -> f64 {
    u_from_resistance(total_resistance(layers))
}

/// Resolve the wall from a construction key or a free-text description.
///
/// A known construction key wins over text; text that yields no layers,
/// or no input at all, gives 380 mm of solid brick.
pub fn resolve_wall(construction_key: Option<&str>, description: Option<&str>) -> ResolvedEnvelope {
    if let Some(construction) = construction_key.and_then(construction_by_key) {
        return ResolvedEnvelope::from_layers(
            layers_from_construction(construction),
            construction.name.to_string(),
            construction.name.to_string(),
            EnvelopeSource::Construction,
        );
    }

    if let Some(text) = description.map(str::trim).filter(|t| !t.is_empty()) {
        let layers = parse_wall_description(text);
        if !layers.is_empty() {
            return ResolvedEnvelope::from_layers(
                layers,
                "Custom construction".to_string(),
                text.to_string(),
                EnvelopeSource::Text,
            );
        }
    }

    tracing::debug!("no usable wall input, assuming solid brick");
    let layer = WallLayer::new(DEFAULT_WALL_MATERIAL, DEFAULT_WALL_THICKNESS_M);
    let description = layer.raw.clone();
    ResolvedEnvelope::from_layers(
        vec![layer],
        "Default wall".to_string(),
        description,
        EnvelopeSource::Default,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_core::{Tolerances, nearly_equal};

    fn close(a: f64, b: f64) -> bool {
        nearly_equal(a, b, Tolerances { abs: 1e-9, rel: 1e-9 })
    }

    #[test]
    fn text_wall_u_value() {
        let env = resolve_wall(None, Some("кирпич 380мм + минвата 100мм"));
        let expected_r = 0.38 / 0.81 + 0.10 / 0.04 + RSI + RSE;
        assert_eq!(env.source, EnvelopeSource::Text);
        assert!(close(env.r_total, expected_r));
        assert!(close(env.u_value, 1.0 / expected_r));
        assert!((env.u_value - 0.3186).abs() < 1e-3);
    }

    #[test]
    fn construction_key_wins_over_text() {
        let env = resolve_wall(Some("aerated_300"), Some("кирпич 100"));
        assert_eq!(env.source, EnvelopeSource::Construction);
        let expected_r = 0.30 / 0.11 + 0.02 / 0.7 + RSI + RSE;
        assert!(close(env.r_total, expected_r));
    }

    #[test]
    fn unknown_construction_falls_through_to_text() {
        let env = resolve_wall(Some("igloo"), Some("газобетон 300"));
        assert_eq!(env.source, EnvelopeSource::Text);
        assert_eq!(env.label, "Custom construction");
    }

    #[test]
    fn default_wall_is_solid_brick() {
        for env in [resolve_wall(None, None), resolve_wall(None, Some("   ; +"))] {
            assert_eq!(env.source, EnvelopeSource::Default);
            assert_eq!(env.layers.len(), 1);
            let expected_r = 0.38 / 0.81 + RSI + RSE;
            assert!(close(env.u_value, 1.0 / expected_r));
        }
    }

    #[test]
    fn empty_layers_take_penalty() {
        assert_eq!(total_resistance(&[]), 0.0);
        assert_eq!(u_from_layers(&[]), PENALTY_U_VALUE);
    }

    #[test]
    fn added_layer_lowers_u() {
        let base = resolve_wall(None, None);
        let better = base.with_layer(WallLayer::new("mineral_wool", 0.1));
        assert!(better.u_value < base.u_value);
        assert_eq!(better.layers.len(), 2);
        assert_eq!(base.layers.len(), 1);
    }
}
