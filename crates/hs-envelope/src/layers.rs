//! Wall layers and the free-text layer parser.
//!
//! A description such as `"кирпич 380мм + минвата 100мм"` is split into
//! tokens on `+`, `;` and `,` (a comma between two digits is a decimal
//! separator, not a split point). In each token the first free-standing
//! number is the thickness and the remaining words name the material.

use std::ops::Range;

use hs_core::{cm, in_meters, m, mm, normalize_text, parse_number};
use serde::Serialize;

use crate::construction::WallConstruction;
use crate::material::{guess_material_key, material_by_key};

/// Thickness used when a token has no usable number.
pub const DEFAULT_LAYER_THICKNESS_M: f64 = 0.1;

/// Unitless thicknesses at or above this value are millimetres.
const BARE_MILLIMETRE_THRESHOLD: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WallLayer {
    pub material_key: &'static str,
    /// Thickness (m).
    pub thickness_m: f64,
    /// Text the layer was read from.
    pub raw: String,
}

impl WallLayer {
    pub fn new(material_key: &'static str, thickness_m: f64) -> Self {
        let name = material_by_key(material_key)
            .map(|m| m.display_name)
            .unwrap_or(material_key);
        Self {
            material_key,
            thickness_m,
            raw: format!("{name} {thickness_m} m"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LengthUnit {
    Millimetre,
    Centimetre,
    Metre,
}

impl LengthUnit {
    fn from_word(word: &str) -> Option<Self> {
        match word {
            "мм" | "mm" => Some(Self::Millimetre),
            "см" | "cm" => Some(Self::Centimetre),
            "м" | "m" => Some(Self::Metre),
            _ => None,
        }
    }

    fn to_meters(self, value: f64) -> f64 {
        match self {
            Self::Millimetre => in_meters(mm(value)),
            Self::Centimetre => in_meters(cm(value)),
            Self::Metre => in_meters(m(value)),
        }
    }
}

/// Interpret a unitless thickness: values ≥ 10 are millimetres, smaller
/// positive values metres, anything else the default.
pub fn normalize_thickness(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        DEFAULT_LAYER_THICKNESS_M
    } else if value >= BARE_MILLIMETRE_THRESHOLD {
        in_meters(mm(value))
    } else {
        value
    }
}

struct ThicknessMatch {
    /// Byte span of the number and its unit word.
    span: Range<usize>,
    thickness_m: f64,
}

/// Find the first number that does not belong to a word (the `400` in
/// `d400` is a grade, not a thickness).
fn find_thickness(text: &str) -> Option<ThicknessMatch> {
    let mut prev: Option<char> = None;
    for (start, c) in text.char_indices() {
        let free_standing =
            prev.is_none_or(|p| !(p.is_alphanumeric() || p == '.' || p == ','));
        prev = Some(c);
        if !c.is_ascii_digit() || !free_standing {
            continue;
        }

        let run_len = text[start..]
            .find(|ch: char| !(ch.is_ascii_digit() || ch == '.' || ch == ','))
            .unwrap_or(text.len() - start);
        let number_text = text[start..start + run_len].trim_end_matches(['.', ',']);
        let Some(value) = parse_number(number_text) else {
            continue;
        };
        let number_end = start + number_text.len();

        let after = &text[number_end..];
        let word_start = number_end + (after.len() - after.trim_start().len());
        let word_len = text[word_start..]
            .find(|ch: char| !ch.is_alphabetic())
            .unwrap_or(text.len() - word_start);
        let unit = LengthUnit::from_word(&text[word_start..word_start + word_len]);

        let (end, thickness_m) = match unit {
            Some(unit) => (word_start + word_len, unit.to_meters(value)),
            None => (number_end, normalize_thickness(value)),
        };
        let thickness_m = if thickness_m.is_finite() && thickness_m > 0.0 {
            thickness_m
        } else {
            DEFAULT_LAYER_THICKNESS_M
        };

        return Some(ThicknessMatch {
            span: start..end,
            thickness_m,
        });
    }
    None
}

/// Parse one layer token; `None` for blank tokens.
pub fn parse_layer_token(token: &str) -> Option<WallLayer> {
    let raw = token.trim();
    if raw.is_empty() {
        return None;
    }
    let lower = normalize_text(raw);

    let (thickness_m, material_text) = match find_thickness(&lower) {
        Some(found) => {
            let material_text = format!("{} {}", &lower[..found.span.start], &lower[found.span.end..]);
            (found.thickness_m, material_text)
        }
        None => (DEFAULT_LAYER_THICKNESS_M, lower.clone()),
    };

    Some(WallLayer {
        material_key: guess_material_key(&material_text),
        thickness_m,
        raw: raw.to_string(),
    })
}

fn split_layer_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        let is_separator = match c {
            '+' | ';' => true,
            ',' => !(prev.is_some_and(|p| p.is_ascii_digit())
                && next.is_some_and(|n| n.is_ascii_digit())),
            _ => false,
        };
        if is_separator {
            tokens.push(&text[start..i]);
            start = i + c.len_utf8();
        }
        prev = Some(c);
    }
    tokens.push(&text[start..]);
    tokens
}

/// Parse a free-text wall description into layers (possibly empty).
pub fn parse_wall_description(text: &str) -> Vec<WallLayer> {
    split_layer_tokens(text)
        .into_iter()
        .filter_map(parse_layer_token)
        .collect()
}

pub fn layers_from_construction(construction: &WallConstruction) -> Vec<WallLayer> {
    construction
        .layers
        .iter()
        .map(|layer| WallLayer::new(layer.material_key, normalize_thickness(layer.thickness_m)))
        .collect()
}
