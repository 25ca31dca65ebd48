//! Window types and lookup.

use hs_core::{RuleTable, TextRule, normalize_text};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowType {
    pub key: &'static str,
    pub name: &'static str,
    /// Whole-window transmittance (W/m²·K).
    pub u_w: f64,
    /// Solar energy transmittance of the glazing.
    pub g_value: f64,
    /// Installation thermal bridge per metre of perimeter (W/m·K).
    pub psi: f64,
}

pub const DEFAULT_WINDOW_KEY: &str = "std_2ch";

static WINDOW_TYPES: [WindowType; 3] = [
    WindowType {
        key: "std_2ch",
        name: "Double-glazed standard",
        u_w: 1.2,
        g_value: 0.55,
        psi: 0.06,
    },
    WindowType {
        key: "std_3ch",
        name: "Triple-glazed energy efficient",
        u_w: 0.9,
        g_value: 0.48,
        psi: 0.05,
    },
    WindowType {
        key: "old_wood",
        name: "Old wooden frames",
        u_w: 2.6,
        g_value: 0.65,
        psi: 0.08,
    },
];

const WINDOW_ALIASES: RuleTable<&str> = RuleTable::new(
    &[
        TextRule {
            keywords: &[
                "трехкамер",
                "трёхкамер",
                "3-камер",
                "triple",
                "энергосбер",
                "energy",
                "low-e",
            ],
            value: "std_3ch",
        },
        TextRule {
            keywords: &["дерев", "старые", "старый", "old", "wood"],
            value: "old_wood",
        },
        TextRule {
            keywords: &["двухкамер", "2-камер", "double", "пластик", "pvc"],
            value: "std_2ch",
        },
    ],
    DEFAULT_WINDOW_KEY,
);

pub fn window_catalog() -> &'static [WindowType] {
    &WINDOW_TYPES
}

pub fn window_by_key(key: &str) -> Option<&'static WindowType> {
    WINDOW_TYPES.iter().find(|w| w.key == key)
}

fn default_window() -> &'static WindowType {
    &WINDOW_TYPES[0]
}

/// Exact key, then descriptive aliases, then the standard double-glazed unit.
pub fn resolve_window(text: Option<&str>) -> &'static WindowType {
    let Some(normalized) = text.map(normalize_text).filter(|t| !t.is_empty()) else {
        return default_window();
    };
    if let Some(window) = window_by_key(&normalized) {
        return window;
    }
    let key = WINDOW_ALIASES.first_match(&normalized);
    window_by_key(key).unwrap_or_else(default_window)
}
