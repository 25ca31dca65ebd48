//! hs-envelope: building fabric.
//!
//! Materials and constructions catalogs, the free-text wall parser,
//! U-value calculation and window types.

pub mod construction;
pub mod layers;
pub mod material;
pub mod resolve;
pub mod window;

pub use construction::{
    LayerSpec, WallConstruction, construction_by_key, constructions_catalog,
};
pub use layers::{
    DEFAULT_LAYER_THICKNESS_M, WallLayer, normalize_thickness, parse_layer_token,
    parse_wall_description,
};
pub use material::{
    Material, MaterialGroup, filter_materials, guess_material_key, lambda_for, material_by_key,
    materials_catalog,
};
pub use resolve::{
    EnvelopeSource, PENALTY_U_VALUE, RSE, RSI, ResolvedEnvelope, resolve_wall, total_resistance,
    u_from_layers,
};
pub use window::{WindowType, resolve_window, window_by_key, window_catalog};
