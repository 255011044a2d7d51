//! # Material Profiles
//!
//! A material profile describes one masonry unit: its dimensions, the
//! reference standard it is produced to (a GOST number), and how much mortar
//! a cubic meter of masonry built from it consumes.
//!
//! ## Example
//!
//! ```rust
//! use mason_core::materials::{builtin_materials, Material};
//!
//! let materials = builtin_materials();
//! let brick = &materials["brick"];
//! assert_eq!(brick.gost, "GOST 530-2012");
//! assert!((brick.unit_volume() - 0.25 * 0.12 * 0.065).abs() < 1e-12);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default mortar consumption, m3 of mortar per m3 of masonry.
pub const DEFAULT_MORTAR_RATE: f64 = 0.23;

fn default_mortar_rate() -> f64 {
    DEFAULT_MORTAR_RATE
}

/// One masonry material profile. Immutable once constructed; catalog edits
/// replace the whole value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Display name, e.g. "Ceramic brick"
    pub name: String,
    /// Unit length (m)
    pub length_m: f64,
    /// Unit width (m)
    pub width_m: f64,
    /// Unit height (m)
    pub height_m: f64,
    /// Reference standard code, e.g. "GOST 530-2012"
    pub gost: String,
    /// Mortar consumption (m3 per m3 of masonry)
    #[serde(default = "default_mortar_rate")]
    pub mortar_rate: f64,
}

impl Material {
    pub fn new(
        name: impl Into<String>,
        length_m: f64,
        width_m: f64,
        height_m: f64,
        gost: impl Into<String>,
        mortar_rate: f64,
    ) -> Self {
        Material {
            name: name.into(),
            length_m,
            width_m,
            height_m,
            gost: gost.into(),
            mortar_rate,
        }
    }

    /// Volume of a single masonry unit (m3).
    pub fn unit_volume(&self) -> f64 {
        self.length_m * self.width_m * self.height_m
    }

    /// Dimensions as an "LxWxH m" label for listings and reports.
    pub fn dimensions_label(&self) -> String {
        format!("{}x{}x{} m", self.length_m, self.width_m, self.height_m)
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.gost)
    }
}

/// The two built-in profiles seeded into an empty catalog, keyed by the
/// lowercase catalog name.
pub fn builtin_materials() -> BTreeMap<String, Material> {
    let mut materials = BTreeMap::new();
    materials.insert(
        "brick".to_string(),
        Material::new(
            "Ceramic brick",
            0.25,
            0.12,
            0.065,
            "GOST 530-2012",
            DEFAULT_MORTAR_RATE,
        ),
    );
    materials.insert(
        "block".to_string(),
        Material::new(
            "Ceramic block",
            0.51,
            0.25,
            0.219,
            "GOST 530-2012",
            DEFAULT_MORTAR_RATE,
        ),
    );
    materials
}
