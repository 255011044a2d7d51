//! # Volume & Quantity Estimator
//!
//! The volume-accounting core: pure, deterministic functions from wall and
//! opening geometry plus a material profile to gross/net masonry volumes,
//! material unit counts, and mortar volume. No I/O, no state; every function
//! is independently callable and idempotent.
//!
//! Degenerate inputs (empty wall lists, zero-volume materials) degrade to
//! zero results rather than erroring.
//!
//! ## Example
//!
//! ```rust
//! use mason_core::estimate::estimate;
//! use mason_core::geometry::{Opening, Wall};
//! use mason_core::materials::builtin_materials;
//!
//! let walls = vec![
//!     Wall::new(10.0, 3.0, 0.3),
//!     Wall::new(10.0, 3.0, 0.3),
//!     Wall::new(6.0, 3.0, 0.3),
//!     Wall::new(6.0, 3.0, 0.3),
//! ];
//! let openings = vec![Opening::new("window", 1.2, 2.1, 2, None)];
//! let brick = builtin_materials()["brick"].clone();
//!
//! let result = estimate(&walls, &openings, &brick);
//! assert_eq!(result.perimeter_m, 32.0);
//! assert!((result.net_volume_m3 - 27.288).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::{average_wall_width, Opening, Wall};
use crate::materials::Material;

/// Volume taken up by one kind of opening, in entry order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningVolume {
    pub name: String,
    pub volume_m3: f64,
}

/// Coarse per-wall unit count (1-based wall numbers, entry order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallUnits {
    pub wall_number: usize,
    pub units: u64,
}

/// Everything one calculation run produces.
///
/// `unit_count` (aggregate, from net volume) and `units_per_wall` (per-wall
/// rounded dimension ratios) are computed independently and may disagree;
/// both are reported as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub wall_count: usize,
    pub perimeter_m: f64,
    pub gross_volume_m3: f64,
    pub opening_volume_m3: f64,
    pub opening_breakdown: Vec<OpeningVolume>,
    pub net_volume_m3: f64,
    /// Fractional unit count; round and add a 5-10% waste margin for purchase
    pub unit_count: f64,
    pub units_per_wall: Vec<WallUnits>,
    pub mortar_volume_m3: f64,
}

impl Estimate {
    /// Unit count rounded to whole units (waste margin not included).
    pub fn rounded_unit_count(&self) -> u64 {
        self.unit_count.round() as u64
    }
}

/// Gross wall volume (m3) and perimeter (m).
///
/// A rectangular building is special-cased: exactly 4 walls with exactly 2
/// distinct lengths are taken as two opposing pairs, giving an exact
/// `2*(a+b)` perimeter and a volume over the averaged height and thickness.
/// Any other configuration uses the sum of face areas, with the perimeter as
/// a plain sum of lengths - an accepted approximation that ignores corner
/// overlap.
///
/// `material_width` discretizes the averaged wall thickness into layers of
/// the material's own width; a non-positive value falls back to the averaged
/// thickness directly.
pub fn compute_wall_volume(walls: &[Wall], material_width: f64) -> (f64, f64) {
    if walls.is_empty() {
        return (0.0, 0.0);
    }

    let total_width: f64 = walls.iter().map(|w| w.width_m).sum();
    let wall_count = walls.len() as f64;

    if walls.len() == 4 {
        let mut lengths: Vec<f64> = walls.iter().map(|w| w.length_m).collect();
        lengths.sort_by(|x, y| x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal));
        lengths.dedup();
        if let [a, b] = lengths[..] {
            let perimeter = 2.0 * (a + b);
            let avg_height: f64 = walls.iter().map(|w| w.height_m).sum::<f64>() / wall_count;
            let gross = perimeter * avg_height * layered_width(total_width, wall_count, material_width);
            return (gross, perimeter);
        }
    }

    let total_area: f64 = walls.iter().map(|w| w.face_area()).sum();
    let perimeter: f64 = walls.iter().map(|w| w.length_m).sum();
    let gross = total_area * layered_width(total_width, wall_count, material_width);
    (gross, perimeter)
}

/// Averaged wall thickness expressed as material-width layers, collapsed
/// back to an effective thickness. Algebraically the plain average; kept in
/// layer form to tie the volume to the material's granularity.
fn layered_width(total_width: f64, wall_count: f64, material_width: f64) -> f64 {
    if material_width > 0.0 {
        let width_layers = total_width / (wall_count * material_width);
        material_width * width_layers
    } else {
        total_width / wall_count
    }
}

/// Total opening volume (m3) and a per-opening breakdown in entry order.
///
/// Openings without an explicit width use `avg_wall_width`.
pub fn compute_opening_volume(
    openings: &[Opening],
    avg_wall_width: f64,
) -> (f64, Vec<OpeningVolume>) {
    let mut total = 0.0;
    let mut breakdown = Vec::with_capacity(openings.len());
    for opening in openings {
        let volume = opening.length_m
            * opening.height_m
            * opening.effective_width(avg_wall_width)
            * opening.count as f64;
        total += volume;
        breakdown.push(OpeningVolume {
            name: opening.name.clone(),
            volume_m3: volume,
        });
    }
    (total, breakdown)
}

/// Net masonry volume after opening deduction, clamped at zero: openings can
/// never consume more masonry than exists.
pub fn compute_net_volume(gross_volume: f64, total_opening_volume: f64) -> f64 {
    (gross_volume - total_opening_volume).max(0.0)
}

/// Fractional number of material units in `net_volume`. A zero unit volume
/// yields zero units by policy, not an error.
pub fn compute_material_count(net_volume: f64, material: &Material) -> f64 {
    let unit_volume = material.unit_volume();
    if unit_volume > 0.0 {
        net_volume / unit_volume
    } else {
        0.0
    }
}

/// Mortar volume (m3) for `net_volume` of masonry.
pub fn compute_mortar_volume(net_volume: f64, material: &Material) -> f64 {
    net_volume * material.mortar_rate
}

/// Coarse per-wall unit counts: each wall dimension is independently rounded
/// to whole material units with a floor of 1, so every wall reports at least
/// one unit. Deliberately not reconciled with [`compute_material_count`].
pub fn compute_units_per_wall(walls: &[Wall], material: &Material) -> Vec<WallUnits> {
    walls
        .iter()
        .enumerate()
        .map(|(i, wall)| WallUnits {
            wall_number: i + 1,
            units: axis_units(wall.length_m, material.length_m)
                * axis_units(wall.height_m, material.height_m)
                * axis_units(wall.width_m, material.width_m),
        })
        .collect()
}

fn axis_units(wall_dim: f64, unit_dim: f64) -> u64 {
    if unit_dim > 0.0 {
        (wall_dim / unit_dim).round().max(1.0) as u64
    } else {
        1
    }
}

/// Run the whole estimation pipeline and bundle the results.
pub fn estimate(walls: &[Wall], openings: &[Opening], material: &Material) -> Estimate {
    let (gross_volume_m3, perimeter_m) = compute_wall_volume(walls, material.width_m);
    let avg_wall_width = average_wall_width(walls);
    let (opening_volume_m3, opening_breakdown) = compute_opening_volume(openings, avg_wall_width);
    let net_volume_m3 = compute_net_volume(gross_volume_m3, opening_volume_m3);

    Estimate {
        wall_count: walls.len(),
        perimeter_m,
        gross_volume_m3,
        opening_volume_m3,
        opening_breakdown,
        net_volume_m3,
        unit_count: compute_material_count(net_volume_m3, material),
        units_per_wall: compute_units_per_wall(walls, material),
        mortar_volume_m3: compute_mortar_volume(net_volume_m3, material),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::builtin_materials;

    fn rectangular_walls() -> Vec<Wall> {
        vec![
            Wall::new(10.0, 3.0, 0.3),
            Wall::new(10.0, 3.0, 0.3),
            Wall::new(6.0, 3.0, 0.3),
            Wall::new(6.0, 3.0, 0.3),
        ]
    }

    fn brick() -> Material {
        builtin_materials()["brick"].clone()
    }

    #[test]
    fn test_rectangular_shortcut() {
        let (gross, perimeter) = compute_wall_volume(&rectangular_walls(), brick().width_m);
        assert_eq!(perimeter, 32.0);
        assert!((gross - 28.8).abs() < 1e-9);
    }

    #[test]
    fn test_shortcut_exact_perimeter_for_any_pairs() {
        let walls = vec![
            Wall::new(7.5, 2.8, 0.25),
            Wall::new(4.2, 2.8, 0.25),
            Wall::new(7.5, 2.8, 0.25),
            Wall::new(4.2, 2.8, 0.25),
        ];
        let (_, perimeter) = compute_wall_volume(&walls, 0.12);
        assert_eq!(perimeter, 2.0 * (7.5 + 4.2));
    }

    #[test]
    fn test_general_formula_for_three_walls() {
        let walls = vec![
            Wall::new(10.0, 3.0, 0.3),
            Wall::new(6.0, 3.0, 0.3),
            Wall::new(8.0, 3.0, 0.3),
        ];
        let (gross, perimeter) = compute_wall_volume(&walls, 0.12);
        // Sum of face areas times averaged thickness, simple length sum.
        let expected_area = 30.0 + 18.0 + 24.0;
        assert_eq!(perimeter, 24.0);
        assert!((gross - expected_area * 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_four_walls_without_two_distinct_lengths_use_general_formula() {
        // Three distinct lengths: no opposing pairs, so no shortcut.
        let walls = vec![
            Wall::new(10.0, 3.0, 0.3),
            Wall::new(10.0, 3.0, 0.3),
            Wall::new(6.0, 3.0, 0.3),
            Wall::new(8.0, 3.0, 0.3),
        ];
        let (gross, perimeter) = compute_wall_volume(&walls, 0.12);
        let expected_area: f64 = walls.iter().map(|w| w.face_area()).sum();
        assert_eq!(perimeter, 34.0);
        assert!((gross - expected_area * 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_four_equal_walls_use_general_formula() {
        // One distinct length is not "two pairs" either.
        let walls = vec![Wall::new(5.0, 3.0, 0.3); 4];
        let (gross, perimeter) = compute_wall_volume(&walls, 0.12);
        assert_eq!(perimeter, 20.0);
        assert!((gross - 4.0 * 15.0 * 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_empty_walls() {
        let (gross, perimeter) = compute_wall_volume(&[], 0.12);
        assert_eq!((gross, perimeter), (0.0, 0.0));
    }

    #[test]
    fn test_zero_material_width_degrades() {
        let (gross, perimeter) = compute_wall_volume(&rectangular_walls(), 0.0);
        assert!(gross.is_finite());
        assert!((gross - 28.8).abs() < 1e-9);
        assert_eq!(perimeter, 32.0);
    }

    #[test]
    fn test_opening_volume_with_default_width() {
        let openings = vec![Opening::new("window", 1.2, 2.1, 2, None)];
        let (total, breakdown) = compute_opening_volume(&openings, 0.3);
        assert!((total - 1.512).abs() < 1e-9);
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].name, "window");
        assert!((breakdown[0].volume_m3 - 1.512).abs() < 1e-9);
    }

    #[test]
    fn test_opening_breakdown_preserves_entry_order() {
        let openings = vec![
            Opening::new("door", 0.9, 2.1, 1, Some(0.25)),
            Opening::new("window", 1.2, 1.4, 3, None),
        ];
        let (total, breakdown) = compute_opening_volume(&openings, 0.3);
        assert_eq!(breakdown[0].name, "door");
        assert_eq!(breakdown[1].name, "window");
        let expected = 0.9 * 2.1 * 0.25 + 1.2 * 1.4 * 0.3 * 3.0;
        assert!((total - expected).abs() < 1e-9);
    }

    #[test]
    fn test_no_openings() {
        let (total, breakdown) = compute_opening_volume(&[], 0.3);
        assert_eq!(total, 0.0);
        assert!(breakdown.is_empty());
    }

    #[test]
    fn test_net_volume_clamps_to_zero() {
        assert_eq!(compute_net_volume(5.0, 8.0), 0.0);
        assert!((compute_net_volume(28.8, 1.512) - 27.288).abs() < 1e-9);
    }

    #[test]
    fn test_material_count() {
        let count = compute_material_count(28.8, &brick());
        assert!((count - 28.8 / 0.00195).abs() < 0.01);
        // ~14769.23 units for the 10x6 m scenario
        assert!((count - 14769.23).abs() < 0.01);
    }

    #[test]
    fn test_material_count_zero_unit_volume() {
        let degenerate = Material::new("Flat", 0.25, 0.0, 0.065, "GOST 530-2012", 0.23);
        assert_eq!(compute_material_count(28.8, &degenerate), 0.0);
    }

    #[test]
    fn test_mortar_volume() {
        assert!((compute_mortar_volume(27.288, &brick()) - 27.288 * 0.23).abs() < 1e-9);
    }

    #[test]
    fn test_units_per_wall_floor_of_one() {
        // Tiny wall: every rounded ratio would be 0 without the floor.
        let walls = vec![Wall::new(0.05, 0.01, 0.02)];
        let units = compute_units_per_wall(&walls, &brick());
        assert_eq!(units[0].units, 1);
    }

    #[test]
    fn test_units_per_wall() {
        let units = compute_units_per_wall(&rectangular_walls(), &brick());
        assert_eq!(units.len(), 4);
        assert_eq!(units[0].wall_number, 1);
        // 10/0.25 = 40, 3/0.065 = 46.15 -> 46, 0.3/0.12 = 2.5 -> rounds half away
        let length_units = (10.0f64 / 0.25).round() as u64;
        let height_units = (3.0f64 / 0.065).round() as u64;
        let width_units = (0.3f64 / 0.12).round() as u64;
        assert_eq!(units[0].units, length_units * height_units * width_units);
    }

    #[test]
    fn test_estimate_bundle_scenario() {
        let walls = rectangular_walls();
        let openings = vec![Opening::new("window", 1.2, 2.1, 2, None)];
        let result = estimate(&walls, &openings, &brick());

        assert_eq!(result.wall_count, 4);
        assert_eq!(result.perimeter_m, 32.0);
        assert!((result.gross_volume_m3 - 28.8).abs() < 1e-9);
        assert!((result.opening_volume_m3 - 1.512).abs() < 1e-9);
        assert!((result.net_volume_m3 - 27.288).abs() < 1e-9);
        assert!((result.mortar_volume_m3 - 27.288 * 0.23).abs() < 1e-9);
        assert_eq!(result.units_per_wall.len(), 4);
        assert_eq!(result.rounded_unit_count(), result.unit_count.round() as u64);
    }

    #[test]
    fn test_estimate_serialization() {
        let result = estimate(&rectangular_walls(), &[], &brick());
        let json = serde_json::to_string(&result).unwrap();
        let parsed: Estimate = serde_json::from_str(&json).unwrap();
        assert_eq!(result, parsed);
    }
}
