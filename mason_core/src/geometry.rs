//! # Wall and Opening Geometry
//!
//! Plain data describing the walls to be built and the openings (windows,
//! doors) cut into them. Walls and openings have no identity beyond their
//! position in the entry list; the order they were entered is the order
//! they are reported.
//!
//! All dimensions are in meters.

use serde::{Deserialize, Serialize};

/// A single straight wall section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    /// Wall length (m)
    pub length_m: f64,
    /// Wall height (m)
    pub height_m: f64,
    /// Wall thickness (m)
    pub width_m: f64,
}

impl Wall {
    pub fn new(length_m: f64, height_m: f64, width_m: f64) -> Self {
        Wall {
            length_m,
            height_m,
            width_m,
        }
    }

    /// Face area of the wall (m2), ignoring openings.
    pub fn face_area(&self) -> f64 {
        self.length_m * self.height_m
    }
}

fn default_count() -> u32 {
    1
}

/// An opening (window, door, ...) to be deducted from the masonry volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    /// Kind of opening, e.g. "window" or "door"
    pub name: String,
    /// Opening length (m)
    pub length_m: f64,
    /// Opening height (m)
    pub height_m: f64,
    /// How many identical openings of this kind
    #[serde(default = "default_count")]
    pub count: u32,
    /// Opening depth (m). When absent the average wall thickness is used.
    #[serde(default)]
    pub width_m: Option<f64>,
}

impl Opening {
    pub fn new(
        name: impl Into<String>,
        length_m: f64,
        height_m: f64,
        count: u32,
        width_m: Option<f64>,
    ) -> Self {
        Opening {
            name: name.into(),
            length_m,
            height_m,
            count,
            width_m,
        }
    }

    /// Depth used for volume deduction: the opening's own width when given,
    /// the averaged wall thickness otherwise.
    pub fn effective_width(&self, avg_wall_width: f64) -> f64 {
        self.width_m.unwrap_or(avg_wall_width)
    }
}

/// Mean wall thickness over a set of walls; 0.0 for an empty set.
pub fn average_wall_width(walls: &[Wall]) -> f64 {
    if walls.is_empty() {
        return 0.0;
    }
    walls.iter().map(|w| w.width_m).sum::<f64>() / walls.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_face_area() {
        let wall = Wall::new(10.0, 3.0, 0.3);
        assert_eq!(wall.face_area(), 30.0);
    }

    #[test]
    fn test_average_wall_width() {
        let walls = vec![Wall::new(10.0, 3.0, 0.4), Wall::new(6.0, 3.0, 0.2)];
        assert!((average_wall_width(&walls) - 0.3).abs() < 1e-12);
        assert_eq!(average_wall_width(&[]), 0.0);
    }

    #[test]
    fn test_opening_effective_width() {
        let with_width = Opening::new("door", 0.9, 2.1, 1, Some(0.25));
        assert_eq!(with_width.effective_width(0.3), 0.25);

        let without = Opening::new("window", 1.2, 1.4, 2, None);
        assert_eq!(without.effective_width(0.3), 0.3);
    }

    #[test]
    fn test_opening_count_defaults_on_deserialize() {
        let json = r#"{ "name": "window", "length_m": 1.2, "height_m": 1.4 }"#;
        let opening: Opening = serde_json::from_str(json).unwrap();
        assert_eq!(opening.count, 1);
        assert!(opening.width_m.is_none());
    }
}
