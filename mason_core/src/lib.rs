//! # mason_core - Masonry Estimation Engine
//!
//! `mason_core` is the computational heart of Mason, turning wall and opening
//! geometry plus a chosen material profile into masonry volumes, unit counts,
//! and mortar quantities. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless core**: the estimator is pure functions over plain data
//! - **Degrade, don't fail**: degenerate inputs yield zero results, not errors
//! - **Narrow collaborators**: persistence and lookups live behind small traits
//!
//! ## Quick Start
//!
//! ```rust
//! use mason_core::estimate::estimate;
//! use mason_core::geometry::Wall;
//! use mason_core::materials::builtin_materials;
//!
//! let walls = vec![
//!     Wall::new(10.0, 3.0, 0.3),
//!     Wall::new(10.0, 3.0, 0.3),
//!     Wall::new(6.0, 3.0, 0.3),
//!     Wall::new(6.0, 3.0, 0.3),
//! ];
//! let brick = builtin_materials()["brick"].clone();
//!
//! let result = estimate(&walls, &[], &brick);
//! assert_eq!(result.perimeter_m, 32.0);
//! ```
//!
//! ## Modules
//!
//! - [`estimate`] - The volume-accounting core (gross/net volumes, counts, mortar)
//! - [`geometry`] - Wall and opening descriptions
//! - [`materials`] - Material profiles and built-in defaults
//! - [`catalog`] - File-backed material catalog store
//! - [`report`] - Plain-text calculation reports
//! - [`lookup`] - Best-effort reference-code metadata lookup
//! - [`errors`] - Structured error types

pub mod catalog;
pub mod errors;
pub mod estimate;
pub mod geometry;
pub mod lookup;
pub mod materials;
pub mod report;

// Re-export commonly used types at crate root for convenience
pub use errors::{MasonError, MasonResult};
pub use estimate::{estimate, Estimate};
pub use geometry::{Opening, Wall};
pub use materials::Material;
