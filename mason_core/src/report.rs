//! # Calculation Reports
//!
//! Plain-text summaries of a calculation run: chosen material, net masonry
//! volume, rounded unit count with the waste-margin note, mortar volume, and
//! per-wall unit counts. The report file is replaced wholesale on each run.

use std::fs;
use std::path::Path;

use chrono::Local;

use crate::errors::{MasonError, MasonResult};
use crate::estimate::Estimate;
use crate::materials::Material;

/// Everything the report needs from one calculation run.
pub struct ReportContext<'a> {
    pub material: &'a Material,
    pub estimate: &'a Estimate,
}

/// Render the report body.
pub fn format_report(ctx: &ReportContext<'_>) -> String {
    let mut out = String::new();
    out.push_str("Masonry calculation results\n");
    out.push_str("===========================\n\n");
    out.push_str(&format!("Generated: {}\n", Local::now().format("%Y-%m-%d %H:%M")));
    out.push_str(&format!("Material: {}\n", ctx.material));
    out.push_str(&format!("Dimensions: {}\n\n", ctx.material.dimensions_label()));
    out.push_str(&format!(
        "Net masonry volume: {:.2} m3\n",
        ctx.estimate.net_volume_m3
    ));
    out.push_str(&format!(
        "Material units: {} pcs (+5-10% waste margin)\n",
        ctx.estimate.rounded_unit_count()
    ));
    out.push_str(&format!(
        "Mortar volume: {:.2} m3\n\n",
        ctx.estimate.mortar_volume_m3
    ));

    out.push_str("Breakdown by wall:\n");
    for wall_units in &ctx.estimate.units_per_wall {
        out.push_str(&format!(
            "- Wall #{}: {} pcs\n",
            wall_units.wall_number, wall_units.units
        ));
    }
    out
}

/// Write the report to `path`, replacing any previous report.
pub fn write_report(path: &Path, ctx: &ReportContext<'_>) -> MasonResult<()> {
    fs::write(path, format_report(ctx)).map_err(|e| {
        MasonError::file_error("write report", path.display().to_string(), e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::estimate;
    use crate::geometry::Wall;
    use crate::materials::builtin_materials;
    use std::env::temp_dir;

    fn sample_context() -> (Material, Estimate) {
        let walls = vec![
            Wall::new(10.0, 3.0, 0.3),
            Wall::new(10.0, 3.0, 0.3),
            Wall::new(6.0, 3.0, 0.3),
            Wall::new(6.0, 3.0, 0.3),
        ];
        let material = builtin_materials()["brick"].clone();
        let result = estimate(&walls, &[], &material);
        (material, result)
    }

    #[test]
    fn test_format_report_contents() {
        let (material, result) = sample_context();
        let report = format_report(&ReportContext {
            material: &material,
            estimate: &result,
        });

        assert!(report.contains("Ceramic brick (GOST 530-2012)"));
        assert!(report.contains("0.25x0.12x0.065 m"));
        assert!(report.contains("Net masonry volume: 28.80 m3"));
        assert!(report.contains("+5-10% waste margin"));
        assert!(report.contains("- Wall #1:"));
        assert!(report.contains("- Wall #4:"));
    }

    #[test]
    fn test_write_report_overwrites() {
        let path = temp_dir().join("mason_test_report.txt");
        fs::write(&path, "stale contents").unwrap();

        let (material, result) = sample_context();
        write_report(
            &path,
            &ReportContext {
                material: &material,
                estimate: &result,
            },
        )
        .unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Masonry calculation results"));
        assert!(!written.contains("stale contents"));

        let _ = fs::remove_file(&path);
    }
}
