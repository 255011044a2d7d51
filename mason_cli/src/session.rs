//! The interactive calculation session.
//!
//! One run: collect walls, choose (or create) a material, collect openings,
//! estimate, print the summary, and write the report file. Walls and
//! openings live only for the duration of the session; the material catalog
//! persists through the injected [`CatalogStore`].

use std::io::{self, BufRead, Write};
use std::path::Path;

use mason_core::catalog::{find_material, insert_material, seed_defaults, Catalog, CatalogStore};
use mason_core::errors::MasonError;
use mason_core::estimate::{estimate, Estimate};
use mason_core::geometry::{Opening, Wall};
use mason_core::lookup::ReferenceLookup;
use mason_core::materials::Material;
use mason_core::report::{write_report, ReportContext};

use crate::prompt::{Entry, NumericForm, Prompter};

/// Fallback catalog key when a typed material name is not recognized.
const FALLBACK_MATERIAL: &str = "brick";

pub struct Session<'a, R, W> {
    prompter: Prompter<R, W>,
    store: &'a dyn CatalogStore,
    lookup: &'a dyn ReferenceLookup,
    report_path: &'a Path,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(
        prompter: Prompter<R, W>,
        store: &'a dyn CatalogStore,
        lookup: &'a dyn ReferenceLookup,
        report_path: &'a Path,
    ) -> Self {
        Session {
            prompter,
            store,
            lookup,
            report_path,
        }
    }

    /// Run one full calculation session.
    pub fn run(&mut self) -> anyhow::Result<()> {
        self.prompter
            .say("Masonry material and mortar estimation for walls")?;
        self.prompter
            .say("--------------------------------------------------")?;

        let mut catalog = self.store.load();
        if seed_defaults(&mut catalog) {
            self.store.save(&catalog)?;
        }

        let walls = self.collect_walls()?;
        let material = self.choose_material(&mut catalog)?;
        self.prompter.say(&format!(
            "\nSelected material: {} {}",
            material.name,
            material.dimensions_label()
        ))?;

        let openings = self.collect_openings()?;

        let result = estimate(&walls, &openings, &material);
        self.print_results(&material, &result)?;

        write_report(
            self.report_path,
            &ReportContext {
                material: &material,
                estimate: &result,
            },
        )?;
        self.prompter.say(&format!(
            "\nResults saved to '{}'",
            self.report_path.display()
        ))?;

        Ok(())
    }

    /// Wall entry loop. Backing out of a wall form undoes the most recently
    /// stored wall (or no-ops when there is none); a minimum of 2 walls is
    /// enforced before the loop may end.
    fn collect_walls(&mut self) -> io::Result<Vec<Wall>> {
        self.prompter
            .say("\nWall entry (length, height, thickness)")?;
        self.prompter
            .say("For a rectangular house enter 4 walls (2 opposing pairs)")?;
        self.prompter
            .say("Enter 'b' at any field to step back one entry")?;

        let form = NumericForm::new()
            .with_field("Wall length (m): ", 0.0)
            .with_field("Wall height (m): ", 0.0)
            .with_field("Wall thickness (m): ", 0.0);

        let mut walls: Vec<Wall> = Vec::new();
        loop {
            self.prompter.say(&format!("\nWall #{}:", walls.len() + 1))?;
            match form.run(&mut self.prompter)? {
                Some(values) => walls.push(Wall::new(values[0], values[1], values[2])),
                None => {
                    if walls.pop().is_some() {
                        self.prompter
                            .say(&format!("Removed wall #{}", walls.len() + 1))?;
                    } else {
                        self.prompter.say("Nothing to undo")?;
                    }
                    continue;
                }
            }

            if walls.len() >= 4 {
                if !self.prompter.read_yes_no("Add another wall? (y/n): ")? {
                    break;
                }
            } else if !self.prompter.read_yes_no("Add next wall? (y/n): ")? {
                if walls.len() < 2 {
                    self.prompter.say("A minimum of 2 walls is required")?;
                    continue;
                }
                break;
            }
        }
        Ok(walls)
    }

    /// Material selection: by number, by name, or `n` to create a new
    /// profile. An unrecognized name falls back to the built-in brick.
    fn choose_material(&mut self, catalog: &mut Catalog) -> anyhow::Result<Material> {
        loop {
            self.prompter.say("\nAvailable materials:")?;
            let names: Vec<String> = catalog.keys().cloned().collect();
            for (i, name) in names.iter().enumerate() {
                let material = &catalog[name];
                self.prompter.say(&format!(
                    "{}. {} - {}",
                    i + 1,
                    material,
                    material.dimensions_label()
                ))?;
            }
            self.prompter.say("n. Add a new material")?;

            let choice = self
                .prompter
                .read_text("Select a material (number or name): ")?
                .to_lowercase();

            if choice == "n" {
                match self.create_material(catalog)? {
                    Some(material) => return Ok(material),
                    None => continue,
                }
            }

            if let Ok(index) = choice.parse::<usize>() {
                match index.checked_sub(1).and_then(|i| names.get(i)) {
                    Some(name) => return Ok(catalog[name].clone()),
                    None => {
                        self.prompter.say("No material with that number")?;
                        continue;
                    }
                }
            }

            if let Some(material) = find_material(catalog, &choice) {
                return Ok(material.clone());
            }
            return find_material(catalog, FALLBACK_MATERIAL)
                .cloned()
                .ok_or_else(|| MasonError::material_not_found(choice).into());
        }
    }

    /// New-material dialog. Returns `None` when the operator backs out.
    fn create_material(&mut self, catalog: &mut Catalog) -> anyhow::Result<Option<Material>> {
        let name = loop {
            let name = self.prompter.read_text("Material name: ")?;
            if name.is_empty() {
                self.prompter.say("Name must not be empty")?;
            } else {
                break name;
            }
        };

        let form = NumericForm::new()
            .with_field("Unit length (m): ", 0.0)
            .with_field("Unit width (m): ", 0.0)
            .with_field("Unit height (m): ", 0.0);
        let dims = match form.run(&mut self.prompter)? {
            Some(dims) => dims,
            None => return Ok(None),
        };

        let gost = self
            .prompter
            .read_text("Reference code (e.g. 'GOST 530-2012'): ")?;
        if let Some(title) = self.lookup.title_for(&gost) {
            self.prompter
                .say(&format!("Found reference info: {}", title))?;
        }

        let mortar_rate = match self
            .prompter
            .read_f64("Mortar rate (m3 per m3 of masonry): ", 0.0)?
        {
            Entry::Value(rate) => rate,
            Entry::Back => return Ok(None),
        };

        let material = Material::new(name, dims[0], dims[1], dims[2], gost, mortar_rate);
        insert_material(catalog, material.clone());
        self.store.save(catalog)?;
        self.prompter.say("Material saved to catalog")?;
        Ok(Some(material))
    }

    /// Opening entry loop; an empty type name ends it. Backing out of the
    /// first field discards the opening being entered.
    fn collect_openings(&mut self) -> io::Result<Vec<Opening>> {
        self.prompter
            .say("\nOpening entry (windows, doors, ...)")?;

        let mut openings = Vec::new();
        loop {
            let name = self
                .prompter
                .read_text("\nOpening type (e.g. 'window', 'door'; empty to finish): ")?;
            if name.is_empty() {
                break;
            }
            if let Some(opening) = self.collect_opening(name)? {
                openings.push(opening);
            } else {
                self.prompter.say("Opening discarded")?;
            }
        }
        Ok(openings)
    }

    /// Field sequence for one opening: length, height, count, optional
    /// width. Stepping back revisits the previous field; stepping back from
    /// the length cancels the opening.
    fn collect_opening(&mut self, name: String) -> io::Result<Option<Opening>> {
        let mut length = 0.0;
        let mut height = 0.0;
        let mut count = 1u32;
        let width;

        let mut field = 0;
        loop {
            match field {
                0 => match self.prompter.read_f64("Opening length (m): ", 0.0)? {
                    Entry::Value(value) => {
                        length = value;
                        field = 1;
                    }
                    Entry::Back => return Ok(None),
                },
                1 => match self.prompter.read_f64("Opening height (m): ", 0.0)? {
                    Entry::Value(value) => {
                        height = value;
                        field = 2;
                    }
                    Entry::Back => field = 0,
                },
                2 => match self.prompter.read_u32("How many of these openings: ", 1)? {
                    Entry::Value(value) => {
                        count = value;
                        field = 3;
                    }
                    Entry::Back => field = 1,
                },
                _ => match self
                    .prompter
                    .read_optional_f64("Opening width (m, empty to use wall thickness): ", 0.0)?
                {
                    Entry::Value(value) => {
                        width = value;
                        break;
                    }
                    Entry::Back => field = 2,
                },
            }
        }

        Ok(Some(Opening::new(name, length, height, count, width)))
    }

    fn print_results(&mut self, material: &Material, result: &Estimate) -> io::Result<()> {
        self.prompter.say("\nCalculation results:")?;
        self.prompter.say("--------------------")?;
        self.prompter
            .say(&format!("Total walls: {}", result.wall_count))?;
        self.prompter
            .say(&format!("Total perimeter: {:.2} m", result.perimeter_m))?;
        self.prompter.say(&format!(
            "Gross wall volume: {:.2} m3",
            result.gross_volume_m3
        ))?;

        if !result.opening_breakdown.is_empty() {
            self.prompter.say(&format!(
                "\nTotal opening volume: {:.2} m3",
                result.opening_volume_m3
            ))?;
            self.prompter.say("Opening breakdown:")?;
            for opening in &result.opening_breakdown {
                self.prompter
                    .say(&format!("- {}: {:.2} m3", opening.name, opening.volume_m3))?;
            }
        }

        self.prompter.say(&format!(
            "\nNet masonry volume: {:.2} m3",
            result.net_volume_m3
        ))?;
        self.prompter.say(&format!(
            "\n{} count: {} pcs (+5-10% waste margin)",
            material.name,
            result.rounded_unit_count()
        ))?;

        self.prompter.say("\nUnits by wall:")?;
        for wall_units in &result.units_per_wall {
            self.prompter.say(&format!(
                "- Wall #{}: {} pcs",
                wall_units.wall_number, wall_units.units
            ))?;
        }

        self.prompter.say(&format!(
            "\nMortar volume (per {}): {:.2} m3",
            material.gost, result.mortar_volume_m3
        ))?;
        Ok(())
    }
}
