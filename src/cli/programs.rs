use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::registry::load_programs;
use crate::settings::load_settings;

pub fn list() -> Result<()> {
    let settings = load_settings();
    let programs = load_programs(&settings.data_dir)?;
    if programs.is_empty() {
        println!("No programs registered.");
        return Ok(());
    }

    let default = settings.default_program.as_deref();
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Catalog", "Guide", "Description"]);
    for p in programs {
        let id = if Some(p.id.as_str()) == default {
            format!("{} *", p.id)
        } else {
            p.id
        };
        table.add_row(vec![
            Cell::new(id),
            Cell::new(p.name),
            Cell::new(p.catalog),
            Cell::new(p.guide),
            Cell::new(p.description),
        ]);
    }
    println!("Programs\n{table}");
    Ok(())
}
