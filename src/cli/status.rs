use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{with_session, Target};
use crate::error::Result;
use crate::fmt::percent_label;
use crate::history::list_imports;
use crate::session::percent;
use crate::settings::get_data_dir;

pub fn run(target: &Target) -> Result<()> {
    with_session(get_data_dir(), target, |session, conn, title| {
        let summary = session.summary();
        let overall = percent(summary.passed_units, summary.required_units);

        println!("Program:   {}", title.bold());
        println!("Groups:    {} of {} complete", summary.complete_groups, summary.groups.len());
        println!(
            "Units:     {}/{} ({})",
            summary.passed_units,
            summary.required_units,
            percent_label(overall)
        );

        let imports = list_imports(conn, session.key())?;
        if imports.is_empty() {
            println!();
            println!("No transcript imports yet.");
            return Ok(());
        }

        let mut table = Table::new();
        table.set_header(vec!["Date", "File", "Found", "New", "Unmatched"]);
        for record in imports {
            table.add_row(vec![
                Cell::new(record.import_date),
                Cell::new(record.filename),
                Cell::new(record.extracted),
                Cell::new(record.newly_passed),
                Cell::new(record.unmatched),
            ]);
        }
        println!("\nImports\n{table}");
        Ok(())
    })
}
