use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{with_session, Target};
use crate::error::Result;
use crate::fmt::{percent_label, progress_bar};
use crate::settings::get_data_dir;

pub fn run(target: &Target) -> Result<()> {
    with_session(get_data_dir(), target, |session, _conn, title| {
        let summary = session.summary();

        let mut table = Table::new();
        table.set_header(vec!["#", "Group", "Courses", "Units", "Progress", ""]);
        for (i, g) in summary.groups.iter().enumerate() {
            let label = percent_label(g.percent);
            let label = if g.percent >= 100.0 { label.green().bold() } else { label.normal() };
            table.add_row(vec![
                Cell::new(i + 1),
                Cell::new(&g.name),
                Cell::new(format!("{}/{}", g.passed_courses, g.total_courses)),
                Cell::new(format!("{}/{}", g.passed_units, g.required_units)),
                Cell::new(progress_bar(g.percent)),
                Cell::new(label),
            ]);
        }
        println!("{}\n{table}", title.bold());

        for (i, group) in session.groups().iter().enumerate() {
            let mut courses = Table::new();
            courses.set_header(vec!["#", "Code", "Course", "Units", "Passed"]);
            for (j, course) in group.courses.iter().enumerate() {
                let mark = if course.passed { "✓".green() } else { "·".dimmed() };
                courses.add_row(vec![
                    Cell::new(j + 1),
                    Cell::new(&course.code),
                    Cell::new(&course.name),
                    Cell::new(course.units),
                    Cell::new(mark),
                ]);
            }
            println!(
                "\n{} {} ({}/{})\n{courses}",
                format!("{}.", i + 1).bold(),
                group.name.bold(),
                group.passed_units(),
                group.required_units
            );
        }
        Ok(())
    })
}
