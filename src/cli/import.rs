use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{with_session, Target};
use crate::error::{Result, UnitrackError};
use crate::history::{compute_checksum, record_import, seen_before};
use crate::settings::get_data_dir;

pub fn run(file: &str, target: &Target) -> Result<()> {
    let file_path = PathBuf::from(file);
    let bytes = std::fs::read(&file_path)?;
    let checksum = compute_checksum(&bytes);
    let html = String::from_utf8(bytes)
        .map_err(|_| UnitrackError::Transcript(format!("{file} is not UTF-8 text")))?;

    with_session(get_data_dir(), target, |session, conn, _title| {
        let repeat = seen_before(conn, session.key(), &checksum)?;
        let outcome = session.import_transcript(&html)?;
        record_import(conn, session.key(), &file_path, &checksum, &outcome)?;

        if repeat {
            println!("This transcript was imported before; applying it again.");
        }
        println!(
            "{} passed courses found in transcript, {} newly marked passed",
            outcome.extracted, outcome.newly_passed
        );

        if !outcome.unmatched.is_empty() {
            let mut table = Table::new();
            table.set_header(vec!["Code", "Course"]);
            for course in &outcome.unmatched {
                table.add_row(vec![Cell::new(&course.code), Cell::new(&course.name)]);
            }
            println!(
                "{}\n{table}",
                format!("{} courses are not in this catalog:", outcome.unmatched.len()).yellow()
            );
        }
        Ok(())
    })
}
