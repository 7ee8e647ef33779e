use std::io::Write;

use crate::cli::{with_session, Target};
use crate::error::Result;
use crate::settings::get_data_dir;

pub fn run(yes: bool, target: &Target) -> Result<()> {
    with_session(get_data_dir(), target, |session, _conn, title| {
        if !yes {
            print!("Reset all courses for {title}? [y/N]: ");
            std::io::stdout().flush()?;
            let mut input = String::new();
            std::io::stdin().read_line(&mut input)?;
            if !matches!(input.trim(), "y" | "Y" | "yes") {
                println!("Nothing changed.");
                return Ok(());
            }
        }
        session.reset()?;
        println!("All courses reset for {title}.");
        Ok(())
    })
}
