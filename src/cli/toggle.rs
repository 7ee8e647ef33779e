use crate::cli::{with_session, Target};
use crate::error::{Result, UnitrackError};
use crate::settings::get_data_dir;

/// `group` and `course` are 1-based, as printed by `show`.
pub fn run(group: usize, course: usize, target: &Target) -> Result<()> {
    let (Some(g), Some(c)) = (group.checked_sub(1), course.checked_sub(1)) else {
        return Err(UnitrackError::NoSuchCourse { group, course });
    };

    with_session(get_data_dir(), target, |session, _conn, _title| {
        let passed = session.toggle(g, c)?;
        let grp = &session.groups()[g];
        let crs = &grp.courses[c];
        let state = if passed { "passed" } else { "not passed" };
        println!(
            "{} ({}) marked {state}. {}: {}/{} units",
            crs.name,
            crs.code,
            grp.name,
            grp.passed_units(),
            grp.required_units
        );
        Ok(())
    })
}
