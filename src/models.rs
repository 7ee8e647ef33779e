use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub code: String,
    pub units: u32,
    pub passed: bool,
}

impl Course {
    pub fn new(name: &str, code: &str, units: u32) -> Self {
        Self {
            name: name.to_string(),
            code: code.to_string(),
            units,
            passed: false,
        }
    }
}

/// A named bucket of courses sharing one required-unit target.
///
/// `passed_units` is derived from `courses` and only changes through
/// [`CourseGroup::refresh_passed_units`]. It is summed as `u64` so a group of
/// large `u32` unit values cannot overflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseGroup {
    pub name: String,
    pub required_units: u32,
    pub courses: Vec<Course>,
    passed_units: u64,
}

impl CourseGroup {
    pub fn new(name: &str, required_units: u32) -> Self {
        Self {
            name: name.to_string(),
            required_units,
            courses: Vec::new(),
            passed_units: 0,
        }
    }

    #[cfg(test)]
    pub fn with_courses(mut self, courses: Vec<Course>) -> Self {
        self.courses = courses;
        self.refresh_passed_units();
        self
    }

    pub fn passed_units(&self) -> u64 {
        self.passed_units
    }

    pub fn refresh_passed_units(&mut self) {
        self.passed_units = self
            .courses
            .iter()
            .filter(|c| c.passed)
            .map(|c| u64::from(c.units))
            .sum();
    }
}

/// One passed course read from a transcript document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptCourse {
    pub code: String,
    pub name: String,
}

/// Saved course state as read back from the progress store.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedCourse {
    pub code: String,
    #[serde(default)]
    pub passed: bool,
}

/// Saved group state as read back from the progress store. Extra keys such as
/// `requiredUnits` or `passedUnits` are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedGroup {
    pub name: String,
    #[serde(default)]
    pub courses: Vec<SavedCourse>,
}
