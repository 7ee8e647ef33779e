use crate::catalog::parse_catalog;
use crate::error::{Result, UnitrackError};
use crate::models::{CourseGroup, TranscriptCourse};
use crate::reconciler;
use crate::store::{decode_snapshot, encode_snapshot, ProgressStore};
use crate::transcript::parse_transcript;

/// Progress of one group toward its required units.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupProgress {
    pub name: String,
    pub passed_units: u64,
    pub required_units: u32,
    pub passed_courses: usize,
    pub total_courses: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub groups: Vec<GroupProgress>,
    pub passed_units: u64,
    pub required_units: u64,
    pub complete_groups: usize,
}

pub struct ImportOutcome {
    pub extracted: usize,
    pub newly_passed: usize,
    pub unmatched: Vec<TranscriptCourse>,
}

/// Share of `required` covered by `passed`, capped at 100. A group that
/// requires nothing counts as done once anything in it is passed.
pub fn percent(passed: u64, required: u64) -> f64 {
    if required == 0 {
        return if passed > 0 { 100.0 } else { 0.0 };
    }
    (passed as f64 / required as f64 * 100.0).min(100.0)
}

/// One program's catalog plus its stored progress. Every state change is written
/// back through the store before the call returns.
pub struct Session<'s, S: ProgressStore> {
    store: &'s S,
    key: String,
    groups: Vec<CourseGroup>,
}

impl<'s, S: ProgressStore> Session<'s, S> {
    /// Parse `catalog_text` and replay whatever progress the store holds under `key`.
    /// `source` names the catalog in the error raised when no group could be read.
    pub fn open(store: &'s S, key: &str, source: &str, catalog_text: &str) -> Result<Self> {
        let groups = parse_catalog(catalog_text);
        if groups.is_empty() {
            return Err(UnitrackError::EmptyCatalog(source.to_string()));
        }

        let groups = match store.load(key)? {
            Some(blob) => match decode_snapshot(key, &blob) {
                Some(saved) => reconciler::apply_saved(groups, &saved),
                None => groups,
            },
            None => groups,
        };

        Ok(Self {
            store,
            key: key.to_string(),
            groups,
        })
    }

    pub fn groups(&self) -> &[CourseGroup] {
        &self.groups
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn save(&self) -> Result<()> {
        self.store.save(&self.key, &encode_snapshot(&self.groups)?)?;
        tracing::debug!(key = %self.key, "saved progress");
        Ok(())
    }

    /// Flip one course, addressed by 0-based group and course index. Returns the
    /// new `passed` value.
    pub fn toggle(&mut self, group: usize, course: usize) -> Result<bool> {
        let exists = self
            .groups
            .get(group)
            .is_some_and(|g| course < g.courses.len());
        if !exists {
            return Err(UnitrackError::NoSuchCourse {
                group: group + 1,
                course: course + 1,
            });
        }
        self.groups = reconciler::toggle_course(std::mem::take(&mut self.groups), group, course);
        self.save()?;
        Ok(self.groups[group].courses[course].passed)
    }

    pub fn reset(&mut self) -> Result<()> {
        self.groups = reconciler::reset_all(std::mem::take(&mut self.groups));
        self.save()
    }

    /// Apply a transcript document. A document that cannot be parsed leaves the
    /// session and the store untouched.
    pub fn import_transcript(&mut self, html: &str) -> Result<ImportOutcome> {
        let passed = parse_transcript(html)?;
        self.apply_passed(&passed)
    }

    pub fn apply_passed(&mut self, passed: &[TranscriptCourse]) -> Result<ImportOutcome> {
        let result = reconciler::apply_transcript(std::mem::take(&mut self.groups), passed);
        self.groups = result.groups;
        self.save()?;
        tracing::info!(
            key = %self.key,
            extracted = passed.len(),
            newly_passed = result.newly_passed,
            unmatched = result.unmatched.len(),
            "applied transcript"
        );
        Ok(ImportOutcome {
            extracted: passed.len(),
            newly_passed: result.newly_passed,
            unmatched: result.unmatched,
        })
    }

    pub fn summary(&self) -> Summary {
        let groups: Vec<GroupProgress> = self
            .groups
            .iter()
            .map(|g| GroupProgress {
                name: g.name.clone(),
                passed_units: g.passed_units(),
                required_units: g.required_units,
                passed_courses: g.courses.iter().filter(|c| c.passed).count(),
                total_courses: g.courses.len(),
                percent: percent(g.passed_units(), u64::from(g.required_units)),
            })
            .collect();
        Summary {
            passed_units: groups.iter().map(|g| g.passed_units).sum(),
            required_units: groups.iter().map(|g| u64::from(g.required_units)).sum(),
            complete_groups: groups.iter().filter(|g| g.percent >= 100.0).count(),
            groups,
        }
    }
}
