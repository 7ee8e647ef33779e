use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::models::{Course, CourseGroup, SavedCourse, SavedGroup, TranscriptCourse};

// ---------------------------------------------------------------------------
// Keyed merge
// ---------------------------------------------------------------------------

/// For every target whose key matches an entry in `source`, call `apply` with that
/// entry. Targets without a match are left untouched. When `source` repeats a key
/// the first entry wins.
pub fn merge_keyed<T, S, Q>(
    targets: &mut [T],
    source: &[S],
    target_key: impl Fn(&T) -> &Q,
    source_key: impl Fn(&S) -> &Q,
    mut apply: impl FnMut(&mut T, &S),
) where
    Q: Eq + Hash + ?Sized,
{
    let mut index: HashMap<&Q, &S> = HashMap::with_capacity(source.len());
    for entry in source {
        index.entry(source_key(entry)).or_insert(entry);
    }
    for target in targets.iter_mut() {
        let matched = index.get(target_key(target)).copied();
        if let Some(entry) = matched {
            apply(target, entry);
        }
    }
}

fn group_name(group: &CourseGroup) -> &str {
    &group.name
}

fn saved_group_name(group: &SavedGroup) -> &str {
    &group.name
}

fn course_code(course: &Course) -> &str {
    &course.code
}

fn saved_course_code(course: &SavedCourse) -> &str {
    &course.code
}

fn transcript_code(course: &TranscriptCourse) -> &str {
    &course.code
}

// ---------------------------------------------------------------------------
// Merge operations
// ---------------------------------------------------------------------------

/// Replay saved `passed` flags onto freshly parsed groups, matching groups by name
/// and courses by code.
pub fn apply_saved(mut groups: Vec<CourseGroup>, saved: &[SavedGroup]) -> Vec<CourseGroup> {
    merge_keyed(&mut groups, saved, group_name, saved_group_name, |group, saved_group| {
        merge_keyed(
            &mut group.courses,
            &saved_group.courses,
            course_code,
            saved_course_code,
            |course, saved_course| course.passed = saved_course.passed,
        );
    });
    for group in &mut groups {
        group.refresh_passed_units();
    }
    groups
}

pub struct TranscriptImport {
    pub groups: Vec<CourseGroup>,
    /// Transcript courses whose code is not in any group, in transcript order.
    pub unmatched: Vec<TranscriptCourse>,
    /// Courses that went from not passed to passed.
    pub newly_passed: usize,
}

/// Mark every course whose code appears in the transcript as passed. Never unsets
/// a course.
pub fn apply_transcript(mut groups: Vec<CourseGroup>, transcript: &[TranscriptCourse]) -> TranscriptImport {
    let unmatched: Vec<TranscriptCourse> = {
        let known: HashSet<&str> = groups
            .iter()
            .flat_map(|g| g.courses.iter())
            .map(course_code)
            .collect();
        transcript
            .iter()
            .filter(|t| !known.contains(t.code.as_str()))
            .cloned()
            .collect()
    };

    let mut newly_passed = 0usize;
    for group in &mut groups {
        merge_keyed(&mut group.courses, transcript, course_code, transcript_code, |course, _| {
            if !course.passed {
                course.passed = true;
                newly_passed += 1;
            }
        });
        group.refresh_passed_units();
    }

    TranscriptImport {
        groups,
        unmatched,
        newly_passed,
    }
}

/// Flip one course, addressed by group and course position. Out-of-range
/// positions leave everything as it was.
pub fn toggle_course(mut groups: Vec<CourseGroup>, group: usize, course: usize) -> Vec<CourseGroup> {
    if let Some(target) = groups.get_mut(group) {
        if let Some(c) = target.courses.get_mut(course) {
            c.passed = !c.passed;
            target.refresh_passed_units();
        }
    }
    groups
}

pub fn reset_all(mut groups: Vec<CourseGroup>) -> Vec<CourseGroup> {
    for group in &mut groups {
        for course in &mut group.courses {
            course.passed = false;
        }
        group.refresh_passed_units();
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn course(code: &str, units: u32, passed: bool) -> Course {
        let mut c = Course::new(code, code, units);
        c.passed = passed;
        c
    }

    fn catalog() -> Vec<CourseGroup> {
        vec![
            CourseGroup::new("Core", 6).with_courses(vec![course("C001", 3, false), course("C002", 3, false)]),
            CourseGroup::new("Electives", 4).with_courses(vec![course("E001", 2, false), course("E002", 2, false)]),
        ]
    }

    fn saved(json: &str) -> Vec<SavedGroup> {
        serde_json::from_str(json).unwrap()
    }

    fn transcript(codes: &[&str]) -> Vec<TranscriptCourse> {
        codes
            .iter()
            .map(|code| TranscriptCourse { code: code.to_string(), name: code.to_string() })
            .collect()
    }

    fn assert_units_consistent(groups: &[CourseGroup]) {
        for g in groups {
            let expected: u64 = g.courses.iter().filter(|c| c.passed).map(|c| u64::from(c.units)).sum();
            assert_eq!(g.passed_units(), expected, "group {}", g.name);
        }
    }

    #[test]
    fn test_merge_keyed_first_source_entry_wins() {
        let mut targets = vec![course("A", 1, false), course("B", 1, false)];
        let source = vec![
            SavedCourse { code: "A".into(), passed: true },
            SavedCourse { code: "A".into(), passed: false },
        ];
        merge_keyed(&mut targets, &source, course_code, saved_course_code, |t, s| t.passed = s.passed);
        assert!(targets[0].passed);
        assert!(!targets[1].passed);
    }

    #[test]
    fn test_apply_saved_matches_by_name_and_code() {
        let state = saved(
            r#"[{"name":"Core","courses":[{"code":"C002","passed":true},{"code":"GONE","passed":true}]},
                {"name":"Unknown","courses":[{"code":"E001","passed":true}]}]"#,
        );
        let groups = apply_saved(catalog(), &state);
        assert!(!groups[0].courses[0].passed);
        assert!(groups[0].courses[1].passed);
        assert_eq!(groups[0].passed_units(), 3);
        assert!(groups[1].courses.iter().all(|c| !c.passed));
        assert_units_consistent(&groups);
    }

    #[test]
    fn test_apply_saved_can_unset() {
        let mut start = catalog();
        start = toggle_course(start, 0, 0);
        let state = saved(r#"[{"name":"Core","courses":[{"code":"C001","passed":false}]}]"#);
        let groups = apply_saved(start, &state);
        assert!(!groups[0].courses[0].passed);
        assert_eq!(groups[0].passed_units(), 0);
    }

    #[test]
    fn test_apply_transcript_reports_unmatched() {
        let groups = vec![CourseGroup::new("Core", 3).with_courses(vec![course("C001", 3, false)])];
        let result = apply_transcript(groups, &transcript(&["C001", "C999"]));
        assert_eq!(result.unmatched, transcript(&["C999"]));
        assert!(result.groups[0].courses[0].passed);
        assert_eq!(result.groups[0].passed_units(), 3);
        assert_eq!(result.newly_passed, 1);
    }

    #[test]
    fn test_apply_transcript_matches_across_groups() {
        let groups = catalog();
        let result = apply_transcript(groups, &transcript(&["E002", "C001"]));
        assert!(result.unmatched.is_empty());
        assert_eq!(result.groups[0].passed_units(), 3);
        assert_eq!(result.groups[1].passed_units(), 2);
    }

    #[test]
    fn test_apply_transcript_code_matching_is_exact() {
        let result = apply_transcript(catalog(), &transcript(&["c001", "C001 "]));
        assert_eq!(result.unmatched.len(), 2);
        assert!(result.groups.iter().all(|g| g.passed_units() == 0));
    }

    #[test]
    fn test_apply_transcript_counts_only_new_passes() {
        let groups = toggle_course(catalog(), 0, 0);
        let result = apply_transcript(groups, &transcript(&["C001", "C002", "C002"]));
        assert_eq!(result.newly_passed, 1);
    }

    #[test]
    fn test_toggle_touches_one_course() {
        let before = catalog();
        let after = toggle_course(before.clone(), 1, 1);
        assert_eq!(after[0], before[0]);
        assert!(after[1].courses[1].passed);
        assert_eq!(after[1].courses[0], before[1].courses[0]);
        assert_eq!(after[1].passed_units(), 2);

        let back = toggle_course(after, 1, 1);
        assert_eq!(back, before);
    }

    #[test]
    fn test_toggle_out_of_range_is_noop() {
        let before = catalog();
        assert_eq!(toggle_course(before.clone(), 5, 0), before);
        assert_eq!(toggle_course(before.clone(), 0, 9), before);
    }

    #[test]
    fn test_reset_all_clears_everything() {
        let groups = apply_transcript(catalog(), &transcript(&["C001", "E001"])).groups;
        let reset = reset_all(groups);
        assert!(reset.iter().all(|g| g.passed_units() == 0));
        assert!(reset.iter().flat_map(|g| &g.courses).all(|c| !c.passed));
    }

    #[test]
    fn test_toggling_courses_with_huge_units_keeps_exact_total() {
        let groups = crate::catalog::parse_catalog("A - 3,,\nX,C1,4000000000\nY,C2,4000000000\n");
        let groups = toggle_course(groups, 0, 0);
        let groups = toggle_course(groups, 0, 1);
        assert_eq!(groups[0].passed_units(), 8_000_000_000);
        assert_units_consistent(&groups);
    }

    fn arb_groups() -> impl Strategy<Value = Vec<CourseGroup>> {
        prop::collection::vec(
            (0u32..20, prop::collection::vec((any::<u32>(), any::<bool>()), 1..6)),
            1..5,
        )
        .prop_map(|groups| {
            groups
                .into_iter()
                .enumerate()
                .map(|(g, (required, courses))| {
                    let courses = courses
                        .into_iter()
                        .enumerate()
                        .map(|(c, (units, passed))| course(&format!("G{g}C{c}"), units, passed))
                        .collect();
                    CourseGroup::new(&format!("Group {g}"), required).with_courses(courses)
                })
                .collect()
        })
    }

    fn unpassed(groups: &[CourseGroup]) -> Vec<CourseGroup> {
        reset_all(groups.to_vec())
    }

    proptest! {
        #[test]
        fn passed_units_hold_after_toggle(groups in arb_groups(), g in 0usize..6, c in 0usize..8) {
            let toggled = toggle_course(groups, g, c);
            assert_units_consistent(&toggled);
        }

        #[test]
        fn reset_is_idempotent(groups in arb_groups()) {
            let once = reset_all(groups);
            let twice = reset_all(once.clone());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn saved_state_is_a_fixed_point(groups in arb_groups()) {
            let blob = serde_json::to_string(&groups).unwrap();
            let state: Vec<SavedGroup> = serde_json::from_str(&blob).unwrap();
            let restored = apply_saved(unpassed(&groups), &state);
            assert_units_consistent(&restored);
            prop_assert_eq!(restored, groups);
        }

        #[test]
        fn transcript_merge_is_monotone(groups in arb_groups(), picks in prop::collection::vec((0usize..5, 0usize..6), 0..8)) {
            let codes: Vec<String> = picks.iter().map(|(g, c)| format!("G{g}C{c}")).collect();
            let records: Vec<TranscriptCourse> = codes
                .iter()
                .map(|code| TranscriptCourse { code: code.clone(), name: String::new() })
                .collect();
            let result = apply_transcript(groups.clone(), &records);
            assert_units_consistent(&result.groups);
            for (before, after) in groups.iter().zip(&result.groups) {
                for (b, a) in before.courses.iter().zip(&after.courses) {
                    prop_assert!(!b.passed || a.passed);
                    prop_assert_eq!(a.passed, b.passed || codes.contains(&a.code));
                }
            }
        }
    }
}
