use std::fmt::Write;

use kalos_domain as domain;

/// Import summary as returned to API clients.
#[derive(serde::Serialize, Debug, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub processed: usize,
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
    pub duration: String,
}

impl From<&domain::ImportSummary> for Summary {
    fn from(value: &domain::ImportSummary) -> Self {
        Self {
            total: value.total,
            processed: value.processed,
            created: value.created,
            updated: value.updated,
            skipped: value.skipped,
            errors: value.errors.clone(),
            duration: value.formatted_duration(),
        }
    }
}

#[must_use]
pub fn summary(summary: &domain::ImportSummary, dry_run: bool) -> String {
    let mut report = String::new();
    let _ = writeln!(
        report,
        "{} {} of {} rows in {}",
        if dry_run { "Checked" } else { "Imported" },
        summary.processed,
        summary.total,
        summary.formatted_duration()
    );
    let _ = writeln!(report, "  created: {}", summary.created);
    let _ = writeln!(report, "  updated: {}", summary.updated);
    let _ = writeln!(report, "  skipped: {}", summary.skipped);
    if !summary.errors.is_empty() {
        let _ = writeln!(report, "Errors:");
        for error in &summary.errors {
            let _ = writeln!(report, "  {error}");
        }
    }
    report
}

/// One line per exercise, ordered by category, progression level and name.
#[must_use]
pub fn catalog(exercises: &[domain::Exercise]) -> String {
    let mut exercises = exercises.iter().collect::<Vec<_>>();
    exercises.sort_by(|a, b| {
        (&a.category, a.progression_level, &a.name).cmp(&(&b.category, b.progression_level, &b.name))
    });

    let mut report = String::new();
    for exercise in exercises {
        let _ = writeln!(
            report,
            "{:<12} {:>3}  {:<32} {:<12} {:>4} xp  {}",
            exercise.category.to_string(),
            exercise.progression_level.to_string(),
            exercise.name.to_string(),
            exercise.difficulty.to_string(),
            exercise.xp_value,
            exercise.unique_id
        );
    }
    report
}
