use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use log::{debug, warn};

use crate::{
    Category, CategoryError, CreateError, Difficulty, ExerciseDefinition, ExerciseRepository,
    Name, NameError, ProgressionLevel, ReadError, UniqueID, UniqueIDError, UpdateError,
    parse_integer, split_list,
};

pub const DELIMITER: u8 = b';';

const NAME: &str = "name";
const CATEGORY: &str = "category";
const SUBCATEGORY: &str = "subcategory";
const PROGRESSION_LEVEL: &str = "progressionLevel";
const DESCRIPTION: &str = "description";
const DIFFICULTY: &str = "difficulty";
const PRIMARY_MUSCLE_GROUP: &str = "primaryMuscleGroup";
const SECONDARY_MUSCLE_GROUPS: &str = "secondaryMuscleGroups";
const FORM_CUES: &str = "formCues";
const UNIQUE_ID: &str = "uniqueId";
const XP_VALUE: &str = "xpValue";
const UNLOCK_REQUIREMENTS: &str = "unlockRequirements";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Classify rows as created or updated without writing to the store.
    pub dry_run: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub total: usize,
    pub processed: usize,
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
    pub duration: Duration,
}

impl ImportSummary {
    /// Elapsed time in seconds with two decimals, e.g. `1.23s`.
    #[must_use]
    pub fn formatted_duration(&self) -> String {
        format!("{:.2}s", self.duration.as_secs_f64())
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.created + self.updated + self.skipped == self.processed && self.processed == self.total
    }

    fn record(&mut self, outcome: Result<RowOutcome, RowError>) {
        match outcome {
            Ok(RowOutcome::Created) => self.created += 1,
            Ok(RowOutcome::Updated) => self.updated += 1,
            Ok(RowOutcome::Skipped) => self.skipped += 1,
            Err(err) => {
                debug!("skipped row {}: {err}", self.processed);
                self.errors.push(format!("Row {}: {err}", self.processed));
                self.skipped += 1;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Created,
    Updated,
    Skipped,
}

#[derive(thiserror::Error, Debug)]
pub enum RowError {
    #[error(transparent)]
    Name(#[from] NameError),
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error(transparent)]
    UniqueID(#[from] UniqueIDError),
    #[error("failed to look up exercise: {0}")]
    Lookup(ReadError),
    #[error("failed to create exercise: {0}")]
    Create(CreateError),
    #[error("failed to update exercise: {0}")]
    Update(UpdateError),
}

/// Failure of the whole import, reported before any row is written.
#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    #[error("failed to parse exercise file: {0}")]
    Malformed(#[from] csv::Error),
    #[error("exercise file contains no rows")]
    NoRows,
    #[error("exercise store unavailable: {0}")]
    Storage(ReadError),
}

/// Imports semicolon separated exercise rows into the repository.
///
/// Rows are processed strictly in file order. A row without name or category is skipped
/// silently, every other failing row is skipped and reported in [`ImportSummary::errors`].
/// Existing exercises are matched by unique ID or by name and category and updated in place.
pub async fn import_exercises<R: ExerciseRepository>(
    repository: &R,
    content: &[u8],
    options: ImportOptions,
) -> Result<ImportSummary, ImportError> {
    let start = Instant::now();
    let table = Table::parse(content)?;

    if table.rows.is_empty() {
        return Err(ImportError::NoRows);
    }

    for column in [NAME, CATEGORY] {
        if !table.columns.contains_key(column) {
            warn!("exercise file has no \"{column}\" column, all rows will be skipped");
        }
    }

    let existing = repository
        .count_exercises()
        .await
        .map_err(ImportError::Storage)?;
    debug!(
        "importing {} rows into catalog of {existing} exercises",
        table.rows.len()
    );

    let mut summary = ImportSummary {
        total: table.rows.len(),
        ..ImportSummary::default()
    };

    for record in &table.rows {
        summary.processed += 1;
        let row = Row {
            columns: &table.columns,
            record,
        };
        summary.record(import_row(repository, &row, options).await);
    }

    summary.duration = start.elapsed();

    Ok(summary)
}

async fn import_row<R: ExerciseRepository>(
    repository: &R,
    row: &Row<'_>,
    options: ImportOptions,
) -> Result<RowOutcome, RowError> {
    let Some(definition) = row.exercise_definition()? else {
        return Ok(RowOutcome::Skipped);
    };

    let existing = repository
        .find_exercise(&definition.filter())
        .await
        .map_err(RowError::Lookup)?;

    match existing {
        Some(exercise) => {
            if !options.dry_run {
                repository
                    .update_exercise(exercise.id, definition)
                    .await
                    .map_err(RowError::Update)?;
            }
            Ok(RowOutcome::Updated)
        }
        None => {
            if !options.dry_run {
                repository
                    .create_exercise(definition)
                    .await
                    .map_err(RowError::Create)?;
            }
            Ok(RowOutcome::Created)
        }
    }
}

struct Table {
    columns: HashMap<String, usize>,
    rows: Vec<csv::StringRecord>,
}

impl Table {
    fn parse(content: &[u8]) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content);

        let columns = reader
            .headers()?
            .iter()
            .enumerate()
            .filter(|(_, header)| !header.is_empty())
            .map(|(index, header)| (header.to_string(), index))
            .collect();
        let rows = reader.records().collect::<Result<Vec<_>, _>>()?;

        Ok(Self { columns, rows })
    }
}

struct Row<'a> {
    columns: &'a HashMap<String, usize>,
    record: &'a csv::StringRecord,
}

impl Row<'_> {
    fn field(&self, column: &str) -> &str {
        self.columns
            .get(column)
            .and_then(|index| self.record.get(*index))
            .unwrap_or_default()
    }

    /// Validated and normalized exercise, or `None` if name or category are missing.
    fn exercise_definition(&self) -> Result<Option<ExerciseDefinition>, RowError> {
        let (name, category) = (self.field(NAME), self.field(CATEGORY));

        if name.is_empty() || category.is_empty() {
            return Ok(None);
        }

        let name = Name::new(name)?;
        let category = Category::new(category)?;
        let progression_level = ProgressionLevel::parse_or_first(self.field(PROGRESSION_LEVEL));
        let xp_value = parse_integer(self.field(XP_VALUE))
            .unwrap_or_else(|| progression_level.default_xp_value());
        let unique_id = match self.field(UNIQUE_ID) {
            "" => UniqueID::derive(&category, &name, progression_level),
            unique_id => UniqueID::new(unique_id)?,
        };

        Ok(Some(ExerciseDefinition {
            unique_id,
            name,
            category,
            subcategory: self.field(SUBCATEGORY).to_string(),
            progression_level,
            description: self.field(DESCRIPTION).to_string(),
            difficulty: Difficulty::from(self.field(DIFFICULTY)),
            primary_muscle_group: self.field(PRIMARY_MUSCLE_GROUP).to_string(),
            secondary_muscle_groups: split_list(self.field(SECONDARY_MUSCLE_GROUPS)),
            form_cues: split_list(self.field(FORM_CUES)),
            xp_value,
            unlock_requirements: self.field(UNLOCK_REQUIREMENTS).to_string(),
        }))
    }
}
