use std::fmt;

use derive_more::{AsRef, Deref, Display};
use uuid::Uuid;

use crate::{
    Category, CreateError, ImportError, ImportOptions, ImportSummary, Name, ReadError, UpdateError,
};

#[allow(async_fn_in_trait)]
pub trait ExerciseService {
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn count_exercises(&self) -> Result<usize, ReadError>;
    async fn import_exercises(
        &self,
        content: &[u8],
        options: ImportOptions,
    ) -> Result<ImportSummary, ImportError>;
}

/// Persistent exercise catalog.
///
/// The importer only relies on `find_exercise`, `create_exercise`, `update_exercise` and
/// `count_exercises`. Implementations are responsible for keeping `unique_id` and the pair of
/// `name` and `category` unique and report violations as conflicts.
#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    async fn find_exercise(&self, filter: &ExerciseFilter) -> Result<Option<Exercise>, ReadError>;
    async fn create_exercise(&self, definition: ExerciseDefinition)
    -> Result<Exercise, CreateError>;
    async fn update_exercise(
        &self,
        id: ExerciseID,
        definition: ExerciseDefinition,
    ) -> Result<Exercise, UpdateError>;
    async fn count_exercises(&self) -> Result<usize, ReadError>;
    async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
}

#[derive(Deref, Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: ExerciseID,
    #[deref]
    pub definition: ExerciseDefinition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseDefinition {
    pub unique_id: UniqueID,
    pub name: Name,
    pub category: Category,
    pub subcategory: String,
    pub progression_level: ProgressionLevel,
    pub description: String,
    pub difficulty: Difficulty,
    pub primary_muscle_group: String,
    pub secondary_muscle_groups: Vec<String>,
    pub form_cues: Vec<String>,
    pub xp_value: i64,
    pub unlock_requirements: String,
}

impl ExerciseDefinition {
    #[must_use]
    pub fn filter(&self) -> ExerciseFilter {
        ExerciseFilter {
            unique_id: self.unique_id.clone(),
            name: self.name.clone(),
            category: self.category.clone(),
        }
    }
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Stable slug identifying an exercise across repeated imports.
#[derive(AsRef, Display, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UniqueID(String);

impl UniqueID {
    pub fn new(value: &str) -> Result<Self, UniqueIDError> {
        let trimmed_value = value.trim();

        if trimmed_value.is_empty() {
            return Err(UniqueIDError::Empty);
        }

        Ok(Self(trimmed_value.to_string()))
    }

    /// Lowercased `category-name-level` with every run of characters other than ASCII letters
    /// and digits replaced by a single `-`.
    #[must_use]
    pub fn derive(category: &Category, name: &Name, progression_level: ProgressionLevel) -> Self {
        Self(slugify(&format!("{category}-{name}-{progression_level}")))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum UniqueIDError {
    #[error("Unique ID must not be empty")]
    Empty,
}

fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());

    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }

    slug.trim_matches('-').to_string()
}

#[derive(Deref, Display, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProgressionLevel(u32);

impl ProgressionLevel {
    pub const FIRST: ProgressionLevel = ProgressionLevel(1);

    pub fn new(value: u32) -> Result<Self, ProgressionLevelError> {
        if value == 0 {
            return Err(ProgressionLevelError::Zero);
        }
        Ok(Self(value))
    }

    /// Leading integer of `value`, falling back to the first level if there is none or it is
    /// not a positive number.
    #[must_use]
    pub fn parse_or_first(value: &str) -> Self {
        parse_integer(value)
            .and_then(|level| u32::try_from(level).ok())
            .and_then(|level| Self::new(level).ok())
            .unwrap_or(Self::FIRST)
    }

    #[must_use]
    pub fn default_xp_value(self) -> i64 {
        i64::from(self.0) * 10
    }
}

impl Default for ProgressionLevel {
    fn default() -> Self {
        Self::FIRST
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ProgressionLevelError {
    #[error("Progression level must be 1 or greater")]
    Zero,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Other(String),
}

impl Difficulty {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
            Difficulty::Other(value) => value,
        }
    }
}

impl From<&str> for Difficulty {
    fn from(value: &str) -> Self {
        let value = value.trim();
        match value.to_lowercase().as_str() {
            "" | "beginner" => Difficulty::Beginner,
            "intermediate" => Difficulty::Intermediate,
            "advanced" => Difficulty::Advanced,
            _ => Difficulty::Other(value.to_string()),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Matches an exercise by its unique ID or by the combination of name and category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseFilter {
    pub unique_id: UniqueID,
    pub name: Name,
    pub category: Category,
}

impl ExerciseFilter {
    #[must_use]
    pub fn matches(&self, exercise: &ExerciseDefinition) -> bool {
        exercise.unique_id == self.unique_id
            || (exercise.name == self.name && exercise.category == self.category)
    }
}

/// Splits a list field on `;`, or on `,` if the field contains no `;`.
#[must_use]
pub fn split_list(value: &str) -> Vec<String> {
    let separator = if value.contains(';') { ';' } else { ',' };
    value
        .split(separator)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Parses the leading integer of a string, ignoring anything after the digits.
#[must_use]
pub fn parse_integer(value: &str) -> Option<i64> {
    let value = value.trim();
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let magnitude = digits[..end].parse::<i64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn definition(unique_id: &str, name: &str, category: &str) -> ExerciseDefinition {
        ExerciseDefinition {
            unique_id: UniqueID::new(unique_id).unwrap(),
            name: Name::new(name).unwrap(),
            category: Category::new(category).unwrap(),
            subcategory: String::new(),
            progression_level: ProgressionLevel::FIRST,
            description: String::new(),
            difficulty: Difficulty::Beginner,
            primary_muscle_group: String::new(),
            secondary_muscle_groups: vec![],
            form_cues: vec![],
            xp_value: 10,
            unlock_requirements: String::new(),
        }
    }

    #[rstest]
    #[case("push", "Wall Push-ups", 1, "push-wall-push-ups-1")]
    #[case("core", "Hollow Body Hold", 3, "core-hollow-body-hold-3")]
    #[case("Pull", "  Australian  Pull-ups!! ", 2, "pull-australian-pull-ups-2")]
    #[case("legs", "Pistol Squat (assisted)", 4, "legs-pistol-squat-assisted-4")]
    #[case("skills", "L-Sit / Tuck", 12, "skills-l-sit-tuck-12")]
    #[case("core", "Étirement", 1, "core-tirement-1")]
    fn test_unique_id_derive(
        #[case] category: &str,
        #[case] name: &str,
        #[case] level: u32,
        #[case] expected: &str,
    ) {
        assert_eq!(
            UniqueID::derive(
                &Category::new(category).unwrap(),
                &Name::new(name).unwrap(),
                ProgressionLevel::new(level).unwrap()
            )
            .to_string(),
            expected
        );
    }

    #[rstest]
    #[case(" push-wall-1 ", Ok(UniqueID("push-wall-1".to_string())))]
    #[case("", Err(UniqueIDError::Empty))]
    #[case(&"x".repeat(129), Ok(UniqueID("x".repeat(129))))]
    fn test_unique_id_new(#[case] value: &str, #[case] expected: Result<UniqueID, UniqueIDError>) {
        assert_eq!(UniqueID::new(value), expected);
    }

    #[rstest]
    #[case("3", 3)]
    #[case(" 7 ", 7)]
    #[case("2nd", 2)]
    #[case("abc", 1)]
    #[case("", 1)]
    #[case("0", 1)]
    #[case("-4", 1)]
    #[case("99999999999", 1)]
    fn test_progression_level_parse_or_first(#[case] value: &str, #[case] expected: u32) {
        assert_eq!(*ProgressionLevel::parse_or_first(value), expected);
    }

    #[test]
    fn test_progression_level_new() {
        assert_eq!(ProgressionLevel::new(0), Err(ProgressionLevelError::Zero));
        assert_eq!(ProgressionLevel::new(5), Ok(ProgressionLevel(5)));
    }

    #[test]
    fn test_progression_level_default_xp_value() {
        assert_eq!(ProgressionLevel::FIRST.default_xp_value(), 10);
        assert_eq!(ProgressionLevel(4).default_xp_value(), 40);
        assert_eq!(
            ProgressionLevel(u32::MAX).default_xp_value(),
            42_949_672_950
        );
    }

    #[rstest]
    #[case("", Difficulty::Beginner)]
    #[case("beginner", Difficulty::Beginner)]
    #[case("Intermediate", Difficulty::Intermediate)]
    #[case(" ADVANCED ", Difficulty::Advanced)]
    #[case("Elite", Difficulty::Other("Elite".to_string()))]
    fn test_difficulty_from_str(#[case] value: &str, #[case] expected: Difficulty) {
        assert_eq!(Difficulty::from(value), expected);
    }

    #[test]
    fn test_difficulty_display() {
        assert_eq!(Difficulty::Advanced.to_string(), "advanced");
        assert_eq!(Difficulty::Other("elite".to_string()).to_string(), "elite");
    }

    #[rstest]
    #[case("a; b ;c", vec!["a", "b", "c"])]
    #[case("chest, triceps", vec!["chest", "triceps"])]
    #[case("keep elbows in; brace core, squeeze glutes", vec!["keep elbows in", "brace core, squeeze glutes"])]
    #[case(" ; ;", vec![])]
    #[case("", vec![])]
    #[case("lats", vec!["lats"])]
    fn test_split_list(#[case] value: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_list(value), expected);
    }

    #[rstest]
    #[case("42", Some(42))]
    #[case("-3", Some(-3))]
    #[case("+8", Some(8))]
    #[case("15xp", Some(15))]
    #[case("1.5", Some(1))]
    #[case("abc", None)]
    #[case("-", None)]
    #[case("", None)]
    fn test_parse_integer(#[case] value: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_integer(value), expected);
    }

    #[rstest]
    #[case::same_unique_id("push-wall-push-ups-1", "Other", "other", true)]
    #[case::same_name_and_category("other-id", "Wall Push-ups", "push", true)]
    #[case::same_name_only("other-id", "Wall Push-ups", "core", false)]
    #[case::nothing_in_common("other-id", "Plank", "core", false)]
    fn test_exercise_filter_matches(
        #[case] unique_id: &str,
        #[case] name: &str,
        #[case] category: &str,
        #[case] expected: bool,
    ) {
        let filter = definition("push-wall-push-ups-1", "Wall Push-ups", "push").filter();
        assert_eq!(
            filter.matches(&definition(unique_id, name, category)),
            expected
        );
    }

    #[test]
    fn test_exercise_deref() {
        let exercise = Exercise {
            id: 1.into(),
            definition: definition("core-plank-1", "Plank", "core"),
        };
        assert_eq!(exercise.name.to_string(), "Plank");
        assert_eq!(exercise.unique_id.to_string(), "core-plank-1");
    }

    #[test]
    fn test_exercise_id() {
        assert_eq!(*ExerciseID::from(1), Uuid::from_u128(1));
        assert_ne!(ExerciseID::random(), ExerciseID::random());
        assert!(!ExerciseID::random().is_nil());
    }
}
