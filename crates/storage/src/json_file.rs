use std::{
    fs,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use kalos_domain as domain;
use log::debug;
use uuid::Uuid;

use crate::{Collection, CollectionError};

/// Exercise catalog persisted as a JSON array of documents.
///
/// Every operation reads the whole file, and every write replaces it through a temporary
/// sibling file. A missing file is an empty catalog.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Collection, JsonFileError> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("{} does not exist yet", self.path.display());
                return Ok(Collection::default());
            }
            Err(err) => return Err(err.into()),
        };
        let documents: Vec<Exercise> = serde_json::from_reader(BufReader::new(file))?;
        let exercises = documents
            .into_iter()
            .map(domain::Exercise::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Collection::new(exercises)?)
    }

    fn temporary_path(&self) -> PathBuf {
        let mut temporary = self.path.clone().into_os_string();
        temporary.push(".tmp");
        PathBuf::from(temporary)
    }

    fn save(&self, collection: &Collection) -> Result<(), JsonFileError> {
        let documents = collection
            .exercises()
            .iter()
            .map(Exercise::from)
            .collect::<Vec<_>>();
        let temporary = self.temporary_path();

        if let Err(err) = write_replacing(&temporary, &self.path, &documents) {
            if let Err(remove_err) = fs::remove_file(&temporary) {
                debug!("failed to remove {}: {remove_err}", temporary.display());
            }
            return Err(err);
        }

        debug!(
            "wrote {} exercises to {}",
            documents.len(),
            self.path.display()
        );
        Ok(())
    }
}

impl domain::ExerciseRepository for JsonFile {
    async fn find_exercise(
        &self,
        filter: &domain::ExerciseFilter,
    ) -> Result<Option<domain::Exercise>, domain::ReadError> {
        Ok(self.load().map_err(storage_error)?.find(filter).cloned())
    }

    async fn create_exercise(
        &self,
        definition: domain::ExerciseDefinition,
    ) -> Result<domain::Exercise, domain::CreateError> {
        let mut collection = self.load().map_err(storage_error)?;
        let exercise = collection.insert(definition)?;
        self.save(&collection).map_err(storage_error)?;
        Ok(exercise)
    }

    async fn update_exercise(
        &self,
        id: domain::ExerciseID,
        definition: domain::ExerciseDefinition,
    ) -> Result<domain::Exercise, domain::UpdateError> {
        let mut collection = self.load().map_err(storage_error)?;
        let exercise = collection.update(id, definition)?;
        self.save(&collection).map_err(storage_error)?;
        Ok(exercise)
    }

    async fn count_exercises(&self) -> Result<usize, domain::ReadError> {
        Ok(self.load().map_err(storage_error)?.len())
    }

    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        Ok(self.load().map_err(storage_error)?.exercises().to_vec())
    }
}

fn write_replacing(
    temporary: &Path,
    path: &Path,
    documents: &[Exercise],
) -> Result<(), JsonFileError> {
    let mut writer = BufWriter::new(fs::File::create(temporary)?);
    serde_json::to_writer_pretty(&mut writer, documents)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    drop(writer);
    fs::rename(temporary, path)?;
    Ok(())
}

fn storage_error(err: JsonFileError) -> domain::StorageError {
    domain::StorageError::Other(err.into())
}

#[derive(thiserror::Error, Debug)]
pub enum JsonFileError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("invalid exercise file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid exercise document: {0}")]
    Document(#[from] DocumentError),
    #[error("inconsistent exercise file: {0}")]
    Collection(#[from] CollectionError),
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DocumentError {
    #[error(transparent)]
    Name(#[from] domain::NameError),
    #[error(transparent)]
    Category(#[from] domain::CategoryError),
    #[error(transparent)]
    UniqueID(#[from] domain::UniqueIDError),
    #[error(transparent)]
    ProgressionLevel(#[from] domain::ProgressionLevelError),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: Uuid,
    pub unique_id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    pub progression_level: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub primary_muscle_group: String,
    #[serde(default)]
    pub secondary_muscle_groups: Vec<String>,
    #[serde(default)]
    pub form_cues: Vec<String>,
    pub xp_value: i64,
    #[serde(default)]
    pub unlock_requirements: String,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            id: *value.id,
            unique_id: value.unique_id.to_string(),
            name: value.name.to_string(),
            category: value.category.to_string(),
            subcategory: value.subcategory.clone(),
            progression_level: *value.progression_level,
            description: value.description.clone(),
            difficulty: value.difficulty.to_string(),
            primary_muscle_group: value.primary_muscle_group.clone(),
            secondary_muscle_groups: value.secondary_muscle_groups.clone(),
            form_cues: value.form_cues.clone(),
            xp_value: value.xp_value,
            unlock_requirements: value.unlock_requirements.clone(),
        }
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = DocumentError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            definition: domain::ExerciseDefinition {
                unique_id: domain::UniqueID::new(&value.unique_id)?,
                name: domain::Name::new(&value.name)?,
                category: domain::Category::new(&value.category)?,
                subcategory: value.subcategory,
                progression_level: domain::ProgressionLevel::new(value.progression_level)?,
                description: value.description,
                difficulty: domain::Difficulty::from(value.difficulty.as_str()),
                primary_muscle_group: value.primary_muscle_group,
                secondary_muscle_groups: value.secondary_muscle_groups,
                form_cues: value.form_cues,
                xp_value: value.xp_value,
                unlock_requirements: value.unlock_requirements,
            },
        })
    }
}
