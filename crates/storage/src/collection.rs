use kalos_domain as domain;

/// Exercise documents with unique indexes on the unique ID and on name and category.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Collection {
    exercises: Vec<domain::Exercise>,
}

impl Collection {
    pub fn new(exercises: Vec<domain::Exercise>) -> Result<Self, CollectionError> {
        let mut collection = Self::default();
        for exercise in exercises {
            if let Some(index) = collection.violated_index(&exercise, None) {
                return Err(CollectionError::Conflict(index));
            }
            collection.exercises.push(exercise);
        }
        Ok(collection)
    }

    #[must_use]
    pub fn exercises(&self) -> &[domain::Exercise] {
        &self.exercises
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// First exercise in insertion order matching the filter.
    #[must_use]
    pub fn find(&self, filter: &domain::ExerciseFilter) -> Option<&domain::Exercise> {
        self.exercises.iter().find(|e| filter.matches(e))
    }

    pub fn insert(
        &mut self,
        definition: domain::ExerciseDefinition,
    ) -> Result<domain::Exercise, CollectionError> {
        if let Some(index) = self.violated_index(&definition, None) {
            return Err(CollectionError::Conflict(index));
        }
        let exercise = domain::Exercise {
            id: domain::ExerciseID::random(),
            definition,
        };
        self.exercises.push(exercise.clone());
        Ok(exercise)
    }

    pub fn update(
        &mut self,
        id: domain::ExerciseID,
        definition: domain::ExerciseDefinition,
    ) -> Result<domain::Exercise, CollectionError> {
        if let Some(index) = self.violated_index(&definition, Some(id)) {
            return Err(CollectionError::Conflict(index));
        }
        let exercise = self
            .exercises
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(CollectionError::NotFound(id))?;
        exercise.definition = definition;
        Ok(exercise.clone())
    }

    fn violated_index(
        &self,
        definition: &domain::ExerciseDefinition,
        except: Option<domain::ExerciseID>,
    ) -> Option<&'static str> {
        self.exercises
            .iter()
            .filter(|e| Some(e.id) != except)
            .find_map(|e| {
                if e.unique_id == definition.unique_id {
                    Some(UNIQUE_ID_INDEX)
                } else if e.name == definition.name && e.category == definition.category {
                    Some(NAME_CATEGORY_INDEX)
                } else {
                    None
                }
            })
    }
}

const UNIQUE_ID_INDEX: &str = "uniqueId";
const NAME_CATEGORY_INDEX: &str = "name, category";

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CollectionError {
    #[error("duplicate key on {0}")]
    Conflict(&'static str),
    #[error("exercise {0} not found")]
    NotFound(domain::ExerciseID),
}

impl From<CollectionError> for domain::CreateError {
    fn from(value: CollectionError) -> Self {
        match value {
            CollectionError::Conflict(index) => domain::CreateError::Conflict(index.to_string()),
            err @ CollectionError::NotFound(_) => domain::CreateError::Other(err.into()),
        }
    }
}

impl From<CollectionError> for domain::UpdateError {
    fn from(value: CollectionError) -> Self {
        match value {
            CollectionError::Conflict(index) => domain::UpdateError::Conflict(index.to_string()),
            CollectionError::NotFound(_) => domain::UpdateError::NotFound,
        }
    }
}
