use std::sync::{Mutex, MutexGuard};

use kalos_domain as domain;

use crate::Collection;

/// Exercise catalog kept in process memory.
#[derive(Default)]
pub struct InMemory {
    collection: Mutex<Collection>,
}

impl InMemory {
    #[must_use]
    pub fn new(collection: Collection) -> Self {
        Self {
            collection: Mutex::new(collection),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collection>, domain::StorageError> {
        self.collection
            .lock()
            .map_err(|err| domain::StorageError::Other(err.to_string().into()))
    }
}

impl domain::ExerciseRepository for InMemory {
    async fn find_exercise(
        &self,
        filter: &domain::ExerciseFilter,
    ) -> Result<Option<domain::Exercise>, domain::ReadError> {
        Ok(self.lock()?.find(filter).cloned())
    }

    async fn create_exercise(
        &self,
        definition: domain::ExerciseDefinition,
    ) -> Result<domain::Exercise, domain::CreateError> {
        Ok(self.lock()?.insert(definition)?)
    }

    async fn update_exercise(
        &self,
        id: domain::ExerciseID,
        definition: domain::ExerciseDefinition,
    ) -> Result<domain::Exercise, domain::UpdateError> {
        Ok(self.lock()?.update(id, definition)?)
    }

    async fn count_exercises(&self) -> Result<usize, domain::ReadError> {
        Ok(self.lock()?.len())
    }

    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        Ok(self.lock()?.exercises().to_vec())
    }
}
