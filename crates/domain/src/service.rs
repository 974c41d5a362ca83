use log::{debug, error, info, warn};

use crate::{
    Exercise, ExerciseRepository, ExerciseService, ImportError, ImportOptions, ImportSummary,
    ReadError, StorageError, import,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: ExerciseRepository> ExerciseService for Service<R> {
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "get",
            "exercises"
        )
    }

    async fn count_exercises(&self) -> Result<usize, ReadError> {
        log_on_error!(
            self.repository.count_exercises(),
            ReadError,
            "count",
            "exercises"
        )
    }

    async fn import_exercises(
        &self,
        content: &[u8],
        options: ImportOptions,
    ) -> Result<ImportSummary, ImportError> {
        let result = import::import_exercises(&self.repository, content, options).await;
        match result {
            Ok(ref summary) => {
                info!(
                    "{} {} exercise rows: {} created, {} updated, {} skipped in {}",
                    if options.dry_run { "checked" } else { "imported" },
                    summary.total,
                    summary.created,
                    summary.updated,
                    summary.skipped,
                    summary.formatted_duration()
                );
                for message in &summary.errors {
                    warn!("{message}");
                }
            }
            Err(ImportError::Storage(ReadError::Storage(StorageError::NoConnection))) => {
                debug!("failed to import exercises: no connection");
            }
            Err(ref err) => {
                error!("failed to import exercises: {err}");
            }
        }
        result
    }
}
