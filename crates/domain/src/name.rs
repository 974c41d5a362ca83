use derive_more::{AsRef, Display};

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(String);

impl Name {
    pub fn new(name: &str) -> Result<Self, NameError> {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return Err(NameError::Empty);
        }

        Ok(Name(trimmed_name.to_string()))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
}

/// Group an exercise belongs to, e.g. "push" or "core".
///
/// Categories are compared exactly as written, so "Push" and "push" are different groups.
#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Category(String);

impl Category {
    pub fn new(category: &str) -> Result<Self, CategoryError> {
        let trimmed_category = category.trim();

        if trimmed_category.is_empty() {
            return Err(CategoryError::Empty);
        }

        Ok(Category(trimmed_category.to_string()))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CategoryError {
    #[error("Category must not be empty")]
    Empty,
}
