#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod collection;
pub mod in_memory;
pub mod json_file;

pub use collection::{Collection, CollectionError};
pub use in_memory::InMemory;
pub use json_file::JsonFile;
