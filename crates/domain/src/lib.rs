#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod exercise;
pub mod import;
mod name;
mod service;

pub use error::*;
pub use exercise::*;
pub use import::{ImportError, ImportOptions, ImportSummary, RowError, RowOutcome};
pub use name::*;
pub use service::*;
