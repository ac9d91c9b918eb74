use failure::Fail;

use crate::model::Category;

/// This error occurs when a caller violates the contract of the assembly core.
#[derive(Debug, Fail, PartialEq)]
pub enum AssemblyError {
    #[fail(display = "Invalid state: {}", reason)]
    InvalidState { reason: String },
    #[fail(display = "Unknown resource category `{}`.", name)]
    UnknownCategory { name: String },
    #[fail(display = "{} `{}` not found in the export document.", category, identifier)]
    ResourceNotFound {
        category: Category,
        identifier: String,
    },
    #[fail(display = "Column {} is not part of the export document.", column)]
    ColumnNotFound { column: usize },
}

impl AssemblyError {
    pub fn invalid_state(reason: &str) -> Self {
        AssemblyError::InvalidState {
            reason: reason.into(),
        }
    }
}
