//! View-model error types
//!
//! Lookups by id that must succeed (tables, forms, required fields) fail fast
//! with one of these. Optional elements are checked by the caller instead.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("no table with id '{0}'")]
    UnknownTable(String),
    #[error("no query input with id '{0}'")]
    UnknownInput(String),
    #[error("no form with id '{0}'")]
    UnknownForm(String),
    #[error("form '{form}' has no field '{field}'")]
    UnknownField { form: String, field: String },
    #[error("no dropdown with id '{0}'")]
    UnknownDropdown(String),
    #[error("unrecognized submission target '{0}'")]
    UnknownRoute(String),
    #[error("no {kind} record with id {id}")]
    UnknownRecord { kind: &'static str, id: i64 },
    #[error("an item with serial '{0}' already exists")]
    DuplicateSerial(String),
}

pub type ViewResult<T> = std::result::Result<T, ViewError>;
