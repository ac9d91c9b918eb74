//! Assembles the import configuration of a sensor observation table.
//!
//! The wizard resolves, per resource category, which resources must be assigned to
//! measured value columns by hand (`assignment`) and merges the resolved resources
//! and their positions into an `ExportDocument` (`document`).

pub mod assignment;
pub mod document;
pub mod error;
pub mod model;
pub mod session;
pub mod settings;

#[cfg(test)]
mod test_utils;

pub use crate::error::AssemblyError;
