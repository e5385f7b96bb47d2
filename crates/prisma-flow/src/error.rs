//! Error types for PRISMA flow operations.
//!
//! This module provides the main error type [`PrismaError`], with one variant
//! per processing phase: input validation, layout configuration and
//! rendering.

use std::io;

use thiserror::Error;

use crate::{export::RenderError, record::Field};

/// The main error type for PRISMA flow operations.
#[derive(Debug, Error)]
pub enum PrismaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// A rejected input record.
///
/// Counts are never coerced: a missing or negative value is reported by
/// field name before any layout happens.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("missing field `{0}`")]
    Missing(Field),

    #[error("field `{field}` must be a non-negative integer, got {value}")]
    Negative { field: Field, value: i128 },

    #[error("{0}")]
    Malformed(String),
}
