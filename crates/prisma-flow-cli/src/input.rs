//! Input record loading.
//!
//! Records are read as JSON when the file extension is `.json` and as TOML
//! otherwise. Both go through [`RawInputRecord`] so a missing or negative
//! count is reported by field name.

use std::{fs, path::Path};

use log::debug;

use prisma_flow::{InputError, InputRecord, PrismaError, record::RawInputRecord};

/// Serialization format of an input record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputFormat {
    Toml,
    Json,
}

impl InputFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Reads and validates the input record at `path`.
///
/// # Errors
///
/// Returns [`PrismaError::Io`] if the file cannot be read and
/// [`PrismaError::InvalidInput`] if it is malformed or a count is missing
/// or negative.
pub fn load_record(path: impl AsRef<Path>) -> Result<InputRecord, PrismaError> {
    let path = path.as_ref();
    let input_format = InputFormat::from_path(path);
    debug!(path = path.display().to_string(), input_format:?; "Reading input record");

    let source = fs::read_to_string(path)?;
    Ok(parse_record(&source, input_format)?)
}

fn parse_record(source: &str, format: InputFormat) -> Result<InputRecord, InputError> {
    let raw: RawInputRecord = match format {
        InputFormat::Toml => {
            toml::from_str(source).map_err(|e| InputError::Malformed(e.to_string()))?
        }
        InputFormat::Json => {
            serde_json::from_str(source).map_err(|e| InputError::Malformed(e.to_string()))?
        }
    };
    InputRecord::try_from(raw)
}
