//! Locating and reading the TOML configuration file.
//!
//! An explicit `--config` path always wins and must exist. Without one the
//! first existing file among `./prisma-flow/config.toml` and the platform
//! configuration directory is used, and built-in defaults apply when
//! neither exists.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use prisma_flow::{PrismaError, config::AppConfig};

const LOCAL_CONFIG: &str = "prisma-flow/config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for PrismaError {
    fn from(err: ConfigError) -> Self {
        let kind = match err {
            ConfigError::Parse { .. } => io::ErrorKind::InvalidData,
            ConfigError::MissingFile(_) => io::ErrorKind::NotFound,
        };
        PrismaError::Io(io::Error::new(kind, err.to_string()))
    }
}

/// Places searched, in order, when no explicit path is given.
fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
    match ProjectDirs::from("com", "prisma-flow", "prisma-flow") {
        Some(dirs) => paths.push(dirs.config_dir().join("config.toml")),
        None => debug!("No platform configuration directory"),
    }
    paths
}

/// Loads the configuration, falling back to [`AppConfig::default`].
///
/// # Errors
///
/// Fails if `explicit_path` names a file that does not exist, or if the
/// chosen file is not a valid configuration.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, PrismaError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::MissingFile(path.to_path_buf()).into());
        }
        return read_config(path);
    }

    match search_paths().into_iter().find(|path| path.is_file()) {
        Some(path) => read_config(&path),
        None => {
            debug!("No configuration file found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

fn read_config(path: &Path) -> Result<AppConfig, PrismaError> {
    info!(path:% = path.display(); "Loading configuration");
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|err| {
        ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_explicit_config_is_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[style]\ntitle = \"Review\"\n\n[render]\nscale = 2.0\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.style().title(), Some("Review"));
        assert_eq!(config.render().scale(), 2.0);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = tempdir().unwrap();
        let err = load_config(Some(dir.path().join("absent.toml"))).unwrap_err();
        match err {
            PrismaError::Io(io_err) => assert_eq!(io_err.kind(), io::ErrorKind::NotFound),
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_config_names_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[canvas]\nwidth = \"wide\"\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err().to_string();
        assert!(err.contains("Failed to parse TOML configuration"));
        assert!(err.contains("broken.toml"));
    }

    #[test]
    fn test_search_starts_with_local_file() {
        assert_eq!(search_paths()[0], Path::new(LOCAL_CONFIG));
    }
}
