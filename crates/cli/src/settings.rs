use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::LevelFilter;

pub const DEFAULT_STORE: &str = "kalos-exercises.json";

#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub store: PathBuf,
    pub log_level: LogLevel,
}

impl Settings {
    /// Reads settings from a JSON file, falling back to the defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
            Err(source) => Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store: PathBuf::from(DEFAULT_STORE),
            log_level: LogLevel::Info,
        }
    }
}

#[derive(serde::Deserialize, clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings from {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid settings in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn write_settings(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kalos.json");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(
            Settings::load(&dir.path().join("kalos.json")).unwrap(),
            Settings::default()
        );
    }

    #[test]
    fn test_load() {
        let (_dir, path) = write_settings(r#"{ "store": "/var/lib/kalos/exercises.json", "log_level": "debug" }"#);

        assert_eq!(
            Settings::load(&path).unwrap(),
            Settings {
                store: PathBuf::from("/var/lib/kalos/exercises.json"),
                log_level: LogLevel::Debug,
            }
        );
    }

    #[test]
    fn test_load_partial() {
        let (_dir, path) = write_settings(r#"{ "log_level": "warn" }"#);

        assert_eq!(
            Settings::load(&path).unwrap(),
            Settings {
                store: PathBuf::from(DEFAULT_STORE),
                log_level: LogLevel::Warn,
            }
        );
    }

    #[rstest]
    #[case::unknown_key(r#"{ "database": "exercises.json" }"#)]
    #[case::unknown_level(r#"{ "log_level": "verbose" }"#)]
    #[case::not_json("store = 'exercises.json'")]
    fn test_load_invalid(#[case] content: &str) {
        let (_dir, path) = write_settings(content);

        assert!(matches!(
            Settings::load(&path),
            Err(SettingsError::Parse { .. })
        ));
    }

    #[test]
    fn test_log_level_into_level_filter() {
        assert_eq!(LevelFilter::from(LogLevel::Off), LevelFilter::Off);
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::Trace);
    }
}
