use crate::high_score::HighScoreStore;
use crate::options::Options;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Options in effect when the program starts
    #[serde(default)]
    pub(crate) options: Options,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Read configuration from the default configuration file.  A missing
    /// file, or no local configuration directory at all, yields the default
    /// configuration.
    pub(crate) fn load_default() -> Result<Config, ConfigError> {
        Config::load_from_dir(dirs::config_local_dir().as_deref())
    }

    fn load_from_dir(config_dir: Option<&Path>) -> Result<Config, ConfigError> {
        match config_dir {
            Some(dir) => Config::load(&dir.join("snakerun").join("config.toml"), true),
            None => Ok(Config::default()),
        }
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return where the high score should be kept: the file given in the
    /// configuration or, if that is not set, the default high score file.
    ///
    /// If `self.files.save_high_score` is `false`, a disabled store is
    /// returned.  A disabled store is also returned, along with an error
    /// describing why, if no path is configured and the default path could
    /// not be computed.
    pub(crate) fn high_score_store(&self) -> (HighScoreStore, Option<ConfigError>) {
        if !self.files.save_high_score {
            return (HighScoreStore::Disabled, None);
        }
        match self
            .files
            .high_score_file
            .clone()
            .or_else(HighScoreStore::default_path)
        {
            Some(p) => (HighScoreStore::File(p), None),
            None => (HighScoreStore::Disabled, Some(ConfigError::NoDataPath)),
        }
    }

    /// Return the file to which log messages should be written: the file
    /// given in the configuration or, if that is not set, a file in the local
    /// data directory.
    pub(crate) fn log_file(&self) -> Option<PathBuf> {
        self.files
            .log_file
            .clone()
            .or_else(|| dirs::data_local_dir().map(|p| p.join("snakerun").join("snakerun.log")))
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which the high score should be stored
    pub(crate) high_score_file: Option<PathBuf>,

    /// Whether to load & save the high score in a file
    pub(crate) save_high_score: bool,

    /// Path to which log messages should be appended
    pub(crate) log_file: Option<PathBuf>,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            high_score_file: None,
            save_high_score: true,
            log_file: None,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local data directory")]
    NoDataPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Difficulty;
    use tempfile::tempdir;

    #[test]
    fn parse_full() {
        let config = toml::from_str::<Config>(concat!(
            "[options]\n",
            "difficulty = \"hard\"\n",
            "show-grid = true\n",
            "\n",
            "[files]\n",
            "high-score-file = \"/tmp/snake/high-score\"\n",
            "save-high-score = true\n",
            "log-file = \"/tmp/snake/log\"\n",
        ))
        .unwrap();
        assert_eq!(
            config,
            Config {
                options: Options {
                    difficulty: Difficulty::Hard,
                    show_grid: true,
                },
                files: FileConfig {
                    high_score_file: Some(PathBuf::from("/tmp/snake/high-score")),
                    save_high_score: true,
                    log_file: Some(PathBuf::from("/tmp/snake/log")),
                },
            }
        );
        assert_eq!(
            config.high_score_store().0,
            HighScoreStore::File(PathBuf::from("/tmp/snake/high-score"))
        );
        assert_eq!(config.log_file(), Some(PathBuf::from("/tmp/snake/log")));
    }

    #[test]
    fn parse_empty() {
        assert_eq!(toml::from_str::<Config>("").unwrap(), Config::default());
    }

    #[test]
    fn disabled_high_score() {
        let config = toml::from_str::<Config>("[files]\nsave-high-score = false\n").unwrap();
        let (store, err) = config.high_score_store();
        assert_eq!(store, HighScoreStore::Disabled);
        assert!(err.is_none());
    }

    #[test]
    fn bad_difficulty() {
        let r = toml::from_str::<Config>("[options]\ndifficulty = \"nightmare\"\n");
        assert!(r.is_err());
    }

    #[test]
    fn load_missing_allowed() {
        let tmpdir = tempdir().unwrap();
        let config = Config::load(&tmpdir.path().join("config.toml"), true).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_missing_disallowed() {
        let tmpdir = tempdir().unwrap();
        let r = Config::load(&tmpdir.path().join("config.toml"), false);
        assert!(matches!(r, Err(ConfigError::Read(_))));
    }

    #[test]
    fn load_default_without_config_dir() {
        assert_eq!(Config::load_from_dir(None).unwrap(), Config::default());
    }

    #[test]
    fn load_default_from_config_dir() {
        let tmpdir = tempdir().unwrap();
        assert_eq!(
            Config::load_from_dir(Some(tmpdir.path())).unwrap(),
            Config::default()
        );
        let path = tmpdir.path().join("snakerun").join("config.toml");
        fs_err::create_dir_all(path.parent().unwrap()).unwrap();
        fs_err::write(&path, "[options]\ndifficulty = \"easy\"\n").unwrap();
        let config = Config::load_from_dir(Some(tmpdir.path())).unwrap();
        assert_eq!(config.options.difficulty, Difficulty::Easy);
    }

    #[test]
    fn load_invalid() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        fs_err::write(&path, "[options\n").unwrap();
        assert!(matches!(
            Config::load(&path, true),
            Err(ConfigError::Parse(_))
        ));
    }
}
