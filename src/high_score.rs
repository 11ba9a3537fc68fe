use std::path::{Path, PathBuf};
use thiserror::Error;

/// The name of the file, within the program's data directory, in which the
/// high score is stored
pub(crate) const HIGH_SCORE_KEY: &str = "high-score";

/// Where the high score is kept between sessions.  The score is stored as
/// decimal text followed by a newline.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum HighScoreStore {
    /// The high score is kept in the given file
    File(PathBuf),

    /// The high score is not persisted
    Disabled,
}

impl HighScoreStore {
    /// Return the default high score file path
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("snakerun").join(HIGH_SCORE_KEY))
    }

    pub(crate) fn path(&self) -> Option<&Path> {
        match self {
            HighScoreStore::File(p) => Some(p),
            HighScoreStore::Disabled => None,
        }
    }

    pub(crate) fn load(&self) -> Result<u32, LoadError> {
        let HighScoreStore::File(path) = self else {
            return Ok(0);
        };
        let src = match fs_err::read_to_string(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(LoadError::missing()),
            Err(e) => return Err(LoadError::read(e)),
        };
        src.trim().parse::<u32>().map_err(LoadError::parse)
    }

    pub(crate) fn save(&self, score: u32) -> Result<(), SaveError> {
        let HighScoreStore::File(path) = self else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        fs_err::write(path, format!("{score}\n")).map_err(SaveError::write)?;
        Ok(())
    }
}

#[derive(Debug, Error)]
#[error("Failed to save high score to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to write high score file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read high score from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn missing() -> Self {
        LoadError(LoadErrorSource::Missing)
    }

    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn parse(e: std::num::ParseIntError) -> Self {
        LoadError(LoadErrorSource::Parse(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("no high score has been recorded yet")]
    Missing,
    #[error("failed to read high score file")]
    Read(#[source] std::io::Error),
    #[error("high score file does not contain a decimal integer")]
    Parse(#[source] std::num::ParseIntError),
}
