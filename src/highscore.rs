use crate::util::error_chain;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Somewhere to keep the high score between runs of the program
pub(crate) trait HighScoreStore {
    /// Return the stored high score, or 0 if there is none or it cannot be
    /// read.
    fn load(&mut self) -> u32;

    /// Replace the stored high score with `score`
    fn save(&mut self, score: u32) -> Result<(), SaveError>;
}

/// A high score stored as a decimal integer in a plain text file
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub(crate) fn new(path: PathBuf) -> HighScoreFile {
        HighScoreFile { path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Read the high score from disk.  A missing file counts as a score of 0.
    pub(crate) fn read(&self) -> Result<u32, LoadError> {
        let src = match fs_err::read_to_string(&self.path) {
            Ok(src) => src,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(LoadError::read(e)),
        };
        parse_score(&src).ok_or_else(|| LoadError::malformed(src))
    }

    /// Write `score` to a temporary file beside the high score file, then
    /// rename it over the top.
    pub(crate) fn write(&self, score: u32) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs_err::write(&tmp, score.to_string()).map_err(SaveError::write)?;
        fs_err::rename(&tmp, &self.path).map_err(SaveError::rename)?;
        Ok(())
    }
}

impl HighScoreStore for HighScoreFile {
    fn load(&mut self) -> u32 {
        match self.read() {
            Ok(score) => {
                tracing::debug!(path = %self.path.display(), score, "loaded high score");
                score
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %error_chain(&e),
                    "ignoring unusable high score file"
                );
                0
            }
        }
    }

    fn save(&mut self, score: u32) -> Result<(), SaveError> {
        self.write(score)?;
        tracing::debug!(path = %self.path.display(), score, "saved high score");
        Ok(())
    }
}

/// Parse the contents of a high score file.  Only a run of ASCII digits,
/// optionally surrounded by whitespace, is accepted.
fn parse_score(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
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

    fn rename(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Rename(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to write high score to temporary file")]
    Write(#[source] std::io::Error),
    #[error("failed to move temporary file into place")]
    Rename(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read high score from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn malformed(content: String) -> Self {
        LoadError(LoadErrorSource::Malformed(content))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read high score file")]
    Read(#[source] std::io::Error),
    #[error("high score file does not contain a non-negative integer: {0:?}")]
    Malformed(String),
}
