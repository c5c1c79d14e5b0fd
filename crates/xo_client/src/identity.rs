//! The local identity file: one line holding the session id.

use crate::IdentityError;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{error, info, instrument};

/// Reads (and if needed creates) the file holding the local session id.
#[derive(Debug, Clone)]
pub struct IdentityFile {
    path: PathBuf,
}

impl IdentityFile {
    /// Creates a handle for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the session id. A missing or blank file is an error.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<String, IdentityError> {
        let content = std::fs::read_to_string(&self.path)?;
        let session_id = content.trim();
        if session_id.is_empty() {
            error!("Identity file is empty");
            return Err(IdentityError::missing(format!(
                "no session id in {}",
                self.path.display()
            )));
        }
        Ok(session_id.to_string())
    }

    /// Reads the session id, first asking for one if the file is absent.
    #[instrument(skip(self, input, output), fields(path = %self.path.display()))]
    pub fn load_or_create<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<String, IdentityError> {
        if !self.path.exists() {
            info!("Identity file not found, asking for a session id");
            write!(output, "Enter your session id: ")?;
            output.flush()?;

            let mut line = String::new();
            input.read_line(&mut line)?;
            let session_id = line.trim();
            if session_id.is_empty() {
                return Err(IdentityError::missing("no session id entered"));
            }
            std::fs::write(&self.path, session_id)?;
            info!("Identity file created");
        }
        self.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IdentityErrorKind;

    #[test]
    fn test_load_trims_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".user");
        std::fs::write(&path, "  abc-123\n").unwrap();
        assert_eq!(IdentityFile::new(&path).load().unwrap(), "abc-123");
    }

    #[test]
    fn test_blank_file_is_missing_identity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".user");
        std::fs::write(&path, "\n").unwrap();
        let err = IdentityFile::new(&path).load().unwrap_err();
        assert_eq!(err.kind, IdentityErrorKind::Missing);
    }

    #[test]
    fn test_creates_file_from_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".user");
        let mut input = "player-7\n".as_bytes();
        let mut output = Vec::new();

        let id = IdentityFile::new(&path)
            .load_or_create(&mut input, &mut output)
            .unwrap();
        assert_eq!(id, "player-7");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "player-7");
        assert!(String::from_utf8(output).unwrap().contains("session id"));
    }

    #[test]
    fn test_empty_prompt_answer_is_missing_identity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".user");
        let mut input = "\n".as_bytes();
        let err = IdentityFile::new(&path)
            .load_or_create(&mut input, &mut Vec::new())
            .unwrap_err();
        assert_eq!(err.kind, IdentityErrorKind::Missing);
        assert!(!path.exists());
    }
}
