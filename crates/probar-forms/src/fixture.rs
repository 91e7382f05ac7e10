//! Sample files for the file-input checks.
//!
//! Two opaque binary files are uploaded: one for the single-file check and
//! both for the multiple-file check. Their contents are never inspected.

use crate::result::{FormsError, FormsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the fixture directory
pub const FIXTURE_DIR_ENV: &str = "PROBAR_FORMS_FIXTURES";

/// Location and names of the sample upload files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureFiles {
    /// Directory holding the samples
    pub dir: PathBuf,
    /// File used for the single-file check
    pub first: String,
    /// Second file for the multiple-file check
    pub second: String,
}

impl Default for FixtureFiles {
    fn default() -> Self {
        Self {
            dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures"),
            first: "sample-1.webp".to_string(),
            second: "sample-2.jpg".to_string(),
        }
    }
}

impl FixtureFiles {
    /// Samples in another directory, same file names
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    /// Replace the directory with `$PROBAR_FORMS_FIXTURES` when set
    #[must_use]
    pub fn with_env_override(mut self) -> Self {
        if let Some(dir) = std::env::var_os(FIXTURE_DIR_ENV) {
            self.dir = PathBuf::from(dir);
        }
        self
    }

    /// Resolve both files, checking they exist
    ///
    /// # Errors
    ///
    /// Returns [`FormsError::FixtureError`] naming the first missing file.
    pub fn resolve(&self) -> FormsResult<[PathBuf; 2]> {
        let first = self.dir.join(&self.first);
        let second = self.dir.join(&self.second);
        for path in [&first, &second] {
            if !path.is_file() {
                return Err(FormsError::FixtureError {
                    message: format!("sample file not found: {}", path.display()),
                });
            }
        }
        Ok([first, second])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_samples_resolve() {
        let [first, second] = FixtureFiles::default().resolve().unwrap();
        assert!(first.ends_with("sample-1.webp"));
        assert!(second.ends_with("sample-2.jpg"));
    }

    #[test]
    fn test_bundled_samples_are_images() {
        let [first, second] = FixtureFiles::default().resolve().unwrap();
        let webp = std::fs::read(first).unwrap();
        assert_eq!(&webp[..4], b"RIFF");
        assert_eq!(&webp[8..12], b"WEBP");
        let jpeg = std::fs::read(second).unwrap();
        assert_eq!(&jpeg[..3], &[0xFF, 0xD8, 0xFF]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_custom_dir() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("sample-1.webp"), b"a").unwrap();
        std::fs::write(tmp.path().join("sample-2.jpg"), b"b").unwrap();

        let files = FixtureFiles::in_dir(tmp.path());
        let [first, _] = files.resolve().unwrap();
        assert_eq!(first.parent(), Some(tmp.path()));
    }

    #[test]
    fn test_missing_file_is_fixture_error() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("sample-1.webp"), b"a").unwrap();

        let err = FixtureFiles::in_dir(tmp.path()).resolve().unwrap_err();
        assert!(matches!(err, FormsError::FixtureError { .. }));
        assert!(err.to_string().contains("sample-2.jpg"));
    }
}
