//! The single directory that holds exported spreadsheets.

use std::path::{Path, PathBuf};

use crate::error::ExportError;

/// Handle to an initialized output directory.
///
/// Only [`OutputDir::init`] creates one, so holding an `OutputDir` means the
/// directory existed at startup.
#[derive(Debug, Clone)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    /// Creates `root` (and any missing parents) if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] if the directory cannot be created.
    pub fn init(root: impl Into<PathBuf>) -> Result<Self, ExportError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| ExportError::Io {
            path: root.clone(),
            source,
        })?;
        tracing::info!(path = %root.display(), "output directory ready");
        Ok(Self { root })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Resolves a bare file name to an existing file inside the directory.
    ///
    /// Names with path separators or `..`, and names that do not exist as a
    /// regular file, are all reported as [`ExportError::NotFound`] so callers
    /// cannot probe paths outside the directory.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NotFound`] as described above.
    pub fn resolve(&self, filename: &str) -> Result<PathBuf, ExportError> {
        let not_found = || ExportError::NotFound {
            filename: filename.to_owned(),
        };

        if !is_plain_file_name(filename) {
            tracing::warn!(filename, "rejected download name outside output directory");
            return Err(not_found());
        }

        let path = self.root.join(filename);
        if path.is_file() {
            Ok(path)
        } else {
            Err(not_found())
        }
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains('\0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_nested_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        let dir = OutputDir::init(&nested).unwrap();
        assert!(dir.path().is_dir());
    }

    #[test]
    fn init_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        OutputDir::init(tmp.path()).unwrap();
        OutputDir::init(tmp.path()).unwrap();
    }

    #[test]
    fn resolve_finds_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = OutputDir::init(tmp.path()).unwrap();
        std::fs::write(tmp.path().join("report.xlsx"), b"x").unwrap();

        let path = dir.resolve("report.xlsx").unwrap();
        assert_eq!(path, tmp.path().join("report.xlsx"));
    }

    #[test]
    fn resolve_missing_file_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = OutputDir::init(tmp.path()).unwrap();
        assert!(matches!(
            dir.resolve("nope.xlsx"),
            Err(ExportError::NotFound { .. })
        ));
    }

    #[test]
    fn resolve_rejects_traversal() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = OutputDir::init(tmp.path().join("out")).unwrap();
        std::fs::write(tmp.path().join("secret.txt"), b"x").unwrap();

        for name in ["../secret.txt", "..", "", "sub/file.xlsx", "..\\secret.txt"] {
            assert!(
                matches!(dir.resolve(name), Err(ExportError::NotFound { .. })),
                "expected NotFound for {name:?}"
            );
        }
    }

    #[test]
    fn resolve_rejects_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = OutputDir::init(tmp.path()).unwrap();
        std::fs::create_dir(tmp.path().join("inner")).unwrap();
        assert!(matches!(
            dir.resolve("inner"),
            Err(ExportError::NotFound { .. })
        ));
    }
}
