use std::fs;
use std::path::{Path, PathBuf};

use once_cell::unsync::OnceCell;

use super::path::join_path;
use crate::error::{BuildError, Result};

/// A leaf source file.
///
/// Content is read from disk on first access and cached for the lifetime of
/// the file; later calls never touch the filesystem again.
#[derive(Debug)]
pub struct ContentFile {
    name: String,
    source_path: PathBuf,
    output_path: PathBuf,
    content: OnceCell<String>,
}

impl ContentFile {
    /// Resolve `name` inside `source_base` and `output_base`. Nothing is read yet.
    pub fn new(source_base: &Path, output_base: &Path, name: &str) -> Self {
        Self {
            name: name.to_string(),
            source_path: join_path(source_base, name),
            output_path: join_path(output_base, name),
            content: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// The file's text, loaded at most once.
    pub fn content(&self) -> Result<&str> {
        self.content
            .get_or_try_init(|| {
                fs::read_to_string(&self.source_path)
                    .map_err(|e| BuildError::file_read(&self.source_path, e))
            })
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_is_read_once() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.md"), "first").unwrap();

        let file = ContentFile::new(dir.path(), Path::new("out"), "a.md");
        assert_eq!(file.content().unwrap(), "first");

        fs::write(dir.path().join("a.md"), "second").unwrap();
        assert_eq!(file.content().unwrap(), "first");
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = ContentFile::new(dir.path(), Path::new("out"), "gone.md");

        assert!(matches!(file.content(), Err(BuildError::FileRead { .. })));
        assert_eq!(file.output_path(), Path::new("out/gone.md"));
    }
}
