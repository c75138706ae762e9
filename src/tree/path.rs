//! Path joining and directory entry classification.

use std::path::{Path, PathBuf};

use crate::config::BuildConfig;

/// Prefix marking an entry as invisible to the builder.
const IGNORABLE_PREFIX: char = '.';

/// What a manifest entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Ignorable,
    ManifestMarker,
    HomeMarker,
    Directory,
    File,
}

impl EntryKind {
    /// Classify `name` inside `base`.
    ///
    /// Name checks run before any filesystem inspection, in the order
    /// ignorable, manifest marker, home marker, directory, file. Returns `None`
    /// when the path is neither a directory nor a regular file (missing entry,
    /// dangling symlink).
    pub fn classify(base: &Path, name: &str, config: &BuildConfig) -> Option<Self> {
        if name.starts_with(IGNORABLE_PREFIX) {
            return Some(Self::Ignorable);
        }
        if name == config.manifest_filename {
            return Some(Self::ManifestMarker);
        }
        if name == config.home_filename {
            return Some(Self::HomeMarker);
        }

        let path = join_path(base, name);
        if path.is_dir() {
            Some(Self::Directory)
        } else if path.is_file() {
            Some(Self::File)
        } else {
            None
        }
    }
}

/// Join `name` onto `base`, returning `base` unchanged for an empty name (the root).
pub fn join_path(base: &Path, name: &str) -> PathBuf {
    if name.is_empty() {
        base.to_path_buf()
    } else {
        base.join(name)
    }
}

/// Remove the last dot-delimited segment of the final path component.
///
/// `a/b.c.md` becomes `a/b.c`; a file name without a dot is returned unchanged,
/// as is a path whose only dots sit in parent directories.
pub fn strip_extension(path: &str) -> &str {
    let file_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[file_start..].rfind('.') {
        Some(dot) => &path[..file_start + dot],
        None => path,
    }
}

/// [`strip_extension`] for filesystem paths. Non-UTF-8 components are kept as is.
pub fn strip_path_extension(path: &Path) -> PathBuf {
    path.with_extension("")
}
