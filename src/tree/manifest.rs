//! Per-directory manifest files.
//!
//! A manifest lists the entries of its directory, one per line, in reading order:
//!
//! ```text
//! - intro.md: Introduction
//! - ch1: Chapter 1
//! appendix.md
//! ```
//!
//! The leading `- ` marker and the `: title` part are both optional. Blank
//! lines are skipped.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result};

const LIST_MARKER: &str = "- ";
const SEPARATOR: char = ':';
const PATH_SEPARATORS: &[char] = &['/', '\\'];

/// One parsed manifest line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub name: String,
    pub title: Option<String>,
}

/// Parse a single non-blank manifest line.
///
/// The list marker is stripped, then the line splits on the separator into a
/// name and a title. A second separator, an empty name, or a name that is not
/// a single path component (absolute, nested, `..`) is rejected with a short
/// reason.
pub fn parse_line(line: &str) -> std::result::Result<ManifestEntry, &'static str> {
    let line = line.strip_prefix(LIST_MARKER).unwrap_or(line);

    let (name, title) = match line.split_once(SEPARATOR) {
        Some((_, rest)) if rest.contains(SEPARATOR) => {
            return Err("more than one ':' separator");
        }
        Some((name, title)) => (name.trim(), Some(title.trim())),
        None => (line.trim(), None),
    };

    if name.is_empty() {
        return Err("missing entry name");
    }
    if name.contains(PATH_SEPARATORS) || name == ".." {
        return Err("entry name must be a single path component");
    }

    Ok(ManifestEntry {
        name: name.to_string(),
        title: title.filter(|t| !t.is_empty()).map(str::to_string),
    })
}

/// A directory's manifest, parsed eagerly when loaded.
///
/// An absent or unreadable manifest is not an error: it has no content and
/// no entries, and its directory contributes nothing to the tree.
#[derive(Debug)]
pub struct Manifest {
    path: PathBuf,
    content: Option<String>,
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Load and parse the manifest named `filename` inside `dir`.
    pub fn load(dir: &Path, filename: &str) -> Result<Self> {
        let path = dir.join(filename);
        let content = read_optional(&path);
        let entries = match &content {
            Some(text) => parse_entries(&path, text)?,
            None => Vec::new(),
        };

        Ok(Self {
            path,
            content,
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw manifest text, `None` when the file was absent or unreadable.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Entries in file order. Duplicates are kept.
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Entries rewritten as root-relative paths under `local_base`.
    ///
    /// This is the non-recursive view; see
    /// [`crate::tree::ContentNode::flattened_paths`] for the one that descends
    /// into subdirectories.
    pub fn local_paths(&self, local_base: &str) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| format!("{}/{}", local_base, entry.name))
            .collect()
    }
}

fn read_optional(path: &Path) -> Option<String> {
    if !path.is_file() {
        tracing::debug!("No manifest at {}", path.display());
        return None;
    }

    match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => {
            tracing::warn!("Ignoring unreadable manifest {}: {}", path.display(), e);
            None
        }
    }
}

fn parse_entries(path: &Path, text: &str) -> Result<Vec<ManifestEntry>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            parse_line(line).map_err(|reason| BuildError::ManifestParse {
                path: path.to_path_buf(),
                line: i + 1,
                content: line.to_string(),
                reason,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, title: Option<&str>) -> ManifestEntry {
        ManifestEntry {
            name: name.to_string(),
            title: title.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_line_shapes() {
        assert_eq!(
            parse_line("- intro.md: Introduction"),
            Ok(entry("intro.md", Some("Introduction")))
        );
        assert_eq!(parse_line("- ch1"), Ok(entry("ch1", None)));
        assert_eq!(parse_line("notes.md:Notes"), Ok(entry("notes.md", Some("Notes"))));
        assert_eq!(parse_line("a.md:"), Ok(entry("a.md", None)));
    }

    #[test]
    fn test_parse_line_rejects_second_separator() {
        assert_eq!(parse_line("a.md:x:y"), Err("more than one ':' separator"));
    }

    #[test]
    fn test_parse_line_rejects_empty_name() {
        assert_eq!(parse_line("- : Title"), Err("missing entry name"));
    }

    #[test]
    fn test_parse_line_rejects_names_leaving_the_directory() {
        let reason = Err("entry name must be a single path component");
        assert_eq!(parse_line("- /etc/secret.md"), reason);
        assert_eq!(parse_line("- ch1/a.md: A"), reason);
        assert_eq!(parse_line("- ch1\\a.md"), reason);
        assert_eq!(parse_line("- ../outside.md"), reason);
        assert_eq!(parse_line("- .."), reason);
    }

    #[test]
    fn test_load_skips_blank_lines_and_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("manifest"),
            "- b.md: B\n\n- a.md: A\n   \n- b.md: B again\n",
        )
        .unwrap();

        let manifest = Manifest::load(dir.path(), "manifest").unwrap();
        let names: Vec<_> = manifest.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b.md", "a.md", "b.md"]);
    }

    #[test]
    fn test_load_missing_manifest_is_empty() {
        let dir = tempfile::tempdir().unwrap();

        let manifest = Manifest::load(dir.path(), "manifest").unwrap();
        assert!(manifest.content().is_none());
        assert!(manifest.entries().is_empty());
        assert!(manifest.local_paths("/ch1").is_empty());
    }

    #[test]
    fn test_load_reports_file_and_line() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("manifest"), "- ok.md: Fine\n\n- a.md:x:y\n").unwrap();

        let err = Manifest::load(dir.path(), "manifest").unwrap_err();
        match err {
            BuildError::ManifestParse { path, line, content, .. } => {
                assert_eq!(path, dir.path().join("manifest"));
                assert_eq!(line, 3);
                assert_eq!(content, "- a.md:x:y");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_local_paths() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("manifest"), "- a.md: A\n- b.md\n").unwrap();

        let manifest = Manifest::load(dir.path(), "manifest").unwrap();
        assert_eq!(manifest.local_paths("/ch1"), vec!["/ch1/a.md", "/ch1/b.md"]);
    }
}
