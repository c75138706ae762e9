//! Per-section reading order, persisted as `manifest.json` under the output root.
//!
//! The document has the shape
//!
//! ```json
//! {"files": {"intro.md": [], "ch1": ["/ch1/a", "/ch1/b"]}}
//! ```
//!
//! Sections are keyed by the first segment of each flattened path and appear
//! in the order they are first declared. Every top-level entry opens a
//! section; files further down are appended to their section with the
//! extension stripped. Nested directories only shape the order and are not
//! listed themselves.

use std::fs;
use std::path::{Path, PathBuf};

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::error::{BuildError, Result};
use crate::tree::{strip_extension, FlatEntry};

/// File name of the order index inside the output root.
pub const ORDER_INDEX_FILE: &str = "manifest.json";

/// One top-level section and its ordered files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub entries: Vec<String>,
}

/// Reading order of a whole course, grouped by top-level section.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OrderIndex {
    sections: Vec<Section>,
}

impl OrderIndex {
    pub fn from_entries(entries: &[FlatEntry]) -> Self {
        let mut index = Self::default();

        for entry in entries {
            let relative = entry.path.trim_start_matches('/');
            match relative.split_once('/') {
                None => {
                    index.section_mut(relative);
                }
                Some((section, _)) if !entry.is_directory => {
                    index
                        .section_mut(section)
                        .entries
                        .push(strip_extension(&entry.path).to_string());
                }
                Some(_) => {}
            }
        }

        index
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Write the index to `<output_root>/manifest.json`.
    ///
    /// Nothing is written for an empty index; the returned path is `None` then.
    pub fn write(&self, output_root: &Path) -> Result<Option<PathBuf>> {
        if self.is_empty() {
            tracing::debug!("No sections declared, skipping order index");
            return Ok(None);
        }

        let path = output_root.join(ORDER_INDEX_FILE);
        fs::write(&path, self.to_json()?).map_err(|source| BuildError::IndexWrite {
            path: path.clone(),
            source,
        })?;

        Ok(Some(path))
    }

    fn section_mut(&mut self, name: &str) -> &mut Section {
        let position = match self.sections.iter().position(|s| s.name == name) {
            Some(position) => position,
            None => {
                self.sections.push(Section {
                    name: name.to_string(),
                    entries: Vec::new(),
                });
                self.sections.len() - 1
            }
        };
        &mut self.sections[position]
    }
}

impl Serialize for OrderIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut document = serializer.serialize_struct("OrderIndex", 1)?;
        document.serialize_field("files", &Sections(&self.sections))?;
        document.end()
    }
}

/// Serializes sections as a JSON object that keeps declaration order.
struct Sections<'a>(&'a [Section]);

impl Serialize for Sections<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for section in self.0 {
            map.serialize_entry(&section.name, &section.entries)?;
        }
        map.end()
    }
}
