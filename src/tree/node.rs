use std::path::{Path, PathBuf};

use super::file::ContentFile;
use super::manifest::Manifest;
use super::path::{join_path, EntryKind};
use crate::config::BuildConfig;
use crate::error::{BuildError, Result};

/// A node of the content tree.
#[derive(Debug)]
pub enum Node {
    Directory(ContentNode),
    File(ContentFile),
}

/// A root-relative path contributed to the reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    /// `/`-separated path with a leading `/`, e.g. `/ch1/a.md`.
    pub path: String,
    pub is_directory: bool,
}

/// A manifest entry that resolved to a node.
#[derive(Debug)]
pub struct Child {
    pub name: String,
    /// Title from the manifest line, if one was given.
    pub title: Option<String>,
    pub node: Node,
}

/// A directory resolved through its manifest.
///
/// Children appear exactly in manifest order and only entries listed in the
/// manifest are visited; other files in the directory are invisible. The
/// whole subtree is built eagerly by the constructor and never changes
/// afterwards.
///
/// Files are placed under this node's output path, and child directories use
/// it as their output base, so the output tree mirrors the source tree.
#[derive(Debug)]
pub struct ContentNode {
    name: String,
    source_path: PathBuf,
    output_path: PathBuf,
    /// Path relative to the source root: `""` for the root, `/ch1` below it.
    local_path: String,
    manifest: Manifest,
    children: Vec<Child>,
    home: Option<ContentFile>,
    flattened: Vec<FlatEntry>,
}

impl ContentNode {
    /// Build the whole tree rooted at `config.source_root`.
    pub fn root(config: &BuildConfig) -> Result<Self> {
        Self::new(&config.source_root, &config.output_root, "", config)
    }

    /// Build the node for `name` inside `source_base`, mirrored into `output_base`.
    ///
    /// Fails on a malformed manifest line or a listed entry that does not
    /// exist on disk. A missing manifest or home file is not a failure.
    pub fn new(
        source_base: &Path,
        output_base: &Path,
        name: &str,
        config: &BuildConfig,
    ) -> Result<Self> {
        Self::build(source_base, output_base, name, "", config)
    }

    fn build(
        source_base: &Path,
        output_base: &Path,
        name: &str,
        parent_local_path: &str,
        config: &BuildConfig,
    ) -> Result<Self> {
        let source_path = join_path(source_base, name);
        let output_path = join_path(output_base, name);
        let local_path = if name.is_empty() {
            parent_local_path.to_string()
        } else {
            format!("{}/{}", parent_local_path, name)
        };

        let manifest = Manifest::load(&source_path, &config.manifest_filename)?;

        let mut children = Vec::with_capacity(manifest.entries().len());
        let mut flattened = Vec::new();

        for entry in manifest.entries() {
            let kind = EntryKind::classify(&source_path, &entry.name, config).ok_or_else(|| {
                BuildError::MissingEntry {
                    path: join_path(&source_path, &entry.name),
                    name: entry.name.clone(),
                }
            })?;

            let entry_path = format!("{}/{}", local_path, entry.name);
            let node = match kind {
                EntryKind::Ignorable => {
                    tracing::debug!("Skipping ignorable entry {}", entry_path);
                    continue;
                }
                EntryKind::ManifestMarker | EntryKind::HomeMarker => continue,
                EntryKind::Directory => {
                    let dir =
                        Self::build(&source_path, &output_path, &entry.name, &local_path, config)?;
                    flattened.push(FlatEntry {
                        path: entry_path,
                        is_directory: true,
                    });
                    flattened.extend(dir.flattened.iter().cloned());
                    Node::Directory(dir)
                }
                EntryKind::File => {
                    flattened.push(FlatEntry {
                        path: entry_path,
                        is_directory: false,
                    });
                    Node::File(ContentFile::new(&source_path, &output_path, &entry.name))
                }
            };

            children.push(Child {
                name: entry.name.clone(),
                title: entry.title.clone(),
                node,
            });
        }

        let home = join_path(&source_path, &config.home_filename)
            .is_file()
            .then(|| ContentFile::new(&source_path, &output_path, &config.home_filename));

        Ok(Self {
            name: name.to_string(),
            source_path,
            output_path,
            local_path,
            manifest,
            children,
            home,
            flattened,
        })
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

    pub fn local_path(&self) -> &str {
        &self.local_path
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// The optional landing page of this directory.
    pub fn home(&self) -> Option<&ContentFile> {
        self.home.as_ref()
    }

    /// Every entry of this subtree in reading order, as root-relative paths.
    ///
    /// Each directory entry is followed immediately by its own flattened entries.
    pub fn flattened(&self) -> &[FlatEntry] {
        &self.flattened
    }

    pub fn flattened_paths(&self) -> Vec<&str> {
        self.flattened.iter().map(|e| e.path.as_str()).collect()
    }
}
