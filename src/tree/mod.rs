//! The manifest-driven content tree.
//!
//! - [`EntryKind`] classifies a manifest entry against the filesystem.
//! - [`ContentFile`] is a leaf with lazily loaded content.
//! - [`Manifest`] parses a directory's ordered `(name, title)` entries.
//! - [`ContentNode`] recursively resolves a directory into ordered [`Child`]ren.

mod file;
mod manifest;
mod node;
mod path;
mod render;

pub use file::ContentFile;
pub use manifest::{parse_line, Manifest, ManifestEntry};
pub use node::{Child, ContentNode, FlatEntry, Node};
pub use path::{join_path, strip_extension, strip_path_extension, EntryKind};
pub use render::render_tree;
