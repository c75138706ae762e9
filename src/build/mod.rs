//! Building a course: resolve the tree, reset the output, mirror, index.

mod order_index;
mod transformer;

use std::path::PathBuf;

pub use order_index::{OrderIndex, Section, ORDER_INDEX_FILE};
pub use transformer::{
    check_output_root, mirror, reset_output, MirrorStats, Transform, TransformResult,
};

use crate::config::BuildConfig;
use crate::error::Result;
use crate::tree::ContentNode;

/// Summary of a finished build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub directories: usize,
    pub files: usize,
    /// Location of the order index, `None` when the course declared no sections.
    pub order_index: Option<PathBuf>,
}

/// Run a full build.
///
/// The content tree is resolved before the output root is touched, so a
/// malformed manifest or a missing entry leaves any previous output intact.
/// Once the reset has happened, a failure leaves an incomplete output tree.
pub fn build(config: &BuildConfig, transform: &mut impl Transform) -> Result<BuildReport> {
    tracing::info!("Resolving content tree at {}", config.source_root.display());
    let root = ContentNode::root(config)?;
    if root.manifest().content().is_none() {
        tracing::warn!(
            "No {} found in {}, the course is empty",
            config.manifest_filename,
            config.source_root.display()
        );
    }

    check_output_root(root.source_path(), root.output_path())?;
    tracing::info!("Resetting output root {}", config.output_root.display());
    reset_output(root.output_path())?;

    let stats = mirror(&root, transform)?;

    let order_index = OrderIndex::from_entries(root.flattened()).write(root.output_path())?;

    tracing::info!(
        "Built {} files in {} directories",
        stats.files,
        stats.directories
    );

    Ok(BuildReport {
        directories: stats.directories,
        files: stats.files,
        order_index,
    })
}
