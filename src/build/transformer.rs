//! Output reset and the breadth-first mirror walk.

use std::collections::VecDeque;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

use crate::error::{BuildError, Result, TransformError};
use crate::tree::{strip_path_extension, Child, ContentNode, Node};

/// Outcome of a single [`Transform`] call.
pub type TransformResult = std::result::Result<(), TransformError>;

/// Conversion applied to every leaf file of the tree.
///
/// `output_base` is the file's output path with its extension removed. The
/// implementation picks its own extension(s) and writes whatever it produces
/// at or next to that base. It must tolerate being rerun against a freshly
/// reset output tree.
pub trait Transform {
    fn transform(&mut self, content: &str, output_base: &Path) -> TransformResult;
}

impl<F> Transform for F
where
    F: FnMut(&str, &Path) -> TransformResult,
{
    fn transform(&mut self, content: &str, output_base: &Path) -> TransformResult {
        self(content, output_base)
    }
}

/// Counts gathered while mirroring.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MirrorStats {
    pub directories: usize,
    pub files: usize,
}

/// Refuse an output root that is, or contains, the source root.
///
/// Sources are read lazily during [`mirror`], after [`reset_output`].
pub fn check_output_root(source_root: &Path, output_root: &Path) -> Result<()> {
    let (Ok(source), Ok(output)) = (fs::canonicalize(source_root), fs::canonicalize(output_root))
    else {
        return Ok(());
    };

    if source.starts_with(&output) {
        let reason = format!(
            "output root contains the source root {}",
            source_root.display()
        );
        return Err(BuildError::output_root(
            output_root,
            io::Error::new(ErrorKind::InvalidInput, reason),
        ));
    }

    Ok(())
}

/// Remove `output_root` if present and create it again, empty.
pub fn reset_output(output_root: &Path) -> Result<()> {
    match fs::remove_dir_all(output_root) {
        Ok(()) => tracing::debug!("Removed previous output {}", output_root.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(BuildError::output_root(output_root, e)),
    }

    fs::create_dir_all(output_root).map_err(|e| BuildError::output_root(output_root, e))
}

/// Recreate the directory structure of `root` under its output path and run
/// `transform` on every file.
///
/// Children are visited breadth-first. Every file is transformed exactly once,
/// after its parent's output directory exists. The output root itself must
/// already exist (see [`reset_output`]).
pub fn mirror(root: &ContentNode, transform: &mut impl Transform) -> Result<MirrorStats> {
    let mut stats = MirrorStats::default();
    let mut queue: VecDeque<&Child> = root.children().iter().collect();

    while let Some(child) = queue.pop_front() {
        match &child.node {
            Node::Directory(dir) => {
                create_output_dir(dir.output_path())?;
                stats.directories += 1;
                queue.extend(dir.children());
            }
            Node::File(file) => {
                let output_base = strip_path_extension(file.output_path());
                tracing::info!("{}", file.output_path().display());

                let content = file.content()?;
                transform
                    .transform(content, &output_base)
                    .map_err(|source| BuildError::Transform {
                        path: file.source_path().to_path_buf(),
                        source,
                    })?;
                stats.files += 1;
            }
        }
    }

    Ok(stats)
}

fn create_output_dir(path: &Path) -> Result<()> {
    fs::create_dir(path).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => BuildError::OutputCollision {
            path: path.to_path_buf(),
        },
        _ => BuildError::CreateDirectory {
            path: path.to_path_buf(),
            source: e,
        },
    })
}
