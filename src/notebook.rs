//! Markdown to Jupyter notebook conversion.
//!
//! Prose becomes markdown cells and runnable fenced blocks become code cells.
//! A fence is runnable when its info string is empty or names Python; fences
//! in any other language stay inside the surrounding markdown cell. Notebooks
//! are written without outputs, so rebuilding unchanged sources produces
//! byte-identical files.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;

use crate::build::{Transform, TransformResult};

const FENCE: &str = "```";
const NOTEBOOK_EXTENSION: &str = ".ipynb";
const RUNNABLE_LANGUAGES: &[&str] = &["", "python", "python3", "py"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Markdown,
    Code,
}

impl CellKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Code => "code",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub kind: CellKind,
    pub source: String,
}

/// Split Markdown into notebook cells.
///
/// An unterminated runnable fence runs to the end of the document.
pub fn split_cells(markdown: &str) -> Vec<Cell> {
    let mut cells = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();
    let mut in_code = false;
    let mut in_foreign_fence = false;

    for line in markdown.lines() {
        let fence_info = line.trim_start().strip_prefix(FENCE).map(str::trim);

        match fence_info {
            Some(_) if in_code => {
                flush(&mut cells, &mut buffer, CellKind::Code);
                in_code = false;
            }
            Some(_) if in_foreign_fence => {
                buffer.push(line);
                in_foreign_fence = false;
            }
            Some(info) if RUNNABLE_LANGUAGES.contains(&info) => {
                flush(&mut cells, &mut buffer, CellKind::Markdown);
                in_code = true;
            }
            Some(_) => {
                buffer.push(line);
                in_foreign_fence = true;
            }
            None => buffer.push(line),
        }
    }

    let kind = if in_code {
        CellKind::Code
    } else {
        CellKind::Markdown
    };
    flush(&mut cells, &mut buffer, kind);

    cells
}

fn flush(cells: &mut Vec<Cell>, buffer: &mut Vec<&str>, kind: CellKind) {
    let source = buffer.join("\n");
    buffer.clear();

    let source = source.trim_matches('\n');
    if source.trim().is_empty() {
        return;
    }

    cells.push(Cell {
        kind,
        source: source.to_string(),
    });
}

/// Render cells as an nbformat 4 document.
pub fn to_notebook_json(cells: &[Cell]) -> serde_json::Value {
    let cells: Vec<_> = cells
        .iter()
        .map(|cell| match cell.kind {
            CellKind::Markdown => json!({
                "cell_type": cell.kind.as_str(),
                "metadata": {},
                "source": cell.source,
            }),
            CellKind::Code => json!({
                "cell_type": cell.kind.as_str(),
                "execution_count": null,
                "metadata": {},
                "outputs": [],
                "source": cell.source,
            }),
        })
        .collect();

    json!({
        "cells": cells,
        "metadata": {
            "kernelspec": {
                "display_name": "Python 3",
                "language": "python",
                "name": "python3",
            },
            "language_info": { "name": "python" },
        },
        "nbformat": 4,
        "nbformat_minor": 4,
    })
}

/// Path of the notebook written for `output_base`.
pub fn notebook_path(output_base: &Path) -> PathBuf {
    let mut path = OsString::from(output_base.as_os_str());
    path.push(NOTEBOOK_EXTENSION);
    PathBuf::from(path)
}

/// [`Transform`] writing `<output_base>.ipynb` for each Markdown source.
#[derive(Debug, Default, Clone, Copy)]
pub struct NotebookTransform;

impl Transform for NotebookTransform {
    fn transform(&mut self, content: &str, output_base: &Path) -> TransformResult {
        let notebook = to_notebook_json(&split_cells(content));
        let path = notebook_path(output_base);
        fs::write(&path, serde_json::to_string_pretty(&notebook)?)?;
        tracing::debug!("Wrote notebook {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markdown(source: &str) -> Cell {
        Cell {
            kind: CellKind::Markdown,
            source: source.to_string(),
        }
    }

    fn code(source: &str) -> Cell {
        Cell {
            kind: CellKind::Code,
            source: source.to_string(),
        }
    }

    #[test]
    fn test_prose_only() {
        assert_eq!(split_cells("# Title\n\nSome text.\n"), vec![markdown("# Title\n\nSome text.")]);
    }

    #[test]
    fn test_python_fence_becomes_code_cell() {
        let cells = split_cells("# Lists\n\n```python\nxs = [1, 2]\nprint(xs)\n```\n\nDone.\n");
        assert_eq!(
            cells,
            vec![
                markdown("# Lists"),
                code("xs = [1, 2]\nprint(xs)"),
                markdown("Done."),
            ]
        );
    }

    #[test]
    fn test_untagged_fence_is_runnable() {
        assert_eq!(split_cells("```\n1 + 1\n```"), vec![code("1 + 1")]);
    }

    #[test]
    fn test_other_languages_stay_in_markdown() {
        let source = "Install it:\n\n```bash\npip install numpy\n```\n\nThen run.";
        assert_eq!(split_cells(source), vec![markdown(source)]);
    }

    #[test]
    fn test_unterminated_fence_runs_to_end() {
        assert_eq!(
            split_cells("Intro\n```python\nx = 1"),
            vec![markdown("Intro"), code("x = 1")]
        );
    }

    #[test]
    fn test_notebook_json_shape() {
        let notebook = to_notebook_json(&[markdown("# T"), code("x = 1")]);

        assert_eq!(notebook["nbformat_minor"], 4);
        assert!(notebook["cells"][0].get("id").is_none());
        assert_eq!(notebook["nbformat"], 4);
        assert_eq!(notebook["cells"][0]["cell_type"], "markdown");
        assert_eq!(notebook["cells"][1]["cell_type"], "code");
        assert_eq!(notebook["cells"][1]["source"], "x = 1");
        assert_eq!(notebook["cells"][1]["outputs"], json!([]));
    }

    #[test]
    fn test_transform_writes_notebook_next_to_base() {
        let out = tempfile::tempdir().unwrap();
        let base = out.path().join("intro");

        NotebookTransform.transform("# Intro", &base).unwrap();

        let written = fs::read_to_string(out.path().join("intro.ipynb")).unwrap();
        let notebook: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(notebook["cells"][0]["source"], "# Intro");
    }
}
