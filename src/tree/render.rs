//! ASCII tree rendering for resolved content trees.

use super::node::{Child, ContentNode, Node};

const DIRECTORY: char = '▸';
const FILE: char = '•';
const HOME: char = '⌂';

/// Render a content tree as ASCII art.
///
/// Example output:
/// ```text
/// content
/// ├── • intro.md (Introduction)
/// └── ▸ ch1 (Chapter 1)
///     ├── ⌂ home.md
///     └── • a.md (A)
/// ```
pub fn render_tree(root: &ContentNode) -> String {
    let mut output = String::new();
    output.push_str(&root.source_path().display().to_string());
    output.push('\n');
    render_children(&mut output, root, "");
    output
}

fn render_children(output: &mut String, node: &ContentNode, prefix: &str) {
    let home_line = node.home().map(|home| home.name().to_string());
    let count = node.children().len() + usize::from(home_line.is_some());

    let mut index = 0;
    if let Some(name) = home_line {
        index += 1;
        push_line(output, prefix, index == count, HOME, &name, None);
    }

    for child in node.children() {
        index += 1;
        render_child(output, child, prefix, index == count);
    }
}

fn render_child(output: &mut String, child: &Child, prefix: &str, is_last: bool) {
    let symbol = match child.node {
        Node::Directory(_) => DIRECTORY,
        Node::File(_) => FILE,
    };
    push_line(output, prefix, is_last, symbol, &child.name, child.title.as_deref());

    if let Node::Directory(dir) = &child.node {
        let continuation = if is_last { "    " } else { "│   " };
        render_children(output, dir, &format!("{}{}", prefix, continuation));
    }
}

fn push_line(
    output: &mut String,
    prefix: &str,
    is_last: bool,
    symbol: char,
    name: &str,
    title: Option<&str>,
) {
    let branch = if is_last { "└── " } else { "├── " };
    output.push_str(prefix);
    output.push_str(branch);
    output.push(symbol);
    output.push(' ');
    output.push_str(name);
    if let Some(title) = title {
        output.push_str(" (");
        output.push_str(title);
        output.push(')');
    }
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConfig;
    use std::fs;
    use std::path::Path;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_empty_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = ContentNode::root(&BuildConfig::new(dir.path(), "out")).unwrap();

        let output = render_tree(&root);
        assert_eq!(output, format!("{}\n", dir.path().display()));
    }

    #[test]
    fn test_nested_children() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path();
        write(&src.join("manifest"), "- intro.md: Introduction\n- ch1: Chapter 1\n");
        write(&src.join("intro.md"), "# Intro");
        write(&src.join("ch1/manifest"), "- a.md: A\n- b.md\n");
        write(&src.join("ch1/home.md"), "# Chapter 1");
        write(&src.join("ch1/a.md"), "a");
        write(&src.join("ch1/b.md"), "b");

        let root = ContentNode::root(&BuildConfig::new(src, "out")).unwrap();
        let output = render_tree(&root);
        let expected = format!(
            "{}\n├── • intro.md (Introduction)\n└── ▸ ch1 (Chapter 1)\n    ├── ⌂ home.md\n    ├── • a.md (A)\n    └── • b.md\n",
            src.display()
        );
        assert_eq!(output, expected);
    }
}
