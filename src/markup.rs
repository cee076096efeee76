//! Node document title extraction
//!
//! The title of a node is the text of the first heading in its `README.md`,
//! found with the tree-sitter markdown block grammar. ATX (`# Title`) and
//! setext (`Title` / `===`) headings both count; any level is accepted.

use std::fs;
use std::path::Path;

use tree_sitter::{Node, Parser};

use crate::error::{KegError, Result};

/// File name of the document inside every node directory.
pub const NODE_DOC: &str = "README.md";

/// Read the title of the node at `node_dir`.
///
/// Returns an empty string when the document has no heading.
pub fn read_title(node_dir: &Path) -> Result<String> {
    let source = fs::read_to_string(node_dir.join(NODE_DOC))?;
    title_of(&source)
}

/// Title of a markdown document: its first heading, whitespace collapsed.
pub fn title_of(source: &str) -> Result<String> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_md::LANGUAGE.into())
        .map_err(|e| KegError::ParseFailure {
            message: format!("Failed to set markdown language: {:?}", e),
        })?;
    let Some(tree) = parser.parse(source, None) else {
        return Ok(String::new());
    };

    let Some(heading) = first_heading(tree.root_node()) else {
        return Ok(String::new());
    };
    let content = heading
        .child_by_field_name("heading_content")
        .or_else(|| find_kind(heading, &["inline", "paragraph"]));
    let text = content
        .and_then(|n| n.utf8_text(source.as_bytes()).ok())
        .unwrap_or_default();

    Ok(text.split_whitespace().collect::<Vec<_>>().join(" "))
}

fn first_heading(node: Node<'_>) -> Option<Node<'_>> {
    if matches!(node.kind(), "atx_heading" | "setext_heading") {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_heading)
}

fn find_kind<'a>(node: Node<'a>, kinds: &[&str]) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|c| kinds.contains(&c.kind()));
    found
}
