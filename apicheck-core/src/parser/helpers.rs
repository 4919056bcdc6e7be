//! Helper functions for tree-sitter AST navigation.

use tree_sitter::Node;

/// Get the text content of a node.
pub fn get_node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    let start = node.start_byte();
    let end = node.end_byte();
    if start < source.len() && end <= source.len() && start < end {
        &source[start..end]
    } else {
        ""
    }
}

/// Node text with runs of whitespace collapsed to one space.
pub fn get_normalized_text(node: &Node, source: &str) -> String {
    get_node_text(node, source)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Find the first child of a specific type.
pub fn find_child_by_type<'a>(node: &Node<'a>, type_name: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|child| child.kind() == type_name);
    found
}

/// Check if a node has a child (named or anonymous) of a specific type.
pub fn has_child_of_type(node: &Node, type_name: &str) -> bool {
    find_child_by_type(node, type_name).is_some()
}

/// Collect all nodes carrying the given field name.
pub fn children_by_field<'a>(node: &Node<'a>, field_name: &str) -> Vec<Node<'a>> {
    let mut cursor = node.walk();
    let children: Vec<Node<'a>> = node.children_by_field_name(field_name, &mut cursor).collect();
    children
}

/// Collect the named children of a node, skipping comments.
pub fn named_children<'a>(node: &Node<'a>) -> Vec<Node<'a>> {
    let mut cursor = node.walk();
    let children: Vec<Node<'a>> = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect();
    children
}

/// Get line number (1-indexed) from a node.
pub fn get_start_line(node: &Node) -> u32 {
    node.start_position().row as u32 + 1
}

/// Line of the first error or missing node in a subtree.
pub fn first_error_line(node: &Node) -> Option<u32> {
    if node.is_error() || node.is_missing() {
        return Some(get_start_line(node));
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .iter()
        .find_map(first_error_line)
        .or_else(|| Some(get_start_line(node)))
}

/// Strip the quotes of a Go string literal.
pub fn unquote(literal: &str) -> &str {
    literal.trim_matches('"').trim_matches('`')
}
