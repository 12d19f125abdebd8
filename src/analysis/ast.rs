//! Small AST helpers shared by the speedup checks.

use tree_sitter::Node;

/// Pre-order walk over every node in the tree, including anonymous ones.
pub fn for_each_node<'t>(root: Node<'t>, f: &mut impl FnMut(Node<'t>)) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        f(node);
        for i in (0..node.child_count()).rev() {
            if let Some(child) = node.child(i) {
                stack.push(child);
            }
        }
    }
}

/// Method name of a `call` node, or `None` for any other kind.
pub fn method_name<'t>(node: Node<'t>, src: &'t [u8]) -> Option<&'t str> {
    if node.kind() != "call" {
        return None;
    }
    node.child_by_field_name("method")?.utf8_text(src).ok()
}

/// Receiver of a `call` node, if any.
pub fn receiver(node: Node<'_>) -> Option<Node<'_>> {
    node.child_by_field_name("receiver")
}

/// Whether a `call` node has a brace or do/end block attached.
pub fn has_block(node: Node<'_>) -> bool {
    node.child_by_field_name("block").is_some()
}

/// Named arguments of a `call` node.
pub fn arguments(node: Node<'_>) -> Vec<Node<'_>> {
    match node.child_by_field_name("arguments") {
        Some(list) => {
            let mut cursor = list.walk();
            list.named_children(&mut cursor).collect()
        }
        None => Vec::new(),
    }
}

/// 1-based source line a node starts on.
pub fn line(node: Node<'_>) -> usize {
    node.start_position().row + 1
}

/// Whether a node is a plain (uninterpolated) string literal holding exactly
/// one character.
pub fn single_char_string(node: Node<'_>, src: &[u8]) -> bool {
    if node.kind() != "string" || node.named_child_count() != 1 {
        return false;
    }
    match node.named_child(0) {
        Some(content) if content.kind() == "string_content" => content
            .utf8_text(src)
            .map(|text| text.chars().count() == 1)
            .unwrap_or(false),
        _ => false,
    }
}
