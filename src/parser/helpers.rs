//
//  helpers.rs
//  urlgen
//
//  Created by hak (tharun)
//

use tree_sitter::Node;

/// String literal node kinds in the C# grammar.
pub const STRING_LITERAL_KINDS: &[&str] = &[
    "string_literal",
    "verbatim_string_literal",
    "raw_string_literal",
];

/// Get the full text of a node.
pub fn node_text(node: &Node, source: &[u8]) -> String {
    node.utf8_text(source).unwrap_or("").to_string()
}

/// Text of a named field on `node`, if present.
pub fn field_text(node: &Node, field: &str, source: &[u8]) -> Option<String> {
    node.child_by_field_name(field)
        .and_then(|n| n.utf8_text(source).ok())
        .map(|s| s.to_string())
}

/// Direct children of `node` whose kind is `kind`, in source order.
pub fn children_of_kind<'t>(node: &Node<'t>, kind: &str) -> Vec<Node<'t>> {
    let mut out = Vec::new();
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            if child.kind() == kind {
                out.push(child);
            }
        }
    }
    out
}

/// Collect every descendant of `node` matching one of `kinds`, pre-order.
///
/// Matching nodes are still descended into, so nested declarations
/// are reported alongside their containers.
pub fn collect_descendants<'t>(node: &Node<'t>, kinds: &[&str], out: &mut Vec<Node<'t>>) {
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            if kinds.contains(&child.kind()) {
                out.push(child);
            }
            collect_descendants(&child, kinds, out);
        }
    }
}

/// First descendant of `node` (pre-order) matching one of `kinds`.
pub fn find_first_descendant<'t>(node: &Node<'t>, kinds: &[&str]) -> Option<Node<'t>> {
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            if kinds.contains(&child.kind()) {
                return Some(child);
            }
            if let Some(found) = find_first_descendant(&child, kinds) {
                return Some(found);
            }
        }
    }
    None
}

/// Strip the quoting from a C# string literal token.
///
/// Handles regular (`"..."`), verbatim (`@"..."`) and raw (`"""..."""`)
/// literals. Escape sequences in regular literals are left as written.
pub fn unquote_string_literal(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix("u8").unwrap_or(trimmed);
    if trimmed.is_empty() {
        return None;
    }
    if let Some(rest) = trimmed.strip_prefix("@\"") {
        if let Some(value) = rest.strip_suffix('"') {
            return Some(value.replace("\"\"", "\""));
        }
    }
    let quote_count = trimmed.chars().take_while(|ch| *ch == '"').count();
    if quote_count >= 3 && trimmed.len() >= quote_count * 2 && trimmed.ends_with(&"\"".repeat(quote_count)) {
        return Some(trimmed[quote_count..trimmed.len() - quote_count].to_string());
    }
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        return Some(trimmed[1..trimmed.len() - 1].to_string());
    }
    None
}
