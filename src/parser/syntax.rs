//
//  syntax.rs
//  urlgen
//
//  Created by hak (tharun)
//

//! Read-only declaration views over a tree-sitter C# syntax tree.
//!
//! A [`DeclarationTree`] owns the parsed tree and its source text. Every
//! other type here is a cheap `Copy` view borrowing from it, so nothing
//! extracted from a tree can outlive that tree.

use std::fmt;
use std::path::{Path, PathBuf};

use tree_sitter::{Language, Node, Parser, Tree};

use super::helpers::{
    children_of_kind, collect_descendants, field_text, find_first_descendant, node_text,
    unquote_string_literal, STRING_LITERAL_KINDS,
};
use crate::error::{Result, UrlgenError};

/// Declaration kinds that can own action methods.
const TYPE_KINDS: &[&str] = &["class_declaration", "record_declaration", "struct_declaration"];

const METHOD_KINDS: &[&str] = &["method_declaration"];

/// The C# grammar used for every parse.
pub fn csharp_language() -> Language {
    tree_sitter_c_sharp::LANGUAGE.into()
}

/// A parsed C# source file.
pub struct DeclarationTree {
    path: PathBuf,
    source: String,
    tree: Tree,
}

impl DeclarationTree {
    /// Parse `source` as C#.
    ///
    /// Fails when the grammar cannot be loaded, when tree-sitter gives up,
    /// or when the root is not a compilation unit.
    pub fn parse(path: &Path, source: impl Into<String>) -> Result<Self> {
        let source = source.into();

        let mut parser = Parser::new();
        parser
            .set_language(&csharp_language())
            .map_err(|e| UrlgenError::ParserInitError(path.to_path_buf(), e.to_string()))?;

        let tree = parser
            .parse(&source, None)
            .ok_or_else(|| UrlgenError::TreeSitterParseFailed(path.to_path_buf()))?;

        if tree.root_node().kind() != "compilation_unit" {
            return Err(UrlgenError::MissingCompilationUnit(path.to_path_buf()));
        }

        Ok(Self {
            path: path.to_path_buf(),
            source,
            tree,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether tree-sitter had to recover from syntax errors.
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Every class, record and struct declaration, nested ones included.
    pub fn types(&self) -> Vec<TypeDecl<'_>> {
        let mut nodes = Vec::new();
        collect_descendants(&self.tree.root_node(), TYPE_KINDS, &mut nodes);
        nodes
            .into_iter()
            .map(|node| TypeDecl {
                node,
                source: self.source.as_bytes(),
            })
            .collect()
    }
}

impl fmt::Debug for DeclarationTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeclarationTree")
            .field("path", &self.path)
            .field("bytes", &self.source.len())
            .finish()
    }
}

/// Attributes attached directly to `node` (not to its members).
fn attributes_of<'t>(node: &Node<'t>, source: &'t [u8]) -> Vec<Attribute<'t>> {
    children_of_kind(node, "attribute_list")
        .iter()
        .flat_map(|list| children_of_kind(list, "attribute"))
        .map(|node| Attribute { node, source })
        .collect()
}

// ── Types ────────────────────────────────────────────────────────────────────

/// A class-like declaration.
#[derive(Clone, Copy)]
pub struct TypeDecl<'t> {
    node: Node<'t>,
    source: &'t [u8],
}

impl<'t> TypeDecl<'t> {
    pub fn name(&self) -> String {
        field_text(&self.node, "name", self.source).unwrap_or_default()
    }

    pub fn attributes(&self) -> Vec<Attribute<'t>> {
        attributes_of(&self.node, self.source)
    }

    /// Every method declared anywhere inside this type, nested types included.
    pub fn methods(&self) -> Vec<MethodDecl<'t>> {
        let mut nodes = Vec::new();
        collect_descendants(&self.node, METHOD_KINDS, &mut nodes);
        nodes
            .into_iter()
            .map(|node| MethodDecl {
                node,
                source: self.source,
            })
            .collect()
    }

    pub fn line(&self) -> usize {
        self.node.start_position().row + 1
    }
}

impl fmt::Debug for TypeDecl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDecl")
            .field("name", &self.name())
            .field("line", &self.line())
            .finish()
    }
}

// ── Methods ──────────────────────────────────────────────────────────────────

/// A method declaration.
#[derive(Clone, Copy)]
pub struct MethodDecl<'t> {
    node: Node<'t>,
    source: &'t [u8],
}

impl<'t> MethodDecl<'t> {
    pub fn name(&self) -> String {
        field_text(&self.node, "name", self.source).unwrap_or_default()
    }

    pub fn attributes(&self) -> Vec<Attribute<'t>> {
        attributes_of(&self.node, self.source)
    }

    /// True if the declaration carries the `keyword` modifier.
    pub fn has_modifier(&self, keyword: &str) -> bool {
        (0..self.node.child_count())
            .filter_map(|i| self.node.child(i))
            .any(|c| match c.kind() {
                "modifier" => c.utf8_text(self.source).map(|t| t == keyword).unwrap_or(false),
                kind => kind == keyword,
            })
    }

    /// Methods are private instance members by default, so `public` must be
    /// present and `static` absent.
    pub fn is_public_instance(&self) -> bool {
        self.has_modifier("public") && !self.has_modifier("static")
    }

    /// Formal parameters in declaration order, a trailing `params` array included.
    pub fn parameters(&self) -> Vec<ParamDecl<'t>> {
        let Some(list) = self.node.child_by_field_name("parameters") else {
            return Vec::new();
        };

        let mut params = Vec::new();
        for i in 0..list.child_count() {
            let Some(child) = list.child(i) else { continue };
            let shape = match child.kind() {
                "parameter" => ParamShape::Declared,
                // `params T[] name` is not wrapped in a `parameter` node: its
                // type and name are fields of the list itself.
                "params" => ParamShape::ParamsArray,
                _ => continue,
            };
            let node = if shape == ParamShape::Declared { child } else { list };
            params.push(ParamDecl {
                node,
                shape,
                source: self.source,
            });
        }
        params
    }

    /// Declared types of every formal parameter, as written.
    pub fn parameter_types(&self) -> Vec<String> {
        self.parameters().iter().map(ParamDecl::type_text).collect()
    }

    pub fn line(&self) -> usize {
        self.node.start_position().row + 1
    }
}

impl fmt::Debug for MethodDecl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDecl")
            .field("name", &self.name())
            .field("line", &self.line())
            .finish()
    }
}

// ── Parameters ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq)]
enum ParamShape {
    /// A `parameter` node.
    Declared,
    /// The `params` group, read from the enclosing `parameter_list`.
    ParamsArray,
}

/// A formal parameter of a method.
#[derive(Clone, Copy)]
pub struct ParamDecl<'t> {
    node: Node<'t>,
    shape: ParamShape,
    source: &'t [u8],
}

impl<'t> ParamDecl<'t> {
    pub fn name(&self) -> String {
        field_text(&self.node, "name", self.source).unwrap_or_default()
    }

    /// The declared type as source text, e.g. `Int32?` or `List<String>`.
    pub fn type_text(&self) -> String {
        field_text(&self.node, "type", self.source).unwrap_or_default()
    }

    /// `T?` declarations. `Nullable<T>` spelled out is not recognised.
    pub fn is_nullable(&self) -> bool {
        self.node
            .child_by_field_name("type")
            .is_some_and(|t| t.kind() == "nullable_type")
    }

    /// True for a `params T[] name` parameter.
    pub fn is_params_array(&self) -> bool {
        self.shape == ParamShape::ParamsArray
    }

    pub fn has_default(&self) -> bool {
        if self.is_params_array() {
            return false;
        }
        (0..self.node.child_count())
            .filter_map(|i| self.node.child(i))
            .any(|c| c.kind() == "=" || c.kind() == "equals_value_clause")
    }

    /// For a `params` group these are the attribute lists sitting loose in
    /// the parameter list; every other parameter owns its own.
    pub fn attributes(&self) -> Vec<Attribute<'t>> {
        attributes_of(&self.node, self.source)
    }
}

impl fmt::Debug for ParamDecl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamDecl")
            .field("name", &self.name())
            .field("type", &self.type_text())
            .finish()
    }
}

// ── Attributes ───────────────────────────────────────────────────────────────

/// A single attribute inside an `[...]` list.
#[derive(Clone, Copy)]
pub struct Attribute<'t> {
    node: Node<'t>,
    source: &'t [u8],
}

impl<'t> Attribute<'t> {
    /// The attribute name as written, qualifiers included.
    pub fn name(&self) -> String {
        field_text(&self.node, "name", self.source).unwrap_or_default()
    }

    /// First string literal among the arguments, positional or named.
    pub fn first_string_literal(&self) -> Option<String> {
        let args = children_of_kind(&self.node, "attribute_argument_list");
        args.iter()
            .find_map(|list| find_first_descendant(list, STRING_LITERAL_KINDS))
            .and_then(|lit| unquote_string_literal(&node_text(&lit, self.source)))
    }
}

impl fmt::Debug for Attribute<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute").field("name", &self.name()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> DeclarationTree {
        DeclarationTree::parse(Path::new("Test.cs"), source).unwrap()
    }

    #[test]
    fn test_types_include_nested() {
        let tree = parse(
            r#"
namespace App {
    public class Outer {
        public class Inner { }
    }
    public record Rec(int X);
}
"#,
        );
        let names: Vec<String> = tree.types().iter().map(TypeDecl::name).collect();
        assert_eq!(names, vec!["Outer", "Inner", "Rec"]);
    }

    #[test]
    fn test_method_modifiers() {
        let tree = parse(
            r#"
public class C {
    public void A() { }
    public static void B() { }
    void D() { }
    public async Task E() { }
}
"#,
        );
        let methods = tree.types()[0].methods();
        let flags: Vec<(String, bool)> = methods
            .iter()
            .map(|m| (m.name(), m.is_public_instance()))
            .collect();
        assert_eq!(
            flags,
            vec![
                ("A".to_string(), true),
                ("B".to_string(), false),
                ("D".to_string(), false),
                ("E".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_parameters() {
        let tree = parse(
            r#"
public class C {
    public void A([FromQuery(Name = "q")] string? query, int page = 1, List<int> ids) { }
}
"#,
        );
        let method = tree.types()[0].methods()[0];
        let params = method.parameters();
        assert_eq!(params.len(), 3);

        assert_eq!(params[0].name(), "query");
        assert_eq!(params[0].type_text(), "string?");
        assert!(params[0].is_nullable());
        assert!(!params[0].has_default());
        assert_eq!(params[0].attributes()[0].name(), "FromQuery");
        assert_eq!(params[0].attributes()[0].first_string_literal(), Some("q".to_string()));

        assert_eq!(params[1].name(), "page");
        assert!(!params[1].is_nullable());
        assert!(params[1].has_default());

        assert_eq!(
            method.parameter_types(),
            vec!["string?", "int", "List<int>"]
        );
    }

    #[test]
    fn test_params_array_parameter() {
        let tree = parse(
            r#"
public class ItemsController {
    public void Post([FromBody] Item item, params string[] tags) { }
}
"#,
        );
        let method = tree.types()[0].methods()[0];
        let params = method.parameters();
        assert_eq!(params.len(), 2);

        assert_eq!(params[0].name(), "item");
        assert!(!params[0].is_params_array());
        assert_eq!(params[0].attributes()[0].name(), "FromBody");

        assert_eq!(params[1].name(), "tags");
        assert_eq!(params[1].type_text(), "string[]");
        assert!(params[1].is_params_array());
        assert!(!params[1].has_default());
        assert!(!params[1].is_nullable());
        assert!(params[1].attributes().is_empty());

        assert_eq!(method.parameter_types(), vec!["Item", "string[]"]);
    }

    #[test]
    fn test_attribute_literal_absent() {
        let tree = parse(
            r#"
[ApiController, Route("api/[controller]")]
public class C {
    [HttpGet]
    public void A() { }
}
"#,
        );
        let ty = tree.types()[0];
        let attrs = ty.attributes();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[1].first_string_literal(), Some("api/[controller]".to_string()));
        let method_attrs = ty.methods()[0].attributes();
        assert_eq!(method_attrs[0].name(), "HttpGet");
        assert_eq!(method_attrs[0].first_string_literal(), None);
    }

    #[test]
    fn test_empty_source_parses() {
        let tree = parse("");
        assert!(tree.types().is_empty());
    }
}
