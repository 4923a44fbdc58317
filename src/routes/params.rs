//! Action parameter resolution against a resolved route template.

use super::classify::resolve_binding;
use super::types::{BindingKind, ParameterBinding};
use crate::parser::MethodDecl;

/// Resolve the URL-eligible parameters of `method` for one route template.
///
/// Declaration order is kept. Body, form, header and service parameters are
/// dropped. A parameter is a query-string value unless its effective name
/// appears as a whole word in `resolved_template`.
pub fn resolve_parameters(method: &MethodDecl<'_>, resolved_template: &str) -> Vec<ParameterBinding> {
    let mut list = Vec::new();

    for param in method.parameters() {
        let rule = resolve_binding(param.attributes());
        if rule.kind == BindingKind::Excluded {
            continue;
        }

        let declared_name = param.name();
        let effective_name = rule.explicit_name.unwrap_or_else(|| declared_name.clone());
        let is_query_param = !contains_word(resolved_template, &effective_name);
        let is_optional = !rule.required && (param.has_default() || param.is_nullable());

        list.push(ParameterBinding {
            source_type: param.type_text(),
            declared_name,
            effective_name,
            is_query_param,
            is_optional,
        });
    }

    list
}

/// `[A-Za-z0-9_]`.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// True if `word` occurs in `haystack` delimited by non-word characters.
pub fn contains_word(haystack: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    haystack.match_indices(word).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + word.len()..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::DeclarationTree;
    use std::path::Path;

    fn parse(source: &str) -> DeclarationTree {
        DeclarationTree::parse(Path::new("Test.cs"), source).unwrap()
    }

    #[test]
    fn test_contains_word() {
        assert!(contains_word("items/{id}", "id"));
        assert!(contains_word("id", "id"));
        assert!(contains_word("a/{id:int}/b", "id"));
        assert!(!contains_word("users/{userId}", "id"));
        assert!(!contains_word("items/{id_x}", "id"));
        assert!(!contains_word("items", "id"));
        assert!(!contains_word("items", ""));
        assert!(contains_word("{userId}/{id}", "id"));
        // Only ASCII letters and digits extend a word.
        assert!(contains_word("items/{éid}", "id"));
        assert!(!contains_word("items/{x9id}", "id"));
    }

    #[test]
    fn test_route_vs_query_placement() {
        let tree = parse(
            r#"
public class C {
    public void A(int id) { }
}
"#,
        );
        let method = tree.types()[0].methods()[0];

        let in_route = resolve_parameters(&method, "items/{id}");
        assert!(!in_route[0].is_query_param);

        let in_query = resolve_parameters(&method, "items");
        assert!(in_query[0].is_query_param);
    }

    #[test]
    fn test_optionality() {
        let tree = parse(
            r#"
public class C {
    public void A(int a, int? b, int c = 3, [BindRequired] int? d, [BindRequired] string e = "x") { }
}
"#,
        );
        let method = tree.types()[0].methods()[0];
        let params = resolve_parameters(&method, "");
        let optional: Vec<bool> = params.iter().map(|p| p.is_optional).collect();
        assert_eq!(optional, vec![false, true, true, false, false]);
    }

    #[test]
    fn test_excluded_and_renamed() {
        let tree = parse(
            r#"
public class C {
    public void A([FromBody] Dto body, [FromServices] IFoo foo, [FromHeader] string h, [FromForm] Form f, [FromRoute(Name = "key")] string k, [FromQuery(Name = "q")] string s) { }
}
"#,
        );
        let method = tree.types()[0].methods()[0];
        let params = resolve_parameters(&method, "things/{key}");
        assert_eq!(params.len(), 2);

        assert_eq!(params[0].declared_name, "k");
        assert_eq!(params[0].effective_name, "key");
        assert!(!params[0].is_query_param);

        assert_eq!(params[1].declared_name, "s");
        assert_eq!(params[1].effective_name, "q");
        assert_eq!(params[1].source_type, "string");
        assert!(params[1].is_query_param);
    }
}
