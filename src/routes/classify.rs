//
//  classify.rs
//  urlgen
//
//  Attribute classification: routing attributes on types and actions,
//  binding attributes on action parameters. Both sets are closed.
//

use super::types::*;
use crate::parser::Attribute;

// ── Tables ───────────────────────────────────────────────────────────────────

/// Routing attributes. `Http*` attributes are method-only, `[Route]` may also
/// sit on a class.
const ROUTE_ANNOTATIONS: &[(&str, RouteAnnotation)] = &[
    ("HttpDelete", RouteAnnotation::Verb(HttpVerb::Delete)),
    ("HttpGet", RouteAnnotation::Verb(HttpVerb::Get)),
    ("HttpHead", RouteAnnotation::Verb(HttpVerb::Head)),
    ("HttpOptions", RouteAnnotation::Verb(HttpVerb::Options)),
    ("HttpPatch", RouteAnnotation::Verb(HttpVerb::Patch)),
    ("HttpPost", RouteAnnotation::Verb(HttpVerb::Post)),
    ("HttpPut", RouteAnnotation::Verb(HttpVerb::Put)),
    ("Route", RouteAnnotation::Route),
    ("AcceptVerbs", RouteAnnotation::AcceptVerbs),
];

const BINDING_ANNOTATIONS: &[(&str, BindingAnnotation)] = &[
    ("FromBody", BindingAnnotation::From(BindingSource::Body)),
    ("FromForm", BindingAnnotation::From(BindingSource::Form)),
    ("FromHeader", BindingAnnotation::From(BindingSource::Header)),
    ("FromQuery", BindingAnnotation::From(BindingSource::Query)),
    ("FromRoute", BindingAnnotation::From(BindingSource::Route)),
    ("FromServices", BindingAnnotation::From(BindingSource::Services)),
    ("BindRequired", BindingAnnotation::BindRequired),
];

const ATTRIBUTE_SUFFIX: &str = "Attribute";

// ── Name lookup ──────────────────────────────────────────────────────────────

/// Reduce `Microsoft.AspNetCore.Mvc.HttpGetAttribute` to `HttpGet`.
pub fn normalize_annotation_name(raw: &str) -> &str {
    let short = raw
        .rsplit(|c| c == '.' || c == ':')
        .next()
        .unwrap_or(raw)
        .trim();
    let cut = short.len().saturating_sub(ATTRIBUTE_SUFFIX.len());
    match short.get(cut..) {
        Some(tail) if cut > 0 && tail.eq_ignore_ascii_case(ATTRIBUTE_SUFFIX) => &short[..cut],
        _ => short,
    }
}

fn lookup<T: Copy>(table: &[(&str, T)], raw: &str) -> Option<T> {
    let name = normalize_annotation_name(raw);
    table
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|(_, value)| *value)
}

pub fn route_annotation_kind(name: &str) -> Option<RouteAnnotation> {
    lookup(ROUTE_ANNOTATIONS, name)
}

pub fn binding_annotation_kind(name: &str) -> Option<BindingAnnotation> {
    lookup(BINDING_ANNOTATIONS, name)
}

// ── Classification ───────────────────────────────────────────────────────────

/// Classify a routing attribute. A missing literal gives an empty template.
pub fn classify_route_annotation(attr: &Attribute<'_>) -> Option<RouteSpec> {
    let name = attr.name();
    route_annotation_kind(&name)?;
    Some(RouteSpec {
        template: attr.first_string_literal().unwrap_or_default(),
        annotation_name: name,
    })
}

/// Classify a parameter binding attribute.
pub fn classify_binding_annotation(attr: &Attribute<'_>) -> Option<BindingMatch> {
    let annotation = binding_annotation_kind(&attr.name())?;
    Some(match annotation {
        BindingAnnotation::BindRequired => BindingMatch {
            kind: None,
            explicit_name: None,
            required: true,
        },
        BindingAnnotation::From(source) => {
            let kind = source.kind();
            let explicit_name = match kind {
                BindingKind::FromQuery | BindingKind::FromRoute => attr.first_string_literal(),
                _ => None,
            };
            BindingMatch {
                kind: Some(kind),
                explicit_name,
                required: false,
            }
        }
    })
}

/// Fold every binding attribute on a parameter into one rule.
///
/// Conflicting sources resolve last-write-wins, explicit name included.
pub fn resolve_binding<'t, I>(attrs: I) -> BindingRule
where
    I: IntoIterator<Item = Attribute<'t>>,
{
    fold_bindings(attrs.into_iter().filter_map(|a| classify_binding_annotation(&a)))
}

pub fn fold_bindings<I>(matches: I) -> BindingRule
where
    I: IntoIterator<Item = BindingMatch>,
{
    let mut rule = BindingRule::default();
    for m in matches {
        rule.required |= m.required;
        if let Some(kind) = m.kind {
            rule.kind = kind;
            rule.explicit_name = m.explicit_name;
        }
    }
    rule
}
