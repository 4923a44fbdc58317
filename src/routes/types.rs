//
//  types.rs
//  urlgen
//
//  Created by hak (tharun)
//

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use super::classify::route_annotation_kind;
use crate::parser::MethodDecl;

/// HTTP verb an endpoint answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    /// `[Route]` without a verb: reachable by any method.
    All,
    /// `[AcceptVerbs]`: the verb list is not resolved.
    Unspecified,
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::All => "ALL",
            HttpVerb::Unspecified => "UNSPECIFIED",
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Delete => "DELETE",
            HttpVerb::Patch => "PATCH",
            HttpVerb::Head => "HEAD",
            HttpVerb::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The closed set of routing attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAnnotation {
    /// `[Route]`, the only routing attribute allowed on classes.
    Route,
    /// `[AcceptVerbs]`.
    AcceptVerbs,
    /// `[HttpGet]`, `[HttpPost]`, ...
    Verb(HttpVerb),
}

impl RouteAnnotation {
    pub fn verb(self) -> HttpVerb {
        match self {
            RouteAnnotation::Route => HttpVerb::All,
            RouteAnnotation::AcceptVerbs => HttpVerb::Unspecified,
            RouteAnnotation::Verb(verb) => verb,
        }
    }
}

/// Where a parameter value comes from, per its binding attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingSource {
    Body,
    Form,
    Header,
    Query,
    Route,
    Services,
}

/// The closed set of parameter binding attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingAnnotation {
    From(BindingSource),
    /// `[BindRequired]`: a modifier, not a source.
    BindRequired,
}

/// How a parameter takes part in URL construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindingKind {
    /// No binding attribute: route value if the template names it, else query string.
    #[default]
    Undefined,
    FromRoute,
    FromQuery,
    /// Body, form, header or DI-sourced values. Never part of a URL.
    Excluded,
}

impl BindingSource {
    pub fn kind(self) -> BindingKind {
        match self {
            BindingSource::Query => BindingKind::FromQuery,
            BindingSource::Route => BindingKind::FromRoute,
            BindingSource::Body
            | BindingSource::Form
            | BindingSource::Header
            | BindingSource::Services => BindingKind::Excluded,
        }
    }
}

/// Result of classifying one binding attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingMatch {
    /// `None` for `[BindRequired]`.
    pub kind: Option<BindingKind>,
    pub explicit_name: Option<String>,
    pub required: bool,
}

/// Combined binding rule for a parameter after all its attributes are seen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BindingRule {
    pub kind: BindingKind,
    pub explicit_name: Option<String>,
    pub required: bool,
}

/// A routing attribute found on a type or method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSpec {
    /// Attribute name as written in source.
    pub annotation_name: String,
    /// First string literal argument, empty if there was none.
    pub template: String,
}

impl RouteSpec {
    pub fn verb(&self) -> HttpVerb {
        route_annotation_kind(&self.annotation_name)
            .map(RouteAnnotation::verb)
            .unwrap_or(HttpVerb::Unspecified)
    }
}

/// A URL-eligible action parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterBinding {
    pub source_type: String,
    pub declared_name: String,
    pub effective_name: String,
    pub is_query_param: bool,
    pub is_optional: bool,
}

/// A declaring type paired with one of its class-level route prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointOwner {
    pub source_file: PathBuf,
    pub type_name: String,
    pub route_prefix: Option<String>,
}

/// One (owner × action × route attribute) combination.
#[derive(Debug, Clone)]
pub struct Endpoint<'t> {
    pub owner: EndpointOwner,
    pub route: RouteSpec,
    pub method_name: String,
    pub resolved_template: String,
    pub parameters: Vec<ParameterBinding>,
    /// The originating declaration, borrowed from its tree.
    pub declaration: MethodDecl<'t>,
}

impl Endpoint<'_> {
    pub fn verb(&self) -> HttpVerb {
        self.route.verb()
    }

    /// Types of every formal parameter of the action, URL-bound or not.
    pub fn cref_param_types(&self) -> Vec<String> {
        self.declaration.parameter_types()
    }

    pub fn summary(&self) -> EndpointSummary {
        EndpointSummary {
            type_name: self.owner.type_name.clone(),
            method_name: self.method_name.clone(),
            verb: self.verb(),
            template: self.resolved_template.clone(),
            source_file: self.owner.source_file.clone(),
            line: self.declaration.line(),
            parameters: self.parameters.clone(),
        }
    }
}

/// Owned, serializable view of an [`Endpoint`] for listings.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointSummary {
    pub type_name: String,
    pub method_name: String,
    pub verb: HttpVerb,
    pub template: String,
    pub source_file: PathBuf,
    pub line: usize,
    pub parameters: Vec<ParameterBinding>,
}
