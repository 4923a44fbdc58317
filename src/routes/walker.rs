//
//  walker.rs
//  urlgen
//
//  Endpoint discovery over a parsed C# tree. Owners (class-level route
//  prefixes) are materialised first, then crossed with every routed action.
//

use std::path::Path;

use tracing::debug;

use super::classify::classify_route_annotation;
use super::params::resolve_parameters;
use super::types::*;
use crate::parser::{DeclarationTree, MethodDecl, TypeDecl};

/// A public instance method together with its routing attributes.
#[derive(Debug, Clone)]
pub struct RoutedAction<'t> {
    pub method: MethodDecl<'t>,
    pub routes: Vec<RouteSpec>,
}

/// Extract every endpoint declared in `tree`.
pub fn extract_endpoints(tree: &DeclarationTree) -> Vec<Endpoint<'_>> {
    let mut endpoints = Vec::new();

    for ty in tree.types() {
        let owners = owners_for(tree.path(), &ty);
        let actions = routed_actions(&ty);
        endpoints.extend(cross_product(&owners, &actions));
    }

    debug!(
        file = %tree.path().display(),
        endpoints = endpoints.len(),
        "extracted endpoints"
    );
    endpoints
}

/// One owner per class-level `[Route]`, or a single prefix-less owner.
///
/// `Http*` attributes cannot be applied to classes, so in practice only
/// `[Route]` contributes here.
pub fn owners_for(source_file: &Path, ty: &TypeDecl<'_>) -> Vec<EndpointOwner> {
    let type_name = ty.name();
    let prefixes: Vec<Option<String>> = ty
        .attributes()
        .iter()
        .filter_map(classify_route_annotation)
        .map(|spec| Some(spec.template))
        .collect();

    let prefixes = if prefixes.is_empty() {
        vec![None]
    } else {
        prefixes
    };

    prefixes
        .into_iter()
        .map(|route_prefix| EndpointOwner {
            source_file: source_file.to_path_buf(),
            type_name: type_name.clone(),
            route_prefix,
        })
        .collect()
}

/// Public instance methods of `ty` carrying at least one routing attribute.
///
/// A class-level prefix alone does not make a method an action.
pub fn routed_actions<'t>(ty: &TypeDecl<'t>) -> Vec<RoutedAction<'t>> {
    ty.methods()
        .into_iter()
        .filter(MethodDecl::is_public_instance)
        .filter_map(|method| {
            let routes: Vec<RouteSpec> = method
                .attributes()
                .iter()
                .filter_map(classify_route_annotation)
                .collect();
            if routes.is_empty() {
                None
            } else {
                Some(RoutedAction { method, routes })
            }
        })
        .collect()
}

/// Every (owner × action × route attribute) combination, owners outermost.
pub fn cross_product<'t>(owners: &[EndpointOwner], actions: &[RoutedAction<'t>]) -> Vec<Endpoint<'t>> {
    let mut endpoints = Vec::with_capacity(owners.len() * actions.len());

    for owner in owners {
        for action in actions {
            let method_name = action.method.name();
            for route in &action.routes {
                let resolved_template = join_template(owner.route_prefix.as_deref(), &route.template);
                let parameters = resolve_parameters(&action.method, &resolved_template);

                endpoints.push(Endpoint {
                    owner: owner.clone(),
                    route: route.clone(),
                    method_name: method_name.clone(),
                    resolved_template,
                    parameters,
                    declaration: action.method,
                });
            }
        }
    }

    endpoints
}

/// Join the present segments of a prefix and a template with `/`.
pub fn join_template(prefix: Option<&str>, template: &str) -> String {
    [prefix.unwrap_or(""), template]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/")
}
