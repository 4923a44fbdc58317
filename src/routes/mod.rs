//
//  mod.rs
//  urlgen
//
//  Created by hak (tharun)
//

pub mod classify;
pub mod params;
pub mod types;
pub mod walker;

pub use classify::{classify_binding_annotation, classify_route_annotation, resolve_binding};
pub use params::resolve_parameters;
pub use types::*;
pub use walker::{extract_endpoints, join_template, owners_for};
