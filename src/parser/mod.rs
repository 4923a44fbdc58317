//
//  mod.rs
//  urlgen
//
//  Created by hak (tharun)
//

pub mod helpers;
pub mod syntax;

pub use syntax::{Attribute, DeclarationTree, MethodDecl, ParamDecl, TypeDecl};
