//
//  views.rs
//  urlgen
//
//  Created by hak (tharun)
//

//! Razor view discovery.
//!
//! Views are scanned textually: the `@model` directive gives the model type
//! and `.RequireViewData<T>()` calls name the ambient data a view expects.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

use crate::discover::walk_files;
use crate::error::Result;

const VIEW_EXTENSION: &str = "cshtml";

/// Razor infrastructure files that are never rendered directly.
const INFRASTRUCTURE_VIEWS: &[&str] = &["_ViewImports.cshtml", "_ViewStart.cshtml"];

/// A required view-data entry, e.g. `IUserContext userContext`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewDataParam {
    pub type_name: String,
    pub param_name: String,
}

/// One discovered `.cshtml` view.
#[derive(Debug, Clone, Serialize)]
pub struct ViewInfo {
    pub file: PathBuf,
    /// Path below the views root, `/`-separated.
    pub relative_path: String,
    pub project_path: String,
    pub aspnet_path: String,
    pub model_type: Option<String>,
    pub is_partial: bool,
    pub cs_name: String,
    pub view_data: Vec<ViewDataParam>,
}

impl ViewInfo {
    /// Build a view from its location and text.
    pub fn new(file: PathBuf, relative_path: &str, text: &str) -> Self {
        let relative_path = relative_path.replace('\\', "/");
        let file_name = relative_path.rsplit('/').next().unwrap_or(&relative_path);
        let is_partial = file_name.starts_with('_') || file_name.to_lowercase().contains("partial");

        Self {
            project_path: format!("Views/{relative_path}"),
            aspnet_path: format!("~/Views/{relative_path}"),
            model_type: model_type(text),
            cs_name: view_cs_name(&relative_path, is_partial),
            view_data: required_view_data(text),
            is_partial,
            relative_path,
            file,
        }
    }

    /// `, T1 p1, T2 p2` for appending to a generated signature, or empty.
    pub fn method_params(&self) -> String {
        self.view_data
            .iter()
            .map(|p| format!(", {} {}", p.type_name, p.param_name))
            .collect()
    }

    /// `, p1, p2` for appending to a generated call, or empty.
    pub fn method_args(&self) -> String {
        self.view_data
            .iter()
            .map(|p| format!(", {}", p.param_name))
            .collect()
    }
}

fn model_regex() -> &'static Regex {
    static MODEL: OnceLock<Regex> = OnceLock::new();
    MODEL.get_or_init(|| Regex::new(r"(?m)^@model\s+(.+?)\r?$").expect("model directive regex"))
}

fn view_data_regex() -> &'static Regex {
    static VIEW_DATA: OnceLock<Regex> = OnceLock::new();
    VIEW_DATA.get_or_init(|| {
        Regex::new(r"(?m)^.+?\.RequireViewData<(.+)>\(\)").expect("view data regex")
    })
}

/// The type named by the first `@model` directive, without a trailing comment.
pub fn model_type(text: &str) -> Option<String> {
    let caps = model_regex().captures(text)?;
    let decl = caps.get(1)?.as_str().trim();
    let decl = match decl.find("//") {
        Some(idx) => &decl[..idx],
        None => decl,
    };
    Some(decl.trim_end().to_string())
}

/// Distinct `.RequireViewData<T>()` types, sorted. Commented-out calls are ignored.
pub fn required_view_data(text: &str) -> Vec<ViewDataParam> {
    let types: BTreeSet<&str> = view_data_regex()
        .captures_iter(text)
        .filter(|caps| {
            let line = caps.get(0).map(|m| m.as_str()).unwrap_or("");
            !line.contains("//") && !line.contains("/*")
        })
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();

    types
        .into_iter()
        .map(|type_name| ViewDataParam {
            type_name: type_name.to_string(),
            param_name: camel_case(type_name.trim_start_matches('I')),
        })
        .collect()
}

fn camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `Account/Index.cshtml` → `Account_Index`.
pub fn view_cs_name(relative_path: &str, is_partial: bool) -> String {
    let flat = relative_path.replace(['/', '\\'], "_");
    let flat = flat.strip_suffix(VIEW_EXTENSION).unwrap_or(&flat);
    let name = flat.replace('.', "");
    let name = name.trim_matches('_').replace("__", "_");

    if is_partial {
        remove_ignore_case(&name, "partial")
    } else {
        name
    }
}

fn remove_ignore_case(haystack: &str, needle: &str) -> String {
    let lower = haystack.to_ascii_lowercase();
    let mut out = String::with_capacity(haystack.len());
    let mut cursor = 0;
    while let Some(found) = lower[cursor..].find(needle) {
        out.push_str(&haystack[cursor..cursor + found]);
        cursor += found + needle.len();
    }
    out.push_str(&haystack[cursor..]);
    out
}

/// Every renderable view under `root`, sorted by path.
pub fn discover_views(root: &Path) -> Result<Vec<ViewInfo>> {
    let mut views = Vec::new();

    for file in walk_files(root, false)? {
        let is_view = file
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(VIEW_EXTENSION));
        let file_name = file.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if !is_view || INFRASTRUCTURE_VIEWS.contains(&file_name) {
            continue;
        }

        let text = fs::read_to_string(&file)?;
        let relative = file
            .strip_prefix(root)
            .unwrap_or(&file)
            .to_string_lossy()
            .into_owned();
        views.push(ViewInfo::new(file.clone(), &relative, &text));
    }

    debug!(root = %root.display(), views = views.len(), "discovered views");
    Ok(views)
}
