//
//  discover.rs
//  urlgen
//
//  Created by hak (tharun)
//

use ignore::WalkBuilder;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{Result, UrlgenError};
use crate::parser::DeclarationTree;
use crate::routes::{extract_endpoints, Endpoint};

/// Directories that never hold hand-written sources, even without .gitignore.
const BUILTIN_IGNORE: &[&str] = &[
    "bin",
    "obj",
    "node_modules",
    ".git",
    ".svn",
    ".hg",
    ".vs",
    ".idea",
    "packages",
    "TestResults",
    "artifacts",
];

const SOURCE_EXTENSION: &str = "cs";

/// Check if a path below `root` passes through a built-in ignored directory.
fn is_builtin_ignored(root: &Path, path: &Path) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.components().any(|c| {
        if let std::path::Component::Normal(name) = c {
            BUILTIN_IGNORE.contains(&name.to_str().unwrap_or(""))
        } else {
            false
        }
    })
}

/// Every regular file below `root`, sorted.
///
/// With `respect_gitignore`, hidden files and anything excluded by
/// `.gitignore` or `.urlgenignore` are skipped.
pub fn walk_files(root: &Path, respect_gitignore: bool) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(UrlgenError::RootNotFound(root.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = WalkBuilder::new(root)
        .standard_filters(respect_gitignore)
        .require_git(false)
        .add_custom_ignore_filename(".urlgenignore")
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    Ok(files)
}

/// Find every `*.cs` file under `roots`, recursively, in sorted order.
pub fn discover_sources(roots: &[&Path], respect_gitignore: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for root in roots {
        let found = walk_files(root, respect_gitignore)?;
        files.extend(
            found
                .into_iter()
                .filter(|path| !is_builtin_ignored(root, path))
                .filter(|path| {
                    path.extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION))
                }),
        );
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Parse `files` in parallel. Files that cannot be read or parsed are
/// logged and skipped. Output order follows `files`.
pub fn parse_sources(files: &[PathBuf]) -> Vec<DeclarationTree> {
    files
        .par_iter()
        .filter_map(|path| match parse_file(path) {
            Ok(tree) => Some(tree),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "skipping source file");
                None
            }
        })
        .collect()
}

/// Read and parse a single source file.
///
/// Bytes that are not valid UTF-8 (a Latin-1 comment, say) are replaced
/// rather than rejected, so the rest of the file still yields endpoints.
pub fn parse_file(path: &Path) -> Result<DeclarationTree> {
    let bytes = fs::read(path)?;
    let source = String::from_utf8_lossy(&bytes).into_owned();
    let tree = DeclarationTree::parse(path, source)?;
    if tree.has_errors() {
        debug!(file = %path.display(), "parsed with syntax errors");
    }
    Ok(tree)
}

/// Extract endpoints from every tree, in tree order.
pub fn extract_all(trees: &[DeclarationTree]) -> Vec<Endpoint<'_>> {
    trees.iter().flat_map(extract_endpoints).collect()
}
