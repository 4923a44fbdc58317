//! # urlgen
//!
//! Strongly-typed URL helpers for ASP.NET controllers.
//!
//! urlgen parses C# controller sources with tree-sitter, finds every routed
//! action, works out which parameters travel in the route and which in the
//! query string, and writes one `IUrlHelper` extension method per endpoint
//! into a user-supplied template.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use urlgen::{generate, GeneratorConfig};
//!
//! let config = GeneratorConfig::load(Path::new("urlgen.toml")).unwrap();
//! let report = generate(&config, Path::new(".")).unwrap();
//! println!("{} endpoints -> {}", report.endpoints, report.output_path.display());
//! ```
//!
//! The pipeline is also available piecewise: [`discover_sources`],
//! [`parse_sources`], [`extract_all`] and [`render`].

pub mod assets;
pub mod config;
pub mod discover;
pub mod emit;
pub mod error;
pub mod parser;
pub mod routes;
pub mod views;

// Re-exports for convenience
pub use assets::{discover_assets, ContentFile};
pub use config::{config_base_dir, GeneratorConfig, CONFIG_FILE};
pub use discover::{discover_sources, extract_all, parse_sources};
pub use emit::{render, render_with, EmitOptions, MarkerAligner, NoAlign, TextAligner, PLACEHOLDER};
pub use error::{Result, UrlgenError};
pub use parser::DeclarationTree;
pub use routes::{extract_endpoints, Endpoint, EndpointSummary, HttpVerb, ParameterBinding};
pub use views::{discover_views, ViewInfo};

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Outcome of a [`generate`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub files_scanned: usize,
    pub endpoints: usize,
    pub output_path: PathBuf,
}

/// Generated text plus the counts behind it, before anything is written.
#[derive(Debug, Clone)]
pub struct GeneratedText {
    pub text: String,
    pub files_scanned: usize,
    pub endpoints: usize,
}

/// Run the whole pipeline and return the generated file contents.
///
/// The template is read and validated before any source is touched.
pub fn generate_text(config: &GeneratorConfig, base_dir: &Path) -> Result<GeneratedText> {
    let template = fs::read_to_string(config.template_path(base_dir))?;
    emit::OutputTemplate::parse(&template)?;

    let roots = config.source_roots(base_dir);
    let root_refs: Vec<&Path> = roots.iter().map(PathBuf::as_path).collect();
    let files = discover_sources(&root_refs, config.sources.respect_gitignore)?;

    let trees = parse_sources(&files);
    let endpoints = extract_all(&trees);
    let text = render(&endpoints, &template, &config.emit_options())?;

    Ok(GeneratedText {
        text,
        files_scanned: trees.len(),
        endpoints: endpoints.len(),
    })
}

/// Run the whole pipeline and write the output file.
///
/// Relative paths in `config` resolve against `base_dir`.
pub fn generate(config: &GeneratorConfig, base_dir: &Path) -> Result<GenerationReport> {
    let generated = generate_text(config, base_dir)?;

    let output_path = config.output_path(base_dir);
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&output_path, &generated.text)?;

    info!(
        files = generated.files_scanned,
        endpoints = generated.endpoints,
        output = %output_path.display(),
        "generated url helpers"
    );

    Ok(GenerationReport {
        files_scanned: generated.files_scanned,
        endpoints: generated.endpoints,
        output_path,
    })
}

/// Summaries of every endpoint under the configured roots, in emission order.
pub fn list_endpoints(config: &GeneratorConfig, base_dir: &Path) -> Result<Vec<EndpointSummary>> {
    let roots = config.source_roots(base_dir);
    let root_refs: Vec<&Path> = roots.iter().map(PathBuf::as_path).collect();
    let files = discover_sources(&root_refs, config.sources.respect_gitignore)?;

    let trees = parse_sources(&files);
    let endpoints = extract_all(&trees);
    Ok(emit::sort_endpoints(&endpoints)
        .into_iter()
        .map(Endpoint::summary)
        .collect())
}
