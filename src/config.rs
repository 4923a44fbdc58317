//
//  config.rs
//  urlgen
//
//  Created by hak (tharun)
//

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::emit::{EmitOptions, DEFAULT_TYPE_SUFFIX};
use crate::error::{Result, UrlgenError};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "urlgen.toml";

/// Top-level urlgen configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub views: ViewsConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
}

/// Where controller sources live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Directories scanned recursively for `*.cs` files.
    #[serde(default = "default_source_roots")]
    pub roots: Vec<String>,
    /// Honour `.gitignore` and `.urlgenignore` while walking.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

/// Generated file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Template containing the placeholder token.
    #[serde(default = "default_template")]
    pub template: String,
    /// Generated file.
    #[serde(default = "default_output_path")]
    pub path: String,
    /// Suffix stripped from type names when naming helpers.
    #[serde(default = "default_type_suffix")]
    pub type_suffix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewsConfig {
    #[serde(default = "default_views_root")]
    pub root: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    #[serde(default = "default_assets_root")]
    pub root: String,
}

fn default_source_roots() -> Vec<String> {
    vec!["Controllers".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_template() -> String {
    "Urls.template.cs".to_string()
}

fn default_output_path() -> String {
    "Urls.g.cs".to_string()
}

fn default_type_suffix() -> String {
    DEFAULT_TYPE_SUFFIX.to_string()
}

fn default_views_root() -> String {
    "Views".to_string()
}

fn default_assets_root() -> String {
    "wwwroot".to_string()
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            roots: default_source_roots(),
            respect_gitignore: default_true(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            path: default_output_path(),
            type_suffix: default_type_suffix(),
        }
    }
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            root: default_views_root(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: default_assets_root(),
        }
    }
}

impl GeneratorConfig {
    /// Load config from a TOML file. A missing file yields the defaults; a
    /// file that exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        Self::from_toml(&contents)
            .map_err(|e| UrlgenError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Source roots resolved against `base` (the config file's directory).
    pub fn source_roots(&self, base: &Path) -> Vec<PathBuf> {
        self.sources.roots.iter().map(|root| base.join(root)).collect()
    }

    pub fn template_path(&self, base: &Path) -> PathBuf {
        base.join(&self.output.template)
    }

    pub fn output_path(&self, base: &Path) -> PathBuf {
        base.join(&self.output.path)
    }

    pub fn views_root(&self, base: &Path) -> PathBuf {
        base.join(&self.views.root)
    }

    pub fn assets_root(&self, base: &Path) -> PathBuf {
        base.join(&self.assets.root)
    }

    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions::from(&self.output)
    }
}

impl From<&OutputConfig> for EmitOptions {
    fn from(output: &OutputConfig) -> Self {
        Self {
            type_suffix: output.type_suffix.clone(),
        }
    }
}

/// Directory that relative config paths resolve against.
pub fn config_base_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
