//
//  assets.rs
//  urlgen
//
//  Created by hak (tharun)
//

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::discover::walk_files;
use crate::error::Result;

/// Extensions served as static content.
const CONTENT_EXTENSIONS: &[&str] = &["png", "svg", "js", "ico", "css"];

/// A static file under the web root.
#[derive(Debug, Clone, Serialize)]
pub struct ContentFile {
    pub file: PathBuf,
    /// `~/`-rooted virtual path, e.g. `~/css/site.css`.
    pub virtual_path: String,
    pub cs_name: String,
}

impl ContentFile {
    pub fn new(file: PathBuf, relative_url: &str) -> Self {
        let relative_url = relative_url.replace('\\', "/");
        let relative_url = relative_url.trim_start_matches('/');
        Self {
            file,
            virtual_path: format!("~/{relative_url}"),
            cs_name: build_cs_name(relative_url),
        }
    }
}

fn is_content_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    if name.ends_with(".d.ts") {
        return false;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CONTENT_EXTENSIONS.iter().any(|c| c.eq_ignore_ascii_case(ext)))
}

/// Map a web-root-relative URL onto a C# identifier.
///
/// `lib/jquery-ui/jquery.min.js` → `Lib_Jquery_Ui_Jquery_Min_Js`
pub fn build_cs_name(relative_url: &str) -> String {
    let mut out = String::with_capacity(relative_url.len());
    let mut after_separator = true;

    for c in relative_url.chars() {
        if c.is_alphanumeric() {
            if after_separator {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
            after_separator = false;
            continue;
        }

        match c {
            '/' | '\\' | '.' | '-' => {
                out.push('_');
                after_separator = true;
            }
            '_' => {
                if !after_separator {
                    out.push('_');
                    after_separator = true;
                }
            }
            ' ' => after_separator = true,
            _ => after_separator = false,
        }
    }

    out
}

/// Every content file under `root`, sorted by path.
pub fn discover_assets(root: &Path) -> Result<Vec<ContentFile>> {
    let assets: Vec<ContentFile> = walk_files(root, false)?
        .into_iter()
        .filter(|file| is_content_file(file))
        .map(|file| {
            let relative = file
                .strip_prefix(root)
                .unwrap_or(&file)
                .to_string_lossy()
                .into_owned();
            ContentFile::new(file.clone(), &relative)
        })
        .collect();

    debug!(root = %root.display(), assets = assets.len(), "discovered content files");
    Ok(assets)
}
