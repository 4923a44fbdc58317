//! urlgen CLI - generate strongly-typed URL helpers from ASP.NET controllers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use urlgen::{
    config_base_dir, discover_assets, discover_views, generate, list_endpoints, GeneratorConfig,
    CONFIG_FILE,
};

#[derive(Parser)]
#[command(name = "urlgen")]
#[command(about = "Strongly-typed URL helpers for ASP.NET controllers", long_about = None)]
struct Cli {
    /// Path to the config file (default: ./urlgen.toml)
    #[arg(short, long, default_value = CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Log at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan controllers and write the generated helpers
    Generate {
        /// Source root to scan (repeatable; replaces the configured roots)
        #[arg(short, long)]
        source: Vec<PathBuf>,

        /// Output template containing GENERATED_CODE_GOES_HERE
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// File to write
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print every discovered endpoint as JSON
    List {
        /// Source root to scan (repeatable; replaces the configured roots)
        #[arg(short, long)]
        source: Vec<PathBuf>,
    },

    /// Print discovered Razor views as JSON
    Views {
        /// Views directory (default: from config)
        #[arg(short, long)]
        root: Option<PathBuf>,
    },

    /// Print discovered static content files as JSON
    Assets {
        /// Web root directory (default: from config)
        #[arg(short, long)]
        root: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = GeneratorConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let base = config_base_dir(&cli.config);
    let cwd = std::env::current_dir().context("reading current directory")?;

    match cli.command {
        Commands::Generate {
            source,
            template,
            output,
        } => {
            override_roots(&mut config, &cwd, &source);
            if let Some(template) = template {
                config.output.template = absolute(&cwd, &template);
            }
            if let Some(output) = output {
                config.output.path = absolute(&cwd, &output);
            }

            let report = generate(&config, &base).context("generating url helpers")?;
            println!(
                "✓ Wrote {} endpoints from {} files to {}",
                report.endpoints,
                report.files_scanned,
                report.output_path.display()
            );
        }

        Commands::List { source } => {
            override_roots(&mut config, &cwd, &source);
            let endpoints = list_endpoints(&config, &base).context("listing endpoints")?;
            println!("{}", serde_json::to_string_pretty(&endpoints)?);
        }

        Commands::Views { root } => {
            let root = match root {
                Some(root) => cwd.join(root),
                None => config.views_root(&base),
            };
            let views = discover_views(&root)
                .with_context(|| format!("scanning views in {}", root.display()))?;
            println!("{}", serde_json::to_string_pretty(&views)?);
        }

        Commands::Assets { root } => {
            let root = match root {
                Some(root) => cwd.join(root),
                None => config.assets_root(&base),
            };
            let assets = discover_assets(&root)
                .with_context(|| format!("scanning assets in {}", root.display()))?;
            println!("{}", serde_json::to_string_pretty(&assets)?);
        }
    }

    Ok(())
}

/// CLI paths are relative to the working directory, not the config file.
fn absolute(cwd: &Path, path: &Path) -> String {
    cwd.join(path).to_string_lossy().into_owned()
}

fn override_roots(config: &mut GeneratorConfig, cwd: &Path, sources: &[PathBuf]) {
    if !sources.is_empty() {
        config.sources.roots = sources.iter().map(|s| absolute(cwd, s)).collect();
    }
}
