use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use solnorm_core::anchor::{resolve_list_item_body_anchor_with, AnchorKey};
use solnorm_core::migrator::normalize_task_cards_from_legacy_groups;
use solnorm_core::normalizer::{content_hash, is_canonical, normalize_document, scenes_from_codes};
use solnorm_core::{EngineConfig, ListItem, UsageScene};

/// solnorm — solution-page content normalizer
///
/// Normalize stored task-card documents, migrate legacy content, and
/// resolve body-map anchors.
#[derive(Parser)]
#[command(name = "solnorm", version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a document to canonical task cards (legacy shapes are migrated)
    Normalize {
        /// Path to .json document
        file: PathBuf,
        /// Comma-separated scene codes to pre-check (overrides config)
        #[arg(long, value_delimiter = ',')]
        default_checked: Option<Vec<String>>,
    },

    /// Migrate a legacy grouped-list document
    Migrate {
        /// Path to .json document
        file: PathBuf,
        /// Comma-separated scene codes to pre-check (overrides config)
        #[arg(long, value_delimiter = ',')]
        default_checked: Option<Vec<String>>,
    },

    /// Resolve body anchors for a list item or an array of list items
    Resolve {
        /// Path to .json list item(s)
        file: PathBuf,
    },

    /// Check whether a document is already canonical
    Check {
        /// Path to .json document
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute the content hash (SHA-256) of the normalized document
    Hash {
        /// Path to .json document
        file: PathBuf,
    },

    /// List the usage-scene taxonomy
    Scenes,

    /// List the anchor-key registry
    Anchors,

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            2
        }
    };

    process::exit(exit_code);
}

fn run(cli: &Cli) -> solnorm_core::Result<i32> {
    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Normalize {
            file,
            default_checked,
        } => {
            let raw = read_json(file)?;
            let defaults = resolve_defaults(&config, default_checked.as_deref());
            print_json(&normalize_document(&raw, &defaults).to_value());
            Ok(0)
        }
        Commands::Migrate {
            file,
            default_checked,
        } => {
            let raw = read_json(file)?;
            let defaults = resolve_defaults(&config, default_checked.as_deref());
            print_json(&normalize_task_cards_from_legacy_groups(&raw, &defaults).to_value());
            Ok(0)
        }
        Commands::Resolve { file } => {
            let raw = read_json(file)?;
            let options = config.anchor_options();
            let resolve = |v: &Value| {
                resolve_list_item_body_anchor_with(&ListItem::from_value(v), &options)
                    .map(|p| p.to_value())
                    .unwrap_or(Value::Null)
            };
            let out = match &raw {
                Value::Array(items) => Value::Array(items.iter().map(resolve).collect()),
                single => resolve(single),
            };
            print_json(&out);
            Ok(0)
        }
        Commands::Check { file, json } => {
            let raw = read_json(file)?;
            let canonical = is_canonical(&raw);
            if *json {
                let doc = normalize_document(&raw, &config.default_checked_scenes());
                print_json(&json!({
                    "canonical": canonical,
                    "hash": content_hash(&doc),
                }));
            } else if canonical {
                println!("{} {} is canonical", "✓".green(), file.display());
            } else {
                println!("{} {} is not canonical", "✗".yellow(), file.display());
            }
            Ok(if canonical { 0 } else { 1 })
        }
        Commands::Hash { file } => {
            let raw = read_json(file)?;
            let doc = normalize_document(&raw, &config.default_checked_scenes());
            println!("{}", content_hash(&doc));
            Ok(0)
        }
        Commands::Scenes => {
            let scenes: Vec<Value> = UsageScene::ALL
                .into_iter()
                .map(|scene| {
                    let preset = scene.preset();
                    json!({
                        "scene": scene.as_str(),
                        "title": preset.title,
                        "image": preset.image,
                        "keywords": preset.keywords,
                    })
                })
                .collect();
            print_json(&Value::Array(scenes));
            Ok(0)
        }
        Commands::Anchors => {
            let anchors: Vec<Value> = AnchorKey::ALL
                .into_iter()
                .map(|key| json!({ "key": key.as_str(), "point": key.point().to_value() }))
                .collect();
            print_json(&Value::Array(anchors));
            Ok(0)
        }
        Commands::Version => {
            println!(
                "solnorm {} (solnorm-core {})",
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_VERSION")
            );
            Ok(0)
        }
    }
}

// ── Helpers ───────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> solnorm_core::Result<EngineConfig> {
    match path {
        Some(p) => {
            tracing::debug!(path = %p.display(), "loading configuration");
            EngineConfig::from_file(p)
        }
        None => Ok(EngineConfig::default()),
    }
}

fn resolve_defaults(config: &EngineConfig, cli_codes: Option<&[String]>) -> Vec<UsageScene> {
    match cli_codes {
        Some(codes) => scenes_from_codes(codes),
        None => config.default_checked_scenes(),
    }
}

fn read_json(path: &Path) -> solnorm_core::Result<Value> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("{} {}", "error:".red().bold(), e),
    }
}
