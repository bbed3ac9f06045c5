//! Subcommands

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use criteria_core::catalog::operators_for;
use criteria_core::OperatorDescriptor;
use criteria_sdk::{load_catalog, EditorConfig, FilterEditor, FilterEditorBuilder};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that a saved criteria file is complete
    Check {
        /// Criteria payload (JSON)
        file: PathBuf,
    },

    /// List the fields a saved criteria file references
    Fields {
        /// Criteria payload (JSON)
        file: PathBuf,

        /// Computed alias to leave out (repeatable)
        #[arg(long = "alias")]
        aliases: Vec<String>,
    },

    /// List the operators legal for a field type or a catalogued field
    Operators {
        /// Short field type, e.g. Integer
        #[arg(long = "type", conflicts_with = "field")]
        field_type: Option<String>,

        /// Field alias, looked up in the catalog
        #[arg(long)]
        field: Option<String>,

        /// Field catalog (YAML or JSON); defaults to the config's catalog_file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Decode a saved criteria file and print it re-encoded
    Normalize {
        /// Criteria payload (JSON)
        file: PathBuf,

        /// Print on one line
        #[arg(long)]
        compact: bool,
    },
}

pub fn run(command: Command, config_path: Option<&Path>) -> Result<ExitCode> {
    let config = match config_path {
        Some(path) => EditorConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EditorConfig::default(),
    };

    match command {
        Command::Check { file } => {
            let editor = open(&file, config)?;
            let (report, complete) = check_report(&editor);
            println!("{}", report);
            Ok(if complete {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Fields { file, aliases } => {
            let mut editor = open(&file, config)?;
            editor.add_aliases(aliases);
            for field in editor.required_fields() {
                println!("{}", field);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Operators {
            field_type,
            field,
            catalog,
        } => {
            let operators = match (field_type, field) {
                (Some(field_type), _) => operators_for(&field_type),
                (None, Some(field)) => {
                    let path = catalog
                        .or(config.catalog_file)
                        .context("--field needs a catalog (--catalog or catalog_file)")?;
                    load_catalog(&path)?.operators_for_field(&field)?
                }
                (None, None) => bail!("pass --type or --field"),
            };
            println!("{}", operator_table(&operators));
            Ok(ExitCode::SUCCESS)
        }
        Command::Normalize { file, compact } => {
            let editor = open(&file, config)?;
            let payload = editor.payload();
            let text = if compact {
                payload.to_string()
            } else {
                serde_json::to_string_pretty(&payload)?
            };
            println!("{}", text);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Open an edit session on a saved payload
fn open(file: &Path, config: EditorConfig) -> Result<FilterEditor> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let payload: Value = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", file.display()))?;
    info!("Opened {}", file.display());

    Ok(FilterEditorBuilder::new()
        .with_config(config)
        .with_payload(payload)
        .build()?)
}

fn check_report(editor: &FilterEditor) -> (String, bool) {
    let issues = editor.issues();
    if issues.is_empty() {
        return ("complete".to_string(), true);
    }
    let mut lines = vec![format!("incomplete: {} issue(s)", issues.len())];
    lines.extend(issues.iter().map(|d| format!("  {}", d)));
    (lines.join("\n"), false)
}

fn operator_table(operators: &[&OperatorDescriptor]) -> String {
    operators
        .iter()
        .map(|op| format!("{:<20} {:<13} {}", op.key, op.shape.to_string(), op.label))
        .collect::<Vec<_>>()
        .join("\n")
}
