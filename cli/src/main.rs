//! Command-line front-end for the apigen compiler.
//!
//! Loads an OpenAPI document from a JSON or YAML file, compiles it into the
//! intermediate model and prints the model as JSON.

use apigen_core::{compile, CompileError, CompileResult, Document, GeneratorConfig};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(
    name = "apigen",
    version,
    about = "Compile an OpenAPI 3 spec into a handler-group model"
)]
struct Cli {
    /// Path to the OpenAPI document (JSON or YAML).
    spec: PathBuf,

    /// Root namespace for handler groups.
    #[arg(long, env = "APIGEN_GROUP_NS", default_value = "app")]
    group_namespace: String,

    /// Namespace for enum artifacts.
    #[arg(long, env = "APIGEN_ENUM_NS", default_value = "app.enums")]
    enum_namespace: String,

    /// URL prefix prepended to paths before group derivation.
    #[arg(long, default_value = "")]
    path_prefix: String,

    /// Identifier for the generated route table.
    #[arg(long, default_value = "routes.api")]
    route_table: String,

    /// Write the model to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            group_namespace: self.group_namespace.clone(),
            enum_namespace: self.enum_namespace.clone(),
            path_prefix: self.path_prefix.clone(),
            route_table_ident: self.route_table.clone(),
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> CompileResult<()> {
    let content = fs::read_to_string(&cli.spec)?;
    let document = load_document(&cli.spec, &content)?;

    log::info!("compiling {}", cli.spec.display());
    let model = compile(&document, &cli.config())?;

    let json = serde_json::to_string_pretty(&model)
        .map_err(|e| CompileError::Document(format!("failed to encode model: {}", e)))?;
    match &cli.output {
        Some(path) => fs::write(path, json)?,
        None => println!("{}", json),
    }
    Ok(())
}

/// Picks the decoder from the file extension, falling back to
/// try-JSON-then-YAML for anything else.
fn load_document(path: &Path, content: &str) -> CompileResult<Document> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Document::from_json_str(content),
        Some("yaml") | Some("yml") => Document::from_yaml_str(content),
        _ => Document::from_str_any(content),
    }
}
