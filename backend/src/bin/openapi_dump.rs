//! Print or write the OpenAPI document for the box office API.

use std::path::PathBuf;

use box_office::doc::ApiDoc;
use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use utoipa::OpenApi;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Format {
    #[default]
    Json,
    Yaml,
}

/// `openapi-dump` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "openapi-dump",
    about = "Render the box office OpenAPI document",
    version
)]
struct CliArgs {
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
    /// Write to this file instead of standard output.
    #[arg(long, value_name = "path")]
    output: Option<PathBuf>,
}

fn render(format: Format) -> Result<String> {
    let doc = ApiDoc::openapi();
    match format {
        Format::Json => doc.to_pretty_json().wrap_err("serialise OpenAPI as JSON"),
        Format::Yaml => doc.to_yaml().wrap_err("serialise OpenAPI as YAML"),
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let rendered = render(args.format)?;
    match args.output {
        Some(path) => std::fs::write(&path, rendered)
            .wrap_err_with(|| format!("write {}", path.display()))?,
        None => println!("{rendered}"),
    }
    Ok(())
}
