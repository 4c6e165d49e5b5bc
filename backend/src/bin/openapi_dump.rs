//! Print the OpenAPI document as JSON (default) or YAML.

use clap::Parser;
use contacts_backend::doc::ApiDoc;
use utoipa::OpenApi;

/// Command-line options for the OpenAPI dump.
#[derive(Debug, Parser)]
#[command(about = "Print the contacts backend OpenAPI document")]
struct Cli {
    /// Emit YAML instead of JSON.
    #[arg(long)]
    yaml: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let doc = ApiDoc::openapi();
    let rendered = if cli.yaml {
        doc.to_yaml()?
    } else {
        doc.to_pretty_json()?
    };
    println!("{rendered}");
    Ok(())
}
