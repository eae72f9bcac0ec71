//! catview command-line browser
//!
//! Loads an exported catalog and drills through class -> subclass -> object,
//! either one step per invocation or from an interactive shell.

mod commands;
mod formatter;
mod repl;

use std::path::PathBuf;
use std::sync::Arc;

use catview_core::config::DEFAULT_DATA_DIR;
use catview_core::{CatalogOptions, CatalogStore, DirectorySource, ExplorerConfig, Navigator};
use clap::{Parser, Subcommand};
use formatter::OutputFormat;
use tracing::info;

/// catview Command-Line Browser
#[derive(Parser, Debug)]
#[command(name = "catview")]
#[command(version, about = "Browse an exported class/subclass/object catalog")]
pub struct Args {
    /// Directory holding the exported catalog tables
    #[arg(short = 'd', long, default_value = DEFAULT_DATA_DIR)]
    pub data: PathBuf,

    /// Output format
    #[arg(long, default_value = "table", value_enum)]
    pub format: OutputFormat,

    /// Scalar tag shown for attributes without a declared type
    #[arg(long)]
    pub unspecified_label: Option<String>,

    /// Cell values marking an attribute as domain-typed (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub domain_markers: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every class
    Classes,
    /// List the subclasses of a class
    Subclasses { class: String },
    /// List the objects of a subclass
    Objects { subclass: String },
    /// Show an object's attribute sheet
    Show { object: String },
    /// Show rows loaded and ignored per table
    Stats,
    /// Start the interactive shell (default)
    Shell,
}

impl From<&Args> for ExplorerConfig {
    fn from(args: &Args) -> Self {
        let mut catalog = CatalogOptions::default();
        if let Some(label) = &args.unspecified_label {
            catalog = catalog.with_unspecified_type_label(label.clone());
        }
        if !args.domain_markers.is_empty() {
            catalog = catalog.with_domain_markers(args.domain_markers.iter().cloned());
        }

        ExplorerConfig::new(&args.data).with_catalog_options(catalog)
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("catview=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = ExplorerConfig::from(&args);
    info!(data = %config.source.data_dir.display(), "Loading catalog");

    let tables = DirectorySource::new(config.source.clone())
        .load_async()
        .await?;
    let store = Arc::new(CatalogStore::load_with_options(&tables, config.catalog));
    let mut navigator = Navigator::new(store);
    let formatter = formatter::create_formatter(args.format);

    let output = match args.command.unwrap_or(Command::Shell) {
        Command::Classes => formatter.format_classes(navigator.classes()),
        Command::Subclasses { class } => {
            let subclasses = navigator.select_class(&class);
            formatter.format_subclasses(&subclasses)
        }
        Command::Objects { subclass } => {
            let objects = navigator.select_subclass(&subclass);
            formatter.format_objects(&objects)
        }
        Command::Show { object } => {
            let detail = navigator.open_object(&object)?;
            formatter.format_detail(&detail)
        }
        Command::Stats => formatter.format_report(navigator.store().report()),
        Command::Shell => return repl::run(navigator, args.format),
    };

    println!("{}", output);
    Ok(())
}
