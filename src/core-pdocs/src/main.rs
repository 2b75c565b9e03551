use std::path::PathBuf;

use clap::{Parser, Subcommand};
use core_pdocs::fetch::redact_url;
use core_pdocs::{DocumentationService, ExtractorRegistry, GithubCredentials, ResolverSettings, setup_logging};

#[derive(Parser)]
#[command(name = "core-pdocs")]
#[command(about = "Resolve plugin documentation URLs into embeddable HTML", long_about = None)]
struct PdocsCli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and clean the documentation behind a URL.
    Resolve {
        #[arg(value_parser = validate_url)]
        url: String,
        /// Write the HTML here instead of stdout.
        #[arg(short, long, value_parser = validate_output_file)]
        output: Option<PathBuf>,
    },

    /// Report which extractor recognizes a URL, without fetching anything.
    Match { url: String },
}

fn validate_url(s: &str) -> Result<String, String> {
    url::Url::parse(s)
        .map(|_| s.to_string())
        .map_err(|e| format!("Invalid URL: {}", e))
}

fn validate_output_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);

    if path.exists() && path.is_dir() {
        return Err(format!("Output path is a directory: {}", path.display()));
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        return Err(format!(
            "Output file parent directory does not exist: {}",
            parent.display()
        ));
    }

    Ok(path)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file., if it exists
    dotenvy::dotenv().ok();

    setup_logging("core_pdocs=info");

    let cli = PdocsCli::parse();

    match cli.command {
        Commands::Resolve { url, output } => {
            let service = DocumentationService::from_env()?;
            let html = service.resolve_documentation(&url).await;
            match output {
                Some(path) => {
                    std::fs::write(&path, &html)?;
                    tracing::info!("Wrote documentation for {} to {}", url, path.display());
                }
                None => println!("{html}"),
            }
        }

        Commands::Match { url } => {
            let settings = ResolverSettings::from_env()?;
            let registry = ExtractorRegistry::new(&settings, &GithubCredentials::from_env())?;
            match registry.select(&url) {
                Some(selection) => {
                    println!("extractor: {}", selection.extractor.kind());
                    println!("match:     {:?}", selection.matched);
                    println!("api url:   {}", redact_url(&selection.request.url));
                }
                None => {
                    println!("Unrecognized documentation URL: {url}");
                    std::process::exit(1)
                }
            }
        }
    }
    Ok(())
}
