use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use brochure::{cms, config, generate, output, types};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "brochure")]
#[command(about = "Static marketing-site generator fed by a headless CMS")]
#[command(long_about = "\
Static marketing-site generator fed by a headless CMS

Content lives in the CMS. Editors publish testimonials (type \"review\"),
pricing cards (type \"serviceCard\") and a services section document
(type \"servicesSection\"); brochure fetches them and renders a static
page with a testimonials carousel and a services/pricing section.

Pipeline:

  fetch      CMS HTTP API  →  content.json    (snapshot of all sections)
  generate   content.json  →  dist/index.html

A section whose fetch fails is logged and rendered empty — the build
never fails because the CMS was down.

Run 'brochure gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (content snapshot)
    #[arg(long, default_value = ".brochure-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch content from the CMS into a snapshot
    Fetch,
    /// Produce the final HTML page from the snapshot
    Generate,
    /// Run the full pipeline: fetch → generate
    Build,
    /// Validate config and CMS reachability without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("brochure=info")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Fetch => {
            let snapshot = fetch_snapshot(&cli.source).await?;
            write_snapshot(&cli.temp_dir, &snapshot)?;
            output::print_fetch_output(&snapshot);
        }
        Command::Generate => {
            let snapshot_path = cli.temp_dir.join("content.json");
            generate::generate(&snapshot_path, &cli.output)?;
            let snapshot = read_snapshot(&snapshot_path)?;
            output::print_generate_output(&snapshot);
        }
        Command::Build => {
            println!("==> Stage 1: Fetching content");
            let snapshot = fetch_snapshot(&cli.source).await?;
            let snapshot_path = write_snapshot(&cli.temp_dir, &snapshot)?;
            output::print_fetch_output(&snapshot);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            generate::generate(&snapshot_path, &cli.output)?;
            output::print_generate_output(&snapshot);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site_config = config::load_config(&cli.source)?;
            config::validate(&site_config)?;
            println!("==> Config is valid");
            let client = cms::CmsClient::new(&site_config.cms)?;
            println!("    Endpoint: {}", client.endpoint());
            match client.fetch_testimonials().await {
                Ok(items) => println!("    CMS reachable, {} testimonials", items.len()),
                Err(error) => println!("    CMS unreachable: {error}"),
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

async fn fetch_snapshot(
    source: &std::path::Path,
) -> Result<types::ContentSnapshot, Box<dyn std::error::Error>> {
    let site_config = config::load_config(source)?;
    config::validate(&site_config)?;
    let client = cms::CmsClient::new(&site_config.cms)?;
    Ok(client.fetch_snapshot(site_config).await)
}

fn write_snapshot(
    temp_dir: &std::path::Path,
    snapshot: &types::ContentSnapshot,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(temp_dir)?;
    let snapshot_path = temp_dir.join("content.json");
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(&snapshot_path, json)?;
    Ok(snapshot_path)
}

fn read_snapshot(
    snapshot_path: &std::path::Path,
) -> Result<types::ContentSnapshot, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(snapshot_path)?;
    Ok(serde_json::from_str(&content)?)
}
