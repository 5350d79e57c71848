use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use notehub_catalog::{
    check_domains, domain_urn, Aspect, CatalogConfig, RestEmitter, ASPECT_EMIT_ORDER,
    DEFAULT_GMS_URL,
};
use notehub_discovery::{
    default_search_roots, ExtractionReport, LocatorConfig, NoteExtractor, Vault, VaultLocator,
};
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::flags::AspectFlag;

mod flags;
mod render;

#[derive(Parser)]
#[command(name = "notehub")]
#[command(about = "Push note vault metadata into a DataHub-compatible catalog", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for output)
    #[arg(long, global = true)]
    quiet: bool,

    /// Path to a specific vault (overrides NOTEHUB_VAULT_PATH and the
    /// default search locations)
    #[arg(long, global = true)]
    vault_path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List discovered vaults and notes without ingesting
    List(ListArgs),

    /// Discover vaults and emit note metadata to the catalog
    Ingest(IngestArgs),

    /// Create the configured domain if it doesn't exist
    #[command(name = "create-domain")]
    CreateDomain,

    /// Look up domain associations for dataset URNs via GraphQL
    #[command(name = "check-domain")]
    CheckDomain(CheckDomainArgs),
}

#[derive(Args)]
struct ListArgs {
    /// Emit results as JSON on stdout
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct IngestArgs {
    /// Print what would be ingested without emitting
    #[arg(long)]
    dry_run: bool,

    /// Only emit specific aspects
    #[arg(long, num_args = 1.., value_enum)]
    aspects: Option<Vec<AspectFlag>>,

    /// Pause between notes to avoid overwhelming the server
    #[arg(long, default_value_t = 100)]
    sleep_ms: u64,
}

#[derive(Args)]
struct CheckDomainArgs {
    /// Dataset URNs to look up
    #[arg(required = true)]
    urns: Vec<String>,

    /// Emit results as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Retries per URN on network failure
    #[arg(long, default_value_t = 3)]
    retries: u32,

    /// Delay between retries in milliseconds
    #[arg(long, default_value_t = 1_000)]
    delay_ms: u64,
}

#[derive(Serialize)]
struct VaultListing {
    vault: Vault,
    #[serde(flatten)]
    report: ExtractionReport,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    let json_output = match &cli.command {
        Commands::List(args) => args.json,
        Commands::CheckDomain(args) => args.json,
        _ => false,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::List(args) => run_list(args, cli.vault_path),
        Commands::Ingest(args) => run_ingest(args, cli.vault_path).await,
        Commands::CreateDomain => run_create_domain().await,
        Commands::CheckDomain(args) => run_check_domain(args).await,
    }
}

/// Source catalog settings from the environment. This is the only place
/// env vars are read; the library crates take explicit config values.
fn catalog_config_from_env() -> CatalogConfig {
    let user = env::var("USER").unwrap_or_else(|_| "local".to_string());
    CatalogConfig {
        gms_url: env::var("DATAHUB_GMS").unwrap_or_else(|_| DEFAULT_GMS_URL.to_string()),
        token: env::var("DATAHUB_TOKEN").ok().filter(|t| !t.is_empty()),
        owner_urn: env::var("DATAHUB_OWNER_URN")
            .unwrap_or_else(|_| format!("urn:li:corpuser:{user}")),
        domain_urn: env::var("DATAHUB_DOMAIN_URN")
            .ok()
            .filter(|d| !d.is_empty())
            .map(|d| domain_urn(&d)),
        user,
    }
}

/// Locate vaults and extract their notes.
///
/// An explicit path (flag or NOTEHUB_VAULT_PATH) replaces the default
/// search locations entirely.
fn discover(vault_path: Option<PathBuf>) -> Vec<VaultListing> {
    let override_path = vault_path.or_else(|| {
        env::var("NOTEHUB_VAULT_PATH")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    });

    let locator = VaultLocator::new(LocatorConfig {
        search_roots: dirs::home_dir()
            .map(default_search_roots)
            .unwrap_or_default(),
        ..LocatorConfig::default()
    });

    let vaults = match override_path {
        Some(path) => locator.probe(path).into_iter().collect(),
        None => locator.locate(),
    };

    let extractor = NoteExtractor::default();
    vaults
        .into_iter()
        .map(|vault| {
            let report = extractor.extract(&vault);
            VaultListing { vault, report }
        })
        .collect()
}

fn run_list(args: ListArgs, vault_path: Option<PathBuf>) -> Result<()> {
    let listings = discover(vault_path);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
        return Ok(());
    }

    println!("Found {} vault(s):\n", listings.len());
    for listing in &listings {
        print!("{}", render::format_vault_info(&listing.vault, &listing.report));
        if listing.report.notes.is_empty() {
            println!("  No notes found in this vault.");
        } else {
            for note in &listing.report.notes {
                print!("{}", render::format_note_info(note, "  "));
            }
        }
        for skip in &listing.report.skipped {
            println!("  Skipped {}: {}", skip.path.display(), skip.reason);
        }
        println!();
    }
    Ok(())
}

async fn run_ingest(args: IngestArgs, vault_path: Option<PathBuf>) -> Result<()> {
    let listings = discover(vault_path);
    if listings.is_empty() {
        anyhow::bail!("no vaults found; pass --vault-path or set NOTEHUB_VAULT_PATH");
    }

    let aspects: Vec<Aspect> = match args.aspects {
        Some(flags) => flags.iter().map(|f| f.as_domain()).collect(),
        None => ASPECT_EMIT_ORDER.to_vec(),
    };

    if args.dry_run {
        log::info!("Dry run - would emit metadata for:");
        for listing in &listings {
            log::info!("  Vault: {}", listing.vault.name);
            for note in &listing.report.notes {
                log::info!("    Note: {}", note.relative_path.display());
            }
        }
        return Ok(());
    }

    let emitter = RestEmitter::new(catalog_config_from_env())?;

    if aspects.contains(&Aspect::Domain) && emitter.config().domain_urn.is_some() {
        if let Err(e) = emitter.ensure_domain().await {
            log::warn!("Failed to create domain: {e}");
        }
    }

    for listing in &listings {
        for note in &listing.report.notes {
            emitter
                .emit_note(&listing.vault, note, &aspects)
                .await
                .with_context(|| {
                    format!(
                        "emitting {} from vault {}",
                        note.relative_path.display(),
                        listing.vault.name
                    )
                })?;
            tokio::time::sleep(Duration::from_millis(args.sleep_ms)).await;
        }
    }

    println!("Ingestion complete!");
    Ok(())
}

async fn run_create_domain() -> Result<()> {
    let emitter = RestEmitter::new(catalog_config_from_env())?;
    emitter
        .ensure_domain()
        .await
        .context("set DATAHUB_DOMAIN_URN to the domain to create")?;
    println!("Domain ready.");
    Ok(())
}

async fn run_check_domain(args: CheckDomainArgs) -> Result<()> {
    let config = catalog_config_from_env();
    let reports = check_domains(
        &config,
        &args.urns,
        args.retries,
        Duration::from_millis(args.delay_ms),
    )
    .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        match (&report.domain, &report.error) {
            (Some(domain), _) => println!(
                "{} -> {} ({})",
                report.urn,
                domain.name.as_deref().unwrap_or(&domain.id),
                domain.urn
            ),
            (None, Some(error)) => println!("{} -> lookup failed: {error}", report.urn),
            (None, None) => println!("{} -> no domain assigned", report.urn),
        }
    }
    Ok(())
}
