use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use annonces_client::ReqwestFetcher;
use annonces_core::models::Listing;
use annonces_core::report::{condition_counts, price_histogram};
use annonces_core::scrape::ScrapeService;
use annonces_core::site::{Category, MAX_PAGE};
use annonces_core::traits::SnapshotStore;
use annonces_store::CsvStore;

#[derive(Parser)]
#[command(name = "annonces", version, about = "Expat-Dakar classifieds scraper")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape one category page and print the listings
    Scrape {
        /// Category slug (e.g. "climatisation")
        #[arg(short, long, value_parser = Category::parse)]
        category: Category,

        /// Page number
        #[arg(short, long, default_value_t = 1,
              value_parser = clap::value_parser!(u32).range(1..=MAX_PAGE as i64))]
        page: u32,

        /// Write a CSV snapshot into the data folder
        #[arg(long, default_value_t = false)]
        save: bool,

        /// Print listings as JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Snapshot folder
        #[arg(long, env = "ANNONCES_DATA_DIR", default_value = "data")]
        dir: PathBuf,
    },

    /// List saved CSV snapshots
    Files {
        /// Snapshot folder
        #[arg(long, env = "ANNONCES_DATA_DIR", default_value = "data")]
        dir: PathBuf,
    },

    /// Condition and price charts over saved snapshots
    Dashboard {
        /// Snapshot folder
        #[arg(long, env = "ANNONCES_DATA_DIR", default_value = "data")]
        dir: PathBuf,

        /// Number of price buckets
        #[arg(long, default_value_t = 8)]
        buckets: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Setup tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape {
            category,
            page,
            save,
            json,
            dir,
        } => cmd_scrape(category, page, save, json, &dir).await,
        Commands::Files { dir } => cmd_files(&dir),
        Commands::Dashboard { dir, buckets } => cmd_dashboard(&dir, buckets),
    }
}

async fn cmd_scrape(
    category: Category,
    page: u32,
    save: bool,
    json: bool,
    dir: &Path,
) -> Result<()> {
    let fetcher = ReqwestFetcher::new().map_err(|e| anyhow::anyhow!(e))?;
    let service = ScrapeService::new(fetcher).map_err(|e| anyhow::anyhow!(e))?;

    println!("{} (page {})\n", category.label(), page);

    let listings = match service.scrape_page(category, page).await {
        Ok(listings) => listings,
        Err(e) if e.is_fetch_failure() => {
            tracing::error!("Request failed: {e}");
            Vec::new()
        }
        Err(e) => return Err(anyhow::anyhow!(e)),
    };

    if listings.is_empty() {
        println!("Aucune donnée trouvée ou scrapée.");
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
    } else {
        print_table(&listings);
    }
    println!("\nTotal des données scrapées: {}", listings.len());

    if save {
        let store = CsvStore::new(dir);
        let path = store
            .save(category, page, &listings)
            .map_err(|e| anyhow::anyhow!(e))?;
        println!("Snapshot: {}", path.display());
    }

    Ok(())
}

fn cmd_files(dir: &Path) -> Result<()> {
    let store = CsvStore::new(dir);
    let files = store.list().map_err(|e| anyhow::anyhow!(e))?;

    if files.is_empty() {
        println!("No CSV snapshots in {}", dir.display());
        return Ok(());
    }

    for file in &files {
        println!(
            "{:<44} {:>10} bytes  {}",
            file.name(),
            file.size_bytes,
            file.modified.format("%Y-%m-%d %H:%M:%S UTC"),
        );
    }
    println!("\nTotal: {} snapshots", files.len());

    Ok(())
}

fn cmd_dashboard(dir: &Path, buckets: usize) -> Result<()> {
    let store = CsvStore::new(dir);
    let files = store.list().map_err(|e| anyhow::anyhow!(e))?;

    if files.is_empty() {
        println!("No CSV snapshots in {} to chart", dir.display());
        return Ok(());
    }

    for file in &files {
        let listings = store.load(&file.path).map_err(|e| anyhow::anyhow!(e))?;
        println!("== {} ({} listings) ==\n", file.name(), listings.len());
        if listings.is_empty() {
            continue;
        }

        println!("Condition:");
        let counts = condition_counts(&listings);
        let tallest = counts.iter().map(|(_, c)| *c).max().unwrap_or(1);
        for (label, count) in &counts {
            println!("  {:<24} {:>5} {}", label, count, bar(*count, tallest));
        }

        println!("\nPrice (F Cfa):");
        let hist = price_histogram(&listings, buckets);
        let tallest = hist.iter().map(|b| b.count).max().unwrap_or(1);
        for bucket in &hist {
            println!(
                "  {:>12.0} .. {:>12.0} {:>5} {}",
                bucket.lower,
                bucket.upper,
                bucket.count,
                bar(bucket.count, tallest)
            );
        }
        println!();
    }

    Ok(())
}

fn print_table(listings: &[Listing]) {
    println!(
        "{:<40} {:<16} {:>14} {:<28} {}",
        "Details", "Condition", "Price (F Cfa)", "Address", "Image Link"
    );
    for listing in listings {
        println!(
            "{:<40} {:<16} {:>14.1} {:<28} {}",
            truncate(&listing.title, 40),
            truncate(&listing.condition, 16),
            listing.price,
            truncate(&listing.address, 28),
            listing.image_url
        );
    }
}

const BAR_WIDTH: usize = 40;

fn bar(count: usize, tallest: usize) -> String {
    if tallest == 0 {
        return String::new();
    }
    "#".repeat((count * BAR_WIDTH).div_ceil(tallest).min(BAR_WIDTH))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
