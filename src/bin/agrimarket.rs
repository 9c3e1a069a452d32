//! AgriMarket CLI
//!
//! Usage:
//!   agrimarket report --crop Maize --price 12.5 --market Merkato
//!   agrimarket aggregate --crop maize
//!   agrimarket post --crop Teff --qty 200 --contact 0911000000 --price 95
//!   agrimarket transport --distance 120 --weight 1800

use std::path::PathBuf;

use agrimarket::{config, presentation, AgriMarket, ListingForm, PriceReportForm, ReportFilter};
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "agrimarket")]
#[command(about = "Local crop prices, produce listings and price aggregates")]
struct Cli {
    /// Directory holding the local record files
    #[arg(long, global = true, env = "AGRIMARKET_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record an observed price
    Report {
        #[arg(long)]
        crop: String,
        /// Price in ETB/kg
        #[arg(long)]
        price: String,
        #[arg(long, default_value = "")]
        market: String,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// List price reports
    Prices {
        #[arg(long)]
        crop: Option<String>,
        /// Case-insensitive market substring
        #[arg(long)]
        market: Option<String>,
        /// First UTC date (YYYY-MM-DD), inclusive
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last UTC date (YYYY-MM-DD), inclusive
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long)]
        limit: Option<usize>,
        /// Remove the report with this id instead of listing
        #[arg(long)]
        remove: Option<i64>,
    },
    /// List crops that have price reports
    Crops,
    /// Average price and daily series for a crop
    Aggregate {
        #[arg(long)]
        crop: Option<String>,
        /// Print the raw aggregate as JSON
        #[arg(long)]
        json: bool,
    },
    /// Min/max/average and date range for a crop
    Trend {
        #[arg(long)]
        crop: String,
    },
    /// Print a shareable average-price message
    Share {
        #[arg(long)]
        crop: Option<String>,
    },
    /// Export all price reports as CSV
    Export {
        /// Output file (defaults to stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Delete all price reports
    ClearPrices {
        #[arg(long)]
        yes: bool,
    },
    /// Post a produce listing
    Post {
        #[arg(long)]
        crop: String,
        /// Quantity in kg
        #[arg(long)]
        qty: String,
        #[arg(long)]
        contact: String,
        /// Asking price in ETB/kg
        #[arg(long)]
        price: String,
    },
    /// Show listings, newest first
    Listings {
        /// Case-insensitive crop substring
        #[arg(long)]
        search: Option<String>,
    },
    /// Print a buyer message for a listing
    Contact { id: i64 },
    /// Remove a listing
    RemoveListing { id: i64 },
    /// Delete all listings
    ClearListings {
        #[arg(long)]
        yes: bool,
    },
    /// Estimate transport cost
    Transport {
        /// Distance in km
        #[arg(long)]
        distance: String,
        /// Rate in ETB per km (defaults to the configured rate, 5)
        #[arg(long)]
        rate: Option<String>,
        /// Load weight in kg
        #[arg(long, default_value = "")]
        weight: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("AGRIMARKET_LOG")
                .unwrap_or_else(|_| EnvFilter::new("agrimarket=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut builder = AgriMarket::builder();
    if let Some(dir) = &cli.data_dir {
        builder = builder.data_dir(dir);
    }
    let market = builder.build().context("failed to open the local record store")?;

    match cli.command {
        Commands::Report { crop, price, market: origin, note } => {
            let form = PriceReportForm::new(&crop, &price).market(&origin).note(&note);
            let report = market.prices().submit(&form)?;
            println!("Price report submitted: {}", presentation::report_summary(&report));
            print_aggregate(&market, Some(report.crop_key.as_str()));
        }
        Commands::Prices { crop, market: origin, from, to, limit, remove } => {
            if let Some(id) = remove {
                if !market.prices().remove(id)? {
                    bail!("no price report with id {}", id);
                }
                println!("Price report {} removed.", id);
                return Ok(());
            }
            let mut filter = ReportFilter::new();
            if let Some(c) = &crop {
                filter.crop(c);
            }
            if let Some(m) = &origin {
                filter.market_like(m);
            }
            if let Some(d) = from {
                filter.date_from(d);
            }
            if let Some(d) = to {
                filter.date_to(d);
            }
            if let Some(n) = limit {
                filter.newest_first().limit(n);
            }
            let reports = market.prices().search(&filter);
            println!("Reports: {}", reports.len());
            for report in &reports {
                println!("{}", presentation::report_summary(report));
            }
        }
        Commands::Crops => {
            let keys = market.aggregates().crop_keys();
            if keys.is_empty() {
                println!("No price reports yet. Common crops: {}", config::COMMON_CROPS.join(", "));
            }
            for option in presentation::crop_options(&keys) {
                println!("{:<16} {}", option.value, option.label);
            }
        }
        Commands::Aggregate { crop, json } => {
            if json {
                let view = market.aggregates().view(crop.as_deref());
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_aggregate(&market, crop.as_deref());
            }
        }
        Commands::Trend { crop } => match market.prices().trend(&crop) {
            Some(trend) => {
                let date = |d: Option<NaiveDate>| {
                    d.map(|d| d.to_string()).unwrap_or_else(|| config::NO_DATA.to_string())
                };
                println!("{}", presentation::capitalize(&trend.crop_key));
                println!("  reports: {}", trend.data_points);
                println!("  min:     {}", presentation::format_price(trend.min_price));
                println!("  max:     {}", presentation::format_price(trend.max_price));
                println!("  average: {}", presentation::format_price(trend.avg_price));
                println!("  from {} to {}", date(trend.first_date), date(trend.last_date));
            }
            None => println!("No reports for {}.", crop.trim()),
        },
        Commands::Share { crop } => {
            println!("{}", market.aggregates().share_text(crop.as_deref())?);
        }
        Commands::Export { out } => match out {
            Some(path) => {
                let rows = market.prices().export_csv_to(&path)?;
                println!("Exported {} reports to {}", rows, path.display());
            }
            None => println!("{}", market.prices().export_csv()?),
        },
        Commands::ClearPrices { yes } => {
            if !yes {
                bail!("refusing to clear all price reports without --yes");
            }
            market.prices().clear()?;
            println!("All price reports cleared.");
        }
        Commands::Post { crop, qty, contact, price } => {
            let listing = market
                .listings()
                .post(&ListingForm::new(&crop, &qty, &contact, &price))?;
            println!("Listing posted:");
            println!("{}", presentation::listing_summary(&listing));
        }
        Commands::Listings { search } => {
            let listings = match search.as_deref() {
                Some(s) => market.listings().search(s),
                None => market.listings().list(),
            };
            if listings.is_empty() {
                println!("No active listings");
            }
            for listing in &listings {
                println!("{}", presentation::listing_summary(listing));
            }
        }
        Commands::Contact { id } => {
            println!("{}", market.listings().contact_message(id)?);
        }
        Commands::RemoveListing { id } => {
            if !market.listings().remove(id)? {
                bail!("no listing with id {}", id);
            }
            println!("Listing removed.");
        }
        Commands::ClearListings { yes } => {
            if !yes {
                bail!("refusing to clear all listings without --yes");
            }
            market.listings().clear()?;
            println!("All listings cleared.");
        }
        Commands::Transport { distance, rate, weight } => {
            let estimator = market.transport();
            let rate = rate.unwrap_or_else(|| estimator.rate_per_km.to_string());
            let cost = estimator.parse_and_estimate(&distance, &rate, &weight)?;
            println!("{}", presentation::format_cost(cost));
        }
    }

    Ok(())
}

/// Recompute the aggregate for `crop` and render it.
fn print_aggregate(market: &AgriMarket, crop: Option<&str>) {
    let view = market.aggregates().view(crop);
    println!("Reports: {}", view.total_reports);

    let options = presentation::crop_options(&view.crop_keys);
    let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
    if labels.is_empty() {
        println!("Crops: {}", config::NO_DATA);
    } else {
        println!("Crops: {}", labels.join(", "));
    }

    let Some(selected) = view.selected.as_deref() else {
        println!("Average: {}", config::NO_DATA);
        return;
    };
    println!(
        "Average for {}: {}",
        presentation::capitalize(selected),
        presentation::format_average(view.average.as_ref())
    );

    match presentation::chart_series(&view) {
        Some(chart) => {
            for (label, value) in chart.labels.iter().zip(&chart.values) {
                println!("  {}  {} {}", label, value, config::PRICE_UNIT);
            }
        }
        None => println!("  No data available"),
    }
}
