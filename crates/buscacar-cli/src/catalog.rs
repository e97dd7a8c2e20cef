//! Catalog command handlers for the CLI.
//!
//! Everything runs against a locally parsed feed; nothing here talks to the
//! HTTP server.

use std::fmt::Write as _;
use std::path::Path;

use buscacar_catalog::{
    extract_brand_and_model, parse_feed, run_query, suggestions, CatalogStore, Facets, Page,
    ParseReport, RangeFilter, SearchRequest, SkipReason, SortKey,
};
use buscacar_core::VehicleRecord;
use clap::Args;
use rust_decimal::Decimal;

const TITLE_WIDTH: usize = 40;

/// Arguments for the `search` subcommand.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Free-text query; every word must match
    pub query: Option<String>,
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub max_price: Option<Decimal>,
    /// One of relevance, price-asc, price-desc, year-desc, mileage-asc
    #[arg(long)]
    pub sort: Option<SortKey>,
    #[arg(long, default_value = "1")]
    pub page: usize,
    /// Results per page (defaults to `BUSCACAR_PAGE_SIZE`)
    #[arg(long)]
    pub page_size: Option<usize>,
}

impl SearchArgs {
    pub(crate) fn into_request(self, default_page_size: usize) -> SearchRequest {
        SearchRequest {
            query: self.query.unwrap_or_default(),
            facets: Facets {
                brand: self.brand,
                model: self.model,
                price: self.max_price.map(RangeFilter::at_most),
                ..Facets::default()
            },
            sort: self.sort.unwrap_or_default(),
            page: self.page,
            page_size: self.page_size.unwrap_or(default_page_size),
        }
    }
}

pub(crate) fn load_store(feed: &Path, brands: &Path) -> anyhow::Result<CatalogStore> {
    CatalogStore::from_paths(feed, brands)
        .map_err(|e| anyhow::anyhow!("failed to load catalog: {e}"))
}

/// Parse the feed and print how many rows were kept or dropped.
///
/// # Errors
///
/// Returns an error if the feed cannot be read.
pub(crate) fn run_parse(feed: &Path, json: bool) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(feed)
        .map_err(|e| anyhow::anyhow!("failed to read feed {}: {e}", feed.display()))?;
    tracing::debug!(feed = %feed.display(), bytes = raw.len(), "read feed");
    let outcome = parse_feed(&raw);

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.report)?);
    } else {
        print!("{}", render_report(&outcome.report));
    }
    Ok(())
}

pub(crate) fn render_report(report: &ParseReport) -> String {
    let mut rows = vec![
        ("rows seen".to_owned(), report.rows_seen),
        ("rows kept".to_owned(), report.rows_kept),
    ];
    rows.extend(
        [
            SkipReason::TooFewFields,
            SkipReason::DuplicateLink,
            SkipReason::InvalidYear,
            SkipReason::InvalidPrice,
        ]
        .into_iter()
        .map(|reason| (format!("skipped, {reason}"), report.skipped(reason))),
    );
    rows.push(("mileage defaulted".to_owned(), report.mileage_defaulted));

    let mut out = String::new();
    for (label, count) in rows {
        let _ = writeln!(out, "{label:<32}{count:>6}");
    }
    out
}

/// Run a search and print one page of results.
///
/// # Errors
///
/// Returns an error for an invalid page or page size.
pub(crate) fn run_search(store: &CatalogStore, request: &SearchRequest) -> anyhow::Result<()> {
    let page = run_query(store, request)?;

    if page.items.is_empty() {
        println!("no vehicles found");
        return Ok(());
    }
    print!("{}", render_vehicle_table(&page));
    Ok(())
}

pub(crate) fn render_vehicle_table(page: &Page<&VehicleRecord>) -> String {
    let mut out = format!(
        "{:<16}{:<16}{:<6}{:>14}{:>10}  TITLE\n",
        "BRAND", "MODEL", "YEAR", "PRICE", "KM"
    );
    for vehicle in &page.items {
        let price = format!("R$ {}", vehicle.price);
        let mileage = if vehicle.has_reported_mileage() {
            vehicle.mileage.to_string()
        } else {
            "N/D".to_owned()
        };
        let _ = writeln!(
            out,
            "{:<16}{:<16}{:<6}{:>14}{:>10}  {}",
            vehicle.brand,
            vehicle.model,
            vehicle.year,
            price,
            mileage,
            truncate(&vehicle.description, TITLE_WIDTH)
        );
    }
    let _ = writeln!(
        out,
        "page {} of {} ({} vehicles)",
        page.page, page.total_pages, page.total_items
    );
    out
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        format!("{}...", text.chars().take(width).collect::<String>())
    } else {
        text.to_owned()
    }
}

pub(crate) fn run_suggest(store: &CatalogStore, query: &str) {
    let found = suggestions(store.all_brands(), query);
    if found.is_empty() {
        println!("no suggestions for '{query}'");
        return;
    }
    for suggestion in found {
        println!("{} {}", suggestion.brand.name, suggestion.model);
    }
}

pub(crate) fn run_extract(store: &CatalogStore, query: &str) {
    let extracted = extract_brand_and_model(store.all_brands(), query);
    println!("brand: {}", extracted.brand.as_deref().unwrap_or("-"));
    println!("model: {}", extracted.model.as_deref().unwrap_or("-"));
}
