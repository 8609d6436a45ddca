// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments (or BASE_URL / SCRAPER_LANGUAGE) with clap
// 2. Set up console + file logging
// 3. Build the renderer and the crawl session; failures here are fatal
// 4. Crawl, then print the summary
// 5. Exit 0 whenever the crawl ran, whatever happened to individual pages;
//    exit 1 on a startup error, bad command-line arguments included
// =============================================================================

mod cli;
mod crawl;
mod extract;
mod logging;
mod output;
mod render;

use anyhow::{Context, Result};
use crawl::{CrawlSession, CrawlSummary};
use render::HttpRenderer;
use tracing::info;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    let cli = cli::parse_cli(std::env::args_os())?;
    logging::setup_logging(&cli.log_file).context("failed to set up logging")?;

    let session = CrawlSession::new(&cli.base_url, cli.language.clone(), &cli.output)?;
    let mut renderer = HttpRenderer::new(cli.request_timeout()).context("error initializing renderer")?;
    info!(url = %cli.base_url, domain = session.domain(), "renderer initialized, starting crawl");

    let summary = session.crawl(&mut renderer, &cli.crawl_options()).await;

    print_summary(&summary, cli.json)
}

fn print_summary(summary: &CrawlSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!("{:<60} {:<40}", "URL", "FILE");
    println!("{}", "=".repeat(100));
    for page in &summary.pages {
        // Keep long URLs from breaking the table
        let url_display = if page.source_url.chars().count() > 57 {
            format!("{}...", page.source_url.chars().take(57).collect::<String>())
        } else {
            page.source_url.clone()
        };
        println!("{:<60} {:<40}", url_display, page.output_path);
    }

    println!();
    println!("📊 Summary:");
    println!("   📄 Crawled: {}", summary.pages_crawled);
    println!("   ✅ Saved: {}", summary.pages_saved);
    println!("   ⏭️  Skipped (thin content): {}", summary.pages_skipped);
    println!("   ❌ Failed to render: {}", summary.render_failures);
    println!("   💾 Failed to write: {}", summary.write_failures);
    println!("   📋 Still queued: {}", summary.queued_remaining);
    match &summary.index_path {
        Some(path) => println!("   🗂️  Index: {}", path.display()),
        None => println!("   🗂️  Index: not written"),
    }

    Ok(())
}
