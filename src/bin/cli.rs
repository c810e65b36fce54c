//! Command-line entry point for scraping the registry.

use clap::Parser;
use rera_scrape::{
    ChromeRenderer, NavigationController, RendererOptions, ResultCollector, ScrapeConfig,
};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "rera-scrape", version, about = "Scrape project records from the Odisha RERA registry")]
struct Cli {
    /// List page to scrape
    #[arg(long, default_value = "https://rera.odisha.gov.in/projects/project-list")]
    url: String,

    /// Maximum number of records to process
    #[arg(long, default_value_t = 6)]
    max_records: usize,

    /// Seconds to pause between records
    #[arg(long, default_value_t = 5)]
    delay: u64,

    /// Output file for the extracted records
    #[arg(long, default_value = "rera_projects.json")]
    output: PathBuf,

    /// Launch the browser with a visible window
    #[arg(long)]
    headed: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = ScrapeConfig::new()
        .list_url(cli.url)
        .max_records(cli.max_records)
        .inter_record_delay(Duration::from_secs(cli.delay));

    let renderer = ChromeRenderer::launch(RendererOptions::new().headless(!cli.headed))?;
    let mut controller = NavigationController::new(renderer, config);

    // Release the session even when the run fails partway
    let outcome = controller.run();
    if let Err(e) = controller.shutdown() {
        log::warn!("Browser shutdown reported an error: {}", e);
    }
    let records = outcome?;

    let mut collector = ResultCollector::new();
    collector.extend(records);
    collector.print_report();
    collector.write_json(&cli.output)?;

    Ok(())
}
