use clap::Parser;
use page_search::browser::webdriver::WebDriverProvider;
use page_search::{SearchConfig, SearchError, SearchResults, Searcher};
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    ::log::info!("Starting search for: {}", args.query);
    let start_time = std::time::Instant::now();

    let results = match run(&args).await {
        Ok(results) => results,
        Err(e) => {
            ::log::error!("Search failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    ::log::info!(
        "Search complete - {} results in {:.2} seconds",
        results.results.len(),
        start_time.elapsed().as_secs_f64()
    );

    match serde_json::to_string_pretty(&results) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            ::log::error!("Failed to serialize results: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<SearchResults, SearchError> {
    let mut config = match &args.config {
        Some(path) => SearchConfig::from_file(path)?,
        None => SearchConfig::default(),
    }
    .with_env_overrides();

    if let Some(webdriver_url) = &args.webdriver_url {
        config.webdriver_url = webdriver_url.clone();
    }
    if args.headed {
        config.headless = false;
    }

    let provider = WebDriverProvider::new(&config);
    Searcher::new(provider, config)?
        .search(&args.query, args.max_results)
        .await
}
