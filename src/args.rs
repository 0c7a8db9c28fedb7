use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "page-search")]
#[command(about = "Searches the web and extracts the main content of each result page")]
#[command(version)]
pub struct Args {
    /// Search query
    pub query: String,

    /// Maximum number of results to extract
    #[arg(short = 'n', long, default_value_t = 3)]
    pub max_results: usize,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// WebDriver URL (overrides the configuration and WEBDRIVER_URL)
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Show the browser window instead of running headless
    #[arg(long)]
    pub headed: bool,
}
