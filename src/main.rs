use clap::Parser;
use filesearch::core::config::{self, CliOverrides};
use log::warn;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "filesearch", about = "Type-ahead search over a remote file index")]
struct Args {
    /// Search endpoint URL (the query is sent as `?keyword=`)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Pause in typing, in milliseconds, before a search is sent
    #[arg(short, long)]
    debounce_ms: Option<u64>,

    /// Initial query to search for on startup
    #[arg(short, long)]
    query: Option<String>,

    /// Where to write the log file
    #[arg(long, default_value = "filesearch.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The terminal belongs to the UI, so logs go to a file
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        warn!("Falling back to default config: {}", e);
        config::FileSearchConfig::default()
    });
    let cli = CliOverrides {
        endpoint: args.endpoint,
        debounce_ms: args.debounce_ms,
        query: args.query,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "filesearch starting up: endpoint={}, debounce={}ms",
        resolved.endpoint,
        resolved.debounce_ms
    );

    filesearch::tui::run(resolved)
}
