use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use wanderlust::Mode;
use wanderlust::core::config;
use wanderlust::tui;

#[derive(Parser)]
#[command(name = "wanderlust", about = "Travel app shell and package dashboard")]
struct Args {
    /// Application to run
    #[arg(short, long, default_value_t, value_enum)]
    mode: Mode,

    /// Backend base URL (overrides config and WANDERLUST_SERVER_URL)
    #[arg(short, long)]
    server: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to wanderlust.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("wanderlust.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    let resolved = config::resolve(&file_config, args.server.as_deref());

    log::info!(
        "Wanderlust starting in {:?} mode (server: {})",
        args.mode,
        resolved.server_url
    );

    match args.mode {
        Mode::App => tui::run_app(resolved),
        Mode::Dashboard => tui::run_dashboard(resolved),
    }
}
