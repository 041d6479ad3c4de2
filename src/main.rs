use clap::Parser;
use artwork_table::cli::dispatcher::Dispatcher;
use artwork_table::cli::main_types::Cli;
use artwork_table::storage::config::{CONFIG_FILE_NAME, Config};
use artwork_table::utils::logging::init_logging;
use std::path::PathBuf;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli
        .config_dir
        .as_ref()
        .map(|dir| PathBuf::from(dir).join(CONFIG_FILE_NAME));

    let config = match Config::load(config_path.clone()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading config: {}", err);
            std::process::exit(1);
        }
    };

    if cli.verbose {
        println!("Verbose mode is enabled");
        if let Some(config_dir) = &cli.config_dir {
            println!("Using config directory: {}", config_dir);
        }
    }

    let dispatcher = Dispatcher::new(config, config_path, cli.verbose)
        .with_base_url(cli.base_url)
        .with_no_color(cli.no_color);

    if let Err(e) = dispatcher.dispatch(cli.command).await {
        eprintln!("Error: {}", e);
        if let Some(hint) = e.troubleshooting_hint() {
            eprintln!("{} {}", e.severity().emoji(), hint);
        }
        std::process::exit(1);
    }
}
