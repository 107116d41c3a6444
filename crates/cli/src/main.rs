mod menu;

use std::fs::{self, OpenOptions};
use std::io;

use anyhow::Result;
use tracing_subscriber::{prelude::*, EnvFilter};

use rentdesk_core::{
    config::{self, AppConfig},
    RentalService,
};

fn main() -> Result<()> {
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;
    tracing::info!("Using data directory {}", config.data_dir.display());

    let mut service = RentalService::bootstrap(&config);
    service.seed_default_fleet();

    let stdin = io::stdin();
    let stdout = io::stdout();
    menu::run(&mut service, &mut stdin.lock(), &mut stdout.lock())
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("rentdesk.log");

    let env_filter = EnvFilter::from_default_env();

    // Stdout carries the menu, so logs go to the file only.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .compact()
        .with_writer(move || {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .expect("failed to open log file")
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
