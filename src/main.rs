// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config and logging, wire the client, run one command

use anyhow::Context;
use find_places::config::Config;
use find_places::db::FavoritesRepository;
use find_places::handlers::{self, favorites, search, Command};
use find_places::services::{GooglePlacesClient, PlaceCache, PlacesClient, ReqwestTransport};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration (reads .env)
    let config = Config::from_env();

    // 2. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            config.log_level.as_str()
        } else {
            "info,reqwest=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        anyhow::bail!("Configuration error: {}", e);
    }

    log::debug!("Environment: {}", config.environment);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match Command::parse(&args, config.default_radius_meters) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}\n\n{}", e, handlers::USAGE);
            std::process::exit(2);
        }
    };

    // 3. Build transport, cache and client
    let transport = Arc::new(ReqwestTransport::from_config(&config)?);
    let api = GooglePlacesClient::with_base_url(
        config.google_places_api_key.clone(),
        config.places_base_url.clone(),
        transport,
    );
    let photos = api.photo_urls(config.photo_max_width);

    // Lives for the whole process, shared by every detail lookup
    let cache = Arc::new(PlaceCache::new());
    let client = PlacesClient::new(api, cache.clone());

    // 4. Run the command
    match command {
        Command::Search { query, extra_pages } => {
            search::run_search(&client, &photos, query, extra_pages).await?;
        }
        Command::Details { id } => {
            search::run_details(&client, &photos, &id).await?;
        }
        Command::GeoJson { query } => {
            println!("{}", search::run_geojson(&client, query).await?);
        }
        Command::Categories => {
            println!("{}", search::render_categories());
        }
        Command::Favorites => {
            let repo = open_favorites(&config).await?;
            favorites::run_list(&client, &repo).await;
        }
        Command::Like { id } => {
            let mut repo = open_favorites(&config).await?;
            favorites::run_like(&mut repo, &id).await?;
        }
    }

    let stats = cache.stats().await;
    log::debug!(
        "Detail cache: {} entries, {} hits, {} misses",
        stats.total_entries,
        stats.hits,
        stats.misses
    );

    Ok(())
}

async fn open_favorites(config: &Config) -> anyhow::Result<FavoritesRepository> {
    FavoritesRepository::open(&config.favorites_path)
        .await
        .with_context(|| format!("Failed to open favorites at {}", config.favorites_path.display()))
}
