#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the victim statistics dashboard.
//!
//! Loads the yearly statistics CSVs and the boundary layers once at
//! startup, then serves per-page figure payloads under `/api` and the
//! static frontend from `web/`. All datasets are read-only after
//! startup and shared via `Arc`; every request recomputes its figures
//! synchronously from the filter parameters it carries.

mod handlers;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use opferdash_geojoin::PolygonIndex;
use opferdash_geometry::GeometryStore;
use opferdash_stats::{StatsStore, loader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// First reporting year of the bundled dataset.
const FIRST_YEAR: u16 = 2019;
/// Last reporting year of the bundled dataset.
const LAST_YEAR: u16 = 2024;

/// The loaded boundary layers plus their per-state name indexes.
pub struct GeoData {
    /// State and district polygon layers.
    pub store: GeometryStore,
    /// Name index over the state layer.
    pub state_index: PolygonIndex,
    /// Name index over the district layer.
    pub district_index: PolygonIndex,
}

impl GeoData {
    /// Builds the name indexes for a loaded store.
    #[must_use]
    pub fn new(store: GeometryStore) -> Self {
        let state_index = PolygonIndex::build(store.states());
        let district_index = PolygonIndex::build(store.districts());
        Self {
            store,
            state_index,
            district_index,
        }
    }
}

/// Shared application state.
pub struct AppState {
    /// The statistics dataset.
    pub stats: Arc<StatsStore>,
    /// Boundary data; `None` when loading failed at startup, in which
    /// case the map figures degrade to placeholders.
    pub geo: Option<Arc<GeoData>>,
}

/// Starts the dashboard server.
///
/// Statistics loading is fatal: without the CSVs there is nothing to
/// serve. Geometry loading degrades: the server starts without maps and
/// the geographic page shows placeholder figures.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind
/// or encounters a runtime error.
///
/// # Panics
///
/// Panics if the statistics files cannot be loaded.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let data_dir: PathBuf = std::env::var("DATA_DIR")
        .unwrap_or_else(|_| "data".to_string())
        .into();

    log::info!("Loading victim statistics from {}...", data_dir.display());
    let stats = loader::load_years(&data_dir, FIRST_YEAR..=LAST_YEAR)
        .expect("Failed to load statistics files");
    log::info!(
        "Loaded {} rows across {} year(s)",
        stats.records().len(),
        stats.years().len()
    );

    let geo = load_geo(&data_dir);

    let state = web::Data::new(AppState {
        stats: Arc::new(stats),
        geo: geo.map(Arc::new),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/filters", web::get().to(handlers::filters))
                    .route("/overview", web::get().to(handlers::overview))
                    .route("/geo", web::get().to(handlers::geo))
                    .route("/geo/view", web::post().to(handlers::geo_view))
                    .route("/categories", web::get().to(handlers::categories))
                    .route("/temporal", web::get().to(handlers::temporal))
                    .route("/trends", web::get().to(handlers::trends)),
            )
            // Serve the static frontend
            .service(Files::new("/", "web").index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}

/// Loads the boundary layers, degrading to `None` on failure.
fn load_geo(data_dir: &Path) -> Option<GeoData> {
    log::info!("Loading boundary layers from {}...", data_dir.display());
    match opferdash_geometry::loader::load_store(data_dir) {
        Ok(store) => Some(GeoData::new(store)),
        Err(e) => {
            log::warn!("Boundary layers unavailable, maps degrade to placeholders: {e}");
            None
        }
    }
}
