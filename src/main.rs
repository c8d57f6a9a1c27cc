mod app;
mod app_state;
mod config;
mod event_handlers;
mod filtering;
mod logging;
mod rendering;

use std::{sync::Arc, time::Duration};

use app::App;
use config::Config;
use tabula_data::{JsonDirSource, MockSource, RecordSource, SessionStore};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let config = match Config::default_path() {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    let _log_guard = logging::init(&config)?;
    info!(?config, "starting tabula");

    let source: Arc<dyn RecordSource> = match &config.data.dir {
        Some(dir) => Arc::new(JsonDirSource::new(dir)),
        None => Arc::new(
            MockSource::new()
                .with_latency(Duration::from_millis(config.data.latency_ms)),
        ),
    };

    let session_store = SessionStore::default_location()
        .inspect_err(|e| warn!(error = %e, "sessions will not be saved"))
        .ok();
    let session = session_store.as_ref().and_then(SessionStore::try_load);
    let sector = session.map(|s| s.sector).unwrap_or_default();
    let page_size = session.map_or(config.list.page_size, |s| s.page_size);

    let terminal = ratatui::init();
    let result = App::new(config, source, session_store, sector, page_size)
        .run(terminal)
        .await;
    ratatui::restore();
    result
}
