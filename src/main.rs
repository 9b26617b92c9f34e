mod api;
mod config;
mod distance;
mod error;
mod hash;
mod matching;
mod offset;
mod token;
mod verify;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::{error, info};
use std::io;

use api::AppState;
use config::Settings;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let settings = Settings::from_env().map_err(|e| {
        error!("configuration rejected: {e}");
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;
    let (host, port) = (settings.host.clone(), settings.port);

    info!(
        "⛓️ Starting block guess API at http://{host}:{port} (token_size={}, tokenizer={}, simple={:?}, complex={:?})",
        settings.token_size,
        settings.token_mode,
        settings.simple_thresholds.as_array(),
        settings.complex_thresholds.as_array()
    );

    let state = web::Data::new(AppState::new(settings));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
