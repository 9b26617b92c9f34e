mod classify;
mod hash;
mod health;
pub mod models;
mod offset;
mod settings;
mod stats;
mod verify;

use actix_web::HttpResponse;
use actix_web::web::{self, ServiceConfig};
use log::warn;

use crate::error::HashError;

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(settings::get_config)
            .service(hash::normalize_hash)
            .service(hash::validate_hash)
            .service(hash::tokenize_hash)
            .service(classify::classify_distance)
            .service(offset::derive_block_offset)
            .service(verify::post_verify)
            .service(verify::post_resume)
            .service(stats::get_stats),
    );
}

/// Core errors are caller mistakes: 400 with the message as body.
fn bad_request(route: &str, err: HashError) -> HttpResponse {
    warn!("{route} - rejected ({:?}): {}", err.kind(), err);
    HttpResponse::BadRequest().body(err.to_string())
}
