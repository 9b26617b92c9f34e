use actix_web::{HttpResponse, Responder, get, web};

use super::models::AppState;

/// Effective thresholds, moduli and token bounds.
#[get("/config/")]
pub async fn get_config(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(&state.settings)
}
