use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, StatsResponse};

#[get("/stats/")]
pub async fn get_stats(state: web::Data<AppState>) -> impl Responder {
    // short, separate locks
    let pending = {
        let pending = state.pending.lock().expect("mutex poisoned");
        pending.len()
    };
    let stats = {
        let stats = state.stats.lock().expect("mutex poisoned");
        stats.clone()
    };

    HttpResponse::Ok().json(StatsResponse {
        stats,
        pending,
        pending_ttl_secs: state.settings.pending_ttl_secs,
    })
}
