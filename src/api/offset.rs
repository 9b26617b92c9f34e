use actix_web::{HttpResponse, Responder, post, web};

use super::bad_request;
use super::models::{AppState, OffsetRequest, OffsetResponse};
use crate::hash::normalize;
use crate::offset::derive_offset;
use crate::verify::VerifyMode;

#[post("/offset/")]
pub async fn derive_block_offset(
    state: web::Data<AppState>,
    body: web::Json<OffsetRequest>,
) -> impl Responder {
    let modulus = body.modulus.unwrap_or(match body.mode {
        VerifyMode::Simple => state.settings.simple_modulus,
        VerifyMode::Complex => state.settings.complex_modulus,
    });

    let result = normalize(&body.seed_hash)
        .and_then(|seed| derive_offset(&seed, body.target_block, modulus).map(|o| (seed, o)));
    match result {
        Ok((seed, offset)) => HttpResponse::Ok().json(OffsetResponse {
            seed_hash: seed.into(),
            target_block: body.target_block,
            modulus,
            offset,
        }),
        Err(e) => bad_request("POST /offset/", e),
    }
}

#[cfg(test)]
mod tests {
    use crate::api::{AppState, init_routes};
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn modulus_follows_mode() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::default()))
                .configure(init_routes),
        )
        .await;
        let seed = format!("0xff{}", "0".repeat(62));

        let req = test::TestRequest::post()
            .uri("/api/v1/offset/")
            .set_json(json!({ "seed_hash": seed, "target_block": 1000 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["modulus"], 100);
        assert_eq!(body["byte_value"], 255);
        assert_eq!(body["derived_block"], 945);

        let req = test::TestRequest::post()
            .uri("/api/v1/offset/")
            .set_json(json!({ "seed_hash": seed, "target_block": 1000, "mode": "complex" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["modulus"], 256);
        assert_eq!(body["derived_block"], 745);

        let req = test::TestRequest::post()
            .uri("/api/v1/offset/")
            .set_json(json!({ "seed_hash": seed, "target_block": 10, "modulus": 256 }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);
    }
}
