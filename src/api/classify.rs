use actix_web::{HttpResponse, Responder, post, web};

use super::models::{AppState, ClassifyRequest, ClassifyResponse};
use crate::distance::classify;

#[post("/classify/")]
pub async fn classify_distance(
    state: web::Data<AppState>,
    body: web::Json<ClassifyRequest>,
) -> impl Responder {
    let thresholds = body
        .thresholds
        .unwrap_or_else(|| *state.verifier.thresholds(body.mode));
    let bucket = classify(body.distance, &thresholds);
    HttpResponse::Ok().json(ClassifyResponse {
        distance: body.distance,
        thresholds,
        bucket,
        rank: bucket.rank(),
        color: bucket.color(),
    })
}

#[cfg(test)]
mod tests {
    use crate::api::{AppState, init_routes};
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn mode_thresholds_and_overrides() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::default()))
                .configure(init_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/classify/")
            .set_json(json!({ "distance": 5, "thresholds": [2, 10, 256] }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["bucket"], "near");
        assert_eq!(body["rank"], 2);
        assert_eq!(body["color"], "lightgreen");

        let req = test::TestRequest::post()
            .uri("/api/v1/classify/")
            .set_json(json!({ "distance": 70, "mode": "complex" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["thresholds"], json!([32, 64, 96]));
        assert_eq!(body["bucket"], "far");

        // decreasing triple fails deserialization
        let req = test::TestRequest::post()
            .uri("/api/v1/classify/")
            .set_json(json!({ "distance": 1, "thresholds": [9, 8, 7] }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);
    }
}
