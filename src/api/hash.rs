use actix_web::{HttpResponse, Responder, post, web};
use log::debug;

use super::bad_request;
use super::models::{
    HashRequest, NormalizeResponse, TokenizeRequest, TokenizeResponse, ValidateResponse,
};
use crate::hash::{HASH_HEX_LEN, is_valid_format, normalize};
use crate::token::TokenSet;

#[post("/normalize/")]
pub async fn normalize_hash(body: web::Json<HashRequest>) -> impl Responder {
    match normalize(&body.hash) {
        Ok(h) => HttpResponse::Ok().json(NormalizeResponse {
            prefixed: h.to_prefixed(),
            hash: h.into(),
        }),
        Err(e) => bad_request("POST /normalize/", e),
    }
}

/// Pre-submission gate; never fails, only answers.
#[post("/validate/")]
pub async fn validate_hash(body: web::Json<HashRequest>) -> impl Responder {
    HttpResponse::Ok().json(ValidateResponse {
        valid: is_valid_format(&body.hash, HASH_HEX_LEN),
        expected_length: HASH_HEX_LEN,
    })
}

#[post("/tokenize/")]
pub async fn tokenize_hash(body: web::Json<TokenizeRequest>) -> impl Responder {
    let set = match TokenSet::build(&body.hash, body.size, body.mode) {
        Ok(set) => set,
        Err(e) => return bad_request("POST /tokenize/", e),
    };
    debug!(
        "POST /tokenize/ - {} tokens ({} size={})",
        set.len(),
        set.mode,
        set.size
    );
    HttpResponse::Ok().json(TokenizeResponse {
        mode: set.mode,
        size: set.size,
        count: set.len(),
        tokens: set.tokens,
    })
}

#[cfg(test)]
mod tests {
    use crate::api::{AppState, init_routes};
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn normalize_and_validate() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::default()))
                .configure(init_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/normalize/")
            .set_json(json!({ "hash": format!("0x{}", "AB".repeat(32)) }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["hash"], "ab".repeat(32));
        assert_eq!(body["prefixed"], format!("0x{}", "ab".repeat(32)));

        let req = test::TestRequest::post()
            .uri("/api/v1/normalize/")
            .set_json(json!({ "hash": "0x12" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);

        let req = test::TestRequest::post()
            .uri("/api/v1/validate/")
            .set_json(json!({ "hash": "0x12" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["valid"], false);
        assert_eq!(body["expected_length"], 64);
    }

    #[actix_web::test]
    async fn tokenize_both_modes() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::default()))
                .configure(init_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/tokenize/")
            .set_json(json!({ "hash": "abcdef", "size": 3 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["mode"], "sliding_window");
        assert_eq!(body["tokens"], json!(["abc", "bcd", "cde", "def"]));

        let req = test::TestRequest::post()
            .uri("/api/v1/tokenize/")
            .set_json(json!({ "hash": "abcdef", "size": 3, "mode": "chunked" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["count"], 2);
        assert_eq!(body["tokens"], json!(["abc", "def"]));

        let req = test::TestRequest::post()
            .uri("/api/v1/tokenize/")
            .set_json(json!({ "hash": "abcdef", "size": 9 }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);
    }
}
