//! HTTP tests for the guard middleware and GET /api/v1/auth/whoami

#[macro_use]
mod common;

use actix_web::cookie::Cookie;
use actix_web::{
    http::{header, StatusCode},
    test,
};

use common::TestContext;
use gk_api::app::create_app;
use gk_core::domain::entities::{jti_key, subject_key, ApiKey, LIVE_MARKER};
use gk_core::repositories::ApiKeyRepository;
use gk_core::services::TokenCache;

#[actix_web::test]
async fn test_health_is_public() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state(), ctx.guard())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_whoami_with_bearer_token() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state(), ctx.guard())).await;
    let (token, _) = login!(&app);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/whoami")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["subject"], ctx.user.subject());
    assert_eq!(body["roles"], serde_json::json!(["admin"]));
    assert_eq!(body["scheme"], "bearer");
}

#[actix_web::test]
async fn test_whoami_with_access_cookie() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state(), ctx.guard())).await;
    let (token, _) = login!(&app);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/whoami")
        .cookie(Cookie::new("access_token", token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["scheme"], "access_cookie");
}

#[actix_web::test]
async fn test_whoami_with_api_key() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state(), ctx.guard())).await;

    ctx.api_keys
        .save(ApiKey::new("svc", "service-1", "s3cret", vec!["reporting".into()]))
        .await
        .unwrap();
    ctx.cache
        .set(&subject_key("service-1"), LIVE_MARKER, None)
        .await
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/whoami")
        .insert_header(("X-API-Key", "svc.s3cret"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["subject"], "service-1");
    assert_eq!(body["scheme"], "api_key");

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/whoami")
        .insert_header(("X-API-Key", "svc.wrong"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn test_protected_route_without_credentials() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state(), ctx.guard())).await;

    let req = test::TestRequest::get().uri("/api/v1/auth/whoami").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[actix_web::test]
async fn test_access_token_dies_with_its_cache_entry() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state(), ctx.guard())).await;
    let (token, _) = login!(&app);
    let claims = ctx.tokens.verify_access_token(&token).unwrap();
    assert!(ctx.cache.exists(&jti_key(&claims.jti)).await.unwrap());

    ctx.clock.advance(ctx.access_ttl() + 1);
    assert!(!ctx.cache.exists(&jti_key(&claims.jti)).await.unwrap());

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/whoami")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn test_single_token_revocation() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state(), ctx.guard())).await;
    let (token, _) = login!(&app);
    let claims = ctx.tokens.verify_access_token(&token).unwrap();

    ctx.tokens.revoke_access_token(&claims.jti).await.unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/whoami")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}
