use actix_web::body::BoxBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};
use std::time::Duration;

use bookshelf::auth_token::TokenService;
use bookshelf::configure_routes;
use bookshelf::store::{AccountRegistry, BookStore};

const TEST_SECRET: &[u8] = b"integration-test-secret-0123456789ab";

fn test_tokens(ttl: Duration) -> TokenService {
    TokenService::new(TEST_SECRET.to_vec(), ttl).expect("valid token service")
}

fn test_app(
    tokens: TokenService,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(AccountRegistry::new()))
        .app_data(web::Data::new(BookStore::new()))
        .app_data(web::Data::new(tokens))
        .configure(configure_routes)
}

// The gate rejects by returning an error from middleware, which surfaces
// as a service error in tests rather than a plain response.
macro_rules! assert_rejected {
    ($app:expr, $req:expr) => {
        match test::try_call_service($app, $req).await {
            Ok(resp) => assert_eq!(resp.status(), StatusCode::FORBIDDEN),
            Err(err) => assert_eq!(
                err.as_response_error().status_code(),
                StatusCode::FORBIDDEN
            ),
        }
    };
}

#[actix_web::test]
async fn full_crud_flow_end_to_end() {
    let app = test::init_service(test_app(test_tokens(Duration::from_secs(3600)))).await;

    // Signup
    let req = test::TestRequest::post()
        .uri("/signup")
        .set_json(json!({"email": "a@b.com", "password": "pw1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Duplicate signup conflicts
    let req = test::TestRequest::post()
        .uri("/signup")
        .set_json(json!({"email": "a@b.com", "password": "pw2"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Wrong password is rejected
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"email": "a@b.com", "password": "wrong"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Login returns a token under the `token` field
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"email": "a@b.com", "password": "pw1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().expect("token field").to_string();

    // Create
    let req = test::TestRequest::post()
        .uri("/books")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"title": "X"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let id = body["id"].as_str().expect("id field").to_string();
    assert_eq!(body["title"], "X");

    // Update keeps the id and replaces the title
    let req = test::TestRequest::put()
        .uri(&format!("/books/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"title": "Y"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["title"], "Y");

    // Delete
    let req = test::TestRequest::delete()
        .uri(&format!("/books/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // The id is gone afterwards
    let req = test::TestRequest::put()
        .uri(&format!("/books/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"title": "Z"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    // The 404 must come from the registry, not a routing miss.
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Book not found");
}

#[actix_web::test]
async fn book_routes_reject_missing_token() {
    let app = test::init_service(test_app(test_tokens(Duration::from_secs(3600)))).await;

    let req = test::TestRequest::post()
        .uri("/books")
        .set_json(json!({"title": "X"}))
        .to_request();
    assert_rejected!(&app, req);
}

#[actix_web::test]
async fn book_routes_reject_garbage_token() {
    let app = test::init_service(test_app(test_tokens(Duration::from_secs(3600)))).await;

    let req = test::TestRequest::post()
        .uri("/books")
        .insert_header(("Authorization", "Bearer not.a.real.token"))
        .set_json(json!({"title": "X"}))
        .to_request();
    assert_rejected!(&app, req);
}

#[actix_web::test]
async fn book_routes_reject_token_from_other_secret() {
    let app = test::init_service(test_app(test_tokens(Duration::from_secs(3600)))).await;

    let foreign = TokenService::new(
        b"a-completely-different-secret-value!".to_vec(),
        Duration::from_secs(3600),
    )
    .expect("valid token service");
    let token = foreign
        .issue_for("a@b.com", bookshelf::auth_token::now_ms())
        .expect("issue token");

    let req = test::TestRequest::post()
        .uri("/books")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"title": "X"}))
        .to_request();
    assert_rejected!(&app, req);
}

#[actix_web::test]
async fn book_routes_reject_expired_token() {
    // Zero TTL expires tokens at the instant they are issued.
    let tokens = test_tokens(Duration::from_secs(0));
    let token = tokens
        .issue_for("a@b.com", bookshelf::auth_token::now_ms())
        .expect("issue token");

    let app = test::init_service(test_app(tokens)).await;

    let req = test::TestRequest::post()
        .uri("/books")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"title": "X"}))
        .to_request();
    assert_rejected!(&app, req);
}

#[actix_web::test]
async fn update_and_delete_unknown_id_return_not_found() {
    let app = test::init_service(test_app(test_tokens(Duration::from_secs(3600)))).await;

    let req = test::TestRequest::post()
        .uri("/signup")
        .set_json(json!({"email": "a@b.com", "password": "pw1"}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"email": "a@b.com", "password": "pw1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().expect("token field").to_string();

    let req = test::TestRequest::put()
        .uri("/books/00000000-0000-0000-0000-000000000000")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"title": "Y"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Book not found");

    let req = test::TestRequest::delete()
        .uri("/books/00000000-0000-0000-0000-000000000000")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Book not found");
}

#[actix_web::test]
async fn health_reports_registry_counts() {
    let app = test::init_service(test_app(test_tokens(Duration::from_secs(3600)))).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["registered_accounts"], 0);
    assert_eq!(body["stored_books"], 0);

    let req = test::TestRequest::post()
        .uri("/signup")
        .set_json(json!({"email": "a@b.com", "password": "pw1"}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["registered_accounts"], 1);
}
