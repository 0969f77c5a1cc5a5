use actix_web::{http::StatusCode, test, web, App};
use application::catalog::CatalogService;
use domain::profile::{Profile, ProfileRole};
use domain::value::ProfileId;
use infra::config::AppConfigImpl;
use infra::repository::in_memory::{entry::InMemoryEntryStore, profile::InMemoryProfileRepository};
use infra::UuidIdGenerator;
use serde_json::{json, Value};
use server::AppState;
use std::sync::Arc;

const ADMIN: &str = "admin@kino.local";
const USER: &str = "viewer@kino.local";

fn state() -> AppState {
    let store = Arc::new(InMemoryEntryStore::new());
    let catalog = CatalogService::new(Arc::new(UuidIdGenerator::new()), store.clone(), store);
    let profiles = InMemoryProfileRepository::new();
    for (email, role) in [(ADMIN, ProfileRole::Admin), (USER, ProfileRole::User)] {
        profiles.insert(Profile {
            id: ProfileId::from(email),
            name: email.to_string(),
            email: email.to_string(),
            role,
            deleted_at: None,
        });
    }
    AppState::from_parts(AppConfigImpl::in_memory(), catalog, Arc::new(profiles))
}

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(server::catalog_api::configure_service),
        )
        .await
    };
}

fn create_request(as_email: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/admin/entries")
        .insert_header(("X-Profile-Email", as_email))
        .set_json(body)
}

#[actix_web::test]
async fn test_health() {
    let app = app!();
    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_admin_routes_require_admin() {
    let app = app!();
    let body = json!({ "name": "Movie A", "categoryId": "c1" });

    let anonymous = test::TestRequest::post()
        .uri("/api/v1/admin/entries")
        .set_json(body.clone())
        .to_request();
    let resp = test::call_service(&app, anonymous).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = create_request(USER, body.clone()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = create_request("ghost@kino.local", body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_admin_guard_runs_before_body_parsing() {
    let app = app!();
    let anonymous = test::TestRequest::post()
        .uri("/api/v1/admin/entries")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, anonymous).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::put()
        .uri("/api/v1/admin/entries/e1")
        .insert_header(("X-Profile-Email", USER))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("[]")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 403);

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/entries")
        .insert_header(("X-Profile-Email", ADMIN))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_entry_lifecycle_over_http() {
    let app = app!();
    let req = create_request(
        ADMIN,
        json!({ "name": "Movie A", "categoryId": "c1", "type": "film", "country": "UZ" }),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["name"], "Movie A");
    assert_eq!(created["categoryId"], "c1");
    assert_eq!(created["type"], "film");
    assert!(created.get("viewCount").is_none());
    let id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/entries/{}", id))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, created);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/admin/entries/{}", id))
        .insert_header(("X-Profile-Email", ADMIN))
        .set_json(json!({ "name": "Movie B" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["name"], "Movie B");
    assert_eq!(updated["country"], "UZ");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/admin/entries/{}", id))
        .insert_header(("X-Profile-Email", ADMIN))
        .to_request();
    let deleted: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(deleted, json!(true));

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/entries/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/admin/entries/{}", id))
        .insert_header(("X-Profile-Email", ADMIN))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_listings_and_views() {
    let app = app!();
    let mut ids = Vec::new();
    for (name, category) in [("One", "c1"), ("Two", "c2"), ("Three", "c1")] {
        let resp = test::call_service(
            &app,
            create_request(ADMIN, json!({ "name": name, "categoryId": category })).to_request(),
        )
        .await;
        let body: Value = test::read_body_json(resp).await;
        ids.push(body["id"].as_str().unwrap().to_string());
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/entries?page=0&size=2")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["total"], 3);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["items"][0]["name"], "Three");

    let req = test::TestRequest::get()
        .uri("/api/v1/entries/category/c1")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["total"], 2);

    let req = test::TestRequest::get()
        .uri("/api/v1/entries/by-name?name=Two")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["items"][0]["name"], "Two");

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/entries/{}/view", ids[0]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
    let req = test::TestRequest::get()
        .uri("/api/v1/entries/by-view-count")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["items"][0]["name"], "One");

    let req = test::TestRequest::post()
        .uri("/api/v1/entries/missing/view")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_filter_and_validation_errors() {
    let app = app!();
    for (name, category) in [("Night Train", "c1"), ("Night Bus", "c2")] {
        test::call_service(
            &app,
            create_request(ADMIN, json!({ "name": name, "categoryId": category })).to_request(),
        )
        .await;
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/entries/filter")
        .set_json(json!({ "name": "night", "categoryId": "c2" }))
        .to_request();
    let found: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["name"], "Night Bus");

    let req = test::TestRequest::post()
        .uri("/api/v1/entries/filter")
        .set_json(json!({ "status": "ARCHIVED" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/v1/entries?size=0")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = create_request(ADMIN, json!({ "name": "  " })).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
