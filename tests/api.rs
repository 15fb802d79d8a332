//! Integration tests for the HTTP routes.

use actix_web::{http::StatusCode, test, web::Data, App};
use fixture_bot::{api, FixtureBot, JsonStore, Settings};
use serde_json::{json, Value};

const OWNER: u64 = 1;
const USER: u64 = 10;

fn state(tmp: &tempfile::TempDir) -> Data<FixtureBot> {
    let store = JsonStore::open(tmp.path()).unwrap();
    let settings = Settings {
        owner_id: Some(OWNER),
        ..Settings::default()
    };
    Data::new(FixtureBot::new(store, settings).unwrap())
}

#[actix_web::test]
async fn health_and_help() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test::init_service(App::new().app_data(state(&tmp)).configure(api::configure)).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["ok"], true);

    let req = test::TestRequest::get().uri("/api/help").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c["command"] == "record"));
}

#[actix_web::test]
async fn league_flow_over_http() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test::init_service(App::new().app_data(state(&tmp)).configure(api::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/fixtures")
        .set_json(json!({ "user_id": USER, "game_name": "Chess", "teams": ["A", "B"] }))
        .to_request();
    let draft: Value = test::call_and_read_body_json(&app, req).await;
    let prompt_id = draft["prompt_id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/prompts/{prompt_id}/format"))
        .set_json(json!({ "user_id": USER, "format": "league" }))
        .to_request();
    let outcome: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(outcome["status"], "awaiting_rounds");
    let prompt_id = outcome["prompt_id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/prompts/{prompt_id}/rounds"))
        .set_json(json!({ "user_id": USER, "rounds": 1 }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let code = created["code"].as_str().unwrap().to_string();
    assert_eq!(created["fixture"]["tournament_type"], "league");

    let req = test::TestRequest::post()
        .uri(&format!("/api/fixtures/{code}/results"))
        .set_json(json!({ "team1": "A", "result1": "W", "team2": "B", "result2": "L" }))
        .to_request();
    let outcome: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(outcome["completed"], true);

    let req = test::TestRequest::get()
        .uri(&format!("/api/fixtures/{code}/table"))
        .to_request();
    let table: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(table["tournament_type"], "league");
    assert_eq!(table["rows"][0]["team"], "A");
    assert_eq!(table["rows"][0]["points"], 3);

    let req = test::TestRequest::get().uri("/api/summary").to_request();
    let summary: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(summary, json!({ "active_count": 0, "completed_count": 1 }));
}

#[actix_web::test]
async fn errors_map_to_status_codes() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test::init_service(App::new().app_data(state(&tmp)).configure(api::configure)).await;

    let req = test::TestRequest::get()
        .uri("/api/fixtures/fixture-NOPE00/table")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("not found"));

    let req = test::TestRequest::post()
        .uri("/api/fixtures")
        .set_json(json!({ "user_id": USER, "game_name": "Chess", "teams": ["A"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/fixtures?user_id={USER}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn delete_all_with_confirmation() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test::init_service(App::new().app_data(state(&tmp)).configure(api::configure)).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/fixtures?user_id={OWNER}"))
        .to_request();
    let prompt: Value = test::call_and_read_body_json(&app, req).await;
    let prompt_id = prompt["prompt_id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/prompts/{prompt_id}/confirm"))
        .set_json(json!({ "user_id": USER, "confirm": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&format!("/api/prompts/{prompt_id}/confirm"))
        .set_json(json!({ "user_id": OWNER, "confirm": true }))
        .to_request();
    let outcome: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(outcome["status"], "deleted_all");
}
