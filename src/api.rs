//! HTTP/JSON routes for the fixture commands.
//!
//! A chat adapter (or any client) drives the bot through these routes. Errors
//! come back as `{"error": "..."}`.

use crate::models::TournamentType;
use crate::prompt::{PromptError, PromptId, UserId};
use crate::service::{CommandError, FixtureBot};
use actix_web::{
    delete, get, post,
    web::{self, Data, Json, Path, Query},
    HttpResponse, Responder,
};
use serde::{Deserialize, Serialize};

type AppState = Data<FixtureBot>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateFixtureBody {
    user_id: UserId,
    game_name: String,
    teams: Vec<String>,
}

#[derive(Deserialize)]
struct ChooseFormatBody {
    user_id: UserId,
    format: TournamentType,
}

#[derive(Deserialize)]
struct RoundsBody {
    user_id: UserId,
    rounds: u32,
}

#[derive(Deserialize)]
struct ConfirmBody {
    user_id: UserId,
    confirm: bool,
}

#[derive(Deserialize)]
struct RecordResultBody {
    team1: String,
    result1: String,
    team2: String,
    result2: String,
}

#[derive(Deserialize)]
struct UserQuery {
    user_id: UserId,
}

/// Path segment: fixture code (e.g. /api/fixtures/{code})
#[derive(Deserialize)]
struct FixturePath {
    code: String,
}

/// Path segment: prompt id (e.g. /api/prompts/{id}/confirm)
#[derive(Deserialize)]
struct PromptPath {
    id: PromptId,
}

#[derive(Serialize)]
struct PromptResponse {
    prompt_id: PromptId,
}

fn error_response(e: &CommandError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        CommandError::FixtureNotFound(_) | CommandError::Prompt(PromptError::NotFound) => {
            HttpResponse::NotFound().json(body)
        }
        CommandError::NotAuthorized | CommandError::Prompt(PromptError::WrongUser) => {
            HttpResponse::Forbidden().json(body)
        }
        CommandError::Store(err) => {
            log::error!("Store failure: {err}");
            HttpResponse::InternalServerError().json(body)
        }
        CommandError::Fixture(_) | CommandError::Prompt(_) => HttpResponse::BadRequest().json(body),
    }
}

fn respond<T: Serialize>(result: Result<T, CommandError>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => error_response(&e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "fixture-bot",
    })
}

/// Command reference.
#[get("/api/help")]
async fn api_help(state: AppState) -> HttpResponse {
    HttpResponse::Ok().json(state.help())
}

/// Start fixture creation; answer the returned prompt with a format.
#[post("/api/fixtures")]
async fn api_create_fixture(state: AppState, body: Json<CreateFixtureBody>) -> HttpResponse {
    respond(state.begin_fixture(body.user_id, body.game_name.trim(), body.teams.as_slice()))
}

#[post("/api/prompts/{id}/format")]
async fn api_choose_format(
    state: AppState,
    path: Path<PromptPath>,
    body: Json<ChooseFormatBody>,
) -> HttpResponse {
    respond(state.choose_format(body.user_id, path.id, body.format))
}

#[post("/api/prompts/{id}/rounds")]
async fn api_submit_rounds(
    state: AppState,
    path: Path<PromptPath>,
    body: Json<RoundsBody>,
) -> HttpResponse {
    respond(state.submit_rounds(body.user_id, path.id, body.rounds))
}

#[post("/api/prompts/{id}/confirm")]
async fn api_confirm(
    state: AppState,
    path: Path<PromptPath>,
    body: Json<ConfirmBody>,
) -> HttpResponse {
    respond(state.confirm(body.user_id, path.id, body.confirm))
}

#[post("/api/fixtures/{code}/results")]
async fn api_record_result(
    state: AppState,
    path: Path<FixturePath>,
    body: Json<RecordResultBody>,
) -> HttpResponse {
    respond(state.record_result(
        &path.code,
        &body.team1,
        &body.result1,
        &body.team2,
        &body.result2,
    ))
}

/// League table or knockout bracket.
#[get("/api/fixtures/{code}/table")]
async fn api_table(state: AppState, path: Path<FixturePath>) -> HttpResponse {
    respond(state.table(&path.code))
}

#[get("/api/summary")]
async fn api_summary(state: AppState) -> HttpResponse {
    respond(state.summary())
}

/// Ask to delete one fixture; confirm through the returned prompt.
#[delete("/api/fixtures/{code}")]
async fn api_delete_fixture(
    state: AppState,
    path: Path<FixturePath>,
    query: Query<UserQuery>,
) -> HttpResponse {
    respond(
        state
            .request_delete(query.user_id, &path.code)
            .map(|prompt_id| PromptResponse { prompt_id }),
    )
}

/// Ask to delete everything (owner only).
#[delete("/api/fixtures")]
async fn api_delete_all(state: AppState, query: Query<UserQuery>) -> HttpResponse {
    respond(
        state
            .request_delete_all(query.user_id)
            .map(|prompt_id| PromptResponse { prompt_id }),
    )
}

/// Register every route on an actix `App` or `ServiceConfig`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_help)
        .service(api_create_fixture)
        .service(api_choose_format)
        .service(api_submit_rounds)
        .service(api_confirm)
        .service(api_record_result)
        .service(api_table)
        .service(api_summary)
        .service(api_delete_fixture)
        .service(api_delete_all);
}
