//! Single binary web server: the arena state behind a REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use fives_arena::{
    advance_half, create_final, create_semifinals, detect_notifications, finish_match, leader,
    match_timeline, player_history, rank_with, record_card, record_goal, record_substitution,
    set_match_stats, start_match, top_assisters, top_scorers, tournament_summary, Arena,
    ArenaError, CardKind, Group, Match, MatchId, MatchStats, Phase, PlayerId, PlayerUpdate, TeamId,
    TeamUpdate, TieBreak,
};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// In-memory state. Every mutation takes the write lock, so settlement runs one match at a time.
type AppState = Data<RwLock<Arena>>;

/// Players shown per leaderboard on the stats page.
const LEADERBOARD_SIZE: usize = 5;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AddTeamBody {
    name: String,
    #[serde(default = "default_color")]
    color: String,
    #[serde(default)]
    group: Group,
}

fn default_color() -> String {
    "#10b981".to_string()
}

#[derive(Deserialize)]
struct TransferBody {
    team_id: TeamId,
}

#[derive(Deserialize)]
struct AddMatchBody {
    team_a_id: TeamId,
    team_b_id: TeamId,
    #[serde(default)]
    phase: Phase,
}

#[derive(Deserialize)]
struct GoalBody {
    player_id: PlayerId,
    assist_player_id: Option<PlayerId>,
}

#[derive(Deserialize)]
struct CardBody {
    player_id: PlayerId,
    card: CardKind,
}

#[derive(Deserialize)]
struct SubstitutionBody {
    player_out_id: PlayerId,
    player_in_id: PlayerId,
    minute: u32,
}

#[derive(Deserialize)]
struct MatchStatsBody {
    team_id: TeamId,
    #[serde(flatten)]
    stats: MatchStats,
}

#[derive(Deserialize)]
struct StandingsQuery {
    #[serde(default)]
    tiebreak: TieBreak,
}

#[derive(Deserialize)]
struct IdPath {
    id: uuid::Uuid,
}

#[derive(Deserialize)]
struct GroupPath {
    group: Group,
}

fn error_response(e: ArenaError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    if e.is_not_found() {
        HttpResponse::NotFound().json(body)
    } else {
        HttpResponse::BadRequest().json(body)
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

/// Log goal / kick-off notifications between two snapshots of the match list.
fn announce(before: &[Match], arena: &Arena) {
    for n in detect_notifications(before, &arena.matches, &arena.teams, &arena.players) {
        log::info!("{}", n);
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "fives-arena",
    })
}

/// Full state: teams, players, matches.
#[get("/api/arena")]
async fn api_get_arena(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(&*g)
}

/// Ranked table for one group (`?tiebreak=goal_difference` for the compact ordering).
#[get("/api/standings/{group}")]
async fn api_standings(state: AppState, path: Path<GroupPath>, query: Query<StandingsQuery>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(rank_with(&g.teams, path.group, query.tiebreak))
}

#[get("/api/stats")]
async fn api_stats(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(serde_json::json!({
        "summary": tournament_summary(&g.teams, &g.players, &g.matches),
        "leader": leader(&g.teams),
        "top_scorers": top_scorers(&g.players, LEADERBOARD_SIZE),
        "top_assisters": top_assisters(&g.players, LEADERBOARD_SIZE),
    }))
}

/// Player profile with the finished matches of their team.
#[get("/api/players/{id}")]
async fn api_get_player(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let player = match g.player(path.id) {
        Ok(p) => p,
        Err(e) => return error_response(e),
    };
    HttpResponse::Ok().json(serde_json::json!({
        "player": player,
        "team": g.team(player.team_id).ok(),
        "matches": player_history(player, &g.matches),
    }))
}

#[post("/api/teams")]
async fn api_add_team(state: AppState, body: Json<AddTeamBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let body = body.into_inner();
    match g.add_team(body.name, body.color, body.group) {
        Ok(_) => HttpResponse::Ok().json(&*g),
        Err(e) => error_response(e),
    }
}

#[put("/api/teams/{id}")]
async fn api_update_team(state: AppState, path: Path<IdPath>, body: Json<TeamUpdate>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.update_team(path.id, body.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(&*g),
        Err(e) => error_response(e),
    }
}

/// Delete a team, its players and its matches.
#[delete("/api/teams/{id}")]
async fn api_delete_team(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.delete_team(path.id) {
        Ok(()) => HttpResponse::Ok().json(&*g),
        Err(e) => error_response(e),
    }
}

#[put("/api/players/{id}")]
async fn api_update_player(state: AppState, path: Path<IdPath>, body: Json<PlayerUpdate>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.update_player(path.id, body.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(&*g),
        Err(e) => error_response(e),
    }
}

#[post("/api/players/{id}/transfer")]
async fn api_transfer_player(state: AppState, path: Path<IdPath>, body: Json<TransferBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.transfer_player(path.id, body.team_id) {
        Ok(()) => HttpResponse::Ok().json(&*g),
        Err(e) => error_response(e),
    }
}

#[post("/api/matches")]
async fn api_add_match(state: AppState, body: Json<AddMatchBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.add_match(body.team_a_id, body.team_b_id, body.phase) {
        Ok(_) => HttpResponse::Ok().json(&*g),
        Err(e) => error_response(e),
    }
}

#[delete("/api/matches/{id}")]
async fn api_delete_match(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.delete_match(path.id) {
        Ok(()) => HttpResponse::Ok().json(&*g),
        Err(e) => error_response(e),
    }
}

/// Kick off (pending -> live).
/// Goals and substitutions of one match in the order they happened.
#[get("/api/matches/{id}/timeline")]
async fn api_match_timeline(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get_match(path.id) {
        Ok(m) => HttpResponse::Ok().json(match_timeline(m)),
        Err(e) => error_response(e),
    }
}

#[post("/api/matches/{id}/start")]
async fn api_start_match(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let before = g.matches.clone();
    match start_match(&mut g, path.id) {
        Ok(()) => {
            announce(&before, &g);
            HttpResponse::Ok().json(&*g)
        }
        Err(e) => error_response(e),
    }
}

#[post("/api/matches/{id}/half")]
async fn api_advance_half(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match advance_half(&mut g, path.id) {
        Ok(_) => HttpResponse::Ok().json(&*g),
        Err(e) => error_response(e),
    }
}

#[post("/api/matches/{id}/goal")]
async fn api_record_goal(state: AppState, path: Path<IdPath>, body: Json<GoalBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let before = g.matches.clone();
    match record_goal(&mut g, path.id, body.player_id, body.assist_player_id) {
        Ok(()) => {
            announce(&before, &g);
            HttpResponse::Ok().json(&*g)
        }
        Err(e) => error_response(e),
    }
}

#[post("/api/matches/{id}/cards")]
async fn api_record_card(state: AppState, path: Path<IdPath>, body: Json<CardBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match record_card(&mut g, path.id, body.player_id, body.card) {
        Ok(()) => HttpResponse::Ok().json(&*g),
        Err(e) => error_response(e),
    }
}

#[post("/api/matches/{id}/substitutions")]
async fn api_record_substitution(
    state: AppState,
    path: Path<IdPath>,
    body: Json<SubstitutionBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match record_substitution(&mut g, path.id, body.player_out_id, body.player_in_id, body.minute) {
        Ok(_) => HttpResponse::Ok().json(&*g),
        Err(e) => error_response(e),
    }
}

#[put("/api/matches/{id}/stats")]
async fn api_set_match_stats(state: AppState, path: Path<IdPath>, body: Json<MatchStatsBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match set_match_stats(&mut g, path.id, body.team_id, body.stats) {
        Ok(()) => HttpResponse::Ok().json(&*g),
        Err(e) => error_response(e),
    }
}

/// End the match (live -> finished). Group matches are settled here, once.
#[post("/api/matches/{id}/finish")]
async fn api_finish_match(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let match_id: MatchId = path.id;
    match finish_match(&mut g, match_id) {
        Ok(settlement) => HttpResponse::Ok().json(serde_json::json!({
            "settlement": settlement,
            "arena": &*g,
        })),
        Err(e) => error_response(e),
    }
}

/// Semifinals: A1 v B2 and B1 v A2.
#[post("/api/knockout/semifinals")]
async fn api_create_semifinals(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match create_semifinals(&mut g) {
        Ok(_) => HttpResponse::Ok().json(&*g),
        Err(e) => error_response(e),
    }
}

#[post("/api/knockout/final")]
async fn api_create_final(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match create_final(&mut g) {
        Ok(_) => HttpResponse::Ok().json(&*g),
        Err(e) => error_response(e),
    }
}

/// Wipe everything and reseed the default league.
#[post("/api/reset")]
async fn api_reset(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    g.reset();
    log::info!("Arena reset to the default league");
    HttpResponse::Ok().json(&*g)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(Arena::seeded()));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_get_arena)
            .service(api_standings)
            .service(api_stats)
            .service(api_get_player)
            .service(api_add_team)
            .service(api_update_team)
            .service(api_delete_team)
            .service(api_update_player)
            .service(api_transfer_player)
            .service(api_add_match)
            .service(api_delete_match)
            .service(api_match_timeline)
            .service(api_start_match)
            .service(api_advance_half)
            .service(api_record_goal)
            .service(api_record_card)
            .service(api_record_substitution)
            .service(api_set_match_stats)
            .service(api_finish_match)
            .service(api_create_semifinals)
            .service(api_create_final)
            .service(api_reset)
    })
    .bind(bind)?
    .run()
    .await
}
