//! Single binary web server: JSON API over in-memory tournaments.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, INACTIVITY_HOURS.

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use mixed_doubles_cup::{
    calculate_group_standings, create_teams, declare_winner, finish_group_stage,
    parse_roster_csv, reset_all, start_group_stage, start_knockout, step_back,
    update_group_match, GroupMatchId, MatchId, Side, Tournament, TournamentError, TournamentId,
    DEFAULT_MAX_PER_GROUP,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Server settings read from the environment.
#[derive(Clone, Debug)]
struct Config {
    host: String,
    port: u16,
    inactivity_timeout: Duration,
}

impl Config {
    fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let hours: u64 = std::env::var("INACTIVITY_HOURS")
            .ok()
            .and_then(|h| h.parse().ok())
            .unwrap_or(12);
        Self {
            host,
            port,
            inactivity_timeout: Duration::from_secs(hours.saturating_mul(3600)),
        }
    }
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct TeamsBody {
    #[serde(default)]
    category_a: Vec<String>,
    #[serde(default)]
    category_b: Vec<String>,
}

#[derive(Deserialize)]
struct GroupStageBody {
    #[serde(default = "default_max_per_group")]
    max_per_group: usize,
}

fn default_max_per_group() -> usize {
    DEFAULT_MAX_PER_GROUP
}

#[derive(Deserialize)]
struct ScoreBody {
    score_a: u32,
    score_b: u32,
    #[serde(default = "default_finished")]
    finished: bool,
}

fn default_finished() -> bool {
    true
}

#[derive(Deserialize)]
struct WinnerBody {
    match_id: MatchId,
    side: Side,
}

#[derive(Deserialize)]
struct ResetBody {
    #[serde(default)]
    confirm: bool,
}

#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct GroupPath {
    id: TournamentId,
    group_id: String,
}

#[derive(Deserialize)]
struct GroupMatchPath {
    id: TournamentId,
    group_id: String,
    match_id: GroupMatchId,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

fn bad_request(err: &TournamentError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": err.to_string() }))
}

/// Look up a tournament, refresh its activity time and apply `action`. Responds with the
/// updated tournament, or 400 with the error (tournament left as it was).
fn with_tournament<F>(state: &AppState, id: TournamentId, action: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<(), TournamentError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    match action(&mut entry.tournament) {
        Ok(()) => HttpResponse::Ok().json(&entry.tournament),
        Err(e) => {
            log::warn!("tournament {}: rejected: {}", id, e);
            bad_request(&e)
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "mixed-doubles-cup",
    })
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState) -> HttpResponse {
    let tournament = Tournament::new();
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = g.entry(id).or_insert(TournamentEntry {
        tournament,
        last_activity: Instant::now(),
    });
    HttpResponse::Ok().json(&entry.tournament)
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |_| Ok(()))
}

/// Pair teams from two JSON name lists.
#[post("/api/tournaments/{id}/teams")]
async fn api_create_teams(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<TeamsBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        create_teams(t, &body.category_a, &body.category_b, &mut rand::thread_rng())
    })
}

/// Pair teams from a `name,category` CSV body.
#[post("/api/tournaments/{id}/roster")]
async fn api_import_roster(state: AppState, path: Path<TournamentPath>, body: String) -> HttpResponse {
    let roster = match parse_roster_csv(body.as_bytes()) {
        Ok(r) => r,
        Err(e) => return bad_request(&e),
    };
    with_tournament(&state, path.id, |t| {
        create_teams(
            t,
            &roster.category_a,
            &roster.category_b,
            &mut rand::thread_rng(),
        )
    })
}

#[post("/api/tournaments/{id}/back")]
async fn api_step_back(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, step_back)
}

#[post("/api/tournaments/{id}/groups")]
async fn api_start_group_stage(
    state: AppState,
    path: Path<TournamentPath>,
    body: Option<Json<GroupStageBody>>,
) -> HttpResponse {
    let max_per_group = body
        .map(|b| b.max_per_group)
        .unwrap_or_else(default_max_per_group);
    with_tournament(&state, path.id, |t| {
        start_group_stage(t, max_per_group, &mut rand::thread_rng())
    })
}

#[put("/api/tournaments/{id}/groups/{group_id}/matches/{match_id}")]
async fn api_update_group_match(
    state: AppState,
    path: Path<GroupMatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        update_group_match(
            t,
            &path.group_id,
            path.match_id,
            body.score_a,
            body.score_b,
            body.finished,
        )
    })
}

#[get("/api/tournaments/{id}/groups/{group_id}/standings")]
async fn api_group_standings(state: AppState, path: Path<GroupPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let Some(entry) = g.get(&path.id) else {
        return not_found();
    };
    match entry.tournament.group(&path.group_id) {
        Some(group) => HttpResponse::Ok().json(calculate_group_standings(group)),
        None => bad_request(&TournamentError::GroupNotFound(path.group_id.clone())),
    }
}

#[post("/api/tournaments/{id}/groups/finish")]
async fn api_finish_group_stage(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, finish_group_stage)
}

/// Skip groups: seed every team straight into the bracket.
#[post("/api/tournaments/{id}/knockout")]
async fn api_start_knockout(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, start_knockout)
}

#[put("/api/tournaments/{id}/knockout/winner")]
async fn api_declare_winner(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<WinnerBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| declare_winner(t, body.match_id, body.side))
}

/// Clear everything; requires `{"confirm": true}`.
#[post("/api/tournaments/{id}/reset")]
async fn api_reset(
    state: AppState,
    path: Path<TournamentPath>,
    body: Option<Json<ResetBody>>,
) -> HttpResponse {
    let confirmed = body.map(|b| b.confirm).unwrap_or(false);
    with_tournament(&state, path.id, |t| reset_all(t, confirmed))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Every 30 minutes, drop tournaments idle longer than the configured timeout
    let state_cleanup = state.clone();
    let timeout = config.inactivity_timeout;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_create_teams)
            .service(api_import_roster)
            .service(api_step_back)
            .service(api_start_group_stage)
            .service(api_update_group_match)
            .service(api_group_standings)
            .service(api_finish_group_stage)
            .service(api_start_knockout)
            .service(api_declare_winner)
            .service(api_reset)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
