//! Stateless web front end: post the four CSV tables, get standings and pairings back.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    get, post,
    web::{Data, Json},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use tourney_pairings::{
    ingest::{self, IngestError},
    EngineConfig, BlossomMatcher, Tournament,
};

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// The four input tables as CSV text (header row first), plus optional tuning.
#[derive(Deserialize)]
struct ComputeBody {
    results_csv: String,
    entrants_csv: String,
    rounds_csv: String,
    #[serde(default)]
    fixed_pairings_csv: String,
    config: Option<EngineConfig>,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tourney-pairings",
    })
}

fn bad_request(message: impl ToString) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": message.to_string() }))
}

/// Parse the tables and validate them; any failure here means nothing gets paired.
fn load(body: &ComputeBody, config: EngineConfig) -> Result<Tournament, String> {
    let read = |e: IngestError| e.to_string();
    let results = ingest::read_results(body.results_csv.as_bytes()).map_err(read)?;
    let entrants = ingest::read_entrants(body.entrants_csv.as_bytes()).map_err(read)?;
    let rounds = ingest::read_round_specs(body.rounds_csv.as_bytes()).map_err(read)?;
    let fixed = ingest::read_fixed_pairings(body.fixed_pairings_csv.as_bytes()).map_err(read)?;
    Tournament::from_rows(&results, &entrants, &rounds, &fixed, config).map_err(|e| e.to_string())
}

/// Recompute standings and every pairable round from scratch.
#[post("/api/compute")]
async fn api_compute(defaults: Data<EngineConfig>, body: Json<ComputeBody>) -> HttpResponse {
    let config = body.config.clone().unwrap_or_else(|| defaults.get_ref().clone());
    let tournament = match load(&body, config) {
        Ok(t) => t,
        Err(e) => return bad_request(e),
    };
    let report = tournament.run(&BlossomMatcher);
    if let Some(failure) = &report.failure {
        log::warn!("pairing stopped at round {}: {}", failure.round, failure.message);
    }
    HttpResponse::Ok().json(report)
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

    let defaults = Data::new(EngineConfig::default());

    HttpServer::new(move || {
        App::new()
            .app_data(defaults.clone())
            .service(api_health)
            .service(api_compute)
    })
    .bind(bind)?
    .run()
    .await
}
