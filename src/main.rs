use actix_web::{get, middleware, web, App, HttpResponse, HttpServer, Responder};
use actix_web::web::Query;
use serde::Deserialize;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use tracing_subscriber::util::SubscriberInitExt; // <- needed for .try_init()

mod client;
mod directory;
mod render;
mod types;

use crate::client::FlightClient;
use crate::directory::AirportDirectory;

#[get("/health")]
async fn health() -> impl Responder {
    web::Json(serde_json::json!({ "status": "ok" }))
}

/* ------------------------ / ------------------------ */

#[derive(Debug, Deserialize)]
struct FormQ {
    callsign: Option<String>,
    action: Option<String>,
}

#[get("/")]
async fn index(
    q: Query<FormQ>,
    fc: web::Data<FlightClient>,
    dir: web::Data<AirportDirectory>,
) -> actix_web::Result<impl Responder> {
    match resolve_fragment(&q, &fc, &dir).await {
        Ok(fragment) => Ok(html_response(HttpResponse::Ok(), render::page(&fragment))),
        Err(e) => {
            error!(error=?e, "airport directory unavailable");
            Ok(html_response(
                HttpResponse::InternalServerError(),
                render::error_page(),
            ))
        }
    }
}

fn html_response(mut builder: actix_web::HttpResponseBuilder, body: String) -> HttpResponse {
    builder.content_type("text/html; charset=utf-8").body(body)
}

/// Produces the fragment rendered below the form. An `Err` here means the
/// airport directory could not be read; every query failure is already
/// folded into an alert fragment.
async fn resolve_fragment(
    q: &FormQ,
    fc: &FlightClient,
    dir: &AirportDirectory,
) -> anyhow::Result<String> {
    let (callsign, action) = match (&q.callsign, &q.action) {
        (Some(c), Some(a)) => (c.to_uppercase(), a.as_str()),
        _ => return Ok(String::new()),
    };

    match action {
        "predict" => match fc.predict_route(&callsign).await {
            Ok(prediction) => {
                let airports = dir.load()?;
                Ok(render::prediction_summary(&prediction, &airports))
            }
            Err(e) => {
                warn!(error=%e, callsign=%callsign, "predict failed");
                Ok(render::predict_alert(&e, &callsign))
            }
        },
        "list_departures" => {
            // the form's callsign field doubles as the origin ICAO code
            let dep_icao = callsign;
            match fc.list_departures(&dep_icao).await {
                Ok(flights) => {
                    let airports = dir.load()?;
                    Ok(render::departures_table(&dep_icao, &flights, &airports))
                }
                Err(e) => {
                    warn!(error=%e, dep_icao=%dep_icao, "list departures failed");
                    Ok(render::departures_alert(&e))
                }
            }
        }
        // unrecognized actions render the bare form
        _ => Ok(String::new()),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Logging
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .finish()
        .try_init();

    // Config
    let addr = std::env::var("PREDICTOR_BIND").unwrap_or_else(|_| "127.0.0.1:8080".into());
    let api_base = std::env::var("PREDICTOR_API_BASE")
        .unwrap_or_else(|_| "http://api.cloudvance.eu:5000".into());
    let airports_file = std::env::var("AIRPORTS_FILE").unwrap_or_else(|_| "airports.json".into());

    // Init subsystems
    let fc = FlightClient::new(&api_base).expect("bad PREDICTOR_API_BASE");
    let dir = AirportDirectory::new(airports_file);

    info!("🌐 flight predictor listening on {}", addr);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(fc.clone()))
            .app_data(web::Data::new(dir.clone()))
            .wrap(middleware::Logger::default())
            .service(health)
            .service(index)
    })
    .bind(addr)?
    .workers(2)
    .run()
    .await
}
