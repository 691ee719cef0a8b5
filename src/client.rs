use anyhow::Context;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::types::{DepartureEntry, FlightPrediction};

/// Outcome classification for one upstream query, keyed on HTTP status.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("no data for the requested code")]
    NotFound,
    #[error("upstream server error")]
    ServerError,
    #[error("unexpected upstream status {0}")]
    Unknown(u16),
    #[error("upstream body did not decode")]
    Decode,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// HTTP client for the remote prediction service.
#[derive(Clone)]
pub struct FlightClient {
    http: Client,
    base: Url,
}

impl FlightClient {
    pub fn new(base: &str) -> anyhow::Result<Self> {
        let base = Url::parse(base).with_context(|| format!("parsing api base url {base}"))?;
        let http = Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .context("building http client")?;
        Ok(Self { http, base })
    }

    pub async fn predict_route(&self, callsign: &str) -> Result<FlightPrediction, QueryError> {
        self.get_json("predict", "callsign", callsign).await
    }

    pub async fn list_departures(&self, dep_icao: &str) -> Result<Vec<DepartureEntry>, QueryError> {
        self.get_json("flights_from_airport", "dep_icao", dep_icao).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        param: &str,
        value: &str,
    ) -> Result<T, QueryError> {
        let mut url = self.base.clone();
        url.set_path(path);
        url.query_pairs_mut().clear().append_pair(param, value);

        let res = self.http.get(url).send().await?;
        let status = res.status();
        if status != StatusCode::OK {
            return Err(classify_status(status.as_u16()));
        }
        let body = res.text().await?;
        decode_body(&body)
    }
}

fn classify_status(status: u16) -> QueryError {
    match status {
        404 => QueryError::NotFound,
        500 => QueryError::ServerError,
        other => QueryError::Unknown(other),
    }
}

fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, QueryError> {
    serde_json::from_str(body).map_err(|_| QueryError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    #[test]
    fn status_404_maps_to_not_found() {
        assert!(matches!(classify_status(404), QueryError::NotFound));
    }

    #[test]
    fn status_500_maps_to_server_error() {
        assert!(matches!(classify_status(500), QueryError::ServerError));
    }

    #[test]
    fn other_statuses_map_to_unknown() {
        assert!(matches!(classify_status(503), QueryError::Unknown(503)));
        assert!(matches!(classify_status(302), QueryError::Unknown(302)));
    }

    #[test]
    fn prediction_body_decodes() {
        let p: FlightPrediction =
            decode_body(r#"{"callsign":"ABC123","dep_icao":"EDDF","arr_icao":"KJFK"}"#).unwrap();
        assert_eq!(p.callsign, "ABC123");
        assert_eq!(p.dep_icao, "EDDF");
        assert_eq!(p.arr_icao, "KJFK");
    }

    #[test]
    fn departures_body_decodes() {
        let flights: Vec<DepartureEntry> =
            decode_body(r#"[{"callsign":"X1","arr_icao":"EDDF"},{"callsign":"X2","arr_icao":"ZZZZ"}]"#)
                .unwrap();
        assert_eq!(flights.len(), 2);
        assert_eq!(flights[1].arr_icao, "ZZZZ");
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = decode_body::<FlightPrediction>("{ not json").unwrap_err();
        assert!(matches!(err, QueryError::Decode));
    }

    #[test]
    fn mis_shaped_body_is_a_decode_error() {
        let err = decode_body::<FlightPrediction>(r#"{"callsign":"ABC123"}"#).unwrap_err();
        assert!(matches!(err, QueryError::Decode));
    }

    #[test]
    fn base_url_must_parse() {
        assert!(FlightClient::new("not a url").is_err());
    }

    /// Serves exactly one canned HTTP response on a loopback port.
    fn one_shot_server(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        });
        format!("http://{addr}")
    }

    #[actix_web::test]
    async fn predict_route_decodes_a_200_response() {
        let base = one_shot_server(
            "200 OK",
            r#"{"callsign":"ABC123","dep_icao":"EDDF","arr_icao":"KJFK"}"#,
        );
        let client = FlightClient::new(&base).unwrap();
        let p = client.predict_route("ABC123").await.unwrap();
        assert_eq!(p.arr_icao, "KJFK");
    }

    #[actix_web::test]
    async fn predict_route_classifies_a_404() {
        let base = one_shot_server("404 Not Found", "");
        let client = FlightClient::new(&base).unwrap();
        let err = client.predict_route("NOPE").await.unwrap_err();
        assert!(matches!(err, QueryError::NotFound));
    }

    #[actix_web::test]
    async fn unreachable_upstream_is_a_transport_error() {
        let client = FlightClient::new("http://127.0.0.1:1").unwrap();
        let err = client.predict_route("ABC123").await.unwrap_err();
        assert!(matches!(err, QueryError::Transport(_)));
    }
}
