use crate::client::QueryError;
use crate::directory::AirportTable;
use crate::types::{DepartureEntry, FlightPrediction};

pub const UNKNOWN_AIRPORT: &str = "Unknown Airport";

const PAGE_TOP: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Flight Predictor v0.1</title>
    <link rel="stylesheet" href="https://stackpath.bootstrapcdn.com/bootstrap/4.5.2/css/bootstrap.min.css">
    <style>
        body { background-color: #212529; color: #fff; }
        .form-container { max-width: 400px; margin: 0 auto; padding: 20px; border: 1px solid #dee2e6; border-radius: 5px; background-color: #343a40; }
    </style>
</head>
<body>
    <div class="container mt-5">
        <h1 class="text-center mb-4">Flight Predictor v0.1</h1>
        <div class="form-container">
            <form method="get" action="/">
                <div class="form-group">
                    <label for="callsign">Callsign:</label>
                    <input type="text" class="form-control" id="callsign" name="callsign" required>
                </div>
                <button type="submit" class="btn btn-primary btn-block" name="action" value="predict">Predict Route</button>
                <button type="submit" class="btn btn-secondary btn-block mt-2" name="action" value="list_departures">List Departures</button>
            </form>
"#;

const PAGE_BOTTOM: &str = r#"        </div>
    </div>
</body>
</html>
"#;

/// Full page: the form shell with an optional result fragment below it.
pub fn page(fragment: &str) -> String {
    let mut out = String::with_capacity(PAGE_TOP.len() + fragment.len() + PAGE_BOTTOM.len());
    out.push_str(PAGE_TOP);
    out.push_str(fragment);
    out.push_str(PAGE_BOTTOM);
    out
}

pub fn error_page() -> String {
    page(&alert("alert-danger", "Internal error"))
}

pub fn prediction_summary(prediction: &FlightPrediction, airports: &AirportTable) -> String {
    let dep_name = airports.lookup(&prediction.dep_icao).unwrap_or(UNKNOWN_AIRPORT);
    let arr_name = airports.lookup(&prediction.arr_icao).unwrap_or(UNKNOWN_AIRPORT);
    format!(
        "<div class='mt-4'>\
         <p>Callsign: {}</p>\
         <p>Departure: {}, {}</p>\
         <p>Arrival: {}, {}</p>\
         </div>",
        escape(&prediction.callsign),
        escape(&prediction.dep_icao),
        escape(dep_name),
        escape(&prediction.arr_icao),
        escape(arr_name),
    )
}

pub fn departures_table(dep_icao: &str, flights: &[DepartureEntry], airports: &AirportTable) -> String {
    let dep_name = airports.lookup(dep_icao).unwrap_or(UNKNOWN_AIRPORT);
    let mut out = format!(
        "<h4>Departures from {}, {}</h4>\
         <table class='table table-dark'>\
         <thead><tr><th>Callsign</th><th>Arrival</th></tr></thead>\
         <tbody>",
        escape(dep_icao),
        escape(dep_name),
    );
    for flight in flights {
        let arr_name = airports.lookup(&flight.arr_icao).unwrap_or(UNKNOWN_AIRPORT);
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}, {}</td></tr>",
            escape(&flight.callsign),
            escape(&flight.arr_icao),
            escape(arr_name),
        ));
    }
    out.push_str("</tbody></table>");
    out
}

/// Alert for a failed predict query. Only the 404 text names the callsign;
/// upstream response content never reaches the page.
pub fn predict_alert(err: &QueryError, callsign: &str) -> String {
    match err {
        QueryError::NotFound => alert(
            "alert-warning",
            &format!("No information for callsign {}", escape(callsign)),
        ),
        QueryError::ServerError => alert("alert-danger", "Server error"),
        _ => alert("alert-danger", "Unknown error"),
    }
}

pub fn departures_alert(err: &QueryError) -> String {
    match err {
        QueryError::NotFound => alert("alert-warning", "No flights found for the provided dep_icao"),
        QueryError::ServerError => alert("alert-danger", "Server error"),
        _ => alert("alert-danger", "Unknown error"),
    }
}

fn alert(class: &str, text: &str) -> String {
    format!("<div class='mt-4 alert {class}'>{text}</div>")
}

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
