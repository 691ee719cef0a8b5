use serde::{Deserialize, Serialize};

/// One entry of the static airport reference table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportRecord {
    pub icao: String,
    pub name: String,
}

/// Decoded body of a successful `/predict` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightPrediction {
    pub callsign: String,
    pub dep_icao: String,
    pub arr_icao: String,
}

/// One element of a successful `/flights_from_airport` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartureEntry {
    pub callsign: String,
    pub arr_icao: String,
}
