use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::types::AirportRecord;

/// Static ICAO -> airport name reference data.
///
/// The directory only remembers where the backing file lives; the table is
/// read fresh per request and discarded after rendering.
#[derive(Clone)]
pub struct AirportDirectory {
    path: PathBuf,
}

impl AirportDirectory {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// A missing or unparsable file is an error; the caller treats it as
    /// fatal to the request, never to the process.
    pub fn load(&self) -> Result<AirportTable> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("reading airports file {}", self.path.display()))?;
        let records: Vec<AirportRecord> = serde_json::from_str(&contents)
            .with_context(|| format!("parsing airports file {}", self.path.display()))?;
        Ok(AirportTable::new(records))
    }
}

#[derive(Debug)]
pub struct AirportTable {
    records: Vec<AirportRecord>,
}

impl AirportTable {
    pub fn new(records: Vec<AirportRecord>) -> Self {
        Self { records }
    }

    /// First matching name wins; callers substitute a placeholder on a miss.
    pub fn lookup(&self, icao: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|a| a.icao == icao)
            .map(|a| a.name.as_str())
    }
}
