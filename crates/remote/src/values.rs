//! Remote values client.
//!
//! Reads and writes rectangular value ranges on the external
//! spreadsheet API. Ranges arrive and leave as strings in the range
//! grammar ("A1:Z1000", bare "B3" for one cell); values are rows of
//! strings. The API key travels as a query parameter, as the upstream
//! API requires, and is never logged or echoed.

use std::time::Duration;

use gridhub_grid::Range;
use serde::{Deserialize, Serialize};

use crate::error::{check, RemoteError};

/// Values API client (blocking).
#[derive(Clone)]
pub struct ValuesClient {
    http: reqwest::blocking::Client,
    api_base: String,
    api_key: String,
}

/// A rectangular block of values, as the API ships it.
///
/// `values` omits trailing blank rows and cells; an entirely empty
/// range has no `values` key at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, rename = "majorDimension", skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

impl ValuesClient {
    pub fn new(api_base: &str, api_key: &str) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("ghub/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Read the values inside `range`.
    pub fn get_range(&self, sheet_id: &str, range: Range) -> Result<ValueRange, RemoteError> {
        let url = format!(
            "{}/{}/values/{}?key={}",
            self.api_base, sheet_id, range, self.api_key
        );
        let resp = self.get(&url)?;
        resp.json::<ValueRange>()
            .map_err(|e| RemoteError::Parse(e.to_string()))
    }

    /// Write `values` over `range`, raw (no input parsing on the
    /// remote side). One cell is a 1×1 values array under a
    /// single-cell range.
    pub fn update_range(
        &self,
        sheet_id: &str,
        range: Range,
        values: &[Vec<String>],
    ) -> Result<(), RemoteError> {
        let url = format!(
            "{}/{}/values/{}?valueInputOption=RAW&key={}",
            self.api_base, sheet_id, range, self.api_key
        );
        let body = serde_json::json!({
            "range": range.to_string(),
            "values": values,
        });
        self.put_json(&url, &body)?;
        Ok(())
    }

    /// The sheet's display title, from its properties resource.
    pub fn sheet_title(&self, sheet_id: &str) -> Result<String, RemoteError> {
        let url = format!("{}/{}?key={}", self.api_base, sheet_id, self.api_key);
        let resp = self.get(&url)?;
        let json: serde_json::Value = resp.json().map_err(|e| RemoteError::Parse(e.to_string()))?;
        json["properties"]["title"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| RemoteError::Parse("Missing properties.title in response".into()))
    }

    // ── Internal helpers ────────────────────────────────────────────

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response, RemoteError> {
        let response = self
            .http
            .get(url)
            .send()
            .map_err(|e| RemoteError::Network(e.to_string()))?;
        check(response)
    }

    fn put_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::blocking::Response, RemoteError> {
        let response = self
            .http
            .put(url)
            .json(body)
            .send()
            .map_err(|e| RemoteError::Network(e.to_string()))?;
        check(response)
    }
}
