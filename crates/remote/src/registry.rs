//! Spreadsheet registry client.
//!
//! Covers the management surface of the CRUD backend: spreadsheet
//! records (with their optional external links) and the cell records
//! behind them, including the opaque evaluate and clean passes.

use std::time::Duration;

use gridhub_grid::CellAddress;

use crate::error::{check, RemoteError};

/// Registry API client (blocking).
#[derive(Clone)]
pub struct RegistryClient {
    http: reqwest::blocking::Client,
    api_base: String,
}

/// A spreadsheet record as the registry reports it.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SheetRecord {
    pub id: i64,
    pub name: String,
    /// Creation timestamp, verbatim from the backend (RFC 3339 when
    /// present).
    pub created_at: Option<String>,
    pub link: Option<LinkRecord>,
}

/// The external sheet link attached to a spreadsheet record.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LinkRecord {
    pub id: Option<i64>,
    pub link: String,
}

/// A cell record. The registry owns these; this client passes them
/// through without interpreting the value.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CellRecord {
    pub id: i64,
    pub spreadsheet: Option<i64>,
    pub address: String,
    pub value: String,
}

impl RegistryClient {
    /// Create a client for the backend at `base_url` (the versioned
    /// API prefix is appended here).
    pub fn new(base_url: &str) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("ghub/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_base: format!("{}/api/v1", base_url.trim_end_matches('/')),
        }
    }

    /// List all spreadsheets with their links attached.
    pub fn list_sheets(&self) -> Result<Vec<SheetRecord>, RemoteError> {
        let url = format!("{}/spreadsheets-with-link/", self.api_base);
        let resp = self.get(&url)?;
        let json: serde_json::Value = resp.json().map_err(|e| RemoteError::Parse(e.to_string()))?;

        let sheets = json
            .as_array()
            .unwrap_or(&vec![])
            .iter()
            .filter_map(parse_sheet_record)
            .collect();

        Ok(sheets)
    }

    /// Fetch a single spreadsheet record.
    pub fn get_sheet(&self, id: i64) -> Result<SheetRecord, RemoteError> {
        let url = format!("{}/spreadsheets/{}/", self.api_base, id);
        let resp = self.get(&url)?;
        let json: serde_json::Value = resp.json().map_err(|e| RemoteError::Parse(e.to_string()))?;
        parse_sheet_record(&json)
            .ok_or_else(|| RemoteError::Parse("Malformed spreadsheet record".into()))
    }

    /// Create a spreadsheet and return the stored record.
    pub fn create_sheet(&self, name: &str) -> Result<SheetRecord, RemoteError> {
        let url = format!("{}/spreadsheets/", self.api_base);
        let resp = self.post_json(&url, &serde_json::json!({ "name": name }))?;
        let json: serde_json::Value = resp.json().map_err(|e| RemoteError::Parse(e.to_string()))?;
        parse_sheet_record(&json)
            .ok_or_else(|| RemoteError::Parse("Malformed spreadsheet record".into()))
    }

    /// Rename a spreadsheet. The response body is not interesting.
    pub fn rename_sheet(&self, id: i64, name: &str) -> Result<(), RemoteError> {
        let url = format!("{}/spreadsheets/{}/", self.api_base, id);
        self.put_json(&url, &serde_json::json!({ "name": name }))?;
        Ok(())
    }

    /// Delete a spreadsheet.
    pub fn delete_sheet(&self, id: i64) -> Result<(), RemoteError> {
        let url = format!("{}/spreadsheets/{}/", self.api_base, id);
        self.delete(&url)?;
        Ok(())
    }

    /// List the cell records stored for one spreadsheet.
    pub fn list_cells(&self, sheet_id: i64) -> Result<Vec<CellRecord>, RemoteError> {
        let url = format!("{}/cells/?spreadsheet={}", self.api_base, sheet_id);
        let resp = self.get(&url)?;
        let json: serde_json::Value = resp.json().map_err(|e| RemoteError::Parse(e.to_string()))?;

        let cells = json
            .as_array()
            .unwrap_or(&vec![])
            .iter()
            .filter_map(parse_cell_record)
            .collect();

        Ok(cells)
    }

    /// Store a cell record under a spreadsheet.
    pub fn create_cell(
        &self,
        sheet_id: i64,
        addr: CellAddress,
        value: &str,
    ) -> Result<CellRecord, RemoteError> {
        let url = format!("{}/cells/", self.api_base);
        let body = serde_json::json!({
            "spreadsheet": sheet_id,
            "address": addr.to_string(),
            "value": value,
        });
        let resp = self.post_json(&url, &body)?;
        let json: serde_json::Value = resp.json().map_err(|e| RemoteError::Parse(e.to_string()))?;
        parse_cell_record(&json).ok_or_else(|| RemoteError::Parse("Malformed cell record".into()))
    }

    /// Replace a cell record's value.
    pub fn update_cell(&self, cell_id: i64, value: &str) -> Result<(), RemoteError> {
        let url = format!("{}/cells/{}/", self.api_base, cell_id);
        self.put_json(&url, &serde_json::json!({ "value": value }))?;
        Ok(())
    }

    /// Delete a cell record.
    pub fn delete_cell(&self, cell_id: i64) -> Result<(), RemoteError> {
        let url = format!("{}/cells/{}/", self.api_base, cell_id);
        self.delete(&url)?;
        Ok(())
    }

    /// Ask the backend to evaluate one cell. The result is opaque to
    /// this client.
    pub fn evaluate_cell(&self, cell_id: i64) -> Result<String, RemoteError> {
        let url = format!("{}/cells/{}/evaluate/", self.api_base, cell_id);
        let resp = self.post_json(&url, &serde_json::json!({}))?;
        let json: serde_json::Value = resp.json().map_err(|e| RemoteError::Parse(e.to_string()))?;
        json["result"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| RemoteError::Parse("Missing result in response".into()))
    }

    /// Bulk-clean a spreadsheet's cell records. Returns how many the
    /// backend removed.
    pub fn clean_cells(&self, sheet_id: i64) -> Result<u64, RemoteError> {
        let url = format!("{}/spreadsheets/{}/clean-cells/", self.api_base, sheet_id);
        let resp = self.post_json(&url, &serde_json::json!({}))?;
        let json: serde_json::Value = resp.json().map_err(|e| RemoteError::Parse(e.to_string()))?;
        Ok(json["removed"].as_u64().unwrap_or(0))
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

    fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::blocking::Response, RemoteError> {
        let response = self
            .http
            .post(url)
            .json(body)
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

    fn delete(&self, url: &str) -> Result<reqwest::blocking::Response, RemoteError> {
        let response = self
            .http
            .delete(url)
            .send()
            .map_err(|e| RemoteError::Network(e.to_string()))?;
        check(response)
    }
}

// ── Record parsing ──────────────────────────────────────────────────

fn parse_sheet_record(v: &serde_json::Value) -> Option<SheetRecord> {
    Some(SheetRecord {
        id: v["id"].as_i64()?,
        name: v["name"].as_str()?.to_string(),
        created_at: v["created_at"].as_str().map(String::from),
        link: parse_link_record(&v["link"]),
    })
}

fn parse_link_record(v: &serde_json::Value) -> Option<LinkRecord> {
    Some(LinkRecord {
        id: v["id"].as_i64(),
        link: v["link"].as_str()?.to_string(),
    })
}

fn parse_cell_record(v: &serde_json::Value) -> Option<CellRecord> {
    Some(CellRecord {
        id: v["id"].as_i64()?,
        spreadsheet: v["spreadsheet"].as_i64(),
        address: v["address"].as_str().unwrap_or_default().to_string(),
        value: v["value"].as_str().unwrap_or_default().to_string(),
    })
}
