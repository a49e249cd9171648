//! Registry commands: spreadsheet records and cell records.
//!
//! `ghub sheet list|create|rename|delete|show|clean`
//! `ghub cell list|add|set|rm|eval`

use gridhub_config::settings::Settings;
use gridhub_remote::{RegistryClient, RemoteError};

use crate::exit_codes::*;
use crate::{parse_address, CliError};

// ── Sheets ──────────────────────────────────────────────────────────

pub fn cmd_sheet_list(json: bool) -> Result<(), CliError> {
    let client = registry_client();
    let sheets = client.list_sheets().map_err(registry_error)?;

    if sheets.is_empty() {
        if json {
            println!("[]");
        } else {
            eprintln!("No spreadsheets found.");
        }
        return Ok(());
    }

    if json {
        let output = serde_json::to_string_pretty(&sheets)
            .map_err(|e| CliError::io(e.to_string()))?;
        println!("{}", output);
    } else {
        println!("{:>4}  {:<28} {:<18} {}", "ID", "NAME", "CREATED", "LINK");
        println!("{}", "-".repeat(72));

        for s in &sheets {
            let link = s.link.as_ref().map(|l| l.link.as_str()).unwrap_or("N/A");
            println!(
                "{:>4}  {:<28} {:<18} {}",
                s.id,
                s.name,
                format_created(s.created_at.as_deref()),
                link
            );
        }

        eprintln!();
        eprintln!("{} spreadsheet(s)", sheets.len());
    }

    Ok(())
}

pub fn cmd_sheet_create(name: String) -> Result<(), CliError> {
    if name.trim().is_empty() {
        return Err(CliError::args("Spreadsheet name may not be blank"));
    }

    let client = registry_client();
    let sheet = client.create_sheet(&name).map_err(registry_error)?;
    eprintln!("Created spreadsheet #{} ({})", sheet.id, sheet.name);
    Ok(())
}

pub fn cmd_sheet_rename(id: i64, name: String) -> Result<(), CliError> {
    if name.trim().is_empty() {
        return Err(CliError::args("Spreadsheet name may not be blank"));
    }

    let client = registry_client();
    client.rename_sheet(id, &name).map_err(registry_error)?;
    eprintln!("Renamed spreadsheet #{} to {}", id, name);
    Ok(())
}

pub fn cmd_sheet_delete(id: i64) -> Result<(), CliError> {
    let client = registry_client();
    client.delete_sheet(id).map_err(registry_error)?;
    eprintln!("Deleted spreadsheet #{}", id);
    Ok(())
}

pub fn cmd_sheet_show(id: i64, json: bool) -> Result<(), CliError> {
    let client = registry_client();
    let sheet = client.get_sheet(id).map_err(registry_error)?;

    if json {
        let output = serde_json::to_string_pretty(&sheet)
            .map_err(|e| CliError::io(e.to_string()))?;
        println!("{}", output);
        return Ok(());
    }

    println!("ID:      {}", sheet.id);
    println!("Name:    {}", sheet.name);
    println!("Created: {}", format_created(sheet.created_at.as_deref()));
    println!(
        "Link:    {}",
        sheet.link.as_ref().map(|l| l.link.as_str()).unwrap_or("N/A")
    );
    Ok(())
}

pub fn cmd_sheet_clean(id: i64) -> Result<(), CliError> {
    let client = registry_client();
    let removed = client.clean_cells(id).map_err(registry_error)?;
    eprintln!("Removed {} empty cell record(s)", removed);
    Ok(())
}

// ── Cells ───────────────────────────────────────────────────────────

pub fn cmd_cell_list(sheet_id: i64, json: bool) -> Result<(), CliError> {
    let client = registry_client();
    let cells = client.list_cells(sheet_id).map_err(registry_error)?;

    if cells.is_empty() {
        if json {
            println!("[]");
        } else {
            eprintln!("No cell records found for spreadsheet #{}.", sheet_id);
        }
        return Ok(());
    }

    if json {
        let output = serde_json::to_string_pretty(&cells)
            .map_err(|e| CliError::io(e.to_string()))?;
        println!("{}", output);
    } else {
        println!("{:>6}  {:<8} {}", "ID", "ADDRESS", "VALUE");
        println!("{}", "-".repeat(48));

        for c in &cells {
            println!("{:>6}  {:<8} {}", c.id, c.address, c.value);
        }

        eprintln!();
        eprintln!("{} cell record(s)", cells.len());
    }

    Ok(())
}

pub fn cmd_cell_add(sheet_id: i64, address: String, value: String) -> Result<(), CliError> {
    let addr = parse_address(&address)?;

    let client = registry_client();
    let cell = client
        .create_cell(sheet_id, addr, &value)
        .map_err(registry_error)?;
    eprintln!("Stored cell #{} at {}", cell.id, cell.address);
    Ok(())
}

pub fn cmd_cell_set(cell_id: i64, value: String) -> Result<(), CliError> {
    let client = registry_client();
    client.update_cell(cell_id, &value).map_err(registry_error)?;
    eprintln!("Updated cell #{}", cell_id);
    Ok(())
}

pub fn cmd_cell_rm(cell_id: i64) -> Result<(), CliError> {
    let client = registry_client();
    client.delete_cell(cell_id).map_err(registry_error)?;
    eprintln!("Deleted cell #{}", cell_id);
    Ok(())
}

pub fn cmd_cell_eval(cell_id: i64) -> Result<(), CliError> {
    let client = registry_client();
    let result = client.evaluate_cell(cell_id).map_err(registry_error)?;
    println!("{}", result);
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────

fn registry_client() -> RegistryClient {
    let settings = Settings::load();
    RegistryClient::new(&settings.effective_registry_url())
}

fn registry_error(e: RemoteError) -> CliError {
    match e {
        RemoteError::Network(msg) => CliError {
            code: EXIT_REGISTRY_NETWORK,
            message: format!("Cannot reach registry: {}", msg),
            hint: Some("check registry.url (`ghub config get registry.url`)".into()),
        },
        RemoteError::NotFound(msg) => CliError {
            code: EXIT_REGISTRY_NOT_FOUND,
            message: msg,
            hint: None,
        },
        RemoteError::Validation(msg) => CliError {
            code: EXIT_REGISTRY_VALIDATION,
            message: msg,
            hint: None,
        },
        RemoteError::Http(code, msg) => CliError {
            code: EXIT_REGISTRY_NETWORK,
            message: format!("HTTP {}: {}", code, msg),
            hint: None,
        },
        RemoteError::Parse(msg) => CliError {
            code: EXIT_REGISTRY_NETWORK,
            message: format!("Unexpected response: {}", msg),
            hint: None,
        },
    }
}

/// Render a created_at timestamp for table display. Anything the
/// backend sends that is not RFC 3339 shows as N/A.
fn format_created(raw: Option<&str>) -> String {
    raw.and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}
