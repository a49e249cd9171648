//! Values-backed commands: pull, edit, resize.
//!
//! These run through the editor session, so edits follow its
//! two-phase contract: the owned grid changes first, the remote write
//! follows, and a failed write leaves the cell dirty instead of
//! rolling anything back.

use std::io::{self, Write};
use std::path::PathBuf;

use gridhub_config::secrets;
use gridhub_config::settings::Settings;
use gridhub_editor::{
    EditOutcome, EditorSession, NotificationSink, RemoteSheet, DEFAULT_FETCH_RANGE,
};
use gridhub_grid::{CellAddress, Grid, Range, RowId};
use gridhub_remote::{RemoteError, ValuesClient};

use crate::exit_codes::*;
use crate::{parse_address, CliError};

/// Session notifications as stderr one-liners, the headless stand-in
/// for a toast.
struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn success(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("{}", message);
    }
}

// ── Commands ────────────────────────────────────────────────────────

pub fn cmd_pull(
    sheet: Option<String>,
    range: String,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let settings = Settings::load();
    let sheet_id = resolve_sheet(sheet, &settings)?;
    let range: Range = range
        .parse()
        .map_err(|e| CliError::parse(format!("invalid range: {}", e)))?;

    let client = values_client(&settings)?;

    // Title is decoration; a sheet without readable properties still
    // pulls fine.
    let title = if quiet {
        None
    } else {
        client.sheet_title(&sheet_id).ok()
    };

    let fetched = client.get_range(&sheet_id, range).map_err(values_error)?;
    let grid = Grid::from_values(fetched.values);

    let bytes = render_csv(&grid)?;
    match output {
        Some(path) => {
            std::fs::write(&path, &bytes).map_err(|e| CliError::io(e.to_string()))?;
            if !quiet {
                eprintln!("Wrote output to: {}", path.display());
            }
        }
        None => {
            io::stdout()
                .write_all(&bytes)
                .map_err(|e| CliError::io(e.to_string()))?;
        }
    }

    if !quiet {
        match title {
            Some(t) => eprintln!("Pulled '{}': {} rows x {} cols", t, grid.rows(), grid.cols()),
            None => eprintln!("Pulled {} rows x {} cols", grid.rows(), grid.cols()),
        }
    }

    Ok(())
}

pub fn cmd_edit(address: String, value: String, sheet: Option<String>) -> Result<(), CliError> {
    let addr = parse_address(&address)?;

    let settings = Settings::load();
    let sheet_id = resolve_sheet(sheet, &settings)?;
    let store = RemoteSheet::new(values_client(&settings)?, sheet_id);
    let sink = ConsoleSink;

    let mut session =
        EditorSession::open(&store, &sink, seed_range_for(addr)).map_err(values_error)?;

    // Grow out to the target address; growth is local until the write.
    while session.grid().rows() <= addr.row {
        session.add_row();
    }
    while session.grid().cols() <= addr.col {
        session.add_column();
    }

    // Rows are created in order, so the row at index `addr.row` holds
    // the id of the same value.
    match session.edit_cell(RowId::from_raw(addr.row), addr, &value) {
        EditOutcome::Synced => Ok(()),
        EditOutcome::Dirty => Err(CliError {
            code: EXIT_EDIT_DIRTY,
            message: session.last_error().unwrap_or("write failed").to_string(),
            hint: Some(format!(
                "the value was not saved remotely; retry with `ghub edit {} ...`",
                addr
            )),
        }),
        EditOutcome::Ignored => Err(CliError::parse("cell address is outside the grid")),
    }
}

pub fn cmd_resize(rows: u32, cols: u32, sheet: Option<String>) -> Result<(), CliError> {
    let settings = Settings::load();
    let sheet_id = resolve_sheet(sheet, &settings)?;
    let store = RemoteSheet::new(values_client(&settings)?, sheet_id);
    let sink = ConsoleSink;

    let mut session =
        EditorSession::open(&store, &sink, DEFAULT_FETCH_RANGE).map_err(values_error)?;

    let before = (session.grid().rows(), session.grid().cols());

    match session.resize(rows, cols) {
        EditOutcome::Synced => {
            let after = (session.grid().rows(), session.grid().cols());
            if after == before {
                eprintln!(
                    "Grid already {}x{} (grids never shrink)",
                    before.0, before.1
                );
            }
            Ok(())
        }
        EditOutcome::Dirty => Err(CliError {
            code: EXIT_EDIT_DIRTY,
            message: session.last_error().unwrap_or("write failed").to_string(),
            hint: Some("the grid was grown locally; run `ghub resize` again to retry".into()),
        }),
        EditOutcome::Ignored => {
            eprintln!("Nothing to push.");
            Ok(())
        }
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Pick the sheet: explicit argument, then sheet.default / GRIDHUB_SHEET.
fn resolve_sheet(arg: Option<String>, settings: &Settings) -> Result<String, CliError> {
    arg.or_else(|| settings.effective_sheet()).ok_or_else(|| {
        CliError::args("No sheet specified")
            .with_hint("pass a sheet id, set sheet.default, or export GRIDHUB_SHEET")
    })
}

fn values_client(settings: &Settings) -> Result<ValuesClient, CliError> {
    let lookup = secrets::get_api_key();
    let key = lookup.key.ok_or_else(|| CliError {
        code: EXIT_VALUES_NO_KEY,
        message: "No values API key found".into(),
        hint: Some(format!(
            "store one with `ghub config set-key` or set {}",
            secrets::API_KEY_ENV
        )),
    })?;
    Ok(ValuesClient::new(&settings.effective_values_url(), &key))
}

fn values_error(e: RemoteError) -> CliError {
    match e {
        RemoteError::Network(msg) => CliError {
            code: EXIT_VALUES_NETWORK,
            message: format!("Cannot reach values API: {}", msg),
            hint: Some("check values.url (`ghub config get values.url`)".into()),
        },
        RemoteError::Http(code, msg) if code == 401 || code == 403 => CliError {
            code: EXIT_VALUES_AUTH,
            message: format!("HTTP {}: {}", code, msg),
            hint: Some("check the API key (`ghub config key`)".into()),
        },
        RemoteError::Http(code, msg) => CliError {
            code: EXIT_VALUES_NETWORK,
            message: format!("HTTP {}: {}", code, msg),
            hint: None,
        },
        RemoteError::Validation(msg) => CliError {
            code: EXIT_VALUES_VALIDATION,
            message: msg,
            hint: None,
        },
        RemoteError::NotFound(msg) => CliError {
            code: EXIT_VALUES_VALIDATION,
            message: msg,
            hint: Some("check the sheet id and range".into()),
        },
        RemoteError::Parse(msg) => CliError {
            code: EXIT_VALUES_NETWORK,
            message: format!("Unexpected response: {}", msg),
            hint: None,
        },
    }
}

/// Seed range for an edit session: the default window, widened when
/// the target address falls outside it.
fn seed_range_for(addr: CellAddress) -> Range {
    if DEFAULT_FETCH_RANGE.contains(addr) {
        DEFAULT_FETCH_RANGE
    } else {
        Range::new(CellAddress::new(0, 0), addr)
    }
}

fn render_csv(grid: &Grid) -> Result<Vec<u8>, CliError> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    for row in grid.to_values() {
        writer
            .write_record(&row)
            .map_err(|e| CliError::io(e.to_string()))?;
    }
    writer.into_inner().map_err(|e| CliError::io(e.to_string()))
}
