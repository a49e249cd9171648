// GridHub CLI - spreadsheet grids over remote cell stores, headless

mod exit_codes;
mod registry;
mod values;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use gridhub_config::secrets;
use gridhub_config::settings::{Settings, SETTING_KEYS};
use gridhub_grid::CellAddress;

use exit_codes::{EXIT_ERROR, EXIT_IO, EXIT_PARSE, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "ghub")]
#[command(about = "Spreadsheet grids over remote cell stores (headless)")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Spreadsheet records in the registry
    Sheet {
        #[command(subcommand)]
        command: SheetCommands,
    },

    /// Cell records in the registry
    Cell {
        #[command(subcommand)]
        command: CellCommands,
    },

    /// Fetch a sheet's values and print them as CSV
    #[command(after_help = "\
Examples:
  ghub pull ext-1
  ghub pull ext-1 --range A1:D20 -o sheet.csv
  ghub pull            # uses sheet.default / GRIDHUB_SHEET")]
    Pull {
        /// External sheet id (omit to use sheet.default)
        sheet: Option<String>,

        /// Range to fetch
        #[arg(long, default_value = "A1:Z1000")]
        range: String,

        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Suppress stderr notes
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Edit one cell and write it through to the remote sheet
    #[command(after_help = "\
The edit is applied to the fetched grid first, then written remotely.
A failed write keeps nothing remote and exits with code 30.

Examples:
  ghub edit B2 '42' --sheet ext-1
  ghub edit AA101 'note'       # grid grows to fit the address")]
    Edit {
        /// Cell address, e.g. B2
        address: String,

        /// New cell value
        value: String,

        /// External sheet id (omit to use sheet.default)
        #[arg(long)]
        sheet: Option<String>,
    },

    /// Grow the grid to a target shape and push it to the remote sheet
    #[command(after_help = "\
Grids never shrink: targets smaller than the current shape leave the
grid as it is, and the full grid is pushed either way.

Examples:
  ghub resize --rows 20 --cols 8 --sheet ext-1")]
    Resize {
        /// Target row count
        #[arg(long)]
        rows: u32,

        /// Target column count
        #[arg(long)]
        cols: u32,

        /// External sheet id (omit to use sheet.default)
        #[arg(long)]
        sheet: Option<String>,
    },

    /// Configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum SheetCommands {
    /// List spreadsheets with their links
    List {
        /// Machine-readable output
        #[arg(long)]
        json: bool,
    },

    /// Create a spreadsheet
    Create {
        /// Spreadsheet name
        name: String,
    },

    /// Rename a spreadsheet
    Rename {
        /// Spreadsheet id
        id: i64,

        /// New name
        name: String,
    },

    /// Delete a spreadsheet
    Delete {
        /// Spreadsheet id
        id: i64,
    },

    /// Show one spreadsheet record
    Show {
        /// Spreadsheet id
        id: i64,

        /// Machine-readable output
        #[arg(long)]
        json: bool,
    },

    /// Delete empty cell records in bulk
    Clean {
        /// Spreadsheet id
        id: i64,
    },
}

#[derive(Subcommand)]
enum CellCommands {
    /// List cell records for a spreadsheet
    List {
        /// Spreadsheet id
        sheet_id: i64,

        /// Machine-readable output
        #[arg(long)]
        json: bool,
    },

    /// Store a cell record
    Add {
        /// Spreadsheet id
        sheet_id: i64,

        /// Cell address, e.g. B2
        address: String,

        /// Cell value
        value: String,
    },

    /// Replace a cell record's value
    Set {
        /// Cell record id
        cell_id: i64,

        /// New value
        value: String,
    },

    /// Delete a cell record
    Rm {
        /// Cell record id
        cell_id: i64,
    },

    /// Evaluate a cell record on the backend and print the result
    Eval {
        /// Cell record id
        cell_id: i64,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Read one setting
    Get {
        /// Dotted key, e.g. registry.url
        key: String,
    },

    /// Write one setting
    Set {
        /// Dotted key, e.g. registry.url
        key: String,

        /// New value (empty clears sheet.default)
        value: String,
    },

    /// Print the settings file path
    Path,

    /// Show whether a values API key is configured
    Key,

    /// Store the values API key in the system keychain
    SetKey {
        /// The API key
        key: String,
    },

    /// Remove the values API key from the system keychain
    DeleteKey,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        None => {
            // No subcommand = show help
            eprintln!("Usage: ghub <command> [options]");
            eprintln!("       ghub --help for more information");
            Ok(())
        }
        Some(Commands::Sheet { command }) => match command {
            SheetCommands::List { json } => registry::cmd_sheet_list(json),
            SheetCommands::Create { name } => registry::cmd_sheet_create(name),
            SheetCommands::Rename { id, name } => registry::cmd_sheet_rename(id, name),
            SheetCommands::Delete { id } => registry::cmd_sheet_delete(id),
            SheetCommands::Show { id, json } => registry::cmd_sheet_show(id, json),
            SheetCommands::Clean { id } => registry::cmd_sheet_clean(id),
        },
        Some(Commands::Cell { command }) => match command {
            CellCommands::List { sheet_id, json } => registry::cmd_cell_list(sheet_id, json),
            CellCommands::Add { sheet_id, address, value } => {
                registry::cmd_cell_add(sheet_id, address, value)
            }
            CellCommands::Set { cell_id, value } => registry::cmd_cell_set(cell_id, value),
            CellCommands::Rm { cell_id } => registry::cmd_cell_rm(cell_id),
            CellCommands::Eval { cell_id } => registry::cmd_cell_eval(cell_id),
        },
        Some(Commands::Pull { sheet, range, output, quiet }) => {
            values::cmd_pull(sheet, range, output, quiet)
        }
        Some(Commands::Edit { address, value, sheet }) => values::cmd_edit(address, value, sheet),
        Some(Commands::Resize { rows, cols, sheet }) => values::cmd_resize(rows, cols, sheet),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Get { key } => cmd_config_get(key),
            ConfigCommands::Set { key, value } => cmd_config_set(key, value),
            ConfigCommands::Path => cmd_config_path(),
            ConfigCommands::Key => cmd_config_key(),
            ConfigCommands::SetKey { key } => cmd_config_set_key(key),
            ConfigCommands::DeleteKey => cmd_config_delete_key(),
        },
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self { code: EXIT_PARSE, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Parse a cell address argument, mapping the library error to a
/// parse-grade CLI error.
pub(crate) fn parse_address(s: &str) -> Result<CellAddress, CliError> {
    s.parse()
        .map_err(|e| CliError::parse(format!("invalid cell address {:?}: {}", s, e)))
}

// ============================================================================
// config
// ============================================================================

fn cmd_config_get(key: String) -> Result<(), CliError> {
    let settings = Settings::load();
    match settings.get(&key) {
        Some(value) => {
            println!("{}", value);
            Ok(())
        }
        None => Err(CliError::args(format!(
            "Unknown setting '{}'. Valid keys: {}",
            key,
            SETTING_KEYS.join(", ")
        ))),
    }
}

fn cmd_config_set(key: String, value: String) -> Result<(), CliError> {
    let mut settings = Settings::load();
    settings.set(&key, &value).map_err(CliError::args)?;
    settings.save().map_err(CliError::io)?;
    eprintln!("{} = {}", key, value);
    Ok(())
}

fn cmd_config_path() -> Result<(), CliError> {
    println!("{}", Settings::config_path_display());
    Ok(())
}

fn cmd_config_key() -> Result<(), CliError> {
    // Never print the key itself, only where it came from.
    let lookup = secrets::get_api_key();
    match lookup.key {
        Some(_) => println!("API key: set ({})", lookup.source.as_str()),
        None => println!("API key: not set"),
    }
    Ok(())
}

fn cmd_config_set_key(key: String) -> Result<(), CliError> {
    secrets::set_api_key(&key).map_err(|e| CliError {
        code: EXIT_ERROR,
        message: e,
        hint: Some(format!(
            "or set the {} environment variable",
            secrets::API_KEY_ENV
        )),
    })?;
    eprintln!("API key stored in keychain");
    Ok(())
}

fn cmd_config_delete_key() -> Result<(), CliError> {
    secrets::delete_api_key().map_err(|e| CliError {
        code: EXIT_ERROR,
        message: e,
        hint: None,
    })?;
    eprintln!("API key removed from keychain");
    Ok(())
}
