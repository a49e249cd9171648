//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args)               |
//! | 3-9     | Local            | File and input handling                  |
//! | 10-19   | Registry         | Spreadsheet/cell record backend          |
//! | 20-29   | Values           | Values API (cell contents)               |
//! | 30-39   | Edit             | Editor session outcomes                  |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Local (3-9)
// =============================================================================

/// I/O error - cannot read or write a local file.
pub const EXIT_IO: u8 = 3;

/// Parse error - malformed cell address or range.
pub const EXIT_PARSE: u8 = 4;

// =============================================================================
// Registry (10-19)
// =============================================================================

/// Network/HTTP error communicating with the registry backend.
pub const EXIT_REGISTRY_NETWORK: u8 = 10;

/// Registry rejected the request (bad request, unprocessable entity).
pub const EXIT_REGISTRY_VALIDATION: u8 = 11;

/// Spreadsheet or cell record not found.
pub const EXIT_REGISTRY_NOT_FOUND: u8 = 12;

// =============================================================================
// Values (20-29)
// =============================================================================

/// Network/HTTP error communicating with the values API.
pub const EXIT_VALUES_NETWORK: u8 = 20;

/// Values API rejected the request (unparseable range, bad sheet id).
pub const EXIT_VALUES_VALIDATION: u8 = 21;

/// Auth rejected by the values API (401/403).
pub const EXIT_VALUES_AUTH: u8 = 22;

/// No API key found (neither keychain nor environment).
pub const EXIT_VALUES_NO_KEY: u8 = 23;

// =============================================================================
// Edit (30-39)
// =============================================================================

/// Edit applied locally but the remote write failed; the cell is
/// flagged dirty and the remote sheet was not updated.
pub const EXIT_EDIT_DIRTY: u8 = 30;
