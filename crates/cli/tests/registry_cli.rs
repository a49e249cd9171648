// Integration tests for the registry commands, run against the built
// binary with a mocked backend.
// Run with: cargo test -p gridhub-cli --test registry_cli

use std::path::Path;
use std::process::Command;

use httpmock::prelude::*;

fn ghub(config_dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ghub"));
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"));
    // Settings land in the test's own config dir, and ambient
    // overrides are cleared so each test controls what it uses.
    cmd.env("XDG_CONFIG_HOME", config_dir);
    cmd.env_remove("GRIDHUB_REGISTRY_URL");
    cmd.env_remove("GRIDHUB_VALUES_URL");
    cmd.env_remove("GRIDHUB_SHEET");
    cmd.env_remove("GRIDHUB_API_KEY");
    cmd
}

#[test]
fn sheet_list_renders_table() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1/spreadsheets-with-link/");
        then.status(200).json_body(serde_json::json!([
            {
                "id": 1,
                "name": "Budget",
                "created_at": "2025-03-06T10:30:00Z",
                "link": { "id": 7, "link": "sheet-ext-1" }
            },
            { "id": 2, "name": "Plain", "created_at": null, "link": null }
        ]));
    });

    let dir = tempfile::tempdir().unwrap();
    let output = ghub(dir.path())
        .env("GRIDHUB_REGISTRY_URL", server.base_url())
        .args(["sheet", "list"])
        .output()
        .expect("failed to run ghub");
    mock.assert();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Budget"), "stdout: {}", stdout);
    assert!(stdout.contains("2025-03-06 10:30"), "stdout: {}", stdout);
    assert!(stdout.contains("sheet-ext-1"), "stdout: {}", stdout);
    assert!(stdout.contains("N/A"), "stdout: {}", stdout);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("2 spreadsheet(s)"), "stderr: {}", stderr);
}

#[test]
fn sheet_list_json_is_a_single_array() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/spreadsheets-with-link/");
        then.status(200).json_body(serde_json::json!([
            { "id": 1, "name": "Budget", "created_at": null, "link": null },
            { "id": 2, "name": "Plain", "created_at": null, "link": null }
        ]));
    });

    let dir = tempfile::tempdir().unwrap();
    let output = ghub(dir.path())
        .env("GRIDHUB_REGISTRY_URL", server.base_url())
        .args(["sheet", "list", "--json"])
        .output()
        .expect("failed to run ghub");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let val: serde_json::Value =
        serde_json::from_str(stdout.trim()).expect("stdout must be one JSON value");
    let arr = val.as_array().expect("stdout must be a JSON array");
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["name"], serde_json::json!("Budget"));
}

#[test]
fn sheet_list_empty_reports_on_stderr() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/spreadsheets-with-link/");
        then.status(200).json_body(serde_json::json!([]));
    });

    let dir = tempfile::tempdir().unwrap();
    let output = ghub(dir.path())
        .env("GRIDHUB_REGISTRY_URL", server.base_url())
        .args(["sheet", "list"])
        .output()
        .expect("failed to run ghub");

    assert!(output.status.success());
    assert!(output.stdout.is_empty(), "table output should be empty");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No spreadsheets found."), "stderr: {}", stderr);
}

#[test]
fn sheet_create_reports_new_id() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/spreadsheets/")
            .json_body(serde_json::json!({ "name": "Budget" }));
        then.status(201)
            .json_body(serde_json::json!({ "id": 7, "name": "Budget" }));
    });

    let dir = tempfile::tempdir().unwrap();
    let output = ghub(dir.path())
        .env("GRIDHUB_REGISTRY_URL", server.base_url())
        .args(["sheet", "create", "Budget"])
        .output()
        .expect("failed to run ghub");
    mock.assert();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Created spreadsheet #7"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn sheet_create_blank_name_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let output = ghub(dir.path())
        .args(["sheet", "create", "   "])
        .output()
        .expect("failed to run ghub");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("may not be blank"), "stderr: {}", stderr);
}

#[test]
fn sheet_rename_and_delete_hit_detail_routes() {
    let server = MockServer::start();
    let rename = server.mock(|when, then| {
        when.method(PUT)
            .path("/api/v1/spreadsheets/4/")
            .json_body(serde_json::json!({ "name": "Renamed" }));
        then.status(200)
            .json_body(serde_json::json!({ "id": 4, "name": "Renamed" }));
    });
    let delete = server.mock(|when, then| {
        when.method(DELETE).path("/api/v1/spreadsheets/4/");
        then.status(204);
    });

    let dir = tempfile::tempdir().unwrap();
    let output = ghub(dir.path())
        .env("GRIDHUB_REGISTRY_URL", server.base_url())
        .args(["sheet", "rename", "4", "Renamed"])
        .output()
        .expect("failed to run ghub");
    rename.assert();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Renamed spreadsheet #4"));

    let output = ghub(dir.path())
        .env("GRIDHUB_REGISTRY_URL", server.base_url())
        .args(["sheet", "delete", "4"])
        .output()
        .expect("failed to run ghub");
    delete.assert();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Deleted spreadsheet #4"));
}

#[test]
fn sheet_show_missing_exits_12() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/spreadsheets/99/");
        then.status(404)
            .json_body(serde_json::json!({ "detail": "Not found." }));
    });

    let dir = tempfile::tempdir().unwrap();
    let output = ghub(dir.path())
        .env("GRIDHUB_REGISTRY_URL", server.base_url())
        .args(["sheet", "show", "99"])
        .output()
        .expect("failed to run ghub");

    assert_eq!(
        output.status.code(),
        Some(12),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: Not found."), "stderr: {}", stderr);
}

#[test]
fn sheet_clean_reports_removed_count() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/v1/spreadsheets/1/clean-cells/");
        then.status(200).json_body(serde_json::json!({ "removed": 3 }));
    });

    let dir = tempfile::tempdir().unwrap();
    let output = ghub(dir.path())
        .env("GRIDHUB_REGISTRY_URL", server.base_url())
        .args(["sheet", "clean", "1"])
        .output()
        .expect("failed to run ghub");
    mock.assert();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Removed 3 empty cell record(s)"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn cell_list_renders_table() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/cells/")
            .query_param("spreadsheet", "1");
        then.status(200).json_body(serde_json::json!([
            { "id": 3, "spreadsheet": 1, "address": "B2", "value": "42" }
        ]));
    });

    let dir = tempfile::tempdir().unwrap();
    let output = ghub(dir.path())
        .env("GRIDHUB_REGISTRY_URL", server.base_url())
        .args(["cell", "list", "1"])
        .output()
        .expect("failed to run ghub");
    mock.assert();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("B2"), "stdout: {}", stdout);
    assert!(stdout.contains("42"), "stdout: {}", stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1 cell record(s)"), "stderr: {}", stderr);
}

#[test]
fn cell_add_round_trips_address() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/v1/cells/").json_body(serde_json::json!({
            "spreadsheet": 1,
            "address": "B2",
            "value": "42"
        }));
        then.status(201).json_body(serde_json::json!({
            "id": 9, "spreadsheet": 1, "address": "B2", "value": "42"
        }));
    });

    let dir = tempfile::tempdir().unwrap();
    let output = ghub(dir.path())
        .env("GRIDHUB_REGISTRY_URL", server.base_url())
        .args(["cell", "add", "1", "B2", "42"])
        .output()
        .expect("failed to run ghub");
    mock.assert();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Stored cell #9 at B2"), "stderr: {}", stderr);
}

#[test]
fn cell_add_invalid_address_exits_4() {
    // The address is rejected before any request is made, so no
    // backend is mocked here.
    let dir = tempfile::tempdir().unwrap();
    let output = ghub(dir.path())
        .args(["cell", "add", "1", "5B", "42"])
        .output()
        .expect("failed to run ghub");

    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid cell address"), "stderr: {}", stderr);
}

#[test]
fn cell_set_and_rm_hit_detail_routes() {
    let server = MockServer::start();
    let set = server.mock(|when, then| {
        when.method(PUT)
            .path("/api/v1/cells/3/")
            .json_body(serde_json::json!({ "value": "9" }));
        then.status(200).json_body(serde_json::json!({
            "id": 3, "spreadsheet": 1, "address": "B2", "value": "9"
        }));
    });
    let rm = server.mock(|when, then| {
        when.method(DELETE).path("/api/v1/cells/3/");
        then.status(204);
    });

    let dir = tempfile::tempdir().unwrap();
    let output = ghub(dir.path())
        .env("GRIDHUB_REGISTRY_URL", server.base_url())
        .args(["cell", "set", "3", "9"])
        .output()
        .expect("failed to run ghub");
    set.assert();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Updated cell #3"));

    let output = ghub(dir.path())
        .env("GRIDHUB_REGISTRY_URL", server.base_url())
        .args(["cell", "rm", "3"])
        .output()
        .expect("failed to run ghub");
    rm.assert();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Deleted cell #3"));
}

#[test]
fn cell_eval_prints_result_on_stdout() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/v1/cells/3/evaluate/");
        then.status(200).json_body(serde_json::json!({ "result": "84" }));
    });

    let dir = tempfile::tempdir().unwrap();
    let output = ghub(dir.path())
        .env("GRIDHUB_REGISTRY_URL", server.base_url())
        .args(["cell", "eval", "3"])
        .output()
        .expect("failed to run ghub");
    mock.assert();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "84\n");
}

#[test]
fn unreachable_registry_exits_10() {
    // Nothing listens on port 1.
    let dir = tempfile::tempdir().unwrap();
    let output = ghub(dir.path())
        .env("GRIDHUB_REGISTRY_URL", "http://127.0.0.1:1")
        .args(["sheet", "list"])
        .output()
        .expect("failed to run ghub");

    assert_eq!(
        output.status.code(),
        Some(10),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Cannot reach registry"), "stderr: {}", stderr);
    assert!(stderr.contains("registry.url"), "stderr: {}", stderr);
}
