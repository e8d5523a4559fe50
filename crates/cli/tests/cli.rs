// ABOUTME: Integration tests for the shelfcopy CLI binary.
// ABOUTME: Tests HTTP export to a dated file, saved-page export, stdout output, and failure reporting.

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

const LIST_PATH: &str = "/review/list/12345-alice";
const HEADER: &str = "Title,Author,My Rating,Average Rating,Num Ratings,Date Started,Date Read,\
Date Added,Original Publication Year,Year Published,Number of Pages,ISBN,ISBN13,Asin,Read Count,\
Owned Copies,Comments,My Review";

/// Environment variables the binary reads settings or log filters from.
const SETTING_VARS: &[&str] = &[
    "SHELFCOPY_USERNAME",
    "SHELFCOPY_SHELF",
    "SHELFCOPY_BASE_URL",
    "SHELFCOPY_OUTPUT_DIR",
    "SHELFCOPY_USER_AGENT",
    "SHELFCOPY_TIMEOUT_SECS",
    "RUST_LOG",
];

/// A command isolated from any settings in the caller's environment or working directory.
fn shelfcopy_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("shelfcopy").unwrap();
    cmd.current_dir(dir.path());
    for var in SETTING_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../shelfcopy/tests/fixtures/html")
        .join(format!("{name}.html"))
}

fn fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()))
}

fn serve_page<'a>(server: &'a MockServer, page: u32, body: String) -> httpmock::Mock<'a> {
    server.mock(|when, then| {
        when.method(GET)
            .path(LIST_PATH)
            .query_param("page", page.to_string());
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(body);
    })
}

/// The single export file written into `dir`.
fn written_export(dir: &TempDir) -> PathBuf {
    let files: Vec<PathBuf> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    assert_eq!(files.len(), 1, "expected one export in {:?}", files);
    files.into_iter().next().unwrap()
}

#[test]
fn command_clears_every_setting_variable() {
    let dir = TempDir::new().unwrap();
    let cmd = shelfcopy_cmd(&dir);
    let cleared: Vec<String> = cmd
        .get_envs()
        .filter(|(_, value)| value.is_none())
        .map(|(key, _)| key.to_string_lossy().into_owned())
        .collect();

    for var in SETTING_VARS {
        assert!(cleared.iter().any(|k| k == var), "{var} is not cleared");
    }
    assert!(cleared.iter().any(|k| k == "SHELFCOPY_USER_AGENT"));
    assert!(cleared.iter().any(|k| k == "SHELFCOPY_TIMEOUT_SECS"));
}

#[test]
fn timeout_from_environment_is_validated() {
    let out = TempDir::new().unwrap();

    shelfcopy_cmd(&out)
        .env("SHELFCOPY_TIMEOUT_SECS", "soon")
        .arg("-u")
        .arg("12345-alice")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read settings"));
}

#[test]
fn exports_shelf_to_dated_file() {
    let server = MockServer::start();
    let page1 = serve_page(&server, 1, fixture("page1"));
    let page2 = serve_page(&server, 2, fixture("page2"));
    let out = TempDir::new().unwrap();

    shelfcopy_cmd(&out)
        .arg("--username")
        .arg("12345-alice")
        .arg("--base-url")
        .arg(server.base_url())
        .arg("-o")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 3 books to"));

    page1.assert();
    page2.assert();

    let path = written_export(&out);
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("goodreads_export-"), "{name}");
    assert_eq!(name.len(), "goodreads_export-YYYYMMDD.csv".len());

    let csv = fs::read_to_string(&path).unwrap();
    assert!(csv.starts_with(HEADER), "{csv}");
    assert!(csv.contains("Dune,\"Herbert, Frank\",4,"));
    assert!(csv.contains("Piranesi,"));
}

#[test]
fn username_from_environment() {
    let server = MockServer::start();
    let page1 = serve_page(&server, 1, fixture("empty_shelf"));
    let out = TempDir::new().unwrap();

    shelfcopy_cmd(&out)
        .env("SHELFCOPY_USERNAME", "12345-alice")
        .env("SHELFCOPY_BASE_URL", server.base_url())
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 0 books to"));

    page1.assert();
    let csv = fs::read_to_string(written_export(&out)).unwrap();
    assert_eq!(csv.trim_end(), HEADER);
}

#[test]
fn settings_file_in_working_directory() {
    let server = MockServer::start();
    let page1 = server.mock(|when, then| {
        when.method(GET)
            .path(LIST_PATH)
            .query_param("page", "1")
            .query_param("shelf", "currently-reading");
        then.status(200).body(fixture("page2"));
    });
    let out = TempDir::new().unwrap();
    fs::write(
        out.path().join("shelfcopy.toml"),
        format!(
            "username = \"12345-alice\"\nshelf = \"currently-reading\"\nbase_url = \"{}\"\n",
            server.base_url()
        ),
    )
    .unwrap();

    shelfcopy_cmd(&out)
        .arg("--stdout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Piranesi"));

    page1.assert();
}

#[test]
fn saved_pages_export_without_network() {
    let out = TempDir::new().unwrap();

    shelfcopy_cmd(&out)
        .arg("--html")
        .arg(fixture_path("page1"))
        .arg(fixture_path("page2"))
        .arg("--stdout")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(HEADER))
        .stdout(predicate::str::contains("Emma,\"Austen, Jane\",2,"))
        .stdout(predicate::str::contains("A house of endless halls."));

    // --stdout writes no file.
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn missing_username_fails() {
    let out = TempDir::new().unwrap();

    shelfcopy_cmd(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no username configured"));
}

#[test]
fn missing_config_file_fails() {
    let out = TempDir::new().unwrap();

    shelfcopy_cmd(&out)
        .arg("--config")
        .arg(out.path().join("absent.toml"))
        .arg("--username")
        .arg("12345-alice")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load settings"));
}

#[test]
fn http_failure_reports_page_and_writes_nothing() {
    let server = MockServer::start();
    serve_page(&server, 1, fixture("page1"));
    server.mock(|when, then| {
        when.method(GET).path(LIST_PATH).query_param("page", "2");
        then.status(503);
    });
    let out = TempDir::new().unwrap();

    shelfcopy_cmd(&out)
        .arg("-u")
        .arg("12345-alice")
        .arg("--base-url")
        .arg(server.base_url())
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP 503"));

    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}
