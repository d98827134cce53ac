use assert_cmd::Command;
use flate2::write::GzEncoder;
use flate2::Compression;
use predicates::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/*-------------------------------------------------------------------------------------------------
  ipinfolookup Binary Tests
-------------------------------------------------------------------------------------------------*/

const TEST_FEED: &str = "\
start_ip,end_ip,country,country_name,continent,continent_name,asn,as_name,as_domain
1.0.0.0,1.0.0.255,US,United States,NA,North America,AS15169,Google LLC,google.com
1.1.1.0,1.1.1.255,AU,Australia,OC,Oceania,AS13335,\"Cloudflare, Inc.\",cloudflare.com
2001:4860::,2001:4860:ffff:ffff:ffff:ffff:ffff:ffff,US,United States,NA,North America,AS15169,Google LLC,google.com
9.0.0.0,9.0.0.255,FR,France,EU,Europe,,,
";

fn write_feed(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("country_asn.csv.gz");
    let file = File::create(&path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(contents.as_bytes()).unwrap();
    encoder.finish().unwrap();
    path
}

fn command(feed: &Path) -> Command {
    let mut command = Command::cargo_bin("ipinfolookup").unwrap();
    command.env_remove("IPINFO_CSV").arg("--input").arg(feed);
    command
}

/*--------------------------------------------------------------------------------------
  Version
--------------------------------------------------------------------------------------*/

#[test]
fn command_version() {
    Command::cargo_bin("ipinfolookup")
        .unwrap()
        .arg("--version")
        .assert()
        .success();
}

/*--------------------------------------------------------------------------------------
  Annotate Lines From Stdin
--------------------------------------------------------------------------------------*/

/*-----------------------------------------------------------------------------
  Annotate: Default Separator and Field
-----------------------------------------------------------------------------*/

#[test]
fn command_annotate_stdin() {
    let dir = TempDir::new().unwrap();
    let feed = write_feed(&dir, TEST_FEED);

    command(&feed)
        .write_stdin("1.0.0.128\tGET /\n1.0.1.0\tGET /\n")
        .assert()
        .success()
        .stdout(
            "1.0.0.128\tGET /\tUS\tAS15169\tgoogle.com\tGoogle LLC\n\
             1.0.1.0\tGET /\t\tAS0\t\t\n",
        );
}

/*-----------------------------------------------------------------------------
  Annotate: Custom Separator and Field
-----------------------------------------------------------------------------*/

#[test]
fn command_annotate_separator_and_field() {
    let dir = TempDir::new().unwrap();
    let feed = write_feed(&dir, TEST_FEED);

    command(&feed)
        .arg("--separator")
        .arg(",")
        .arg("--field")
        .arg("2")
        .write_stdin("GET,1.1.1.1\nshort\n")
        .assert()
        .success()
        .stdout("GET,1.1.1.1,AU,AS13335,cloudflare.com,Cloudflare, Inc.\nshort\n");
}

/*-----------------------------------------------------------------------------
  Annotate: Compact Table
-----------------------------------------------------------------------------*/

#[test]
fn command_annotate_compact() {
    let dir = TempDir::new().unwrap();
    let feed = write_feed(&dir, TEST_FEED);

    command(&feed)
        .arg("--compact")
        .write_stdin("1.0.0.1\n")
        .assert()
        .success()
        .stdout("1.0.0.1\tUS\tAS15169\tgoogle.com\tn/a\n");
}

/*-----------------------------------------------------------------------------
  Annotate: Input From Environment Variable
-----------------------------------------------------------------------------*/

#[test]
fn command_annotate_env_input() {
    let dir = TempDir::new().unwrap();
    let feed = write_feed(&dir, TEST_FEED);

    Command::cargo_bin("ipinfolookup")
        .unwrap()
        .env("IPINFO_CSV", &feed)
        .write_stdin("1.0.0.1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("AS15169"));
}

/*--------------------------------------------------------------------------------------
  Lookup
--------------------------------------------------------------------------------------*/

#[test]
fn command_lookup_ip_address() {
    let dir = TempDir::new().unwrap();
    let feed = write_feed(&dir, TEST_FEED);

    command(&feed)
        .arg("1.0.0.128")
        .assert()
        .success()
        .stdout(predicate::str::contains("google.com"));
}

#[test]
fn command_lookup_ip_address_not_found() {
    let dir = TempDir::new().unwrap();
    let feed = write_feed(&dir, TEST_FEED);

    command(&feed)
        .arg("1.0.0.255")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn command_lookup_invalid_ip_address() {
    let dir = TempDir::new().unwrap();
    let feed = write_feed(&dir, TEST_FEED);

    command(&feed)
        .arg("1.0.0.1")
        .arg("not-an-ip")
        .assert()
        .failure()
        .code(1);
}

/*-----------------------------------------------------------------------------
  Lookup: JSON Lines
-----------------------------------------------------------------------------*/

#[test]
fn command_lookup_json() {
    let dir = TempDir::new().unwrap();
    let feed = write_feed(&dir, TEST_FEED);

    let output = command(&feed)
        .arg("--json-format")
        .arg("1.1.1.1")
        .arg("8.8.8.8")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let lines: Vec<serde_json::Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["ip"], "1.1.1.1");
    assert_eq!(lines[0]["found"], true);
    assert_eq!(lines[0]["range"]["asn"], 13335);
    assert_eq!(lines[0]["range"]["as_name"], "Cloudflare, Inc.");
    assert_eq!(lines[1]["ip"], "8.8.8.8");
    assert_eq!(lines[1]["found"], false);
}

/*--------------------------------------------------------------------------------------
  Save to CSV
--------------------------------------------------------------------------------------*/

#[test]
fn command_save_to_csv() {
    let dir = TempDir::new().unwrap();
    let feed = write_feed(&dir, TEST_FEED);
    let csv_file = dir.path().join("results.csv");

    command(&feed)
        .arg("--csv")
        .arg(&csv_file)
        .arg("1.0.0.1")
        .assert()
        .success();

    let contents = std::fs::read_to_string(&csv_file).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next(),
        Some("IP Address,Range Start,Range End,Country,ASN,AS Domain,AS Name")
    );
    assert_eq!(
        lines.next(),
        Some("1.0.0.1,1.0.0.0,1.0.0.255,US,AS15169,google.com,Google LLC")
    );
}

/*--------------------------------------------------------------------------------------
  Errors
--------------------------------------------------------------------------------------*/

#[test]
fn command_missing_input_file() {
    let dir = TempDir::new().unwrap();

    command(&dir.path().join("missing.csv.gz"))
        .write_stdin("1.0.0.1\n")
        .assert()
        .failure()
        .code(2);
}

#[test]
fn command_inverted_range_in_feed() {
    let dir = TempDir::new().unwrap();
    let feed = write_feed(
        &dir,
        &format!("{TEST_FEED}5.0.0.9,5.0.0.1,US,United States,NA,North America,AS1,One,one.example\n"),
    );

    command(&feed)
        .write_stdin("1.0.0.1\n")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("inverted range"));
}

#[test]
fn command_multi_character_separator() {
    let dir = TempDir::new().unwrap();
    let feed = write_feed(&dir, TEST_FEED);

    command(&feed)
        .arg("--separator")
        .arg("::")
        .assert()
        .failure()
        .code(2);
}

#[test]
fn command_non_ascii_separator() {
    let dir = TempDir::new().unwrap();
    let feed = write_feed(&dir, TEST_FEED);

    command(&feed)
        .arg("--separator")
        .arg("→")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("single ASCII character"));
}
