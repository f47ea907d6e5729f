//! CLI integration tests
//!
//! These tests verify the CLI commands work correctly by running the binary.

#![cfg(feature = "cli")]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn wsdl2_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_wsdl2"))
}

fn run(args: &[&str]) -> Output {
    Command::new(wsdl2_bin())
        .args(args)
        .output()
        .expect("Failed to execute command")
}

const STOCK: &str = r#"<description xmlns="http://www.w3.org/2006/01/wsdl"
    xmlns:tns="urn:example:stock"
    targetNamespace="urn:example:stock">
  <interface name="StockQuote">
    <operation name="getQuote"><input/><output/></operation>
  </interface>
  <binding name="StockQuoteBinding" interface="tns:StockQuote"
           type="http://www.w3.org/2006/01/wsdl/soap">
    <operation ref="tns:getQuote"/>
  </binding>
  <service name="StockQuoteService" interface="tns:StockQuote">
    <endpoint name="Main" binding="tns:StockQuoteBinding"
              address="http://example.org/stock"/>
  </service>
</description>
"#;

fn write_fixture(dir: &Path, name: &str, text: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path.to_str().unwrap().to_string()
}

// ============================================================================
// Inspect Command Tests
// ============================================================================

#[test]
fn test_cli_inspect_basic() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(dir.path(), "stock.wsdl", STOCK);
    let output = run(&["inspect", &file]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "inspect should succeed");
    assert!(stdout.contains("wsdl2 v"), "should show version");
    assert!(stdout.contains("urn:example:stock"), "should show namespace");
    assert!(stdout.contains("=== Interfaces ==="));
    assert!(stdout.contains("{urn:example:stock}getQuote"));
    assert!(stdout.contains("http://example.org/stock"));
}

#[test]
fn test_cli_inspect_json_output() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(dir.path(), "stock.wsdl", STOCK);
    let output = run(&["inspect", "--json", &file]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["targetNamespace"], "urn:example:stock");
    assert_eq!(json["documents"], 1);
    assert_eq!(
        json["interfaces"][0]["operations"][0]["pattern"],
        "http://www.w3.org/2006/01/wsdl/in-out"
    );
    assert_eq!(
        json["bindings"][0]["interface"],
        "{urn:example:stock}StockQuote"
    );
    assert_eq!(
        json["services"][0]["endpoints"][0]["address"],
        "http://example.org/stock"
    );
    assert_eq!(json["diagnostics"].as_array().unwrap().len(), 0);
}

#[test]
fn test_cli_inspect_validate_reports_errors() {
    let dir = TempDir::new().unwrap();
    let broken = STOCK.replace(r#"interface="tns:StockQuote"
           type"#, r#"interface="tns:Missing"
           type"#);
    let file = write_fixture(dir.path(), "broken.wsdl", &broken);

    let output = run(&["inspect", "--validate", &file]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("=== Diagnostics ==="));
    assert!(stdout.contains("WSDL"));
}

#[test]
fn test_cli_inspect_missing_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("absent.wsdl");
    let output = run(&["inspect", file.to_str().unwrap()]);

    assert!(!output.status.success());
}

#[test]
fn test_cli_help() {
    let output = run(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("inspect"));
}
