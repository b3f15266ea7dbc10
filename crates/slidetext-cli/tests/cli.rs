//! Black-box tests of the slidetext binary and its stdout protocol.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

/// Write a minimal one-slide PPTX to a temp file and return its handle.
fn write_fixture() -> tempfile::NamedTempFile {
    let rels = r#"<?xml version="1.0"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/></Relationships>"#;
    let slide = r#"<?xml version="1.0"?><p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:sp><p:txBody><a:p><a:r><a:t>Hello from the deck</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    {
        let mut writer = zip::ZipWriter::new(&mut file);
        let options = zip::write::SimpleFileOptions::default();
        writer
            .start_file("ppt/_rels/presentation.xml.rels", options)
            .unwrap();
        writer.write_all(rels.as_bytes()).unwrap();
        writer.start_file("ppt/slides/slide1.xml", options).unwrap();
        writer.write_all(slide.as_bytes()).unwrap();
        writer.finish().unwrap();
    }
    file
}

#[test]
fn test_extracts_local_file() {
    let fixture = write_fixture();

    let output = Command::cargo_bin("slidetext")
        .unwrap()
        .arg("--no-ocr")
        .arg(fixture.path())
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let json: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();

    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["slide"], 1);
    assert_eq!(data[0]["text"], "Hello from the deck");
    assert_eq!(data[0]["notes"], serde_json::Value::Null);
    assert_eq!(data[0]["stats"]["total_images"], 0);
}

#[test]
fn test_missing_file_reports_error_envelope() {
    let output = Command::cargo_bin("slidetext")
        .unwrap()
        .arg("--no-ocr")
        .arg("/nonexistent/deck.pptx")
        .assert()
        .failure()
        .get_output()
        .clone();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let json: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert!(json["error"].as_str().unwrap().contains("Failed to read"));
}

#[test]
fn test_corrupt_container_reports_error_envelope() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"this is not a zip archive").unwrap();

    let output = Command::cargo_bin("slidetext")
        .unwrap()
        .arg("--no-ocr")
        .arg(file.path())
        .assert()
        .failure()
        .get_output()
        .clone();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let json: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert!(json["error"].as_str().unwrap().contains("Archive error"));
}

#[test]
fn test_diagnostics_stay_off_stdout() {
    let fixture = write_fixture();

    Command::cargo_bin("slidetext")
        .unwrap()
        .arg("--no-ocr")
        .arg("--verbose")
        .arg(fixture.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{\"data\":"));
}
