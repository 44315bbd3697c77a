#![allow(dead_code)]

pub mod mocks;

use std::{fs, path::PathBuf};

use tempfile::TempDir;

pub const HEADERS: [&str; 7] = [
    "Entity ID",
    "Entity Name",
    "Name Type",
    "Entity Type",
    "Principal Office Address",
    "RA Name",
    "Status",
];

pub const ROW: &str = r#"111,,Fictitious Name,Nonstock Corporation,"5555 Whatever Dr, Nowhere, VA, 88888 - 7777, USA",Doctor Who,Active"#;

/// Scratch CSV file that lives as long as the returned directory.
pub struct CsvFile {
    pub dir: TempDir,
    pub path: PathBuf,
}

/// Writes `headers` then `lines`, newline terminated, to a fresh `file.csv`.
pub fn create_csv(headers: &[&str], lines: &[&str]) -> CsvFile {
    let mut content = vec![headers.join(",")];
    content.extend(lines.iter().map(|line| line.to_string()));
    create_raw_csv((content.join("\n") + "\n").as_bytes())
}

pub fn create_raw_csv(content: &[u8]) -> CsvFile {
    let dir = tempfile::tempdir().expect("Unable to create temporary directory");
    let path = dir.path().join("file.csv");
    fs::write(&path, content).expect("Unable to write CSV file");
    CsvFile { dir, path }
}
