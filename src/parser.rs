use std::{
    fs,
    path::Path,
};

use crate::core::MishuError;

/// Rows of a CSV file, cells already decoded, quotes resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCsv {
    pub filename: String,
    pub rows: Vec<Vec<String>>,
}

pub fn is_csv_path(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()).is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

pub fn filename_of(path: &Path) -> String {
    path.file_name().and_then(|name| name.to_str()).unwrap_or("Unknown File").to_string()
}

pub fn read_csv(path: &Path) -> Result<ParsedCsv, MishuError> {
    if !is_csv_path(path) {
        return Err(MishuError::UnsupportedFileType(filename_of(path)));
    }

    let bytes = fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|e| MishuError::Encoding(e.to_string()))?;
    parse_csv(&filename_of(path), &text)
}

/// No header row; rows may have different lengths; blank lines are dropped.
pub fn parse_csv(filename: &str, text: &str) -> Result<ParsedCsv, MishuError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(ParsedCsv { filename: filename.to_string(), rows })
}
