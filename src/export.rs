use std::path::Path;

use chrono::{
    DateTime,
    Local,
};
use serde::Serialize;
use tracing::info;

use crate::{
    core::{
        AggregateResult,
        Grade,
        MishuError,
    },
    persistence::write_json,
};

#[derive(Debug, Serialize)]
pub struct ReportExport<'a> {
    pub generated_at: DateTime<Local>,
    pub target_grade: Grade,
    #[serde(flatten)]
    pub report: &'a AggregateResult,
}

impl<'a> ReportExport<'a> {
    pub fn new(target_grade: Grade, report: &'a AggregateResult) -> Self {
        Self { generated_at: Local::now(), target_grade, report }
    }
}

/// `problems.csv` becomes `problems_report.json`.
pub fn default_export_name(filename: &str) -> String {
    let stem = Path::new(filename).file_stem().and_then(|s| s.to_str()).unwrap_or("report");
    format!("{}_report.json", stem)
}

pub fn write_report(
    path: &Path,
    target_grade: Grade,
    report: &AggregateResult,
) -> Result<(), MishuError> {
    write_json(path, &ReportExport::new(target_grade, report))?;
    info!("Report for {} written to {}", report.filename, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::core::{
        classify_rows,
        pipeline::START_MARKER,
        ReferenceTable,
    };

    #[test]
    fn test_default_export_name() {
        assert_eq!(default_export_name("problems.csv"), "problems_report.json");
        assert_eq!(default_export_name("算数.csv"), "算数_report.json");
        assert_eq!(default_export_name(""), "report_report.json");
    }

    #[test]
    fn test_export_shape() {
        let table = ReferenceTable::builtin().unwrap();
        let rows = vec![vec![START_MARKER.to_string()], vec!["憂鬱".to_string(), "".to_string()]];
        let report = classify_rows(&table, &rows, "p.csv", Grade::LAST);

        let value = serde_json::to_value(ReportExport::new(Grade::LAST, &report)).unwrap();
        assert_eq!(value["target_grade"], 6);
        assert_eq!(value["filename"], "p.csv");
        assert_eq!(value["total_rows"], 1);
        assert_eq!(value["flagged_rows"], 1);
        assert_eq!(value["rows"][0]["sequence_number"], 1);
        assert_eq!(value["rows"][0]["display_text"], "憂鬱");
        assert_eq!(value["rows"][0]["unlearned"][1]["char"], "鬱");
        assert_eq!(value["rows"][0]["unlearned"][1]["grade"], 7);
        assert!(value["generated_at"].is_string());
    }

    #[test]
    fn test_write_report() {
        let path = std::env::temp_dir().join(format!("mishu_report_{}.json", std::process::id()));
        let report = AggregateResult { filename: "p.csv".into(), ..Default::default() };
        write_report(&path, Grade::FIRST, &report).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert!(content.contains("\"target_grade\": 1"));
    }
}
