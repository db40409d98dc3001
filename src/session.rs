use std::{
    sync::Arc,
    time::Instant,
};

use tracing::info;

use crate::{
    core::{
        classify_rows,
        AggregateResult,
        Grade,
        ReferenceTable,
    },
    parser::ParsedCsv,
};

/// What the user is currently looking at: the selected grade, the last file
/// loaded and the report computed from both.
pub struct Session {
    table: Arc<ReferenceTable>,
    grade: Grade,
    file: Option<ParsedCsv>,
    report: Option<AggregateResult>,
}

impl Session {
    pub fn new(table: Arc<ReferenceTable>, grade: Grade) -> Self {
        Self { table, grade, file: None, report: None }
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    pub fn table(&self) -> &ReferenceTable {
        &self.table
    }

    pub fn file(&self) -> Option<&ParsedCsv> {
        self.file.as_ref()
    }

    pub fn report(&self) -> Option<&AggregateResult> {
        self.report.as_ref()
    }

    pub fn load(&mut self, file: ParsedCsv) -> &AggregateResult {
        info!("Loaded {} ({} rows)", file.filename, file.rows.len());
        self.file = Some(file);
        self.reclassify();
        self.report.get_or_insert_with(AggregateResult::default)
    }

    /// Returns true when the grade changed.
    pub fn set_grade(&mut self, grade: Grade) -> bool {
        if grade == self.grade {
            return false;
        }
        self.grade = grade;
        self.reclassify();
        true
    }

    pub fn clear(&mut self) {
        self.file = None;
        self.report = None;
    }

    fn reclassify(&mut self) {
        let Some(file) = &self.file else {
            return;
        };

        let start = Instant::now();
        let report = classify_rows(&self.table, &file.rows, &file.filename, self.grade);
        info!(
            "Checked {} against grade {}: {} of {} rows use unlearned kanji ({:.1}ms)",
            report.filename,
            self.grade,
            report.flagged_rows,
            report.total_rows,
            start.elapsed().as_secs_f64() * 1000.0
        );
        self.report = Some(report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::pipeline::START_MARKER,
        parser::parse_csv,
    };

    fn session() -> Session {
        Session::new(Arc::new(ReferenceTable::builtin().unwrap()), Grade::FIRST)
    }

    fn sample() -> ParsedCsv {
        let text = format!("context,x\n{START_MARKER}\n山\n海へ\n貿易\n");
        parse_csv("sample.csv", &text).unwrap()
    }

    #[test]
    fn test_no_report_before_load() {
        let mut session = session();
        assert!(session.report().is_none());
        assert!(session.set_grade(Grade::LAST));
        assert!(session.report().is_none());
    }

    #[test]
    fn test_load_classifies_at_current_grade() {
        let mut session = session();
        let report = session.load(sample());
        assert_eq!(report.filename, "sample.csv");
        assert_eq!(report.total_rows, 3);
        assert_eq!(report.flagged_rows, 2);
    }

    #[test]
    fn test_grade_change_reclassifies() {
        let mut session = session();
        session.load(sample());

        assert!(session.set_grade(Grade::new(2).unwrap()));
        assert_eq!(session.report().unwrap().flagged_rows, 1);

        assert!(session.set_grade(Grade::LAST));
        let report = session.report().unwrap();
        assert_eq!(report.total_rows, 3);
        assert_eq!(report.flagged_rows, 0);

        assert!(!session.set_grade(Grade::LAST));

        assert!(session.set_grade(Grade::FIRST));
        assert_eq!(session.report().unwrap().flagged_rows, 2);
    }

    #[test]
    fn test_clear() {
        let mut session = session();
        session.load(sample());
        session.clear();
        assert!(session.file().is_none());
        assert!(session.report().is_none());
    }
}
