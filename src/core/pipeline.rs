use std::{
    collections::HashSet,
    time::Instant,
};

use serde::Serialize;
use tracing::debug;

use super::{
    classifier::{
        Classifier,
        UnlearnedKanji,
    },
    Grade,
    ReferenceTable,
};

/// First cell of the row after which problems start ("edit the rows below this line").
pub const START_MARKER: &str = "//この行より下の行を編集してください";
pub const COMMENT_PREFIX: &str = "//";
pub const METADATA_LABELS: [&str; 3] = ["context", "iconFileName", "alternatives"];
pub const DISPLAY_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    StartMarker,
    Comment,
    Metadata,
    Content,
}

/// Whitespace and stray byte-order marks around a label are ignored.
fn trim_cell(cell: &str) -> &str {
    cell.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

impl RowKind {
    /// Decided by the trimmed first cell alone. A missing cell reads as empty text.
    pub fn of<S: AsRef<str>>(row: &[S]) -> Self {
        let first = row.first().map(|cell| trim_cell(cell.as_ref())).unwrap_or_default();

        if first == START_MARKER {
            RowKind::StartMarker
        } else if first.starts_with(COMMENT_PREFIX) {
            RowKind::Comment
        } else if METADATA_LABELS.contains(&first) {
            RowKind::Metadata
        } else {
            RowKind::Content
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowResult {
    /// 1-based position among countable rows, flagged or not.
    pub sequence_number: usize,
    pub display_text: String,
    pub unlearned: Vec<UnlearnedKanji>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateResult {
    pub filename: String,
    pub total_rows: usize,
    pub flagged_rows: usize,
    /// Flagged rows only, in file order.
    pub rows: Vec<RowResult>,
}

/// Non-empty cells joined for display. Cells keep their original spacing.
pub fn display_text<S: AsRef<str>>(row: &[S]) -> String {
    row.iter()
        .map(AsRef::as_ref)
        .filter(|cell| !cell.trim().is_empty())
        .collect::<Vec<_>>()
        .join(DISPLAY_SEPARATOR)
}

/// Unlearned kanji across every cell of a row, unique across cells, in first-seen order.
pub fn unlearned_in_row<S: AsRef<str>>(classifier: &Classifier, row: &[S]) -> Vec<UnlearnedKanji> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();
    for cell in row {
        classifier.collect_into(cell.as_ref(), &mut seen, &mut found);
    }
    found
}

/// Runs one full classification pass over parsed rows.
///
/// Rows before the start marker, the marker itself, comment rows and reserved
/// metadata rows are never counted.
pub fn classify_rows<R, S>(
    table: &ReferenceTable,
    rows: &[R],
    filename: &str,
    target: Grade,
) -> AggregateResult
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let start = Instant::now();
    let classifier = Classifier::new(table, target);

    let mut result = AggregateResult { filename: filename.to_string(), ..Default::default() };
    let mut counting = false;

    for row in rows {
        let row = row.as_ref();
        match RowKind::of(row) {
            RowKind::StartMarker => {
                counting = true;
                continue;
            }
            RowKind::Comment | RowKind::Metadata => continue,
            RowKind::Content if !counting => continue,
            RowKind::Content => {}
        }

        result.total_rows += 1;

        let unlearned = unlearned_in_row(&classifier, row);
        if unlearned.is_empty() {
            continue;
        }

        result.flagged_rows += 1;
        result.rows.push(RowResult {
            sequence_number: result.total_rows,
            display_text: display_text(row),
            unlearned,
        });
    }

    debug!(
        "Classified {} rows of {} at grade {}: {} flagged ({:.1}ms)",
        result.total_rows,
        filename,
        target,
        result.flagged_rows,
        start.elapsed().as_secs_f64() * 1000.0
    );

    result
}
