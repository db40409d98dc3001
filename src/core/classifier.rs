use std::collections::HashSet;

use serde::Serialize;

use super::{
    reference::is_kanji,
    Grade,
    KanjiGrade,
    ReferenceTable,
};

/// A kanji the pupil has not learned yet, with the grade that introduces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UnlearnedKanji {
    #[serde(rename = "char")]
    pub character: char,
    pub grade: KanjiGrade,
}

impl UnlearnedKanji {
    pub fn label(&self) -> String {
        self.grade.label()
    }
}

/// Classifies text against one target grade.
///
/// The learned set is built once, so a whole classification pass over many
/// cells shares it.
pub struct Classifier<'a> {
    table: &'a ReferenceTable,
    learned: HashSet<char>,
}

impl<'a> Classifier<'a> {
    pub fn new(table: &'a ReferenceTable, target: Grade) -> Self {
        Self { table, learned: table.learned_set(target) }
    }

    pub fn is_unlearned(&self, c: char) -> bool {
        is_kanji(c) && !self.learned.contains(&c)
    }

    /// Unlearned kanji in `text`, unique and in order of first appearance.
    pub fn unlearned_in(&self, text: &str) -> Vec<UnlearnedKanji> {
        let mut found = Vec::new();
        self.collect_into(text, &mut HashSet::new(), &mut found);
        found
    }

    /// Appends kanji from `text` that are neither learned nor already in `seen`.
    pub(crate) fn collect_into(
        &self,
        text: &str,
        seen: &mut HashSet<char>,
        found: &mut Vec<UnlearnedKanji>,
    ) {
        for c in text.chars() {
            if self.is_unlearned(c) && seen.insert(c) {
                found.push(UnlearnedKanji { character: c, grade: self.table.introduction_grade(c) });
            }
        }
    }
}

pub fn unlearned_in(table: &ReferenceTable, text: &str, target: Grade) -> Vec<UnlearnedKanji> {
    Classifier::new(table, target).unlearned_in(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade(n: u8) -> Grade {
        Grade::new(n).unwrap()
    }

    fn chars(records: &[UnlearnedKanji]) -> String {
        records.iter().map(|r| r.character).collect()
    }

    #[test]
    fn test_learned_kanji_are_skipped() {
        let table = ReferenceTable::builtin().unwrap();
        assert!(unlearned_in(&table, "山川田", grade(1)).is_empty());
        assert!(unlearned_in(&table, "こんにちは、世界！", grade(3)).is_empty());
        assert!(unlearned_in(&table, "", grade(1)).is_empty());
    }

    #[test]
    fn test_first_occurrence_order_without_duplicates() {
        let table = ReferenceTable::builtin().unwrap();
        // 海 (2), 鬱 (7), 岡 (4)
        let records = unlearned_in(&table, "鬱な海と岡、海と鬱", grade(1));
        assert_eq!(chars(&records), "鬱海岡");
        assert_eq!(records[0].grade, KanjiGrade::Advanced);
        assert_eq!(records[1].grade, KanjiGrade::Elementary(grade(2)));
        assert_eq!(records[2].grade, KanjiGrade::Elementary(grade(4)));
        assert_eq!(records[2].label(), "4年");
    }

    #[test]
    fn test_every_record_is_above_target() {
        let table = ReferenceTable::builtin().unwrap();
        let text = "昔々、ある村に正直なおじいさんと憂鬱な犬が住んでいました。雪が降る冬の朝。";
        for target in Grade::all() {
            let records = unlearned_in(&table, text, target);
            let unique: HashSet<char> = records.iter().map(|r| r.character).collect();
            assert_eq!(unique.len(), records.len());
            for record in &records {
                assert!(record.grade > KanjiGrade::Elementary(target));
                assert_eq!(record.grade, table.introduction_grade(record.character));
            }
        }
    }

    #[test]
    fn test_higher_target_never_adds_kanji() {
        let table = ReferenceTable::builtin().unwrap();
        let text = "議論の結果、複雑な憲法の解釈について満場一致で合意した。";
        let mut previous = usize::MAX;
        for target in Grade::all() {
            let count = unlearned_in(&table, text, target).len();
            assert!(count <= previous);
            previous = count;
        }
    }

    #[test]
    fn test_advanced_only_at_sixth_grade() {
        let table = ReferenceTable::builtin().unwrap();
        let records = unlearned_in(&table, "憂鬱", Grade::LAST);
        assert_eq!(
            records,
            vec![
                UnlearnedKanji { character: '憂', grade: KanjiGrade::Advanced },
                UnlearnedKanji { character: '鬱', grade: KanjiGrade::Advanced },
            ]
        );
    }

    #[test]
    fn test_record_serializes_with_grade_number() {
        let record = UnlearnedKanji { character: '鬱', grade: KanjiGrade::Advanced };
        assert_eq!(serde_json::to_string(&record).unwrap(), r#"{"char":"鬱","grade":7}"#);
    }
}
