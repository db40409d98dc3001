use std::{
    collections::{
        BTreeMap,
        HashMap,
        HashSet,
    },
    fs,
    ops::RangeInclusive,
    path::Path,
};

use serde::Deserialize;

use super::{
    Grade,
    KanjiGrade,
    MishuError,
};

/// CJK Unified Ideographs.
pub const KANJI_RANGE: RangeInclusive<char> = '\u{4E00}'..='\u{9FFF}';

// 学年別漢字配当表 (2020): 80 / 160 / 200 / 202 / 193 / 191
const BUILTIN_TABLE: &str = include_str!("../../assets/kanji_grades.json");

pub fn is_kanji(c: char) -> bool {
    KANJI_RANGE.contains(&c)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GradeEntries {
    Text(String),
    List(Vec<String>),
}

impl GradeEntries {
    fn into_chars(self, grade: Grade) -> Result<Vec<char>, MishuError> {
        match self {
            GradeEntries::Text(text) => Ok(text.chars().filter(|c| !c.is_whitespace()).collect()),
            GradeEntries::List(entries) => entries
                .into_iter()
                .map(|entry| {
                    let mut chars = entry.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => Ok(c),
                        _ => Err(MishuError::InvalidTableEntry { grade: grade.value(), entry }),
                    }
                })
                .collect(),
        }
    }
}

/// Fixed grade-to-kanji allocation. Every kanji belongs to at most one grade.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    grades: [HashSet<char>; 6],
}

impl ReferenceTable {
    /// The table compiled into the binary.
    pub fn builtin() -> Result<Self, MishuError> {
        Self::from_json(BUILTIN_TABLE)
    }

    pub fn load(path: &Path) -> Result<Self, MishuError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, MishuError> {
        let raw: BTreeMap<String, GradeEntries> = serde_json::from_str(json)?;

        let mut by_grade = Vec::with_capacity(raw.len());
        for (key, entries) in raw {
            let grade = key
                .trim()
                .parse::<u8>()
                .ok()
                .and_then(|n| Grade::new(n).ok())
                .ok_or_else(|| MishuError::InvalidGradeKey(key.clone()))?;
            by_grade.push((grade, entries.into_chars(grade)?));
        }

        for grade in Grade::all() {
            if !by_grade.iter().any(|(g, _)| *g == grade) {
                return Err(MishuError::MissingGrade(grade.value()));
            }
        }

        Self::from_grades(by_grade)
    }

    /// Builds a table and rejects any kanji that shows up under two different grades.
    pub fn from_grades<I, C>(grades: I) -> Result<Self, MishuError>
    where
        I: IntoIterator<Item = (Grade, C)>,
        C: IntoIterator<Item = char>,
    {
        let mut table = ReferenceTable::default();
        let mut owner: HashMap<char, Grade> = HashMap::new();

        for (grade, chars) in grades {
            for c in chars {
                if let Some(&first) = owner.get(&c) {
                    if first != grade {
                        let (first, second) = (first.min(grade), first.max(grade));
                        return Err(MishuError::OverlappingGrades {
                            character: c,
                            first: first.value(),
                            second: second.value(),
                        });
                    }
                    continue;
                }
                owner.insert(c, grade);
                table.grades[grade.index()].insert(c);
            }
        }

        Ok(table)
    }

    pub fn kanji_for(&self, grade: Grade) -> &HashSet<char> {
        &self.grades[grade.index()]
    }

    /// Scans grades 1..=6 in order; anything not found is `Advanced`.
    pub fn introduction_grade(&self, c: char) -> KanjiGrade {
        Grade::all()
            .find(|grade| self.kanji_for(*grade).contains(&c))
            .map(KanjiGrade::Elementary)
            .unwrap_or(KanjiGrade::Advanced)
    }

    /// Union of every grade up to and including `target`.
    pub fn learned_set(&self, target: Grade) -> HashSet<char> {
        target.up_to().flat_map(|grade| self.kanji_for(grade).iter().copied()).collect()
    }

    pub fn len(&self) -> usize {
        self.grades.iter().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade(n: u8) -> Grade {
        Grade::new(n).unwrap()
    }

    #[test]
    fn test_is_kanji_range() {
        assert!(is_kanji('一'));
        assert!(is_kanji('\u{4E00}'));
        assert!(is_kanji('\u{9FFF}'));
        assert!(is_kanji('鬱'));
        assert!(!is_kanji('\u{4DFF}'));
        assert!(!is_kanji('\u{A000}'));
        assert!(!is_kanji('あ'));
        assert!(!is_kanji('ア'));
        assert!(!is_kanji('A'));
        assert!(!is_kanji('々'));
    }

    #[test]
    fn test_builtin_counts() {
        let table = ReferenceTable::builtin().unwrap();
        let counts: Vec<usize> = Grade::all().map(|g| table.kanji_for(g).len()).collect();
        assert_eq!(counts, vec![80, 160, 200, 202, 193, 191]);
        assert_eq!(table.len(), 1026);
    }

    #[test]
    fn test_builtin_grades_are_disjoint() {
        let table = ReferenceTable::builtin().unwrap();
        for a in Grade::all() {
            for b in Grade::all().filter(|b| *b > a) {
                let overlap: Vec<_> = table.kanji_for(a).intersection(table.kanji_for(b)).collect();
                assert!(overlap.is_empty(), "grades {} and {} share {:?}", a, b, overlap);
            }
        }
    }

    #[test]
    fn test_builtin_entries_are_kanji() {
        let table = ReferenceTable::builtin().unwrap();
        for g in Grade::all() {
            assert!(table.kanji_for(g).iter().all(|c| is_kanji(*c)));
        }
    }

    #[test]
    fn test_introduction_grade_matches_table() {
        let table = ReferenceTable::builtin().unwrap();
        for g in Grade::all() {
            for c in table.kanji_for(g) {
                assert_eq!(table.introduction_grade(*c), KanjiGrade::Elementary(g));
            }
        }

        assert_eq!(table.introduction_grade('山'), KanjiGrade::Elementary(grade(1)));
        assert_eq!(table.introduction_grade('岡'), KanjiGrade::Elementary(grade(4)));
        assert_eq!(table.introduction_grade('憂'), KanjiGrade::Advanced);
        assert_eq!(table.introduction_grade('鬱'), KanjiGrade::Advanced);
        // total over non-kanji input
        assert_eq!(table.introduction_grade('あ'), KanjiGrade::Advanced);
        assert_eq!(table.introduction_grade('x'), KanjiGrade::Advanced);
    }

    #[test]
    fn test_learned_set_is_cumulative() {
        let table = ReferenceTable::builtin().unwrap();
        let first = table.learned_set(grade(1));
        let third = table.learned_set(grade(3));
        assert_eq!(first.len(), 80);
        assert_eq!(third.len(), 80 + 160 + 200);
        assert!(first.is_subset(&third));
        assert!(third.contains(&'山'));
        assert!(!third.contains(&'岡'));
        assert_eq!(table.learned_set(Grade::LAST).len(), 1026);
    }

    #[test]
    fn test_from_json_list_form() {
        let json = r#"{
            "1": ["山", "川"],
            "2": "海 空",
            "3": [], "4": "", "5": [], "6": ["鬱"]
        }"#;
        let table = ReferenceTable::from_json(json).unwrap();
        assert_eq!(table.introduction_grade('川'), KanjiGrade::Elementary(grade(1)));
        assert_eq!(table.introduction_grade('空'), KanjiGrade::Elementary(grade(2)));
        assert_eq!(table.introduction_grade('鬱'), KanjiGrade::Elementary(grade(6)));
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn test_from_json_rejects_bad_tables() {
        let missing = r#"{"1": "山", "2": "", "3": "", "4": "", "5": ""}"#;
        assert!(matches!(ReferenceTable::from_json(missing), Err(MishuError::MissingGrade(6))));

        let bad_key = r#"{"0": "山", "1": "", "2": "", "3": "", "4": "", "5": "", "6": ""}"#;
        assert!(matches!(
            ReferenceTable::from_json(bad_key),
            Err(MishuError::InvalidGradeKey(key)) if key == "0"
        ));

        let multi = r#"{"1": ["山川"], "2": "", "3": "", "4": "", "5": "", "6": ""}"#;
        assert!(matches!(
            ReferenceTable::from_json(multi),
            Err(MishuError::InvalidTableEntry { grade: 1, .. })
        ));

        let overlap = r#"{"1": "山", "2": "", "3": "山", "4": "", "5": "", "6": ""}"#;
        assert!(matches!(
            ReferenceTable::from_json(overlap),
            Err(MishuError::OverlappingGrades { character: '山', first: 1, second: 3 })
        ));

        assert!(matches!(ReferenceTable::from_json("not json"), Err(MishuError::Json(_))));
    }

    #[test]
    fn test_repeated_entry_within_grade_is_allowed() {
        let table = ReferenceTable::from_grades(vec![(grade(1), "山山".chars())]).unwrap();
        assert_eq!(table.len(), 1);
    }
}
