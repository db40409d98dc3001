use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

use super::MishuError;

/// An elementary school year, 1 through 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Grade(u8);

impl Grade {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    pub const FIRST: Grade = Grade(1);
    pub const LAST: Grade = Grade(6);

    pub fn new(value: u8) -> Result<Self, MishuError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Grade(value))
        } else {
            Err(MishuError::InvalidGrade(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Grades 1..=6 in ascending order.
    pub fn all() -> impl Iterator<Item = Grade> {
        (Self::MIN..=Self::MAX).map(Grade)
    }

    /// Every grade up to and including this one.
    pub fn up_to(self) -> impl Iterator<Item = Grade> {
        (Self::MIN..=self.0).map(Grade)
    }

    pub fn label(self) -> String {
        format!("{}年", self.0)
    }

    pub(crate) fn index(self) -> usize {
        (self.0 - Self::MIN) as usize
    }
}

impl Default for Grade {
    fn default() -> Self {
        Grade::FIRST
    }
}

impl TryFrom<u8> for Grade {
    type Error = MishuError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Grade::new(value)
    }
}

impl From<Grade> for u8 {
    fn from(grade: Grade) -> Self {
        grade.0
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The school year in which a kanji is normally introduced.
///
/// `Advanced` covers everything outside the elementary allocation table
/// (middle school or later) and sorts after every elementary grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum KanjiGrade {
    Elementary(Grade),
    Advanced,
}

impl KanjiGrade {
    pub const ADVANCED_NUMBER: u8 = 7;

    /// 1..=6 for elementary grades, 7 for `Advanced`.
    pub fn number(self) -> u8 {
        match self {
            KanjiGrade::Elementary(grade) => grade.value(),
            KanjiGrade::Advanced => Self::ADVANCED_NUMBER,
        }
    }

    pub fn label(self) -> String {
        match self {
            KanjiGrade::Elementary(grade) => grade.label(),
            KanjiGrade::Advanced => "中+".to_string(),
        }
    }

    /// Whether a pupil finishing `target` has already met this kanji.
    pub fn is_learned_by(self, target: Grade) -> bool {
        match self {
            KanjiGrade::Elementary(grade) => grade <= target,
            KanjiGrade::Advanced => false,
        }
    }
}

impl From<KanjiGrade> for u8 {
    fn from(grade: KanjiGrade) -> Self {
        grade.number()
    }
}

impl fmt::Display for KanjiGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_bounds() {
        assert!(Grade::new(0).is_err());
        assert!(Grade::new(7).is_err());
        assert_eq!(Grade::new(1).unwrap(), Grade::FIRST);
        assert_eq!(Grade::new(6).unwrap(), Grade::LAST);
        assert!(matches!(Grade::new(9), Err(MishuError::InvalidGrade(9))));
    }

    #[test]
    fn test_grade_iteration() {
        let all: Vec<u8> = Grade::all().map(Grade::value).collect();
        assert_eq!(all, vec![1, 2, 3, 4, 5, 6]);

        let up_to_three: Vec<u8> = Grade::new(3).unwrap().up_to().map(Grade::value).collect();
        assert_eq!(up_to_three, vec![1, 2, 3]);
    }

    #[test]
    fn test_labels() {
        assert_eq!(KanjiGrade::Elementary(Grade::new(2).unwrap()).label(), "2年");
        assert_eq!(KanjiGrade::Advanced.label(), "中+");
        assert_eq!(KanjiGrade::Advanced.number(), 7);
    }

    #[test]
    fn test_kanji_grade_ordering() {
        let sixth = KanjiGrade::Elementary(Grade::LAST);
        let first = KanjiGrade::Elementary(Grade::FIRST);
        assert!(first < sixth);
        assert!(sixth < KanjiGrade::Advanced);

        assert!(first.is_learned_by(Grade::FIRST));
        assert!(!sixth.is_learned_by(Grade::new(5).unwrap()));
        assert!(!KanjiGrade::Advanced.is_learned_by(Grade::LAST));
    }

    #[test]
    fn test_serde_forms() {
        assert_eq!(serde_json::to_string(&KanjiGrade::Advanced).unwrap(), "7");
        assert_eq!(serde_json::to_string(&Grade::new(4).unwrap()).unwrap(), "4");
        assert!(serde_json::from_str::<Grade>("8").is_err());
        assert_eq!(serde_json::from_str::<Grade>("5").unwrap().value(), 5);
    }
}
