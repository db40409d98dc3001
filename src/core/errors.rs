use thiserror::Error;

#[derive(Error, Debug)]
pub enum MishuError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(Box<csv::Error>),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("File is not valid UTF-8 text: {0}")]
    Encoding(String),

    #[error("Grade must be between 1 and 6, got {0}")]
    InvalidGrade(u8),

    #[error("Unknown grade key in reference table: {0:?}")]
    InvalidGradeKey(String),

    #[error("Reference table has no entry for grade {0}")]
    MissingGrade(u8),

    #[error("Reference table entry {entry:?} in grade {grade} is not a single character")]
    InvalidTableEntry { grade: u8, entry: String },

    #[error("Kanji {character} is listed in both grade {first} and grade {second}")]
    OverlappingGrades { character: char, first: u8, second: u8 },

    #[error("{0} is not a .csv file")]
    UnsupportedFileType(String),
}

impl From<std::io::Error> for MishuError {
    fn from(error: std::io::Error) -> Self {
        MishuError::Io(Box::new(error))
    }
}

impl From<csv::Error> for MishuError {
    fn from(error: csv::Error) -> Self {
        MishuError::Csv(Box::new(error))
    }
}
