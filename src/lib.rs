pub mod core;
pub mod export;
pub mod gui;
pub mod logging;
pub mod parser;
pub mod persistence;
pub mod session;
pub mod settings;

pub use crate::core::{
    classify_rows,
    unlearned_in,
    AggregateResult,
    Grade,
    KanjiGrade,
    MishuError,
    ReferenceTable,
    RowResult,
    UnlearnedKanji,
};
