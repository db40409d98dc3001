pub mod classifier;
pub mod errors;
pub mod grade;
pub mod highlight;
pub mod pipeline;
pub mod reference;

pub use classifier::{
    unlearned_in,
    Classifier,
    UnlearnedKanji,
};
pub use errors::MishuError;
pub use grade::{
    Grade,
    KanjiGrade,
};
pub use highlight::{
    Highlighter,
    Segment,
};
pub use pipeline::{
    classify_rows,
    AggregateResult,
    RowKind,
    RowResult,
};
pub use reference::{
    is_kanji,
    ReferenceTable,
};
