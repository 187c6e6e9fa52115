//! lexigrade-core: Answer-tolerance grading engine and quiz model.
//!
//! The grading pipeline runs normalization, then edit distance, then
//! classification, and finally folds per-question results into a
//! [`report::TestReport`]. Everything in [`grading`], [`distance`] and
//! [`normalize`] is pure and holds no state between calls.

pub mod distance;
pub mod error;
pub mod grading;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod quiz;
pub mod report;
pub mod statistics;
pub mod traits;

pub use distance::levenshtein;
pub use grading::{classify, tolerance_threshold, AnswerPair, Classification, GradeResult};
pub use normalize::normalize;
pub use report::{build_report, ReportBuilder, TestReport};
