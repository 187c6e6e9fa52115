//! Typed errors for grading input and quiz setup.
//!
//! Grading itself never fails; these errors come from the boundaries where
//! untyped input or user choices enter the engine.

use thiserror::Error;

/// Malformed answer input rejected before grading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GradeError {
    /// The answer sheet is not a list of answer objects.
    #[error("expected a list of answers, found {found}")]
    NotAList { found: &'static str },

    /// An answer item is not an object.
    #[error("answer #{index}: expected an object, found {found}")]
    NotAnObject { index: usize, found: &'static str },

    /// A required field is absent.
    #[error("answer #{index}: missing field `{field}`")]
    MissingField { index: usize, field: &'static str },

    /// A field holds something other than a string.
    #[error("answer #{index}: field `{field}` must be a string, found {found}")]
    InvalidType {
        index: usize,
        field: &'static str,
        found: &'static str,
    },
}

/// A quiz that cannot be started.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    /// The week has no words.
    #[error("week {week} has no words")]
    EmptyList { week: u32 },

    /// The requested page does not exist.
    #[error("page {page} out of range (week {week} has {pages} page(s))")]
    PageOutOfRange { week: u32, page: usize, pages: usize },

    /// Page size must be positive.
    #[error("page size must be at least 1")]
    ZeroPageSize,
}
