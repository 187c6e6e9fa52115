//! lexigrade-report: Self-contained HTML reports for quiz attempts.

pub mod html;

pub use html::{generate_html, write_html_report};
