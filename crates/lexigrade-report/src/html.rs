//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::path::Path;

use lexigrade_core::grading::Classification;
use lexigrade_core::report::{AttemptRecord, TestReport};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from an attempt record.
pub fn generate_html(record: &AttemptRecord) -> String {
    let report = &record.report;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>lexigrade report: week {} ({})</title>\n",
        record.week, record.page
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>lexigrade report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Week <strong>{}</strong> | {} | {} | {} questions | {}</p>\n",
        record.week,
        record.page,
        record.direction,
        report.total,
        record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Exact</th><th>Tolerant</th><th>Incorrect</th><th>Credited</th><th>Score</th><th>Verdict</th></tr></thead>\n");
    html.push_str(&format!(
        "<tbody><tr><td>{}</td><td>{}</td><td>{}</td><td>{}/{}</td><td>{}</td><td>{}</td></tr></tbody>\n",
        report.exact_count,
        report.tolerant_count,
        report.incorrect_count,
        report.credited_count,
        report.total,
        report
            .score_percent
            .map_or_else(|| "-".to_string(), |s| format!("{s}%")),
        report
            .verdict()
            .map_or_else(|| "-".to_string(), |v| v.to_string()),
    ));
    html.push_str("</table>\n");

    if report.total > 0 {
        html.push_str(&generate_partition_bar(report));
    }

    html.push_str("</section>\n");

    // Per-question results
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Answers</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">#</th><th onclick=\"sortTable(1)\">Question</th><th onclick=\"sortTable(2)\">Expected</th><th onclick=\"sortTable(3)\">Answer</th><th onclick=\"sortTable(4)\">Result</th><th onclick=\"sortTable(5)\">Edits</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for (i, d) in report.details.iter().enumerate() {
        let class = d.classification.to_string();
        let edits = match d.classification {
            Classification::Exact => "-".to_string(),
            _ => format!("{}/{}", d.distance, d.threshold),
        };
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            class,
            i + 1,
            html_escape(d.prompt.as_deref().unwrap_or("")),
            html_escape(&d.expected),
            html_escape(&d.actual),
            d.classification,
            edits
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(record).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    // JavaScript for sorting
    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(record: &AttemptRecord, path: &Path) -> Result<()> {
    let html = generate_html(record);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

/// One stacked bar: exact, tolerant and incorrect shares of the total.
fn generate_partition_bar(report: &TestReport) -> String {
    let bar_height = 30;
    let max_width = 600usize;

    let segments = [
        ("Exact", report.exact_count, "#22c55e"),
        ("Tolerant", report.tolerant_count, "#eab308"),
        ("Incorrect", report.incorrect_count, "#ef4444"),
    ];

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        max_width,
        bar_height + 30
    );

    let mut x = 0usize;
    for (label, count, color) in segments {
        if count == 0 {
            continue;
        }
        let width = count * max_width / report.total;
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"{}\"><title>{}: {}</title></rect>\n",
            x, width, bar_height, color, label, count
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\">{} {}</text>\n",
            x + 4,
            bar_height + 18,
            label,
            count
        ));
        x += width;
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --exact: #dcfce7; --tolerant: #fef9c3; --incorrect: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --exact: #064e3b; --tolerant: #713f12; --incorrect: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.exact { background: var(--exact); }
.tolerant { background: var(--tolerant); }
.incorrect { background: var(--incorrect); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    return asc ? va.localeCompare(vb, undefined, {numeric: true}) : vb.localeCompare(va, undefined, {numeric: true});
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use lexigrade_core::grading::AnswerPair;
    use lexigrade_core::model::{Direction, Selection};
    use lexigrade_core::report::build_report;

    fn make_record(pairs: &[AnswerPair]) -> AttemptRecord {
        let mut record = AttemptRecord::new(
            3,
            Selection::Page(2).into(),
            Direction::ToWord,
            build_report(pairs),
        );
        record.id = uuid::Uuid::nil();
        record
    }

    #[test]
    fn html_report_contains_required_elements() {
        let record = make_record(&[
            AnswerPair::new("cat", "cat").with_prompt("кот"),
            AnswerPair::new("elephant", "elefant"),
            AnswerPair::new("fish", "bird"),
        ]);
        let html = generate_html(&record);

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("кот"));
        assert!(html.contains("elefant"));
        assert!(html.contains("page 2"));
        assert!(html.contains("67%"));
        assert!(html.contains("<svg"));
        assert!(html.contains("1/1"));
        assert!(html.contains("<tr class=\"exact\">"));
        assert!(html.contains("<tr class=\"tolerant\">"));
        assert!(html.contains("<tr class=\"incorrect\">"));
    }

    #[test]
    fn user_text_is_escaped() {
        let record = make_record(&[AnswerPair::new("a<b", "<script>alert(1)</script>")]);
        let html = generate_html(&record);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn empty_attempt_renders() {
        let html = generate_html(&make_record(&[]));
        assert!(html.contains("<td>-</td>"));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn html_report_write_to_file() {
        let record = make_record(&[AnswerPair::new("cat", "cat")]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/report.html");

        write_html_report(&record, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
