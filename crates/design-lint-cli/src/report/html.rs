//! Self-contained HTML page.

use std::fmt::Write;

use design_lint_core::{AuditReport, CheckStatus};

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:2rem;color:#1f2328}\
table{border-collapse:collapse;width:100%;margin-bottom:2rem}\
th,td{border:1px solid #d0d7de;padding:.4rem .6rem;text-align:left;vertical-align:top}\
td.suggestion{white-space:pre-wrap}\
.pass{color:#1a7f37}.warning{color:#9a6700}.fail{color:#cf222e}\
.score{font-size:2rem;font-weight:600}";

pub(super) fn render(report: &AuditReport) -> String {
    let overall = &report.scores.overall;
    let mut out = String::new();
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>design-lint report</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>design-lint report</h1>\n<p class=\"score\">Overall score {}</p>\n\
         <p>{} passed, {} warning(s), {} failed</p>\n",
        overall.score, overall.passed, overall.warnings, overall.failed
    );

    for (title, checks, score) in super::sections(report) {
        let _ = writeln!(out, "<h2>{title} <small>(score {})</small></h2>", score.score);
        if checks.is_empty() {
            out.push_str("<p>No checks.</p>\n");
            continue;
        }
        out.push_str("<table>\n<tr><th>Status</th><th>Check</th><th>Page</th><th>Suggestion</th></tr>\n");
        for check in checks {
            let class = match check.status {
                CheckStatus::Pass => "pass",
                CheckStatus::Warning => "warning",
                CheckStatus::Fail => "fail",
            };
            let _ = writeln!(
                out,
                "<tr><td class=\"{class}\">{class}</td><td>{}</td><td>{}</td><td class=\"suggestion\">{}</td></tr>",
                escape(&check.check),
                escape(check.page_name.as_deref().unwrap_or("")),
                escape(&check.suggestion)
            );
        }
        out.push_str("</table>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
