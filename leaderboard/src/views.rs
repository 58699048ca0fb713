//! HTML pages for browsers.
//!
//! The markup is small enough to build with `format!`; everything that comes
//! from a user goes through [`escape`] first.

use axum::http::StatusCode;

use crate::rank::RankedScore;

const STYLE: &str = "body{font-family:sans-serif;max-width:40em;margin:2em auto}\
table{width:100%;border-collapse:collapse}\
th,td{padding:.3em .6em;text-align:left;border-bottom:1px solid #ddd}\
td.num{text-align:right}";

/// Renders the leaderboard table.
///
/// Review mode adds an id column so an operator can find the entry to pass to
/// `DELETE /api/{id}`.
pub fn leaderboard_page(scores: &[RankedScore], review: bool) -> String {
    let rows: String = scores
        .iter()
        .map(|entry| {
            let id_cell = if review {
                format!("<td class=\"num\">{}</td>", entry.score.id)
            } else {
                String::new()
            };
            format!(
                "<tr><td class=\"num\">{}</td>{id_cell}<td>{}</td><td class=\"num\">{}</td></tr>",
                entry.rank,
                escape(&entry.score.username),
                entry.score.points
            )
        })
        .collect();

    let id_header = if review { "<th>Id</th>" } else { "" };
    let body = if scores.is_empty() {
        "<p>No scores yet.</p>".to_string()
    } else {
        format!(
            "<table><thead><tr><th>#</th>{id_header}<th>Name</th><th>Score</th></tr></thead>\
             <tbody>{rows}</tbody></table>"
        )
    };
    let title = if review { "Scores (review)" } else { "Scores" };
    document(title, &format!("<h1>{title}</h1>{body}"))
}

/// Renders a generic error page for `status`.
pub fn error_page(status: StatusCode) -> String {
    let code = status.as_u16();
    let description = status.canonical_reason().unwrap_or("Error");
    document(
        &format!("{code} {description}"),
        &format!("<h1>{code}</h1><p>{description}</p>"),
    )
}

fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title>\
         <style>{STYLE}</style></head><body>{body}</body></html>"
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
