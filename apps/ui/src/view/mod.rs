//! Rendering: pure projections from controller state to terminal text.
//! No side effects here — the session loop decides when to print.

pub mod loading;

use crate::models::score::ScoreEntry;

const TITLE: &str = "Resume Rankings based on score";
const EMPTY_TITLE: &str = "No results available yet";
const EMPTY_HINT: &str = "Upload files and calculate rankings to see results";

/// Renders the result list. Input must already be in display order
/// (see `models::score::ranked`).
pub fn render_results(ranked: &[ScoreEntry]) -> String {
    if ranked.is_empty() {
        return format!("{EMPTY_TITLE}\n{EMPTY_HINT}\n");
    }

    let mut out = format!("{TITLE}\n\n");
    for (index, entry) in ranked.iter().enumerate() {
        out.push_str(&render_entry(index, entry));
        out.push('\n');
    }
    out
}

fn render_entry(index: usize, entry: &ScoreEntry) -> String {
    format!(
        "#{:<3} {:<40} {:>8} [{}]",
        index + 1,
        entry.filename,
        format_score(entry),
        entry.band().label()
    )
}

/// Two-decimal percentage, matching what the original badge displayed.
/// Unparseable scores are shown as the API sent them.
fn format_score(entry: &ScoreEntry) -> String {
    let parsed = entry.parsed_score();
    if parsed.is_finite() {
        format!("{parsed:.2}%")
    } else {
        entry.score.clone()
    }
}
