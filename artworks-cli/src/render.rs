//! Plain-text rendering of pages and selection state.

use std::fmt::Write;

use artworks_lib::api::Page;
use artworks_lib::model::Artwork;
use artworks_lib::selection::PageSelectionState;
use artworks_lib::selection::RangeOutcome;
use artworks_lib::selection::SelectionStore;
use artworks_lib::selection::StopReason;

const TITLE_WIDTH: usize = 40;
const ARTIST_WIDTH: usize = 28;
const ORIGIN_WIDTH: usize = 16;

/// Formats a count with thousands separators.
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// "N rows selected across all pages", or `None` when nothing is selected.
pub fn selection_summary(count: usize) -> Option<String> {
    match count {
        0 => None,
        1 => Some("1 row selected across all pages".to_string()),
        n => Some(format!("{} rows selected across all pages", format_count(n))),
    }
}

/// "Page X of Y | Total: N records".
pub fn page_status(current: u32, total_pages: u32, total_records: usize) -> String {
    format!(
        "Page {} of {} | Total: {} records",
        current,
        format_count(total_pages as usize),
        format_count(total_records)
    )
}

/// Checkbox glyph for the page header.
pub fn header_marker(state: PageSelectionState) -> &'static str {
    match state {
        PageSelectionState::None => "[ ]",
        PageSelectionState::Partial => "[-]",
        PageSelectionState::All => "[x]",
    }
}

fn truncate(text: &str, width: usize) -> String {
    // Artist lines carry nationality and dates after a newline.
    let first_line = text.lines().next().unwrap_or_default();
    if first_line.chars().count() <= width {
        return first_line.to_string();
    }
    let mut out: String = first_line.chars().take(width.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

/// Renders the visible page as a table with selection checkboxes.
pub fn render_page(
    page: &Page<Artwork>,
    store: &SelectionStore,
    state: PageSelectionState,
    page_size: usize,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {:>8}  {:<tw$}  {:<aw$}  {:<ow$}  {:>6}  {:>6}",
        header_marker(state),
        "ID",
        "Title",
        "Artist",
        "Origin",
        "Start",
        "End",
        tw = TITLE_WIDTH,
        aw = ARTIST_WIDTH,
        ow = ORIGIN_WIDTH,
    );

    if page.is_empty() {
        out.push_str("    No artworks found\n");
    }

    for artwork in page.items() {
        let mark = if store.contains(artwork.id) { "[x]" } else { "[ ]" };
        let _ = writeln!(
            out,
            "{} {:>8}  {:<tw$}  {:<aw$}  {:<ow$}  {:>6}  {:>6}",
            mark,
            artwork.id,
            truncate(&artwork.title, TITLE_WIDTH),
            truncate(&artwork.artist_display, ARTIST_WIDTH),
            truncate(&artwork.place_of_origin, ORIGIN_WIDTH),
            artwork.date_start,
            artwork.date_end,
            tw = TITLE_WIDTH,
            aw = ARTIST_WIDTH,
            ow = ORIGIN_WIDTH,
        );
    }

    let _ = writeln!(
        out,
        "{}",
        page_status(page.index(), page.total_pages(page_size), page.total_count())
    );
    if let Some(summary) = selection_summary(store.count()) {
        let _ = writeln!(out, "{}", summary);
    }
    out
}

/// Describes the result of a range selection.
pub fn render_outcome(outcome: &RangeOutcome) -> String {
    let mut out = format!(
        "Selected {} of {} requested ({} new, {} page(s) fetched)",
        format_count(outcome.achieved()),
        format_count(outcome.requested),
        format_count(outcome.newly_added),
        outcome.pages_fetched
    );
    match &outcome.stop {
        StopReason::Satisfied => {}
        StopReason::Exhausted => out.push_str("; reached the end of the collection"),
        StopReason::FetchFailed { page, error } => {
            let _ = write!(out, "; stopped at page {}: {}", page, error);
        }
    }
    out
}
