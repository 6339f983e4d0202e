//! Plain-text table renderer.
//!
//! Renders a [`GridViewModel`] as fixed-width text: a sort caption, the column
//! headers, one line per displayed row and a pagination footer. The row under
//! edit shows its draft values and is prefixed with `*`.

use crate::app::state::LoadStatus;
use crate::domain::record::{Column, Record, RecordPatch};
use crate::ui::viewmodel::{DisplayRow, GridViewModel};
use crate::view::SortDirection;
use std::fmt::Write as _;

const TITLE_WIDTH: usize = 32;
const PRICE_WIDTH: usize = 10;
const TEXT_WIDTH: usize = 20;

/// Renders the read model as a text table.
///
/// # Example
///
/// ```rust
/// use catalog_grid::app::GridState;
/// use catalog_grid::domain::Record;
/// use catalog_grid::ui::render_table;
/// use catalog_grid::view::ViewParams;
///
/// let mut state = GridState::new(ViewParams::default());
/// state.store.replace_all(vec![Record::new(1, "Phone", 10.0, "smartphones", "Apple")])?;
///
/// let text = render_table(&state.compute_viewmodel());
/// assert!(text.contains("Phone"));
/// assert!(text.contains("Page 1 of 1"));
/// # Ok::<(), catalog_grid::GridError>(())
/// ```
#[must_use]
pub fn render_table(vm: &GridViewModel) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", vm.header.caption);

    let mut header_line = String::from("  ");
    for header in &vm.header.columns {
        let marker = match header.sort {
            Some(SortDirection::Ascending) => " ^",
            Some(SortDirection::Descending) => " v",
            None => "",
        };
        let label = format!("{}{marker}", header.label);
        header_line.push_str(&pad(&label, width(header.column)));
        header_line.push(' ');
    }
    let _ = writeln!(out, "{}", header_line.trim_end());

    if vm.rows.is_empty() {
        let _ = writeln!(out, "  {}", empty_message(&vm.status.load));
    }

    for row in &vm.rows {
        let _ = writeln!(out, "{}", render_row(row));
    }

    let shown_page = if vm.page_count == 0 { 0 } else { vm.page_index + 1 };
    let _ = writeln!(
        out,
        "Page {shown_page} of {} ({} records, {} per page)",
        vm.page_count,
        vm.total_count,
        vm.params.page_size()
    );

    if let Some(notice) = &vm.status.notice {
        let _ = writeln!(out, "! {}", notice.message);
    }

    out
}

fn render_row(row: &DisplayRow) -> String {
    let shown = row.draft.as_ref().map_or_else(
        || row.record.clone(),
        |draft| merged(&row.record, draft),
    );

    let mut line = String::from(if row.is_editing { "* " } else { "  " });
    for column in Column::ALL {
        line.push_str(&pad(&shown.field_text(column), width(column)));
        line.push(' ');
    }
    line.trim_end().to_string()
}

fn merged(record: &Record, draft: &RecordPatch) -> Record {
    let mut shown = record.clone();
    draft.apply_to(&mut shown);
    shown
}

fn empty_message(load: &LoadStatus) -> String {
    match load {
        LoadStatus::NotStarted | LoadStatus::Ready { .. } => "No records".to_string(),
        LoadStatus::Loading => "Loading...".to_string(),
        LoadStatus::Failed { message } => format!("Failed to load catalog: {message}"),
    }
}

const fn width(column: Column) -> usize {
    match column {
        Column::Title => TITLE_WIDTH,
        Column::Price => PRICE_WIDTH,
        Column::Category | Column::Brand => TEXT_WIDTH,
    }
}

/// Left-aligns `text` in `width` characters, truncating with "..." if needed.
fn pad(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        format!("{text:<width$}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::GridState;
    use crate::domain::{GridError, RecordId};
    use crate::view::ViewParams;

    #[test]
    fn pad_truncates_long_text() {
        assert_eq!(pad("abcdefghij", 6), "abc...");
        assert_eq!(pad("ab", 4), "ab  ");
    }

    #[test]
    fn failed_load_shows_empty_grid_with_error() {
        let mut state = GridState::new(ViewParams::default());
        state.status.load = LoadStatus::Failed {
            message: "timeout".to_string(),
        };
        state.record_error(&GridError::SourceUnavailable("timeout".to_string()));

        let text = render_table(&state.compute_viewmodel());

        assert!(text.contains("Failed to load catalog: timeout"));
        assert!(text.contains("Page 0 of 0"));
        assert!(text.contains("! Catalog source unavailable: timeout"));
    }

    #[test]
    fn editing_row_shows_draft_values() {
        let mut state = GridState::new(ViewParams::default());
        state
            .store
            .replace_all(vec![Record::new(1, "Phone", 10.0, "", "")])
            .unwrap();
        let record = state.store.get(RecordId(1)).cloned().unwrap();
        state.edit.begin_edit(&record).unwrap();
        state.edit.update_draft_field(Column::Title, "Phone Pro").unwrap();

        let text = render_table(&state.compute_viewmodel());

        assert!(text.lines().any(|l| l.starts_with("* Phone Pro")));
    }
}
